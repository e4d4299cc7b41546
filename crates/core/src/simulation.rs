//! The simulation controller: owns all state and runs one step per tick.
//!
//! Per step: the clock advances, the grid is resampled at the new noise time,
//! then every particle reads the cell under it, takes the pointer
//! contribution, integrates, wraps, and emits a draw command.
//!
//! Resizes and population/grid changes rebuild the affected state completely
//! before it is swapped in, so a step never sees a grid that does not match
//! the viewport.

use crate::clock::SimulationClock;
use crate::config::Configuration;
use crate::error::EngineError;
use crate::grid::FlowFieldGrid;
use crate::interaction::InteractionModel;
use crate::noise::NoiseField;
use crate::particle::ParticleSystem;
use crate::pointer::{PointerSource, PointerState};
use crate::prng::Xorshift64;
use crate::render::{DrawCommand, Frame, Renderer};
use crate::vector::Vector2;

/// Everything that changes from frame to frame.
#[derive(Debug, Clone)]
pub struct SimulationState {
    width: usize,
    height: usize,
    grid: FlowFieldGrid,
    particles: ParticleSystem,
    noise: NoiseField,
    clock: SimulationClock,
    pointer: PointerState,
}

impl SimulationState {
    /// Viewport width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Viewport height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Flow grid as of the last step; always sized for the current viewport.
    pub fn grid(&self) -> &FlowFieldGrid {
        &self.grid
    }

    /// The live particle population.
    pub fn particles(&self) -> &ParticleSystem {
        &self.particles
    }

    /// Noise field the grid is sampled from.
    pub fn noise(&self) -> &NoiseField {
        &self.noise
    }

    /// Noise-time clock and frame counter.
    pub fn clock(&self) -> &SimulationClock {
        &self.clock
    }

    /// Pointer snapshot the next step will read.
    pub fn pointer(&self) -> &PointerState {
        &self.pointer
    }
}

/// Flow-field particle simulation.
#[derive(Debug, Clone)]
pub struct Simulation {
    state: SimulationState,
    config: Configuration,
    interaction: InteractionModel,
    rng: Xorshift64,
}

impl Simulation {
    /// Creates a simulation for a `width × height` surface.
    ///
    /// `seed` drives particle spawning and noise reseeding, so equal seeds and
    /// equal inputs give bit-identical frames. Returns
    /// `EngineError::SurfaceUnavailable` if the surface has no area.
    pub fn new(
        width: usize,
        height: usize,
        seed: u64,
        config: Configuration,
    ) -> Result<Self, EngineError> {
        if width == 0 || height == 0 {
            return Err(EngineError::SurfaceUnavailable { width, height });
        }
        let mut rng = Xorshift64::new(seed);
        let noise = NoiseField::new(rng.next_f64());
        let grid = FlowFieldGrid::for_viewport(width, height, config.field_size())?;
        let particles = ParticleSystem::spawn(config.particle_count(), width, height, &mut rng);
        tracing::debug!(
            width,
            height,
            seed,
            particles = particles.len(),
            columns = grid.columns(),
            rows = grid.rows(),
            "simulation created"
        );
        Ok(Self {
            state: SimulationState {
                width,
                height,
                grid,
                particles,
                noise,
                clock: SimulationClock::new(),
                pointer: PointerState::centered(width, height),
            },
            config,
            interaction: InteractionModel,
            rng,
        })
    }

    /// Read-only view of everything the steps mutate.
    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    /// The configuration currently in effect.
    pub fn config(&self) -> &Configuration {
        &self.config
    }

    /// Viewport width in pixels.
    pub fn width(&self) -> usize {
        self.state.width
    }

    /// Viewport height in pixels.
    pub fn height(&self) -> usize {
        self.state.height
    }

    /// Current noise-time coordinate, the `z` the grid was last sampled at.
    pub fn noise_time(&self) -> f64 {
        self.state.clock.time()
    }

    /// Pointer snapshot the next step will read.
    pub fn pointer(&self) -> &PointerState {
        &self.state.pointer
    }

    /// Replaces the stored pointer snapshot. Takes effect on the next step.
    pub fn set_pointer(&mut self, pointer: PointerState) {
        self.state.pointer = pointer;
    }

    /// Pulls a snapshot from `source`; keeps the current one if it has none.
    pub fn poll_pointer<S: PointerSource + ?Sized>(&mut self, source: &S) {
        if let Some(pointer) = source.snapshot() {
            self.state.pointer = pointer;
        }
    }

    /// Reseeds the noise permutation. Later steps sample the new field.
    pub fn reseed(&mut self, value: f64) {
        self.state.noise.seed(value);
    }

    /// Installs a new configuration.
    ///
    /// A different particle count respawns the population; a different field
    /// size reallocates the grid. Everything else applies on the next step.
    pub fn apply_config(&mut self, config: Configuration) {
        let respawn = config.particle_count() != self.config.particle_count();
        let regrid = config.field_size() != self.config.field_size();
        self.config = config;

        if regrid {
            let (w, h) = (self.state.width, self.state.height);
            // The viewport is known to be non-empty, so this cannot fail.
            if let Ok(grid) = FlowFieldGrid::for_viewport(w, h, self.config.field_size()) {
                tracing::debug!(
                    field_size = self.config.field_size(),
                    columns = grid.columns(),
                    rows = grid.rows(),
                    "reallocated flow grid"
                );
                self.state.grid = grid;
            }
        }
        if respawn {
            self.respawn();
        }
    }

    /// Edits the configuration through its setters, then applies it.
    pub fn configure<F: FnOnce(&mut Configuration)>(&mut self, edit: F) {
        let mut config = self.config.clone();
        edit(&mut config);
        self.apply_config(config);
    }

    /// Resizes the viewport: full reset of grid, particles and noise seed.
    ///
    /// Returns `EngineError::InvalidDimensions` for an empty viewport, in
    /// which case nothing changes.
    pub fn resize(&mut self, width: usize, height: usize) -> Result<(), EngineError> {
        let grid = FlowFieldGrid::for_viewport(width, height, self.config.field_size())?;
        let particles =
            ParticleSystem::spawn(self.config.particle_count(), width, height, &mut self.rng);
        let reseed = self.rng.next_f64();

        let state = &mut self.state;
        state.width = width;
        state.height = height;
        state.grid = grid;
        state.particles = particles;
        state.noise.seed(reseed);
        if !state.pointer.is_engaged() {
            state.pointer = PointerState::centered(width, height);
        }
        tracing::debug!(width, height, "viewport resized, state reset");
        Ok(())
    }

    fn respawn(&mut self) {
        let (w, h) = (self.state.width, self.state.height);
        self.state.particles = ParticleSystem::spawn(self.config.particle_count(), w, h, &mut self.rng);
        tracing::debug!(particles = self.state.particles.len(), "respawned particles");
    }

    /// Runs one frame and returns what to draw.
    pub fn step(&mut self) -> Frame {
        let config = &self.config;
        let SimulationState {
            width,
            height,
            grid,
            particles,
            noise,
            clock,
            pointer,
        } = &mut self.state;

        // Interaction sees this frame's pointer before the clock decays it.
        let snapshot = *pointer;
        let time = clock.advance(config.noise_speed(), pointer);
        grid.recompute(noise, time, config.field_force(), config.noise_mode());

        let cell = config.field_size();
        let (w, h) = (*width as f64, *height as f64);
        let mut commands = Vec::with_capacity(particles.len());
        for particle in particles.particles_mut() {
            let field = grid.lookup(particle.position, cell).unwrap_or(Vector2::ZERO);
            let contribution = self.interaction.contribution(particle, &snapshot, config);
            if let Some(steer) = contribution.steer {
                particle.velocity = steer.apply(particle.velocity);
            }
            particle.integrate(field + contribution.acceleration, contribution.speed_cap);
            particle.wrap(w, h, cell);
            commands.push(DrawCommand::for_particle(particle, config));
        }

        tracing::trace!(frame = clock.frames(), time, "stepped");
        Frame {
            fade: config.trail_length(),
            commands,
        }
    }

    /// Runs one frame and replays it straight into `renderer`.
    pub fn step_into<R: Renderer + ?Sized>(&mut self, renderer: &mut R) {
        self.step().render(renderer);
    }

    /// Draw commands for the particles as they are now, without stepping.
    ///
    /// Before the first step this shows the freshly spawned population.
    pub fn frame(&self) -> Frame {
        Frame {
            fade: self.config.trail_length(),
            commands: self
                .state
                .particles
                .iter()
                .map(|p| DrawCommand::for_particle(p, &self.config))
                .collect(),
        }
    }
}
