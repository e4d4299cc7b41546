//! Particles and their integration step.
//!
//! Integration order per frame: accumulate external acceleration, add it to
//! velocity, cap the speed, move, clear the acceleration. The speed cap is
//! applied before the move, so a particle never travels further in one frame
//! than the cap allows.

use crate::prng::Xorshift64;
use crate::vector::Vector2;
use serde::{Deserialize, Serialize};

/// Half-width of the initial velocity jitter on each axis.
const SPAWN_JITTER: f64 = 0.5;
/// Half-width of the fixed per-particle hue offset.
const COLOR_OFFSET_SPREAD: f64 = 15.0;

/// A single point particle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub position: Vector2,
    pub velocity: Vector2,
    /// Transient; zero between frames.
    pub acceleration: Vector2,
    /// Hue offset in degrees, fixed at birth, in `[-15, 15)`.
    pub color_offset: f64,
}

impl Particle {
    /// Particle at rest in the acceleration sense: `acceleration` starts at zero.
    pub fn new(position: Vector2, velocity: Vector2, color_offset: f64) -> Self {
        Self {
            position,
            velocity,
            acceleration: Vector2::ZERO,
            color_offset,
        }
    }

    /// Random particle inside `[0, width) × [0, height)` with small velocity jitter.
    pub fn spawn(rng: &mut Xorshift64, width: f64, height: f64) -> Self {
        let position = Vector2::new(rng.next_range(0.0, width), rng.next_range(0.0, height));
        let velocity = Vector2::new(rng.next_signed(SPAWN_JITTER), rng.next_signed(SPAWN_JITTER));
        let color_offset = rng.next_signed(COLOR_OFFSET_SPREAD);
        Self::new(position, velocity, color_offset)
    }

    /// Advances one frame under `external` acceleration with speed cap `speed_cap`.
    pub fn integrate(&mut self, external: Vector2, speed_cap: f64) {
        self.acceleration += external;
        self.velocity += self.acceleration;
        self.velocity = self.velocity.clamp_length_max(speed_cap);
        self.position += self.velocity;
        self.acceleration = Vector2::ZERO;
    }

    /// Toroidal wrap with a one-cell margin on the left and top.
    ///
    /// Past the right or bottom edge the particle restarts at 0. More than
    /// `margin` past the left or top edge it restarts at `width - 1` /
    /// `height - 1`. Positions already inside
    /// `[-margin, width] × [-margin, height]` are left alone.
    pub fn wrap(&mut self, width: f64, height: f64, margin: f64) {
        self.position.x = wrap_axis(self.position.x, width, margin);
        self.position.y = wrap_axis(self.position.y, height, margin);
    }
}

fn wrap_axis(value: f64, extent: f64, margin: f64) -> f64 {
    if value > extent {
        0.0
    } else if value < -margin {
        extent - 1.0
    } else {
        value
    }
}

/// Fixed-size ordered population, recreated wholesale on reset.
#[derive(Debug, Clone, Default)]
pub struct ParticleSystem {
    particles: Vec<Particle>,
}

impl ParticleSystem {
    /// Spawns exactly `count` particles uniformly over the viewport.
    pub fn spawn(count: usize, width: usize, height: usize, rng: &mut Xorshift64) -> Self {
        let (w, h) = (width as f64, height as f64);
        let particles = (0..count).map(|_| Particle::spawn(rng, w, h)).collect();
        Self { particles }
    }

    /// Number of particles; fixed until the next respawn.
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Particles in spawn order.
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Mutable access for the step loop. The population size cannot change
    /// through a slice.
    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }
}
