//! What a frame hands to the renderer.
//!
//! The simulation never touches pixels. It emits one [`DrawCommand`] per
//! particle plus the background fade opacity, and a [`Renderer`]
//! implementation decides how those become output.

use crate::config::Configuration;
use crate::particle::Particle;
use serde::{Deserialize, Serialize};

/// Minimum square edge so a resting particle stays visible.
const BASE_SIZE: f64 = 0.3;

/// One filled square to draw.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DrawCommand {
    pub x: f64,
    pub y: f64,
    /// Edge length in pixels.
    pub size: f64,
    /// Hue in degrees; not wrapped into `[0, 360)`.
    pub hue: f64,
}

impl DrawCommand {
    /// Derives size and hue from the particle's velocity component sum.
    pub fn for_particle(particle: &Particle, config: &Configuration) -> Self {
        let drift = particle.velocity.element_sum();
        Self {
            x: particle.position.x,
            y: particle.position.y,
            size: drift.abs() * config.particle_size() + BASE_SIZE,
            hue: config.hue_base() + particle.color_offset + drift * config.hue_range(),
        }
    }
}

/// Output of one simulation step.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    /// Opacity of the background fade painted before the particles.
    pub fade: f64,
    pub commands: Vec<DrawCommand>,
}

impl Frame {
    /// Replays the frame into `renderer`: one fade, then every command in order.
    pub fn render<R: Renderer + ?Sized>(&self, renderer: &mut R) {
        renderer.fade(self.fade);
        for command in &self.commands {
            renderer.draw(command);
        }
    }
}

/// Sink for frames. Implemented by whatever owns the real surface.
pub trait Renderer {
    /// Paints the background with the given opacity, leaving trails behind.
    fn fade(&mut self, opacity: f64);

    fn draw(&mut self, command: &DrawCommand);
}
