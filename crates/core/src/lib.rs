#![deny(unsafe_code)]
//! Core of the flowfield particle simulation.
//!
//! A coarse grid of force vectors is resampled from 3D gradient noise every
//! frame, and thousands of particles drift through it, optionally pulled
//! toward or pushed from a pointer. Provides the `Simulation` controller,
//! `NoiseField` (Perlin/simplex), `FlowFieldGrid`, `ParticleSystem`, the
//! pointer `InteractionModel`, the clamped `Configuration`, and the
//! `Renderer` seam that receives each frame's draw commands.

pub mod clock;
pub mod config;
pub mod error;
pub mod grid;
pub mod interaction;
pub mod noise;
pub mod params;
pub mod particle;
pub mod pointer;
pub mod prng;
pub mod render;
pub mod simulation;
pub mod vector;

pub use clock::SimulationClock;
pub use config::{Bounds, Configuration};
pub use error::EngineError;
pub use grid::FlowFieldGrid;
pub use interaction::{Contribution, InteractionMode, InteractionModel, Steer};
pub use noise::{NoiseField, NoiseMode};
pub use particle::{Particle, ParticleSystem};
pub use pointer::{PointerSource, PointerState};
pub use prng::Xorshift64;
pub use render::{DrawCommand, Frame, Renderer};
pub use simulation::{Simulation, SimulationState};
pub use vector::{Polar, Vector2};
