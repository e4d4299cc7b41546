//! Error types for the flowfield core.
//!
//! Per-frame numeric degeneracies (zero-length vectors, a particle sitting on
//! the pointer, out-of-grid lookups) never surface here. Only setup and
//! resize paths can fail.

use thiserror::Error;

/// Errors produced by simulation setup and reconfiguration.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The rendering surface handed to `Simulation::new` had no area.
    #[error("rendering surface unavailable: got {width}x{height}, width and height must be non-zero")]
    SurfaceUnavailable { width: usize, height: usize },

    /// Width or height was zero on resize or grid allocation.
    #[error("invalid dimensions: width and height must be non-zero")]
    InvalidDimensions,

    /// A JSON value had the wrong shape for the named parameter.
    #[error("parameter type mismatch for '{name}': expected {expected}, got {got}")]
    ParamTypeMismatch {
        name: String,
        expected: String,
        got: String,
    },
}
