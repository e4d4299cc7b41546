//! Pointer snapshot and the seam through which pointer input arrives.

use crate::vector::Vector2;
use serde::{Deserialize, Serialize};

/// Cursor state as last reported by the input source.
///
/// `velocity` is the frame-to-frame position delta. The simulation keeps its
/// own copy and decays the velocity every frame, so a stale snapshot fades
/// out instead of pushing forever.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PointerState {
    pub position: Vector2,
    pub velocity: Vector2,
    pub hovering: bool,
    pub pressed: bool,
}

impl PointerState {
    /// Resting pointer at the centre of a `width × height` viewport.
    pub fn centered(width: usize, height: usize) -> Self {
        Self {
            position: Vector2::new(width as f64 / 2.0, height as f64 / 2.0),
            ..Self::default()
        }
    }

    /// The snapshot after the cursor moved to `(x, y)` while hovering.
    ///
    /// Velocity is the delta from the previous position.
    pub fn moved_to(&self, x: f64, y: f64) -> Self {
        let position = Vector2::new(x, y);
        Self {
            position,
            velocity: position - self.position,
            hovering: true,
            pressed: self.pressed,
        }
    }

    /// True when radius-gated interaction should act on particles.
    pub fn is_engaged(&self) -> bool {
        self.hovering || self.pressed
    }
}

/// Anything that can hand the simulation a pointer snapshot between frames.
pub trait PointerSource {
    /// Latest snapshot, or `None` if nothing has been reported yet.
    fn snapshot(&self) -> Option<PointerState>;
}

impl PointerSource for PointerState {
    fn snapshot(&self) -> Option<PointerState> {
        Some(*self)
    }
}

impl PointerSource for Option<PointerState> {
    fn snapshot(&self) -> Option<PointerState> {
        *self
    }
}
