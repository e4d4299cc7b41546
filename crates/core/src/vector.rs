//! 2D vector used for positions, velocities and field forces.
//!
//! Arithmetic, length, distance and clamping come from [`glam::DVec2`]. The
//! polar helpers below build the flow-field cell vectors: a cell is set to a
//! length first and then rotated to an angle.

pub use glam::DVec2 as Vector2;

/// Polar construction and in-place polar edits.
///
/// Both setters go through `to_angle` (`atan2`), so a zero vector has a
/// well-defined direction along +x and neither operation ever divides.
pub trait Polar: Sized {
    /// Builds a vector from an angle in radians and a length.
    fn from_polar(angle: f64, length: f64) -> Self;

    /// Replaces the length, keeping the current direction.
    fn set_length(&mut self, length: f64) -> &mut Self;

    /// Replaces the direction, keeping the current length.
    fn set_angle(&mut self, angle: f64) -> &mut Self;
}

impl Polar for Vector2 {
    fn from_polar(angle: f64, length: f64) -> Self {
        Vector2::from_angle(angle) * length
    }

    fn set_length(&mut self, length: f64) -> &mut Self {
        *self = Self::from_polar(self.to_angle(), length);
        self
    }

    fn set_angle(&mut self, angle: f64) -> &mut Self {
        *self = Self::from_polar(angle, self.length());
        self
    }
}
