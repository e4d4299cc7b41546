//! Noise-time clock nudged by horizontal pointer motion.

use crate::pointer::PointerState;

/// Noise time gained per pixel of horizontal pointer motion.
const POINTER_TIME_GAIN: f64 = 0.0002;
/// Per-frame decay of the stored pointer velocity.
const POINTER_DECAY: f64 = 0.86;

/// Monotonic noise-time coordinate.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SimulationClock {
    time: f64,
    frames: u64,
}

impl SimulationClock {
    /// Clock at time zero with no frames run.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current noise-time coordinate.
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Number of `advance` calls so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Advances by `noise_speed` plus the pointer's horizontal motion, then
    /// decays the pointer velocity in place.
    ///
    /// Leftward motion can slow the clock but never run it backwards.
    /// Returns the new time.
    pub fn advance(&mut self, noise_speed: f64, pointer: &mut PointerState) -> f64 {
        let step = noise_speed + pointer.velocity.x * POINTER_TIME_GAIN;
        self.time += step.max(0.0);
        self.frames += 1;
        pointer.velocity *= POINTER_DECAY;
        self.time
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vector::Vector2;

    #[test]
    fn idle_pointer_advances_by_noise_speed() {
        let mut clock = SimulationClock::new();
        let mut pointer = PointerState::default();
        for _ in 0..10 {
            clock.advance(0.003, &mut pointer);
        }
        assert!((clock.time() - 0.03).abs() < 1e-12);
        assert_eq!(clock.frames(), 10);
    }

    #[test]
    fn rightward_motion_speeds_up_time() {
        let mut clock = SimulationClock::new();
        let mut pointer = PointerState {
            velocity: Vector2::new(20.0, 0.0),
            ..PointerState::default()
        };
        let t = clock.advance(0.003, &mut pointer);
        assert!((t - (0.003 + 20.0 * POINTER_TIME_GAIN)).abs() < 1e-12);
    }

    #[test]
    fn pointer_velocity_decays_each_frame() {
        let mut clock = SimulationClock::new();
        let mut pointer = PointerState {
            velocity: Vector2::new(10.0, -10.0),
            ..PointerState::default()
        };
        clock.advance(0.003, &mut pointer);
        assert!((pointer.velocity.x - 8.6).abs() < 1e-12);
        assert!((pointer.velocity.y + 8.6).abs() < 1e-12);
        for _ in 0..100 {
            clock.advance(0.003, &mut pointer);
        }
        assert!(pointer.velocity.length() < 1e-5);
    }

    #[test]
    fn time_never_goes_backwards() {
        let mut clock = SimulationClock::new();
        let mut pointer = PointerState {
            velocity: Vector2::new(-500.0, 0.0),
            ..PointerState::default()
        };
        let mut last = clock.time();
        for _ in 0..50 {
            let now = clock.advance(0.001, &mut pointer);
            assert!(now >= last, "{now} < {last}");
            last = now;
        }
        assert!(last > 0.0);
    }
}
