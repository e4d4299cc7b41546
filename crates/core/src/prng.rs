//! Seedable xorshift PRNG for particle spawning and noise reseeding.
//!
//! Pure integer state transitions, so a simulation constructed with the same
//! seed spawns the same particles and reseeds the noise the same way on every
//! platform.

use serde::{Deserialize, Serialize};

/// Xorshift64 generator with shifts (13, 7, 17).
///
/// A zero seed would be a fixed point of the algorithm, so it is swapped for a
/// fixed non-zero fallback.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Xorshift64 {
    state: u64,
}

impl Xorshift64 {
    /// Stand-in for a zero seed, which would lock the state at zero forever.
    const FALLBACK_SEED: u64 = 0x5EED_F10E_F1E1_D000;

    /// Creates a generator from `seed`.
    ///
    /// Equal seeds give equal sequences. A seed of 0 is replaced with
    /// `FALLBACK_SEED`.
    pub fn new(seed: u64) -> Self {
        Self {
            state: if seed == 0 { Self::FALLBACK_SEED } else { seed },
        }
    }

    /// Advances the state and returns it.
    ///
    /// Never returns 0 for a non-zero state.
    pub fn next_u64(&mut self) -> u64 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 7;
        self.state ^= self.state << 17;
        self.state
    }

    /// Uniform in `[0, 1)` from the top 53 bits.
    pub fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Uniform in `[min, max)`.
    pub fn next_range(&mut self, min: f64, max: f64) -> f64 {
        min + self.next_f64() * (max - min)
    }

    /// Uniform in `[-half_width, half_width)`, used for velocity jitter.
    pub fn next_signed(&mut self, half_width: f64) -> f64 {
        self.next_range(-half_width, half_width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_value_for_seed_42_is_stable() {
        // Changing this breaks every seeded run recorded so far.
        let mut rng = Xorshift64::new(42);
        assert_eq!(rng.next_u64(), 45_454_805_674);
    }

    #[test]
    fn zero_seed_is_replaced() {
        let mut rng = Xorshift64::new(0);
        assert_ne!(rng.next_u64(), 0);
        assert_ne!(rng.next_u64(), 0);
    }

    #[test]
    fn same_seed_same_sequence() {
        let mut a = Xorshift64::new(2024);
        let mut b = Xorshift64::new(2024);
        for i in 0..500 {
            assert_eq!(a.next_u64(), b.next_u64(), "diverged at {i}");
        }
    }

    #[test]
    fn next_signed_is_symmetric_around_zero() {
        let mut rng = Xorshift64::new(8);
        let mut saw_negative = false;
        let mut saw_positive = false;
        for _ in 0..1000 {
            let v = rng.next_signed(0.5);
            assert!((-0.5..0.5).contains(&v), "jitter {v} out of range");
            saw_negative |= v < 0.0;
            saw_positive |= v > 0.0;
        }
        assert!(saw_negative && saw_positive);
    }

    #[test]
    fn state_survives_serialization() {
        let mut rng = Xorshift64::new(7);
        for _ in 0..10 {
            rng.next_u64();
        }
        let json = serde_json::to_string(&rng).unwrap();
        let mut restored: Xorshift64 = serde_json::from_str(&json).unwrap();
        assert_eq!(rng.next_u64(), restored.next_u64());
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn next_f64_in_unit_interval(seed: u64) {
                let mut rng = Xorshift64::new(seed);
                for _ in 0..100 {
                    let v = rng.next_f64();
                    prop_assert!((0.0..1.0).contains(&v), "next_f64() = {v}");
                }
            }

            #[test]
            fn next_range_in_bounds(
                seed: u64,
                min in -1e4_f64..1e4,
                span in 1e-3_f64..1e4,
            ) {
                let mut rng = Xorshift64::new(seed);
                let max = min + span;
                for _ in 0..100 {
                    let v = rng.next_range(min, max);
                    prop_assert!(v >= min && v < max, "next_range({min}, {max}) = {v}");
                }
            }
        }
    }
}
