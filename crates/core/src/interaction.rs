//! Pointer interaction: none, attract-and-follow, or repel.
//!
//! Evaluated fresh for every particle every frame from the pointer snapshot;
//! no state survives between frames. Radius-gated effects fall off linearly
//! from full strength at the pointer to zero at the radius.

use crate::config::Configuration;
use crate::particle::Particle;
use crate::pointer::PointerState;
use crate::vector::Vector2;
use serde::{Deserialize, Serialize};

/// Distance floor used as a denominator when a particle sits on the pointer.
const DISTANCE_EPS: f64 = 1e-6;
/// Fraction of the current velocity kept when steering toward the pointer.
const STEER_RETAIN: f64 = 0.92;
/// Gain applied to pointer velocity for the global swirl in attract mode.
const SWIRL_GAIN: f64 = 0.002;

/// Which pointer behaviour is active.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionMode {
    #[default]
    None,
    Attract,
    Repel,
}

impl InteractionMode {
    /// Parses `"none"` / `"attract"` / `"repel"` (case insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "none" => Some(InteractionMode::None),
            "attract" => Some(InteractionMode::Attract),
            "repel" => Some(InteractionMode::Repel),
            _ => None,
        }
    }

    /// Lowercase name accepted by [`InteractionMode::from_name`].
    pub fn name(self) -> &'static str {
        match self {
            InteractionMode::None => "none",
            InteractionMode::Attract => "attract",
            InteractionMode::Repel => "repel",
        }
    }
}

/// Velocity blend toward a desired velocity: `v = v·(1 − weight) + desired·weight`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Steer {
    pub desired: Vector2,
    pub weight: f64,
}

impl Steer {
    /// Blended velocity; does not apply the speed cap.
    pub fn apply(&self, velocity: Vector2) -> Vector2 {
        velocity * (1.0 - self.weight) + self.desired * self.weight
    }
}

/// What the pointer adds to one particle this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contribution {
    pub acceleration: Vector2,
    pub steer: Option<Steer>,
    /// Speed cap for this particle this frame.
    pub speed_cap: f64,
}

impl Contribution {
    /// No acceleration, no steering, the plain `max_speed` cap.
    pub fn none(max_speed: f64) -> Self {
        Self {
            acceleration: Vector2::ZERO,
            steer: None,
            speed_cap: max_speed,
        }
    }
}

/// Stateless evaluator of the configured [`InteractionMode`].
#[derive(Debug, Clone, Copy, Default)]
pub struct InteractionModel;

impl InteractionModel {
    /// Pointer contribution for `particle` under the configured mode.
    ///
    /// Always finite, including for a particle sitting exactly on the pointer.
    pub fn contribution(
        &self,
        particle: &Particle,
        pointer: &PointerState,
        config: &Configuration,
    ) -> Contribution {
        match config.interaction_mode() {
            InteractionMode::None => Contribution::none(config.max_speed()),
            InteractionMode::Attract => attract(particle, pointer, config),
            InteractionMode::Repel => repel(particle, pointer, config),
        }
    }
}

fn press_factor(pointer: &PointerState, config: &Configuration) -> f64 {
    if pointer.pressed {
        config.press_multiplier()
    } else {
        1.0
    }
}

/// Offset from particle to pointer, its length, and the linear falloff within `radius`.
///
/// `None` when the pointer is disengaged or the particle is outside `radius`.
fn falloff(particle: &Particle, pointer: &PointerState, radius: f64) -> Option<(Vector2, f64, f64)> {
    if !pointer.is_engaged() {
        return None;
    }
    let offset = pointer.position - particle.position;
    let distance = offset.length();
    if distance >= radius {
        return None;
    }
    let influence = 1.0 - distance / radius;
    Some((offset, distance, influence))
}

/// Unit vector along `offset`, or zero when `offset` has no length.
fn direction(offset: Vector2, distance: f64) -> Vector2 {
    offset * (1.0 / distance.max(DISTANCE_EPS))
}

fn attract(particle: &Particle, pointer: &PointerState, config: &Configuration) -> Contribution {
    let max_speed = config.max_speed();
    let swirl = pointer.velocity * SWIRL_GAIN;

    let Some((offset, distance, influence)) = falloff(particle, pointer, config.follow_radius())
    else {
        return Contribution {
            acceleration: swirl,
            ..Contribution::none(max_speed)
        };
    };

    let toward = direction(offset, distance);
    let pull = config.attraction_strength() * influence * press_factor(pointer, config);
    let boosted = max_speed * (1.0 + influence * (config.speed_boost() - 1.0));

    Contribution {
        acceleration: swirl + toward * pull,
        steer: Some(Steer {
            desired: toward * boosted,
            weight: 1.0 - STEER_RETAIN,
        }),
        speed_cap: boosted,
    }
}

fn repel(particle: &Particle, pointer: &PointerState, config: &Configuration) -> Contribution {
    let max_speed = config.max_speed();
    let Some((offset, distance, influence)) =
        falloff(particle, pointer, config.influence_radius())
    else {
        return Contribution::none(max_speed);
    };

    let away = -direction(offset, distance);
    let push = config.repel_strength() * influence * press_factor(pointer, config);
    Contribution {
        acceleration: away * push,
        ..Contribution::none(max_speed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(mode: InteractionMode) -> Configuration {
        let mut c = Configuration::default();
        c.set_interaction_mode(mode);
        c
    }

    fn at(x: f64, y: f64) -> Particle {
        Particle::new(Vector2::new(x, y), Vector2::ZERO, 0.0)
    }

    fn hovering(x: f64, y: f64) -> PointerState {
        PointerState {
            position: Vector2::new(x, y),
            velocity: Vector2::ZERO,
            hovering: true,
            pressed: false,
        }
    }

    #[test]
    fn none_mode_contributes_nothing() {
        let c = config(InteractionMode::None);
        let out = InteractionModel.contribution(&at(10.0, 10.0), &hovering(10.0, 10.0), &c);
        assert_eq!(out, Contribution::none(c.max_speed()));
    }

    #[test]
    fn repel_pushes_away_with_linear_falloff() {
        let c = config(InteractionMode::Repel);
        let pointer = hovering(100.0, 100.0);
        // Halfway out along +x: influence 0.5.
        let p = at(100.0 + c.influence_radius() / 2.0, 100.0);
        let out = InteractionModel.contribution(&p, &pointer, &c);
        let expected = c.repel_strength() * 0.5;
        assert!((out.acceleration.x - expected).abs() < 1e-12, "{:?}", out);
        assert!(out.acceleration.y.abs() < 1e-12);
        assert!(out.steer.is_none());
        assert_eq!(out.speed_cap, c.max_speed());
    }

    #[test]
    fn repel_outside_radius_is_zero() {
        let c = config(InteractionMode::Repel);
        let p = at(100.0 + c.influence_radius() + 1.0, 100.0);
        let out = InteractionModel.contribution(&p, &hovering(100.0, 100.0), &c);
        assert_eq!(out.acceleration, Vector2::ZERO);
    }

    #[test]
    fn repel_at_zero_distance_is_finite() {
        let c = config(InteractionMode::Repel);
        let out = InteractionModel.contribution(&at(50.0, 50.0), &hovering(50.0, 50.0), &c);
        assert!(out.acceleration.is_finite(), "{:?}", out.acceleration);
        assert!(!out.acceleration.x.is_nan() && !out.acceleration.y.is_nan());
    }

    #[test]
    fn press_multiplies_repel() {
        let c = config(InteractionMode::Repel);
        let p = at(110.0, 100.0);
        let mut pointer = hovering(100.0, 100.0);
        let idle = InteractionModel.contribution(&p, &pointer, &c).acceleration;
        pointer.pressed = true;
        let held = InteractionModel.contribution(&p, &pointer, &c).acceleration;
        assert!((held.length() / idle.length() - c.press_multiplier()).abs() < 1e-9);
    }

    #[test]
    fn press_multiplies_attract() {
        let c = config(InteractionMode::Attract);
        let p = at(100.0, 160.0);
        let mut pointer = hovering(100.0, 100.0);
        pointer.velocity = Vector2::new(4.0, -3.0);
        let swirl = pointer.velocity * SWIRL_GAIN;

        let idle = InteractionModel.contribution(&p, &pointer, &c).acceleration - swirl;
        pointer.pressed = true;
        let held = InteractionModel.contribution(&p, &pointer, &c).acceleration - swirl;

        assert!(idle.length() > 0.0);
        assert!((held.length() / idle.length() - c.press_multiplier()).abs() < 1e-9);
        assert!(held.y < 0.0 && idle.y < 0.0, "pull should point at the pointer");
    }

    #[test]
    fn disengaged_pointer_has_no_radius_effect() {
        let c = config(InteractionMode::Repel);
        let mut pointer = hovering(10.0, 10.0);
        pointer.hovering = false;
        let out = InteractionModel.contribution(&at(12.0, 10.0), &pointer, &c);
        assert_eq!(out.acceleration, Vector2::ZERO);
    }

    #[test]
    fn attract_pulls_toward_pointer_and_raises_cap() {
        let c = config(InteractionMode::Attract);
        let p = at(100.0, 100.0 + c.follow_radius() / 4.0);
        let out = InteractionModel.contribution(&p, &hovering(100.0, 100.0), &c);
        assert!(out.acceleration.y < 0.0, "should pull up toward pointer");
        assert!(out.acceleration.x.abs() < 1e-12);

        let influence = 0.75;
        let expected_cap = c.max_speed() * (1.0 + influence * (c.speed_boost() - 1.0));
        assert!((out.speed_cap - expected_cap).abs() < 1e-12);

        let steer = out.steer.expect("inside radius should steer");
        assert!((steer.weight - 0.08).abs() < 1e-12);
        assert!((steer.desired.length() - expected_cap).abs() < 1e-9);
        assert!(steer.desired.y < 0.0);
    }

    #[test]
    fn attract_swirl_reaches_particles_outside_radius() {
        let c = config(InteractionMode::Attract);
        let mut pointer = hovering(0.0, 0.0);
        pointer.velocity = Vector2::new(10.0, 0.0);
        let far = at(c.follow_radius() * 3.0, 0.0);
        let out = InteractionModel.contribution(&far, &pointer, &c);
        assert!((out.acceleration.x - 10.0 * SWIRL_GAIN).abs() < 1e-12);
        assert!(out.steer.is_none());
        assert_eq!(out.speed_cap, c.max_speed());
    }

    #[test]
    fn attract_at_zero_distance_is_finite() {
        let c = config(InteractionMode::Attract);
        let out = InteractionModel.contribution(&at(5.0, 5.0), &hovering(5.0, 5.0), &c);
        assert!(out.acceleration.is_finite());
        let steer = out.steer.unwrap();
        assert!(steer.desired.is_finite());
        assert!((out.speed_cap - c.max_speed() * c.speed_boost()).abs() < 1e-12);
    }

    #[test]
    fn steer_blends_velocity() {
        let steer = Steer {
            desired: Vector2::new(10.0, 0.0),
            weight: 0.08,
        };
        let v = steer.apply(Vector2::new(0.0, 1.0));
        assert!((v.x - 0.8).abs() < 1e-12);
        assert!((v.y - 0.92).abs() < 1e-12);
    }

    #[test]
    fn mode_names_round_trip() {
        for mode in [
            InteractionMode::None,
            InteractionMode::Attract,
            InteractionMode::Repel,
        ] {
            assert_eq!(InteractionMode::from_name(mode.name()), Some(mode));
        }
        assert_eq!(InteractionMode::from_name("orbit"), None);
    }
}
