//! Typed configuration snapshot with per-tunable setters.
//!
//! Every numeric tunable has a documented range. Setters clamp into that
//! range instead of rejecting the value, and ignore NaN (the previous value
//! is kept), so a misbehaving configuration source can never stall the
//! animation. Which changes force a reset is decided by
//! [`Simulation::apply_config`](crate::simulation::Simulation::apply_config).

use crate::error::EngineError;
use crate::interaction::InteractionMode;
use crate::noise::NoiseMode;
use crate::params::{json_type_name, param_count, param_f64, param_str};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

/// Documented range and default of one numeric tunable.
#[derive(Debug, Clone, Copy)]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
    pub default: f64,
    pub description: &'static str,
}

impl Bounds {
    const fn new(min: f64, max: f64, default: f64, description: &'static str) -> Self {
        Self {
            min,
            max,
            default,
            description,
        }
    }

    /// Clamps `value` into range; NaN keeps `current`.
    pub fn clamp(&self, value: f64, current: f64) -> f64 {
        if value.is_nan() {
            current
        } else {
            value.clamp(self.min, self.max)
        }
    }
}

pub const PARTICLE_COUNT: Bounds = Bounds::new(1.0, 10_000.0, 2000.0, "Number of particles; changing it respawns the population");
pub const PARTICLE_SIZE: Bounds = Bounds::new(0.1, 3.0, 0.9, "Per-particle draw-size scale");
pub const FIELD_SIZE: Bounds = Bounds::new(10.0, 150.0, 70.0, "Flow grid cell edge in pixels; changing it rebuilds the grid");
pub const FIELD_FORCE: Bounds = Bounds::new(0.05, 1.0, 0.15, "Magnitude scale of the field vectors");
pub const NOISE_SPEED: Bounds = Bounds::new(0.001, 0.005, 0.003, "Per-frame advance of the noise time coordinate");
pub const TRAIL_LENGTH: Bounds = Bounds::new(0.05, 0.6, 0.15, "Background fade opacity per frame");
pub const HUE_BASE: Bounds = Bounds::new(0.0, 360.0, 10.0, "Base hue in degrees");
pub const HUE_RANGE: Bounds = Bounds::new(0.0, 40.0, 5.0, "Hue shift per unit of velocity");
pub const MAX_SPEED: Bounds = Bounds::new(1.0, 4.0, 2.5, "Particle speed cap in pixels per frame");
pub const FOLLOW_RADIUS: Bounds = Bounds::new(20.0, 600.0, 180.0, "Attract mode: radius around the pointer that particles follow");
pub const ATTRACTION_STRENGTH: Bounds = Bounds::new(0.0, 2.0, 0.35, "Attract mode: acceleration toward the pointer at zero distance");
pub const SPEED_BOOST: Bounds = Bounds::new(1.0, 4.0, 2.2, "Attract mode: speed cap multiplier right at the pointer");
pub const INFLUENCE_RADIUS: Bounds = Bounds::new(20.0, 600.0, 150.0, "Repel mode: radius around the pointer that pushes particles away");
pub const REPEL_STRENGTH: Bounds = Bounds::new(0.0, 3.0, 0.6, "Repel mode: acceleration away from the pointer at zero distance");
pub const PRESS_MULTIPLIER: Bounds = Bounds::new(1.0, 4.0, 1.8, "Interaction boost while the pointer button is held");

/// Snapshot of every tunable the simulation reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Value")]
pub struct Configuration {
    particle_count: usize,
    particle_size: f64,
    field_size: f64,
    field_force: f64,
    noise_speed: f64,
    noise_mode: NoiseMode,
    trail_length: f64,
    hue_base: f64,
    hue_range: f64,
    max_speed: f64,
    interaction_mode: InteractionMode,
    follow_radius: f64,
    attraction_strength: f64,
    speed_boost: f64,
    influence_radius: f64,
    repel_strength: f64,
    press_multiplier: f64,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            particle_count: PARTICLE_COUNT.default as usize,
            particle_size: PARTICLE_SIZE.default,
            field_size: FIELD_SIZE.default,
            field_force: FIELD_FORCE.default,
            noise_speed: NOISE_SPEED.default,
            noise_mode: NoiseMode::default(),
            trail_length: TRAIL_LENGTH.default,
            hue_base: HUE_BASE.default,
            hue_range: HUE_RANGE.default,
            max_speed: MAX_SPEED.default,
            interaction_mode: InteractionMode::default(),
            follow_radius: FOLLOW_RADIUS.default,
            attraction_strength: ATTRACTION_STRENGTH.default,
            speed_boost: SPEED_BOOST.default,
            influence_radius: INFLUENCE_RADIUS.default,
            repel_strength: REPEL_STRENGTH.default,
            press_multiplier: PRESS_MULTIPLIER.default,
        }
    }
}

impl From<Value> for Configuration {
    fn from(params: Value) -> Self {
        Self::from_json(&params)
    }
}

impl Configuration {
    /// Builds a configuration from a JSON object, defaulting missing keys.
    pub fn from_json(params: &Value) -> Self {
        let mut config = Self::default();
        config.merge_json(params);
        config
    }

    /// Like [`from_json`](Self::from_json), but rejects anything that is not a
    /// JSON object.
    pub fn try_from_json(params: &Value) -> Result<Self, EngineError> {
        if !params.is_object() {
            return Err(EngineError::ParamTypeMismatch {
                name: "params".into(),
                expected: "object".into(),
                got: json_type_name(params).into(),
            });
        }
        Ok(Self::from_json(params))
    }

    /// Overwrites the keys present in `params`, clamped; other keys keep their value.
    ///
    /// Unknown enum names (`noise_mode`, `interaction_mode`) are ignored.
    pub fn merge_json(&mut self, params: &Value) {
        self.set_particle_count(param_count(params, "particle_count", self.particle_count));
        self.set_particle_size(param_f64(params, "particle_size", self.particle_size));
        self.set_field_size(param_f64(params, "field_size", self.field_size));
        self.set_field_force(param_f64(params, "field_force", self.field_force));
        self.set_noise_speed(param_f64(params, "noise_speed", self.noise_speed));
        self.set_trail_length(param_f64(params, "trail_length", self.trail_length));
        self.set_hue_base(param_f64(params, "hue_base", self.hue_base));
        self.set_hue_range(param_f64(params, "hue_range", self.hue_range));
        self.set_max_speed(param_f64(params, "max_speed", self.max_speed));
        self.set_follow_radius(param_f64(params, "follow_radius", self.follow_radius));
        self.set_attraction_strength(param_f64(
            params,
            "attraction_strength",
            self.attraction_strength,
        ));
        self.set_speed_boost(param_f64(params, "speed_boost", self.speed_boost));
        self.set_influence_radius(param_f64(params, "influence_radius", self.influence_radius));
        self.set_repel_strength(param_f64(params, "repel_strength", self.repel_strength));
        self.set_press_multiplier(param_f64(params, "press_multiplier", self.press_multiplier));

        if let Some(mode) = param_str(params, "noise_mode").and_then(NoiseMode::from_name) {
            self.noise_mode = mode;
        }
        if let Some(mode) =
            param_str(params, "interaction_mode").and_then(InteractionMode::from_name)
        {
            self.interaction_mode = mode;
        }
    }

    /// Current values as a JSON object with snake_case keys.
    pub fn to_json(&self) -> Value {
        json!({
            "particle_count": self.particle_count,
            "particle_size": self.particle_size,
            "field_size": self.field_size,
            "field_force": self.field_force,
            "noise_speed": self.noise_speed,
            "noise_mode": self.noise_mode.name(),
            "trail_length": self.trail_length,
            "hue_base": self.hue_base,
            "hue_range": self.hue_range,
            "max_speed": self.max_speed,
            "interaction_mode": self.interaction_mode.name(),
            "follow_radius": self.follow_radius,
            "attraction_strength": self.attraction_strength,
            "speed_boost": self.speed_boost,
            "influence_radius": self.influence_radius,
            "repel_strength": self.repel_strength,
            "press_multiplier": self.press_multiplier,
        })
    }

    /// Schema of every tunable: type, default, range and description.
    pub fn param_schema() -> Value {
        let numeric: [(&str, &Bounds); 15] = [
            ("particle_size", &PARTICLE_SIZE),
            ("field_size", &FIELD_SIZE),
            ("field_force", &FIELD_FORCE),
            ("noise_speed", &NOISE_SPEED),
            ("trail_length", &TRAIL_LENGTH),
            ("hue_base", &HUE_BASE),
            ("hue_range", &HUE_RANGE),
            ("max_speed", &MAX_SPEED),
            ("follow_radius", &FOLLOW_RADIUS),
            ("attraction_strength", &ATTRACTION_STRENGTH),
            ("speed_boost", &SPEED_BOOST),
            ("influence_radius", &INFLUENCE_RADIUS),
            ("repel_strength", &REPEL_STRENGTH),
            ("press_multiplier", &PRESS_MULTIPLIER),
            ("particle_count", &PARTICLE_COUNT),
        ];

        let mut schema = Map::new();
        for (name, bounds) in numeric {
            let kind = if name == "particle_count" {
                "integer"
            } else {
                "number"
            };
            schema.insert(
                name.to_owned(),
                json!({
                    "type": kind,
                    "default": bounds.default,
                    "min": bounds.min,
                    "max": bounds.max,
                    "description": bounds.description,
                }),
            );
        }
        schema.insert(
            "noise_mode".to_owned(),
            json!({
                "type": "string",
                "default": NoiseMode::default().name(),
                "options": ["perlin", "simplex"],
                "description": "Gradient noise function sampled by the flow grid",
            }),
        );
        schema.insert(
            "interaction_mode".to_owned(),
            json!({
                "type": "string",
                "default": InteractionMode::default().name(),
                "options": ["none", "attract", "repel"],
                "description": "How particles react to the pointer",
            }),
        );
        Value::Object(schema)
    }

    /// Current value, always inside [`PARTICLE_COUNT`]'s range.
    pub fn particle_count(&self) -> usize {
        self.particle_count
    }

    /// Population size, clamped to 1..=10000.
    pub fn set_particle_count(&mut self, count: usize) {
        self.particle_count = count.clamp(PARTICLE_COUNT.min as usize, PARTICLE_COUNT.max as usize);
    }

    /// Current value, always inside [`PARTICLE_SIZE`]'s range.
    pub fn particle_size(&self) -> f64 {
        self.particle_size
    }

    /// Draw-size scale, clamped to 0.1..=3.
    pub fn set_particle_size(&mut self, size: f64) {
        self.particle_size = PARTICLE_SIZE.clamp(size, self.particle_size);
    }

    /// Current value, always inside [`FIELD_SIZE`]'s range.
    pub fn field_size(&self) -> f64 {
        self.field_size
    }

    /// Grid cell edge in pixels, clamped to 10..=150.
    pub fn set_field_size(&mut self, size: f64) {
        self.field_size = FIELD_SIZE.clamp(size, self.field_size);
    }

    /// Current value, always inside [`FIELD_FORCE`]'s range.
    pub fn field_force(&self) -> f64 {
        self.field_force
    }

    /// Field magnitude scale, clamped to 0.05..=1.
    pub fn set_field_force(&mut self, force: f64) {
        self.field_force = FIELD_FORCE.clamp(force, self.field_force);
    }

    /// Current value, always inside [`NOISE_SPEED`]'s range.
    pub fn noise_speed(&self) -> f64 {
        self.noise_speed
    }

    /// Noise time advance per frame, clamped to 0.001..=0.005.
    pub fn set_noise_speed(&mut self, speed: f64) {
        self.noise_speed = NOISE_SPEED.clamp(speed, self.noise_speed);
    }

    /// Selected mode.
    pub fn noise_mode(&self) -> NoiseMode {
        self.noise_mode
    }

    pub fn set_noise_mode(&mut self, mode: NoiseMode) {
        self.noise_mode = mode;
    }

    /// Current value, always inside [`TRAIL_LENGTH`]'s range.
    pub fn trail_length(&self) -> f64 {
        self.trail_length
    }

    /// Fade opacity handed to the renderer, clamped to 0.05..=0.6.
    pub fn set_trail_length(&mut self, trail: f64) {
        self.trail_length = TRAIL_LENGTH.clamp(trail, self.trail_length);
    }

    /// Current value, always inside [`HUE_BASE`]'s range.
    pub fn hue_base(&self) -> f64 {
        self.hue_base
    }

    /// Base hue in degrees, clamped to 0..=360.
    pub fn set_hue_base(&mut self, hue: f64) {
        self.hue_base = HUE_BASE.clamp(hue, self.hue_base);
    }

    /// Current value, always inside [`HUE_RANGE`]'s range.
    pub fn hue_range(&self) -> f64 {
        self.hue_range
    }

    /// Hue velocity gain, clamped to 0..=40.
    pub fn set_hue_range(&mut self, range: f64) {
        self.hue_range = HUE_RANGE.clamp(range, self.hue_range);
    }

    /// Current value, always inside [`MAX_SPEED`]'s range.
    pub fn max_speed(&self) -> f64 {
        self.max_speed
    }

    /// Speed cap, clamped to 1..=4.
    pub fn set_max_speed(&mut self, speed: f64) {
        self.max_speed = MAX_SPEED.clamp(speed, self.max_speed);
    }

    /// Selected mode.
    pub fn interaction_mode(&self) -> InteractionMode {
        self.interaction_mode
    }

    pub fn set_interaction_mode(&mut self, mode: InteractionMode) {
        self.interaction_mode = mode;
    }

    /// Current value, always inside [`FOLLOW_RADIUS`]'s range.
    pub fn follow_radius(&self) -> f64 {
        self.follow_radius
    }

    /// Attract radius, clamped to 20..=600.
    pub fn set_follow_radius(&mut self, radius: f64) {
        self.follow_radius = FOLLOW_RADIUS.clamp(radius, self.follow_radius);
    }

    /// Current value, always inside [`ATTRACTION_STRENGTH`]'s range.
    pub fn attraction_strength(&self) -> f64 {
        self.attraction_strength
    }

    /// Attract acceleration, clamped to 0..=2.
    pub fn set_attraction_strength(&mut self, strength: f64) {
        self.attraction_strength = ATTRACTION_STRENGTH.clamp(strength, self.attraction_strength);
    }

    /// Current value, always inside [`SPEED_BOOST`]'s range.
    pub fn speed_boost(&self) -> f64 {
        self.speed_boost
    }

    /// Attract speed ramp multiplier, clamped to 1..=4.
    pub fn set_speed_boost(&mut self, boost: f64) {
        self.speed_boost = SPEED_BOOST.clamp(boost, self.speed_boost);
    }

    /// Current value, always inside [`INFLUENCE_RADIUS`]'s range.
    pub fn influence_radius(&self) -> f64 {
        self.influence_radius
    }

    /// Repel radius, clamped to 20..=600.
    pub fn set_influence_radius(&mut self, radius: f64) {
        self.influence_radius = INFLUENCE_RADIUS.clamp(radius, self.influence_radius);
    }

    /// Current value, always inside [`REPEL_STRENGTH`]'s range.
    pub fn repel_strength(&self) -> f64 {
        self.repel_strength
    }

    /// Repel acceleration, clamped to 0..=3.
    pub fn set_repel_strength(&mut self, strength: f64) {
        self.repel_strength = REPEL_STRENGTH.clamp(strength, self.repel_strength);
    }

    /// Current value, always inside [`PRESS_MULTIPLIER`]'s range.
    pub fn press_multiplier(&self) -> f64 {
        self.press_multiplier
    }

    /// Boost while pressed, clamped to 1..=4.
    pub fn set_press_multiplier(&mut self, multiplier: f64) {
        self.press_multiplier = PRESS_MULTIPLIER.clamp(multiplier, self.press_multiplier);
    }
}
