// config.rs - Simulation parameters
//
// Plain value owned by the simulation. The host edits it through sliders
// (one setter per slider) or hands over a whole JSON object. Any change is
// applied by regenerating the affected collection, never by patching entities.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;

// Reference canvas
pub const CANVAS_WIDTH: f64 = 800.0;
pub const CANVAS_HEIGHT: f64 = 600.0;

// Slider domains
pub const MAX_PARTICLES: u32 = 1000;
pub const MAX_ROCKETS: u32 = 100;
pub const MAX_SPEED: f64 = 10.0;
pub const MAX_SIZE: f64 = 10.0;

const DEFAULT_SEED: u64 = 0x5EED_D21F;

/// Closed interval sampled uniformly.
///
/// The bounds are not required to be ordered. Sliders update `min` and `max`
/// one at a time, so a transient `min > max` must still sample inside
/// `[min(min, max), max(min, max)]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Span {
    pub min: f64,
    pub max: f64,
}

impl Span {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Bounds as `(low, high)` with `low <= high`
    #[inline]
    pub fn ordered(self) -> (f64, f64) {
        if self.min <= self.max { (self.min, self.max) } else { (self.max, self.min) }
    }

    fn sanitized(self, fallback: Span, limit: f64) -> Self {
        Self {
            min: clamp_finite(self.min, fallback.min, limit),
            max: clamp_finite(self.max, fallback.max, limit),
        }
    }
}

/// Everything that shapes the generated populations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SimConfig {
    pub particle_count: u32,
    pub speed: Span,
    pub size: Span,
    pub rocket_count: u32,
    pub rocket_speed: f64,
    /// Fixed RNG seed. `None` lets the host pick one (wall clock in the browser).
    pub seed: Option<u64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            particle_count: 100,
            speed: Span::new(0.0, 2.0),
            size: Span::new(1.0, 3.0),
            rocket_count: 5,
            rocket_speed: 3.0,
            seed: None,
        }
    }
}

impl SimConfig {
    /// Parse a (possibly partial) JSON object; missing keys take defaults.
    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)?;
        Ok(config.sanitized())
    }

    /// Merge a JSON object over this config, nested objects key by key.
    ///
    /// `{"speed": {"max": 4}}` only moves the upper speed bound.
    pub fn patched(&self, patch: &str) -> Result<Self> {
        let mut value = serde_json::to_value(self)?;
        merge(&mut value, serde_json::from_str(patch)?);
        let config: Self = serde_json::from_value(value)?;
        Ok(config.sanitized())
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Clamp every field into its slider domain.
    ///
    /// Non-finite numbers fall back to the default. Span bounds are clamped
    /// individually and left in whatever order they arrived.
    pub fn sanitized(self) -> Self {
        let defaults = Self::default();
        Self {
            particle_count: self.particle_count.min(MAX_PARTICLES),
            speed: self.speed.sanitized(defaults.speed, MAX_SPEED),
            size: self.size.sanitized(defaults.size, MAX_SIZE),
            rocket_count: self.rocket_count.min(MAX_ROCKETS),
            rocket_speed: clamp_finite(self.rocket_speed, defaults.rocket_speed, MAX_SPEED),
            seed: self.seed,
        }
    }

    pub fn seed_or_default(&self) -> u64 {
        self.seed.unwrap_or(DEFAULT_SEED)
    }

    /// Particle population depends on these fields only
    pub fn particles_differ(&self, other: &Self) -> bool {
        self.particle_count != other.particle_count
            || self.speed != other.speed
            || self.size != other.size
    }

    /// Rocket population depends on these fields only
    pub fn rockets_differ(&self, other: &Self) -> bool {
        self.rocket_count != other.rocket_count || self.rocket_speed != other.rocket_speed
    }
}

fn merge(base: &mut Value, patch: Value) {
    match (base, patch) {
        (Value::Object(base), Value::Object(patch)) => {
            for (key, v) in patch {
                merge(base.entry(key).or_insert(Value::Null), v);
            }
        }
        (base, patch) => *base = patch,
    }
}

#[inline]
fn clamp_finite(v: f64, fallback: f64, limit: f64) -> f64 {
    if v.is_finite() { v.clamp(0.0, limit) } else { fallback }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn span_orders_swapped_bounds() {
        assert_eq!(Span::new(4.0, 1.0).ordered(), (1.0, 4.0));
        assert_eq!(Span::new(1.0, 4.0).ordered(), (1.0, 4.0));
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = SimConfig::from_json(r#"{ "particleCount": 12, "rocketSpeed": 7.5 }"#).unwrap();
        assert_eq!(config.particle_count, 12);
        assert_eq!(config.rocket_speed, 7.5);
        assert_eq!(config.speed, SimConfig::default().speed);
        assert_eq!(config.rocket_count, SimConfig::default().rocket_count);
    }

    #[test]
    fn json_is_clamped_to_slider_domains() {
        let text = r#"{
            "particleCount": 50000,
            "speed": { "min": -3.0, "max": 99.0 },
            "rocketCount": 1000
        }"#;
        let config = SimConfig::from_json(text).unwrap();
        assert_eq!(config.particle_count, MAX_PARTICLES);
        assert_eq!(config.rocket_count, MAX_ROCKETS);
        assert_eq!(config.speed, Span::new(0.0, MAX_SPEED));
    }

    #[test]
    fn non_finite_values_fall_back() {
        let config = SimConfig {
            rocket_speed: f64::NAN,
            size: Span::new(f64::INFINITY, 2.0),
            ..SimConfig::default()
        }
        .sanitized();
        assert_eq!(config.rocket_speed, SimConfig::default().rocket_speed);
        assert_eq!(config.size, Span::new(SimConfig::default().size.min, 2.0));
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(SimConfig::from_json("{ particleCount: ").is_err());
    }

    #[test]
    fn change_detection_is_per_collection() {
        let base = SimConfig::default();

        let faster = SimConfig { speed: Span::new(0.0, 5.0), ..base };
        assert!(faster.particles_differ(&base));
        assert!(!faster.rockets_differ(&base));

        let more_rockets = SimConfig { rocket_count: 9, ..base };
        assert!(more_rockets.rockets_differ(&base));
        assert!(!more_rockets.particles_differ(&base));

        assert!(!base.particles_differ(&base));
        assert!(!base.rockets_differ(&base));
    }

    #[test]
    fn patch_touches_only_named_fields() {
        let base = SimConfig { seed: Some(3), ..SimConfig::default() };
        let patched = base.patched(r#"{ "speed": { "max": 4.0 }, "rocketCount": 8 }"#).unwrap();

        assert_eq!(patched.speed, Span::new(base.speed.min, 4.0));
        assert_eq!(patched.rocket_count, 8);
        assert_eq!(patched.size, base.size);
        assert_eq!(patched.seed, Some(3));
    }

    #[test]
    fn patch_must_be_well_typed() {
        let base = SimConfig::default();
        assert!(base.patched(r#"{ "particleCount": "lots" }"#).is_err());
        assert!(base.patched("5").is_err());
    }

    #[test]
    fn json_round_trips_camel_case() {
        let json = SimConfig::default().to_json().unwrap();
        assert!(json.contains("\"particleCount\":100"));
        assert!(json.contains("\"rocketSpeed\":3.0"));
    }
}
