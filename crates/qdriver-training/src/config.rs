//! Driver configuration.
//!
//! Every section falls back to its defaults field by field, so a JSON file only needs to
//! name the values it changes:
//!
//! ```
//! use qdriver_training::config::DriverConfig;
//!
//! let config: DriverConfig =
//!     serde_json::from_str(r#"{ "exploration": { "decay": 0.95 } }"#).unwrap();
//! assert_eq!(config.exploration.decay, 0.95);
//! assert_eq!(config.exploration.base_temperature, 1.0);
//! assert_eq!(config.learning.blend_rate, 0.1);
//! config.validate().unwrap();
//! ```

use qdriver_engine::GearShifter;
use qdriver_evaluator::action_selector::DEFAULT_MIN_TEMPERATURE;
use serde::{Deserialize, Serialize};

use crate::episode::TemperatureSchedule;

/// Error returned by [`DriverConfig::validate`].
#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum ConfigError {
    #[display("{name} must be in {range}, got {value}")]
    OutOfRange {
        name: &'static str,
        range: &'static str,
        value: f64,
    },
    #[display("gear {gear} shifts up at or below its downshift RPM")]
    InvertedGearThresholds { gear: i32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplorationConfig {
    /// Temperature before the first completed game.
    pub base_temperature: f64,
    /// Per-game temperature multiplier.
    pub decay: f64,
    /// Exploration stops once the temperature is at or below this value.
    pub explore_floor: f64,
    /// Boltzmann sampling is skipped below this temperature.
    pub min_temperature: f64,
}

impl Default for ExplorationConfig {
    fn default() -> Self {
        Self {
            base_temperature: 1.0,
            decay: 0.99,
            explore_floor: 0.002,
            min_temperature: DEFAULT_MIN_TEMPERATURE,
        }
    }
}

impl ExplorationConfig {
    #[must_use]
    pub const fn schedule(&self) -> TemperatureSchedule {
        TemperatureSchedule::new(self.base_temperature, self.decay, self.explore_floor)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LearningConfig {
    /// Weight `α` of the bootstrap in the TD target.
    pub blend_rate: f64,
    /// Gradient step size of the value network.
    pub network_learning_rate: f64,
    pub momentum: f64,
    /// Seed for weight initialization. Drawn from the driver's RNG when absent.
    pub seed: Option<u64>,
}

impl Default for LearningConfig {
    fn default() -> Self {
        Self {
            blend_rate: 0.1,
            network_learning_rate: 0.2,
            momentum: 0.9,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlConfig {
    /// Full throttle below this speed, none at or above it.
    pub max_speed: f64,
}

impl Default for ControlConfig {
    fn default() -> Self {
        Self { max_speed: 60.0 }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriverConfig {
    pub exploration: ExplorationConfig,
    pub learning: LearningConfig,
    pub control: ControlConfig,
    pub gears: GearShifter,
}

impl DriverConfig {
    /// Checks that every value is usable by the driver.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let Self {
            exploration,
            learning,
            control,
            gears,
        } = self;

        check(
            "exploration.base_temperature",
            "(0, inf)",
            exploration.base_temperature,
            |v| v > 0.0,
        )?;
        check("exploration.decay", "(0, 1)", exploration.decay, |v| {
            v > 0.0 && v < 1.0
        })?;
        check(
            "exploration.explore_floor",
            "[0, inf)",
            exploration.explore_floor,
            |v| v >= 0.0,
        )?;
        check(
            "exploration.min_temperature",
            "(0, inf)",
            exploration.min_temperature,
            |v| v > 0.0,
        )?;
        check("learning.blend_rate", "(0, 1]", learning.blend_rate, |v| {
            v > 0.0 && v <= 1.0
        })?;
        check(
            "learning.network_learning_rate",
            "(0, inf)",
            learning.network_learning_rate,
            |v| v > 0.0,
        )?;
        check("learning.momentum", "[0, 1)", learning.momentum, |v| {
            (0.0..1.0).contains(&v)
        })?;
        check("control.max_speed", "(0, inf)", control.max_speed, |v| {
            v > 0.0
        })?;
        if let Some(gear) = gears.first_inverted_gear() {
            return Err(ConfigError::InvertedGearThresholds { gear });
        }
        Ok(())
    }
}

fn check(
    name: &'static str,
    range: &'static str,
    value: f64,
    valid: impl FnOnce(f64) -> bool,
) -> Result<(), ConfigError> {
    if value.is_finite() && valid(value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange { name, range, value })
    }
}
