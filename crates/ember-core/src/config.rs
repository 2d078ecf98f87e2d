//! Forge simulation constants
//!
//! A `ForgeConfig` is handed by reference to every simulation entry point.
//! Nothing in the core reads configuration from global state.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Hard ceiling for any temperature in the simulation
pub const MAX_TEMPERATURE: f32 = 1500.0;

/// Fuel ticks granted by one charcoal layer
pub const FUEL_TICKS_MAX: u32 = 1600;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{field} must be a finite, non-negative number (got {value})")]
    InvalidRate { field: &'static str, value: f32 },
    #[error("{field} must be greater than zero")]
    Zero { field: &'static str },
    #[error("open_forge_ceiling_ratio must be within 0..=1 (got {0})")]
    CeilingRatio(f32),
    #[error("failed to parse forge config: {0}")]
    Parse(String),
}

/// Tunable constants of the forge simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForgeConfig {
    /// Degrees an item loses per tick while nothing heats it
    pub temperature_decay_per_tick: f32,
    /// Multiplier applied to every heat delta pushed into an item
    pub heating_modifier: f32,
    /// Degrees a charcoal forge gains (burning) or loses (out of fuel) per tick
    pub forge_temperature_step: f32,
    /// Heat delta a burning forge pushes into each colder item per tick
    pub item_heat_increment: f32,
    pub max_temperature: f32,
    /// Fraction of `max_temperature` an open (not enclosed) forge can reach
    pub open_forge_ceiling_ratio: f32,
    pub fuel_ticks_per_layer: u32,
    /// Item slots in each forge
    pub forge_slots: usize,
    /// Highest layer count of a charcoal pile or forge
    pub max_pile_layers: u8,
    /// Items below this temperature count as cold for the idle reset
    pub cooled_threshold: f32,
}

impl Default for ForgeConfig {
    fn default() -> Self {
        Self {
            temperature_decay_per_tick: 0.5,
            heating_modifier: 1.0,
            forge_temperature_step: 1.0,
            item_heat_increment: 2.0,
            max_temperature: MAX_TEMPERATURE,
            open_forge_ceiling_ratio: 0.6,
            fuel_ticks_per_layer: FUEL_TICKS_MAX,
            forge_slots: 5,
            max_pile_layers: 8,
            cooled_threshold: 1.0,
        }
    }
}

impl ForgeConfig {
    /// Temperature ceiling of a forge given its enclosure
    pub fn forge_ceiling(&self, enclosed: bool) -> f32 {
        if enclosed {
            self.max_temperature
        } else {
            self.max_temperature * self.open_forge_ceiling_ratio
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("temperature_decay_per_tick", self.temperature_decay_per_tick),
            ("heating_modifier", self.heating_modifier),
            ("forge_temperature_step", self.forge_temperature_step),
            ("item_heat_increment", self.item_heat_increment),
            ("max_temperature", self.max_temperature),
            ("cooled_threshold", self.cooled_threshold),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidRate { field, value });
            }
        }

        if !(0.0..=1.0).contains(&self.open_forge_ceiling_ratio) {
            return Err(ConfigError::CeilingRatio(self.open_forge_ceiling_ratio));
        }
        if self.fuel_ticks_per_layer == 0 {
            return Err(ConfigError::Zero {
                field: "fuel_ticks_per_layer",
            });
        }
        if self.forge_slots == 0 {
            return Err(ConfigError::Zero {
                field: "forge_slots",
            });
        }
        if self.max_pile_layers == 0 {
            return Err(ConfigError::Zero {
                field: "max_pile_layers",
            });
        }

        Ok(())
    }

    /// Parse and validate a RON document; missing fields take defaults
    pub fn from_ron_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = ron::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_ron_string(&self) -> Result<String, ConfigError> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| ConfigError::Parse(e.to_string()))
    }
}
