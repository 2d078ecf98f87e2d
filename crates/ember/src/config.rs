//! Driver configuration with layered loading
//!
//! Configuration is loaded from multiple sources (lowest to highest priority):
//! 1. Compiled defaults
//! 2. `ember.ron` file (if exists), or the file given on the command line
//! 3. Environment variables prefixed with `EMBER_`
//!
//! Example environment variable: `EMBER_FORGE__FUEL_TICKS_PER_LAYER=400`

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use ember_core::config::{FUEL_TICKS_MAX, ForgeConfig, MAX_TEMPERATURE};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main driver configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub forge: ForgeConfig,

    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

/// Logger settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default `env_logger` filter when `RUST_LOG` is unset
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
        }
    }
}

/// Report output settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory for JSON reports; empty disables them
    pub report_dir: String,
    /// Log every executed action
    pub verbose: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            report_dir: "reports".to_string(),
            verbose: false,
        }
    }
}

impl AppConfig {
    /// Load configuration with layered priority:
    /// 1. Compiled defaults (lowest priority)
    /// 2. `ember.ron`, or `file` when given
    /// 3. Environment variables prefixed with `EMBER_` (highest priority)
    pub fn load(file: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder()
            // Layer 1: Compiled defaults
            .set_default("forge.temperature_decay_per_tick", 0.5)?
            .set_default("forge.heating_modifier", 1.0)?
            .set_default("forge.forge_temperature_step", 1.0)?
            .set_default("forge.item_heat_increment", 2.0)?
            .set_default("forge.max_temperature", f64::from(MAX_TEMPERATURE))?
            .set_default("forge.open_forge_ceiling_ratio", 0.6)?
            .set_default("forge.fuel_ticks_per_layer", i64::from(FUEL_TICKS_MAX))?
            .set_default("forge.forge_slots", 5_i64)?
            .set_default("forge.max_pile_layers", 8_i64)?
            .set_default("forge.cooled_threshold", 1.0)?
            .set_default("logging.filter", "info")?
            .set_default("output.report_dir", "reports")?
            .set_default("output.verbose", false)?;

        // Layer 2: Config file
        builder = match file {
            Some(path) => builder.add_source(
                File::from(path)
                    .format(config::FileFormat::Ron)
                    .required(true),
            ),
            None => builder.add_source(
                File::with_name("ember")
                    .format(config::FileFormat::Ron)
                    .required(false),
            ),
        };

        // Layer 3: Environment variables (EMBER_FORGE__FORGE_SLOTS, etc.)
        builder = builder.add_source(
            Environment::with_prefix("EMBER")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build().context("Failed to build configuration")?;

        let app: AppConfig = config
            .try_deserialize()
            .context("Failed to deserialize configuration")?;
        app.forge
            .validate()
            .context("Invalid forge configuration")?;
        Ok(app)
    }
}
