//! Material thermal profiles
//!
//! Maps a tagged material identity (`"ingotIron"`, `"blockCopper"`,
//! `"nuggetGold"`) to the temperatures used by the forge:
//! - melting temperature: looked up in a fixed table by normalized name
//! - working temperature: piecewise function of the melting temperature
//!
//! Unknown or untagged materials never fail; they get the defaults.

use serde::{Deserialize, Serialize};

/// Melting temperature used when a material is not in the table
pub const DEFAULT_MELTING_TEMPERATURE: f32 = 1400.0;

/// Working temperature paired with [`DEFAULT_MELTING_TEMPERATURE`]
pub const DEFAULT_WORKING_TEMPERATURE: f32 = 1000.0;

/// Tag prefixes stripped before the table lookup
pub const MATERIAL_PREFIXES: [&str; 3] = ["ingot", "block", "nugget"];

/// Melting temperatures keyed by normalized material name
pub const MELTING_TEMPERATURES: &[(&str, f32)] = &[
    ("tin", 300.0),
    ("lead", 330.0),
    ("zinc", 420.0),
    ("aluminium", 660.0),
    ("aluminum", 660.0),
    ("aluminiumbrass", 900.0),
    ("aluminumbrass", 900.0),
    ("brass", 930.0),
    ("bronze", 950.0),
    ("silver", 960.0),
    ("copper", 1000.0),
    ("gold", 1060.0),
    ("electrum", 1060.0),
    ("constantan", 1220.0),
    ("invar", 1430.0),
    ("nickel", 1450.0),
    ("cobalt", 1490.0),
    ("iron", 1500.0),
    ("steel", 1540.0),
    ("platinum", 1770.0),
    ("ardite", 1800.0),
    ("manyullyn", 2000.0),
    ("osmium", 3030.0),
    ("tungsten", 3400.0),
    ("diamond", 4700.0),
];

/// Strip the tag prefix and lowercase: `"ingotIron"` -> `"iron"`
///
/// Tags without a known prefix are only lowercased. Returns `None` for an
/// empty identity or one that is nothing but a prefix.
pub fn normalize_material(tag: &str) -> Option<String> {
    let lower = tag.trim().to_ascii_lowercase();
    let name = MATERIAL_PREFIXES
        .iter()
        .find_map(|prefix| lower.strip_prefix(prefix))
        .unwrap_or(&lower);

    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}

/// Melting temperature for a tagged material identity
pub fn resolve_melting_temperature(tag: &str) -> f32 {
    let Some(name) = normalize_material(tag) else {
        return DEFAULT_MELTING_TEMPERATURE;
    };

    match MELTING_TEMPERATURES.iter().find(|(key, _)| *key == name) {
        Some((_, melt)) => *melt,
        None => {
            log::debug!("No thermal entry for '{}', using defaults", tag);
            DEFAULT_MELTING_TEMPERATURE
        }
    }
}

/// Working temperature derived from a melting temperature
pub fn resolve_working_temperature(melting_temperature: f32) -> f32 {
    if melting_temperature == DEFAULT_MELTING_TEMPERATURE {
        DEFAULT_WORKING_TEMPERATURE
    } else if melting_temperature >= 1500.0 {
        1400.0
    } else if melting_temperature >= 1000.0 {
        melting_temperature - 400.0
    } else if melting_temperature >= 500.0 {
        melting_temperature - 250.0
    } else if melting_temperature >= 200.0 {
        100.0
    } else {
        0.0
    }
}

/// Immutable thermal constants of one forgeable object
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ThermalProfile {
    pub melting_temperature: f32,
    pub working_temperature: f32,
}

impl ThermalProfile {
    /// Resolve the profile for a tagged material identity
    pub fn for_material(tag: &str) -> Self {
        let melting_temperature = resolve_melting_temperature(tag);
        Self {
            melting_temperature,
            working_temperature: resolve_working_temperature(melting_temperature),
        }
    }
}

impl Default for ThermalProfile {
    fn default() -> Self {
        Self {
            melting_temperature: DEFAULT_MELTING_TEMPERATURE,
            working_temperature: DEFAULT_WORKING_TEMPERATURE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_material() {
        assert_eq!(normalize_material("ingotIron").as_deref(), Some("iron"));
        assert_eq!(normalize_material("blockCopper").as_deref(), Some("copper"));
        assert_eq!(normalize_material("nuggetGold").as_deref(), Some("gold"));
        assert_eq!(normalize_material("Steel").as_deref(), Some("steel"));
        assert_eq!(normalize_material("ingot"), None);
        assert_eq!(normalize_material(""), None);
    }

    #[test]
    fn test_melting_table_sample() {
        assert_eq!(resolve_melting_temperature("ingotiron"), 1500.0);
        assert_eq!(resolve_melting_temperature("ingotcopper"), 1000.0);
        assert_eq!(resolve_melting_temperature("ingotIron"), 1500.0);
        assert_eq!(resolve_melting_temperature("ingotunobtainium"), 1400.0);
        assert_eq!(resolve_melting_temperature(""), 1400.0);
    }

    #[test]
    fn test_melting_table_span() {
        let min = MELTING_TEMPERATURES
            .iter()
            .map(|(_, t)| *t)
            .fold(f32::MAX, f32::min);
        let max = MELTING_TEMPERATURES
            .iter()
            .map(|(_, t)| *t)
            .fold(f32::MIN, f32::max);
        assert_eq!(min, 300.0);
        assert_eq!(max, 4700.0);
        assert!(MELTING_TEMPERATURES.len() >= 14);
    }

    #[test]
    fn test_working_temperature_table() {
        assert_eq!(resolve_working_temperature(1500.0), 1400.0);
        assert_eq!(resolve_working_temperature(1000.0), 600.0);
        assert_eq!(resolve_working_temperature(600.0), 350.0);
        assert_eq!(resolve_working_temperature(250.0), 100.0);
        assert_eq!(resolve_working_temperature(100.0), 0.0);
        assert_eq!(
            resolve_working_temperature(DEFAULT_MELTING_TEMPERATURE),
            DEFAULT_WORKING_TEMPERATURE
        );
        assert_eq!(resolve_working_temperature(4700.0), 1400.0);
    }

    #[test]
    fn test_profile_for_material() {
        let iron = ThermalProfile::for_material("ingotIron");
        assert_eq!(iron.melting_temperature, 1500.0);
        assert_eq!(iron.working_temperature, 1400.0);

        let tin = ThermalProfile::for_material("ingotTin");
        assert_eq!(tin.melting_temperature, 300.0);
        assert_eq!(tin.working_temperature, 100.0);

        assert_eq!(
            ThermalProfile::for_material("ingotMystery"),
            ThermalProfile::default()
        );
    }
}
