//! Forging data for Ember
//!
//! This crate provides the world-independent data types of the forge:
//! - Material thermal profiles (ThermalProfile, resolve_melting_temperature)
//! - Forge steps and the bounded step ledger (ForgeStep, ForgeSteps)
//! - Anvil recipes and forge rules (AnvilRecipe, ForgeRule, RecipeBook)

mod materials;
mod recipes;
mod steps;

pub use materials::{
    DEFAULT_MELTING_TEMPERATURE, DEFAULT_WORKING_TEMPERATURE, MATERIAL_PREFIXES,
    MELTING_TEMPERATURES, ThermalProfile, normalize_material, resolve_melting_temperature,
    resolve_working_temperature,
};
pub use recipes::{
    AnvilRecipe, ForgeRule, MAX_WORK, RecipeBook, RuleOrder, StepClass, work_in_range,
};
pub use steps::{ForgeStep, ForgeSteps, LEDGER_CAPACITY};
