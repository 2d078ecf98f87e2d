//! Simulation systems - item temperature, forge items, heat sources, ignition

pub mod anvil;
pub mod events;
pub mod forge_item;
pub mod heat_source;
pub mod ignition;
pub mod temperature;

// Re-export from ember-simulation so callers only need the core crate
pub use ember_simulation::{
    AnvilRecipe, DEFAULT_MELTING_TEMPERATURE, DEFAULT_WORKING_TEMPERATURE, ForgeRule, ForgeStep,
    ForgeSteps, LEDGER_CAPACITY, MAX_WORK, RecipeBook, RuleOrder, StepClass, ThermalProfile,
    normalize_material, resolve_melting_temperature, resolve_working_temperature, work_in_range,
};

pub use anvil::{WorkOutcome, work_item};
pub use events::{ForgeEvent, ForgeEventSink, NoopEvents};
pub use forge_item::ForgeItem;
pub use heat_source::{
    CharcoalForge, FIELD_COUNT, FIELD_FUEL, FIELD_TEMPERATURE, ForgeMap, ForgeState,
};
pub use ignition::IgnitionPropagation;
pub use temperature::LazyTemperature;
