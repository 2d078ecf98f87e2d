//! # Ember - charcoal forge and smithing simulation
//!
//! Headless driver around `ember-core`: layered configuration and
//! scripted scenarios with JSON reports.

pub mod config;
pub mod scenario;

// Re-export core modules for convenience
pub use ember_core::entity;
pub use ember_core::simulation;
pub use ember_core::world;

/// Common imports for internal use
pub mod prelude {
    pub use ember_core::config::ForgeConfig;
    pub use ember_core::entity::ItemStack;
    pub use ember_core::simulation::{ForgeEvent, ForgeStep, NoopEvents};
    pub use ember_core::world::{Block, World};
    pub use glam::IVec3;
}
