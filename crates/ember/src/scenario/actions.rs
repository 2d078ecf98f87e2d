//! Scenario actions

use ember_core::world::Block;
use glam::IVec3;
use serde::{Deserialize, Serialize};

/// One step of a scenario, applied to the world in order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ScenarioAction {
    /// Write a single block
    PlaceBlock { pos: IVec3, block: Block },

    /// Fill an inclusive box with one block
    FillBox { min: IVec3, max: IVec3, block: Block },

    /// Surround `pos` on its four horizontal sides
    Enclose { pos: IVec3, block: Block },

    /// Place a charcoal pile
    PlacePile { pos: IVec3, layers: u8 },

    /// Stack extra fuel layers onto a pile or forge
    AddFuel { pos: IVec3, layers: u8 },

    /// Ignite a pile and everything connected to it
    Light { pos: IVec3 },

    /// Put a fresh stack into a forge slot, optionally preheated
    InsertItem {
        pos: IVec3,
        slot: usize,
        item: String,
        #[serde(default = "default_count")]
        count: u32,
        #[serde(default)]
        temperature: Option<f32>,
    },

    /// Remove a stack from a forge slot
    TakeItem { pos: IVec3, slot: usize },

    /// Apply one forge step to the stack in a forge slot
    Work {
        pos: IVec3,
        slot: usize,
        recipe: String,
        step: String,
    },

    /// Advance the simulation
    WaitTicks { ticks: u64 },

    /// Write the world to a save file
    Save { path: String },

    /// Add a message to the execution log
    Log { message: String },
}

fn default_count() -> u32 {
    1
}
