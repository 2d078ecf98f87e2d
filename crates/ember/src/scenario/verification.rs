//! Verification conditions and state checks for scenarios

use ember_core::simulation::ForgeEvent;
use ember_core::world::{Block, World};
use glam::IVec3;
use serde::{Deserialize, Serialize};

/// Conditions that can be verified against world state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum VerificationCondition {
    // === BLOCK CHECKS ===
    /// Assert the exact block at a position
    BlockAt { pos: IVec3, expected: Block },

    // === FORGE CHECKS ===
    /// Assert forge temperature within an inclusive range
    ForgeTemperature { pos: IVec3, min: f32, max: f32 },

    /// Assert remaining fuel ticks
    ForgeFuel { pos: IVec3, expected: u32 },

    /// Assert enclosure classification
    ForgeEnclosed { pos: IVec3, expected: bool },

    /// Assert the number of forge entities in the world
    ForgeCount { expected: usize },

    // === ITEM CHECKS ===
    /// Assert the identity in a forge slot (`None` for empty)
    SlotItem {
        pos: IVec3,
        slot: usize,
        expected: Option<String>,
    },

    /// Assert the live temperature of the item in a forge slot
    ItemTemperature {
        pos: IVec3,
        slot: usize,
        min: f32,
        max: f32,
    },

    /// Assert how many items melted during the run
    MeltedCount { expected: usize },
}

/// Result of one verification
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationResult {
    pub passed: bool,
    pub message: String,
    pub actual_value: Option<String>,
}

impl VerificationResult {
    fn check(passed: bool, message: String, actual: impl ToString) -> Self {
        Self {
            passed,
            message,
            actual_value: Some(actual.to_string()),
        }
    }

    fn missing(message: String) -> Self {
        Self {
            passed: false,
            message,
            actual_value: None,
        }
    }
}

impl VerificationCondition {
    /// Evaluate against the world and the events recorded during the run
    pub fn evaluate(&self, world: &World, events: &[ForgeEvent]) -> VerificationResult {
        match self {
            VerificationCondition::BlockAt { pos, expected } => {
                let actual = world.block(*pos);
                VerificationResult::check(
                    actual == *expected,
                    format!("Block at {} is {:?}", pos, expected),
                    format!("{:?}", actual),
                )
            }

            VerificationCondition::ForgeTemperature { pos, min, max } => {
                let message = format!("Forge at {} temperature in {}..={}", pos, min, max);
                match world.forge(*pos) {
                    Some(forge) => {
                        let temp = forge.temperature();
                        VerificationResult::check(temp >= *min && temp <= *max, message, temp)
                    }
                    None => VerificationResult::missing(message),
                }
            }

            VerificationCondition::ForgeFuel { pos, expected } => {
                let message = format!("Forge at {} has {} fuel ticks", pos, expected);
                match world.forge(*pos) {
                    Some(forge) => {
                        let fuel = forge.fuel_ticks_remaining();
                        VerificationResult::check(fuel == *expected, message, fuel)
                    }
                    None => VerificationResult::missing(message),
                }
            }

            VerificationCondition::ForgeEnclosed { pos, expected } => {
                let message = format!("Forge at {} enclosed == {}", pos, expected);
                match world.forge(*pos) {
                    Some(forge) => {
                        let enclosed = forge.is_enclosed();
                        VerificationResult::check(enclosed == *expected, message, enclosed)
                    }
                    None => VerificationResult::missing(message),
                }
            }

            VerificationCondition::ForgeCount { expected } => {
                let count = world.forge_count();
                VerificationResult::check(
                    count == *expected,
                    format!("{} forges in world", expected),
                    count,
                )
            }

            VerificationCondition::SlotItem {
                pos,
                slot,
                expected,
            } => {
                let message = format!("Forge at {} slot {} holds {:?}", pos, slot, expected);
                let Some(entry) = world
                    .forge(*pos)
                    .and_then(|forge| forge.inventory().get_slot(*slot))
                else {
                    return VerificationResult::missing(message);
                };
                let actual = entry.as_ref().map(|stack| stack.item.clone());
                VerificationResult::check(actual == *expected, message, format!("{:?}", actual))
            }

            VerificationCondition::ItemTemperature {
                pos,
                slot,
                min,
                max,
            } => {
                let message = format!(
                    "Item in forge at {} slot {} temperature in {}..={}",
                    pos, slot, min, max
                );
                let temp = world
                    .forge(*pos)
                    .and_then(|forge| forge.inventory().get_slot(*slot))
                    .and_then(Option::as_ref)
                    .and_then(|stack| stack.forge())
                    .map(|item| item.temperature(world.now(), world.config()));
                match temp {
                    Some(temp) => {
                        VerificationResult::check(temp >= *min && temp <= *max, message, temp)
                    }
                    None => VerificationResult::missing(message),
                }
            }

            VerificationCondition::MeltedCount { expected } => {
                let melted = events
                    .iter()
                    .filter(|e| matches!(e, ForgeEvent::ItemMelted { .. }))
                    .count();
                VerificationResult::check(
                    melted == *expected,
                    format!("{} items melted", expected),
                    melted,
                )
            }
        }
    }
}
