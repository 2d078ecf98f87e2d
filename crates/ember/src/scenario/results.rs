//! Execution results and reporting

use anyhow::{Context, Result};
use ember_core::simulation::{ForgeEvent, ForgeState};
use ember_core::world::World;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::path::Path;

use super::verification::VerificationResult;

/// Snapshot of one item in a forge slot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemReport {
    pub slot: usize,
    pub item: String,
    pub count: u32,
    pub temperature: Option<f32>,
    pub work: Option<i32>,
    pub recipe: Option<String>,
}

/// Snapshot of one forge at the end of a run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForgeReport {
    pub pos: [i32; 3],
    pub state: String,
    pub fuel_ticks: u32,
    pub temperature: f32,
    pub enclosed: bool,
    pub layers: u8,
    pub items: Vec<ItemReport>,
}

impl ForgeReport {
    /// Report of every forge, in position order
    pub fn collect(world: &World) -> Vec<ForgeReport> {
        let now = world.now();
        world
            .forge_positions()
            .into_iter()
            .filter_map(|pos| {
                let forge = world.forge(pos)?;
                let state = match forge.state() {
                    ForgeState::Unlit => "unlit",
                    ForgeState::Burning => "burning",
                    ForgeState::Cooling => "cooling",
                };
                let items = forge
                    .inventory()
                    .slots
                    .iter()
                    .enumerate()
                    .filter_map(|(slot, entry)| {
                        let stack = entry.as_ref()?;
                        let forge_item = stack.forge();
                        Some(ItemReport {
                            slot,
                            item: stack.item.clone(),
                            count: stack.count,
                            temperature: forge_item
                                .map(|f| f.temperature(now, world.config())),
                            work: forge_item.map(|f| f.work()),
                            recipe: forge_item.and_then(|f| f.recipe().map(str::to_string)),
                        })
                    })
                    .collect();

                Some(ForgeReport {
                    pos: pos.to_array(),
                    state: state.to_string(),
                    fuel_ticks: forge.fuel_ticks_remaining(),
                    temperature: forge.temperature(),
                    enclosed: forge.is_enclosed(),
                    layers: world.block(pos).layers().unwrap_or(0),
                    items,
                })
            })
            .collect()
    }
}

/// Counts of forge events seen during a run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventCounts {
    pub lit: usize,
    pub fuel_consumed: usize,
    pub fuel_exhausted: usize,
    pub enclosure_changed: usize,
    pub items_melted: usize,
    pub extinguished: usize,
    pub collapsed: usize,
}

impl EventCounts {
    pub fn tally(events: &[ForgeEvent]) -> Self {
        let mut counts = Self::default();
        for event in events {
            match event {
                ForgeEvent::Lit { .. } => counts.lit += 1,
                ForgeEvent::FuelConsumed { .. } => counts.fuel_consumed += 1,
                ForgeEvent::FuelExhausted { .. } => counts.fuel_exhausted += 1,
                ForgeEvent::EnclosureChanged { .. } => counts.enclosure_changed += 1,
                ForgeEvent::ItemMelted { .. } => counts.items_melted += 1,
                ForgeEvent::Extinguished { .. } => counts.extinguished += 1,
                ForgeEvent::Collapsed { .. } => counts.collapsed += 1,
            }
        }
        counts
    }
}

/// Report from scenario execution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionReport {
    /// Scenario name
    pub scenario_name: String,

    /// Timestamp (ISO 8601)
    pub timestamp: String,

    /// Overall pass/fail status
    pub passed: bool,

    /// Simulation tick at the end of the run
    pub final_tick: u64,

    /// Number of actions executed
    pub actions_executed: usize,

    /// Wall-clock duration (milliseconds)
    pub duration_ms: f64,

    /// Verification failures (empty if all passed)
    pub verification_failures: Vec<VerificationResult>,

    pub events: EventCounts,

    /// Final forge state
    pub forges: Vec<ForgeReport>,

    /// Execution log messages
    pub log: Vec<String>,
}

impl ExecutionReport {
    /// Create new execution report
    pub fn new(scenario_name: String) -> Self {
        Self {
            scenario_name,
            timestamp: chrono::Utc::now().to_rfc3339(),
            passed: false,
            final_tick: 0,
            actions_executed: 0,
            duration_ms: 0.0,
            verification_failures: Vec::new(),
            events: EventCounts::default(),
            forges: Vec::new(),
            log: Vec::new(),
        }
    }

    /// Human-readable summary, one line per forge and item
    pub fn summary(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "{}: {} at tick {} ({} actions, {:.1}ms)",
            self.scenario_name,
            if self.passed { "PASSED" } else { "FAILED" },
            self.final_tick,
            self.actions_executed,
            self.duration_ms
        );
        for forge in &self.forges {
            let [x, y, z] = forge.pos;
            let _ = writeln!(
                out,
                "  forge ({}, {}, {}) {}: fuel {} ticks, {:.0} degrees, {} layers{}",
                x,
                y,
                z,
                forge.state,
                forge.fuel_ticks,
                forge.temperature,
                forge.layers,
                if forge.enclosed { ", enclosed" } else { "" }
            );
            for item in &forge.items {
                let _ = writeln!(
                    out,
                    "    slot {}: {} x{} at {:.1} degrees",
                    item.slot,
                    item.item,
                    item.count,
                    item.temperature.unwrap_or(0.0)
                );
            }
        }
        for failure in &self.verification_failures {
            let _ = writeln!(
                out,
                "  failed: {} (actual {})",
                failure.message,
                failure.actual_value.as_deref().unwrap_or("missing")
            );
        }
        out
    }

    /// Save report to JSON file
    pub fn save_json(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .context("Failed to serialize execution report to JSON")?;

        // Ensure parent directory exists
        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        std::fs::write(path.as_ref(), json).with_context(|| {
            format!(
                "Failed to write execution report: {}",
                path.as_ref().display()
            )
        })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ember_core::config::ForgeConfig;
    use ember_core::entity::ItemStack;
    use ember_core::simulation::NoopEvents;
    use glam::IVec3;

    #[test]
    fn test_forge_report_collects_items() {
        let mut world = World::new(ForgeConfig::default());
        world.place_pile(IVec3::ZERO, 2);
        world.light(IVec3::ZERO, &mut NoopEvents);
        world
            .insert_item(IVec3::ZERO, 1, ItemStack::new("ingotTin", 3))
            .unwrap();
        world.tick_n(10, &mut NoopEvents);

        let forges = ForgeReport::collect(&world);
        assert_eq!(forges.len(), 1);
        assert_eq!(forges[0].state, "burning");
        assert_eq!(forges[0].layers, 1);
        assert_eq!(forges[0].fuel_ticks, 1590);
        assert_eq!(forges[0].items.len(), 1);
        assert_eq!(forges[0].items[0].slot, 1);
        assert!(forges[0].items[0].temperature.unwrap() > 0.0);
    }

    #[test]
    fn test_event_counts() {
        let events = vec![
            ForgeEvent::Lit { pos: IVec3::ZERO },
            ForgeEvent::FuelConsumed {
                pos: IVec3::ZERO,
                layers_left: 0,
            },
            ForgeEvent::FuelExhausted { pos: IVec3::ZERO },
        ];
        let counts = EventCounts::tally(&events);
        assert_eq!(counts.lit, 1);
        assert_eq!(counts.fuel_consumed, 1);
        assert_eq!(counts.items_melted, 0);
    }

    #[test]
    fn test_execution_report_json() {
        let mut report = ExecutionReport::new("Test Scenario".to_string());
        report.passed = true;
        report.final_tick = 120;
        report.log.push("Test log message".to_string());

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("report.json");
        report.save_json(&path).unwrap();

        let json = std::fs::read_to_string(&path).unwrap();
        assert!(json.contains("Test Scenario"));
        assert!(json.contains("\"final_tick\": 120"));
        assert!(report.summary().contains("PASSED"));
    }
}
