//! Scenario execution engine

use anyhow::{Context, Result, anyhow, bail};
use ember_core::entity::ItemStack;
use ember_core::simulation::{ForgeEvent, ForgeStep};
use ember_core::world::{NeighborQueries, World, save_world};
use std::path::Path;
use std::time::Instant;

use super::actions::ScenarioAction;
use super::definition::ScenarioDefinition;
use super::results::{EventCounts, ExecutionReport, ForgeReport};

/// Configuration for scenario executor
#[derive(Debug, Clone, Default)]
pub struct ScenarioExecutorConfig {
    /// Verbose logging
    pub verbose: bool,

    /// Extra ticks to run after the last action
    pub extra_ticks: u64,
}

/// Executes scenario actions against a world
pub struct ScenarioExecutor {
    config: ScenarioExecutorConfig,

    /// Forge events recorded during the run
    events: Vec<ForgeEvent>,

    /// Action execution log
    log: Vec<String>,
}

impl ScenarioExecutor {
    /// Create new executor with default config
    pub fn new() -> Self {
        Self::with_config(ScenarioExecutorConfig::default())
    }

    /// Create new executor with custom config
    pub fn with_config(config: ScenarioExecutorConfig) -> Self {
        Self {
            config,
            events: Vec::new(),
            log: Vec::new(),
        }
    }

    pub fn events(&self) -> &[ForgeEvent] {
        &self.events
    }

    /// Execute a complete scenario
    pub fn execute_scenario(
        &mut self,
        scenario: &ScenarioDefinition,
        world: &mut World,
    ) -> Result<ExecutionReport> {
        let start_time = Instant::now();
        let mut report = ExecutionReport::new(scenario.name.clone());

        self.log.clear();
        self.events.clear();

        self.log(&format!("Starting scenario: {}", scenario.name));
        if !scenario.description.is_empty() {
            self.log(&format!("Description: {}", scenario.description));
        }

        let phases = [("Setup", &scenario.setup), ("Action", &scenario.actions)];
        for (phase, actions) in phases {
            for (idx, action) in actions.iter().enumerate() {
                if let Err(e) = self.execute_action(action, world) {
                    let msg = format!("{} {} failed: {}", phase, idx, e);
                    self.log(&msg);
                    report.log = self.log.clone();
                    return Err(anyhow!(msg));
                }
            }
        }
        report.actions_executed = scenario.setup.len() + scenario.actions.len();

        if self.config.extra_ticks > 0 {
            self.log(&format!("  Running {} extra ticks", self.config.extra_ticks));
            world.tick_n(self.config.extra_ticks, &mut self.events);
        }

        // Run verifications
        if !scenario.verify.is_empty() {
            self.log(&format!("Running {} verifications", scenario.verify.len()));
            for condition in &scenario.verify {
                let result = condition.evaluate(world, &self.events);
                self.log(&format!(
                    "  {} {}",
                    if result.passed { "✓" } else { "✗" },
                    result.message
                ));

                if !result.passed {
                    report.verification_failures.push(result);
                }
            }
        }

        report.passed = report.verification_failures.is_empty();
        report.final_tick = world.now();
        report.events = EventCounts::tally(&self.events);
        report.forges = ForgeReport::collect(world);
        report.duration_ms = start_time.elapsed().as_secs_f64() * 1000.0;

        self.log(&format!(
            "Scenario complete: {} ({} ticks, {:.1}ms)",
            if report.passed { "PASSED" } else { "FAILED" },
            report.final_tick,
            report.duration_ms
        ));
        report.log = self.log.clone();

        Ok(report)
    }

    /// Execute a single action
    fn execute_action(&mut self, action: &ScenarioAction, world: &mut World) -> Result<()> {
        if self.config.verbose {
            self.log(&format!("[Tick {}] {:?}", world.now(), action));
        }

        match action {
            ScenarioAction::PlaceBlock { pos, block } => {
                let dropped = world.set_block(*pos, *block);
                self.log(&format!("  Placed {:?} at {}", block, pos));
                self.log_dropped(&dropped);
            }

            ScenarioAction::FillBox { min, max, block } => {
                let mut count = 0;
                for y in min.y..=max.y {
                    for z in min.z..=max.z {
                        for x in min.x..=max.x {
                            let dropped = world.set_block(glam::IVec3::new(x, y, z), *block);
                            self.log_dropped(&dropped);
                            count += 1;
                        }
                    }
                }
                self.log(&format!("  Filled {} blocks {}..{} with {:?}", count, min, max, block));
            }

            ScenarioAction::Enclose { pos, block } => {
                for side in NeighborQueries::horizontal_positions(*pos) {
                    let dropped = world.set_block(side, *block);
                    self.log_dropped(&dropped);
                }
                self.log(&format!("  Enclosed {} with {:?}", pos, block));
            }

            ScenarioAction::PlacePile { pos, layers } => {
                if *layers == 0 {
                    bail!("A pile needs at least one layer");
                }
                let dropped = world.place_pile(*pos, *layers);
                self.log_dropped(&dropped);
                self.log(&format!("  Placed {:?} at {}", world.block(*pos), pos));
            }

            ScenarioAction::AddFuel { pos, layers } => {
                let leftover = world.add_fuel(*pos, *layers);
                self.log(&format!(
                    "  Added {} layers at {} ({} did not fit)",
                    layers - leftover,
                    pos,
                    leftover
                ));
            }

            ScenarioAction::Light { pos } => {
                let lit = world.light(*pos, &mut self.events);
                if lit == 0 {
                    bail!("Nothing to light at {} ({:?})", pos, world.block(*pos));
                }
                self.log(&format!("  Lit {} blocks from {}", lit, pos));
            }

            ScenarioAction::InsertItem {
                pos,
                slot,
                item,
                count,
                temperature,
            } => {
                let mut stack = ItemStack::new(item.clone(), *count);
                if let Some(temperature) = temperature {
                    let now = world.now();
                    let config = world.config().clone();
                    let forge = stack
                        .forge_mut()
                        .with_context(|| format!("{} cannot hold heat", item))?;
                    forge.set_temperature(*temperature, now, &config);
                }
                world
                    .insert_item(*pos, *slot, stack)
                    .map_err(|rejected| {
                        anyhow!(
                            "Forge at {} refused {} in slot {}",
                            pos,
                            rejected.item,
                            slot
                        )
                    })?;
                self.log(&format!("  Inserted {} x{} at {} slot {}", item, count, pos, slot));
            }

            ScenarioAction::TakeItem { pos, slot } => {
                let stack = world
                    .take_item(*pos, *slot)
                    .with_context(|| format!("No item at {} slot {}", pos, slot))?;
                self.log(&format!("  Took {} x{} from {} slot {}", stack.item, stack.count, pos, slot));
            }

            ScenarioAction::Work {
                pos,
                slot,
                recipe,
                step,
            } => {
                let step = ForgeStep::from_name(step)
                    .with_context(|| format!("Unknown forge step '{}'", step))?;
                let outcome = world
                    .work_slot(*pos, *slot, recipe, step)
                    .with_context(|| format!("No item at {} slot {}", pos, slot))?;
                self.log(&format!("  {} on {} slot {}: {:?}", step.name(), pos, slot, outcome));
            }

            ScenarioAction::WaitTicks { ticks } => {
                world.tick_n(*ticks, &mut self.events);
                self.log(&format!("  Waited {} ticks (now {})", ticks, world.now()));
            }

            ScenarioAction::Save { path } => {
                save_world(world, Path::new(path))
                    .with_context(|| format!("Failed to save world to {}", path))?;
                self.log(&format!("  Saved world to {}", path));
            }

            ScenarioAction::Log { message } => {
                self.log(&format!("  {}", message));
            }
        }

        Ok(())
    }

    fn log_dropped(&mut self, dropped: &[ItemStack]) {
        for stack in dropped {
            self.log(&format!("  Dropped {} x{}", stack.item, stack.count));
        }
    }

    fn log(&mut self, message: &str) {
        log::info!("{}", message);
        self.log.push(message.to_string());
    }
}

impl Default for ScenarioExecutor {
    fn default() -> Self {
        Self::new()
    }
}
