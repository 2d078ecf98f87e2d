//! World - owns blocks, forge entities and the tick clock

use glam::IVec3;

use super::block::Block;
use super::block_store::BlockStore;
use super::clock::TickClock;
use super::neighbor_queries::NeighborQueries;
use crate::config::ForgeConfig;
use crate::entity::ItemStack;
use crate::simulation::{
    CharcoalForge, ForgeEvent, ForgeEventSink, ForgeMap, ForgeStep, IgnitionPropagation,
    RecipeBook, WorkOutcome, work_item,
};

/// The forge world
pub struct World {
    pub(crate) blocks: BlockStore,
    pub(crate) forges: ForgeMap,
    pub(crate) clock: TickClock,
    config: ForgeConfig,
    recipes: RecipeBook,
}

impl World {
    pub fn new(config: ForgeConfig) -> Self {
        Self {
            blocks: BlockStore::new(),
            forges: ForgeMap::default(),
            clock: TickClock::new(),
            config,
            recipes: RecipeBook::with_defaults(),
        }
    }

    pub fn config(&self) -> &ForgeConfig {
        &self.config
    }

    pub fn recipes(&self) -> &RecipeBook {
        &self.recipes
    }

    pub fn recipes_mut(&mut self) -> &mut RecipeBook {
        &mut self.recipes
    }

    /// Current simulation tick
    pub fn now(&self) -> u64 {
        self.clock.now()
    }

    pub fn blocks(&self) -> &BlockStore {
        &self.blocks
    }

    pub fn block(&self, pos: IVec3) -> Block {
        self.blocks.get(pos)
    }

    /// Write a block, keeping forge entities in sync
    ///
    /// Replacing a forge block drops its entity; the stacks it held are
    /// returned to the caller.
    pub fn set_block(&mut self, pos: IVec3, block: Block) -> Vec<ItemStack> {
        let previous = self.blocks.set(pos, block);
        let mut dropped = Vec::new();

        if block.is_forge() {
            self.forges
                .entry(pos)
                .or_insert_with(|| CharcoalForge::new(&self.config));
        } else if previous.is_forge() {
            if let Some(mut forge) = self.forges.remove(&pos) {
                dropped = forge.inventory_mut().drain();
                log::debug!("Forge at {} removed, dropped {} stacks", pos, dropped.len());
            }
        }
        dropped
    }

    /// Place a charcoal pile, clamping layers to the configured maximum
    pub fn place_pile(&mut self, pos: IVec3, layers: u8) -> Vec<ItemStack> {
        let layers = layers.clamp(1, self.config.max_pile_layers.max(1));
        self.set_block(pos, Block::CharcoalPile { layers })
    }

    /// Stack fuel layers onto a pile or forge, or start a pile on air
    ///
    /// Returns the layers that did not fit.
    pub fn add_fuel(&mut self, pos: IVec3, layers: u8) -> u8 {
        let max = self.config.max_pile_layers;
        let block = self.blocks.get(pos);

        let current = match block {
            Block::Air => 0,
            _ => match block.layers() {
                Some(current) => current,
                None => return layers,
            },
        };

        let added = layers.min(max.saturating_sub(current));
        if added == 0 {
            return layers;
        }

        let updated = if block.is_air() {
            Block::CharcoalPile { layers: added }
        } else {
            block.with_layers(current + added)
        };
        self.blocks.set(pos, updated);
        layers - added
    }

    /// Ignite the pile or idle forge at `pos` and everything connected to it
    pub fn light(&mut self, pos: IVec3, events: &mut dyn ForgeEventSink) -> usize {
        IgnitionPropagation::light_connected(
            &mut self.blocks,
            &mut self.forges,
            pos,
            &self.config,
            events,
        )
    }

    pub fn forge(&self, pos: IVec3) -> Option<&CharcoalForge> {
        self.forges.get(&pos)
    }

    pub fn forge_mut(&mut self, pos: IVec3) -> Option<&mut CharcoalForge> {
        self.forges.get_mut(&pos)
    }

    /// Forge positions in ascending order
    pub fn forge_positions(&self) -> Vec<IVec3> {
        let mut positions: Vec<_> = self.forges.keys().copied().collect();
        positions.sort_by_key(|p| (p.y, p.z, p.x));
        positions
    }

    pub fn forge_count(&self) -> usize {
        self.forges.len()
    }

    /// Put a stack into a forge slot; the stack comes back when refused
    pub fn insert_item(&mut self, pos: IVec3, slot: usize, stack: ItemStack) -> Result<(), ItemStack> {
        match self.forges.get_mut(&pos) {
            Some(forge) => forge.insert_item(slot, stack),
            None => Err(stack),
        }
    }

    pub fn take_item(&mut self, pos: IVec3, slot: usize) -> Option<ItemStack> {
        let now = self.clock.now();
        let mut stack = self.forges.get_mut(&pos)?.take_item(slot)?;
        stack.settle(now, &self.config);
        Some(stack)
    }

    /// Forge step on the stack sitting in a forge slot
    ///
    /// Returns `None` when there is no stack at that slot.
    pub fn work_slot(
        &mut self,
        pos: IVec3,
        slot: usize,
        recipe: &str,
        step: ForgeStep,
    ) -> Option<WorkOutcome> {
        let now = self.clock.now();
        let stack = self
            .forges
            .get_mut(&pos)?
            .inventory_mut()
            .get_slot_mut(slot)?
            .as_mut()?;
        Some(work_item(stack, recipe, step, &self.recipes, now, &self.config))
    }

    pub fn is_enclosed(&self, pos: IVec3) -> bool {
        NeighborQueries::is_enclosed(&self.blocks, pos)
    }

    /// Advance the simulation by one tick
    pub fn tick(&mut self, events: &mut dyn ForgeEventSink) {
        let now = self.clock.now();
        let mut burned_out = Vec::new();

        for pos in self.forge_positions() {
            let Some(forge) = self.forges.get_mut(&pos) else {
                continue;
            };
            if forge.update(pos, &mut self.blocks, now, &self.config, events)
                && self.blocks.get(pos).layers() == Some(0)
            {
                burned_out.push(pos);
            }

            if forge.fuel_ticks_remaining() == 0 {
                for stack in forge.inventory_mut().slots.iter_mut().flatten() {
                    stack.settle(now, &self.config);
                }
            }
        }

        for pos in burned_out {
            let dropped = self.set_block(pos, Block::Air);
            log::info!("Forge at {} collapsed, dropped {} stacks", pos, dropped.len());
            events.emit(ForgeEvent::Collapsed { pos, dropped });
        }

        self.clock.advance();
    }

    pub fn tick_n(&mut self, ticks: u64, events: &mut dyn ForgeEventSink) {
        for _ in 0..ticks {
            self.tick(events);
        }
    }

    /// Advance by `dt` seconds of wall time at a fixed tick rate
    pub fn update(&mut self, dt: f32, events: &mut dyn ForgeEventSink) -> u32 {
        let steps = self.clock.accumulate(dt);
        for _ in 0..steps {
            self.tick(events);
        }
        steps
    }

    /// Recompute every forge enclosure from adjacency
    pub(crate) fn refresh_enclosures(&mut self, events: &mut dyn ForgeEventSink) {
        for (pos, forge) in self.forges.iter_mut() {
            forge.update_enclosure(*pos, &self.blocks, events);
        }
    }
}
