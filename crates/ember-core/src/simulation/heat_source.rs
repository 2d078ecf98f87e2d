//! Charcoal forge heat source
//!
//! A forge burns one charcoal layer per `fuel_ticks_per_layer` ticks. While
//! burning it recomputes its enclosure, ramps its temperature toward the
//! enclosure ceiling and pushes heat into every colder forge item it holds.
//! Items that reach their melting temperature are destroyed. Without fuel the
//! forge cools by the same step until it reaches zero.

use ahash::AHashMap;
use glam::IVec3;

use super::events::{ForgeEvent, ForgeEventSink};
use crate::config::ForgeConfig;
use crate::entity::{Inventory, ItemStack};
use crate::world::{Block, BlockStore, NeighborQueries};

/// Field index of the remaining fuel ticks
pub const FIELD_FUEL: usize = 0;
/// Field index of the integer forge temperature
pub const FIELD_TEMPERATURE: usize = 1;
pub const FIELD_COUNT: usize = 2;

/// Forge entities keyed by block position
pub type ForgeMap = AHashMap<IVec3, CharcoalForge>;

/// Observable phase of a forge
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ForgeState {
    Unlit,
    /// Fuel ticks remaining
    Burning,
    /// Out of fuel but still warm
    Cooling,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CharcoalForge {
    fuel_ticks: u32,
    temperature: f32,
    /// Cache of the last adjacency check; recomputed while burning
    enclosed: bool,
    inventory: Inventory,
}

impl CharcoalForge {
    pub fn new(config: &ForgeConfig) -> Self {
        Self {
            fuel_ticks: 0,
            temperature: 0.0,
            enclosed: false,
            inventory: Inventory::new(config.forge_slots),
        }
    }

    /// Rebuild from persisted values. The enclosure starts unknown (open).
    pub fn from_parts(
        temperature: f32,
        fuel_ticks: u32,
        inventory: Inventory,
        config: &ForgeConfig,
    ) -> Self {
        let temperature = if temperature.is_finite() {
            temperature.clamp(0.0, config.max_temperature)
        } else {
            0.0
        };
        Self {
            fuel_ticks,
            temperature,
            enclosed: false,
            inventory,
        }
    }

    pub fn fuel_ticks_remaining(&self) -> u32 {
        self.fuel_ticks
    }

    pub fn temperature(&self) -> f32 {
        self.temperature
    }

    pub fn is_enclosed(&self) -> bool {
        self.enclosed
    }

    pub fn state(&self) -> ForgeState {
        if self.fuel_ticks > 0 {
            ForgeState::Burning
        } else if self.temperature > 0.0 {
            ForgeState::Cooling
        } else {
            ForgeState::Unlit
        }
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn inventory_mut(&mut self) -> &mut Inventory {
        &mut self.inventory
    }

    /// Only stacks carrying a forge component are accepted
    pub fn is_item_valid(stack: &ItemStack) -> bool {
        stack.has_forge()
    }

    pub fn insert_item(&mut self, slot: usize, stack: ItemStack) -> Result<(), ItemStack> {
        if !Self::is_item_valid(&stack) {
            return Err(stack);
        }
        self.inventory.insert(slot, stack)
    }

    pub fn take_item(&mut self, slot: usize) -> Option<ItemStack> {
        self.inventory.take(slot)
    }

    /// Recompute the enclosure from the 4 horizontal neighbors
    pub fn update_enclosure(
        &mut self,
        pos: IVec3,
        blocks: &BlockStore,
        events: &mut dyn ForgeEventSink,
    ) {
        let enclosed = NeighborQueries::is_enclosed(blocks, pos);
        if enclosed != self.enclosed {
            log::debug!("Forge at {} enclosed={}", pos, enclosed);
            self.enclosed = enclosed;
            events.emit(ForgeEvent::EnclosureChanged { pos, enclosed });
        }
    }

    /// Burn one fuel layer from the forge block at `pos`
    ///
    /// Refills the fuel ticks and returns true, or returns false when the
    /// block holds no more fuel.
    pub fn consume_fuel(
        &mut self,
        pos: IVec3,
        blocks: &mut BlockStore,
        config: &ForgeConfig,
        events: &mut dyn ForgeEventSink,
    ) -> bool {
        let block = blocks.get(pos);
        match block.layers() {
            Some(layers) if layers > 0 => {
                let layers_left = layers - 1;
                blocks.set(pos, block.with_layers(layers_left));
                self.fuel_ticks = config.fuel_ticks_per_layer;
                log::debug!("Forge at {} consumed fuel, {} layers left", pos, layers_left);
                events.emit(ForgeEvent::FuelConsumed { pos, layers_left });
                true
            }
            _ => false,
        }
    }

    /// Advance one tick
    ///
    /// Returns true on the tick the forge goes out.
    pub fn update(
        &mut self,
        pos: IVec3,
        blocks: &mut BlockStore,
        now: u64,
        config: &ForgeConfig,
        events: &mut dyn ForgeEventSink,
    ) -> bool {
        if self.fuel_ticks > 0 {
            self.fuel_ticks -= 1;

            if self.fuel_ticks == 0 && !self.consume_fuel(pos, blocks, config, events) {
                // Couldn't consume any more fuel
                if let Block::CharcoalForge { layers, .. } = blocks.get(pos) {
                    blocks.set(pos, Block::CharcoalForge { layers, lit: false });
                }
                log::debug!("Forge at {} ran out of fuel at {:.0}", pos, self.temperature);
                events.emit(ForgeEvent::FuelExhausted { pos });
            }

            self.update_enclosure(pos, blocks, events);

            let ceiling = config.forge_ceiling(self.enclosed);
            self.temperature = (self.temperature + config.forge_temperature_step).min(ceiling);

            self.heat_items(pos, now, config, events);
        } else if self.temperature > 0.0 {
            self.temperature = (self.temperature - config.forge_temperature_step).max(0.0);
            if self.temperature == 0.0 {
                log::debug!("Forge at {} extinguished", pos);
                events.emit(ForgeEvent::Extinguished { pos });
                return true;
            }
        }
        false
    }

    fn heat_items(
        &mut self,
        pos: IVec3,
        now: u64,
        config: &ForgeConfig,
        events: &mut dyn ForgeEventSink,
    ) {
        let forge_temperature = self.temperature;

        for (slot, entry) in self.inventory.slots.iter_mut().enumerate() {
            let Some(stack) = entry.as_mut() else {
                continue;
            };
            let Some(forge_item) = stack.forge_mut() else {
                continue;
            };

            if forge_item.temperature(now, config) < forge_temperature {
                forge_item.add_temperature(config.item_heat_increment, now, config);
            }

            if forge_item.is_molten(now, config) {
                if let Some(item) = entry.take() {
                    log::debug!("{} melted in forge at {} slot {}", item.item, pos, slot);
                    events.emit(ForgeEvent::ItemMelted { pos, slot, item });
                }
            }
        }
    }

    /// Read a numeric field for UI/telemetry; unknown indices read 0
    pub fn get_field(&self, index: usize) -> i32 {
        match index {
            FIELD_FUEL => i32::try_from(self.fuel_ticks).unwrap_or(i32::MAX),
            FIELD_TEMPERATURE => self.temperature as i32,
            _ => {
                log::warn!("Invalid forge field index {}", index);
                0
            }
        }
    }

    /// Write a numeric field from a synchronized UI; unknown indices are ignored
    pub fn set_field(&mut self, index: usize, value: i32, config: &ForgeConfig) {
        match index {
            FIELD_FUEL => self.fuel_ticks = u32::try_from(value).unwrap_or(0),
            FIELD_TEMPERATURE => {
                self.temperature = (value as f32).clamp(0.0, config.max_temperature)
            }
            _ => log::warn!("Invalid forge field index {}", index),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::NoopEvents;

    fn open_forge(layers: u8) -> (BlockStore, IVec3) {
        let mut blocks = BlockStore::new();
        let pos = IVec3::ZERO;
        blocks.set(pos, Block::CharcoalForge { layers, lit: true });
        (blocks, pos)
    }

    fn enclose(blocks: &mut BlockStore, pos: IVec3) {
        for side in NeighborQueries::horizontal_positions(pos) {
            blocks.set(side, Block::Stone);
        }
    }

    #[test]
    fn test_new_forge_is_unlit() {
        let forge = CharcoalForge::new(&ForgeConfig::default());
        assert_eq!(forge.state(), ForgeState::Unlit);
        assert_eq!(forge.inventory().max_slots, 5);
        assert!(!forge.is_enclosed());
    }

    #[test]
    fn test_consume_fuel_takes_one_layer() {
        let config = ForgeConfig::default();
        let (mut blocks, pos) = open_forge(2);
        let mut forge = CharcoalForge::new(&config);
        let mut events = Vec::new();

        assert!(forge.consume_fuel(pos, &mut blocks, &config, &mut events));
        assert_eq!(forge.fuel_ticks_remaining(), 1600);
        assert_eq!(blocks.get(pos).layers(), Some(1));

        assert!(forge.consume_fuel(pos, &mut blocks, &config, &mut events));
        assert_eq!(blocks.get(pos).layers(), Some(0));

        assert!(!forge.consume_fuel(pos, &mut blocks, &config, &mut events));
        assert_eq!(events.len(), 2);
    }

    #[test]
    fn test_temperature_ramps_while_burning() {
        let config = ForgeConfig::default();
        let (mut blocks, pos) = open_forge(1);
        let mut forge = CharcoalForge::new(&config);
        forge.consume_fuel(pos, &mut blocks, &config, &mut NoopEvents);

        for tick in 0..10 {
            forge.update(pos, &mut blocks, tick, &config, &mut NoopEvents);
        }
        assert_eq!(forge.temperature(), 10.0);
        assert_eq!(forge.fuel_ticks_remaining(), 1590);
        assert_eq!(forge.state(), ForgeState::Burning);
    }

    #[test]
    fn test_open_forge_ceiling() {
        let config = ForgeConfig {
            forge_temperature_step: 50.0,
            ..Default::default()
        };
        let (mut blocks, pos) = open_forge(1);
        let mut forge = CharcoalForge::new(&config);
        forge.consume_fuel(pos, &mut blocks, &config, &mut NoopEvents);

        for tick in 0..200 {
            forge.update(pos, &mut blocks, tick, &config, &mut NoopEvents);
            assert!(forge.temperature() <= config.forge_ceiling(false));
        }
        assert_eq!(forge.temperature(), config.forge_ceiling(false));
    }

    #[test]
    fn test_enclosed_forge_ceiling() {
        let config = ForgeConfig {
            forge_temperature_step: 50.0,
            ..Default::default()
        };
        let (mut blocks, pos) = open_forge(1);
        enclose(&mut blocks, pos);
        let mut forge = CharcoalForge::new(&config);
        forge.consume_fuel(pos, &mut blocks, &config, &mut NoopEvents);

        for tick in 0..200 {
            forge.update(pos, &mut blocks, tick, &config, &mut NoopEvents);
            assert!(forge.temperature() <= config.max_temperature);
        }
        assert!(forge.is_enclosed());
        assert_eq!(forge.temperature(), config.max_temperature);
    }

    #[test]
    fn test_opening_forge_drops_to_open_ceiling() {
        let config = ForgeConfig {
            forge_temperature_step: 100.0,
            ..Default::default()
        };
        let (mut blocks, pos) = open_forge(1);
        enclose(&mut blocks, pos);
        let mut forge = CharcoalForge::new(&config);
        forge.consume_fuel(pos, &mut blocks, &config, &mut NoopEvents);
        for tick in 0..20 {
            forge.update(pos, &mut blocks, tick, &config, &mut NoopEvents);
        }
        assert_eq!(forge.temperature(), 1500.0);

        blocks.set(IVec3::new(1, 0, 0), Block::Air);
        let mut events = Vec::new();
        forge.update(pos, &mut blocks, 20, &config, &mut events);
        assert!(!forge.is_enclosed());
        assert_eq!(forge.temperature(), config.forge_ceiling(false));
        assert!(events.contains(&ForgeEvent::EnclosureChanged {
            pos,
            enclosed: false
        }));
    }

    #[test]
    fn test_fuel_exhaustion_then_cooling() {
        let config = ForgeConfig::default();
        let (mut blocks, pos) = open_forge(0);
        let mut forge = CharcoalForge::from_parts(100.0, 1, Inventory::new(5), &config);
        let mut events = Vec::new();

        forge.update(pos, &mut blocks, 0, &config, &mut events);
        assert_eq!(forge.fuel_ticks_remaining(), 0);
        assert_eq!(forge.state(), ForgeState::Cooling);
        assert_eq!(blocks.get(pos), Block::CharcoalForge { layers: 0, lit: false });
        assert!(events.contains(&ForgeEvent::FuelExhausted { pos }));

        let mut previous = forge.temperature();
        let mut went_out = 0;
        for tick in 1..200 {
            if forge.update(pos, &mut blocks, tick, &config, &mut events) {
                went_out += 1;
            }
            if previous > 0.0 {
                assert!(forge.temperature() < previous);
            } else {
                assert_eq!(forge.temperature(), 0.0);
            }
            previous = forge.temperature();
        }
        assert_eq!(forge.state(), ForgeState::Unlit);
        assert_eq!(went_out, 1);
        assert_eq!(
            events
                .iter()
                .filter(|e| matches!(e, ForgeEvent::Extinguished { .. }))
                .count(),
            1
        );
    }

    #[test]
    fn test_refuel_from_remaining_layers() {
        let config = ForgeConfig::default();
        let (mut blocks, pos) = open_forge(1);
        let mut forge = CharcoalForge::from_parts(0.0, 1, Inventory::new(5), &config);

        forge.update(pos, &mut blocks, 0, &config, &mut NoopEvents);
        assert_eq!(forge.fuel_ticks_remaining(), 1600);
        assert_eq!(blocks.get(pos), Block::CharcoalForge { layers: 0, lit: true });
    }

    #[test]
    fn test_heats_items_and_melts() {
        let config = ForgeConfig {
            temperature_decay_per_tick: 0.0,
            ..Default::default()
        };
        let (mut blocks, pos) = open_forge(1);
        let mut forge = CharcoalForge::from_parts(899.0, 1600, Inventory::new(5), &config);

        forge.insert_item(0, ItemStack::new("ingotTin", 1)).unwrap();
        forge.insert_item(1, ItemStack::new("ingotIron", 1)).unwrap();
        assert!(forge.insert_item(2, ItemStack::new("stick", 1)).is_err());

        let mut events = Vec::new();
        // Tin melts at 300: 2 degrees per tick needs 150 ticks
        for tick in 0..150 {
            forge.update(pos, &mut blocks, tick, &config, &mut events);
        }

        assert!(forge.inventory().get_slot(0).unwrap().is_none());
        let iron = forge.inventory().get_slot(1).unwrap().as_ref().unwrap();
        assert_eq!(iron.forge().unwrap().temperature(149, &config), 300.0);

        let melted: Vec<_> = events
            .iter()
            .filter_map(|e| match e {
                ForgeEvent::ItemMelted { slot, item, .. } => Some((*slot, item.item.clone())),
                _ => None,
            })
            .collect();
        assert_eq!(melted, vec![(0, "ingotTin".to_string())]);
    }

    #[test]
    fn test_items_not_heated_past_forge() {
        let config = ForgeConfig::default();
        let (mut blocks, pos) = open_forge(1);
        let mut forge = CharcoalForge::from_parts(0.0, 1600, Inventory::new(5), &config);
        forge.insert_item(0, ItemStack::new("ingotIron", 1)).unwrap();

        for tick in 0..100 {
            forge.update(pos, &mut blocks, tick, &config, &mut NoopEvents);
        }

        // Forge at 100; item lags one increment behind at most
        let item = forge.inventory().get_slot(0).unwrap().as_ref().unwrap();
        let temp = item.forge().unwrap().temperature(99, &config);
        assert!(temp <= forge.temperature() + config.item_heat_increment);
        assert!(temp > 0.0);
    }

    #[test]
    fn test_fields() {
        let config = ForgeConfig::default();
        let mut forge = CharcoalForge::from_parts(812.7, 40, Inventory::new(5), &config);
        assert_eq!(forge.get_field(FIELD_FUEL), 40);
        assert_eq!(forge.get_field(FIELD_TEMPERATURE), 812);
        assert_eq!(forge.get_field(7), 0);

        forge.set_field(FIELD_FUEL, 12, &config);
        forge.set_field(FIELD_TEMPERATURE, 300, &config);
        forge.set_field(9, 1, &config);
        assert_eq!(forge.fuel_ticks_remaining(), 12);
        assert_eq!(forge.temperature(), 300.0);

        forge.set_field(FIELD_FUEL, -5, &config);
        assert_eq!(forge.fuel_ticks_remaining(), 0);
    }

    #[test]
    fn test_field_temperature_uses_configured_ceiling() {
        let config = ForgeConfig {
            max_temperature: 900.0,
            ..ForgeConfig::default()
        };
        let mut forge = CharcoalForge::from_parts(0.0, 0, Inventory::new(5), &config);

        forge.set_field(FIELD_TEMPERATURE, 1400, &config);
        assert_eq!(forge.temperature(), 900.0);

        forge.set_field(FIELD_TEMPERATURE, -20, &config);
        assert_eq!(forge.temperature(), 0.0);
    }
}
