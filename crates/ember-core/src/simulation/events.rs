//! Side effects reported by the forge simulation
//!
//! Sounds, particles and block-state visuals live outside the core. The
//! simulation reports what happened through a sink; hosts decide what to do
//! with it.

use glam::IVec3;

use crate::entity::ItemStack;

#[derive(Debug, Clone, PartialEq)]
pub enum ForgeEvent {
    /// A pile or idle forge caught fire
    Lit { pos: IVec3 },
    /// One fuel layer was burned; `layers_left` remain in the block
    FuelConsumed { pos: IVec3, layers_left: u8 },
    /// Fuel ran out; the forge is cooling
    FuelExhausted { pos: IVec3 },
    /// Enclosure classification flipped
    EnclosureChanged { pos: IVec3, enclosed: bool },
    /// An item reached its melting temperature and was destroyed
    ItemMelted { pos: IVec3, slot: usize, item: ItemStack },
    /// Forge temperature reached zero with no fuel left burning
    Extinguished { pos: IVec3 },
    /// A burned-out forge with no layers left fell apart; its stacks dropped
    Collapsed { pos: IVec3, dropped: Vec<ItemStack> },
}

/// Trait for receiving forge side effects
pub trait ForgeEventSink {
    fn emit(&mut self, event: ForgeEvent);
}

/// Discards every event
#[derive(Default)]
pub struct NoopEvents;

impl ForgeEventSink for NoopEvents {
    fn emit(&mut self, _event: ForgeEvent) {}
}

/// Records events in order
impl ForgeEventSink for Vec<ForgeEvent> {
    fn emit(&mut self, event: ForgeEvent) {
        self.push(event);
    }
}
