use serde::{Deserialize, Serialize};

use crate::config::ForgeConfig;
use crate::simulation::ForgeItem;

/// Identity prefix of items that get a forge component on creation
pub const FORGEABLE_PREFIX: &str = "ingot";

/// True when items with this identity carry the forge component
pub fn is_forgeable(item: &str) -> bool {
    item.len() > FORGEABLE_PREFIX.len()
        && item
            .get(..FORGEABLE_PREFIX.len())
            .is_some_and(|p| p.eq_ignore_ascii_case(FORGEABLE_PREFIX))
}

/// A stack of items in an inventory slot
///
/// `forge` is the optional forge-item component. It is attached when the
/// stack is created from a forgeable identity and shared by every item in
/// the stack.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ItemStack {
    pub item: String,
    pub count: u32,
    forge: Option<ForgeItem>,
}

impl ItemStack {
    /// Create a new item stack
    pub fn new(item: impl Into<String>, count: u32) -> Self {
        let item = item.into();
        let forge = is_forgeable(&item).then(|| ForgeItem::new(&item));
        ItemStack { item, count, forge }
    }

    /// Stack with an explicit component (used when loading saves)
    pub fn with_forge(item: impl Into<String>, count: u32, forge: Option<ForgeItem>) -> Self {
        ItemStack {
            item: item.into(),
            count,
            forge,
        }
    }

    pub fn has_forge(&self) -> bool {
        self.forge.is_some()
    }

    pub fn forge(&self) -> Option<&ForgeItem> {
        self.forge.as_ref()
    }

    pub fn forge_mut(&mut self) -> Option<&mut ForgeItem> {
        self.forge.as_mut()
    }

    /// Apply the cold/idle reset to the forge component, if any
    pub fn settle(&mut self, now: u64, config: &ForgeConfig) -> bool {
        self.forge
            .as_mut()
            .is_some_and(|forge| forge.maybe_clear_if_idle(now, config))
    }

    /// Replace the identity, e.g. when an anvil recipe completes
    ///
    /// The forge component is rebuilt for the new identity. Heat carries over
    /// when the new identity is forgeable as well.
    pub fn transform(&mut self, output: &str, now: u64, config: &ForgeConfig) {
        let heat = self
            .forge
            .as_ref()
            .map(|forge| forge.temperature(now, config))
            .unwrap_or(0.0);

        *self = ItemStack::new(output, self.count);
        if let Some(forge) = self.forge.as_mut() {
            if heat > 0.0 {
                forge.set_temperature(heat, now, config);
            }
        }
    }
}

/// Fixed-capacity slot container
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Inventory {
    pub slots: Vec<Option<ItemStack>>,
    pub max_slots: usize,
}

impl Inventory {
    /// Create a new inventory with the specified number of slots
    pub fn new(max_slots: usize) -> Self {
        Inventory {
            slots: vec![None; max_slots],
            max_slots,
        }
    }

    /// Put a stack into an empty slot; hands the stack back otherwise
    pub fn insert(&mut self, index: usize, stack: ItemStack) -> Result<(), ItemStack> {
        match self.slots.get_mut(index) {
            Some(slot @ None) => {
                *slot = Some(stack);
                Ok(())
            }
            _ => Err(stack),
        }
    }

    /// Remove and return the stack in a slot
    pub fn take(&mut self, index: usize) -> Option<ItemStack> {
        self.slots.get_mut(index).and_then(Option::take)
    }

    /// Remove every stack, returning them in slot order
    pub fn drain(&mut self) -> Vec<ItemStack> {
        self.slots.iter_mut().filter_map(Option::take).collect()
    }

    /// Get a reference to a slot
    pub fn get_slot(&self, index: usize) -> Option<&Option<ItemStack>> {
        self.slots.get(index)
    }

    /// Get a mutable reference to a slot
    pub fn get_slot_mut(&mut self, index: usize) -> Option<&mut Option<ItemStack>> {
        self.slots.get_mut(index)
    }
}
