pub mod inventory;

pub use inventory::{FORGEABLE_PREFIX, Inventory, ItemStack, is_forgeable};
