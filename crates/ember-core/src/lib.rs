pub mod config;
pub mod entity;
pub mod simulation;
pub mod world;

pub use config::{ConfigError, ForgeConfig};
pub use entity::{Inventory, ItemStack};
pub use simulation::{CharcoalForge, ForgeEvent, ForgeEventSink, ForgeItem, NoopEvents};
pub use world::{Block, World};
