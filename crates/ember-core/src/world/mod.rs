//! World management - blocks, forge entities, ticking, saving

mod block;
mod block_store;
mod clock;
mod neighbor_queries;
pub mod persistence;
#[allow(clippy::module_inception)]
mod world;

pub use block::Block;
pub use block_store::BlockStore;
pub use clock::{TICKS_PER_SECOND, TickClock};
pub use neighbor_queries::{HORIZONTALS, NeighborQueries};
pub use persistence::{
    ForgeItemRecord, HeatSourceRecord, ItemStackRecord, PersistError, SAVE_VERSION, StepsRecord,
    WorldSave, load_world, save_world,
};
pub use world::World;
