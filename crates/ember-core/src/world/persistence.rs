//! Persisted records and world save files
//!
//! Forge items persist as `ForgeItemRecord { work, steps, recipe, temp, tick }`
//! where `tick == -1` marks a fully decayed snapshot. Forges persist their
//! temperature, fuel ticks and slot contents; the enclosure is recomputed
//! from adjacency after load. World files are bincode, lz4 compressed and
//! written atomically.

use glam::IVec3;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use super::block::Block;
use super::block_store::BlockStore;
use super::clock::TickClock;
use super::world::World;
use crate::config::ForgeConfig;
use crate::entity::{Inventory, ItemStack, is_forgeable};
use crate::simulation::{
    CharcoalForge, ForgeItem, ForgeMap, ForgeSteps, LazyTemperature, NoopEvents, ThermalProfile,
};

/// Current world save format
pub const SAVE_VERSION: u32 = 1;

/// Persisted `tick` of a snapshot that has fully decayed
pub const DECAYED_TICK: i64 = -1;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to encode: {0}")]
    Encode(String),
    #[error("failed to decode: {0}")]
    Decode(String),
    #[error("failed to decompress: {0}")]
    Decompress(String),
    #[error("unsupported save version {found} (expected {expected})")]
    Version { found: u32, expected: u32 },
    #[error("RON error: {0}")]
    Ron(String),
}

/// Step ledger as step names, oldest first
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StepsRecord {
    pub steps: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForgeItemRecord {
    pub work: i32,
    pub steps: StepsRecord,
    /// Present only when a recipe is resolved
    pub recipe: Option<String>,
    pub temp: f32,
    pub tick: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemStackRecord {
    pub item: String,
    pub count: u32,
    pub forge: Option<ForgeItemRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeatSourceRecord {
    pub temp: f32,
    pub ticks: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForgeSave {
    pub pos: IVec3,
    pub heat: HeatSourceRecord,
    pub slots: Vec<Option<ItemStackRecord>>,
}

/// Complete world state on disk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldSave {
    pub version: u32,
    pub tick: u64,
    pub blocks: Vec<(IVec3, Block)>,
    pub forges: Vec<ForgeSave>,
}

fn encode<T: Serialize>(value: &T) -> Result<Vec<u8>, PersistError> {
    bincode_next::serde::encode_to_vec(value, bincode_next::config::standard())
        .map_err(|e| PersistError::Encode(e.to_string()))
}

fn decode<T: serde::de::DeserializeOwned>(bytes: &[u8]) -> Result<T, PersistError> {
    bincode_next::serde::decode_from_slice(bytes, bincode_next::config::standard())
        .map(|(value, _)| value)
        .map_err(|e| PersistError::Decode(e.to_string()))
}

impl ForgeItem {
    /// Snapshot the component at `now`
    pub fn to_record(&self, now: u64, config: &ForgeConfig) -> ForgeItemRecord {
        let temp = self.temperature(now, config);
        let tick = if temp > 0.0 {
            i64::try_from(now).unwrap_or(i64::MAX)
        } else {
            DECAYED_TICK
        };

        ForgeItemRecord {
            work: self.work(),
            steps: StepsRecord {
                steps: self.steps().names(),
            },
            recipe: self.recipe().map(str::to_string),
            temp,
            tick,
        }
    }

    /// Rebuild from a record; an absent record yields the zero state
    ///
    /// The snapshot goes through the same clamp as a live temperature write.
    pub fn from_record(
        record: Option<&ForgeItemRecord>,
        material: &str,
        config: &ForgeConfig,
    ) -> Self {
        let profile = ThermalProfile::for_material(material);
        let Some(record) = record else {
            return Self::with_profile(profile);
        };

        // Negative ticks mark a snapshot that had already decayed
        let mut temperature = LazyTemperature::COLD;
        if let Ok(tick) = u64::try_from(record.tick) {
            if record.temp.is_finite() && record.temp > 0.0 {
                temperature.set(record.temp, tick, config.max_temperature);
            }
        }

        Self::from_parts(
            profile,
            ForgeSteps::from_names(&record.steps.steps),
            record.work,
            record.recipe.clone(),
            temperature,
        )
    }

    pub fn to_bytes(&self, now: u64, config: &ForgeConfig) -> Result<Vec<u8>, PersistError> {
        encode(&self.to_record(now, config))
    }

    /// Decode a record; malformed input falls back to the zero state
    pub fn from_bytes(bytes: &[u8], material: &str, config: &ForgeConfig) -> Self {
        match decode::<ForgeItemRecord>(bytes) {
            Ok(record) => Self::from_record(Some(&record), material, config),
            Err(e) => {
                log::warn!("Malformed forge item record for {}: {}", material, e);
                Self::from_record(None, material, config)
            }
        }
    }
}

impl ItemStack {
    pub fn to_record(&self, now: u64, config: &ForgeConfig) -> ItemStackRecord {
        ItemStackRecord {
            item: self.item.clone(),
            count: self.count,
            forge: self.forge().map(|forge| forge.to_record(now, config)),
        }
    }

    /// Forgeable identities always get a component, even without a record
    pub fn from_record(record: &ItemStackRecord, config: &ForgeConfig) -> Self {
        let forge = is_forgeable(&record.item)
            .then(|| ForgeItem::from_record(record.forge.as_ref(), &record.item, config));
        ItemStack::with_forge(record.item.clone(), record.count, forge)
    }
}

impl CharcoalForge {
    pub fn heat_record(&self) -> HeatSourceRecord {
        HeatSourceRecord {
            temp: self.temperature(),
            ticks: i32::try_from(self.fuel_ticks_remaining()).unwrap_or(i32::MAX),
        }
    }

    fn to_save(&self, pos: IVec3, now: u64, config: &ForgeConfig) -> ForgeSave {
        ForgeSave {
            pos,
            heat: self.heat_record(),
            slots: self
                .inventory()
                .slots
                .iter()
                .map(|slot| slot.as_ref().map(|stack| stack.to_record(now, config)))
                .collect(),
        }
    }

    fn from_save(save: &ForgeSave, config: &ForgeConfig) -> Self {
        let mut inventory = Inventory::new(config.forge_slots);
        for (index, record) in save.slots.iter().enumerate() {
            let Some(record) = record else {
                continue;
            };
            if inventory.insert(index, ItemStack::from_record(record, config)).is_err() {
                log::warn!(
                    "Forge at {} has no slot {}, dropping {}",
                    save.pos,
                    index,
                    record.item
                );
            }
        }

        let fuel_ticks = u32::try_from(save.heat.ticks).unwrap_or(0);
        CharcoalForge::from_parts(save.heat.temp, fuel_ticks, inventory, config)
    }
}

impl World {
    pub fn to_save(&self) -> WorldSave {
        let now = self.now();
        WorldSave {
            version: SAVE_VERSION,
            tick: now,
            blocks: self.blocks.sorted_entries(),
            forges: self
                .forge_positions()
                .into_iter()
                .filter_map(|pos| {
                    self.forge(pos)
                        .map(|forge| forge.to_save(pos, now, self.config()))
                })
                .collect(),
        }
    }

    /// Rebuild a world; forge enclosures are recomputed from the blocks
    pub fn from_save(save: &WorldSave, config: ForgeConfig) -> Result<Self, PersistError> {
        if save.version != SAVE_VERSION {
            log::warn!("Unsupported save version {}", save.version);
            return Err(PersistError::Version {
                found: save.version,
                expected: SAVE_VERSION,
            });
        }

        let mut blocks = BlockStore::new();
        for (pos, block) in &save.blocks {
            blocks.set(*pos, *block);
        }

        let mut forges = ForgeMap::default();
        for forge in &save.forges {
            if !blocks.get(forge.pos).is_forge() {
                log::warn!("Saved forge at {} has no forge block, skipping", forge.pos);
                continue;
            }
            forges.insert(forge.pos, CharcoalForge::from_save(forge, &config));
        }
        for (pos, block) in blocks.sorted_entries() {
            if block.is_forge() && !forges.contains_key(&pos) {
                forges.insert(pos, CharcoalForge::new(&config));
            }
        }

        let mut world = World::new(config);
        world.blocks = blocks;
        world.forges = forges;
        world.clock = TickClock::starting_at(save.tick);
        world.refresh_enclosures(&mut NoopEvents);
        Ok(world)
    }
}

impl WorldSave {
    pub fn to_ron_string(&self) -> Result<String, PersistError> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| PersistError::Ron(e.to_string()))
    }

    pub fn from_ron_str(s: &str) -> Result<Self, PersistError> {
        ron::from_str(s).map_err(|e| PersistError::Ron(e.to_string()))
    }
}

/// Write the world to `path` (bincode + lz4, atomic rename)
pub fn save_world(world: &World, path: &Path) -> Result<(), PersistError> {
    let save = world.to_save();
    let serialized = encode(&save)?;
    let compressed = lz4_flex::compress_prepend_size(&serialized);
    let compressed_size = compressed.len();

    // Atomic write: write to temp file, then rename
    let temp_path = path.with_extension("tmp");
    std::fs::write(&temp_path, compressed)?;
    std::fs::rename(&temp_path, path)?;

    log::info!(
        "[SAVE] World at tick {} saved to {:?} ({} blocks, {} forges, {} bytes compressed)",
        save.tick,
        path,
        save.blocks.len(),
        save.forges.len(),
        compressed_size
    );
    Ok(())
}

/// Read a world written by [`save_world`]
pub fn load_world(path: &Path, config: ForgeConfig) -> Result<World, PersistError> {
    let compressed = std::fs::read(path)?;
    let serialized = lz4_flex::decompress_size_prepended(&compressed)
        .map_err(|e| PersistError::Decompress(e.to_string()))?;
    let save: WorldSave = decode(&serialized)?;
    let world = World::from_save(&save, config)?;

    log::info!(
        "[LOAD] World at tick {} loaded from {:?} ({} forges)",
        save.tick,
        path,
        world.forge_count()
    );
    Ok(world)
}
