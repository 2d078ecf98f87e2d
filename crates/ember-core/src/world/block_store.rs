//! Sparse block storage keyed by world position

use ahash::AHashMap;
use glam::IVec3;

use super::block::Block;

/// Sparse block grid; positions never written read as air
#[derive(Debug, Clone, Default)]
pub struct BlockStore {
    blocks: AHashMap<IVec3, Block>,
}

impl BlockStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, pos: IVec3) -> Block {
        self.blocks.get(&pos).copied().unwrap_or(Block::Air)
    }

    /// Write a block, returning the previous one
    pub fn set(&mut self, pos: IVec3, block: Block) -> Block {
        let previous = if block.is_air() {
            self.blocks.remove(&pos)
        } else {
            self.blocks.insert(pos, block)
        };
        previous.unwrap_or(Block::Air)
    }

    /// Number of non-air blocks
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Non-air blocks in ascending position order
    pub fn sorted_entries(&self) -> Vec<(IVec3, Block)> {
        let mut entries: Vec<_> = self.blocks.iter().map(|(p, b)| (*p, *b)).collect();
        entries.sort_by_key(|(p, _)| (p.y, p.z, p.x));
        entries
    }

    pub fn clear(&mut self) {
        self.blocks.clear();
    }
}
