//! Horizontal neighbor utilities

use glam::IVec3;

use super::block_store::BlockStore;

/// The four horizontal directions: north, east, south, west
pub const HORIZONTALS: [IVec3; 4] = [
    IVec3::new(0, 0, -1),
    IVec3::new(1, 0, 0),
    IVec3::new(0, 0, 1),
    IVec3::new(-1, 0, 0),
];

/// Neighbor queries - stateless methods over the block store
pub struct NeighborQueries;

impl NeighborQueries {
    /// Positions of the 4 horizontal neighbors (N, E, S, W)
    pub fn horizontal_positions(center: IVec3) -> [IVec3; 4] {
        HORIZONTALS.map(|offset| center + offset)
    }

    /// A forge is enclosed when all 4 horizontal neighbors can bound it
    pub fn is_enclosed(blocks: &BlockStore, center: IVec3) -> bool {
        Self::horizontal_positions(center)
            .into_iter()
            .all(|pos| blocks.get(pos).is_valid_forge_side())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::Block;

    #[test]
    fn test_horizontal_positions() {
        let around = NeighborQueries::horizontal_positions(IVec3::new(5, 2, 5));
        assert_eq!(around[0], IVec3::new(5, 2, 4));
        assert_eq!(around[1], IVec3::new(6, 2, 5));
        assert_eq!(around[2], IVec3::new(5, 2, 6));
        assert_eq!(around[3], IVec3::new(4, 2, 5));
    }

    #[test]
    fn test_enclosure() {
        let mut blocks = BlockStore::new();
        let center = IVec3::ZERO;
        assert!(!NeighborQueries::is_enclosed(&blocks, center));

        for pos in NeighborQueries::horizontal_positions(center) {
            blocks.set(pos, Block::Stone);
        }
        assert!(NeighborQueries::is_enclosed(&blocks, center));

        // Fuel blocks count as walls, wood does not
        blocks.set(IVec3::new(1, 0, 0), Block::CharcoalPile { layers: 1 });
        assert!(NeighborQueries::is_enclosed(&blocks, center));
        blocks.set(IVec3::new(1, 0, 0), Block::Wood);
        assert!(!NeighborQueries::is_enclosed(&blocks, center));

        // Blocks above and below do not matter
        blocks.set(IVec3::new(1, 0, 0), Block::Brick);
        blocks.set(IVec3::new(0, 1, 0), Block::Wood);
        assert!(NeighborQueries::is_enclosed(&blocks, center));
    }
}
