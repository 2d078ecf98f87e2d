//! Ignition propagation across connected fuel blocks
//!
//! Lighting a pile turns it into a lit forge with the same layer count and
//! burns its first layer. Fire then spreads to every horizontally connected
//! pile or idle forge. The spread uses an explicit frontier and visited set,
//! so large charcoal fields never grow the call stack.

use glam::IVec3;
use std::collections::{HashSet, VecDeque};

use super::events::{ForgeEvent, ForgeEventSink};
use super::heat_source::{CharcoalForge, ForgeMap};
use crate::config::ForgeConfig;
use crate::world::{Block, BlockStore, NeighborQueries};

/// Ignition system - stateless methods over blocks and forge entities
pub struct IgnitionPropagation;

impl IgnitionPropagation {
    /// Light the single block at `pos`
    ///
    /// Returns false when the block is not a pile or an idle forge with fuel.
    pub fn try_light(
        blocks: &mut BlockStore,
        forges: &mut ForgeMap,
        pos: IVec3,
        config: &ForgeConfig,
        events: &mut dyn ForgeEventSink,
    ) -> bool {
        let block = blocks.get(pos);
        if !block.is_lightable() {
            return false;
        }

        let layers = block.layers().unwrap_or(0);
        blocks.set(pos, Block::CharcoalForge { layers, lit: true });

        let forge = forges
            .entry(pos)
            .or_insert_with(|| CharcoalForge::new(config));
        forge.consume_fuel(pos, blocks, config, events);

        events.emit(ForgeEvent::Lit { pos });
        true
    }

    /// Light `start` and every fuel block connected to it
    ///
    /// Returns the number of blocks lit. Nothing spreads when `start` itself
    /// cannot be lit.
    pub fn light_connected(
        blocks: &mut BlockStore,
        forges: &mut ForgeMap,
        start: IVec3,
        config: &ForgeConfig,
        events: &mut dyn ForgeEventSink,
    ) -> usize {
        if !Self::try_light(blocks, forges, start, config, events) {
            return 0;
        }

        let mut visited = HashSet::new();
        let mut queue = VecDeque::new();
        visited.insert(start);
        queue.push_back(start);
        let mut lit = 1;

        while let Some(pos) = queue.pop_front() {
            for neighbor in NeighborQueries::horizontal_positions(pos) {
                if !visited.insert(neighbor) {
                    continue;
                }

                if Self::try_light(blocks, forges, neighbor, config, events) {
                    lit += 1;
                    queue.push_back(neighbor);
                }
            }
        }

        log::info!(
            "Ignition at {} lit {} blocks ({} positions checked)",
            start,
            lit,
            visited.len()
        );
        lit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::{ForgeState, NoopEvents};

    #[test]
    fn test_light_pile_converts_to_forge() {
        let config = ForgeConfig::default();
        let mut blocks = BlockStore::new();
        let mut forges = ForgeMap::default();
        let pos = IVec3::new(2, 0, 2);
        blocks.set(pos, Block::CharcoalPile { layers: 3 });

        let mut events = Vec::new();
        assert!(IgnitionPropagation::try_light(
            &mut blocks,
            &mut forges,
            pos,
            &config,
            &mut events
        ));

        assert_eq!(blocks.get(pos), Block::CharcoalForge { layers: 2, lit: true });
        let forge = &forges[&pos];
        assert_eq!(forge.fuel_ticks_remaining(), 1600);
        assert_eq!(forge.state(), ForgeState::Burning);
        assert_eq!(
            events,
            vec![
                ForgeEvent::FuelConsumed { pos, layers_left: 2 },
                ForgeEvent::Lit { pos }
            ]
        );
    }

    #[test]
    fn test_single_layer_pile_burns_its_only_layer() {
        let config = ForgeConfig::default();
        let mut blocks = BlockStore::new();
        let mut forges = ForgeMap::default();
        blocks.set(IVec3::ZERO, Block::CharcoalPile { layers: 1 });

        assert!(IgnitionPropagation::try_light(
            &mut blocks,
            &mut forges,
            IVec3::ZERO,
            &config,
            &mut NoopEvents
        ));
        assert_eq!(
            blocks.get(IVec3::ZERO),
            Block::CharcoalForge { layers: 0, lit: true }
        );
        assert_eq!(forges[&IVec3::ZERO].fuel_ticks_remaining(), 1600);
    }

    #[test]
    fn test_non_fuel_blocks_do_not_light() {
        let config = ForgeConfig::default();
        let mut blocks = BlockStore::new();
        let mut forges = ForgeMap::default();
        blocks.set(IVec3::ZERO, Block::Wood);

        for pos in [IVec3::ZERO, IVec3::ONE] {
            assert!(!IgnitionPropagation::try_light(
                &mut blocks,
                &mut forges,
                pos,
                &config,
                &mut NoopEvents
            ));
        }
        assert!(forges.is_empty());
    }

    #[test]
    fn test_lit_forge_does_not_relight() {
        let config = ForgeConfig::default();
        let mut blocks = BlockStore::new();
        let mut forges = ForgeMap::default();
        blocks.set(IVec3::ZERO, Block::CharcoalPile { layers: 4 });

        assert_eq!(
            IgnitionPropagation::light_connected(
                &mut blocks,
                &mut forges,
                IVec3::ZERO,
                &config,
                &mut NoopEvents
            ),
            1
        );
        assert_eq!(
            IgnitionPropagation::light_connected(
                &mut blocks,
                &mut forges,
                IVec3::ZERO,
                &config,
                &mut NoopEvents
            ),
            0
        );
        assert_eq!(blocks.get(IVec3::ZERO).layers(), Some(3));
    }

    #[test]
    fn test_spreads_through_line_and_stops_at_gap() {
        let config = ForgeConfig::default();
        let mut blocks = BlockStore::new();
        let mut forges = ForgeMap::default();

        for x in 0..5 {
            blocks.set(IVec3::new(x, 0, 0), Block::CharcoalPile { layers: 2 });
        }
        // Gap at x = 5, then another pile
        blocks.set(IVec3::new(6, 0, 0), Block::CharcoalPile { layers: 2 });
        // Diagonal neighbors are not connected
        blocks.set(IVec3::new(1, 0, 1), Block::Stone);
        blocks.set(IVec3::new(0, 0, 1), Block::CharcoalPile { layers: 1 });
        blocks.set(IVec3::new(1, 1, 0), Block::CharcoalPile { layers: 1 });

        let lit = IgnitionPropagation::light_connected(
            &mut blocks,
            &mut forges,
            IVec3::new(2, 0, 0),
            &config,
            &mut NoopEvents,
        );

        // Five in the row plus the one at (0, 0, 1)
        assert_eq!(lit, 6);
        assert_eq!(forges.len(), 6);
        assert_eq!(blocks.get(IVec3::new(6, 0, 0)), Block::CharcoalPile { layers: 2 });
        // Vertical neighbor is not horizontal
        assert_eq!(blocks.get(IVec3::new(1, 1, 0)), Block::CharcoalPile { layers: 1 });
    }

    #[test]
    fn test_relights_idle_forge_with_fuel() {
        let config = ForgeConfig::default();
        let mut blocks = BlockStore::new();
        let mut forges = ForgeMap::default();
        let pos = IVec3::ZERO;
        blocks.set(pos, Block::CharcoalForge { layers: 2, lit: false });
        forges.insert(pos, CharcoalForge::new(&config));

        assert!(IgnitionPropagation::try_light(
            &mut blocks,
            &mut forges,
            pos,
            &config,
            &mut NoopEvents
        ));
        assert_eq!(blocks.get(pos), Block::CharcoalForge { layers: 1, lit: true });
        assert_eq!(forges.len(), 1);
    }
}
