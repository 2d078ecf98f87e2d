//! Block types of the forge world

use serde::{Deserialize, Serialize};

/// One block of the world grid
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Block {
    #[default]
    Air,
    Stone,
    Brick,
    Dirt,
    Glass,
    Wood,
    Planks,
    /// Stacked charcoal fuel, 1..=max layers
    CharcoalPile { layers: u8 },
    /// Heat source; `layers` counts unburnt fuel and may be 0
    CharcoalForge { layers: u8, lit: bool },
}

impl Block {
    /// Full, opaque cube
    pub fn is_normal_cube(self) -> bool {
        matches!(
            self,
            Block::Stone | Block::Brick | Block::Dirt | Block::Wood | Block::Planks
        )
    }

    /// Material can catch fire
    pub fn can_burn(self) -> bool {
        matches!(
            self,
            Block::Wood | Block::Planks | Block::CharcoalPile { .. } | Block::CharcoalForge { .. }
        )
    }

    pub fn is_air(self) -> bool {
        self == Block::Air
    }

    /// Pile or forge of the charcoal family
    pub fn is_fuel_block(self) -> bool {
        matches!(self, Block::CharcoalPile { .. } | Block::CharcoalForge { .. })
    }

    pub fn is_forge(self) -> bool {
        matches!(self, Block::CharcoalForge { .. })
    }

    /// Can bound a forge: solid non-flammable cube, or another fuel block
    pub fn is_valid_forge_side(self) -> bool {
        (self.is_normal_cube() && !self.can_burn()) || self.is_fuel_block()
    }

    /// Fuel layers held by a pile or forge
    pub fn layers(self) -> Option<u8> {
        match self {
            Block::CharcoalPile { layers } | Block::CharcoalForge { layers, .. } => Some(layers),
            _ => None,
        }
    }

    /// Same block with a different layer count; other blocks are unchanged
    pub fn with_layers(self, layers: u8) -> Self {
        match self {
            Block::CharcoalPile { .. } => Block::CharcoalPile { layers },
            Block::CharcoalForge { lit, .. } => Block::CharcoalForge { layers, lit },
            other => other,
        }
    }

    /// Ignition target: any pile, or a forge that is out but still has fuel
    pub fn is_lightable(self) -> bool {
        match self {
            Block::CharcoalPile { layers } => layers > 0,
            Block::CharcoalForge { layers, lit } => !lit && layers > 0,
            _ => false,
        }
    }
}
