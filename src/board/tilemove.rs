use std::fmt;

use arrayvec::ArrayVec;

use super::hex::Hex;
use super::tiles::MAX_TILE_VALUE;

/// A move places one tile value on one empty hex. Packed into two bytes
/// so move lists and the killer table stay small.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileMove {
    hex: u8,
    value: u8,
}

/// Upper bound on legal moves from any position: at most 18 empty hexes
/// (a move needs an occupied neighbor) times 9 distinct tile values.
pub const MAX_MOVES: usize = 162;

/// move list sized for the worst case, no heap allocation.
pub type MoveList = ArrayVec<TileMove, MAX_MOVES>;

impl TileMove {
    #[inline]
    pub fn new(hex: Hex, value: u8) -> Self {
        TileMove { hex: hex.to_index() as u8, value }
    }

    #[inline]
    pub fn hex(self) -> Hex {
        Hex::new(self.hex)
    }

    #[inline]
    pub fn tile_value(self) -> u8 {
        self.value
    }

    /// structurally well-formed: hex on board and value in 1..=9.
    #[inline]
    pub fn is_well_formed(self) -> bool {
        (self.hex as usize) < super::hex::NUM_HEXES
            && self.value >= 1
            && self.value <= MAX_TILE_VALUE
    }
}

impl fmt::Display for TileMove {
    /// same `h<id>:<value>` shape the position codec uses.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "h{}:{}", self.hex, self.value)
    }
}

impl fmt::Debug for TileMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TileMove({})", self)
    }
}
