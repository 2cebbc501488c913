mod bitboard;
mod board;
mod geometry;
mod hex;
mod player;
mod tilemove;
mod tiles;
mod zobrist;

pub use bitboard::{BitBoard, EMPTY, FULL};
pub use board::{Board, STARTING_TILE};
pub use geometry::{
    ADJACENT_HEXES, CENTER_COLUMN_HEXES, CHAIN_STARTERS, HEX_DIRECTIONS, P1_SCORING_CHAINS,
    P2_SCORING_CHAINS, VERTICAL_MIRROR_PAIRS,
};
pub use hex::{find_hex_at, Hex, ALL_HEXES, CENTER_HEX, HEX_POSITIONS, NUM_HEXES, ROW_COL_TO_HEX};
pub use player::Player;
pub use tilemove::{MoveList, TileMove, MAX_MOVES};
pub use tiles::{TileBag, MAX_TILE_VALUE};

/// force static tables (Zobrist keys) to initialize up front.
pub fn init() {
    zobrist::init_zobrist();
}
