use super::hex::{find_hex_at, HEX_POSITIONS, NUM_HEXES};

/// the six hex-grid neighbor offsets in `(dr, dc)` form.
pub const HEX_DIRECTIONS: [(i8, i8); 6] = [
    (-2, 0), // up, same column
    (2, 0),  // down, same column
    (-1, -1), // up-left
    (1, -1),  // down-left
    (-1, 1),  // up-right
    (1, 1),   // down-right
];

/// precomputed neighbor lists, -1 padded. Every hex has 3 to 6 neighbors.
pub const ADJACENT_HEXES: [[i8; 6]; NUM_HEXES] = {
    let mut table = [[-1i8; 6]; NUM_HEXES];
    let mut id = 0;
    while id < NUM_HEXES {
        let (row, col) = HEX_POSITIONS[id];
        let mut n = 0;
        let mut d = 0;
        while d < 6 {
            let (dr, dc) = HEX_DIRECTIONS[d];
            let adj = find_hex_at(row + dr, col + dc);
            if adj >= 0 {
                table[id][n] = adj;
                n += 1;
            }
            d += 1;
        }
        id += 1;
    }
    table
};

/// Canonical straight-line walks over the board: the six neighbor
/// directions collapse into three axes, and a side-3 hexagon has five
/// lines per axis. Each entry is `(start hex, direction)`; walking from
/// the start until the grid runs out visits every cell of that line
/// exactly once. Chain detection and the chain-length legality rule
/// both traverse these 15 lines.
pub const CHAIN_STARTERS: [(u8, (i8, i8)); 15] = [
    // down each column
    (0, (2, 0)),
    (3, (2, 0)),
    (7, (2, 0)),
    (12, (2, 0)),
    (16, (2, 0)),
    // down-right diagonals
    (0, (1, 1)),
    (1, (1, 1)),
    (2, (1, 1)),
    (3, (1, 1)),
    (7, (1, 1)),
    // up-right diagonals
    (0, (-1, 1)),
    (1, (-1, 1)),
    (2, (-1, 1)),
    (6, (-1, 1)),
    (11, (-1, 1)),
];

/// Player 1 scores along the down-right diagonals.
pub const P1_SCORING_CHAINS: [&[usize]; 5] = [
    &[0, 4, 9, 14, 18],
    &[1, 5, 10, 15],
    &[2, 6, 11],
    &[3, 8, 13, 17],
    &[7, 12, 16],
];

/// Player 2 scores along the down-left diagonals.
pub const P2_SCORING_CHAINS: [&[usize]; 5] = [
    &[2, 5, 9, 13, 16],
    &[1, 4, 8, 12],
    &[0, 3, 7],
    &[6, 10, 14, 17],
    &[11, 15, 18],
];

/// mirror image of each hex across the vertical axis (col -> 4 - col).
pub const VERTICAL_MIRROR_PAIRS: [u8; NUM_HEXES] = [
    16, 17, 18, 12, 13, 14, 15, 7, 8, 9, 10, 11, 3, 4, 5, 6, 0, 1, 2,
];

/// hexes of the center column, their own mirror images.
pub const CENTER_COLUMN_HEXES: [u8; 5] = [7, 8, 9, 10, 11];
