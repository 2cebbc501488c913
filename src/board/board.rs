use std::fmt;

use super::bitboard::{BitBoard, EMPTY};
use super::geometry::{
    ADJACENT_HEXES, CENTER_COLUMN_HEXES, CHAIN_STARTERS, P1_SCORING_CHAINS, P2_SCORING_CHAINS,
    VERTICAL_MIRROR_PAIRS,
};
use super::hex::{find_hex_at, Hex, ALL_HEXES, CENTER_HEX, HEX_POSITIONS, NUM_HEXES};
use super::player::Player;
use super::tilemove::{MoveList, TileMove};
use super::tiles::{TileBag, MAX_TILE_VALUE};
use super::zobrist;

/// tile value pre-placed on the center hex.
pub const STARTING_TILE: u8 = 1;

/// The board representation. Copy.
///
/// Mutated in place by make/unmake during search; the two must be exact
/// inverses over every field, including the incremental hash.
#[derive(Clone, Copy, Debug)]
pub struct Board {
    occupied: BitBoard,
    values: [u8; NUM_HEXES], // 0 = empty
    bags: [TileBag; 2],
    side_to_move: Player,
    hash: u64,
    // recomputed by reset/load only; never consulted by legality or search
    symmetry_possible: bool,
    tiles_identical: bool,
}

impl Board {
    /// the initial position: center hex holds a 1, both bags full, P1 to move.
    pub fn new() -> Self {
        let mut board = Board {
            occupied: EMPTY,
            values: [0; NUM_HEXES],
            bags: [TileBag::standard(), TileBag::standard()],
            side_to_move: Player::P1,
            hash: 0,
            symmetry_possible: true,
            tiles_identical: true,
        };
        board.reset();
        board
    }

    /// restore the initial position in place.
    pub fn reset(&mut self) {
        self.occupied = BitBoard::from_hex(CENTER_HEX);
        self.values = [0; NUM_HEXES];
        self.values[CENTER_HEX.to_index()] = STARTING_TILE;
        self.bags = [TileBag::standard(), TileBag::standard()];
        self.side_to_move = Player::P1;
        self.recompute_derived_flags();
        self.hash = self.compute_hash();
    }

    // --- state queries ---

    #[inline]
    pub fn is_occupied(&self, hex: Hex) -> bool {
        self.occupied.contains(hex)
    }

    #[inline]
    pub fn tile_value(&self, hex: Hex) -> u8 {
        self.values[hex.to_index()]
    }

    #[inline]
    pub fn occupied(&self) -> BitBoard {
        self.occupied
    }

    #[inline]
    pub fn side_to_move(&self) -> Player {
        self.side_to_move
    }

    #[inline]
    pub fn hash(&self) -> u64 {
        self.hash
    }

    /// game ends when all 19 hexes are filled. Bit count rather than a
    /// move counter, so puzzle positions that start partially filled
    /// terminate correctly.
    #[inline]
    pub fn is_game_over(&self) -> bool {
        self.occupied.popcnt() as usize == NUM_HEXES
    }

    #[inline]
    pub fn is_tile_available(&self, player: Player, value: u8) -> bool {
        self.bags[player.to_index()].contains(value)
    }

    #[inline]
    pub fn available_tiles(&self, player: Player) -> &TileBag {
        &self.bags[player.to_index()]
    }

    pub fn symmetry_possible(&self) -> bool {
        self.symmetry_possible
    }

    pub fn tiles_identical(&self) -> bool {
        self.tiles_identical
    }

    // --- adjacency ---

    /// neighbors of a hex, from the precomputed table.
    pub fn adjacent_hexes(hex: Hex) -> impl Iterator<Item = Hex> {
        ADJACENT_HEXES[hex.to_index()]
            .into_iter()
            .take_while(|&adj| adj >= 0)
            .map(|adj| Hex::new(adj as u8))
    }

    pub fn has_adjacent_occupied(&self, hex: Hex) -> bool {
        Self::adjacent_hexes(hex).any(|adj| self.occupied.contains(adj))
    }

    // --- chain analysis ---

    /// lengths of every maximal occupied run along the 15 board lines.
    pub fn chain_lengths(&self) -> Vec<u8> {
        let mut lengths = Vec::new();
        for &(start, (dr, dc)) in &CHAIN_STARTERS {
            let mut run = 0u8;
            let mut cur = start as i8;
            while cur >= 0 {
                if self.occupied.contains(Hex::new(cur as u8)) {
                    run += 1;
                } else if run > 0 {
                    lengths.push(run);
                    run = 0;
                }
                let (row, col) = HEX_POSITIONS[cur as usize];
                cur = find_hex_at(row + dr, col + dc);
            }
            if run > 0 {
                lengths.push(run);
            }
        }
        lengths
    }

    /// Chain-length legality rule: after placing on `hex`, the longest
    /// run through `hex` may be at most one longer than the
    /// second-longest run anywhere on the board.
    ///
    /// Walks all 15 lines against a local occupancy mask with the
    /// hypothetical bit set. No allocation, no board mutation.
    fn chain_constraint_ok(&self, hex: Hex) -> bool {
        let occ = self.occupied | BitBoard::from_hex(hex);
        let target = hex.to_index() as i8;

        let mut max_len = 0u32;
        let mut second_max = 0u32;
        let mut longest_affected = 0u32;

        for &(start, (dr, dc)) in &CHAIN_STARTERS {
            let mut run = 0u32;
            let mut run_has_target = false;
            let mut cur = start as i8;

            while cur >= 0 {
                if occ.contains(Hex::new(cur as u8)) {
                    run += 1;
                    if cur == target {
                        run_has_target = true;
                    }
                } else if run > 0 {
                    close_run(run, run_has_target, &mut max_len, &mut second_max, &mut longest_affected);
                    run = 0;
                    run_has_target = false;
                }
                let (row, col) = HEX_POSITIONS[cur as usize];
                cur = find_hex_at(row + dr, col + dc);
            }
            // run extending to the board edge
            if run > 0 {
                close_run(run, run_has_target, &mut max_len, &mut second_max, &mut longest_affected);
            }
        }

        longest_affected <= second_max + 1
    }

    // --- move validation and generation ---

    /// placement legality for a hex: empty, touching an occupied hex,
    /// and within the chain-length constraint.
    pub fn is_move_legal(&self, hex: Hex) -> bool {
        !self.is_occupied(hex) && self.has_adjacent_occupied(hex) && self.chain_constraint_ok(hex)
    }

    /// full move validity: placement legality plus tile availability.
    pub fn is_valid_move(&self, mv: TileMove) -> bool {
        mv.is_well_formed()
            && self.is_move_legal(mv.hex())
            && self.is_tile_available(self.side_to_move, mv.tile_value())
    }

    /// All legal moves for the side to move. Each legal hex is paired
    /// with every *distinct* value in the mover's bag, so duplicate
    /// tiles yield one move, not one per occurrence.
    pub fn valid_moves(&self) -> MoveList {
        let mut moves = MoveList::new();
        let bag = &self.bags[self.side_to_move.to_index()];

        for hex in ALL_HEXES {
            if self.is_occupied(hex) || !self.is_move_legal(hex) {
                continue;
            }
            for value in bag.unique_values() {
                moves.push(TileMove::new(hex, value));
            }
        }

        moves
    }

    // --- move execution ---

    /// Apply a move. Does not validate; the search only feeds it moves
    /// from `valid_moves`.
    ///
    /// 1. Set the occupancy bit and tile value.
    /// 2. Remove one occurrence of the value from the mover's bag.
    /// 3. XOR the hash with the tile key, swap the side keys.
    /// 4. Flip the side to move.
    pub fn make_move(&mut self, mv: TileMove) {
        let hex = mv.hex().to_index();
        self.occupied |= BitBoard::from_hex(mv.hex());
        self.values[hex] = mv.tile_value();

        let _taken = self.bags[self.side_to_move.to_index()].take(mv.tile_value());
        debug_assert!(_taken, "make_move with unavailable tile {}", mv);

        self.hash ^= zobrist::tile_key(hex, mv.tile_value());
        self.hash ^= zobrist::side_key(self.side_to_move);
        self.side_to_move = !self.side_to_move;
        self.hash ^= zobrist::side_key(self.side_to_move);
    }

    /// Exact inverse of `make_move` (XOR is self-inverse, bag put undoes
    /// take). After the pair the board is bit-identical, bags compared
    /// as multisets.
    pub fn unmake_move(&mut self, mv: TileMove) {
        let hex = mv.hex().to_index();
        self.hash ^= zobrist::side_key(self.side_to_move);
        self.side_to_move = !self.side_to_move;
        self.hash ^= zobrist::side_key(self.side_to_move);
        self.hash ^= zobrist::tile_key(hex, mv.tile_value());

        self.bags[self.side_to_move.to_index()].put(mv.tile_value());
        self.values[hex] = 0;
        self.occupied &= !BitBoard::from_hex(mv.hex());
    }

    // --- scoring ---

    /// a player's score: over that player's chain family, sum the
    /// product of tile values on the occupied hexes of each chain.
    pub fn score(&self, player: Player) -> i32 {
        let chains: &[&[usize]; 5] = match player {
            Player::P1 => &P1_SCORING_CHAINS,
            Player::P2 => &P2_SCORING_CHAINS,
        };

        chains
            .iter()
            .map(|chain| {
                chain
                    .iter()
                    .filter(|&&h| self.occupied.contains(Hex::new(h as u8)))
                    .map(|&h| self.values[h] as i32)
                    .product::<i32>()
            })
            .sum()
    }

    // --- puzzle setup ---

    /// place a tile directly, outside the make/unmake protocol. Hash is
    /// recomputed from scratch; load-time only.
    pub fn set_hex_value(&mut self, hex: Hex, value: u8) {
        if !(1..=MAX_TILE_VALUE).contains(&value) {
            return;
        }
        self.occupied |= BitBoard::from_hex(hex);
        self.values[hex.to_index()] = value;
        self.hash = self.compute_hash();
    }

    /// clear a single hex. Hash is recomputed from scratch.
    pub fn remove_hex_value(&mut self, hex: Hex) {
        self.occupied &= !BitBoard::from_hex(hex);
        self.values[hex.to_index()] = 0;
        self.hash = self.compute_hash();
    }

    /// replace a player's bag. Duplicates permitted, out-of-range
    /// values dropped.
    pub fn set_available_tiles(&mut self, player: Player, values: &[u8]) {
        self.bags[player.to_index()] = TileBag::from_values(values);
    }

    /// empty all 19 hexes, keeping bags and side to move.
    pub fn clear_board(&mut self) {
        self.occupied = EMPTY;
        self.values = [0; NUM_HEXES];
        self.hash = self.compute_hash();
    }

    // --- position codec ---

    /// Parse `h<ID>:<VAL>,...|p1:...|p2:...|turn:<N>` into this board.
    ///
    /// Tolerant by design: empty sections and malformed fragments are
    /// skipped. Missing sections keep their defaults (empty occupancy,
    /// standard bags, P1 to move); a present-but-empty `p1:`/`p2:`
    /// section sets an empty bag.
    pub fn load_position(&mut self, position: &str) {
        self.clear_board();
        self.bags = [TileBag::standard(), TileBag::standard()];
        self.side_to_move = Player::P1;

        for section in position.split('|') {
            if section.is_empty() {
                continue;
            }
            if let Some(rest) = section.strip_prefix("p1:") {
                self.bags[0] = parse_tile_list(rest);
            } else if let Some(rest) = section.strip_prefix("p2:") {
                self.bags[1] = parse_tile_list(rest);
            } else if let Some(rest) = section.strip_prefix("turn:") {
                if let Some(p) = rest.trim().parse::<u8>().ok().and_then(Player::from_number) {
                    self.side_to_move = p;
                }
            } else if section.starts_with('h') {
                for pair in section.split(',') {
                    if let Some((hex, value)) = parse_hex_pair(pair) {
                        self.set_hex_value(hex, value);
                    }
                }
            }
            // unknown sections are skipped
        }

        self.recompute_derived_flags();
        self.hash = self.compute_hash();
    }

    /// emit the canonical position string. Hexes ascend by id and bags
    /// list ascending, so save -> load -> save is stable.
    pub fn save_position(&self) -> String {
        let mut out = String::new();

        let mut first = true;
        for hex in self.occupied.iter() {
            if !first {
                out.push(',');
            }
            out.push_str(&format!("h{}:{}", hex.to_index(), self.values[hex.to_index()]));
            first = false;
        }

        out.push_str("|p1:");
        push_tile_list(&mut out, &self.bags[0]);
        out.push_str("|p2:");
        push_tile_list(&mut out, &self.bags[1]);
        out.push_str(&format!("|turn:{}", self.side_to_move.to_number()));

        out
    }

    // --- hashing and derived flags ---

    /// full hash from scratch: one key per placed tile, plus the key of
    /// the side to move. The incremental hash must always agree.
    fn compute_hash(&self) -> u64 {
        let mut h = 0u64;
        for hex in self.occupied.iter() {
            h ^= zobrist::tile_key(hex.to_index(), self.values[hex.to_index()]);
        }
        h ^= zobrist::side_key(self.side_to_move);
        h
    }

    fn recompute_derived_flags(&mut self) {
        // symmetry is dead once any mirror pair holds two different values
        self.symmetry_possible = true;
        for hex in ALL_HEXES {
            let i = hex.to_index();
            if CENTER_COLUMN_HEXES.contains(&(i as u8)) {
                continue;
            }
            let mirror = VERTICAL_MIRROR_PAIRS[i] as usize;
            let a = self.values[i];
            let b = self.values[mirror];
            if a != 0 && b != 0 && a != b {
                self.symmetry_possible = false;
                break;
            }
        }
        self.tiles_identical = self.bags[0] == self.bags[1];
    }
}

#[inline]
fn close_run(
    len: u32,
    has_target: bool,
    max_len: &mut u32,
    second_max: &mut u32,
    longest_affected: &mut u32,
) {
    if len > *max_len {
        *second_max = *max_len;
        *max_len = len;
    } else if len > *second_max {
        *second_max = len;
    }
    if has_target && len > *longest_affected {
        *longest_affected = len;
    }
}

fn parse_tile_list(list: &str) -> TileBag {
    let values: Vec<u8> = list
        .split(',')
        .filter_map(|s| s.trim().parse::<u8>().ok())
        .collect();
    TileBag::from_values(&values)
}

/// parse one `h<id>:<val>` fragment; None on any malformation.
fn parse_hex_pair(pair: &str) -> Option<(Hex, u8)> {
    let rest = pair.trim().strip_prefix('h')?;
    let (id_str, val_str) = rest.split_once(':')?;
    let id: usize = id_str.parse().ok()?;
    let value: u8 = val_str.parse().ok()?;
    if id >= NUM_HEXES || !(1..=MAX_TILE_VALUE).contains(&value) {
        return None;
    }
    Some((Hex::new(id as u8), value))
}

fn push_tile_list(out: &mut String, bag: &TileBag) {
    let mut first = true;
    for v in bag.values() {
        if !first {
            out.push(',');
        }
        out.push_str(&v.to_string());
        first = false;
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::new()
    }
}

impl PartialEq for Board {
    /// observable state only; hash is derived and the compat flags are
    /// recomputed on load.
    fn eq(&self, other: &Self) -> bool {
        self.occupied == other.occupied
            && self.values == other.values
            && self.bags == other.bags
            && self.side_to_move == other.side_to_move
    }
}

impl Eq for Board {}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.save_position())
    }
}


// Undo needs no side stack: the move itself names the hex, the value
// and (via the flipped side) the bag to restore, and the hash update is
// three self-inverse XORs. The one non-reversible detail is bag
// ordering, which the counter representation removes entirely.
