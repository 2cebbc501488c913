use arrayvec::ArrayVec;

use crate::board::{MoveList, TileMove, MAX_MOVES, NUM_HEXES};
use crate::types::{Score, MAX_PLY};

/// Killer moves: per ply, the last two moves that caused a beta cutoff.
pub struct KillerMoves {
    slots: [[Option<TileMove>; 2]; MAX_PLY],
}

impl KillerMoves {
    pub fn new() -> Self {
        Self { slots: [[None; 2]; MAX_PLY] }
    }

    /// record a cutoff move: shift slot 0 into slot 1 unless it is
    /// already the primary killer.
    pub fn update(&mut self, ply: usize, mv: TileMove) {
        if ply >= MAX_PLY {
            return;
        }
        if self.slots[ply][0] != Some(mv) {
            self.slots[ply][1] = self.slots[ply][0];
            self.slots[ply][0] = Some(mv);
        }
    }

    #[inline]
    pub fn at(&self, ply: usize) -> [Option<TileMove>; 2] {
        if ply < MAX_PLY {
            self.slots[ply]
        } else {
            [None; 2]
        }
    }
}

impl Default for KillerMoves {
    fn default() -> Self {
        Self::new()
    }
}

/// History heuristic: cutoff counts per (hex, tile value), weighted by
/// the square of the remaining depth so deep cutoffs dominate.
pub struct HistoryTable {
    scores: [[Score; 10]; NUM_HEXES],
}

impl HistoryTable {
    pub fn new() -> Self {
        Self { scores: [[0; 10]; NUM_HEXES] }
    }

    pub fn update(&mut self, mv: TileMove, depth: i32) {
        self.scores[mv.hex().to_index()][mv.tile_value() as usize] += depth * depth;
    }

    #[inline]
    pub fn get(&self, mv: TileMove) -> Score {
        self.scores[mv.hex().to_index()][mv.tile_value() as usize]
    }
}

impl Default for HistoryTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Sort a move list best-first. Pure heuristic: it changes the node
/// count, never the search result.
///
/// Priority: (1) the TT hint, (2) killer moves at this ply, (3) history
/// score plus tile-value and positional bonuses. The sort is stable so
/// equal-scored moves keep generation order and runs stay reproducible.
pub fn order_moves(
    moves: &mut MoveList,
    tt_move: Option<TileMove>,
    killers: &[Option<TileMove>; 2],
    history: &HistoryTable,
    _ply: usize,
) {
    let mut scored: ArrayVec<(Score, TileMove), MAX_MOVES> = moves
        .iter()
        .map(|&mv| (score_move(mv, tt_move, killers, history), mv))
        .collect();

    scored.sort_by(|a, b| b.0.cmp(&a.0)); // stable, descending

    moves.clear();
    moves.extend(scored.into_iter().map(|(_, mv)| mv));
}

fn score_move(
    mv: TileMove,
    tt_move: Option<TileMove>,
    killers: &[Option<TileMove>; 2],
    history: &HistoryTable,
) -> Score {
    // the move proven best last time this position was searched
    if tt_move == Some(mv) {
        return 10_000_000;
    }
    // recent cutoff moves at the same ply
    if killers[0] == Some(mv) || killers[1] == Some(mv) {
        return 1_000_000 + mv.tile_value() as Score * 10;
    }
    // history, then prefer big tiles and strong squares
    history.get(mv) + mv.tile_value() as Score * 100 + positional_bonus(mv)
}

fn positional_bonus(mv: TileMove) -> Score {
    match mv.hex().to_index() {
        9 => 50,
        4 | 6 | 7 | 11 | 12 => 30,
        0 | 2 | 16 | 18 => 20,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Hex;

    fn mv(hex: u8, value: u8) -> TileMove {
        TileMove::new(Hex::new(hex), value)
    }

    fn list(moves: &[TileMove]) -> MoveList {
        moves.iter().copied().collect()
    }

    #[test]
    fn test_tt_move_first() {
        let mut moves = list(&[mv(3, 2), mv(9, 9), mv(5, 1)]);
        let hint = mv(5, 1);
        order_moves(&mut moves, Some(hint), &[None; 2], &HistoryTable::new(), 0);
        assert_eq!(moves[0], hint);
    }

    #[test]
    fn test_killer_beats_quiet() {
        let mut moves = list(&[mv(9, 9), mv(3, 2)]);
        let killers = [Some(mv(3, 2)), None];
        order_moves(&mut moves, None, &killers, &HistoryTable::new(), 0);
        assert_eq!(moves[0], mv(3, 2));
    }

    #[test]
    fn test_history_orders_quiets() {
        let mut history = HistoryTable::new();
        history.update(mv(3, 2), 8); // 64 points, beats any bonus here
        history.update(mv(3, 2), 8);
        let mut moves = list(&[mv(5, 2), mv(3, 2)]);
        order_moves(&mut moves, None, &[None; 2], &history, 0);
        assert_eq!(moves[0], mv(3, 2));
    }

    #[test]
    fn test_positional_and_tile_bonus() {
        // equal tiles: center beats ring beats corner beats plain
        let mut moves = list(&[mv(1, 5), mv(0, 5), mv(4, 5), mv(9, 5)]);
        order_moves(&mut moves, None, &[None; 2], &HistoryTable::new(), 0);
        let hexes: Vec<usize> = moves.iter().map(|m| m.hex().to_index()).collect();
        assert_eq!(hexes, vec![9, 4, 0, 1]);
        // bigger tile outweighs a positional bonus
        let mut moves = list(&[mv(9, 5), mv(1, 9)]);
        order_moves(&mut moves, None, &[None; 2], &HistoryTable::new(), 0);
        assert_eq!(moves[0], mv(1, 9));
    }

    #[test]
    fn test_stable_for_equal_scores() {
        let mut moves = list(&[mv(1, 5), mv(3, 5), mv(5, 5)]);
        order_moves(&mut moves, None, &[None; 2], &HistoryTable::new(), 0);
        let hexes: Vec<usize> = moves.iter().map(|m| m.hex().to_index()).collect();
        assert_eq!(hexes, vec![1, 3, 5]);
    }

    #[test]
    fn test_killer_update_shifts() {
        let mut killers = KillerMoves::new();
        killers.update(3, mv(1, 1));
        killers.update(3, mv(2, 2));
        assert_eq!(killers.at(3), [Some(mv(2, 2)), Some(mv(1, 1))]);
        // re-recording the primary killer must not duplicate it
        killers.update(3, mv(2, 2));
        assert_eq!(killers.at(3), [Some(mv(2, 2)), Some(mv(1, 1))]);
        // out-of-range ply is ignored
        killers.update(MAX_PLY, mv(4, 4));
        assert_eq!(killers.at(MAX_PLY), [None; 2]);
    }

    #[test]
    fn test_history_depth_squared() {
        let mut history = HistoryTable::new();
        history.update(mv(7, 3), 2);
        history.update(mv(7, 3), 3);
        assert_eq!(history.get(mv(7, 3)), 4 + 9);
        assert_eq!(history.get(mv(7, 4)), 0);
    }
}
