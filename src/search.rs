use std::time::Instant;

use crate::board::{Board, TileMove};
use crate::evaluation::evaluate;
use crate::movegen::{order_moves, HistoryTable, KillerMoves};
use crate::tt::{TTEntry, TTFlag, TranspositionTable};
use crate::types::{Score, SearchConfig, SearchResult, INF, MATE_SCORE, TIMEOUT_CHECK_INTERVAL};

/// Mutable search state owned by one `find_best_move` call.
///
/// Killers and history persist across the iterative-deepening
/// staircase on purpose: depth d+1 starts with depth d's discoveries.
pub struct SearchState {
    pub nodes: u64,
    pub start_time: Instant,
    pub time_limit_ms: u64,
    pub tt: TranspositionTable,
    pub killers: KillerMoves,
    pub history: HistoryTable,
}

impl SearchState {
    pub fn new(config: &SearchConfig) -> Self {
        Self {
            nodes: 0,
            start_time: Instant::now(),
            time_limit_ms: config.time_limit_ms,
            tt: if config.use_transposition_table {
                TranspositionTable::new(config.tt_size_mb)
            } else {
                TranspositionTable::disabled()
            },
            killers: KillerMoves::new(),
            history: HistoryTable::new(),
        }
    }

    fn elapsed_ms(&self) -> u64 {
        self.start_time.elapsed().as_millis() as u64
    }

    fn out_of_time(&self) -> bool {
        self.elapsed_ms() >= self.time_limit_ms
    }
}

/// Negamax with alpha-beta pruning and transposition-table cutoffs.
/// Returns a score from the side to move's perspective.
///
/// Depth is signed and the base case is exact equality with zero: a
/// call entered with a negative depth decrements past it and is
/// bounded by game over instead, searching the line exhaustively. The
/// forced-move path relies on this when `max_depth` is 0.
fn negamax(
    board: &mut Board,
    state: &mut SearchState,
    depth: i32,
    mut alpha: Score,
    mut beta: Score,
    ply: usize,
) -> Score {
    state.nodes += 1;
    // sample the clock every TIMEOUT_CHECK_INTERVAL nodes. The return
    // value after a timeout is immaterial: the driver throws away the
    // whole depth.
    if state.nodes % TIMEOUT_CHECK_INTERVAL == 0 && state.out_of_time() {
        return 0;
    }

    if depth == 0 || board.is_game_over() {
        return evaluate(board);
    }

    let hash = board.hash();
    let mut tt_move: Option<TileMove> = None;

    if let Some(entry) = state.tt.probe(hash) {
        // Entries from shallower searches are ignored outright. A
        // shallow best move is systematically biased and, fed back as
        // an ordering hint, makes deeper scores depend on search
        // history.
        if entry.depth >= depth {
            match entry.flag {
                TTFlag::Exact => return entry.score,
                TTFlag::LowerBound => alpha = alpha.max(entry.score),
                TTFlag::UpperBound => beta = beta.min(entry.score),
            }
            if alpha >= beta {
                return entry.score;
            }
            tt_move = entry.best_move;
        }
    }

    let mut moves = board.valid_moves();
    if moves.is_empty() {
        return evaluate(board);
    }

    order_moves(&mut moves, tt_move, &state.killers.at(ply), &state.history, ply);

    let mut best_score = -INF;
    let mut best_move = moves[0];
    let mut flag = TTFlag::UpperBound;

    for &mv in &moves {
        board.make_move(mv);
        let score = -negamax(board, state, depth - 1, -beta, -alpha, ply + 1);
        board.unmake_move(mv);

        if score > best_score {
            best_score = score;
            best_move = mv;

            if score > alpha {
                alpha = score;
                flag = TTFlag::Exact;
            }
        }

        if alpha >= beta {
            flag = TTFlag::LowerBound;
            state.killers.update(ply, best_move);
            state.history.update(best_move, depth);
            break;
        }
    }

    state.tt.store(
        hash,
        TTEntry { score: best_score, depth, flag, best_move: Some(best_move) },
    );

    best_score
}

/// Quiescence search. This game has no capture-like tactics to extend
/// past the horizon, so it reduces to the stand-pat score with the beta
/// clamp; kept as the seam where a tactical extension would go.
pub fn quiescence(board: &Board, state: &mut SearchState, _alpha: Score, beta: Score) -> Score {
    state.nodes += 1;

    let stand_pat = evaluate(board);
    if stand_pat >= beta {
        return beta;
    }
    stand_pat
}

/// Search the position and return the best move for the side to move.
///
/// Iterative deepening from depth 1 up to `config.max_depth`. A depth
/// interrupted by the deadline is discarded whole: the reported move
/// and score always come from the last fully completed depth.
pub fn find_best_move(board: &mut Board, config: &SearchConfig) -> SearchResult {
    let mut state = SearchState::new(config);
    let mut result = SearchResult::empty();

    let mut moves = board.valid_moves();

    if moves.is_empty() {
        result.score = evaluate(board);
        result.time_ms = state.elapsed_ms();
        return result;
    }

    if moves.len() == 1 {
        // Forced move, but the score still has to come from a real
        // search of the position behind it, not a static evaluation.
        // The depth is signed: with max_depth 0 it enters negamax at
        // -1 and the line is searched to the end of the game.
        let mv = moves[0];
        board.make_move(mv);
        let score = -negamax(board, &mut state, config.max_depth as i32 - 1, -INF, INF, 0);
        board.unmake_move(mv);

        result.best_move = Some(mv);
        result.score = score;
        result.depth = config.max_depth;
        result.nodes_searched = state.nodes;
        result.time_ms = state.elapsed_ms();
        result.tt_hits = state.tt.hits();
        result.tt_misses = state.tt.misses();
        return result;
    }

    let mut best_move = moves[0];
    let mut best_score = -INF;

    if config.use_iterative_deepening {
        for depth in 1..=config.max_depth {
            let depth_start_nodes = state.nodes;
            let mut alpha = -INF;
            let beta = INF;
            let mut current_best = moves[0];
            let mut current_score = -INF;

            // seed root ordering with what earlier depths learned
            if config.use_move_ordering && depth > 1 {
                order_moves(&mut moves, None, &state.killers.at(0), &state.history, 0);
            }

            let mut timed_out = false;
            for &mv in &moves {
                board.make_move(mv);
                let score = -negamax(board, &mut state, depth as i32 - 1, -beta, -alpha, 1);
                board.unmake_move(mv);

                // deadline check before the score is trusted: a move
                // searched across the deadline may be garbage
                if state.out_of_time() {
                    timed_out = true;
                    break;
                }

                if score > current_score {
                    current_score = score;
                    current_best = mv;
                    if score > alpha {
                        alpha = score;
                    }
                }
            }

            if timed_out {
                result.timeout = true;
                break;
            }

            // commit only fully completed depths
            best_move = current_best;
            best_score = current_score;
            result.depth = depth;
            result.nodes_searched += state.nodes - depth_start_nodes;

            if config.verbose {
                println!(
                    "Depth {}: score={} move={} nodes={} time={}ms",
                    depth,
                    best_score,
                    best_move,
                    state.nodes - depth_start_nodes,
                    state.elapsed_ms()
                );
            }

            if best_score.abs() > MATE_SCORE - 100 {
                break;
            }
        }

        if result.depth == 0 && !result.timeout {
            // max_depth of zero: nothing searched
            best_score = evaluate(board);
        }
    } else if config.max_depth == 0 {
        best_score = evaluate(board);
    } else {
        // single fixed-depth search
        if config.use_move_ordering {
            order_moves(&mut moves, None, &state.killers.at(0), &state.history, 0);
        }

        let mut alpha = -INF;
        let beta = INF;
        for &mv in &moves {
            board.make_move(mv);
            let score = -negamax(board, &mut state, config.max_depth as i32 - 1, -beta, -alpha, 1);
            board.unmake_move(mv);

            if score > best_score {
                best_score = score;
                best_move = mv;
                if score > alpha {
                    alpha = score;
                }
            }
        }

        result.depth = config.max_depth;
        result.nodes_searched = state.nodes;
    }

    result.best_move = Some(best_move);
    result.score = best_score;
    result.time_ms = state.elapsed_ms();
    result.tt_hits = state.tt.hits();
    result.tt_misses = state.tt.misses();

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Hex, ALL_HEXES};

    fn quick_config(depth: u8) -> SearchConfig {
        SearchConfig { max_depth: depth, tt_size_mb: 8, ..SearchConfig::default() }
    }

    #[test]
    fn test_search_finds_move() {
        let mut board = Board::new();
        let result = find_best_move(&mut board, &quick_config(2));
        assert!(result.best_move.is_some());
        assert!(result.nodes_searched > 0);
        assert_eq!(result.depth, 2);
        assert!(!result.timeout);
        // board restored by make/unmake pairs
        assert_eq!(board, Board::new());
    }

    #[test]
    fn test_reported_move_is_legal() {
        let mut board = Board::new();
        let result = find_best_move(&mut board, &quick_config(3));
        let mv = result.best_move.unwrap();
        assert!(board.is_valid_move(mv));
    }

    #[test]
    fn test_no_moves_returns_static_eval() {
        let mut board = Board::new();
        for hex in ALL_HEXES {
            board.set_hex_value(hex, 1);
        }
        let result = find_best_move(&mut board, &quick_config(4));
        assert!(result.best_move.is_none());
        assert_eq!(result.score, evaluate(&board));
        assert_eq!(result.depth, 0);
    }

    #[test]
    fn test_single_move_is_searched_not_evaluated() {
        let mut board = Board::new();
        // everything filled except h18, one tile left
        board.load_position(
            "h0:1,h1:1,h2:1,h3:1,h4:1,h5:1,h6:1,h7:1,h8:1,h9:1,h10:1,h11:1,h12:1,h13:1,h14:1,h15:1,h16:1,h17:1|p1:1|p2:|turn:1",
        );
        assert_eq!(board.valid_moves().len(), 1);

        let result = find_best_move(&mut board, &quick_config(4));
        let mv = result.best_move.unwrap();
        assert_eq!(mv.hex().to_index(), 18);
        assert_eq!(mv.tile_value(), 1);
        // the score reflects the position after the forced move
        board.make_move(mv);
        assert!(board.is_game_over());
        assert_eq!(result.score, -evaluate(&board));
    }

    #[test]
    fn test_zero_time_limit_times_out() {
        let mut board = Board::new();
        let config = SearchConfig { time_limit_ms: 0, tt_size_mb: 8, ..SearchConfig::default() };
        let result = find_best_move(&mut board, &config);
        assert!(result.timeout);
        assert!(result.best_move.is_some());
    }

    #[test]
    fn test_depth_zero_is_static_eval() {
        let mut board = Board::new();
        let config = SearchConfig {
            max_depth: 0,
            use_iterative_deepening: false,
            tt_size_mb: 8,
            ..SearchConfig::default()
        };
        let result = find_best_move(&mut board, &config);
        assert_eq!(result.score, evaluate(&board));
        assert_eq!(result.depth, 0);
    }

    #[test]
    fn test_search_is_deterministic() {
        let mut board = Board::new();
        let first = find_best_move(&mut board, &quick_config(3));
        let second = find_best_move(&mut board, &quick_config(3));
        assert_eq!(first.best_move, second.best_move);
        assert_eq!(first.score, second.score);
        assert_eq!(first.nodes_searched, second.nodes_searched);
    }

    #[test]
    fn test_negamax_depth_zero_is_evaluate() {
        let mut board = Board::new();
        let mut state = SearchState::new(&quick_config(1));
        let score = negamax(&mut board, &mut state, 0, -INF, INF, 0);
        assert_eq!(score, evaluate(&board));
        assert_eq!(state.nodes, 1);
    }

    #[test]
    fn test_negative_depth_searches_to_game_end() {
        // two empty hexes, four legal moves: a negative depth must
        // keep recursing past zero and agree with any depth that
        // covers the whole remaining game
        let mut board = Board::new();
        board.load_position(
            "h0:1,h1:1,h2:1,h3:1,h4:1,h5:1,h6:1,h7:1,h8:1,h9:1,h10:1,h11:1,h12:1,h13:1,h14:1,h15:1,h16:1|p1:2,3|p2:5|turn:1",
        );
        assert_eq!(board.valid_moves().len(), 4);

        let mut a = SearchState::new(&quick_config(1));
        let exhaustive = negamax(&mut board, &mut a, -1, -INF, INF, 0);
        let mut b = SearchState::new(&quick_config(1));
        let deep = negamax(&mut board, &mut b, 10, -INF, INF, 0);
        assert_eq!(exhaustive, deep);
        assert!(a.nodes > 1, "negative depth must not stop at the root");
    }

    #[test]
    fn test_negamax_restores_board() {
        let mut board = Board::new();
        board.make_move(TileMove::new(Hex::new(4), 3));
        let snapshot = board;
        let mut state = SearchState::new(&quick_config(3));
        negamax(&mut board, &mut state, 3, -INF, INF, 0);
        assert_eq!(board, snapshot);
        assert_eq!(board.hash(), snapshot.hash());
    }

    #[test]
    fn test_quiescence_stand_pat() {
        let mut board = Board::new();
        board.load_position("h4:9,h9:1,h13:2|p1:1,2|p2:1,2|turn:1");
        let mut state = SearchState::new(&quick_config(1));
        let eval = evaluate(&board);
        assert_eq!(quiescence(&board, &mut state, -INF, INF), eval);
        // beta clamp
        assert_eq!(quiescence(&board, &mut state, -INF, eval - 1), eval - 1);
        assert_eq!(state.nodes, 2);
    }

    #[test]
    fn test_tt_stats_reported() {
        let mut board = Board::new();
        let result = find_best_move(&mut board, &quick_config(4));
        assert!(result.tt_misses > 0);
        let off = find_best_move(
            &mut board,
            &SearchConfig {
                use_transposition_table: false,
                ..quick_config(4)
            },
        );
        assert_eq!(off.tt_hits, 0);
        assert_eq!(off.tt_misses, 0);
    }
}

// Why whole depths are discarded on timeout: after the deadline every
// deeper negamax call starts returning the 0 sentinel, so any score
// produced mid-depth mixes real evaluations with zeros. Only results
// committed at a completed depth boundary are trustworthy, which is
// also why the reported best move can never come from a partial
// iteration.
