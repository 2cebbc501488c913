use crate::board::TileMove;

pub type Score = i32;

pub const INF: Score = 1_000_000;
pub const MATE_SCORE: Score = 900_000;
/// plies the killer table covers; searches never get near this deep.
pub const MAX_PLY: usize = 50;
/// sample the wall clock every this many nodes.
pub const TIMEOUT_CHECK_INTERVAL: u64 = 1000;

/// Knobs for a single `find_best_move` call.
#[derive(Clone, Debug)]
pub struct SearchConfig {
    /// upper bound on iterative-deepening depth.
    pub max_depth: u8,
    /// wall-clock deadline for the whole call, in milliseconds.
    pub time_limit_ms: u64,
    /// if false, search directly at `max_depth`.
    pub use_iterative_deepening: bool,
    /// if false, skip ordering at the root. Inner nodes stay ordered.
    pub use_move_ordering: bool,
    /// if false, transposition table probes and stores are no-ops.
    pub use_transposition_table: bool,
    /// target transposition table capacity in megabytes.
    pub tt_size_mb: usize,
    /// print a per-depth diagnostic line on stdout.
    pub verbose: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_depth: 20,
            time_limit_ms: 30_000,
            use_iterative_deepening: true,
            use_move_ordering: true,
            use_transposition_table: true,
            tt_size_mb: 128,
            verbose: false,
        }
    }
}

/// What a search call returns.
#[derive(Clone, Debug)]
pub struct SearchResult {
    /// best move found; None when the side to move has no legal move.
    pub best_move: Option<TileMove>,
    /// score from the side to move's perspective.
    pub score: Score,
    /// nodes searched across all completed depths.
    pub nodes_searched: u64,
    pub time_ms: u64,
    /// last fully completed depth.
    pub depth: u8,
    /// true when the deadline cut a depth short.
    pub timeout: bool,
    pub tt_hits: u64,
    pub tt_misses: u64,
}

impl SearchResult {
    pub(crate) fn empty() -> Self {
        Self {
            best_move: None,
            score: 0,
            nodes_searched: 0,
            time_ms: 0,
            depth: 0,
            timeout: false,
            tt_hits: 0,
            tt_misses: 0,
        }
    }
}
