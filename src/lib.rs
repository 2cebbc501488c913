//! Search engine for Hexuki, a two-player tile-placement game on a
//! 19-cell hexagonal board. Bitboard position with incremental Zobrist
//! hashing, negamax search with alpha-beta pruning, transposition
//! table, killer/history move ordering and iterative deepening under a
//! wall-clock deadline.

pub mod board;
pub mod console;
pub mod evaluation;
pub mod movegen;
pub mod search;
pub mod tt;
pub mod types;
