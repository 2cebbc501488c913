use std::collections::HashMap;

use crate::board::TileMove;
use crate::types::Score;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TTFlag {
    Exact,
    LowerBound, // beta cutoff (score >= beta)
    UpperBound, // failed low (score <= alpha)
}

#[derive(Clone, Copy, Debug)]
pub struct TTEntry {
    pub score: Score,
    /// depth this entry was searched to. Signed because exhaustive
    /// forced-move lines run below zero. Entries from shallower
    /// searches than the current one must not be trusted, not even as
    /// an ordering hint.
    pub depth: i32,
    pub flag: TTFlag,
    pub best_move: Option<TileMove>,
}

/// Cache of previously searched positions keyed by Zobrist hash.
///
/// The map reserves capacity for roughly `size_mb` of entries up front
/// and is allowed to grow past the target instead of evicting, trading
/// a strict memory bound for stable results.
pub struct TranspositionTable {
    table: HashMap<u64, TTEntry>,
    hits: u64,
    misses: u64,
    enabled: bool,
}

impl TranspositionTable {
    /// create a table targeting `size_mb` megabytes of entries.
    pub fn new(size_mb: usize) -> Self {
        let capacity = size_mb * 1024 * 1024 / std::mem::size_of::<TTEntry>();
        Self {
            table: HashMap::with_capacity(capacity),
            hits: 0,
            misses: 0,
            enabled: true,
        }
    }

    /// a table whose probes and stores are no-ops, for searches run
    /// with the transposition table switched off.
    pub fn disabled() -> Self {
        Self { table: HashMap::new(), hits: 0, misses: 0, enabled: false }
    }

    /// look up a position, counting the hit or miss.
    pub fn probe(&mut self, hash: u64) -> Option<TTEntry> {
        if !self.enabled {
            return None;
        }
        match self.table.get(&hash) {
            Some(entry) => {
                self.hits += 1;
                Some(*entry)
            }
            None => {
                self.misses += 1;
                None
            }
        }
    }

    /// Store with depth-preferred replacement: an existing deeper entry
    /// for the same hash wins over the new one.
    pub fn store(&mut self, hash: u64, entry: TTEntry) {
        if !self.enabled {
            return;
        }
        match self.table.entry(hash) {
            std::collections::hash_map::Entry::Occupied(mut slot) => {
                if entry.depth >= slot.get().depth {
                    slot.insert(entry);
                }
            }
            std::collections::hash_map::Entry::Vacant(slot) => {
                slot.insert(entry);
            }
        }
    }

    pub fn clear(&mut self) {
        self.table.clear();
        self.hits = 0;
        self.misses = 0;
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }
}


// Zobrist collisions are treated as impossible for game-tree purposes,
// so the hash itself is the key and there is no verification field.
// Depth-preferred replacement keeps the most expensive result for a
// position; growth past the size target means a long search never
// throws away deep entries mid-iteration.
