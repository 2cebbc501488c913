use std::sync::LazyLock;

use super::hex::NUM_HEXES;
use super::player::Player;
use super::tiles::MAX_TILE_VALUE;

struct ZobristKeys {
    /// Zobrist keys: [hex][tile value]. Row 0 of the value axis is the
    /// empty sentinel and stays unused.
    tile: [[u64; MAX_TILE_VALUE as usize + 1]; NUM_HEXES],
    /// one key per side to move.
    side: [u64; 2],
}

static KEYS: LazyLock<ZobristKeys> = LazyLock::new(|| {
    let mut rng = XorShift64(0x9E3779B97F4A7C15); // fixed seed

    let mut tile = [[0u64; MAX_TILE_VALUE as usize + 1]; NUM_HEXES];
    for hex_keys in &mut tile {
        for key in hex_keys.iter_mut().skip(1) {
            *key = rng.next();
        }
    }

    let side = [rng.next(), rng.next()];

    ZobristKeys { tile, side }
});

/// Force-init all Zobrist keys. Can be called at startup, but keys are
/// also lazily initialized on first access.
pub fn init_zobrist() {
    LazyLock::force(&KEYS);
}

#[inline]
pub fn tile_key(hex: usize, value: u8) -> u64 {
    KEYS.tile[hex][value as usize]
}

#[inline]
pub fn side_key(player: Player) -> u64 {
    KEYS.side[player.to_index()]
}

/// simple xorshift64 PRNG
struct XorShift64(u64);

impl XorShift64 {
    fn next(&mut self) -> u64 {
        self.0 ^= self.0 << 13;
        self.0 ^= self.0 >> 7;
        self.0 ^= self.0 << 17;
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_nonzero() {
        init_zobrist();
        assert_ne!(tile_key(0, 1), 0);
        assert_ne!(tile_key(18, 9), 0);
        assert_ne!(side_key(Player::P1), 0);
        assert_ne!(side_key(Player::P2), 0);
    }

    #[test]
    fn test_keys_unique() {
        init_zobrist();
        // different hex/value combos produce different keys
        let k1 = tile_key(9, 1);
        let k2 = tile_key(9, 2);
        let k3 = tile_key(10, 1);
        assert_ne!(k1, k2);
        assert_ne!(k1, k3);
        assert_ne!(side_key(Player::P1), side_key(Player::P2));
    }

    #[test]
    fn test_xor_cancellation() {
        init_zobrist();
        let mut hash = 0u64;
        let key = tile_key(4, 7);
        hash ^= key;
        hash ^= key;
        assert_eq!(hash, 0);
    }

    #[test]
    fn test_deterministic_across_calls() {
        init_zobrist();
        assert_eq!(tile_key(3, 3), tile_key(3, 3));
    }
}

// Fixed seed: every run generates the same keys, so equal positions
// hash equal across runs and search results are reproducible.
//
// A position's hash is the XOR of one key per placed tile plus the key
// of the side to move. make/unmake update it incrementally: XOR in the
// placed tile's key, XOR out the mover's side key, XOR in the
// opponent's. XOR is its own inverse, so unmake applies the same three
// XORs and lands back on the previous hash.
