use std::fmt;
use std::ops::Not;

// the two sides. P1 moves first from the initial position.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum Player {
    P1,
    P2,
}

impl Player {
    #[inline]
    pub fn to_index(self) -> usize {
        self as usize
    }

    /// numeric form used by the position codec (`turn:1` / `turn:2`).
    #[inline]
    pub fn to_number(self) -> u8 {
        match self {
            Player::P1 => 1,
            Player::P2 => 2,
        }
    }

    #[inline]
    pub fn from_number(n: u8) -> Option<Player> {
        match n {
            1 => Some(Player::P1),
            2 => Some(Player::P2),
            _ => None,
        }
    }
}

impl Not for Player {
    type Output = Player;

    #[inline]
    fn not(self) -> Player {
        match self {
            Player::P1 => Player::P2,
            Player::P2 => Player::P1,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.to_number())
    }
}
