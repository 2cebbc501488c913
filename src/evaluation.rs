use crate::board::Board;
use crate::types::Score;

/// Static leaf evaluation: the raw score difference from the side to
/// move's perspective. No mobility or threat terms; the game's scoring
/// is monotone in completed chains, so material carries the weight and
/// search depth does the rest.
pub fn evaluate(board: &Board) -> Score {
    let us = board.side_to_move();
    board.score(us) - board.score(!us)
}
