//! Win detection.

use crate::types::{Board, Player};
use tracing::instrument;

/// Checks whether the move just made by `mover` ended the game.
///
/// If the opponent has no pieces left the mover wins. If the mover has no
/// pieces left the opponent wins. Otherwise the game continues.
#[instrument(skip(board))]
pub fn check_winner(board: &Board, mover: Player) -> Option<Player> {
    if board.count_pieces(mover.opponent()) == 0 {
        Some(mover)
    } else if board.count_pieces(mover) == 0 {
        Some(mover.opponent())
    } else {
        None
    }
}
