//! Legality of a resolved destination.

use crate::action::MoveError;
use crate::types::{Board, Player, Position};
use tracing::{debug, instrument};

/// Checks that `dest` is a legal target for a move by `player`.
///
/// The destination must be on the board and must not hold one of the
/// player's own pieces. An opponent piece is a capture and therefore legal.
/// Intervening squares are never inspected.
///
/// # Errors
///
/// Returns [`MoveError::InvalidMove`] if either rule fails.
#[instrument(skip(board))]
pub fn check_destination(board: &Board, player: Player, dest: Position) -> Result<(), MoveError> {
    let Some(square) = board.get(dest) else {
        debug!("Destination off the board");
        return Err(MoveError::InvalidMove);
    };
    if square.is_occupied_by(player) {
        debug!("Destination held by own piece");
        return Err(MoveError::InvalidMove);
    }
    Ok(())
}
