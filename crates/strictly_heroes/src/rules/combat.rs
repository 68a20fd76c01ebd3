//! Capture resolution.

use crate::action::MoveError;
use crate::types::{Board, PieceId, Player, Position, Square};
use tracing::{info, instrument};

/// Moves `piece` from `origin` to `dest`, capturing any opponent piece there.
///
/// Capture is unconditional: whatever opposing piece stood on `dest` is
/// removed and returned. The caller must have checked legality first.
///
/// # Errors
///
/// Returns [`MoveError::InvalidMove`] if `dest` is off the board, in which
/// case the board is untouched.
#[instrument(skip(board))]
pub fn resolve_combat(
    board: &mut Board,
    player: Player,
    piece: PieceId,
    origin: Position,
    dest: Position,
) -> Result<Option<PieceId>, MoveError> {
    let captured = match board.get(dest) {
        Some(Square::Occupied { owner, piece }) if owner == player.opponent() => Some(piece),
        _ => None,
    };

    let mover = Square::Occupied {
        owner: player,
        piece,
    };
    board.set(dest, mover).map_err(|_| MoveError::InvalidMove)?;
    board.set(origin, Square::Empty).map_err(|_| MoveError::InvalidMove)?;

    if let Some(captured) = captured {
        info!(%captured, %dest, "Piece captured");
    }
    Ok(captured)
}
