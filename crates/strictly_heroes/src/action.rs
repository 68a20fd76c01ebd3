//! First-class move and error types.
//!
//! A [`Move`] is both the request a player submits and the record appended
//! to the game's history once it is accepted.

use crate::character::MoveToken;
use crate::types::{PieceId, Player};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// A move: a player moving one of their pieces in a direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// The player making the move.
    pub player: Player,
    /// The piece being moved.
    pub piece: PieceId,
    /// Direction token.
    pub token: MoveToken,
}

impl Move {
    /// Creates a new move.
    #[instrument]
    pub fn new(player: Player, piece: PieceId, token: MoveToken) -> Self {
        Self {
            player,
            piece,
            token,
        }
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{} moved {}", self.player, self.piece, self.token)
    }
}

/// Reason a request was rejected. Rejections never change game state.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum MoveError {
    /// No piece with this id belongs to the requesting player.
    #[display("Character does not exist.")]
    UnknownPiece,

    /// Token not in the piece's profile, or destination off the board or
    /// held by the mover's own piece.
    #[display("Invalid move.")]
    InvalidMove,

    /// Move submitted out of turn under the strict turn policy.
    #[display("Not your turn.")]
    NotYourTurn(#[error(not(source))] Player),

    /// Roster could not be placed on the board.
    #[display("Invalid roster: {}", _0)]
    InvalidRoster(#[error(not(source))] String),
}
