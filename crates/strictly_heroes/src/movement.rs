//! Movement resolution: (kind, origin, token) to destination.
//!
//! Resolution knows nothing about occupancy and does not check bounds; a
//! destination may lie off the board and is rejected later by the legality
//! rules.

use crate::character::{CharacterKind, MoveToken};
use crate::types::Position;
use tracing::{debug, instrument};

/// Resolves the destination of a move.
///
/// Returns `None` if `token` is not part of the kind's movement profile.
#[instrument]
pub fn resolve(kind: CharacterKind, origin: Position, token: MoveToken) -> Option<Position> {
    let Some(displacement) = kind.profile().displacement(token) else {
        debug!("Token not in movement profile");
        return None;
    };
    Some(Position::new(
        origin.row + displacement.d_row,
        origin.col + displacement.d_col,
    ))
}
