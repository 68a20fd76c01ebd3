//! Roster bound invariant: no side fields more pieces than a home row holds.

use super::Invariant;
use crate::game::GameState;
use crate::types::{BOARD_SIZE, Player};

/// Invariant: each side has at most five pieces on the board.
///
/// Pieces are only ever placed at initialization and removed by capture,
/// so the count can never grow past the roster size.
pub struct RosterBoundInvariant;

impl Invariant<GameState> for RosterBoundInvariant {
    fn holds(state: &GameState) -> bool {
        [Player::A, Player::B]
            .into_iter()
            .all(|player| state.board().count_pieces(player) <= BOARD_SIZE)
    }

    fn description() -> &'static str {
        "Each side has at most five pieces"
    }
}
