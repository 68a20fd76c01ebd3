//! Turn invariant: after an accepted move the turn belongs to the mover's opponent.

use super::Invariant;
use crate::game::GameState;

/// Invariant: while the game is running, the player to move is the
/// opponent of whoever made the last accepted move.
pub struct TurnFollowsMoverInvariant;

impl Invariant<GameState> for TurnFollowsMoverInvariant {
    fn holds(state: &GameState) -> bool {
        if state.is_over() {
            return true;
        }
        match state.history().last() {
            Some(last) => state.current_player() == last.player.opponent(),
            None => true,
        }
    }

    fn description() -> &'static str {
        "Turn passes to the opponent of the last mover"
    }
}
