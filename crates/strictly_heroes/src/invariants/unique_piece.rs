//! Unique piece invariant: no piece stands on two squares.

use super::Invariant;
use crate::game::GameState;
use crate::types::Player;
use std::collections::HashSet;

/// Invariant: each `(owner, piece)` occupies at most one square.
pub struct UniquePieceInvariant;

impl Invariant<GameState> for UniquePieceInvariant {
    fn holds(state: &GameState) -> bool {
        let mut seen = HashSet::new();
        [Player::A, Player::B].into_iter().all(|player| {
            state
                .board()
                .pieces(player)
                .all(|(_, piece)| seen.insert((player, piece)))
        })
    }

    fn description() -> &'static str {
        "Every piece occupies at most one square"
    }
}
