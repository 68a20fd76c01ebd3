//! First-class invariants for the heroes grid.
//!
//! Invariants are properties of [`GameState`](crate::GameState) that every
//! accepted move must preserve. The turn controller checks them after each
//! commit.

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants checked together. Implemented for tuples.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set, collecting every violation.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

fn collect(checks: &[(bool, &'static str)]) -> Result<(), Vec<InvariantViolation>> {
    let violations: Vec<_> = checks
        .iter()
        .filter(|(holds, _)| !holds)
        .map(|(_, description)| InvariantViolation::new(*description))
        .collect();
    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}

impl<S, I1, I2, I3> InvariantSet<S> for (I1, I2, I3)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
    I3: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        collect(&[
            (I1::holds(state), I1::description()),
            (I2::holds(state), I2::description()),
            (I3::holds(state), I3::description()),
        ])
    }
}

impl<S, I1, I2> InvariantSet<S> for (I1, I2)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        collect(&[
            (I1::holds(state), I1::description()),
            (I2::holds(state), I2::description()),
        ])
    }
}

pub mod roster_bound;
pub mod turn_follows_mover;
pub mod unique_piece;

pub use roster_bound::RosterBoundInvariant;
pub use turn_follows_mover::TurnFollowsMoverInvariant;
pub use unique_piece::UniquePieceInvariant;

/// All heroes grid invariants as a composable set.
pub type HeroGridInvariants = (
    UniquePieceInvariant,
    RosterBoundInvariant,
    TurnFollowsMoverInvariant,
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::{CharacterKind, MoveToken};
    use crate::game::{Game, GameState, Roster};
    use crate::types::{PieceId, Player};

    #[test]
    fn test_invariant_set_holds_for_new_game() {
        assert!(HeroGridInvariants::check_all(&GameState::new()).is_ok());
    }

    #[test]
    fn test_invariant_set_holds_after_moves() {
        let roster = Roster::parse(&["P", "H1", "H2"]).unwrap();
        let mut game = Game::new();
        game.initialize(&roster, &roster);
        game.submit_move(Player::A, PieceId::new(1, CharacterKind::Hero1), MoveToken::B);
        game.submit_move(Player::B, PieceId::new(2, CharacterKind::Hero2), MoveToken::FL);
        assert!(HeroGridInvariants::check_all(game.state()).is_ok());
    }

    #[test]
    fn test_two_invariants_as_set() {
        type TwoInvariants = (UniquePieceInvariant, RosterBoundInvariant);
        assert!(TwoInvariants::check_all(&GameState::new()).is_ok());
    }
}
