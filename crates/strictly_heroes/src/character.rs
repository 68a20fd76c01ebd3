//! Character registry: piece kinds and their movement profiles.
//!
//! Each kind maps to a static table of move tokens and displacements.
//! "Forward" decreases the row index for both players.

use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Kind of character, selecting a movement profile.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
pub enum CharacterKind {
    /// Single-step orthogonal mover.
    #[strum(serialize = "P")]
    #[serde(rename = "P")]
    Pawn,
    /// Double-step orthogonal mover.
    #[strum(serialize = "H1")]
    #[serde(rename = "H1")]
    Hero1,
    /// Double-step diagonal mover.
    #[strum(serialize = "H2")]
    #[serde(rename = "H2")]
    Hero2,
}

impl CharacterKind {
    /// Returns the movement profile for this kind.
    pub fn profile(self) -> &'static MovementProfile {
        match self {
            CharacterKind::Pawn => &PAWN,
            CharacterKind::Hero1 => &HERO1,
            CharacterKind::Hero2 => &HERO2,
        }
    }
}

/// A direction code submitted with a move.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
pub enum MoveToken {
    /// Left.
    L,
    /// Right.
    R,
    /// Forward (towards row 0).
    F,
    /// Backward (towards row 4).
    B,
    /// Forward-left.
    FL,
    /// Forward-right.
    FR,
    /// Backward-left.
    BL,
    /// Backward-right.
    BR,
}

/// Row and column offset applied by a move token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Displacement {
    /// Row offset.
    pub d_row: i32,
    /// Column offset.
    pub d_col: i32,
}

const fn disp(d_row: i32, d_col: i32) -> Displacement {
    Displacement { d_row, d_col }
}

/// Allowed tokens for a kind and the displacement of each.
#[derive(Debug)]
pub struct MovementProfile {
    moves: &'static [(MoveToken, Displacement)],
}

impl MovementProfile {
    /// Displacement for `token`, or `None` if the token is not allowed.
    #[instrument(skip(self))]
    pub fn displacement(&self, token: MoveToken) -> Option<Displacement> {
        self.moves
            .iter()
            .find(|(allowed, _)| *allowed == token)
            .map(|(_, displacement)| *displacement)
    }

    /// Tokens this profile accepts.
    pub fn tokens(&self) -> impl Iterator<Item = MoveToken> + '_ {
        self.moves.iter().map(|(token, _)| *token)
    }
}

static PAWN: MovementProfile = MovementProfile {
    moves: &[
        (MoveToken::L, disp(0, -1)),
        (MoveToken::R, disp(0, 1)),
        (MoveToken::F, disp(-1, 0)),
        (MoveToken::B, disp(1, 0)),
    ],
};

static HERO1: MovementProfile = MovementProfile {
    moves: &[
        (MoveToken::L, disp(0, -2)),
        (MoveToken::R, disp(0, 2)),
        (MoveToken::F, disp(-2, 0)),
        (MoveToken::B, disp(2, 0)),
    ],
};

static HERO2: MovementProfile = MovementProfile {
    moves: &[
        (MoveToken::FL, disp(-2, -2)),
        (MoveToken::FR, disp(-2, 2)),
        (MoveToken::BL, disp(2, -2)),
        (MoveToken::BR, disp(2, 2)),
    ],
};

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_kind_tokens_round_trip_strings() {
        assert_eq!("P".parse::<CharacterKind>(), Ok(CharacterKind::Pawn));
        assert_eq!("H2".parse::<CharacterKind>(), Ok(CharacterKind::Hero2));
        assert_eq!(CharacterKind::Hero1.to_string(), "H1");
        assert!("H3".parse::<CharacterKind>().is_err());
    }

    #[test]
    fn test_every_profile_has_four_moves() {
        for kind in CharacterKind::iter() {
            assert_eq!(kind.profile().tokens().count(), 4, "{kind}");
        }
    }

    #[test]
    fn test_hero2_is_diagonal_only() {
        let profile = CharacterKind::Hero2.profile();
        for token in [MoveToken::L, MoveToken::R, MoveToken::F, MoveToken::B] {
            assert_eq!(profile.displacement(token), None);
        }
        for token in profile.tokens() {
            let d = profile.displacement(token).unwrap();
            assert_eq!(d.d_row.abs(), 2);
            assert_eq!(d.d_col.abs(), 2);
        }
    }

    #[test]
    fn test_orthogonal_magnitudes() {
        let pawn = CharacterKind::Pawn.profile();
        let hero = CharacterKind::Hero1.profile();
        assert_eq!(pawn.displacement(MoveToken::F), Some(disp(-1, 0)));
        assert_eq!(hero.displacement(MoveToken::F), Some(disp(-2, 0)));
        assert_eq!(pawn.displacement(MoveToken::FL), None);
    }
}
