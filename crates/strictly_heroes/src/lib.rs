//! Strictly Heroes - rules engine for a two-player 5x5 grid game.
//!
//! Each side fields up to five characters on its home row. Characters move
//! according to a static movement profile, capture by landing on an
//! opposing piece, and a side loses when it has no pieces left.
//!
//! # Architecture
//!
//! - **Types**: board, squares, players and piece ids
//! - **Character**: movement profile registry
//! - **Movement**: pure destination resolution
//! - **Rules**: legality, capture and win detection
//! - **Game**: the turn controller, sole mutator of [`GameState`]
//! - **Invariants**: properties checked after every accepted move
//!
//! # Example
//!
//! ```
//! use strictly_heroes::{CharacterKind, Game, MoveOutcome, MoveToken, PieceId, Player, Roster};
//!
//! let mut game = Game::new();
//! let roster = Roster::parse(&["P", "H1"]).unwrap();
//! game.initialize(&roster, &roster);
//!
//! let outcome = game.submit_move(Player::A, PieceId::new(1, CharacterKind::Hero1), MoveToken::B);
//! assert!(matches!(outcome, MoveOutcome::Updated { current_player: Player::B, .. }));
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod character;
mod game;
pub mod invariants;
mod movement;
pub mod rules;
mod types;

pub use action::{Move, MoveError};
pub use character::{CharacterKind, Displacement, MoveToken, MovementProfile};
pub use game::{Game, GameState, GameStatus, MoveOutcome, Roster, TurnPolicy};
pub use movement::resolve;
pub use types::{BOARD_SIZE, Board, ParseError, PieceId, Player, Position, Square};
