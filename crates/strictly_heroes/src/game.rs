//! Turn controller: the only code that mutates game state.
//!
//! A move runs as one synchronous step: locate the piece, resolve the
//! destination, check legality, commit with capture, check termination,
//! then hand the turn to the mover's opponent. Any rejection leaves the
//! state untouched.

use crate::action::{Move, MoveError};
use crate::character::{CharacterKind, MoveToken};
use crate::invariants::{HeroGridInvariants, InvariantSet};
use crate::movement;
use crate::rules;
use crate::types::{BOARD_SIZE, Board, PieceId, Player, Position, Square};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// Current status of the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    /// Moves are accepted.
    InProgress,
    /// Terminal; further moves are ignored.
    Over {
        /// Side that won.
        winner: Player,
    },
}

/// Whether the engine checks that the submitting player holds the turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnPolicy {
    /// Any player may move at any time; the turn still passes to the
    /// mover's opponent after an accepted move.
    #[default]
    Permissive,
    /// Moves by the player not holding the turn are rejected.
    Strict,
}

/// Ordered list of character kinds placed on a home row.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Roster(Vec<CharacterKind>);

impl Roster {
    /// Creates a roster from character kinds.
    ///
    /// # Errors
    ///
    /// Returns [`MoveError::InvalidRoster`] if there are more kinds than
    /// columns on the board.
    pub fn new(kinds: Vec<CharacterKind>) -> Result<Self, MoveError> {
        if kinds.len() > BOARD_SIZE {
            return Err(MoveError::InvalidRoster(format!(
                "{} characters do not fit on a row of {}",
                kinds.len(),
                BOARD_SIZE
            )));
        }
        Ok(Self(kinds))
    }

    /// Parses character tokens such as `"P"`, `"H1"`, `"H2"`.
    ///
    /// # Errors
    ///
    /// Returns [`MoveError::InvalidRoster`] on an unknown token or an
    /// oversized roster.
    #[instrument(skip(tokens))]
    pub fn parse<S: AsRef<str>>(tokens: &[S]) -> Result<Self, MoveError> {
        let kinds = tokens
            .iter()
            .map(|token| {
                let token = token.as_ref();
                token.parse::<CharacterKind>().map_err(|_| {
                    MoveError::InvalidRoster(format!("unknown character {:?}", token))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(kinds)
    }

    /// Character kinds, left to right.
    pub fn kinds(&self) -> &[CharacterKind] {
        &self.0
    }

    /// Piece ids this roster produces, left to right.
    pub fn pieces(&self) -> impl Iterator<Item = PieceId> + '_ {
        self.0
            .iter()
            .enumerate()
            .map(|(index, kind)| PieceId::new(index, *kind))
    }
}

/// Complete game state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub(crate) board: Board,
    pub(crate) current_player: Player,
    pub(crate) status: GameStatus,
    pub(crate) history: Vec<Move>,
}

impl GameState {
    /// Creates an empty game with A to move.
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            current_player: Player::A,
            status: GameStatus::InProgress,
            history: Vec::new(),
        }
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the player whose turn it is.
    pub fn current_player(&self) -> Player {
        self.current_player
    }

    /// Returns the game status.
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// True once a side has been eliminated.
    pub fn is_over(&self) -> bool {
        self.status != GameStatus::InProgress
    }

    /// Returns the accepted moves, oldest first.
    pub fn history(&self) -> &[Move] {
        &self.history
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

/// What a call into the engine produced, for the caller to deliver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveOutcome {
    /// A fresh game was set up.
    Initialized {
        /// Starting board.
        board: Board,
        /// Player to move first.
        current_player: Player,
    },
    /// A move was accepted and the game continues.
    Updated {
        /// Board after the move.
        board: Board,
        /// Player to move next.
        current_player: Player,
        /// All accepted moves so far.
        history: Vec<Move>,
    },
    /// A move was accepted and ended the game.
    GameOver {
        /// Winning side.
        winner: Player,
    },
    /// The request was rejected; state is unchanged.
    Rejected {
        /// Why.
        reason: MoveError,
    },
    /// The game is over and the move had no effect.
    Ignored,
}

/// Heroes grid game engine.
#[derive(Debug, Clone, Default)]
pub struct Game {
    state: GameState,
    policy: TurnPolicy,
}

impl Game {
    /// Creates a game with an empty board and the permissive turn policy.
    #[instrument]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a game with the given turn policy.
    #[instrument]
    pub fn with_policy(policy: TurnPolicy) -> Self {
        Self {
            state: GameState::new(),
            policy,
        }
    }

    /// Returns the current game state.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Returns the turn policy.
    pub fn policy(&self) -> TurnPolicy {
        self.policy
    }

    /// Resets the game and places both rosters on their home rows.
    #[instrument(skip(self))]
    pub fn initialize(&mut self, roster_a: &Roster, roster_b: &Roster) -> MoveOutcome {
        let mut board = Board::new();
        for (player, roster) in [(Player::A, roster_a), (Player::B, roster_b)] {
            let row = player.home_row() as i32;
            for (col, piece) in roster.pieces().enumerate() {
                let square = Square::Occupied {
                    owner: player,
                    piece,
                };
                // Roster length is bounded by the row width.
                if let Err(e) = board.set(Position::new(row, col as i32), square) {
                    warn!(error = e, %player, col, "Roster overflowed its home row");
                }
            }
        }

        self.state = GameState {
            board,
            ..GameState::new()
        };

        info!(
            a = roster_a.kinds().len(),
            b = roster_b.kinds().len(),
            "Game initialized"
        );
        debug!(board = %self.state.board.display());

        MoveOutcome::Initialized {
            board: self.state.board.clone(),
            current_player: self.state.current_player,
        }
    }

    /// Submits a move and reports what happened.
    #[instrument(skip_all, fields(player = %player, piece = %piece, token = %token))]
    pub fn submit_move(&mut self, player: Player, piece: PieceId, token: MoveToken) -> MoveOutcome {
        self.play(Move::new(player, piece, token))
    }

    /// Submits a prepared [`Move`] and reports what happened.
    #[instrument(skip_all, fields(mv = %mv))]
    pub fn play(&mut self, mv: Move) -> MoveOutcome {
        self.attempt(mv.player, Some(mv.piece), Some(mv.token))
    }

    /// Submits a move whose piece id or token may have failed to parse.
    ///
    /// A missing piece is reported as unknown and a missing token as an
    /// invalid move, at the same steps a parsed move would fail them. Once
    /// the game is over the move is ignored whatever it holds.
    #[instrument(skip_all, fields(player = %player, ?piece, ?token))]
    pub fn submit_partial(
        &mut self,
        player: Player,
        piece: Option<PieceId>,
        token: Option<MoveToken>,
    ) -> MoveOutcome {
        self.attempt(player, piece, token)
    }

    fn attempt(
        &mut self,
        player: Player,
        piece: Option<PieceId>,
        token: Option<MoveToken>,
    ) -> MoveOutcome {
        if self.state.is_over() {
            debug!("Game is over, ignoring move");
            return MoveOutcome::Ignored;
        }

        match self.apply(player, piece, token) {
            Ok(Some(winner)) => {
                info!(%winner, moves = self.state.history.len(), "Game over");
                MoveOutcome::GameOver { winner }
            }
            Ok(None) => MoveOutcome::Updated {
                board: self.state.board.clone(),
                current_player: self.state.current_player,
                history: self.state.history.clone(),
            },
            Err(reason) => {
                warn!(%reason, "Move rejected");
                MoveOutcome::Rejected { reason }
            }
        }
    }

    /// Rebuilds a game from two rosters and a move log.
    ///
    /// # Errors
    ///
    /// Returns the first rejection encountered while replaying.
    #[instrument(skip(roster_a, roster_b, moves), fields(moves = moves.len()))]
    pub fn replay(roster_a: &Roster, roster_b: &Roster, moves: &[Move]) -> Result<Self, MoveError> {
        let mut game = Self::new();
        game.initialize(roster_a, roster_b);
        for mv in moves {
            if let MoveOutcome::Rejected { reason } = game.play(*mv) {
                return Err(reason);
            }
        }
        Ok(game)
    }

    /// Validates and commits a move. Returns the winner if it ended the game.
    fn apply(
        &mut self,
        player: Player,
        piece: Option<PieceId>,
        token: Option<MoveToken>,
    ) -> Result<Option<Player>, MoveError> {
        if self.policy == TurnPolicy::Strict && player != self.state.current_player {
            return Err(MoveError::NotYourTurn(player));
        }

        let piece = piece.ok_or(MoveError::UnknownPiece)?;
        let origin = self
            .state
            .board
            .locate(player, piece)
            .ok_or(MoveError::UnknownPiece)?;

        let token = token.ok_or(MoveError::InvalidMove)?;
        let dest =
            movement::resolve(piece.kind(), origin, token).ok_or(MoveError::InvalidMove)?;
        let mv = Move::new(player, piece, token);

        rules::check_destination(&self.state.board, mv.player, dest)?;

        let captured =
            rules::resolve_combat(&mut self.state.board, mv.player, mv.piece, origin, dest)?;
        self.state.history.push(mv);
        info!(%origin, %dest, captured = captured.is_some(), "Move accepted");

        let winner = rules::check_winner(&self.state.board, mv.player);
        match winner {
            Some(winner) => self.state.status = GameStatus::Over { winner },
            None => self.state.current_player = mv.player.opponent(),
        }

        self.verify_invariants();
        Ok(winner)
    }

    fn verify_invariants(&self) {
        if let Err(violations) = HeroGridInvariants::check_all(&self.state) {
            for violation in &violations {
                warn!(invariant = %violation.description, "Invariant violated");
            }
            debug_assert!(violations.is_empty(), "Game invariants violated");
        }
    }
}
