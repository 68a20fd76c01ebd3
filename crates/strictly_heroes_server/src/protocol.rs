//! Wire protocol between game clients and the server.
//!
//! Every frame is a JSON object `{"event": <name>, "data": {...}}`.

use serde::{Deserialize, Serialize};
use strictly_heroes::{Board, MoveError, MoveOutcome, MoveToken, PieceId, Player, Roster};
use tracing::{debug, instrument};

/// Request to start a new game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitializeGameRequest {
    /// Character tokens for player A, placed left to right on row 0.
    pub player_a_characters: Vec<String>,
    /// Character tokens for player B, placed left to right on row 4.
    pub player_b_characters: Vec<String>,
}

impl InitializeGameRequest {
    /// Parses both rosters.
    pub fn rosters(&self) -> Result<(Roster, Roster), MoveError> {
        Ok((
            Roster::parse(&self.player_a_characters)?,
            Roster::parse(&self.player_b_characters)?,
        ))
    }
}

/// Request to move a piece.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MakeMoveRequest {
    /// Submitting player.
    pub player: Player,
    /// Piece id, `"{index}-{kind}"`; a `"{player}-"` prefix is tolerated.
    pub character: String,
    /// Direction token.
    #[serde(rename = "move")]
    pub mv: String,
}

impl MakeMoveRequest {
    /// The piece id, or `None` if it cannot name any piece.
    #[instrument(skip(self), fields(character = %self.character))]
    pub fn piece(&self) -> Option<PieceId> {
        let prefix = format!("{}-", self.player);
        let character = self
            .character
            .strip_prefix(prefix.as_str())
            .unwrap_or(&self.character);
        character
            .parse::<PieceId>()
            .inspect_err(|e| debug!(error = %e, "Unparsable piece id"))
            .ok()
    }

    /// The direction token, or `None` if it names no direction.
    pub fn token(&self) -> Option<MoveToken> {
        self.mv.parse::<MoveToken>().ok()
    }
}

/// Messages sent by clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Reset the game with new rosters.
    InitializeGame(InitializeGameRequest),
    /// Move a piece.
    MakeMove(MakeMoveRequest),
}

/// Messages sent by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ServerMessage {
    /// A new game started.
    GameInitialized {
        /// Starting board.
        board: Board,
        /// Player to move first.
        current_player: Player,
    },
    /// A move was accepted.
    UpdateBoard {
        /// Board after the move.
        board: Board,
        /// Player to move next.
        current_player: Player,
        /// Accepted moves, e.g. `"A-0-P moved B"`.
        move_history: Vec<String>,
    },
    /// The game ended.
    GameOver {
        /// Winning side.
        winner: Player,
    },
    /// The requester's move was rejected.
    InvalidMove {
        /// Why.
        message: String,
    },
    /// The requester sent a frame the server could not understand.
    Error {
        /// Why.
        message: String,
    },
}

impl ServerMessage {
    /// Serializes to a JSON text frame.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Who should receive a server message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    /// Every connected client.
    Broadcast(ServerMessage),
    /// Only the client that sent the request.
    Reply(ServerMessage),
    /// Nobody.
    Silent,
}

impl From<MoveOutcome> for Delivery {
    fn from(outcome: MoveOutcome) -> Self {
        match outcome {
            MoveOutcome::Initialized {
                board,
                current_player,
            } => Delivery::Broadcast(ServerMessage::GameInitialized {
                board,
                current_player,
            }),
            MoveOutcome::Updated {
                board,
                current_player,
                history,
            } => Delivery::Broadcast(ServerMessage::UpdateBoard {
                board,
                current_player,
                move_history: history.iter().map(ToString::to_string).collect(),
            }),
            MoveOutcome::GameOver { winner } => {
                Delivery::Broadcast(ServerMessage::GameOver { winner })
            }
            MoveOutcome::Rejected { reason } => Delivery::Reply(ServerMessage::InvalidMove {
                message: reason.to_string(),
            }),
            MoveOutcome::Ignored => Delivery::Silent,
        }
    }
}
