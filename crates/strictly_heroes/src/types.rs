//! Core domain types for the heroes grid: players, pieces, squares and the board.

use crate::character::CharacterKind;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::instrument;

/// Side length of the square board.
pub const BOARD_SIZE: usize = 5;

/// Player in the game.
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
pub enum Player {
    /// Player A (home row 0, moves first).
    A,
    /// Player B (home row 4).
    B,
}

impl Player {
    /// Returns the opponent player.
    pub fn opponent(self) -> Self {
        match self {
            Player::A => Player::B,
            Player::B => Player::A,
        }
    }

    /// Row where this player's roster is placed at initialization.
    pub fn home_row(self) -> usize {
        match self {
            Player::A => 0,
            Player::B => BOARD_SIZE - 1,
        }
    }
}

/// Identity of one piece on one side.
///
/// The index is the roster slot the piece was placed from, so ids are unique
/// per side by construction. Rendered as `"{index}-{kind}"`, e.g. `0-P`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[display("{index}-{kind}")]
#[serde(into = "String", try_from = "String")]
pub struct PieceId {
    index: usize,
    kind: CharacterKind,
}

impl PieceId {
    /// Creates a piece id from its roster slot and character kind.
    pub fn new(index: usize, kind: CharacterKind) -> Self {
        Self { index, kind }
    }

    /// Roster slot of this piece.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Character kind, which selects the movement profile.
    pub fn kind(&self) -> CharacterKind {
        self.kind
    }
}

/// Error parsing a piece id or a board square from its string form.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("Cannot parse {:?}: {}", input, reason)]
pub struct ParseError {
    /// The rejected input.
    pub input: String,
    /// What was wrong with it.
    pub reason: &'static str,
}

impl ParseError {
    fn new(input: &str, reason: &'static str) -> Self {
        Self {
            input: input.to_string(),
            reason,
        }
    }
}

impl FromStr for PieceId {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (index, kind) = s
            .split_once('-')
            .ok_or_else(|| ParseError::new(s, "expected <index>-<kind>"))?;
        let index = index
            .parse::<usize>()
            .map_err(|_| ParseError::new(s, "index is not a number"))?;
        let kind = kind
            .parse::<CharacterKind>()
            .map_err(|_| ParseError::new(s, "unknown character kind"))?;
        Ok(Self { index, kind })
    }
}

impl From<PieceId> for String {
    fn from(piece: PieceId) -> Self {
        piece.to_string()
    }
}

impl TryFrom<String> for PieceId {
    type Error = ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// A (row, column) coordinate.
///
/// Signed so that resolved destinations can fall off the board; bounds are
/// checked separately by the legality rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[display("({row}, {col})")]
pub struct Position {
    /// Row index, 0 is player A's home row.
    pub row: i32,
    /// Column index.
    pub col: i32,
}

impl Position {
    /// Creates a position.
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// True iff `0 <= row < 5` and `0 <= col < 5`.
    pub fn is_in_bounds(self) -> bool {
        self.indices().is_some()
    }

    /// Converts to array indices, or `None` when off the board.
    pub fn indices(self) -> Option<(usize, usize)> {
        let row = usize::try_from(self.row).ok()?;
        let col = usize::try_from(self.col).ok()?;
        (row < BOARD_SIZE && col < BOARD_SIZE).then_some((row, col))
    }
}

/// A square on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Square {
    /// Empty square.
    #[default]
    Empty,
    /// Square occupied by one piece.
    Occupied {
        /// Side owning the piece.
        owner: Player,
        /// The piece standing here.
        piece: PieceId,
    },
}

impl Square {
    /// True iff the square holds a piece owned by `player`.
    pub fn is_occupied_by(self, player: Player) -> bool {
        matches!(self, Square::Occupied { owner, .. } if owner == player)
    }

    /// Owner of the piece on this square, if any.
    pub fn owner(self) -> Option<Player> {
        match self {
            Square::Empty => None,
            Square::Occupied { owner, .. } => Some(owner),
        }
    }
}

impl std::fmt::Display for Square {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Square::Empty => Ok(()),
            Square::Occupied { owner, piece } => write!(f, "{}-{}", owner, piece),
        }
    }
}

impl FromStr for Square {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Ok(Square::Empty);
        }
        let (owner, piece) = s
            .split_once('-')
            .ok_or_else(|| ParseError::new(s, "expected <player>-<piece>"))?;
        let owner = owner
            .parse::<Player>()
            .map_err(|_| ParseError::new(s, "unknown player"))?;
        Ok(Square::Occupied {
            owner,
            piece: piece.parse()?,
        })
    }
}

/// 5x5 game board.
///
/// Serializes as five rows of five strings, each `""` or `"{player}-{piece}"`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(into = "Vec<Vec<String>>", try_from = "Vec<Vec<String>>")]
pub struct Board {
    squares: [[Square; BOARD_SIZE]; BOARD_SIZE],
}

impl Board {
    /// Creates a board of empty squares.
    pub fn new() -> Self {
        Self::default()
    }

    /// True iff `(row, col)` lies on the board.
    pub fn is_in_bounds(row: i32, col: i32) -> bool {
        Position::new(row, col).is_in_bounds()
    }

    /// Gets the square at a position; off-board positions read as `None`.
    pub fn get(&self, pos: Position) -> Option<Square> {
        let (row, col) = pos.indices()?;
        Some(self.squares[row][col])
    }

    /// Sets the square at a position.
    pub fn set(&mut self, pos: Position, square: Square) -> Result<(), &'static str> {
        let (row, col) = pos.indices().ok_or("Position out of bounds")?;
        self.squares[row][col] = square;
        Ok(())
    }

    /// Returns all rows.
    pub fn rows(&self) -> &[[Square; BOARD_SIZE]; BOARD_SIZE] {
        &self.squares
    }

    /// Finds the square holding `piece` owned by `player`, scanning row-major.
    #[instrument(skip(self))]
    pub fn locate(&self, player: Player, piece: PieceId) -> Option<Position> {
        self.iter()
            .find(|(_, square)| {
                *square
                    == Square::Occupied {
                        owner: player,
                        piece,
                    }
            })
            .map(|(pos, _)| pos)
    }

    /// Iterates every square with its position in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Position, Square)> + '_ {
        self.squares.iter().enumerate().flat_map(|(row, squares)| {
            squares
                .iter()
                .enumerate()
                .map(move |(col, square)| (Position::new(row as i32, col as i32), *square))
        })
    }

    /// Pieces owned by `player` with their positions.
    pub fn pieces(&self, player: Player) -> impl Iterator<Item = (Position, PieceId)> + '_ {
        self.iter().filter_map(move |(pos, square)| match square {
            Square::Occupied { owner, piece } if owner == player => Some((pos, piece)),
            _ => None,
        })
    }

    /// Number of pieces `player` still has on the board.
    pub fn count_pieces(&self, player: Player) -> usize {
        self.pieces(player).count()
    }

    /// Formats the board as a human-readable grid.
    pub fn display(&self) -> String {
        self.squares
            .iter()
            .map(|row| {
                row.iter()
                    .map(|square| match square {
                        Square::Empty => format!("{:^7}", "."),
                        occupied => format!("{:^7}", occupied.to_string()),
                    })
                    .collect::<Vec<_>>()
                    .join("|")
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl From<Board> for Vec<Vec<String>> {
    fn from(board: Board) -> Self {
        board
            .squares
            .iter()
            .map(|row| row.iter().map(ToString::to_string).collect())
            .collect()
    }
}

impl TryFrom<Vec<Vec<String>>> for Board {
    type Error = ParseError;

    fn try_from(rows: Vec<Vec<String>>) -> Result<Self, Self::Error> {
        if rows.len() != BOARD_SIZE || rows.iter().any(|row| row.len() != BOARD_SIZE) {
            return Err(ParseError::new("board", "expected 5 rows of 5 squares"));
        }
        let mut board = Board::new();
        for (row, cells) in rows.iter().enumerate() {
            for (col, cell) in cells.iter().enumerate() {
                board.squares[row][col] = cell.parse()?;
            }
        }
        Ok(board)
    }
}
