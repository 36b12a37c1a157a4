//! Core domain types for tic-tac-toe.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::borrow::Borrow;
use std::fmt;

/// Width and height of the board.
pub const BOARD_SIZE: usize = 3;

/// The side making a move.
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
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Actor {
    /// The human player, marks with X.
    Player,
    /// The automatic opponent, marks with O.
    Opponent,
}

impl Actor {
    /// Returns the mark this actor places on the board.
    pub fn mark(self) -> Cell {
        match self {
            Actor::Player => Cell::PlayerMark,
            Actor::Opponent => Cell::OpponentMark,
        }
    }
}

/// A square on the tic-tac-toe board.
///
/// On the wire an empty cell is `null`, marks are `"X"` and `"O"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    /// No mark yet.
    #[default]
    Empty,
    /// Marked by the human player (X).
    PlayerMark,
    /// Marked by the automatic opponent (O).
    OpponentMark,
}

impl Cell {
    /// Returns the side owning this cell, if any.
    pub fn owner(self) -> Option<Actor> {
        match self {
            Cell::Empty => None,
            Cell::PlayerMark => Some(Actor::Player),
            Cell::OpponentMark => Some(Actor::Opponent),
        }
    }

    /// Returns true if no mark has been placed.
    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }

    /// Returns the printable symbol for a marked cell.
    pub fn symbol(self) -> Option<&'static str> {
        match self {
            Cell::Empty => None,
            Cell::PlayerMark => Some("X"),
            Cell::OpponentMark => Some("O"),
        }
    }
}

impl Serialize for Cell {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.symbol() {
            Some(symbol) => serializer.serialize_str(symbol),
            None => serializer.serialize_none(),
        }
    }
}

impl<'de> Deserialize<'de> for Cell {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let symbol = Option::<String>::deserialize(deserializer)?;
        match symbol.as_deref() {
            None => Ok(Cell::Empty),
            Some("X") => Ok(Cell::PlayerMark),
            Some("O") => Ok(Cell::OpponentMark),
            Some(other) => Err(serde::de::Error::custom(format!(
                "unknown cell mark {:?}",
                other
            ))),
        }
    }
}

/// A (row, column) coordinate on the board, both in `0..BOARD_SIZE`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[display("({}, {})", row, col)]
pub struct Coord {
    /// Row index, 0 is the top row.
    pub row: usize,
    /// Column index, 0 is the left column.
    pub col: usize,
}

impl Coord {
    /// Returns the coordinate if both indices are on the board.
    pub fn checked(row: usize, col: usize) -> Option<Self> {
        (row < BOARD_SIZE && col < BOARD_SIZE).then_some(Self { row, col })
    }

    /// All nine coordinates in row-major order.
    pub fn all() -> impl Iterator<Item = Coord> {
        (0..BOARD_SIZE).flat_map(|row| (0..BOARD_SIZE).map(move |col| Coord { row, col }))
    }
}

/// 3x3 tic-tac-toe board stored row-major.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Board {
    cells: [[Cell; BOARD_SIZE]; BOARD_SIZE],
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a board from explicit rows.
    pub fn from_rows(cells: [[Cell; BOARD_SIZE]; BOARD_SIZE]) -> Self {
        Self { cells }
    }

    /// Gets the cell at the given coordinate.
    ///
    /// # Panics
    ///
    /// Panics if `at` is off the board. Coordinates from [`Coord::checked`]
    /// or [`Board::empty_cells`] are always on it.
    pub fn get(&self, at: Coord) -> Cell {
        self.cells[at.row][at.col]
    }

    /// Places a mark. Legality is the caller's concern.
    pub(crate) fn place(&mut self, at: Coord, cell: Cell) {
        self.cells[at.row][at.col] = cell;
    }

    /// Returns every empty coordinate in row-major order.
    pub fn empty_cells(&self) -> Vec<Coord> {
        Coord::all().filter(|&at| self.get(at).is_empty()).collect()
    }

    /// Returns true when no empty cell remains.
    pub fn is_full(&self) -> bool {
        self.cells.iter().flatten().all(|cell| !cell.is_empty())
    }

    /// Counts the marks placed so far.
    pub fn marks(&self) -> usize {
        self.cells.iter().flatten().filter(|cell| !cell.is_empty()).count()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const RULE: &str = "   +---+---+---+";
        writeln!(f, "     0   1   2")?;
        writeln!(f, "{}", RULE)?;
        for (index, row) in self.cells.iter().enumerate() {
            write!(f, " {} |", index)?;
            for cell in row {
                write!(f, " {} |", cell.symbol().unwrap_or(" "))?;
            }
            writeln!(f)?;
            writeln!(f, "{}", RULE)?;
        }
        Ok(())
    }
}

/// Current status of a game.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, strum::Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum GameStatus {
    /// Moves are still accepted.
    #[default]
    InProgress,
    /// The human player completed a line.
    PlayerWins,
    /// The automatic opponent completed a line.
    OpponentWins,
    /// The board filled up with no line.
    Draw,
}

impl GameStatus {
    /// Returns true once the game accepts no further moves.
    pub fn is_terminal(self) -> bool {
        self != GameStatus::InProgress
    }

    /// Returns the winning side for a won game.
    pub fn winner(self) -> Option<Actor> {
        match self {
            GameStatus::PlayerWins => Some(Actor::Player),
            GameStatus::OpponentWins => Some(Actor::Opponent),
            GameStatus::InProgress | GameStatus::Draw => None,
        }
    }
}

/// Terminal result found by evaluating a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// The human player has a line.
    PlayerWins,
    /// The automatic opponent has a line.
    OpponentWins,
    /// Full board, no line.
    Draw,
}

impl Outcome {
    /// Outcome for a line completed by `actor`.
    pub fn win_for(actor: Actor) -> Self {
        match actor {
            Actor::Player => Outcome::PlayerWins,
            Actor::Opponent => Outcome::OpponentWins,
        }
    }
}

impl From<Outcome> for GameStatus {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::PlayerWins => GameStatus::PlayerWins,
            Outcome::OpponentWins => GameStatus::OpponentWins,
            Outcome::Draw => GameStatus::Draw,
        }
    }
}

/// Unique identifier of a game, `game_<n>`.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[serde(transparent)]
pub struct GameId(String);

impl GameId {
    /// Identifier minted for the `sequence`-th game of a registry.
    pub fn from_sequence(sequence: u64) -> Self {
        Self(format!("game_{}", sequence))
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for GameId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for GameId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl Borrow<str> for GameId {
    fn borrow(&self) -> &str {
        &self.0
    }
}
