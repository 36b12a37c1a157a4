//! Move records and move rejections.
//!
//! A move that lands on the board becomes a [`MoveRecord`] in the game's
//! append-only log. A move that does not is reported as a [`MoveError`];
//! illegal moves are routine input, never a fault.

use crate::types::{Actor, Coord, GameStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One applied move in a game's history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_new::new)]
pub struct MoveRecord {
    /// The side that moved.
    actor: Actor,
    /// Where the mark was placed.
    position: Coord,
    /// When the move was applied.
    timestamp: DateTime<Utc>,
}

impl MoveRecord {
    /// Returns the side that moved.
    pub fn actor(&self) -> Actor {
        self.actor
    }

    /// Returns where the mark was placed.
    pub fn position(&self) -> Coord {
        self.position
    }

    /// Returns when the move was applied.
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

impl std::fmt::Display for MoveRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} -> {} at {}",
            self.actor,
            self.position,
            self.timestamp.to_rfc3339()
        )
    }
}

/// Reason a move was rejected, in the order the gates are checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum MoveError {
    /// Row or column outside `0..=2`.
    #[display("Position ({}, {}) is off the board (row and col must be between 0 and 2)", row, col)]
    OutOfBounds {
        /// Requested row.
        row: usize,
        /// Requested column.
        col: usize,
    },

    /// The target cell already carries a mark.
    #[display("Cell {} is already occupied", _0)]
    CellOccupied(Coord),

    /// The game reached a terminal status.
    #[display("Game is already over ({})", _0)]
    GameOver(GameStatus),
}

impl std::error::Error for MoveError {}
