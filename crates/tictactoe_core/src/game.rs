//! Game state machine for a single human-vs-computer match.

use crate::action::{MoveError, MoveRecord};
use crate::picker::MovePicker;
use crate::rules;
use crate::types::{Actor, Board, Coord, GameId, GameStatus, Outcome};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info, instrument};

/// One 3x3 match: board, move log, status, and winner.
///
/// Moves go through [`Game::apply_move`]; status only changes in
/// [`Game::refresh_status`]. Once the status is terminal no move is accepted.
#[derive(Debug, Clone)]
pub struct Game {
    id: GameId,
    created_at: DateTime<Utc>,
    board: Board,
    moves: Vec<MoveRecord>,
    status: GameStatus,
    winner: Option<Actor>,
}

/// What happened during one human turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, derive_new::new)]
pub struct TurnReport {
    /// Where the human player moved.
    pub player_move: Coord,
    /// Where the opponent answered, if it moved.
    pub opponent_move: Option<Coord>,
    /// Status after the turn.
    pub status: GameStatus,
    /// Winner after the turn.
    pub winner: Option<Actor>,
}

impl Game {
    /// Creates an empty game in progress.
    #[instrument(skip(id), fields(game_id = %id))]
    pub fn new(id: GameId, created_at: DateTime<Utc>) -> Self {
        debug!("Creating new game");
        Self {
            id,
            created_at,
            board: Board::new(),
            moves: Vec::new(),
            status: GameStatus::InProgress,
            winner: None,
        }
    }

    /// Returns the game identifier.
    pub fn id(&self) -> &GameId {
        &self.id
    }

    /// Returns when the game was created.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the current status.
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Returns the winner, set only for won games.
    pub fn winner(&self) -> Option<Actor> {
        self.winner
    }

    /// Returns true once no further moves are accepted.
    pub fn is_finished(&self) -> bool {
        self.status.is_terminal()
    }

    /// Number of moves applied so far.
    pub fn move_count(&self) -> usize {
        self.moves.len()
    }

    /// Places `actor`'s mark at (`row`, `col`).
    ///
    /// Gates, in order: coordinates on the board, cell empty, game in
    /// progress. A rejected move changes nothing. Status is not
    /// recomputed; call [`Game::refresh_status`] for that.
    ///
    /// Turn order is not enforced here.
    #[instrument(skip(self), fields(game_id = %self.id))]
    pub fn apply_move(&mut self, row: usize, col: usize, actor: Actor) -> Result<(), MoveError> {
        let position = Coord::checked(row, col).ok_or_else(|| {
            debug!("Rejected move off the board");
            MoveError::OutOfBounds { row, col }
        })?;

        if !self.board.get(position).is_empty() {
            debug!(%position, "Rejected move on occupied cell");
            return Err(MoveError::CellOccupied(position));
        }

        if self.status.is_terminal() {
            debug!(status = %self.status, "Rejected move on finished game");
            return Err(MoveError::GameOver(self.status));
        }

        self.board.place(position, actor.mark());
        self.moves.push(MoveRecord::new(actor, position, Utc::now()));
        debug!(%position, %actor, moves = self.moves.len(), "Move applied");
        Ok(())
    }

    /// Evaluates the board without touching the game.
    ///
    /// Rows, then columns, then both diagonals; a full board with no line
    /// is a draw. `None` means play continues.
    pub fn evaluate(&self) -> Option<Outcome> {
        rules::evaluate(&self.board)
    }

    /// Recomputes status and winner from the board. Idempotent.
    #[instrument(skip(self), fields(game_id = %self.id))]
    pub fn refresh_status(&mut self) {
        let status = self.evaluate().map(GameStatus::from).unwrap_or_default();
        if status != self.status {
            info!(from = %self.status, to = %status, "Game status changed");
        }
        self.status = status;
        self.winner = status.winner();
    }

    /// Empty cells in row-major order.
    pub fn available_cells(&self) -> Vec<Coord> {
        self.board.empty_cells()
    }

    /// Lets the automatic opponent place a mark on a cell chosen by `picker`.
    ///
    /// Returns `None` without mutating when no cell is free, or when the
    /// game is already terminal.
    #[instrument(skip(self, picker), fields(game_id = %self.id))]
    pub fn opponent_auto_move<P: MovePicker + ?Sized>(&mut self, picker: &mut P) -> Option<Coord> {
        if self.is_finished() {
            debug!(status = %self.status, "Opponent not moving on finished game");
            return None;
        }

        let available = self.available_cells();
        if available.is_empty() {
            debug!("No cell left for the opponent");
            return None;
        }

        let position = *available.get(picker.pick(available.len()))?;
        match self.apply_move(position.row, position.col, Actor::Opponent) {
            Ok(()) => Some(position),
            Err(error) => {
                debug!(%error, "Opponent move not applied");
                None
            }
        }
    }

    /// Chronological copy of the move log.
    pub fn move_history(&self) -> Vec<MoveRecord> {
        self.moves.clone()
    }

    /// Plays a full human turn: the player's move, then the opponent's reply.
    ///
    /// Status is refreshed after each move and the opponent only answers
    /// while the game is still in progress. Rejects the turn up front if the
    /// game is already over.
    #[instrument(skip(self, picker), fields(game_id = %self.id))]
    pub fn play_turn<P: MovePicker + ?Sized>(
        &mut self,
        row: usize,
        col: usize,
        picker: &mut P,
    ) -> Result<TurnReport, MoveError> {
        if self.status.is_terminal() {
            return Err(MoveError::GameOver(self.status));
        }

        self.apply_move(row, col, Actor::Player)?;
        self.refresh_status();

        let opponent_move = if self.is_finished() {
            None
        } else {
            let reply = self.opponent_auto_move(picker);
            self.refresh_status();
            reply
        };

        info!(
            row,
            col,
            opponent_move = ?opponent_move,
            status = %self.status,
            "Turn completed"
        );

        Ok(TurnReport::new(
            Coord { row, col },
            opponent_move,
            self.status,
            self.winner,
        ))
    }
}
