//! Request and response bodies for the REST API.
//!
//! Shared by the server handlers and the terminal client.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tictactoe_core::{Actor, Board, Coord, Game, GameId, GameStatus, MoveRecord, TurnReport};

/// Message sent with a freshly created game.
pub const WELCOME_MESSAGE: &str =
    "Game created successfully. You are X, server is O. Make your move!";

/// Snapshot of one game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameView {
    /// Game identifier.
    pub game_id: GameId,
    /// Board rows, `null` for empty cells.
    pub board: Board,
    /// Current status.
    pub status: GameStatus,
    /// Winner, if any.
    pub winner: Option<Actor>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

impl From<&Game> for GameView {
    fn from(game: &Game) -> Self {
        Self {
            game_id: game.id().clone(),
            board: game.board().clone(),
            status: game.status(),
            winner: game.winner(),
            created_at: game.created_at(),
        }
    }
}

/// Response to `POST /game`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateGameResponse {
    /// Game identifier.
    pub game_id: GameId,
    /// Empty board.
    pub board: Board,
    /// Always `in_progress`.
    pub status: GameStatus,
    /// Greeting for the player.
    pub message: String,
}

/// Response to `GET /games`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GamesResponse {
    /// Games in creation order.
    pub games: Vec<GameView>,
}

/// Body of `POST /game/{id}/move` once validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRequest {
    /// Row, 0 to 2.
    pub row: i64,
    /// Column, 0 to 2.
    pub col: i64,
}

/// Response to a successful `POST /game/{id}/move`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveResponse {
    /// Game identifier.
    pub game_id: GameId,
    /// Board after the turn.
    pub board: Board,
    /// Status after the turn.
    pub status: GameStatus,
    /// Winner after the turn.
    pub winner: Option<Actor>,
    /// Human-readable summary.
    pub message: String,
    /// Where the player moved.
    pub player_move: Coord,
    /// Where the server answered, if it did.
    pub opponent_move: Option<Coord>,
}

impl MoveResponse {
    /// Builds the response from the game after a completed turn.
    pub fn from_turn(game: &Game, report: &TurnReport) -> Self {
        Self {
            game_id: game.id().clone(),
            board: game.board().clone(),
            status: report.status,
            winner: report.winner,
            message: turn_message(report.status),
            player_move: report.player_move,
            opponent_move: report.opponent_move,
        }
    }
}

/// Message shown after a turn.
pub fn turn_message(status: GameStatus) -> String {
    if status.is_terminal() {
        format!("Game over! Result: {}", status)
    } else {
        "Your turn!".to_string()
    }
}

/// Response to `GET /game/{id}/moves`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovesResponse {
    /// Game identifier.
    pub game_id: GameId,
    /// Moves in chronological order.
    pub moves: Vec<MoveRecord>,
}

/// Body of every error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Short error category.
    pub error: String,
    /// Extra detail, when there is any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Response to `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `healthy`.
    pub status: String,
}
