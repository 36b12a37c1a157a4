//! API error responses.

use super::models::{ErrorBody, GameView};
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use tictactoe_core::MoveError;
use tracing::warn;

/// Everything a handler can answer besides success.
#[derive(Debug, derive_more::Display)]
pub enum ApiError {
    /// Unknown game identifier.
    #[display("Game not found")]
    NotFound,

    /// Move attempted on a terminal game; carries the final state.
    #[display("Game is already finished")]
    GameFinished(Box<GameView>),

    /// Body missing, not JSON, or wrong field types.
    #[display("Invalid request: {}", _0)]
    InvalidRequest(String),

    /// Well-formed move the rules reject.
    #[display("Invalid move: {}", _0)]
    InvalidMove(String),

    /// Unexpected failure. Details stay in the logs.
    #[display("Internal server error")]
    Internal,
}

impl std::error::Error for ApiError {}

impl From<MoveError> for ApiError {
    fn from(err: MoveError) -> Self {
        match err {
            MoveError::OutOfBounds { .. } => {
                ApiError::InvalidMove("row and col must be between 0 and 2".to_string())
            }
            MoveError::CellOccupied(_) => {
                ApiError::InvalidMove("Position is already occupied or invalid".to_string())
            }
            // make_move answers GameFinished before reaching the rules.
            MoveError::GameOver(status) => {
                ApiError::InvalidMove(format!("Game is {}", status))
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::NotFound => error_response(StatusCode::NOT_FOUND, "Game not found", None),
            ApiError::GameFinished(view) => (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "error": "Game is already finished",
                    "game_id": view.game_id,
                    "board": view.board,
                    "status": view.status,
                    "winner": view.winner,
                    "message": format!("Game is {}", view.status),
                })),
            )
                .into_response(),
            ApiError::InvalidRequest(details) => {
                error_response(StatusCode::BAD_REQUEST, "Invalid request", Some(details))
            }
            ApiError::InvalidMove(details) => {
                error_response(StatusCode::BAD_REQUEST, "Invalid move", Some(details))
            }
            ApiError::Internal => {
                warn!("Answering with internal server error");
                error_response(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error",
                    None,
                )
            }
        }
    }
}

/// Builds a plain `{error, details}` response.
pub(crate) fn error_response(status: StatusCode, error: &str, details: Option<String>) -> Response {
    let body = ErrorBody {
        error: error.to_string(),
        details,
    };
    (status, Json(body)).into_response()
}
