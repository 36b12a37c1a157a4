//! Game API handlers.
//!
//! # Examples
//!
//! Create a game and play the center:
//! ```bash
//! curl -X POST http://localhost:5000/game
//! curl -X POST http://localhost:5000/game/game_1/move \
//!   -H "Content-Type: application/json" \
//!   -d '{"row": 1, "col": 1}'
//! ```

use super::AppState;
use super::error::ApiError;
use super::models::{
    CreateGameResponse, GameView, GamesResponse, HealthResponse, MoveRequest, MoveResponse,
    MovesResponse, WELCOME_MESSAGE,
};
use axum::Json;
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde_json::Value;
use tictactoe_core::BOARD_SIZE;
use tracing::{debug, info, instrument, warn};

/// Create a new game.
///
/// Returns `201 Created` with the identifier and the empty board.
#[instrument(skip(state))]
pub async fn create_game(State(state): State<AppState>) -> (StatusCode, Json<CreateGameResponse>) {
    let handle = state.registry.create_game();
    let game = handle.lock();
    info!(game_id = %game.id(), "Created new game");

    let response = CreateGameResponse {
        game_id: game.id().clone(),
        board: game.board().clone(),
        status: game.status(),
        message: WELCOME_MESSAGE.to_string(),
    };
    (StatusCode::CREATED, Json(response))
}

/// List all games, oldest first.
#[instrument(skip(state))]
pub async fn list_games(State(state): State<AppState>) -> Json<GamesResponse> {
    let games: Vec<GameView> = state
        .registry
        .list_all()
        .iter()
        .map(|handle| GameView::from(&*handle.lock()))
        .collect();
    info!(count = games.len(), "Retrieved games");
    Json(GamesResponse { games })
}

/// Get the current state of one game.
#[instrument(skip(state))]
pub async fn get_game(
    State(state): State<AppState>,
    Path(game_id): Path<String>,
) -> Result<Json<GameView>, ApiError> {
    let handle = state.registry.lookup(&game_id).ok_or_else(|| {
        warn!(%game_id, "Game not found");
        ApiError::NotFound
    })?;
    let view = GameView::from(&*handle.lock());
    Ok(Json(view))
}

/// Player makes a move; the server answers immediately.
///
/// The game stays locked from validation until the opponent's reply has
/// been applied, so no reader ever sees the board between the two moves.
#[instrument(skip(state, body))]
pub async fn make_move(
    State(state): State<AppState>,
    Path(game_id): Path<String>,
    body: Bytes,
) -> Result<Json<MoveResponse>, ApiError> {
    let handle = state.registry.lookup(&game_id).ok_or_else(|| {
        warn!(%game_id, "Game not found");
        ApiError::NotFound
    })?;
    let mut game = handle.lock();

    if game.is_finished() {
        info!(%game_id, status = %game.status(), "Attempted move on finished game");
        return Err(ApiError::GameFinished(Box::new(GameView::from(&*game))));
    }

    let request = parse_move(&body).inspect_err(|error| {
        warn!(%game_id, %error, "Invalid move request");
    })?;
    let (row, col) = board_indices(request)?;

    let report = {
        let mut picker = state.picker();
        game.play_turn(row, col, &mut *picker).map_err(|error| {
            warn!(%game_id, row, col, %error, "Invalid move");
            ApiError::from(error)
        })?
    };

    if let Some(reply) = report.opponent_move {
        info!(%game_id, %reply, "Server move");
    }
    info!(%game_id, status = %report.status, "Game status after turn");

    Ok(Json(MoveResponse::from_turn(&game, &report)))
}

/// Get all moves of a game in chronological order.
#[instrument(skip(state))]
pub async fn get_moves(
    State(state): State<AppState>,
    Path(game_id): Path<String>,
) -> Result<Json<MovesResponse>, ApiError> {
    let handle = state.registry.lookup(&game_id).ok_or_else(|| {
        warn!(%game_id, "Game not found");
        ApiError::NotFound
    })?;
    let moves = handle.lock().move_history();
    info!(%game_id, count = moves.len(), "Retrieved moves");

    Ok(Json(MovesResponse {
        game_id: handle.id().clone(),
        moves,
    }))
}

/// Health check.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
    })
}

/// Extracts integer `row` and `col` from a raw JSON body.
fn parse_move(body: &[u8]) -> Result<MoveRequest, ApiError> {
    let missing = || ApiError::InvalidRequest("row and col are required".to_string());

    let value: Value = serde_json::from_slice(body).map_err(|_| missing())?;
    let (Some(row), Some(col)) = (value.get("row"), value.get("col")) else {
        return Err(missing());
    };

    match (integer(row), integer(col)) {
        (Some(row), Some(col)) => Ok(MoveRequest { row, col }),
        _ => Err(ApiError::InvalidRequest(
            "row and col must be integers".to_string(),
        )),
    }
}

/// Any JSON integer. Values above `i64::MAX` saturate, which the range
/// check rejects like any other off-board index.
fn integer(value: &Value) -> Option<i64> {
    value
        .as_i64()
        .or_else(|| value.as_u64().map(|v| i64::try_from(v).unwrap_or(i64::MAX)))
}

/// Range-checks transport integers before they reach the game.
fn board_indices(request: MoveRequest) -> Result<(usize, usize), ApiError> {
    let to_index = |value: i64| usize::try_from(value).ok().filter(|&v| v < BOARD_SIZE);
    match (to_index(request.row), to_index(request.col)) {
        (Some(row), Some(col)) => Ok((row, col)),
        _ => {
            debug!(?request, "Move outside the board");
            Err(ApiError::InvalidMove(
                "row and col must be between 0 and 2".to_string(),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_move_valid() {
        let request = parse_move(br#"{"row": 2, "col": 0}"#).unwrap();
        assert_eq!(request, MoveRequest { row: 2, col: 0 });
    }

    #[test]
    fn test_parse_move_missing_field() {
        let err = parse_move(br#"{"row": 2}"#).unwrap_err();
        assert!(matches!(err, ApiError::InvalidRequest(d) if d == "row and col are required"));

        let err = parse_move(br#"[1, 2]"#).unwrap_err();
        assert!(matches!(err, ApiError::InvalidRequest(d) if d == "row and col are required"));
    }

    #[test]
    fn test_parse_move_not_json() {
        assert!(matches!(parse_move(b"row=1"), Err(ApiError::InvalidRequest(_))));
        assert!(matches!(parse_move(b""), Err(ApiError::InvalidRequest(_))));
    }

    #[test]
    fn test_parse_move_non_integer() {
        for body in [
            br#"{"row": "1", "col": 1}"#.as_slice(),
            br#"{"row": 1.5, "col": 1}"#.as_slice(),
            br#"{"row": [1], "col": 1}"#.as_slice(),
            br#"{"row": 1, "col": null}"#.as_slice(),
        ] {
            let err = parse_move(body).unwrap_err();
            assert!(
                matches!(err, ApiError::InvalidRequest(d) if d == "row and col must be integers")
            );
        }
    }

    #[test]
    fn test_parse_move_huge_integer_is_out_of_range() {
        let request = parse_move(br#"{"row": 9223372036854775808, "col": 0}"#).unwrap();
        assert_eq!(request, MoveRequest { row: i64::MAX, col: 0 });
        assert!(matches!(
            board_indices(request),
            Err(ApiError::InvalidMove(d)) if d == "row and col must be between 0 and 2"
        ));
    }

    #[test]
    fn test_board_indices_range() {
        assert_eq!(board_indices(MoveRequest { row: 0, col: 2 }).unwrap(), (0, 2));
        assert!(matches!(
            board_indices(MoveRequest { row: -1, col: 0 }),
            Err(ApiError::InvalidMove(_))
        ));
        assert!(matches!(
            board_indices(MoveRequest { row: 1, col: 3 }),
            Err(ApiError::InvalidMove(_))
        ));
    }
}
