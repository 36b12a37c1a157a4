//! Integration tests for the REST API, driven through the router in-process.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tictactoe_core::{GameRegistry, SequencePicker};
use tictactoe_server::api::{AppState, create_router};
use tower::ServiceExt; // For `oneshot` method

/// Router whose opponent always takes the first free cell in row-major order.
fn test_app() -> axum::Router {
    create_router(AppState::new(GameRegistry::new(), SequencePicker::first()))
}

async fn send(
    app: &axum::Router,
    method: &str,
    uri: &str,
    body: Option<&str>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if body.is_some() {
        builder = builder.header("content-type", "application/json");
    }
    let request = builder
        .body(Body::from(body.unwrap_or_default().to_string()))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn play(app: &axum::Router, game_id: &str, row: i64, col: i64) -> (StatusCode, Value) {
    let body = json!({ "row": row, "col": col }).to_string();
    send(app, "POST", &format!("/game/{}/move", game_id), Some(&body)).await
}

#[tokio::test]
async fn test_create_game() {
    let app = test_app();
    let (status, body) = send(&app, "POST", "/game", None).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["game_id"], "game_1");
    assert_eq!(body["status"], "in_progress");
    assert_eq!(body["board"], json!([[null, null, null], [null, null, null], [null, null, null]]));
    assert_eq!(
        body["message"],
        "Game created successfully. You are X, server is O. Make your move!"
    );

    let (_, second) = send(&app, "POST", "/game", None).await;
    assert_eq!(second["game_id"], "game_2");
}

#[tokio::test]
async fn test_move_gets_server_reply() {
    let app = test_app();
    send(&app, "POST", "/game", None).await;

    let (status, body) = play(&app, "game_1", 1, 1).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["game_id"], "game_1");
    assert_eq!(body["status"], "in_progress");
    assert_eq!(body["winner"], Value::Null);
    assert_eq!(body["message"], "Your turn!");
    assert_eq!(body["board"], json!([["O", null, null], [null, "X", null], [null, null, null]]));
    assert_eq!(body["player_move"], json!({ "row": 1, "col": 1 }));
    assert_eq!(body["opponent_move"], json!({ "row": 0, "col": 0 }));

    let (status, history) = send(&app, "GET", "/game/game_1/moves", None).await;
    assert_eq!(status, StatusCode::OK);
    let moves = history["moves"].as_array().unwrap();
    assert_eq!(moves.len(), 2);
    assert_eq!(moves[0]["actor"], "player");
    assert_eq!(moves[0]["position"], json!({ "row": 1, "col": 1 }));
    assert_eq!(moves[1]["actor"], "opponent");
    assert!(moves[1]["timestamp"].is_string());
}

#[tokio::test]
async fn test_player_win_then_finished() {
    let app = test_app();
    send(&app, "POST", "/game", None).await;

    play(&app, "game_1", 1, 0).await;
    play(&app, "game_1", 1, 1).await;
    let (status, body) = play(&app, "game_1", 1, 2).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "player_wins");
    assert_eq!(body["winner"], "player");
    assert_eq!(body["message"], "Game over! Result: player_wins");
    assert_eq!(body["opponent_move"], Value::Null);

    let (status, body) = play(&app, "game_1", 2, 2).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Game is already finished");
    assert_eq!(body["game_id"], "game_1");
    assert_eq!(body["status"], "player_wins");
    assert_eq!(body["winner"], "player");
    assert_eq!(body["message"], "Game is player_wins");
    assert_eq!(body["board"][2][2], Value::Null);

    let (_, history) = send(&app, "GET", "/game/game_1/moves", None).await;
    assert_eq!(history["moves"].as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn test_opponent_win() {
    let app = test_app();
    send(&app, "POST", "/game", None).await;

    play(&app, "game_1", 2, 2).await;
    play(&app, "game_1", 2, 1).await;
    let (status, body) = play(&app, "game_1", 1, 1).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "opponent_wins");
    assert_eq!(body["winner"], "opponent");
    assert_eq!(body["opponent_move"], json!({ "row": 0, "col": 2 }));
    assert_eq!(body["board"][0], json!(["O", "O", "O"]));
}

#[tokio::test]
async fn test_unknown_game() {
    let app = test_app();

    let (status, body) = play(&app, "game_99", 0, 0).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Game not found");

    let (status, _) = send(&app, "GET", "/game/game_99", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, "GET", "/game/game_99/moves", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unknown_game_wins_over_bad_body() {
    let app = test_app();
    let (status, _) = send(&app, "POST", "/game/nope/move", Some("garbage")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_invalid_requests() {
    let app = test_app();
    send(&app, "POST", "/game", None).await;

    let (status, body) = send(&app, "POST", "/game/game_1/move", Some(r#"{"row": 1}"#)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid request");
    assert_eq!(body["details"], "row and col are required");

    let (status, body) = send(&app, "POST", "/game/game_1/move", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"], "row and col are required");

    let (status, body) =
        send(&app, "POST", "/game/game_1/move", Some(r#"{"row": "a", "col": 1}"#)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid request");
    assert_eq!(body["details"], "row and col must be integers");

    let (status, body) =
        send(&app, "POST", "/game/game_1/move", Some(r#"{"row": null, "col": 1}"#)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid request");
    assert_eq!(body["details"], "row and col must be integers");

    let huge = r#"{"row": 9223372036854775808, "col": 0}"#;
    let (status, body) = send(&app, "POST", "/game/game_1/move", Some(huge)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid move");
    assert_eq!(body["details"], "row and col must be between 0 and 2");

    let (status, body) = play(&app, "game_1", 3, 0).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid move");
    assert_eq!(body["details"], "row and col must be between 0 and 2");

    let (status, body) = play(&app, "game_1", 0, -1).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"], "row and col must be between 0 and 2");

    let (_, history) = send(&app, "GET", "/game/game_1/moves", None).await;
    assert!(history["moves"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_occupied_cell() {
    let app = test_app();
    send(&app, "POST", "/game", None).await;
    play(&app, "game_1", 1, 1).await;

    for (row, col) in [(1, 1), (0, 0)] {
        let (status, body) = play(&app, "game_1", row, col).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Invalid move");
        assert_eq!(body["details"], "Position is already occupied or invalid");
    }

    let (_, history) = send(&app, "GET", "/game/game_1/moves", None).await;
    assert_eq!(history["moves"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_list_and_get() {
    let app = test_app();
    let (_, body) = send(&app, "GET", "/games", None).await;
    assert_eq!(body["games"], json!([]));

    for _ in 0..3 {
        send(&app, "POST", "/game", None).await;
    }
    play(&app, "game_2", 0, 0).await;

    let (status, body) = send(&app, "GET", "/games", None).await;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<&str> = body["games"]
        .as_array()
        .unwrap()
        .iter()
        .map(|game| game["game_id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["game_1", "game_2", "game_3"]);

    let (status, game) = send(&app, "GET", "/game/game_2", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(game["board"][0][0], "X");
    assert_eq!(game["board"][0][1], "O");
    assert_eq!(game["status"], "in_progress");
    assert!(game["created_at"].is_string());
}

#[tokio::test]
async fn test_health() {
    let app = test_app();
    let (status, body) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "healthy" }));
}
