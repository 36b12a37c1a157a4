//! HTTP API for the tic-tac-toe server.
//!
//! # Endpoints
//!
//! - `POST /game` - Create a new game
//! - `GET /games` - List all games in creation order
//! - `GET /game/{id}` - Get one game
//! - `POST /game/{id}/move` - Player move, answered by the server
//! - `GET /game/{id}/moves` - Move history
//! - `GET /health` - Server health status
//!
//! # Example Usage
//!
//! ```rust,no_run
//! use tictactoe_server::api::{AppState, create_router};
//! use tictactoe_core::{GameRegistry, RandomPicker};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let state = AppState::new(GameRegistry::new(), RandomPicker::from_entropy());
//! let app = create_router(state);
//!
//! let listener = tokio::net::TcpListener::bind("127.0.0.1:5000").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod games;
pub mod models;

use axum::Router;
use axum::body::Body;
use axum::extract::Request;
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use std::any::Any;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Instant;
use tictactoe_core::{GameRegistry, MovePicker};
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tracing::{error, info, warn};

pub use error::ApiError;

/// Picker shared by every request.
pub type SharedPicker = Arc<Mutex<Box<dyn MovePicker + Send>>>;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Every game in the process.
    pub registry: GameRegistry,
    /// Opponent move selection.
    pub picker: SharedPicker,
}

impl AppState {
    /// Builds state around a registry and an opponent picker.
    pub fn new(registry: GameRegistry, picker: impl MovePicker + Send + 'static) -> Self {
        Self {
            registry,
            picker: Arc::new(Mutex::new(Box::new(picker))),
        }
    }

    /// Locks the opponent picker.
    pub fn picker(&self) -> MutexGuard<'_, Box<dyn MovePicker + Send>> {
        self.picker.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Create the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/game", post(games::create_game))
        .route("/games", get(games::list_games))
        .route("/game/{game_id}", get(games::get_game))
        .route("/game/{game_id}/move", post(games::make_move))
        .route("/game/{game_id}/moves", get(games::get_moves))
        .route("/health", get(games::health))
        .layer(
            ServiceBuilder::new()
                .layer(CatchPanicLayer::custom(handle_panic))
                .layer(CorsLayer::permissive())
                .layer(middleware::from_fn(log_request)),
        )
        .with_state(state)
}

/// Logs every request with its status and latency.
async fn log_request(req: Request<Body>, next: Next) -> Response {
    let method = req.method().clone();
    let uri = req.uri().clone();
    let started = Instant::now();

    let response = next.run(req).await;

    let status = response.status();
    let elapsed_ms = started.elapsed().as_millis();
    if status.is_server_error() {
        warn!(%method, %uri, %status, elapsed_ms, "Request failed");
    } else {
        info!(%method, %uri, %status, elapsed_ms, "Response sent");
    }
    response
}

/// Turns a handler panic into a generic 500 without leaking the payload.
fn handle_panic(payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = payload
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| payload.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    error!(detail, "Handler panicked");
    ApiError::Internal.into_response()
}
