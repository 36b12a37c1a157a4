//! HTTP server entry point.

use crate::api::{AppState, create_router};
use crate::config::ServerConfig;
use anyhow::{Context, Result};
use tictactoe_core::{GameRegistry, RandomPicker};
use tracing::{info, instrument, warn};

/// Binds the configured address and serves until Ctrl+C.
#[instrument(skip(config), fields(address = %config.bind_address()))]
pub async fn serve(config: ServerConfig) -> Result<()> {
    let picker = match config.seed() {
        Some(seed) => {
            info!(seed, "Opponent uses a fixed seed");
            RandomPicker::seeded(*seed)
        }
        None => RandomPicker::from_entropy(),
    };
    let state = AppState::new(GameRegistry::new(), picker);
    let app = create_router(state);

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;

    info!("Server ready at http://{}/", address);
    info!("Endpoints: POST /game, GET /games, GET /game/{{id}}, GET /health");
    info!("Moves: POST /game/{{id}}/move, GET /game/{{id}}/moves");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        warn!(%error, "Failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
