//! Tic-tac-toe - unified CLI.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tictactoe_server::cli::{Cli, Command};
use tictactoe_server::{ServerConfig, client, logging, play, server};
use tracing::instrument;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Command::Serve { host, port, config } => run_server(host, port, config).await,
        Command::Client { server_url } => {
            logging::init(&logging::interactive_filter(), None);
            client::run_client(server_url).await
        }
        Command::Play { seed } => {
            logging::init(&logging::interactive_filter(), None);
            play::run_local(seed).await
        }
    }
}

/// Resolves configuration (defaults, file, environment, flags) and serves.
#[instrument(skip_all)]
async fn run_server(
    host: Option<String>,
    port: Option<u16>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = match config_path {
        Some(path) => ServerConfig::from_file(path)?,
        None => ServerConfig::default(),
    };
    let config = config.apply_env()?.with_overrides(host, port);

    logging::init(config.log_filter(), Some(config.log_dir().as_path()));
    tracing::info!(address = %config.bind_address(), "Starting tic-tac-toe server");

    server::serve(config).await
}
