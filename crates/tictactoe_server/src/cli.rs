//! Command-line interface for the tictactoe binary.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Tic-tac-toe against the computer, over HTTP or offline
#[derive(Parser, Debug)]
#[command(name = "tictactoe")]
#[command(about = "Tic-tac-toe game server and terminal clients", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the HTTP game server
    Serve {
        /// Host to bind to (default 127.0.0.1)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to (default 5000)
        #[arg(short, long)]
        port: Option<u16>,

        /// Optional TOML config file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Play against a running server from the terminal
    Client {
        /// Game server URL
        #[arg(long, default_value = "http://localhost:5000")]
        server_url: String,
    },

    /// Play offline in this process
    Play {
        /// Seed for the computer's moves
        #[arg(long)]
        seed: Option<u64>,
    },
}
