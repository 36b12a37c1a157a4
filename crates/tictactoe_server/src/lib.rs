//! REST server and terminal front ends for tic-tac-toe against the computer.
//!
//! The game rules and registry live in [`tictactoe_core`]; this crate puts
//! them behind an HTTP API ([`api`]), a remote terminal client
//! ([`client`]) and an offline terminal game ([`play`]).

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod api;
pub mod cli;
pub mod client;
pub mod config;
pub mod logging;
pub mod play;
pub mod repl;
pub mod server;

pub use api::{AppState, create_router};
pub use client::{RemoteSession, RestGameClient, ServerRejection};
pub use config::{ConfigError, ServerConfig};
pub use play::LocalSession;
pub use server::serve;
