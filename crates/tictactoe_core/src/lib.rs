//! Tic-tac-toe core - a human player against an automatic opponent.
//!
//! This crate holds the only logic with real invariants: move legality,
//! win/draw detection, status transitions, and move-history ordering. It
//! knows nothing about HTTP, JSON bodies, or terminals.
//!
//! # Architecture
//!
//! - **Game**: a single match's state machine
//! - **GameRegistry**: owns every game, mints `game_<n>` identifiers
//! - **Rules**: pure board evaluation
//! - **MovePicker**: injectable randomness for the opponent
//!
//! # Example
//!
//! ```
//! use tictactoe_core::{GameRegistry, GameStatus, RandomPicker};
//!
//! let registry = GameRegistry::new();
//! let handle = registry.create_game();
//!
//! let mut game = handle.lock();
//! let report = game.play_turn(1, 1, &mut RandomPicker::seeded(3)).unwrap();
//! assert_eq!(report.status, GameStatus::InProgress);
//! assert_eq!(game.move_history().len(), 2);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod game;
mod picker;
mod registry;
pub mod rules;
mod types;

// Crate-level exports - Board and values
pub use types::{Actor, BOARD_SIZE, Board, Cell, Coord, GameId, GameStatus, Outcome};

// Crate-level exports - Moves
pub use action::{MoveError, MoveRecord};

// Crate-level exports - Game state machine
pub use game::{Game, TurnReport};

// Crate-level exports - Opponent move selection
pub use picker::{MovePicker, RandomPicker, SequencePicker};

// Crate-level exports - Registry
pub use registry::{GameHandle, GameRegistry};
