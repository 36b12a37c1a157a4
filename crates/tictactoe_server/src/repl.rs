//! Interactive command loop shared by the terminal front ends.
//!
//! Parsing and rendering live here; what a command actually does is up to
//! the [`CommandHandler`] driving the loop (remote server or in-process).

use crate::api::models::{GameView, MoveResponse};
use anyhow::Result;
use std::future::Future;
use std::io::Write;
use std::str::FromStr;
use tictactoe_core::{Actor, GameStatus, MoveRecord};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, instrument};

/// Help text for the command loop.
pub const HELP: &str = "
=== Tic-Tac-Toe ===

Commands:
  new                     - Create a new game
  move <row> <col>        - Make a move at position (row, col). Row and col are 0-2.
  board                   - Show the current board
  moves [game_id]         - Show all moves for current or specified game
  list                    - List all games
  help                    - Show this help message
  quit / exit             - Exit

Notes:
  - You are 'X' and the computer is 'O'
  - The computer moves right after you
  - Board positions are (row, col) with indices 0-2
";

/// One line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserCommand {
    /// Start a new game.
    New,
    /// Move in the current game. Range checks happen downstream.
    Move {
        /// Requested row.
        row: i64,
        /// Requested column.
        col: i64,
    },
    /// Show the current board.
    Board,
    /// Show the move history of a game, the current one by default.
    Moves(Option<String>),
    /// List every game.
    List,
    /// Print help.
    Help,
    /// Leave the loop.
    Quit,
}

/// Input that is not a command.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum ParseError {
    /// Nothing typed.
    #[display("Empty command")]
    Empty,
    /// `move` without exactly two arguments.
    #[display("Usage: move <row> <col>")]
    MoveUsage,
    /// `move` with non-integer arguments.
    #[display("Row and col must be integers")]
    NotIntegers,
    /// Anything else.
    #[display("Unknown command: {}", _0)]
    Unknown(String),
}

impl std::error::Error for ParseError {}

impl FromStr for UserCommand {
    type Err = ParseError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let lowered = line.trim().to_lowercase();
        let parts: Vec<&str> = lowered.split_whitespace().collect();
        let Some((&command, args)) = parts.split_first() else {
            return Err(ParseError::Empty);
        };

        match command {
            "quit" | "exit" => Ok(UserCommand::Quit),
            "help" => Ok(UserCommand::Help),
            "new" => Ok(UserCommand::New),
            "board" => Ok(UserCommand::Board),
            "list" | "games" => Ok(UserCommand::List),
            "moves" => Ok(UserCommand::Moves(args.first().map(|id| id.to_string()))),
            "move" => match args {
                [row, col] => match (row.parse(), col.parse()) {
                    (Ok(row), Ok(col)) => Ok(UserCommand::Move { row, col }),
                    _ => Err(ParseError::NotIntegers),
                },
                _ => Err(ParseError::MoveUsage),
            },
            other => Err(ParseError::Unknown(other.to_string())),
        }
    }
}

/// Executes commands for the loop.
pub trait CommandHandler {
    /// First lines printed when the loop starts.
    fn banner(&self) -> String;

    /// Runs one command. Errors are printed and the loop continues.
    fn handle(&mut self, command: UserCommand) -> impl Future<Output = Result<()>>;
}

/// Reads commands from stdin until `quit`, end of input, or Ctrl+C.
#[instrument(skip(handler))]
pub async fn run<H: CommandHandler>(handler: &mut H) -> Result<()> {
    println!("{}", handler.banner());
    println!("Type 'help' for available commands\n");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let line = tokio::select! {
            line = lines.next_line() => line?,
            _ = tokio::signal::ctrl_c() => None,
        };
        let Some(line) = line else {
            println!("\nGoodbye!");
            break;
        };

        match line.parse::<UserCommand>() {
            Ok(UserCommand::Quit) => {
                println!("Goodbye!");
                break;
            }
            Ok(UserCommand::Help) => println!("{}", HELP),
            Ok(command) => {
                debug!(?command, "Running command");
                if let Err(error) = handler.handle(command).await {
                    println!("✗ Error: {:#}", error);
                }
            }
            Err(ParseError::Empty) => {}
            Err(error @ ParseError::Unknown(_)) => {
                println!("✗ {}", error);
                println!("Type 'help' for available commands");
            }
            Err(error) => println!("✗ {}", error),
        }
    }
    Ok(())
}

/// Renders the result of a turn.
pub fn render_turn(response: &MoveResponse) -> String {
    let mut out = format!("\n✓ Move made at {}\n", response.player_move);
    if let Some(reply) = response.opponent_move {
        out.push_str(&format!("Computer answered at {}\n", reply));
    }
    out.push_str(&response.board.to_string());
    out.push_str(&format!("Status: {}\n", response.status));
    if let Some(winner) = response.winner {
        out.push_str(&format!("Winner: {}\n", winner));
    }
    out.push_str(&response.message);
    out
}

/// Renders a move history.
pub fn render_moves(game_id: &str, moves: &[MoveRecord]) -> String {
    let mut out = format!("\n=== Moves for game {} ===\n", game_id);
    if moves.is_empty() {
        out.push_str("No moves yet.\n");
    }
    for (number, record) in moves.iter().enumerate() {
        let side = match record.actor() {
            Actor::Player => "PLAYER",
            Actor::Opponent => "COMPUTER",
        };
        out.push_str(&format!(
            "{}. {} -> {} at {}\n",
            number + 1,
            side,
            record.position(),
            record.timestamp().to_rfc3339()
        ));
    }
    out
}

/// Renders every game with its board.
pub fn render_games(games: &[GameView]) -> String {
    let mut out = format!("\n=== All Games ({} total) ===\n", games.len());
    if games.is_empty() {
        out.push_str("No games yet.\n");
    }
    for game in games {
        let winner = game
            .winner
            .map(|actor| actor.to_string())
            .unwrap_or_else(|| "N/A".to_string());
        out.push_str(&format!(
            "\nGame ID: {}\n  Status: {}\n  Winner: {}\n  Created: {}\n  Board:\n",
            game.game_id,
            game.status,
            winner,
            game.created_at.to_rfc3339()
        ));
        for line in game.board.to_string().lines() {
            out.push_str(&format!("    {}\n", line));
        }
    }
    out
}

/// Renders one game's board and status.
pub fn render_game(game: &GameView) -> String {
    let mut out = format!("\nGame {} ({})\n{}", game.game_id, game.status, game.board);
    if game.status == GameStatus::InProgress {
        out.push_str("Your turn!");
    }
    out
}
