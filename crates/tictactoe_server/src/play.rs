//! Offline play against the computer, no server required.

use crate::api::models::{GameView, MoveResponse, WELCOME_MESSAGE};
use crate::repl::{self, CommandHandler, UserCommand};
use anyhow::{Result, bail};
use rand::rngs::StdRng;
use tictactoe_core::{BOARD_SIZE, GameHandle, GameRegistry, MoveError, RandomPicker};
use tracing::{debug, instrument};

/// Terminal session backed by an in-process registry.
#[derive(Debug)]
pub struct LocalSession {
    registry: GameRegistry,
    picker: RandomPicker<StdRng>,
    current: Option<GameHandle>,
}

impl LocalSession {
    /// Creates a session; a seed makes the computer's replies repeatable.
    pub fn new(seed: Option<u64>) -> Self {
        let picker = match seed {
            Some(seed) => RandomPicker::seeded(seed),
            None => RandomPicker::from_entropy(),
        };
        Self {
            registry: GameRegistry::new(),
            picker,
            current: None,
        }
    }

    fn current(&self) -> Result<&GameHandle> {
        match &self.current {
            Some(handle) => Ok(handle),
            None => bail!("No active game. Create a new game first."),
        }
    }
}

impl CommandHandler for LocalSession {
    fn banner(&self) -> String {
        "=== Tic-Tac-Toe (offline) ===".to_string()
    }

    async fn handle(&mut self, command: UserCommand) -> Result<()> {
        match command {
            UserCommand::New => {
                let handle = self.registry.create_game();
                let view = GameView::from(&*handle.lock());
                println!("\n✓ New game created: {}", view.game_id);
                println!("{}", WELCOME_MESSAGE);
                print!("{}", view.board);
                self.current = Some(handle);
            }
            UserCommand::Move { row, col } => {
                let (row, col) = match (to_index(row), to_index(col)) {
                    (Some(row), Some(col)) => (row, col),
                    _ => bail!("Invalid move\n  Details: row and col must be between 0 and 2"),
                };
                let handle = self.current()?.clone();
                let response = {
                    let mut game = handle.lock();
                    let report = game
                        .play_turn(row, col, &mut self.picker)
                        .map_err(describe_rejection)?;
                    MoveResponse::from_turn(&game, &report)
                };
                debug!(game_id = %response.game_id, status = %response.status, "Turn played");
                println!("{}", repl::render_turn(&response));
                if response.status.is_terminal() {
                    println!("\nGame {} has ended.", response.game_id);
                    self.current = None;
                }
            }
            UserCommand::Board => {
                let view = GameView::from(&*self.current()?.lock());
                println!("{}", repl::render_game(&view));
            }
            UserCommand::Moves(requested) => {
                let handle = match requested {
                    Some(id) => match self.registry.lookup(&id) {
                        Some(handle) => handle,
                        None => bail!("Game not found"),
                    },
                    None => self.current()?.clone(),
                };
                let history = handle.lock().move_history();
                print!("{}", repl::render_moves(handle.id().as_str(), &history));
            }
            UserCommand::List => {
                let games: Vec<GameView> = self
                    .registry
                    .list_all()
                    .iter()
                    .map(|handle| GameView::from(&*handle.lock()))
                    .collect();
                print!("{}", repl::render_games(&games));
            }
            UserCommand::Help | UserCommand::Quit => {}
        }
        Ok(())
    }
}

fn to_index(value: i64) -> Option<usize> {
    usize::try_from(value).ok().filter(|&v| v < BOARD_SIZE)
}

/// Phrases a rejected move the way the server reports it.
fn describe_rejection(error: MoveError) -> anyhow::Error {
    match error {
        MoveError::GameOver(status) => {
            anyhow::anyhow!("Game is already finished\n  Details: Game is {}", status)
        }
        other => {
            debug!(%other, "Move rejected");
            anyhow::anyhow!("Invalid move\n  Details: Position is already occupied or invalid")
        }
    }
}

/// Runs an offline game loop on stdin.
#[instrument]
pub async fn run_local(seed: Option<u64>) -> Result<()> {
    let mut session = LocalSession::new(seed);
    repl::run(&mut session).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use tictactoe_core::GameStatus;

    #[tokio::test]
    async fn test_move_without_game_fails() {
        let mut session = LocalSession::new(Some(1));
        let err = session
            .handle(UserCommand::Move { row: 0, col: 0 })
            .await
            .unwrap_err();
        assert!(err.to_string().contains("No active game"));
    }

    #[tokio::test]
    async fn test_new_then_move_plays_both_sides() {
        let mut session = LocalSession::new(Some(9));
        session.handle(UserCommand::New).await.unwrap();
        session
            .handle(UserCommand::Move { row: 1, col: 1 })
            .await
            .unwrap();

        let handle = session.current.clone().unwrap();
        let game = handle.lock();
        assert_eq!(game.move_count(), 2);
        assert_eq!(game.status(), GameStatus::InProgress);
    }

    #[tokio::test]
    async fn test_out_of_range_rejected_before_game() {
        let mut session = LocalSession::new(Some(2));
        session.handle(UserCommand::New).await.unwrap();
        let err = session
            .handle(UserCommand::Move { row: -1, col: 0 })
            .await
            .unwrap_err();
        assert!(err.to_string().contains("between 0 and 2"));
        assert_eq!(session.current.as_ref().unwrap().lock().move_count(), 0);
    }

    #[tokio::test]
    async fn test_occupied_cell_rejected() {
        let mut session = LocalSession::new(Some(4));
        session.handle(UserCommand::New).await.unwrap();
        session
            .handle(UserCommand::Move { row: 0, col: 0 })
            .await
            .unwrap();
        let err = session
            .handle(UserCommand::Move { row: 0, col: 0 })
            .await
            .unwrap_err();
        assert!(err.to_string().contains("already occupied"));
    }
}
