//! HTTP client for the REST API and the remote terminal session.

use crate::api::models::{
    CreateGameResponse, ErrorBody, GameView, GamesResponse, HealthResponse, MoveRequest,
    MoveResponse, MovesResponse,
};
use crate::repl::{self, CommandHandler, UserCommand};
use anyhow::{Context, Result, bail};
use serde::de::DeserializeOwned;
use tictactoe_core::GameId;
use tracing::{debug, info, instrument};

/// Non-success answer from the server.
#[derive(Debug, Clone, derive_more::Error)]
pub struct ServerRejection {
    /// HTTP status code.
    pub status: u16,
    /// Error category from the body.
    pub error: String,
    /// Extra detail from the body.
    pub details: Option<String>,
}

impl std::fmt::Display for ServerRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.error)?;
        if let Some(details) = &self.details {
            write!(f, "\n  Details: {}", details)?;
        }
        Ok(())
    }
}

/// Typed client for the game server.
#[derive(Debug, Clone)]
pub struct RestGameClient {
    base_url: String,
    client: reqwest::Client,
}

impl RestGameClient {
    /// Creates a client for the server at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            client: reqwest::Client::new(),
        }
    }

    /// Returns the server address.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Checks that the server answers.
    #[instrument(skip(self))]
    pub async fn health(&self) -> Result<HealthResponse> {
        let response = self
            .client
            .get(format!("{}/health", self.base_url))
            .send()
            .await
            .context("Failed to reach server")?;
        decode(response).await
    }

    /// Creates a new game.
    #[instrument(skip(self))]
    pub async fn create_game(&self) -> Result<CreateGameResponse> {
        let response = self
            .client
            .post(format!("{}/game", self.base_url))
            .send()
            .await
            .context("Failed to reach server")?;
        let created: CreateGameResponse = decode(response).await?;
        info!(game_id = %created.game_id, "Game created");
        Ok(created)
    }

    /// Submits a move; the server's answer is included in the response.
    #[instrument(skip(self))]
    pub async fn make_move(&self, game_id: &str, row: i64, col: i64) -> Result<MoveResponse> {
        let response = self
            .client
            .post(format!("{}/game/{}/move", self.base_url, game_id))
            .json(&MoveRequest { row, col })
            .send()
            .await
            .context("Failed to reach server")?;
        decode(response).await
    }

    /// Fetches one game.
    #[instrument(skip(self))]
    pub async fn game(&self, game_id: &str) -> Result<GameView> {
        let response = self
            .client
            .get(format!("{}/game/{}", self.base_url, game_id))
            .send()
            .await
            .context("Failed to reach server")?;
        decode(response).await
    }

    /// Fetches a game's move history.
    #[instrument(skip(self))]
    pub async fn moves(&self, game_id: &str) -> Result<MovesResponse> {
        let response = self
            .client
            .get(format!("{}/game/{}/moves", self.base_url, game_id))
            .send()
            .await
            .context("Failed to reach server")?;
        decode(response).await
    }

    /// Lists every game.
    #[instrument(skip(self))]
    pub async fn games(&self) -> Result<GamesResponse> {
        let response = self
            .client
            .get(format!("{}/games", self.base_url))
            .send()
            .await
            .context("Failed to reach server")?;
        decode(response).await
    }
}

/// Parses a success body, or turns an error body into [`ServerRejection`].
async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let status = response.status();
    if status.is_success() {
        return response
            .json::<T>()
            .await
            .context("Failed to parse server response");
    }

    let body = response.json::<ErrorBody>().await.unwrap_or(ErrorBody {
        error: "Unknown error".to_string(),
        details: None,
    });
    debug!(%status, error = %body.error, "Server rejected request");
    Err(ServerRejection {
        status: status.as_u16(),
        error: body.error,
        details: body.details,
    }
    .into())
}

/// Terminal session against a remote server.
#[derive(Debug)]
pub struct RemoteSession {
    client: RestGameClient,
    current_game: Option<GameId>,
}

impl RemoteSession {
    /// Creates a session with no active game.
    pub fn new(client: RestGameClient) -> Self {
        Self {
            client,
            current_game: None,
        }
    }

    fn current(&self) -> Result<&GameId> {
        match &self.current_game {
            Some(id) => Ok(id),
            None => bail!("No active game. Create a new game first."),
        }
    }
}

impl CommandHandler for RemoteSession {
    fn banner(&self) -> String {
        format!(
            "=== Tic-Tac-Toe CLI Client ===\nConnecting to server at {}",
            self.client.base_url()
        )
    }

    async fn handle(&mut self, command: UserCommand) -> Result<()> {
        match command {
            UserCommand::New => {
                let created = self.client.create_game().await?;
                println!("\n✓ New game created: {}", created.game_id);
                println!("{}", created.message);
                print!("{}", created.board);
                self.current_game = Some(created.game_id);
            }
            UserCommand::Move { row, col } => {
                let game_id = self.current()?.clone();
                let response = self.client.make_move(game_id.as_str(), row, col).await?;
                println!("{}", repl::render_turn(&response));
                if response.status.is_terminal() {
                    println!("\nGame {} has ended.", game_id);
                    self.current_game = None;
                }
            }
            UserCommand::Board => {
                let game_id = self.current()?.clone();
                let game = self.client.game(game_id.as_str()).await?;
                println!("{}", repl::render_game(&game));
            }
            UserCommand::Moves(requested) => {
                let game_id = match requested {
                    Some(id) => id,
                    None => self
                        .current()
                        .context("No game ID specified and no active game.")?
                        .to_string(),
                };
                let history = self.client.moves(&game_id).await?;
                print!("{}", repl::render_moves(&game_id, &history.moves));
            }
            UserCommand::List => {
                let listing = self.client.games().await?;
                print!("{}", repl::render_games(&listing.games));
            }
            UserCommand::Help | UserCommand::Quit => {}
        }
        Ok(())
    }
}

/// Runs the interactive client against `server_url`.
#[instrument]
pub async fn run_client(server_url: String) -> Result<()> {
    let client = RestGameClient::new(server_url);
    if let Err(error) = client.health().await {
        println!("✗ Connection error: {:#}", error);
        println!("Make sure the server is running on {}", client.base_url());
    }
    let mut session = RemoteSession::new(client);
    repl::run(&mut session).await
}
