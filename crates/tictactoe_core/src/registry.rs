//! In-memory game registry.

use crate::game::Game;
use crate::types::GameId;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, info, instrument};

/// Shared handle to a game owned by a [`GameRegistry`].
///
/// Every read or write goes through [`GameHandle::lock`], so a human move
/// and the opponent's reply can run under one lock with no intermediate
/// state visible to other callers.
#[derive(Debug, Clone)]
pub struct GameHandle {
    id: GameId,
    game: Arc<Mutex<Game>>,
}

impl GameHandle {
    /// Returns the game identifier without taking the lock.
    pub fn id(&self) -> &GameId {
        &self.id
    }

    /// Locks the game for exclusive access.
    ///
    /// A panic while holding the lock cannot leave a game half-updated (each
    /// mutation is a single cell plus a log entry), so poisoning is ignored.
    pub fn lock(&self) -> MutexGuard<'_, Game> {
        self.game.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns true if both handles point at the same game.
    pub fn same_game(&self, other: &GameHandle) -> bool {
        Arc::ptr_eq(&self.game, &other.game)
    }
}

#[derive(Debug, Default)]
struct RegistryState {
    counter: u64,
    games: Vec<GameHandle>,
    index: HashMap<GameId, usize>,
}

/// Owns every game in the process.
///
/// Cloning is cheap and clones share the same games. Games are never
/// removed, so the registry grows for the lifetime of the process.
#[derive(Debug, Clone, Default)]
pub struct GameRegistry {
    state: Arc<Mutex<RegistryState>>,
}

impl GameRegistry {
    /// Creates an empty registry.
    #[instrument]
    pub fn new() -> Self {
        info!("Creating game registry");
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, RegistryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Creates a game with the next identifier (`game_1`, `game_2`, ...).
    ///
    /// The counter bump and insertion happen under one lock, so identifiers
    /// are unique and gap-free.
    #[instrument(skip(self))]
    pub fn create_game(&self) -> GameHandle {
        let mut state = self.state();
        state.counter += 1;
        let id = GameId::from_sequence(state.counter);

        let handle = GameHandle {
            id: id.clone(),
            game: Arc::new(Mutex::new(Game::new(id.clone(), Utc::now()))),
        };
        let position = state.games.len();
        state.games.push(handle.clone());
        state.index.insert(id.clone(), position);

        info!(game_id = %id, total = state.games.len(), "Created new game");
        handle
    }

    /// Looks up a game by identifier. Never creates one.
    #[instrument(skip(self))]
    pub fn lookup(&self, id: &str) -> Option<GameHandle> {
        let state = self.state();
        let handle = state.index.get(id).map(|&position| state.games[position].clone());
        if handle.is_none() {
            debug!(game_id = id, "Game not found");
        }
        handle
    }

    /// All games in creation order, oldest first.
    #[instrument(skip(self))]
    pub fn list_all(&self) -> Vec<GameHandle> {
        let games = self.state().games.clone();
        debug!(count = games.len(), "Listed games");
        games
    }

    /// Number of games created so far.
    pub fn len(&self) -> usize {
        self.state().games.len()
    }

    /// Returns true before the first game is created.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
