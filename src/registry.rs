//! In-memory game registry shared across HTTP requests.

use crate::game::{Game, Mark, MoveError};
use derive_more::{Display, Error, From};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use tracing::{debug, info, instrument, warn};

/// Unique identifier for a game.
pub type GameId = u32;

/// Errors from registry operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error, From)]
pub enum RegistryError {
    /// No game with the requested id.
    #[display("game does not exist")]
    NotFound,
    /// The game rejected the move.
    #[display("{_0}")]
    Move(MoveError),
}

#[derive(Debug)]
struct RegistryState {
    next_id: GameId,
    games: BTreeMap<GameId, Game>,
}

/// Owns all games and the id counter.
///
/// Cloning yields another handle to the same registry. All operations take
/// the inner lock, so concurrent moves on the same game serialize instead
/// of losing updates. Ids are monotonically increasing and never reused;
/// games live for the process lifetime.
#[derive(Debug, Clone)]
pub struct GameRegistry {
    state: Arc<Mutex<RegistryState>>,
}

impl GameRegistry {
    /// Creates an empty registry. Ids start at 1.
    #[instrument]
    pub fn new() -> Self {
        info!("Creating game registry");
        Self {
            state: Arc::new(Mutex::new(RegistryState {
                next_id: 1,
                games: BTreeMap::new(),
            })),
        }
    }

    /// Creates a fresh game and returns its id.
    #[instrument(skip(self))]
    pub fn create(&self) -> GameId {
        let mut state = self.state.lock().unwrap();
        let id = state.next_id;
        state.next_id += 1;
        state.games.insert(id, Game::new(id));
        info!(game_id = id, "Created new game");
        id
    }

    /// Gets a snapshot of the game with the given id.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotFound`] if no such game exists.
    #[instrument(skip(self))]
    pub fn get(&self, id: GameId) -> Result<Game, RegistryError> {
        let state = self.state.lock().unwrap();
        let game = state.games.get(&id).cloned();

        if game.is_none() {
            debug!(game_id = id, "Game not found");
        }

        game.ok_or(RegistryError::NotFound)
    }

    /// Returns snapshots of all games, in ascending id order.
    #[instrument(skip(self))]
    pub fn list(&self) -> Vec<Game> {
        let state = self.state.lock().unwrap();
        let games: Vec<_> = state.games.values().cloned().collect();
        debug!(count = games.len(), "Listed games");
        games
    }

    /// Applies a validated move to the game with the given id.
    ///
    /// Lookup and mutation happen under the same lock, so two concurrent
    /// moves on one game cannot both observe the pre-move state.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotFound`] for an unknown game, or the
    /// game's [`MoveError`] if the move violates the rules.
    #[instrument(skip(self))]
    pub fn apply_move(&self, id: GameId, player: Mark, cell: usize) -> Result<(), RegistryError> {
        let mut state = self.state.lock().unwrap();
        let game = state.games.get_mut(&id).ok_or(RegistryError::NotFound)?;

        game.place(player, cell).map_err(|e| {
            warn!(game_id = id, %player, cell, error = %e, "Move rejected");
            RegistryError::Move(e)
        })?;

        info!(
            game_id = id,
            %player,
            cell,
            over = game.is_over(),
            "Move applied"
        );
        Ok(())
    }
}

impl Default for GameRegistry {
    fn default() -> Self {
        Self::new()
    }
}
