//! Tic-tac-toe game manager with a JSON-over-HTTP API.
//!
//! # Architecture
//!
//! - **Game**: one 3x3 board with turn order and win/draw detection
//! - **Registry**: in-memory, lock-protected map from game id to game
//! - **Server**: axum routes translating the wire format (string-typed
//!   fields) to and from the internal types
//!
//! # Example
//!
//! ```
//! use tictactoe_server::{GameRegistry, Mark};
//!
//! let registry = GameRegistry::new();
//! let id = registry.create();
//! registry.apply_move(id, Mark::X, 4).unwrap();
//! assert_eq!(registry.get(id).unwrap().next_turn(), Mark::O);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod game;
mod registry;
mod server;

// Crate-level exports - Game types
pub use game::{Board, Game, Mark, MoveError, ParseMarkError, Square};

// Crate-level exports - Registry
pub use registry::{GameId, GameRegistry, RegistryError};

// Crate-level exports - HTTP layer
pub use server::{ErrorView, GameView, IdView, MoveRequest, router};
