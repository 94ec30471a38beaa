//! Core engine types: identifiers, roles, actions, moves, errors,
//! configuration and RNG.
//!
//! Everything here is shared by the process layer, the dependency graph,
//! the game state machine and the players.

pub mod action;
pub mod config;
pub mod error;
pub mod ids;
pub mod moves;
pub mod rng;
pub mod role;

pub use action::Action;
pub use config::{GameConfig, Semantics};
pub use error::{GameError, Result};
pub use ids::{NodeId, ProcessId};
pub use moves::Move;
pub use rng::GameRng;
pub use role::{Color, Role, Side};
