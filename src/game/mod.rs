//! The turn-based game engine.
//!
//! - [`DependencyGame`]: rules of a concrete dependency-graph game
//! - [`Game`]: the turn protocol shared by every such game
//! - [`GameHandle`]: the shared single-threaded handle players and drivers
//!   play through
//! - [`BisimulationGame`]: the bisimulation instantiation
//! - [`GameLog`]: append-only move history
//!
//! ## Turn protocol
//!
//! ```text
//! Unstarted --start--> ToMove(Attacker) <--play--> ToMove(Defender)
//!                            |                          |
//!                            +--- no reply ---> Finished { winner }
//! ```
//!
//! `stop` may be called from any state; it cancels pending automated
//! decisions and rejects every later `play`.

mod bisimulation;
mod engine;
mod history;
mod rules;
mod state;

pub use bisimulation::BisimulationGame;
pub use engine::{Game, GameHandle, WeakGame};
pub use history::{GameLog, LogEntry};
pub use rules::DependencyGame;
pub use state::{Phase, TurnState};
