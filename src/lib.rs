//! # bisim-game
//!
//! A turn-based engine for the bisimulation game between two processes of
//! a labelled transition system.
//!
//! ## Design Principles
//!
//! 1. **Solve First, Then Play**: The dependency graph of the game is built
//!    and solved once. Automated players read the level marking; they never
//!    search.
//!
//! 2. **Rules Behind a Trait**: The turn protocol lives in [`Game`]; the
//!    bisimulation-specific parts live behind [`DependencyGame`].
//!
//! 3. **Cancellable Turns**: Automated decisions are deferred tasks on the
//!    current `LocalSet`. Stopping a game cancels them before it returns.
//!
//! ## Architecture
//!
//! - **Attacker / Defender**: The Attacker moves under strong semantics on
//!   either process; the Defender answers on the other, under strong or
//!   weak semantics. A player with no legal move loses.
//!
//! - **Level Marking**: Nodes the Attacker wins from get a finite level,
//!   the number of moves it needs. The winning Attacker always moves to a
//!   lower level; the winning Defender always moves to a ZERO node.
//!
//! ## Modules
//!
//! - `core`: Identifiers, roles, actions, moves, errors, configuration, RNG
//! - `lts`: Process graphs and successor generators
//! - `dg`: Bisimulation dependency graph and its level-marking solver
//! - `game`: Turn protocol, bisimulation rules and game log
//! - `players`: Human and automated players
//! - `driver`: Session owning the live game

pub mod core;
pub mod dg;
pub mod driver;
pub mod game;
pub mod lts;
pub mod players;

// Re-export commonly used types
pub use crate::core::{
    Action, Color, GameConfig, GameError, GameRng, Move, NodeId, ProcessId, Result, Role,
    Semantics, Side,
};

pub use crate::lts::{
    expand_bfs, successor_generator, ProcessGraph, StrongSuccessors, SuccessorGenerator, Transition,
    WeakSuccessors,
};

pub use crate::dg::{
    solve_global_level, BisimulationDependencyGraph, DependencyGraph, Hyperedge, Level,
    LevelMarking, Marking, NodeKind,
};

pub use crate::game::{
    BisimulationGame, DependencyGame, Game, GameHandle, GameLog, LogEntry, Phase, TurnState,
    WeakGame,
};

pub use crate::players::{Automated, Deferred, Human, Player, PlayerKind};

pub use crate::driver::Session;
