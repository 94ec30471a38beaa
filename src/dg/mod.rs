//! Dependency graphs and their level markings.
//!
//! A dependency graph encodes the bisimulation problem: a node is marked
//! ONE (the Attacker wins from it) if some hyperedge has all of its targets
//! marked ONE. The global fixpoint also ranks every ONE node by the round
//! it was discovered in, its *level*, which guides optimal attacks.
//!
//! - [`DependencyGraph`]: read-only hyperedge view
//! - [`BisimulationDependencyGraph`]: the bisimulation instance, with the
//!   per-role move enumerators the game consumes
//! - [`solve_global_level`]: the fixpoint producing a [`LevelMarking`]

mod bisimulation;
mod graph;
mod marking;

pub use bisimulation::{BisimulationDependencyGraph, NodeKind};
pub use graph::{DependencyGraph, Hyperedge};
pub use marking::{solve_global_level, Level, LevelMarking, Marking};
