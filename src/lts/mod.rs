//! Labelled transition systems and successor generation.
//!
//! This is the process layer the game is played over:
//!
//! - [`ProcessGraph`]: named processes and labelled transitions
//! - [`SuccessorGenerator`]: outgoing transitions under a chosen semantics
//!   ([`StrongSuccessors`], [`WeakSuccessors`])

mod graph;
mod succ;

pub use graph::{ProcessGraph, Transition};
pub use succ::{
    expand_bfs, successor_generator, StrongSuccessors, SuccessorGenerator, WeakSuccessors,
};
