//! Rules trait for dependency-graph games.
//!
//! Games implement `DependencyGame` to define:
//! - Where play starts
//! - What moves each role has at a node
//! - Who wins the game overall
//! - How a winning automated player picks its move

use crate::core::{Move, NodeId, ProcessId, Result, Role};

/// Rules of a game played over a solved dependency graph.
///
/// The [`Game`](super::Game) owns the turn protocol; implementors only
/// answer questions about nodes. All methods are pure: the graph and its
/// marking are fixed once the game is constructed.
pub trait DependencyGame {
    /// The node play starts from.
    fn root(&self) -> NodeId;

    /// Legal moves for `role` at `node`, in a stable order.
    ///
    /// An empty list means `role` cannot move and loses.
    fn choices(&self, node: NodeId, role: Role) -> Vec<Move>;

    /// The role that wins with optimal play from the root.
    fn winner(&self) -> Role;

    /// The Attacker's move when it is the overall winner.
    ///
    /// Fails with `NoChoices` if `choices` is empty.
    fn best_winning_attack(&self, node: NodeId, choices: &[Move]) -> Result<Move>;

    /// The Defender's move when it is the overall winner.
    ///
    /// Fails with `NoChoices` if `choices` is empty and with
    /// `NoWinningDefence` if no choice keeps the Defender winning.
    fn winning_defend(&self, node: NodeId, choices: &[Move]) -> Result<Move>;

    /// Display label of a process, for the game log.
    fn label(&self, process: ProcessId) -> String;
}
