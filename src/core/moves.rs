//! A move: one directed edge of the game.

use serde::{Deserialize, Serialize};

use super::action::Action;
use super::ids::{NodeId, ProcessId};
use super::role::Side;

/// A legal move from the current node.
///
/// Moves are produced by the dependency graph and handed to players as
/// their choices; a player submits one of them back to the game.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// Process the moving side ends up in.
    pub target_process: ProcessId,

    /// Dependency-graph node the game moves to.
    pub next_node: NodeId,

    /// Label of the transition taken.
    pub action: Action,

    /// Side of the process pair the transition was taken on.
    pub side: Side,
}

impl Move {
    /// Create a new move.
    #[must_use]
    pub fn new(target_process: ProcessId, next_node: NodeId, action: Action, side: Side) -> Self {
        Self {
            target_process,
            next_node,
            action,
            side,
        }
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} --{}--> {} ({})",
            self.side, self.action, self.target_process, self.next_node
        )
    }
}
