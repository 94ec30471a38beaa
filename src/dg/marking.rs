//! Global level marking of a dependency graph.
//!
//! ## Algorithm
//!
//! Synchronous rounds starting from an all-ZERO marking. In round `k`, every
//! node still marked ZERO that has a hyperedge whose targets are all ONE
//! with a level below `k` becomes ONE with level `k`. An empty hyperedge
//! qualifies in round 1. The loop stops at the first round that marks
//! nothing.
//!
//! A node's level is therefore one more than the best (smallest) worst-case
//! level among its satisfied hyperedges: the number of steps the Attacker
//! needs to force a win from it. ZERO nodes keep [`Level::INFINITY`].

use serde::{Deserialize, Serialize};

use super::graph::DependencyGraph;
use crate::core::NodeId;

/// Rank of a node in the fixpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Level(pub u32);

impl Level {
    /// Level of nodes never marked ONE.
    pub const INFINITY: Level = Level(u32::MAX);

    /// Is this a finite level?
    #[must_use]
    pub const fn is_finite(self) -> bool {
        self.0 != u32::MAX
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_finite() {
            write!(f, "{}", self.0)
        } else {
            write!(f, "inf")
        }
    }
}

/// Binary win marking.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Marking {
    /// The Defender wins from this node.
    Zero,
    /// The Attacker wins from this node.
    One,
}

/// Immutable per-node levels and markings.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LevelMarking {
    levels: Vec<Level>,
}

impl LevelMarking {
    /// Level of a node. Unknown nodes are at infinity.
    #[must_use]
    pub fn level(&self, node: NodeId) -> Level {
        self.levels
            .get(node.index())
            .copied()
            .unwrap_or(Level::INFINITY)
    }

    /// Marking of a node.
    #[must_use]
    pub fn marking(&self, node: NodeId) -> Marking {
        if self.level(node).is_finite() {
            Marking::One
        } else {
            Marking::Zero
        }
    }

    /// Number of marked nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    /// Check if the marking covers no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}

/// Solve a dependency graph to its global level marking.
pub fn solve_global_level<D: DependencyGraph + ?Sized>(dg: &D) -> LevelMarking {
    let mut levels = vec![Level::INFINITY; dg.node_count()];
    let mut round = 1u32;

    loop {
        let current = Level(round);
        let discovered: Vec<usize> = (0..levels.len())
            .filter(|&i| !levels[i].is_finite())
            .filter(|&i| {
                dg.hyperedges(NodeId::new(i as u32))
                    .iter()
                    .any(|edge| edge.iter().all(|t| levels[t.index()] < current))
            })
            .collect();

        if discovered.is_empty() {
            break;
        }

        log::trace!("[solver] round {}: {} nodes marked ONE", round, discovered.len());
        for i in discovered {
            levels[i] = current;
        }
        round += 1;
    }

    LevelMarking { levels }
}
