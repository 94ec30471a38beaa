//! Dependency graph trait.

use smallvec::SmallVec;

use crate::core::NodeId;

/// A hyperedge: a node depends on all of these targets together.
///
/// Most hyperedges of the bisimulation graph are singletons.
pub type Hyperedge = SmallVec<[NodeId; 2]>;

/// A fully constructed dependency graph.
///
/// Nodes are dense: `0..node_count()`, with [`NodeId::ROOT`] as the root.
pub trait DependencyGraph {
    /// Number of nodes.
    fn node_count(&self) -> usize;

    /// Outgoing hyperedges of a node.
    fn hyperedges(&self, node: NodeId) -> &[Hyperedge];

    /// The root node.
    fn root(&self) -> NodeId {
        NodeId::ROOT
    }
}
