//! The bisimulation dependency graph.
//!
//! Three kinds of nodes alternate along every play:
//!
//! - `Pair(P, Q)`: the Attacker is to move. One singleton hyperedge per
//!   possible attack: every attacker transition of `P` (left side), then
//!   every attacker transition of `Q` (right side).
//! - `LeftAttack(P -a-> P', Q)` / `RightAttack(P, Q -a-> Q')`: the Defender
//!   is to move. A single hyperedge to the pairs reached by every defender
//!   answer with the same action on the other side. An empty hyperedge
//!   means the Defender cannot answer.
//!
//! Pair nodes are shared between attacks; attack nodes are not.
//!
//! Uses an arena (`Vec<DgNode>`) with index-based references, built
//! eagerly breadth-first from the root pair.

use rustc_hash::FxHashMap;
use smallvec::smallvec;

use super::graph::{DependencyGraph, Hyperedge};
use crate::core::{Move, NodeId, ProcessId, Side};
use crate::lts::{SuccessorGenerator, Transition};

/// What a dependency-graph node stands for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NodeKind {
    /// Attacker to move on the pair `(left, right)`.
    Pair { left: ProcessId, right: ProcessId },
    /// The Attacker took `transition` on the left; the Defender must answer
    /// from `right`.
    LeftAttack { transition: Transition, right: ProcessId },
    /// The Attacker took `transition` on the right; the Defender must answer
    /// from `left`.
    RightAttack { left: ProcessId, transition: Transition },
}

#[derive(Clone, Debug)]
struct DgNode {
    kind: NodeKind,
    hyperedges: Vec<Hyperedge>,
}

/// Dependency graph of the bisimulation game between two processes.
#[derive(Clone, Debug)]
pub struct BisimulationDependencyGraph {
    nodes: Vec<DgNode>,
    pairs: FxHashMap<(ProcessId, ProcessId), NodeId>,
}

impl BisimulationDependencyGraph {
    /// Build the graph rooted at the pair `(left, right)`.
    ///
    /// Attacks enumerate `attacker` successors on either side; answers
    /// enumerate `defender` successors on the other side.
    pub fn new(
        attacker: &dyn SuccessorGenerator,
        defender: &dyn SuccessorGenerator,
        left: ProcessId,
        right: ProcessId,
    ) -> Self {
        let mut dg = Self {
            nodes: Vec::new(),
            pairs: FxHashMap::default(),
        };
        dg.pair(left, right);

        // Nodes are appended as they are discovered, so this is a BFS.
        let mut next = 0;
        while next < dg.nodes.len() {
            let hyperedges = dg.expand(NodeId::new(next as u32), attacker, defender);
            dg.nodes[next].hyperedges = hyperedges;
            next += 1;
        }

        log::trace!(
            "[dg] built bisimulation graph for ({}, {}): {} nodes, {} pairs",
            left,
            right,
            dg.nodes.len(),
            dg.pairs.len()
        );
        dg
    }

    fn alloc(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId::new(self.nodes.len() as u32);
        self.nodes.push(DgNode {
            kind,
            hyperedges: Vec::new(),
        });
        id
    }

    fn pair(&mut self, left: ProcessId, right: ProcessId) -> NodeId {
        if let Some(&id) = self.pairs.get(&(left, right)) {
            return id;
        }
        let id = self.alloc(NodeKind::Pair { left, right });
        self.pairs.insert((left, right), id);
        id
    }

    fn expand(
        &mut self,
        node: NodeId,
        attacker: &dyn SuccessorGenerator,
        defender: &dyn SuccessorGenerator,
    ) -> Vec<Hyperedge> {
        match self.nodes[node.index()].kind.clone() {
            NodeKind::Pair { left, right } => {
                let mut hyperedges = Vec::new();
                for transition in attacker.successors(left) {
                    let attack = self.alloc(NodeKind::LeftAttack { transition, right });
                    hyperedges.push(smallvec![attack]);
                }
                for transition in attacker.successors(right) {
                    let attack = self.alloc(NodeKind::RightAttack { left, transition });
                    hyperedges.push(smallvec![attack]);
                }
                hyperedges
            }
            NodeKind::LeftAttack { transition, right } => {
                let answers = defender
                    .successors(right)
                    .into_iter()
                    .filter(|answer| answer.action == transition.action)
                    .map(|answer| self.pair(transition.target, answer.target))
                    .collect();
                vec![answers]
            }
            NodeKind::RightAttack { left, transition } => {
                let answers = defender
                    .successors(left)
                    .into_iter()
                    .filter(|answer| answer.action == transition.action)
                    .map(|answer| self.pair(answer.target, transition.target))
                    .collect();
                vec![answers]
            }
        }
    }

    /// The kind of a node.
    #[must_use]
    pub fn kind(&self, node: NodeId) -> Option<&NodeKind> {
        self.nodes.get(node.index()).map(|n| &n.kind)
    }

    /// The `(left, right)` processes of the configuration at `node`.
    ///
    /// At attack nodes the attacked side has already moved.
    #[must_use]
    pub fn processes(&self, node: NodeId) -> Option<(ProcessId, ProcessId)> {
        self.kind(node).map(|kind| match kind {
            NodeKind::Pair { left, right } => (*left, *right),
            NodeKind::LeftAttack { transition, right } => (transition.target, *right),
            NodeKind::RightAttack { left, transition } => (*left, transition.target),
        })
    }

    /// Attacker moves from `node`, in hyperedge order.
    ///
    /// Empty unless `node` is a pair node.
    #[must_use]
    pub fn attacker_options(&self, node: NodeId) -> Vec<Move> {
        if !matches!(self.kind(node), Some(NodeKind::Pair { .. })) {
            return Vec::new();
        }
        self.hyperedges(node)
            .iter()
            .flat_map(|edge| edge.iter().copied())
            .filter_map(|attack| match self.kind(attack)? {
                NodeKind::LeftAttack { transition, .. } => Some(Move::new(
                    transition.target,
                    attack,
                    transition.action.clone(),
                    Side::Left,
                )),
                NodeKind::RightAttack { transition, .. } => Some(Move::new(
                    transition.target,
                    attack,
                    transition.action.clone(),
                    Side::Right,
                )),
                NodeKind::Pair { .. } => None,
            })
            .collect()
    }

    /// Defender answers from `node`, in hyperedge order.
    ///
    /// Each answer is taken on the side opposite the attack; its
    /// `target_process` is the Defender's new process. Empty unless `node`
    /// is an attack node.
    #[must_use]
    pub fn defender_options(&self, node: NodeId) -> Vec<Move> {
        let (action, side) = match self.kind(node) {
            Some(NodeKind::LeftAttack { transition, .. }) => (&transition.action, Side::Right),
            Some(NodeKind::RightAttack { transition, .. }) => (&transition.action, Side::Left),
            _ => return Vec::new(),
        };
        self.hyperedges(node)
            .iter()
            .flat_map(|edge| edge.iter().copied())
            .filter_map(|answer| {
                let target = match (self.kind(answer)?, side) {
                    (NodeKind::Pair { right, .. }, Side::Right) => *right,
                    (NodeKind::Pair { left, .. }, Side::Left) => *left,
                    _ => return None,
                };
                Some(Move::new(target, answer, action.clone(), side))
            })
            .collect()
    }
}

impl DependencyGraph for BisimulationDependencyGraph {
    fn node_count(&self) -> usize {
        self.nodes.len()
    }

    fn hyperedges(&self, node: NodeId) -> &[Hyperedge] {
        self.nodes
            .get(node.index())
            .map(|n| n.hyperedges.as_slice())
            .unwrap_or(&[])
    }
}
