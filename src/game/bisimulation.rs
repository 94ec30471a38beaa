//! The bisimulation game.

use std::rc::Rc;

use crate::core::{GameConfig, GameError, Move, NodeId, ProcessId, Result, Role, Semantics};
use crate::dg::{
    solve_global_level, BisimulationDependencyGraph, DependencyGraph, Level, LevelMarking, Marking,
};
use crate::lts::{successor_generator, ProcessGraph, SuccessorGenerator};

use super::rules::DependencyGame;

/// Bisimulation game between two named processes.
///
/// The dependency graph is built and solved once, at construction. The
/// processes are bisimilar iff the root is marked ZERO, in which case the
/// Defender is the overall winner.
#[derive(Clone, Debug)]
pub struct BisimulationGame {
    graph: Rc<ProcessGraph>,
    left: ProcessId,
    right: ProcessId,
    dg: BisimulationDependencyGraph,
    marking: LevelMarking,
    bisimilar: bool,
}

impl BisimulationGame {
    /// Build and solve the game for `left` and `right`.
    ///
    /// The Attacker moves with `attacker` successors, the Defender answers
    /// with `defender` successors.
    pub fn new(
        graph: Rc<ProcessGraph>,
        attacker: &dyn SuccessorGenerator,
        defender: &dyn SuccessorGenerator,
        left: &str,
        right: &str,
    ) -> Result<Self> {
        let left = graph.resolve(left)?;
        let right = graph.resolve(right)?;
        let dg = BisimulationDependencyGraph::new(attacker, defender, left, right);
        let marking = solve_global_level(&dg);
        let bisimilar = marking.marking(dg.root()) == Marking::Zero;

        log::debug!(
            "{} and {} are {}bisimilar (root level {})",
            graph.label(left),
            graph.label(right),
            if bisimilar { "" } else { "not " },
            marking.level(dg.root())
        );

        Ok(Self {
            graph,
            left,
            right,
            dg,
            marking,
            bisimilar,
        })
    }

    /// Build with strong attacks and defender answers under the configured
    /// semantics.
    pub fn from_config(
        graph: Rc<ProcessGraph>,
        config: &GameConfig,
        left: &str,
        right: &str,
    ) -> Result<Self> {
        let attacker = successor_generator(Rc::clone(&graph), Semantics::Strong);
        let defender = successor_generator(Rc::clone(&graph), config.defender_semantics);
        Self::new(graph, attacker.as_ref(), defender.as_ref(), left, right)
    }

    #[must_use]
    pub fn is_bisimilar(&self) -> bool {
        self.bisimilar
    }

    /// The `(left, right)` processes the game was built for.
    #[must_use]
    pub fn processes(&self) -> (ProcessId, ProcessId) {
        (self.left, self.right)
    }

    pub fn graph(&self) -> &ProcessGraph {
        &self.graph
    }

    pub fn dependency_graph(&self) -> &BisimulationDependencyGraph {
        &self.dg
    }

    pub fn marking(&self) -> &LevelMarking {
        &self.marking
    }

    /// Level of `node` in the solved marking.
    #[must_use]
    pub fn level(&self, node: NodeId) -> Level {
        self.marking.level(node)
    }
}

impl DependencyGame for BisimulationGame {
    fn root(&self) -> NodeId {
        self.dg.root()
    }

    fn choices(&self, node: NodeId, role: Role) -> Vec<Move> {
        match role {
            Role::Attacker => self.dg.attacker_options(node),
            Role::Defender => self.dg.defender_options(node),
        }
    }

    fn winner(&self) -> Role {
        if self.bisimilar {
            Role::Defender
        } else {
            Role::Attacker
        }
    }

    fn best_winning_attack(&self, node: NodeId, choices: &[Move]) -> Result<Move> {
        let first = choices.first().ok_or(GameError::NoChoices(Role::Attacker))?;
        let current = self.marking.level(node);

        let mut best: Option<(&Move, Level)> = None;
        for choice in choices {
            let level = self.marking.level(choice.next_node);
            if level < current && best.map_or(true, |(_, lowest)| level < lowest) {
                best = Some((choice, level));
            }
        }

        match best {
            Some((choice, _)) => Ok(choice.clone()),
            None => {
                log::warn!("no attack lowers level {current} at {node}; playing the first choice");
                Ok(first.clone())
            }
        }
    }

    fn winning_defend(&self, _node: NodeId, choices: &[Move]) -> Result<Move> {
        if choices.is_empty() {
            return Err(GameError::NoChoices(Role::Defender));
        }
        choices
            .iter()
            .find(|choice| self.marking.marking(choice.next_node) == Marking::Zero)
            .cloned()
            .ok_or(GameError::NoWinningDefence)
    }

    fn label(&self, process: ProcessId) -> String {
        self.graph.label(process)
    }
}
