//! Successor generators: outgoing transitions under a chosen semantics.
//!
//! The Attacker always moves under strong semantics; the Defender answers
//! under the semantics of the equivalence being checked.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use rustc_hash::{FxHashMap, FxHashSet};

use super::graph::{ProcessGraph, Transition};
use crate::core::{Action, ProcessId, Semantics};

/// Enumerates the outgoing transitions of a process.
pub trait SuccessorGenerator {
    /// Outgoing transitions of `process`, in a stable order.
    fn successors(&self, process: ProcessId) -> Vec<Transition>;
}

/// Build the successor generator for the given semantics.
pub fn successor_generator(graph: Rc<ProcessGraph>, semantics: Semantics) -> Box<dyn SuccessorGenerator> {
    match semantics {
        Semantics::Strong => Box::new(StrongSuccessors::new(graph)),
        Semantics::Weak => Box::new(WeakSuccessors::new(graph)),
    }
}

/// Breadth-first expansion from `process` under `succ`, up to `max_depth`
/// levels.
///
/// Returns each visited process with its successors, in visiting order.
/// Processes first reached at `max_depth` are listed but not expanded
/// further.
pub fn expand_bfs(
    succ: &dyn SuccessorGenerator,
    process: ProcessId,
    max_depth: usize,
) -> Vec<(ProcessId, Vec<Transition>)> {
    let mut result = Vec::new();
    let mut seen = FxHashSet::default();
    let mut queue = VecDeque::from([(1usize, process)]);
    seen.insert(process);

    while let Some((depth, from)) = queue.pop_front() {
        let transitions = succ.successors(from);
        for t in &transitions {
            if depth < max_depth && seen.insert(t.target) {
                queue.push_back((depth + 1, t.target));
            }
        }
        result.push((from, transitions));
    }

    result
}

/// Strong semantics: exactly the transitions of the graph.
#[derive(Clone, Debug)]
pub struct StrongSuccessors {
    graph: Rc<ProcessGraph>,
}

impl StrongSuccessors {
    #[must_use]
    pub fn new(graph: Rc<ProcessGraph>) -> Self {
        Self { graph }
    }
}

impl SuccessorGenerator for StrongSuccessors {
    fn successors(&self, process: ProcessId) -> Vec<Transition> {
        self.graph.transitions(process).to_vec()
    }
}

/// Weak semantics.
///
/// - `=tau=>` reaches every process in the `tau*` closure, including the
///   process itself
/// - `=a=>` for observable `a` is `tau* a tau*`
///
/// Results are deduplicated and memoized per process.
#[derive(Debug)]
pub struct WeakSuccessors {
    graph: Rc<ProcessGraph>,
    cache: RefCell<FxHashMap<ProcessId, Vec<Transition>>>,
}

impl WeakSuccessors {
    #[must_use]
    pub fn new(graph: Rc<ProcessGraph>) -> Self {
        Self {
            graph,
            cache: RefCell::new(FxHashMap::default()),
        }
    }

    /// Processes reachable by zero or more `tau` steps, in BFS order.
    fn tau_closure(&self, from: ProcessId) -> Vec<ProcessId> {
        let mut seen = FxHashSet::default();
        let mut order = Vec::new();
        let mut queue = VecDeque::from([from]);
        seen.insert(from);

        while let Some(p) = queue.pop_front() {
            order.push(p);
            for t in self.graph.transitions(p) {
                if t.action.is_tau() && seen.insert(t.target) {
                    queue.push_back(t.target);
                }
            }
        }

        order
    }

    fn compute(&self, process: ProcessId) -> Vec<Transition> {
        let mut seen = FxHashSet::default();
        let mut out = Vec::new();
        let mut push = |action: &Action, target: ProcessId| {
            if seen.insert((action.clone(), target)) {
                out.push(Transition::new(action.clone(), target));
            }
        };

        let before = self.tau_closure(process);
        let tau = Action::tau();
        for &p in &before {
            push(&tau, p);
        }
        for &p in &before {
            for t in self.graph.transitions(p).iter().filter(|t| !t.action.is_tau()) {
                for q in self.tau_closure(t.target) {
                    push(&t.action, q);
                }
            }
        }

        out
    }
}

impl SuccessorGenerator for WeakSuccessors {
    fn successors(&self, process: ProcessId) -> Vec<Transition> {
        if let Some(cached) = self.cache.borrow().get(&process) {
            return cached.clone();
        }
        let computed = self.compute(process);
        self.cache.borrow_mut().insert(process, computed.clone());
        computed
    }
}
