//! Process graph: named processes and labelled transitions.
//!
//! ## Text format
//!
//! One transition per line, `source action target`. A line holding a single
//! name declares a process without transitions. `#` starts a comment.
//!
//! ```
//! use bisim_game::lts::ProcessGraph;
//!
//! let graph: ProcessGraph = "
//!     ## a vending machine
//!     Vm  coin Vm1
//!     Vm1 tea  Vm
//!     Stop
//! ".parse().unwrap();
//!
//! assert_eq!(graph.len(), 3);
//! assert!(graph.process_by_name("Stop").is_some());
//! ```

use std::str::FromStr;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::core::{Action, GameError, ProcessId};

/// An outgoing transition.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Transition {
    pub action: Action,
    pub target: ProcessId,
}

impl Transition {
    #[must_use]
    pub fn new(action: Action, target: ProcessId) -> Self {
        Self { action, target }
    }
}

/// A labelled transition system with named processes.
///
/// Processes are stored in an arena indexed by [`ProcessId`], in
/// declaration order.
#[derive(Clone, Debug, Default)]
pub struct ProcessGraph {
    names: Vec<String>,
    transitions: Vec<Vec<Transition>>,
    by_name: FxHashMap<String, ProcessId>,
}

impl ProcessGraph {
    /// Create an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a process by name, returning its ID.
    ///
    /// Adding an existing name returns the existing ID.
    pub fn add_process(&mut self, name: &str) -> ProcessId {
        if let Some(&id) = self.by_name.get(name) {
            return id;
        }
        let id = ProcessId::new(self.names.len() as u32);
        self.names.push(name.to_string());
        self.transitions.push(Vec::new());
        self.by_name.insert(name.to_string(), id);
        id
    }

    /// Add a transition between two existing processes.
    ///
    /// # Panics
    ///
    /// Panics if `from` was not returned by [`add_process`](Self::add_process)
    /// on this graph. Use [`connect`](Self::connect) to add by name.
    pub fn add_transition(&mut self, from: ProcessId, action: Action, to: ProcessId) {
        self.transitions[from.index()].push(Transition::new(action, to));
    }

    /// Add a transition by process names, declaring them as needed.
    pub fn connect(&mut self, from: &str, action: &str, to: &str) {
        let from = self.add_process(from);
        let to = self.add_process(to);
        self.add_transition(from, Action::new(action), to);
    }

    /// Look up a process by name.
    #[must_use]
    pub fn process_by_name(&self, name: &str) -> Option<ProcessId> {
        self.by_name.get(name).copied()
    }

    /// Look up a process by name, failing with `UnknownProcess`.
    pub fn resolve(&self, name: &str) -> Result<ProcessId, GameError> {
        self.process_by_name(name)
            .ok_or_else(|| GameError::UnknownProcess(name.to_string()))
    }

    /// Name of a process.
    #[must_use]
    pub fn name(&self, id: ProcessId) -> Option<&str> {
        self.names.get(id.index()).map(String::as_str)
    }

    /// Display label of a process: its name, or its ID if unnamed.
    #[must_use]
    pub fn label(&self, id: ProcessId) -> String {
        self.name(id)
            .map(str::to_string)
            .unwrap_or_else(|| id.to_string())
    }

    /// All process names in declaration order.
    pub fn named_processes(&self) -> impl DoubleEndedIterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Outgoing transitions of a process.
    #[must_use]
    pub fn transitions(&self, id: ProcessId) -> &[Transition] {
        self.transitions
            .get(id.index())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Number of processes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Check if the graph has no processes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl<'a> From<Vec<(&'a str, &'a str, &'a str)>> for ProcessGraph {
    fn from(triples: Vec<(&'a str, &'a str, &'a str)>) -> Self {
        let mut graph = Self::new();
        for (from, action, to) in triples {
            graph.connect(from, action, to);
        }
        graph
    }
}

impl FromStr for ProcessGraph {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut graph = Self::new();

        for (i, raw) in s.lines().enumerate() {
            let line = raw.split('#').next().unwrap_or("").trim();
            let words: Vec<&str> = line.split_whitespace().collect();
            match words.as_slice() {
                [] => {}
                [name] => {
                    graph.add_process(name);
                }
                [from, action, to] => graph.connect(from, action, to),
                _ => {
                    return Err(GameError::Parse {
                        line: i + 1,
                        text: raw.trim().to_string(),
                    })
                }
            }
        }

        Ok(graph)
    }
}
