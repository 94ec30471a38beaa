//! Transition labels.
//!
//! An action is the label of a transition of the process layer. The silent
//! action `tau` is treated specially by weak semantics; every other label
//! is observable. The engine only compares and renders actions.

use serde::{Deserialize, Serialize};

/// Label of a transition.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Action(String);

impl Action {
    /// Label of the silent action.
    pub const TAU: &'static str = "tau";

    /// Create an action from its label.
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    /// The silent action.
    #[must_use]
    pub fn tau() -> Self {
        Self::new(Self::TAU)
    }

    /// Is this the silent action?
    #[must_use]
    pub fn is_tau(&self) -> bool {
        self.0 == Self::TAU
    }

    /// The label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Action {
    fn from(label: &str) -> Self {
        Self::new(label)
    }
}
