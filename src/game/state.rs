//! Game phase and per-turn state.

use serde::{Deserialize, Serialize};

use crate::core::{Action, Move, NodeId, Role, Side};

/// Where a game is in its lifecycle.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Constructed, not yet started.
    Unstarted,
    /// Waiting for `role` to move.
    ToMove(Role),
    /// A player could not reply.
    Finished { winner: Role },
    /// An automated decision hit an invariant violation.
    Aborted(String),
}

impl Phase {
    /// Has the game ended, normally or not?
    #[must_use]
    pub fn is_over(&self) -> bool {
        matches!(self, Phase::Finished { .. } | Phase::Aborted(_))
    }

    /// The role holding the turn, if any.
    #[must_use]
    pub fn to_move(&self) -> Option<Role> {
        match self {
            Phase::ToMove(role) => Some(*role),
            _ => None,
        }
    }

    /// The winner of a finished game.
    #[must_use]
    pub fn winner(&self) -> Option<Role> {
        match self {
            Phase::Finished { winner } => Some(*winner),
            _ => None,
        }
    }
}

/// Mutable turn state: where the game is and how it got there.
///
/// `step` counts accepted moves; a round is one attack plus its defence.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnState {
    /// Current dependency-graph node.
    pub node: NodeId,

    /// Accepted moves so far.
    pub step: u32,

    /// Action of the last attack.
    pub last_action: Option<Action>,

    /// Side the last move was taken on.
    pub last_side: Option<Side>,
}

impl TurnState {
    /// Fresh state at `root`.
    #[must_use]
    pub fn new(root: NodeId) -> Self {
        Self {
            node: root,
            step: 0,
            last_action: None,
            last_side: None,
        }
    }

    /// Current round, starting at 1.
    #[must_use]
    pub fn round(&self) -> u32 {
        self.step / 2 + 1
    }

    /// Record an accepted move.
    ///
    /// An attack remembers its action and side; a defence is played on the
    /// other side, so it flips the remembered side.
    pub fn advance(&mut self, role: Role, mv: &Move) {
        self.step += 1;
        self.node = mv.next_node;
        match role {
            Role::Attacker => {
                self.last_action = Some(mv.action.clone());
                self.last_side = Some(mv.side);
            }
            Role::Defender => {
                self.last_side = self.last_side.map(Side::flip);
            }
        }
    }
}
