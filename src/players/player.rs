//! The player trait.

use std::fmt;

use crate::core::{Color, Move, Role};
use crate::game::{DependencyGame, GameHandle};

/// How a player makes its decisions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PlayerKind {
    Human,
    Automated,
}

impl fmt::Display for PlayerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayerKind::Human => write!(f, "human"),
            PlayerKind::Automated => write!(f, "automated"),
        }
    }
}

/// A participant in a game over the rules `G`.
pub trait Player<G: DependencyGame + 'static> {
    /// The role this player plays.
    fn role(&self) -> Role;

    /// Display color.
    fn color(&self) -> Color;

    fn kind(&self) -> PlayerKind;

    /// It is this player's turn; `choices` is never empty.
    ///
    /// Called with no borrow of the game held, so implementations may play
    /// through `game` synchronously.
    fn prepare_turn(&self, choices: Vec<Move>, game: &GameHandle<G>);

    /// Cancel any pending decision. Idempotent.
    ///
    /// Called while the game is borrowed: must not call back into it.
    fn abort_play(&self) {}
}
