//! Human player.

use std::cell::RefCell;

use crate::core::{Color, GameError, Move, Result, Role};
use crate::game::{DependencyGame, GameHandle};

use super::player::{Player, PlayerKind};

/// A player whose moves are picked from outside, e.g. by a UI.
///
/// `prepare_turn` only stores the choices; [`Human::choose`] submits one.
#[derive(Debug)]
pub struct Human {
    role: Role,
    color: Color,
    choices: RefCell<Vec<Move>>,
}

impl Human {
    #[must_use]
    pub fn new(role: Role, color: Color) -> Self {
        Self {
            role,
            color,
            choices: RefCell::new(Vec::new()),
        }
    }

    /// The choices surfaced by the last `prepare_turn`.
    pub fn choices(&self) -> Vec<Move> {
        self.choices.borrow().clone()
    }

    /// Play the choice at `index`.
    pub fn choose<G: DependencyGame + 'static>(
        &self,
        index: usize,
        game: &GameHandle<G>,
    ) -> Result<()> {
        let choices = self.choices.take();
        let Some(mv) = choices.get(index).cloned() else {
            *self.choices.borrow_mut() = choices;
            return Err(GameError::NoSuchChoice(index));
        };
        // The turn may come back to us before `play` returns.
        if let Err(err) = game.play(self.role, mv) {
            *self.choices.borrow_mut() = choices;
            return Err(err);
        }
        Ok(())
    }
}

impl<G: DependencyGame + 'static> Player<G> for Human {
    fn role(&self) -> Role {
        self.role
    }

    fn color(&self) -> Color {
        self.color
    }

    fn kind(&self) -> PlayerKind {
        PlayerKind::Human
    }

    fn prepare_turn(&self, choices: Vec<Move>, _game: &GameHandle<G>) {
        *self.choices.borrow_mut() = choices;
    }
}
