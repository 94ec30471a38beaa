//! Automated player.
//!
//! Strategy by role and overall outcome:
//!
//! | role     | winner                | loser  |
//! |----------|-----------------------|--------|
//! | Attacker | best winning attack   | random |
//! | Defender | winning defence       | random |

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use crate::core::{Color, GameError, GameRng, Move, Result, Role};
use crate::game::{DependencyGame, Game, GameHandle};

use super::deferred::Deferred;
use super::player::{Player, PlayerKind};

/// A player that decides on its own after a thinking delay.
///
/// At most one decision is pending at a time.
pub struct Automated {
    role: Role,
    color: Color,
    delay: Duration,
    rng: Rc<RefCell<GameRng>>,
    pending: RefCell<Option<Deferred>>,
}

impl Automated {
    #[must_use]
    pub fn new(role: Role, color: Color, delay: Duration, rng: GameRng) -> Self {
        Self {
            role,
            color,
            delay,
            rng: Rc::new(RefCell::new(rng)),
            pending: RefCell::new(None),
        }
    }

    /// Is a decision scheduled and not yet run or cancelled?
    pub fn is_pending(&self) -> bool {
        self.pending
            .borrow()
            .as_ref()
            .is_some_and(|task| !task.is_finished())
    }

    /// Pick a move for `role` from `choices`.
    pub fn decide<G: DependencyGame + 'static>(
        role: Role,
        game: &Game<G>,
        choices: &[Move],
        rng: &mut GameRng,
    ) -> Result<Move> {
        match (role, game.is_winner(role)) {
            (Role::Attacker, true) => game.best_winning_attack(choices),
            (Role::Defender, true) => game.winning_defend(choices),
            (_, false) => rng
                .choose(choices)
                .cloned()
                .ok_or(GameError::NoChoices(role)),
        }
    }
}

impl<G: DependencyGame + 'static> Player<G> for Automated {
    fn role(&self) -> Role {
        self.role
    }

    fn color(&self) -> Color {
        self.color
    }

    fn kind(&self) -> PlayerKind {
        PlayerKind::Automated
    }

    fn prepare_turn(&self, choices: Vec<Move>, game: &GameHandle<G>) {
        let role = self.role;
        let rng = Rc::clone(&self.rng);
        let weak = game.downgrade();

        let task = Deferred::after(self.delay, move || {
            let Some(game) = weak.upgrade() else {
                return;
            };
            let decision = game.with(|g| Self::decide(role, g, &choices, &mut rng.borrow_mut()));
            log::debug!("{role} decided {decision:?}");
            if let Err(err) = decision.and_then(|mv| game.play(role, mv)) {
                game.abort(&err);
            }
        });

        if let Some(previous) = self.pending.replace(Some(task)) {
            previous.cancel();
        }
    }

    fn abort_play(&self) {
        if let Some(task) = self.pending.borrow_mut().take() {
            task.cancel();
        }
    }
}
