//! Turn protocol shared by every dependency-graph game.
//!
//! [`Game`] is the state; [`GameHandle`] is the shared, single-threaded
//! handle that players and drivers call into. Every mutation releases its
//! borrow before the next player is told to move, so a player may re-enter
//! the handle from inside `prepare_turn`.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use tokio::sync::watch;

use crate::core::{Action, GameError, Move, NodeId, Result, Role, Side};
use crate::players::Player;

use super::history::GameLog;
use super::rules::DependencyGame;
use super::state::{Phase, TurnState};

/// The player to notify next and the moves it may choose from.
type Handover<G> = Option<(Rc<dyn Player<G>>, Vec<Move>)>;

/// A game in progress over the rules `G`.
pub struct Game<G: DependencyGame + 'static> {
    rules: G,
    phase: Phase,
    turn: TurnState,
    stopped: bool,
    attacker: Option<Rc<dyn Player<G>>>,
    defender: Option<Rc<dyn Player<G>>>,
    log: GameLog,
    phase_tx: watch::Sender<Phase>,
}

impl<G: DependencyGame + 'static> Game<G> {
    /// Create an unstarted game. The log echoes to `log::info!`.
    #[must_use]
    pub fn new(rules: G) -> Self {
        let root = rules.root();
        let (phase_tx, _) = watch::channel(Phase::Unstarted);
        Self {
            rules,
            phase: Phase::Unstarted,
            turn: TurnState::new(root),
            stopped: false,
            attacker: None,
            defender: None,
            log: GameLog::new(true),
            phase_tx,
        }
    }

    /// Turn echoing of log entries on or off.
    #[must_use]
    pub fn with_log_echo(mut self, echo: bool) -> Self {
        self.log = GameLog::new(echo);
        self
    }

    pub fn rules(&self) -> &G {
        &self.rules
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn is_over(&self) -> bool {
        self.phase.is_over()
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    pub fn log(&self) -> &GameLog {
        &self.log
    }

    pub fn turn(&self) -> &TurnState {
        &self.turn
    }

    pub fn node(&self) -> NodeId {
        self.turn.node
    }

    pub fn step(&self) -> u32 {
        self.turn.step
    }

    pub fn round(&self) -> u32 {
        self.turn.round()
    }

    /// Side of the last move.
    pub fn last_move(&self) -> Option<Side> {
        self.turn.last_side
    }

    /// Action of the last attack.
    pub fn last_action(&self) -> Option<&Action> {
        self.turn.last_action.as_ref()
    }

    /// The role that wins with optimal play.
    pub fn winner(&self) -> Role {
        self.rules.winner()
    }

    pub fn is_winner(&self, role: Role) -> bool {
        self.rules.winner() == role
    }

    /// Legal moves for `role` at the current node.
    pub fn current_choices(&self, role: Role) -> Vec<Move> {
        self.rules.choices(self.turn.node, role)
    }

    pub fn best_winning_attack(&self, choices: &[Move]) -> Result<Move> {
        self.rules.best_winning_attack(self.turn.node, choices)
    }

    pub fn winning_defend(&self, choices: &[Move]) -> Result<Move> {
        self.rules.winning_defend(self.turn.node, choices)
    }

    pub fn player(&self, role: Role) -> Option<&Rc<dyn Player<G>>> {
        match role {
            Role::Attacker => self.attacker.as_ref(),
            Role::Defender => self.defender.as_ref(),
        }
    }

    fn set_players(
        &mut self,
        attacker: Rc<dyn Player<G>>,
        defender: Rc<dyn Player<G>>,
    ) -> Result<()> {
        if attacker.role() == defender.role() {
            return Err(GameError::DuplicateRole(attacker.role()));
        }
        if attacker.role() != Role::Attacker {
            return Err(GameError::RoleMismatch);
        }
        if self.stopped {
            return Err(GameError::Stopped);
        }
        if self.phase.to_move().is_some() {
            return Err(GameError::InProgress);
        }

        self.attacker = Some(attacker);
        self.defender = Some(defender);
        Ok(())
    }

    fn begin(&mut self) -> Result<Handover<G>> {
        if self.stopped {
            return Err(GameError::Stopped);
        }
        if self.phase.to_move().is_some() {
            return Err(GameError::InProgress);
        }
        if self.attacker.is_none() || self.defender.is_none() {
            return Err(GameError::MissingPlayers);
        }

        self.turn = TurnState::new(self.rules.root());
        self.log.clear();
        log::info!("starting game at {}", self.turn.node);
        Ok(self.hand_over(Role::Attacker))
    }

    fn apply(&mut self, role: Role, mv: Move) -> Result<Handover<G>> {
        if self.stopped {
            return Err(GameError::Stopped);
        }
        match self.phase {
            Phase::ToMove(to_move) if to_move == role => {}
            Phase::ToMove(_) => return Err(GameError::OutOfTurn(role)),
            Phase::Unstarted => return Err(GameError::NotStarted),
            Phase::Finished { .. } | Phase::Aborted(_) => return Err(GameError::GameOver),
        }
        if !self.current_choices(role).contains(&mv) {
            return Err(GameError::IllegalMove(role));
        }

        self.turn.advance(role, &mv);
        if role == Role::Attacker {
            self.log.print_round(self.turn.round());
        }
        let destination = self.rules.label(mv.target_process);
        self.log.print_play(role, mv, destination);

        Ok(self.hand_over(role.opponent()))
    }

    /// Give the turn to `next`, or end the game if it has no moves.
    fn hand_over(&mut self, next: Role) -> Handover<G> {
        let choices = self.current_choices(next);
        if choices.is_empty() {
            let winner = next.opponent();
            log::info!("{winner} wins after {} moves", self.turn.step);
            self.log.print_winner(winner);
            self.set_phase(Phase::Finished { winner });
            self.abort_players();
            return None;
        }

        self.set_phase(Phase::ToMove(next));
        self.player(next).map(|player| (Rc::clone(player), choices))
    }

    fn halt(&mut self) {
        if self.stopped {
            return;
        }
        log::info!("stopping game at step {}", self.turn.step);
        self.stopped = true;
        // Players of a finished game were cancelled when it ended and may
        // since have been seated elsewhere.
        if !self.phase.is_over() {
            self.abort_players();
        }
    }

    fn abort(&mut self, error: &GameError) {
        log::error!("game aborted: {error}");
        self.set_phase(Phase::Aborted(error.to_string()));
        self.abort_players();
    }

    fn abort_players(&self) {
        for player in [&self.attacker, &self.defender].into_iter().flatten() {
            player.abort_play();
        }
    }

    fn set_phase(&mut self, phase: Phase) {
        self.phase = phase.clone();
        self.phase_tx.send_replace(phase);
    }
}

/// Shared handle to a [`Game`].
///
/// Cloning is cheap; all clones drive the same game.
pub struct GameHandle<G: DependencyGame + 'static> {
    inner: Rc<RefCell<Game<G>>>,
}

impl<G: DependencyGame + 'static> Clone for GameHandle<G> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<G: DependencyGame + 'static> GameHandle<G> {
    #[must_use]
    pub fn new(game: Game<G>) -> Self {
        Self {
            inner: Rc::new(RefCell::new(game)),
        }
    }

    /// Seat the players. The first must attack, the second defend.
    pub fn set_players(
        &self,
        attacker: Rc<dyn Player<G>>,
        defender: Rc<dyn Player<G>>,
    ) -> Result<()> {
        self.inner.borrow_mut().set_players(attacker, defender)
    }

    /// Start play from the root and give the Attacker its choices.
    ///
    /// If the Attacker has no move at the root the game ends at once with
    /// the Defender as winner.
    ///
    /// # Panics
    ///
    /// Panics outside a `tokio::task::LocalSet` when the Attacker is an
    /// [`Automated`](crate::players::Automated) player.
    pub fn start(&self) -> Result<()> {
        let next = self.inner.borrow_mut().begin()?;
        self.notify(next);
        Ok(())
    }

    /// Apply `mv` for `role` and hand the turn to the opponent.
    pub fn play(&self, role: Role, mv: Move) -> Result<()> {
        let next = self.inner.borrow_mut().apply(role, mv).map_err(|err| {
            log::warn!("rejected {role} move: {err}");
            err
        })?;
        self.notify(next);
        Ok(())
    }

    /// Stop the game and cancel pending automated decisions.
    ///
    /// Only the first call has an effect.
    pub fn stop(&self) {
        self.inner.borrow_mut().halt();
    }

    /// End the game abnormally after a failed automated decision.
    pub fn abort(&self, error: &GameError) {
        self.inner.borrow_mut().abort(error);
    }

    fn notify(&self, next: Handover<G>) {
        if let Some((player, choices)) = next {
            log::debug!("{} to move with {} choices", player.role(), choices.len());
            player.prepare_turn(choices, self);
        }
    }

    /// Run `f` against the game state.
    ///
    /// `f` must not call back into this handle.
    pub fn with<R>(&self, f: impl FnOnce(&Game<G>) -> R) -> R {
        f(&self.inner.borrow())
    }

    /// Receiver that observes every phase change.
    pub fn subscribe(&self) -> watch::Receiver<Phase> {
        self.inner.borrow().phase_tx.subscribe()
    }

    pub fn downgrade(&self) -> WeakGame<G> {
        WeakGame {
            inner: Rc::downgrade(&self.inner),
        }
    }

    pub fn phase(&self) -> Phase {
        self.with(|game| game.phase().clone())
    }

    pub fn is_over(&self) -> bool {
        self.with(Game::is_over)
    }

    pub fn is_stopped(&self) -> bool {
        self.with(Game::is_stopped)
    }

    pub fn node(&self) -> NodeId {
        self.with(Game::node)
    }

    pub fn step(&self) -> u32 {
        self.with(Game::step)
    }

    pub fn round(&self) -> u32 {
        self.with(Game::round)
    }

    pub fn last_move(&self) -> Option<Side> {
        self.with(Game::last_move)
    }

    pub fn last_action(&self) -> Option<Action> {
        self.with(|game| game.last_action().cloned())
    }

    pub fn is_winner(&self, role: Role) -> bool {
        self.with(|game| game.is_winner(role))
    }

    pub fn current_choices(&self, role: Role) -> Vec<Move> {
        self.with(|game| game.current_choices(role))
    }

    pub fn best_winning_attack(&self, choices: &[Move]) -> Result<Move> {
        self.with(|game| game.best_winning_attack(choices))
    }

    pub fn winning_defend(&self, choices: &[Move]) -> Result<Move> {
        self.with(|game| game.winning_defend(choices))
    }

    /// Rendered game log.
    pub fn log_lines(&self) -> Vec<String> {
        self.with(|game| game.log().lines())
    }
}

/// Non-owning handle held by scheduled decisions.
pub struct WeakGame<G: DependencyGame + 'static> {
    inner: Weak<RefCell<Game<G>>>,
}

impl<G: DependencyGame + 'static> Clone for WeakGame<G> {
    fn clone(&self) -> Self {
        Self {
            inner: Weak::clone(&self.inner),
        }
    }
}

impl<G: DependencyGame + 'static> WeakGame<G> {
    /// The game, if it is still alive.
    pub fn upgrade(&self) -> Option<GameHandle<G>> {
        self.inner.upgrade().map(|inner| GameHandle { inner })
    }
}
