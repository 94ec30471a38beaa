//! Session driver: owns the live game for one display surface.
//!
//! At most one game is live at a time. Installing a new game always stops
//! the previous one first, so its pending automated decisions can never
//! play into a superseded game.

use std::rc::Rc;

use crate::core::{Color, GameConfig, GameRng, ProcessId, Result, Role};
use crate::game::{BisimulationGame, Game, GameHandle};
use crate::lts::{expand_bfs, successor_generator, ProcessGraph, Transition};
use crate::players::Automated;

/// Depth limit when exploring a process for display.
pub const EXPLORE_DEPTH: usize = 1000;

/// A driver session over one process graph.
pub struct Session {
    graph: Rc<ProcessGraph>,
    config: GameConfig,
    rng: GameRng,
    current: Option<GameHandle<BisimulationGame>>,
}

impl Session {
    #[must_use]
    pub fn new(graph: ProcessGraph, config: GameConfig) -> Self {
        let rng = GameRng::seeded(config.seed);
        Self {
            graph: Rc::new(graph),
            config,
            rng,
            current: None,
        }
    }

    pub fn graph(&self) -> &ProcessGraph {
        &self.graph
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Default selection: processes are offered newest first, the first
    /// offer goes on the left and the second on the right. That is the last
    /// declared process against the one declared before it. A single
    /// process is paired with itself.
    pub fn default_pair(&self) -> Option<(String, String)> {
        let mut names = self.graph.named_processes().rev();
        let left = names.next()?.to_string();
        let right = names.next().map_or_else(|| left.clone(), str::to_string);
        Some((left, right))
    }

    /// Reachable successors of `name`, breadth-first, for display.
    ///
    /// Follows the Defender's semantics, so weak games show weak steps.
    pub fn explore(&self, name: &str) -> Result<Vec<(ProcessId, Vec<Transition>)>> {
        let process = self.graph.resolve(name)?;
        let succ = successor_generator(Rc::clone(&self.graph), self.config.defender_semantics);
        Ok(expand_bfs(succ.as_ref(), process, EXPLORE_DEPTH))
    }

    /// Stop the live game, then build and start a game for `left` and
    /// `right`.
    ///
    /// Both sides are automated whatever the outcome of the game: the
    /// Defender gets the first player color, the Attacker the second.
    ///
    /// # Panics
    ///
    /// Panics outside a `tokio::task::LocalSet`: the automated players
    /// schedule their first decision on it.
    pub fn new_game(&mut self, left: &str, right: &str) -> Result<GameHandle<BisimulationGame>> {
        self.hide();

        let rules = BisimulationGame::from_config(Rc::clone(&self.graph), &self.config, left, right)?;
        log::info!(
            "new {} game: {left} vs {right} ({})",
            self.config.defender_semantics,
            if rules.is_bisimilar() { "bisimilar" } else { "not bisimilar" }
        );

        let game = GameHandle::new(Game::new(rules).with_log_echo(self.config.echo_log));
        let delay = self.config.thinking_delay();
        let defender = Rc::new(Automated::new(Role::Defender, Color::PLAYER1, delay, self.rng.fork()));
        let attacker = Rc::new(Automated::new(Role::Attacker, Color::PLAYER2, delay, self.rng.fork()));

        game.set_players(attacker, defender)?;
        game.start()?;
        self.current = Some(game.clone());
        Ok(game)
    }

    /// Stop and release the live game, if any.
    pub fn hide(&mut self) {
        if let Some(game) = self.current.take() {
            game.stop();
        }
    }

    /// The live game.
    pub fn current(&self) -> Option<&GameHandle<BisimulationGame>> {
        self.current.as_ref()
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.hide();
    }
}
