//! Game configuration.
//!
//! Drivers configure a game session at startup: how long automated players
//! "think", how they are seeded, whether the game log is echoed to the
//! logger, and which semantics the Defender answers under.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Transition semantics used to generate successors.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Semantics {
    /// Every transition is observable.
    #[default]
    Strong,
    /// `tau` steps are absorbed: `=a=>` is `tau* a tau*`.
    Weak,
}

impl std::fmt::Display for Semantics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Semantics::Strong => write!(f, "strong"),
            Semantics::Weak => write!(f, "weak"),
        }
    }
}

/// Session configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameConfig {
    /// Delay before an automated player submits its move, in milliseconds.
    pub thinking_delay_ms: u64,

    /// Seed for automated players' random choices.
    /// `None` seeds from entropy.
    pub seed: Option<u64>,

    /// Echo every game-log line to the `log` facade.
    pub echo_log: bool,

    /// Semantics the Defender answers under.
    /// The Attacker always moves under strong semantics.
    pub defender_semantics: Semantics,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            thinking_delay_ms: 2000,
            seed: None,
            echo_log: true,
            defender_semantics: Semantics::Strong,
        }
    }
}

impl GameConfig {
    /// Create a new config with a custom thinking delay.
    pub fn with_thinking_delay(mut self, delay: Duration) -> Self {
        self.thinking_delay_ms = delay.as_millis() as u64;
        self
    }

    /// Create a new config with a fixed seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Create a new config with log echoing switched on or off.
    pub fn with_echo_log(mut self, echo: bool) -> Self {
        self.echo_log = echo;
        self
    }

    /// Create a new config with the given Defender semantics.
    pub fn with_defender_semantics(mut self, semantics: Semantics) -> Self {
        self.defender_semantics = semantics;
        self
    }

    /// The thinking delay as a `Duration`.
    #[must_use]
    pub fn thinking_delay(&self) -> Duration {
        Duration::from_millis(self.thinking_delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.thinking_delay(), Duration::from_secs(2));
        assert_eq!(config.seed, None);
        assert!(config.echo_log);
        assert_eq!(config.defender_semantics, Semantics::Strong);
    }

    #[test]
    fn test_builder_pattern() {
        let config = GameConfig::default()
            .with_thinking_delay(Duration::from_millis(250))
            .with_seed(7)
            .with_echo_log(false)
            .with_defender_semantics(Semantics::Weak);

        assert_eq!(config.thinking_delay_ms, 250);
        assert_eq!(config.seed, Some(7));
        assert!(!config.echo_log);
        assert_eq!(config.defender_semantics, Semantics::Weak);
    }

    #[test]
    fn test_serialization() {
        let config = GameConfig::default().with_seed(99);
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: GameConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized.seed, Some(99));
        assert_eq!(deserialized.thinking_delay_ms, config.thinking_delay_ms);
    }
}
