//! Error types for the game engine.

use thiserror::Error;

use super::role::Role;

/// Errors raised by the engine, its players and the process layer.
///
/// Loss by running out of moves is not an error: it ends the game through
/// the regular `Finished` phase.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum GameError {
    #[error("cannot make game with two {0}s")]
    DuplicateRole(Role),

    #[error("first player must be the attacker and second the defender")]
    RoleMismatch,

    #[error("no players in game")]
    MissingPlayers,

    #[error("game is already in progress")]
    InProgress,

    #[error("game has not started")]
    NotStarted,

    #[error("{0} moved out of turn")]
    OutOfTurn(Role),

    #[error("move is not among the {0}'s legal choices")]
    IllegalMove(Role),

    #[error("game has been stopped")]
    Stopped,

    #[error("game is over")]
    GameOver,

    #[error("unknown process '{0}'")]
    UnknownProcess(String),

    #[error("no choice with index {0}")]
    NoSuchChoice(usize),

    #[error("no choices for {0}")]
    NoChoices(Role),

    #[error("no winning defender moves")]
    NoWinningDefence,

    #[error("malformed line {line}: '{text}'")]
    Parse { line: usize, text: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl GameError {
    /// Misuse of the engine's API: the call failed and nothing changed.
    #[must_use]
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            GameError::DuplicateRole(_)
                | GameError::RoleMismatch
                | GameError::MissingPlayers
                | GameError::InProgress
                | GameError::NotStarted
                | GameError::OutOfTurn(_)
                | GameError::IllegalMove(_)
                | GameError::Stopped
                | GameError::GameOver
                | GameError::UnknownProcess(_)
                | GameError::NoSuchChoice(_)
        )
    }

    /// A strategy was asked for a move that the marking says cannot exist.
    #[must_use]
    pub fn is_invariant_violation(&self) -> bool {
        matches!(self, GameError::NoChoices(_) | GameError::NoWinningDefence)
    }
}

/// Convenience Result type for engine operations.
pub type Result<T> = std::result::Result<T, GameError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            GameError::DuplicateRole(Role::Attacker).to_string(),
            "cannot make game with two ATTACKERs"
        );
        assert_eq!(GameError::MissingPlayers.to_string(), "no players in game");
        assert_eq!(
            GameError::NoChoices(Role::Attacker).to_string(),
            "no choices for ATTACKER"
        );
    }

    #[test]
    fn test_classification() {
        assert!(GameError::RoleMismatch.is_configuration());
        assert!(!GameError::RoleMismatch.is_invariant_violation());
        assert!(GameError::NoWinningDefence.is_invariant_violation());
        assert!(!GameError::NoWinningDefence.is_configuration());
    }
}
