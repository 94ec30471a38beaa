//! Player roles, process-pair sides and display colors.

use serde::{Deserialize, Serialize};

/// The two roles of the bisimulation game.
///
/// A player's role is fixed for the lifetime of a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Tries to exhibit a transition the other side cannot match.
    Attacker,
    /// Tries to match every transition.
    Defender,
}

impl Role {
    /// The other role.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Role::Attacker => Role::Defender,
            Role::Defender => Role::Attacker,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Attacker => write!(f, "ATTACKER"),
            Role::Defender => write!(f, "DEFENDER"),
        }
    }
}

/// Which process of the compared pair a move was taken on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// The other side.
    #[must_use]
    pub const fn flip(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Left => write!(f, "left"),
            Side::Right => write!(f, "right"),
        }
    }
}

/// Display color of a player, as a CSS hex string.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Color(pub &'static str);

impl Color {
    pub const PLAYER1: Color = Color("#e74c3c");
    pub const PLAYER2: Color = Color("#2980b9");
    pub const HUMAN: Color = Color::PLAYER1;
    pub const COMPUTER: Color = Color::PLAYER2;

    /// The hex string.
    #[must_use]
    pub const fn hex(self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_opponent() {
        assert_eq!(Role::Attacker.opponent(), Role::Defender);
        assert_eq!(Role::Defender.opponent(), Role::Attacker);
        assert_eq!(format!("{}", Role::Attacker), "ATTACKER");
        assert_eq!(format!("{}", Role::Defender), "DEFENDER");
    }

    #[test]
    fn test_side_flip() {
        assert_eq!(Side::Left.flip(), Side::Right);
        assert_eq!(Side::Right.flip().flip(), Side::Right);
    }

    #[test]
    fn test_colors() {
        assert_eq!(Color::HUMAN, Color::PLAYER1);
        assert_eq!(Color::COMPUTER.hex(), "#2980b9");
    }
}
