//! Append-only record of a game's moves.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::{Move, Role};

/// One line of the game log.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogEntry {
    /// Start of a round.
    Round(u32),
    /// An accepted move and the label of the process it leads to.
    Play {
        role: Role,
        mv: Move,
        destination: String,
    },
    /// The game ended with this winner.
    Winner(Role),
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogEntry::Round(n) => write!(f, "Round {n}:"),
            LogEntry::Play {
                role,
                mv,
                destination,
            } => write!(f, "    {role}: --- {} --->   {destination}", mv.action),
            LogEntry::Winner(role) => write!(f, "{role} wins."),
        }
    }
}

/// Move history of one game.
///
/// Entries are structured so the trajectory can be replayed; `lines`
/// renders them for display. With echo on, each entry is also emitted at
/// info level as it is appended.
#[derive(Clone, Debug, Default)]
pub struct GameLog {
    entries: Vec<LogEntry>,
    echo: bool,
}

impl GameLog {
    #[must_use]
    pub fn new(echo: bool) -> Self {
        Self {
            entries: Vec::new(),
            echo,
        }
    }

    pub fn print_round(&mut self, round: u32) {
        self.push(LogEntry::Round(round));
    }

    pub fn print_play(&mut self, role: Role, mv: Move, destination: String) {
        self.push(LogEntry::Play {
            role,
            mv,
            destination,
        });
    }

    pub fn print_winner(&mut self, role: Role) {
        self.push(LogEntry::Winner(role));
    }

    fn push(&mut self, entry: LogEntry) {
        if self.echo {
            log::info!("{entry}");
        }
        self.entries.push(entry);
    }

    #[must_use]
    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    /// Rendered log, one string per entry.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.entries.iter().map(ToString::to_string).collect()
    }

    /// Accepted moves in order, for replay.
    pub fn plays(&self) -> impl Iterator<Item = (Role, &Move)> + '_ {
        self.entries.iter().filter_map(|entry| match entry {
            LogEntry::Play { role, mv, .. } => Some((*role, mv)),
            _ => None,
        })
    }

    /// The recorded winner, if the game finished.
    #[must_use]
    pub fn winner(&self) -> Option<Role> {
        self.entries.iter().rev().find_map(|entry| match entry {
            LogEntry::Winner(role) => Some(*role),
            _ => None,
        })
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Action, NodeId, ProcessId, Side};

    fn attack() -> Move {
        Move::new(ProcessId::new(1), NodeId::new(1), Action::new("a"), Side::Left)
    }

    #[test]
    fn test_rendering() {
        let mut log = GameLog::new(false);
        log.print_round(1);
        log.print_play(Role::Attacker, attack(), "P1".into());
        log.print_winner(Role::Attacker);

        assert_eq!(
            log.lines(),
            vec![
                "Round 1:".to_string(),
                "    ATTACKER: --- a --->   P1".to_string(),
                "ATTACKER wins.".to_string(),
            ]
        );
    }

    #[test]
    fn test_plays_skip_rounds_and_winner() {
        let mut log = GameLog::new(false);
        log.print_round(1);
        log.print_play(Role::Attacker, attack(), "P1".into());
        log.print_winner(Role::Attacker);

        let plays: Vec<_> = log.plays().collect();
        assert_eq!(plays, vec![(Role::Attacker, &attack())]);
        assert_eq!(log.winner(), Some(Role::Attacker));
    }

    #[test]
    fn test_clear() {
        let mut log = GameLog::new(false);
        log.print_round(1);
        assert_eq!(log.len(), 1);
        log.clear();
        assert!(log.is_empty());
        assert_eq!(log.winner(), None);
    }
}
