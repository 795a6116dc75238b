//! Mode catalogue and mini-game logic.

pub mod bingo;
pub mod fly_ludo;
pub mod schedule;
pub mod upgrade;

use serde::{Deserialize, Serialize};

/// A mini-game reachable from the menu that keeps saved input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameMode {
    FlyLudo,
    Bingo,
    Schedule,
    Upgrade,
}

impl GameMode {
    pub const ALL: [GameMode; 4] = [GameMode::FlyLudo, GameMode::Bingo, GameMode::Schedule, GameMode::Upgrade];

    /// Get the display name for the mode.
    pub fn title(&self) -> &'static str {
        match self {
            GameMode::FlyLudo => "Flight Chess",
            GameMode::Bingo => "Bingo Generator",
            GameMode::Schedule => "Scheduler",
            GameMode::Upgrade => "RPG Upgrade",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            GameMode::FlyLudo => "Simulate a flight chess race",
            GameMode::Bingo => "Shuffle items into a card",
            GameMode::Schedule => "Balance tasks across lanes",
            GameMode::Upgrade => "Train and fight a hero",
        }
    }

    /// Label of the numeric column in the input editor.
    pub fn amount_label(&self) -> &'static str {
        match self {
            GameMode::FlyLudo => "Players",
            GameMode::Bingo => "Grid size",
            GameMode::Schedule => "Lanes",
            GameMode::Upgrade => "Level",
        }
    }

    /// Behavior log entry written when the mode is opened.
    pub fn open_behavior(&self) -> String {
        format!("open {}", self.title())
    }
}

/// Split a text blob into trimmed, non-empty lines.
pub(crate) fn non_empty_lines(data: &str) -> impl Iterator<Item = &str> {
    data.lines().map(str::trim).filter(|line| !line.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_behavior() {
        assert_eq!(GameMode::Bingo.open_behavior(), "open Bingo Generator");
    }

    #[test]
    fn test_non_empty_lines() {
        let lines: Vec<_> = non_empty_lines(" a \n\n  \nb").collect();
        assert_eq!(lines, vec!["a", "b"]);
    }
}
