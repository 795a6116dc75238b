//! Flight chess race simulator.
//!
//! Simplified rules: one plane per player, a 6 is needed to leave the
//! hangar, the goal must be hit exactly (overshoot bounces back) and a 6
//! grants another roll.

use rand::Rng;

use super::non_empty_lines;
use crate::error::{AppError, Result};

pub const TRACK_LEN: u32 = 52;
pub const MIN_PLAYERS: usize = 2;
pub const MAX_PLAYERS: usize = 4;
const MAX_TURNS: usize = 5_000;
const TAKE_OFF_ROLL: u8 = 6;

/// What a single roll did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnEvent {
    Waiting,
    TookOff,
    Moved { from: u32, to: u32 },
    Bounced { from: u32, to: u32 },
    Finished { from: u32 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    pub player: usize,
    pub roll: u8,
    pub event: TurnEvent,
}

impl Turn {
    pub fn describe(&self, players: &[String]) -> String {
        let name = &players[self.player];
        match self.event {
            TurnEvent::Waiting => format!("{name} rolled {} and waits in the hangar", self.roll),
            TurnEvent::TookOff => format!("{name} rolled {} and took off", self.roll),
            TurnEvent::Moved { from, to } => format!("{name} rolled {} and flew {from} -> {to}", self.roll),
            TurnEvent::Bounced { from, to } => {
                format!("{name} rolled {} and overshot, bouncing {from} -> {to}", self.roll)
            }
            TurnEvent::Finished { from } => format!("{name} rolled {} and landed on the goal from {from}", self.roll),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RaceResult {
    pub players: Vec<String>,
    /// `None` while a plane is still in the hangar.
    pub positions: Vec<Option<u32>>,
    pub turns: Vec<Turn>,
    pub winner: Option<usize>,
}

/// Player names from the saved blob, padded with defaults up to `count`.
pub fn parse_players(data: &str, count: usize) -> Result<Vec<String>> {
    if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&count) {
        return Err(AppError::validation(format!(
            "Player count must be between {MIN_PLAYERS} and {MAX_PLAYERS}"
        )));
    }

    let mut players: Vec<String> = non_empty_lines(data).take(count).map(str::to_string).collect();
    while players.len() < count {
        players.push(format!("Player {}", players.len() + 1));
    }
    Ok(players)
}

fn advance(position: Option<u32>, roll: u8) -> (Option<u32>, TurnEvent) {
    match position {
        None if roll == TAKE_OFF_ROLL => (Some(0), TurnEvent::TookOff),
        None => (None, TurnEvent::Waiting),
        Some(from) => {
            let target = from + u32::from(roll);
            if target == TRACK_LEN {
                (Some(TRACK_LEN), TurnEvent::Finished { from })
            } else if target > TRACK_LEN {
                let to = TRACK_LEN - (target - TRACK_LEN);
                (Some(to), TurnEvent::Bounced { from, to })
            } else {
                (Some(target), TurnEvent::Moved { from, to: target })
            }
        }
    }
}

/// Play a race until someone reaches the goal or the turn limit is hit.
pub fn simulate<R: Rng + ?Sized>(players: &[String], rng: &mut R) -> Result<RaceResult> {
    if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&players.len()) {
        return Err(AppError::validation(format!(
            "Player count must be between {MIN_PLAYERS} and {MAX_PLAYERS}"
        )));
    }

    let mut positions = vec![None; players.len()];
    let mut turns = Vec::new();
    let mut winner = None;
    let mut current = 0;

    while turns.len() < MAX_TURNS {
        let roll: u8 = rng.gen_range(1..=6);
        let (next, event) = advance(positions[current], roll);
        positions[current] = next;
        turns.push(Turn {
            player: current,
            roll,
            event,
        });

        if matches!(event, TurnEvent::Finished { .. }) {
            winner = Some(current);
            break;
        }
        if roll != TAKE_OFF_ROLL {
            current = (current + 1) % players.len();
        }
    }

    Ok(RaceResult {
        players: players.to_vec(),
        positions,
        turns,
        winner,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn names(n: usize) -> Vec<String> {
        (1..=n).map(|i| format!("P{i}")).collect()
    }

    #[test]
    fn test_parse_players_pads_and_truncates() {
        assert_eq!(parse_players("Ann\n\nBen", 3).unwrap(), vec!["Ann", "Ben", "Player 3"]);
        assert_eq!(parse_players("A\nB\nC\nD", 2).unwrap(), vec!["A", "B"]);
        assert!(parse_players("", 1).is_err());
        assert!(parse_players("", 5).is_err());
    }

    #[test]
    fn test_advance_rules() {
        assert_eq!(advance(None, 3), (None, TurnEvent::Waiting));
        assert_eq!(advance(None, 6), (Some(0), TurnEvent::TookOff));
        assert_eq!(advance(Some(10), 4), (Some(14), TurnEvent::Moved { from: 10, to: 14 }));
        assert_eq!(advance(Some(50), 2), (Some(52), TurnEvent::Finished { from: 50 }));
        assert_eq!(advance(Some(50), 5), (Some(49), TurnEvent::Bounced { from: 50, to: 49 }));
    }

    #[test]
    fn test_race_has_winner_on_goal() {
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let result = simulate(&names(4), &mut rng).unwrap();

            let winner = result.winner.expect("race should finish");
            assert_eq!(result.positions[winner], Some(TRACK_LEN));
            assert_eq!(result.turns.last().unwrap().player, winner);
        }
    }

    #[test]
    fn test_six_grants_extra_roll() {
        let mut rng = StdRng::seed_from_u64(42);
        let result = simulate(&names(2), &mut rng).unwrap();

        for pair in result.turns.windows(2) {
            if pair[0].roll == 6 {
                assert_eq!(pair[0].player, pair[1].player);
            } else {
                assert_ne!(pair[0].player, pair[1].player);
            }
        }
        assert!(
            result
                .turns
                .iter()
                .filter(|t| t.event == TurnEvent::TookOff)
                .all(|t| t.roll == 6)
        );
    }
}
