//! Result of one best-of-three match.

use serde::{Deserialize, Serialize};

/// Which side took the match.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchOutcome {
    PlayerOne,
    PlayerTwo,
    Tie,
}

impl MatchOutcome {
    /// Outcome of a best-of-three given how many games player one took.
    pub fn from_games_won(player_one_games: u32) -> Self {
        if player_one_games >= 2 {
            MatchOutcome::PlayerOne
        } else {
            MatchOutcome::PlayerTwo
        }
    }
}
