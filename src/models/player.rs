//! Player records carried through a simulated event.

use serde::{Deserialize, Serialize};

/// Stage-scoped player identifier. Real players are numbered from 1.
pub type PlayerId = u32;

/// Opponent entry recorded when a player receives a bye.
pub const BYE_OPPONENT: PlayerId = 0;

/// Match points for a win or a bye.
pub const WIN_POINTS: u32 = 3;
/// Match points for a tie.
pub const TIE_POINTS: u32 = 1;

/// Skill modifier for an elite-tier ("TUFF") pilot.
pub const TUFF_SKILL: f64 = 0.4;
/// Skill modifier for a skilled pilot.
pub const SKILLED_SKILL: f64 = 0.2;

/// One simulated pilot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    /// Deck name; resolved to a matrix index through the prepared field.
    pub deck: String,
    pub match_points: u32,
    /// Sequential id assigned when the player qualifies for Day 2.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day2_id: Option<PlayerId>,
    /// Added to this player's per-game win probability, minus the opponent's.
    pub skill: f64,
    /// Opponent ids in the order faced; `BYE_OPPONENT` marks a bye.
    #[serde(default)]
    pub opponents: Vec<PlayerId>,
}

impl Player {
    /// Fresh Day-1 player with no points and no history.
    pub fn new(id: PlayerId, deck: impl Into<String>, skill: f64) -> Self {
        Self {
            id,
            deck: deck.into(),
            match_points: 0,
            day2_id: None,
            skill,
            opponents: Vec::new(),
        }
    }

    pub fn record_win(&mut self, opponent: PlayerId) {
        self.match_points += WIN_POINTS;
        self.opponents.push(opponent);
    }

    pub fn record_tie(&mut self, opponent: PlayerId) {
        self.match_points += TIE_POINTS;
        self.opponents.push(opponent);
    }

    pub fn record_loss(&mut self, opponent: PlayerId) {
        self.opponents.push(opponent);
    }

    pub fn record_bye(&mut self) {
        self.match_points += WIN_POINTS;
        self.opponents.push(BYE_OPPONENT);
    }

    /// True if this player already faced `opponent` in the current event.
    pub fn has_faced(&self, opponent: PlayerId) -> bool {
        self.opponents.contains(&opponent)
    }

    pub fn byes(&self) -> usize {
        self.opponents.iter().filter(|&&o| o == BYE_OPPONENT).count()
    }
}
