//! Tournament configuration, stages, stage results, and errors.

use crate::models::player::{Player, PlayerId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Errors that can occur while running simulations or importing data.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SimulationError {
    /// Day 2 requested but no Day-1 standings were passed in or persisted.
    MissingDayOneRecords,
    /// The record store returned something that is not a player list.
    CorruptRecords(String),
    /// A player references a deck that is not part of the field.
    UnknownDeck(String),
    /// Matchup CSV could not be read.
    InvalidCsv(String),
}

impl std::fmt::Display for SimulationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SimulationError::MissingDayOneRecords => write!(f, "Day 1 data not found"),
            SimulationError::CorruptRecords(e) => write!(f, "Stored records are unreadable: {}", e),
            SimulationError::UnknownDeck(name) => write!(f, "Deck '{}' is not in the field", name),
            SimulationError::InvalidCsv(e) => write!(f, "Invalid matchup CSV: {}", e),
        }
    }
}

impl std::error::Error for SimulationError {}

/// Which day of the event a run simulates.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Full field from scratch.
    #[default]
    Day1,
    /// Day-1 finishers at or above the cut.
    Day2,
}

/// Swiss rounds played on Day 1.
pub const DAY1_ROUNDS: u32 = 8;
/// Swiss rounds played on Day 2.
pub const DAY2_ROUNDS: u32 = 6;
/// Minimum Day-1 match points to play Day 2 (a 5-3-0 record).
pub const DAY2_CUT: u32 = 16;

impl Stage {
    pub fn rounds(self) -> u32 {
        match self {
            Stage::Day1 => DAY1_ROUNDS,
            Stage::Day2 => DAY2_ROUNDS,
        }
    }
}

/// Everything a run needs: matchups, meta shares, field size, skill spread.
///
/// `matchup_matrix`, `meta_percentages`, `deck_names`, and `skill_percents`
/// are parallel; their shape is the caller's responsibility.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TournamentConfig {
    pub matchup_matrix: Vec<Vec<f64>>,
    pub meta_percentages: Vec<f64>,
    pub deck_names: Vec<String>,
    pub n_players: u32,
    pub skill_percents: Vec<f64>,
    #[serde(default)]
    pub stage: Stage,
    /// Decks with an elite ("TUFF") tier.
    #[serde(default)]
    pub tuff_enabled: HashMap<String, bool>,
    /// Elite pilots per deck; only used when enabled.
    #[serde(default)]
    pub tuff_counts: HashMap<String, u32>,
}

impl TournamentConfig {
    /// Same configuration, other stage.
    pub fn for_stage(&self, stage: Stage) -> Self {
        Self {
            stage,
            ..self.clone()
        }
    }

    /// Elite-tier size for a deck, 0 when the tier is disabled.
    pub fn tuff_count(&self, deck: &str) -> u32 {
        if self.tuff_enabled.get(deck).copied().unwrap_or(false) {
            self.tuff_counts.get(deck).copied().unwrap_or(0)
        } else {
            0
        }
    }
}

/// What happened during one Swiss round.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct RoundSummary {
    pub matches: usize,
    pub ties: usize,
    pub byes: usize,
    /// Players who found no legal opponent and sat the round out without points.
    pub unpaired: Vec<PlayerId>,
}

impl RoundSummary {
    /// Nothing was played; later rounds cannot change the standings.
    pub fn is_idle(&self) -> bool {
        self.matches == 0 && self.byes == 0
    }
}

/// Final standings of one stage, sorted by match points descending.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StageResult {
    pub stage: Stage,
    pub standings: Vec<Player>,
    /// Set when the stage stopped early after an idle round.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_of_round: Option<u32>,
}
