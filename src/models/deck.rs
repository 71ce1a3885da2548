//! Decks, the matchup matrix, and the prepared field a stage plays with.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Name of the synthetic deck covering the undeclared share of the meta.
pub const OTHER_DECK: &str = "Other";
/// Win probability of "Other" against any declared deck.
pub const OTHER_VS_FIELD: f64 = 0.4;
/// Win probability of any declared deck against "Other".
pub const FIELD_VS_OTHER: f64 = 0.6;
/// "Other" against itself.
pub const OTHER_MIRROR: f64 = 0.5;
/// Skill percentage given to "Other" pilots.
pub const OTHER_SKILL_PERCENT: f64 = 5.0;

/// Square table where `rate(i, j)` is the probability deck `i` beats deck `j`.
///
/// Shape is not validated; indexing outside the matrix panics.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MatchupMatrix {
    rows: Vec<Vec<f64>>,
}

impl MatchupMatrix {
    pub fn new(rows: Vec<Vec<f64>>) -> Self {
        Self { rows }
    }

    pub fn rate(&self, deck: usize, opponent: usize) -> f64 {
        self.rows[deck][opponent]
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Append a deck: existing rows gain `field_vs_new`, the new row is
    /// `new_vs_field` everywhere except `mirror` on the diagonal.
    pub fn push_deck(&mut self, new_vs_field: f64, field_vs_new: f64, mirror: f64) {
        let existing = self.rows.len();
        for row in &mut self.rows {
            row.push(field_vs_new);
        }
        let mut row = vec![new_vs_field; existing];
        row.push(mirror);
        self.rows.push(row);
    }
}

/// Deck list, matrix, and per-deck player counts after meta normalization.
#[derive(Clone, Debug, PartialEq)]
pub struct Field {
    pub decks: Vec<String>,
    pub matrix: MatchupMatrix,
    pub player_counts: Vec<u32>,
    pub skill_percents: Vec<f64>,
    index: HashMap<String, usize>,
}

impl Field {
    pub fn new(
        decks: Vec<String>,
        matrix: MatchupMatrix,
        player_counts: Vec<u32>,
        skill_percents: Vec<f64>,
    ) -> Self {
        let mut index = HashMap::with_capacity(decks.len());
        for (i, name) in decks.iter().enumerate() {
            // First occurrence wins for duplicated names.
            index.entry(name.clone()).or_insert(i);
        }
        Self {
            decks,
            matrix,
            player_counts,
            skill_percents,
            index,
        }
    }

    /// Matrix row/column for a deck name.
    pub fn deck_index(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    pub fn has_other(&self) -> bool {
        self.index.contains_key(OTHER_DECK)
    }

    pub fn total_players(&self) -> u32 {
        self.player_counts.iter().sum()
    }

    /// Player count for a deck name (0 for unknown decks).
    pub fn count_for(&self, name: &str) -> u32 {
        self.deck_index(name)
            .and_then(|i| self.player_counts.get(i).copied())
            .unwrap_or(0)
    }
}
