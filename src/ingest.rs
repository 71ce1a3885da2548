//! Matchup CSV import: raw win/loss rows to a deck list and win-rate matrix.
//!
//! Expected header: `deck1,deck2,wins,losses[,ties,total]`.

use crate::models::SimulationError;
use csv::{ReaderBuilder, Trim};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::io::Read;

/// Win rate used for pairs without data.
pub const DEFAULT_WIN_RATE: f64 = 0.5;

/// One deck-vs-deck record line.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatchupRow {
    pub deck1: String,
    pub deck2: String,
    pub wins: u32,
    pub losses: u32,
    #[serde(default)]
    pub ties: Option<u32>,
    #[serde(default)]
    pub total: Option<u32>,
}

impl MatchupRow {
    /// wins / (wins + losses); ties are ignored. `None` without decided games.
    pub fn true_win_rate(&self) -> Option<f64> {
        let decided = self.wins + self.losses;
        if decided == 0 {
            None
        } else {
            Some(f64::from(self.wins) / f64::from(decided))
        }
    }

    fn dedup_key(&self) -> String {
        format!(
            "{}|{}|{}|{}|{:?}|{:?}",
            self.deck1, self.deck2, self.wins, self.losses, self.ties, self.total
        )
    }
}

/// Deck names (first-appearance order of `deck1`) and the matching matrix.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatchupTable {
    pub decks: Vec<String>,
    pub matrix: Vec<Vec<f64>>,
}

/// Parse rows from CSV, dropping exact duplicates.
pub fn read_matchups<R: Read>(reader: R) -> Result<Vec<MatchupRow>, SimulationError> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .flexible(true)
        .from_reader(reader);

    let mut seen = HashSet::new();
    let mut rows = Vec::new();
    for record in csv_reader.deserialize::<MatchupRow>() {
        let row = record.map_err(|e| SimulationError::InvalidCsv(e.to_string()))?;
        if seen.insert(row.dedup_key()) {
            rows.push(row);
        }
    }
    log::debug!("Imported {} matchup rows", rows.len());
    Ok(rows)
}

/// Matrix over the distinct `deck1` names. Missing pairs and pairs without
/// decided games default to 0.5; later rows for the same pair win.
pub fn build_table(rows: &[MatchupRow]) -> MatchupTable {
    let decks = distinct_decks(rows);
    let index: HashMap<&str, usize> = decks
        .iter()
        .enumerate()
        .map(|(i, d)| (d.as_str(), i))
        .collect();

    let mut matrix = vec![vec![DEFAULT_WIN_RATE; decks.len()]; decks.len()];
    for row in rows {
        if let (Some(&i), Some(&j)) = (index.get(row.deck1.as_str()), index.get(row.deck2.as_str()))
        {
            matrix[i][j] = row.true_win_rate().unwrap_or(DEFAULT_WIN_RATE);
        }
    }

    MatchupTable { decks, matrix }
}

/// Expected win rate of each deck against a field with the given play rates
/// (percent per deck name). Unlisted opponents count as 0%.
pub fn expected_win_rates(
    rows: &[MatchupRow],
    play_rates: &HashMap<String, f64>,
) -> Vec<(String, f64)> {
    distinct_decks(rows)
        .into_iter()
        .map(|deck| {
            let rate = rows
                .iter()
                .filter(|r| r.deck1 == deck)
                .map(|r| {
                    let share = play_rates.get(&r.deck2).copied().unwrap_or(0.0) / 100.0;
                    share * r.true_win_rate().unwrap_or(0.0)
                })
                .sum::<f64>();
            (deck, rate)
        })
        .collect()
}

fn distinct_decks(rows: &[MatchupRow]) -> Vec<String> {
    let mut seen = HashSet::new();
    rows.iter()
        .filter(|r| seen.insert(r.deck1.as_str()))
        .map(|r| r.deck1.clone())
        .collect()
}
