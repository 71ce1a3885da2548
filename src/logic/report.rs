//! Per-deck summaries derived from batch counts.

use crate::models::{BatchResults, DeckCounts};
use serde::{Deserialize, Serialize};

/// Day-2 seats split into non-overlapping placement ranges.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct PlacementBands {
    pub top16: u64,
    pub top17_32: u64,
    pub top33_64: u64,
    pub top65_128: u64,
    pub top129_256: u64,
    pub rest_of_day2: u64,
}

impl PlacementBands {
    pub fn total(&self) -> u64 {
        self.top16
            + self.top17_32
            + self.top33_64
            + self.top65_128
            + self.top129_256
            + self.rest_of_day2
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DeckSummary {
    pub deck: String,
    pub day1_players: u64,
    pub day2_players: u64,
    /// Share of all Day-1 players, 0..=1.
    pub day1_share: f64,
    /// Share of all Day-2 players, 0..=1.
    pub day2_share: f64,
    /// Fraction of this deck's Day-1 players who made Day 2.
    pub conversion_rate: f64,
    pub bands: PlacementBands,
}

/// One summary per registered deck, in registry order.
pub fn summarize(results: &BatchResults) -> Vec<DeckSummary> {
    let day1_total = results.day1_total();
    let day2_total = results.day2_total();

    results
        .decks
        .iter()
        .map(|deck| {
            let day1 = BatchResults::count(&results.day1, deck);
            let day2 = BatchResults::count(&results.day2, deck);
            DeckSummary {
                deck: deck.clone(),
                day1_players: day1,
                day2_players: day2,
                day1_share: ratio(day1, day1_total),
                day2_share: ratio(day2, day2_total),
                conversion_rate: ratio(day2, day1),
                bands: placement_bands(results, deck),
            }
        })
        .collect()
}

/// Differences of the cumulative top-N counts for one deck.
pub fn placement_bands(results: &BatchResults, deck: &str) -> PlacementBands {
    let c = |map: &DeckCounts| BatchResults::count(map, deck);
    let (t16, t32, t64, t128, t256) = (
        c(&results.top16),
        c(&results.top32),
        c(&results.top64),
        c(&results.top128),
        c(&results.top256),
    );
    let day2 = c(&results.day2);
    PlacementBands {
        top16: t16,
        top17_32: t32.saturating_sub(t16),
        top33_64: t64.saturating_sub(t32),
        top65_128: t128.saturating_sub(t64),
        top129_256: t256.saturating_sub(t128),
        rest_of_day2: day2.saturating_sub(t256),
    }
}

fn ratio(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64
    }
}
