//! Per-deck placement counts accumulated over many simulated events.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Day-2 standings prefixes tracked by the batch aggregator.
pub const PLACEMENT_CUTS: [usize; 5] = [16, 32, 64, 128, 256];

/// Deck name to count.
pub type DeckCounts = HashMap<String, u64>;

/// Accumulated counts. Every registered deck has an entry in every map.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchResults {
    /// Day1 -> Day2 pairs completed.
    pub iterations: u32,
    /// Deck registry in discovery order.
    pub decks: Vec<String>,
    pub top16: DeckCounts,
    pub top32: DeckCounts,
    pub top64: DeckCounts,
    pub top128: DeckCounts,
    pub top256: DeckCounts,
    pub day2: DeckCounts,
    pub day1: DeckCounts,
}

impl BatchResults {
    /// Empty results with the configured decks registered.
    pub fn with_decks<S: AsRef<str>>(decks: &[S]) -> Self {
        let mut results = Self::default();
        for deck in decks {
            results.register_deck(deck.as_ref());
        }
        results
    }

    /// Add a deck with zero counts everywhere. No-op if already known.
    pub fn register_deck(&mut self, deck: &str) {
        if self.day1.contains_key(deck) {
            return;
        }
        self.decks.push(deck.to_string());
        for map in self.maps_mut() {
            map.insert(deck.to_string(), 0);
        }
    }

    pub fn is_registered(&self, deck: &str) -> bool {
        self.day1.contains_key(deck)
    }

    /// Cumulative count map for one of `PLACEMENT_CUTS`.
    pub fn top(&self, cut: usize) -> Option<&DeckCounts> {
        match cut {
            16 => Some(&self.top16),
            32 => Some(&self.top32),
            64 => Some(&self.top64),
            128 => Some(&self.top128),
            256 => Some(&self.top256),
            _ => None,
        }
    }

    pub(crate) fn top_mut(&mut self, cut: usize) -> Option<&mut DeckCounts> {
        match cut {
            16 => Some(&mut self.top16),
            32 => Some(&mut self.top32),
            64 => Some(&mut self.top64),
            128 => Some(&mut self.top128),
            256 => Some(&mut self.top256),
            _ => None,
        }
    }

    pub fn day1_total(&self) -> u64 {
        self.day1.values().sum()
    }

    pub fn day2_total(&self) -> u64 {
        self.day2.values().sum()
    }

    /// Count for a deck in a map, 0 when missing.
    pub fn count(map: &DeckCounts, deck: &str) -> u64 {
        map.get(deck).copied().unwrap_or(0)
    }

    fn maps_mut(&mut self) -> [&mut DeckCounts; 7] {
        [
            &mut self.top16,
            &mut self.top32,
            &mut self.top64,
            &mut self.top128,
            &mut self.top256,
            &mut self.day2,
            &mut self.day1,
        ]
    }
}
