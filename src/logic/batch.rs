//! Batch aggregation: many Day1 -> Day2 events, per-deck placement counts.

use crate::logic::runner::run_stage;
use crate::models::{BatchResults, Player, SimulationError, Stage, TournamentConfig, PLACEMENT_CUTS};
use crate::store::RecordStore;
use rand::Rng;
use serde::Serialize;
use std::ops::ControlFlow;

/// Reported after every completed Day1 -> Day2 iteration.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct BatchProgress {
    pub completed: u32,
    pub total: u32,
    /// 0..=100
    pub percent: f64,
}

/// Run `iterations` Day1 -> Day2 events and accumulate counts.
pub fn run_batch<R: Rng + ?Sized>(
    config: &TournamentConfig,
    iterations: u32,
    rng: &mut R,
) -> Result<BatchResults, SimulationError> {
    run_batch_with_progress(config, iterations, None, rng, |_| ControlFlow::Continue(()))
}

/// Like `run_batch`, with optional persistence and a progress callback.
///
/// Each Day 2 is fed the matching Day-1 standings directly; `store`, when
/// given, only receives copies of each stage's standings. Returning
/// `ControlFlow::Break` from `on_progress` stops the batch before the next
/// iteration and returns what has been accumulated.
pub fn run_batch_with_progress<R, F>(
    config: &TournamentConfig,
    iterations: u32,
    mut store: Option<&mut dyn RecordStore>,
    rng: &mut R,
    mut on_progress: F,
) -> Result<BatchResults, SimulationError>
where
    R: Rng + ?Sized,
    F: FnMut(&BatchProgress) -> ControlFlow<()>,
{
    let mut results = BatchResults::with_decks(&config.deck_names);
    let day1_config = config.for_stage(Stage::Day1);
    let day2_config = config.for_stage(Stage::Day2);

    log::info!(
        "Starting batch: {} iterations, {} players, {} decks",
        iterations,
        config.n_players,
        config.deck_names.len()
    );

    for completed in 1..=iterations {
        let day1 = run_stage(&day1_config, None, reborrow(&mut store), rng)?;
        tally_day_one(&mut results, &day1.standings);

        let day2 = run_stage(&day2_config, Some(&day1.standings), reborrow(&mut store), rng)?;
        tally_day_two(&mut results, &day2.standings);

        results.iterations = completed;

        let progress = BatchProgress {
            completed,
            total: iterations,
            percent: f64::from(completed) / f64::from(iterations) * 100.0,
        };
        if on_progress(&progress).is_break() {
            log::info!("Batch stopped after {} of {} iterations", completed, iterations);
            break;
        }
    }

    log::info!(
        "Batch finished: {} iterations, {} Day-2 seats",
        results.iterations,
        results.day2_total()
    );
    Ok(results)
}

/// Short-lived handle on the batch's store, usable once per stage.
fn reborrow<'a>(store: &'a mut Option<&mut dyn RecordStore>) -> Option<&'a mut dyn RecordStore> {
    store.as_mut().map(|s| &mut **s as &mut dyn RecordStore)
}

/// Register decks first seen in this Day 1 (e.g. "Other"), then count participation.
pub fn tally_day_one(results: &mut BatchResults, standings: &[Player]) {
    for player in standings {
        if !results.is_registered(&player.deck) {
            results.register_deck(&player.deck);
        }
    }
    for player in standings {
        *results.day1.entry(player.deck.clone()).or_insert(0) += 1;
    }
}

/// Count each deck in every top-N prefix of the sorted Day-2 standings and overall.
pub fn tally_day_two(results: &mut BatchResults, standings: &[Player]) {
    for (place, player) in standings.iter().enumerate() {
        if !results.is_registered(&player.deck) {
            results.register_deck(&player.deck);
        }
        for cut in PLACEMENT_CUTS {
            if place < cut {
                if let Some(map) = results.top_mut(cut) {
                    *map.entry(player.deck.clone()).or_insert(0) += 1;
                }
            }
        }
        *results.day2.entry(player.deck.clone()).or_insert(0) += 1;
    }
}
