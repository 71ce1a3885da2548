//! Simulation logic: field preparation, pairing, match resolution, stages, batches.

mod batch;
mod matchup;
mod outcome;
mod pairing;
mod report;
mod runner;
mod setup;

pub use batch::{run_batch, run_batch_with_progress, tally_day_one, tally_day_two, BatchProgress};
pub use matchup::{player_counts, prepare_field};
pub use outcome::{apply_outcome, decide, resolve_match, tie_rate, BASE_TIE_RATE, GAMES_PER_MATCH};
pub use pairing::run_round;
pub use report::{placement_bands, summarize, DeckSummary, PlacementBands};
pub use runner::{qualify_for_day_two, run_day_one, run_day_two, run_stage, sort_standings};
pub use setup::{generate_players, skilled_period};
