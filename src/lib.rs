//! Card-game meta simulator: Swiss Day 1 / Day 2 events over a matchup matrix,
//! and batch statistics on which decks reach Day 2 and the top placements.

pub mod ingest;
pub mod logic;
pub mod models;
pub mod store;

pub use logic::{
    generate_players, prepare_field, qualify_for_day_two, resolve_match, run_batch,
    run_batch_with_progress, run_day_one, run_day_two, run_round, run_stage, summarize,
    BatchProgress, DeckSummary, PlacementBands,
};
pub use models::{
    BatchResults, Field, MatchOutcome, MatchupMatrix, Player, PlayerId, RoundSummary,
    SimulationError, Stage, StageResult, TournamentConfig,
};
pub use store::{InMemoryRecordStore, RecordStore, DAY1_RECORDS_KEY, DAY2_RECORDS_KEY};
