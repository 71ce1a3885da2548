//! Data structures for the simulator: players, decks, configuration, results.

mod deck;
mod game;
mod player;
mod results;
mod tournament;

pub use deck::{
    Field, MatchupMatrix, FIELD_VS_OTHER, OTHER_DECK, OTHER_MIRROR, OTHER_SKILL_PERCENT,
    OTHER_VS_FIELD,
};
pub use game::MatchOutcome;
pub use player::{
    Player, PlayerId, BYE_OPPONENT, SKILLED_SKILL, TIE_POINTS, TUFF_SKILL, WIN_POINTS,
};
pub use results::{BatchResults, DeckCounts, PLACEMENT_CUTS};
pub use tournament::{
    RoundSummary, SimulationError, Stage, StageResult, TournamentConfig, DAY1_ROUNDS, DAY2_CUT,
    DAY2_ROUNDS,
};
