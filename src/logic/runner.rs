//! Stage runner: Day 1 from scratch, Day 2 from qualified Day-1 finishers.

use crate::logic::matchup::prepare_field;
use crate::logic::pairing::run_round;
use crate::logic::setup::generate_players;
use crate::models::{
    Field, Player, PlayerId, SimulationError, Stage, StageResult, TournamentConfig, DAY2_CUT,
};
use crate::store::{load_records, save_records, RecordStore};
use rand::Rng;

/// Run the stage named by `config.stage`.
///
/// Day 2 takes its field from `day_one` when given, else from `store`;
/// with neither it fails with `MissingDayOneRecords`. When `store` is given,
/// the final standings are saved under the stage's key.
pub fn run_stage<R: Rng + ?Sized>(
    config: &TournamentConfig,
    day_one: Option<&[Player]>,
    mut store: Option<&mut dyn RecordStore>,
    rng: &mut R,
) -> Result<StageResult, SimulationError> {
    let field = prepare_field(config);
    let stage = config.stage;

    let players = match stage {
        Stage::Day1 => generate_players(&field, config, rng),
        Stage::Day2 => {
            let records = match (day_one, store.as_deref()) {
                (Some(records), _) => records.to_vec(),
                (None, Some(store)) => load_records(store, Stage::Day1)?
                    .ok_or(SimulationError::MissingDayOneRecords)?,
                (None, None) => return Err(SimulationError::MissingDayOneRecords),
            };
            qualify_for_day_two(&records)
        }
    };

    log::debug!(
        "{:?}: {} players over {} decks",
        stage,
        players.len(),
        field.decks.len()
    );

    let (mut standings, end_of_round) = play_rounds(players, &field, stage.rounds(), rng)?;
    sort_standings(&mut standings);

    if let Some(store) = store.as_deref_mut() {
        save_records(store, stage, &standings)?;
    }

    Ok(StageResult {
        stage,
        standings,
        end_of_round,
    })
}

/// Day 1 without persistence.
pub fn run_day_one<R: Rng + ?Sized>(
    config: &TournamentConfig,
    rng: &mut R,
) -> Result<StageResult, SimulationError> {
    run_stage(&config.for_stage(Stage::Day1), None, None, rng)
}

/// Day 2 fed directly from Day-1 standings, without persistence.
pub fn run_day_two<R: Rng + ?Sized>(
    config: &TournamentConfig,
    day_one: &[Player],
    rng: &mut R,
) -> Result<StageResult, SimulationError> {
    run_stage(&config.for_stage(Stage::Day2), Some(day_one), None, rng)
}

/// Day-1 finishers at or above the cut, with Day-2 ids 1..=k in standings order.
/// Points, skill, deck, and opponent history carry over.
pub fn qualify_for_day_two(day_one: &[Player]) -> Vec<Player> {
    day_one
        .iter()
        .filter(|p| p.match_points >= DAY2_CUT)
        .cloned()
        .zip(1..)
        .map(|(mut p, day2_id): (Player, PlayerId)| {
            p.day2_id = Some(day2_id);
            p
        })
        .collect()
}

/// Sort by match points, highest first. Equal points keep their order.
pub fn sort_standings(players: &mut [Player]) {
    players.sort_by(|a, b| b.match_points.cmp(&a.match_points));
}

/// Play up to `rounds` rounds, stopping after a round where nothing happened.
fn play_rounds<R: Rng + ?Sized>(
    mut players: Vec<Player>,
    field: &Field,
    rounds: u32,
    rng: &mut R,
) -> Result<(Vec<Player>, Option<u32>), SimulationError> {
    for round in 1..=rounds {
        let (next, summary) = run_round(players, field, rng)?;
        players = next;
        log::debug!(
            "round {}: {} matches ({} ties), {} byes, {} unpaired",
            round,
            summary.matches,
            summary.ties,
            summary.byes,
            summary.unpaired.len()
        );
        if summary.is_idle() {
            return Ok((players, Some(round)));
        }
    }
    Ok((players, None))
}
