//! Resolving a single pairing into a tie or a best-of-three result.

use crate::models::{MatchOutcome, MatchupMatrix, Player};
use rand::Rng;

/// Tie chance when the two matchup entries are exact complements.
pub const BASE_TIE_RATE: f64 = 0.15;

/// Games in a match; the first to a majority takes it.
pub const GAMES_PER_MATCH: u32 = 3;

/// Tie probability for a pairing: 0.15 if `p1 + p2 == 1`, else `1 - |p1 + p2|`.
pub fn tie_rate(p1: f64, p2: f64) -> f64 {
    let sum = p1 + p2;
    if sum == 1.0 {
        BASE_TIE_RATE
    } else {
        1.0 - sum.abs()
    }
}

/// Draw an outcome. `game_win` is player one's per-game win probability
/// (matchup entry plus skill difference); it is used as-is, not clamped.
pub fn decide<R: Rng + ?Sized>(tie_chance: f64, game_win: f64, rng: &mut R) -> MatchOutcome {
    if rng.gen::<f64>() < tie_chance {
        return MatchOutcome::Tie;
    }
    let games = (0..GAMES_PER_MATCH)
        .filter(|_| rng.gen::<f64>() < game_win)
        .count() as u32;
    MatchOutcome::from_games_won(games)
}

/// Play `player_one` (deck row `deck_one`) against `player_two` (deck row
/// `deck_two`), awarding match points and recording each other as opponents.
pub fn resolve_match<R: Rng + ?Sized>(
    player_one: &mut Player,
    deck_one: usize,
    player_two: &mut Player,
    deck_two: usize,
    matrix: &MatchupMatrix,
    rng: &mut R,
) -> MatchOutcome {
    let p1 = matrix.rate(deck_one, deck_two);
    let p2 = matrix.rate(deck_two, deck_one);
    let game_win = p1 + (player_one.skill - player_two.skill);

    let outcome = decide(tie_rate(p1, p2), game_win, rng);
    apply_outcome(player_one, player_two, outcome);
    outcome
}

/// Award points for `outcome` and append opponent history on both sides.
pub fn apply_outcome(player_one: &mut Player, player_two: &mut Player, outcome: MatchOutcome) {
    let (one, two) = (player_one.id, player_two.id);
    match outcome {
        MatchOutcome::Tie => {
            player_one.record_tie(two);
            player_two.record_tie(one);
        }
        MatchOutcome::PlayerOne => {
            player_one.record_win(two);
            player_two.record_loss(one);
        }
        MatchOutcome::PlayerTwo => {
            player_one.record_loss(two);
            player_two.record_win(one);
        }
    }
}
