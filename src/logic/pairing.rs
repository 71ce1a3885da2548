//! Swiss pairing: one round over a snapshot of the field.

use crate::logic::outcome::resolve_match;
use crate::models::{Field, MatchOutcome, Player, RoundSummary, SimulationError};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::BTreeMap;

/// Play one Swiss round and hand the updated players back.
///
/// 1. Order players by match points (descending, stable) and bucket them by points.
/// 2. Walk that order. The last unpaired player gets a bye.
/// 3. Otherwise search buckets from the player's own points downward; in each,
///    shuffle and take the first candidate who is someone else, still
///    unpaired, and not a previous opponent. Resolve the match right away.
/// 4. A player with no legal candidate at or below their points sits the
///    round out with no points (listed in `RoundSummary::unpaired`).
///
/// Player order in the returned vector is unchanged.
pub fn run_round<R: Rng + ?Sized>(
    mut players: Vec<Player>,
    field: &Field,
    rng: &mut R,
) -> Result<(Vec<Player>, RoundSummary), SimulationError> {
    let decks = deck_rows(&players, field)?;

    let mut order: Vec<usize> = (0..players.len()).collect();
    order.sort_by(|&a, &b| players[b].match_points.cmp(&players[a].match_points));

    let mut brackets: BTreeMap<u32, Vec<usize>> = BTreeMap::new();
    for &slot in &order {
        brackets
            .entry(players[slot].match_points)
            .or_default()
            .push(slot);
    }

    let mut paired = vec![false; players.len()];
    let mut paired_count = 0;
    let mut summary = RoundSummary::default();

    for &slot in &order {
        if paired[slot] {
            continue;
        }

        if players.len() - paired_count == 1 {
            players[slot].record_bye();
            paired[slot] = true;
            paired_count += 1;
            summary.byes += 1;
            continue;
        }

        let points = players[slot].match_points;
        let opponent = brackets
            .range(..=points)
            .rev()
            .find_map(|(_, bracket)| find_opponent(&players, slot, bracket, &paired, &mut *rng));

        match opponent {
            Some(other) => {
                let (one, two) = pair_mut(&mut players, slot, other);
                let outcome =
                    resolve_match(one, decks[slot], two, decks[other], &field.matrix, rng);
                if outcome == MatchOutcome::Tie {
                    summary.ties += 1;
                }
                summary.matches += 1;
                paired[slot] = true;
                paired[other] = true;
                paired_count += 2;
            }
            None => summary.unpaired.push(players[slot].id),
        }
    }

    if !summary.unpaired.is_empty() {
        log::warn!(
            "{} player(s) found no eligible opponent this round: {:?}",
            summary.unpaired.len(),
            summary.unpaired
        );
    }

    Ok((players, summary))
}

/// First eligible opponent in a shuffled copy of `bracket`.
fn find_opponent<R: Rng + ?Sized>(
    players: &[Player],
    slot: usize,
    bracket: &[usize],
    paired: &[bool],
    rng: &mut R,
) -> Option<usize> {
    let player = &players[slot];
    let mut candidates = bracket.to_vec();
    candidates.shuffle(rng);
    candidates.into_iter().find(|&c| {
        let candidate = &players[c];
        candidate.id != player.id && !paired[c] && !player.has_faced(candidate.id)
    })
}

/// Matrix row for every player, by slot.
fn deck_rows(players: &[Player], field: &Field) -> Result<Vec<usize>, SimulationError> {
    players
        .iter()
        .map(|p| {
            field
                .deck_index(&p.deck)
                .ok_or_else(|| SimulationError::UnknownDeck(p.deck.clone()))
        })
        .collect()
}

/// Two distinct mutable players from the same slice.
fn pair_mut(players: &mut [Player], a: usize, b: usize) -> (&mut Player, &mut Player) {
    if a < b {
        let (left, right) = players.split_at_mut(b);
        (&mut left[a], &mut right[0])
    } else {
        let (left, right) = players.split_at_mut(a);
        (&mut right[0], &mut left[b])
    }
}
