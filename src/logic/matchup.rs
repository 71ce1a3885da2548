//! Meta normalization: "Other" injection and per-deck player counts.

use crate::models::{
    Field, MatchupMatrix, TournamentConfig, FIELD_VS_OTHER, OTHER_DECK, OTHER_MIRROR,
    OTHER_SKILL_PERCENT, OTHER_VS_FIELD,
};

/// Build the field a stage plays with.
///
/// 1. If the meta shares sum to less than 100, append "Other" with the rest,
///    a 5% skill share, and the fixed cross-matchups.
/// 2. Normalize shares to 1, scale by `n_players`, round each.
/// 3. Put any rounding drift on the (first) largest deck so counts sum to `n_players`.
pub fn prepare_field(config: &TournamentConfig) -> Field {
    let mut decks = config.deck_names.clone();
    let mut meta = config.meta_percentages.clone();
    let mut skills = config.skill_percents.clone();
    let mut matrix = MatchupMatrix::new(config.matchup_matrix.clone());

    let declared: f64 = meta.iter().sum();
    if declared < 100.0 {
        meta.push(100.0 - declared);
        decks.push(OTHER_DECK.to_string());
        skills.push(OTHER_SKILL_PERCENT);
        matrix.push_deck(OTHER_VS_FIELD, FIELD_VS_OTHER, OTHER_MIRROR);
    }

    let counts = player_counts(&meta, config.n_players);
    Field::new(decks, matrix, counts, skills)
}

/// Integer player counts per share, summing exactly to `n_players`.
///
/// Positive drift goes to the first largest deck. Negative drift is taken
/// from the first largest deck down to zero, then from the next largest,
/// until it is spent.
pub fn player_counts(meta: &[f64], n_players: u32) -> Vec<u32> {
    let total: f64 = meta.iter().sum();
    let mut counts: Vec<i64> = meta
        .iter()
        // A zero total gives NaN, which casts to 0; the drift fix then takes over.
        .map(|share| ((f64::from(n_players) * (share / total)).round() as i64).max(0))
        .collect();

    // Stable: equal counts keep deck order.
    let mut by_size: Vec<usize> = (0..counts.len()).collect();
    by_size.sort_by(|&a, &b| counts[b].cmp(&counts[a]));

    let mut drift = i64::from(n_players) - counts.iter().sum::<i64>();
    if drift > 0 {
        if let Some(&largest) = by_size.first() {
            counts[largest] += drift;
        }
    } else {
        for &deck in &by_size {
            if drift == 0 {
                break;
            }
            let taken = counts[deck].min(-drift);
            counts[deck] -= taken;
            drift += taken;
        }
    }

    counts.into_iter().map(|c| c as u32).collect()
}
