//! Setup phase: build the Day-1 player population.

use crate::models::{Field, Player, PlayerId, TournamentConfig, SKILLED_SKILL, TUFF_SKILL};
use rand::seq::SliceRandom;
use rand::Rng;

/// Create every player of a fresh event.
///
/// Decks are visited in random order; ids run 1..=N across all decks.
/// Within a deck (1-indexed), the first `tuff_count` pilots get `TUFF_SKILL`
/// when the elite tier is enabled, every X-th remaining pilot gets
/// `SKILLED_SKILL` where X = round(100 / skill%), everyone else gets 0.
pub fn generate_players<R: Rng + ?Sized>(
    field: &Field,
    config: &TournamentConfig,
    rng: &mut R,
) -> Vec<Player> {
    let mut order: Vec<usize> = (0..field.decks.len()).collect();
    order.shuffle(rng);

    let mut players = Vec::with_capacity(field.total_players() as usize);
    let mut next_id: PlayerId = 1;

    for deck_idx in order {
        let deck = &field.decks[deck_idx];
        let count = field.player_counts.get(deck_idx).copied().unwrap_or(0);
        let skill_percent = field.skill_percents.get(deck_idx).copied().unwrap_or(0.0);
        let every_x = skilled_period(skill_percent);
        let tuff_count = config.tuff_count(deck);

        for position in 1..=count {
            let skill = pilot_skill(position, tuff_count, every_x);
            players.push(Player::new(next_id, deck.clone(), skill));
            next_id += 1;
        }
    }

    players
}

/// "Every X-th pilot is skilled" period; `None` when nobody is.
pub fn skilled_period(skill_percent: f64) -> Option<u32> {
    if skill_percent > 0.0 {
        let x = (100.0 / skill_percent).round();
        if x >= 1.0 {
            return Some(x as u32);
        }
    }
    None
}

fn pilot_skill(position: u32, tuff_count: u32, every_x: Option<u32>) -> f64 {
    if position <= tuff_count {
        TUFF_SKILL
    } else if every_x.is_some_and(|x| position % x == 0) {
        SKILLED_SKILL
    } else {
        0.0
    }
}
