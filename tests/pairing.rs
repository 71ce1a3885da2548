//! Integration tests for a single Swiss round.

use meta_sim::models::BYE_OPPONENT;
use meta_sim::{run_round, Field, MatchupMatrix, Player, SimulationError};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn field() -> Field {
    Field::new(
        vec!["A".into(), "B".into()],
        MatchupMatrix::new(vec![vec![0.5, 0.5], vec![0.5, 0.5]]),
        vec![0, 0],
        vec![0.0, 0.0],
    )
}

fn players(n: u32) -> Vec<Player> {
    (1..=n)
        .map(|id| Player::new(id, if id % 2 == 0 { "A" } else { "B" }, 0.0))
        .collect()
}

fn with_points(id: u32, points: u32, opponents: Vec<u32>) -> Player {
    let mut p = Player::new(id, "A", 0.0);
    p.match_points = points;
    p.opponents = opponents;
    p
}

#[test]
fn every_player_gains_zero_one_or_three() {
    let mut rng = StdRng::seed_from_u64(21);
    let field = field();
    let mut current = players(33);
    for _ in 0..6 {
        let before: Vec<u32> = current.iter().map(|p| p.match_points).collect();
        let (next, _) = run_round(current, &field, &mut rng).unwrap();
        for (p, old) in next.iter().zip(before) {
            let gained = p.match_points - old;
            assert!(matches!(gained, 0 | 1 | 3), "player {} gained {}", p.id, gained);
        }
        current = next;
    }
}

#[test]
fn odd_field_gives_exactly_one_bye() {
    let mut rng = StdRng::seed_from_u64(23);
    let (after, summary) = run_round(players(5), &field(), &mut rng).unwrap();

    assert_eq!(summary.byes, 1);
    assert_eq!(summary.matches, 2);
    assert!(summary.unpaired.is_empty());

    let bye: Vec<&Player> = after
        .iter()
        .filter(|p| p.opponents == vec![BYE_OPPONENT])
        .collect();
    assert_eq!(bye.len(), 1);
    assert_eq!(bye[0].match_points, 3);
    assert_eq!(bye[0].byes(), 1);
}

#[test]
fn players_are_paired_once_and_histories_are_mutual() {
    let mut rng = StdRng::seed_from_u64(25);
    let (after, summary) = run_round(players(16), &field(), &mut rng).unwrap();

    assert_eq!(summary.matches, 8);
    assert_eq!(summary.byes, 0);
    for p in &after {
        assert_eq!(p.opponents.len(), 1);
        let opp = after.iter().find(|o| o.id == p.opponents[0]).unwrap();
        assert_eq!(opp.opponents, vec![p.id]);
        assert_ne!(opp.id, p.id);
    }
}

#[test]
fn player_order_is_preserved() {
    let mut rng = StdRng::seed_from_u64(27);
    let before: Vec<u32> = players(10).iter().map(|p| p.id).collect();
    let (after, _) = run_round(players(10), &field(), &mut rng).unwrap();
    let ids: Vec<u32> = after.iter().map(|p| p.id).collect();
    assert_eq!(ids, before);
}

#[test]
fn rematches_are_avoided_by_pairing_down() {
    let mut rng = StdRng::seed_from_u64(29);
    // A (6) already played B (3); A pairs down to C, B takes the bye.
    let field = field();
    let roster = vec![
        with_points(1, 6, vec![2]),
        with_points(2, 3, vec![1]),
        with_points(3, 0, vec![]),
    ];
    let (after, summary) = run_round(roster, &field, &mut rng).unwrap();

    assert_eq!(summary.matches, 1);
    assert_eq!(summary.byes, 1);
    assert_eq!(after[0].opponents, vec![2, 3]);
    assert_eq!(after[1].opponents, vec![1, BYE_OPPONENT]);
    assert_eq!(after[1].match_points, 6);
    assert_eq!(after[2].opponents, vec![1]);
}

#[test]
fn players_never_pair_up_into_a_higher_bracket() {
    let mut rng = StdRng::seed_from_u64(31);
    // Player 1 has already faced 2 and cannot pair down. Player 2 has no
    // history with 1 but only searches its own bracket and below.
    let roster = vec![with_points(1, 3, vec![2]), with_points(2, 0, vec![])];
    let (after, summary) = run_round(roster, &field(), &mut rng).unwrap();

    assert_eq!(summary.matches, 0);
    assert_eq!(summary.byes, 0);
    assert_eq!(summary.unpaired, vec![1, 2]);
    assert_eq!(after[0].match_points, 3);
    assert_eq!(after[1].match_points, 0);
    assert!(after[1].opponents.is_empty());
}

#[test]
fn exhausted_pairing_leaves_points_unchanged() {
    let mut rng = StdRng::seed_from_u64(33);
    let roster = vec![with_points(1, 3, vec![2]), with_points(2, 3, vec![1])];
    let (after, summary) = run_round(roster, &field(), &mut rng).unwrap();

    assert!(summary.is_idle());
    assert_eq!(summary.unpaired, vec![1, 2]);
    assert_eq!(after[0].match_points, 3);
    assert_eq!(after[1].match_points, 3);
    assert_eq!(after[0].opponents, vec![2]);
}

#[test]
fn unknown_deck_is_reported() {
    let mut rng = StdRng::seed_from_u64(35);
    let roster = vec![Player::new(1, "A", 0.0), Player::new(2, "Mystery", 0.0)];
    let err = run_round(roster, &field(), &mut rng).unwrap_err();
    assert_eq!(err, SimulationError::UnknownDeck("Mystery".into()));
}

#[test]
fn single_player_gets_a_bye() {
    let mut rng = StdRng::seed_from_u64(37);
    let (after, summary) = run_round(players(1), &field(), &mut rng).unwrap();
    assert_eq!(summary.byes, 1);
    assert_eq!(after[0].match_points, 3);
    assert_eq!(after[0].opponents, vec![BYE_OPPONENT]);
}
