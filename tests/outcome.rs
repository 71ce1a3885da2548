//! Integration tests for match resolution.

use meta_sim::logic::{decide, tie_rate, BASE_TIE_RATE};
use meta_sim::{resolve_match, MatchOutcome, MatchupMatrix, Player};
use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn tie_rate_depends_on_matchup_sum() {
    assert_eq!(tie_rate(0.6, 0.4), BASE_TIE_RATE);
    assert_eq!(tie_rate(0.5, 0.5), BASE_TIE_RATE);
    assert!((tie_rate(0.5, 0.3) - 0.2).abs() < 1e-12);
    assert!(tie_rate(0.7, 0.7) < 0.0);
}

#[test]
fn decide_respects_extremes() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..200 {
        assert_eq!(decide(1.0, 0.5, &mut rng), MatchOutcome::Tie);
        assert_eq!(decide(0.0, 1.0, &mut rng), MatchOutcome::PlayerOne);
        assert_eq!(decide(0.0, 0.0, &mut rng), MatchOutcome::PlayerTwo);
    }
}

#[test]
fn best_of_three_needs_two_games() {
    assert_eq!(MatchOutcome::from_games_won(3), MatchOutcome::PlayerOne);
    assert_eq!(MatchOutcome::from_games_won(2), MatchOutcome::PlayerOne);
    assert_eq!(MatchOutcome::from_games_won(1), MatchOutcome::PlayerTwo);
    assert_eq!(MatchOutcome::from_games_won(0), MatchOutcome::PlayerTwo);
}

#[test]
fn winner_gets_three_points_and_both_record_opponent() {
    // Entries sum to 2.0: no ties possible, deck 0 always wins its games.
    let matrix = MatchupMatrix::new(vec![vec![0.5, 1.0], vec![1.0, 0.5]]);
    let mut rng = StdRng::seed_from_u64(11);
    let mut a = Player::new(1, "A", 0.0);
    let mut b = Player::new(2, "B", 0.0);

    let outcome = resolve_match(&mut a, 0, &mut b, 1, &matrix, &mut rng);

    assert_eq!(outcome, MatchOutcome::PlayerOne);
    assert_eq!(a.match_points, 3);
    assert_eq!(b.match_points, 0);
    assert_eq!(a.opponents, vec![2]);
    assert_eq!(b.opponents, vec![1]);
}

#[test]
fn skill_difference_shifts_game_odds() {
    // 0.6 + 0.4 skill edge = certain game wins; sum 1.2 rules out ties.
    let matrix = MatchupMatrix::new(vec![vec![0.5, 0.6], vec![0.6, 0.5]]);
    let mut rng = StdRng::seed_from_u64(13);
    for round in 0..100 {
        let mut a = Player::new(1, "A", 0.4);
        let mut b = Player::new(2, "B", 0.0);
        let outcome = resolve_match(&mut a, 0, &mut b, 1, &matrix, &mut rng);
        assert_eq!(outcome, MatchOutcome::PlayerOne, "round {round}");
    }
    for _ in 0..100 {
        let mut a = Player::new(1, "A", 0.0);
        let mut b = Player::new(2, "B", 0.4);
        let outcome = resolve_match(&mut b, 1, &mut a, 0, &matrix, &mut rng);
        assert_eq!(outcome, MatchOutcome::PlayerOne);
        assert_eq!(b.match_points, 3);
    }
}

#[test]
fn tie_gives_one_point_each() {
    // Sum 0.0 -> tie chance 1.0.
    let matrix = MatchupMatrix::new(vec![vec![0.0, 0.0], vec![0.0, 0.0]]);
    let mut rng = StdRng::seed_from_u64(17);
    let mut a = Player::new(1, "A", 0.0);
    let mut b = Player::new(2, "B", 0.0);

    assert_eq!(
        resolve_match(&mut a, 0, &mut b, 1, &matrix, &mut rng),
        MatchOutcome::Tie
    );
    assert_eq!((a.match_points, b.match_points), (1, 1));
    assert_eq!(a.opponents, vec![2]);
    assert_eq!(b.opponents, vec![1]);
}

#[test]
fn even_matchup_splits_roughly_evenly() {
    let matrix = MatchupMatrix::new(vec![vec![0.5, 0.5], vec![0.5, 0.5]]);
    let mut rng = StdRng::seed_from_u64(19);
    let (mut one, mut two, mut ties) = (0u32, 0u32, 0u32);
    for _ in 0..4000 {
        let mut a = Player::new(1, "A", 0.0);
        let mut b = Player::new(2, "B", 0.0);
        match resolve_match(&mut a, 0, &mut b, 1, &matrix, &mut rng) {
            MatchOutcome::PlayerOne => one += 1,
            MatchOutcome::PlayerTwo => two += 1,
            MatchOutcome::Tie => ties += 1,
        }
    }
    // ~15% ties, the rest split evenly.
    assert!((450..=750).contains(&ties), "ties {ties}");
    let diff = (i64::from(one) - i64::from(two)).abs();
    assert!(diff < 300, "one {one}, two {two}");
}
