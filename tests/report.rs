//! Integration tests for per-deck batch summaries.

use meta_sim::logic::placement_bands;
use meta_sim::{run_batch, summarize, BatchResults, TournamentConfig};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn results() -> BatchResults {
    let mut r = BatchResults::with_decks(&["A", "B"]);
    r.day1.insert("A".into(), 600);
    r.day1.insert("B".into(), 400);
    r.day2.insert("A".into(), 300);
    r.day2.insert("B".into(), 100);
    r.top16.insert("A".into(), 12);
    r.top16.insert("B".into(), 4);
    r.top32.insert("A".into(), 22);
    r.top32.insert("B".into(), 10);
    r.top64.insert("A".into(), 50);
    r.top64.insert("B".into(), 14);
    r.top128.insert("A".into(), 100);
    r.top128.insert("B".into(), 28);
    r.top256.insert("A".into(), 200);
    r.top256.insert("B".into(), 56);
    r
}

#[test]
fn bands_are_differences_of_cumulative_counts() {
    let bands = placement_bands(&results(), "A");
    assert_eq!(bands.top16, 12);
    assert_eq!(bands.top17_32, 10);
    assert_eq!(bands.top33_64, 28);
    assert_eq!(bands.top65_128, 50);
    assert_eq!(bands.top129_256, 100);
    assert_eq!(bands.rest_of_day2, 100);
    assert_eq!(bands.total(), 300);
}

#[test]
fn summary_shares_and_conversion() {
    let summary = summarize(&results());
    assert_eq!(summary.len(), 2);

    let a = &summary[0];
    assert_eq!(a.deck, "A");
    assert!((a.day1_share - 0.6).abs() < 1e-12);
    assert!((a.day2_share - 0.75).abs() < 1e-12);
    assert!((a.conversion_rate - 0.5).abs() < 1e-12);

    let b = &summary[1];
    assert!((b.conversion_rate - 0.25).abs() < 1e-12);
    assert_eq!(b.bands.total(), 100);
}

#[test]
fn empty_results_do_not_divide_by_zero() {
    let summary = summarize(&BatchResults::with_decks(&["A"]));
    assert_eq!(summary[0].day1_share, 0.0);
    assert_eq!(summary[0].conversion_rate, 0.0);
    assert_eq!(summary[0].bands.total(), 0);
}

#[test]
fn bands_of_a_real_batch_cover_day_two() {
    let cfg = TournamentConfig {
        matchup_matrix: vec![vec![0.5, 0.6], vec![0.4, 0.5]],
        meta_percentages: vec![50.0, 40.0],
        deck_names: vec!["A".into(), "B".into()],
        n_players: 600,
        skill_percents: vec![10.0, 10.0],
        ..Default::default()
    };
    let results = run_batch(&cfg, 2, &mut StdRng::seed_from_u64(101)).unwrap();
    for s in summarize(&results) {
        assert_eq!(s.bands.total(), s.day2_players);
        assert!(s.conversion_rate <= 1.0);
    }
}
