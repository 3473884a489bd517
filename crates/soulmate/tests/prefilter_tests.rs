mod common;

use aphrodite::ephemeris::{BodySnapshot, EphemerisPoint};
use aphrodite::zodiac::Modality;
use chrono::{Days, NaiveDate};
use common::{london, SyntheticProvider};
use aphrodite::provider::AstrologyProvider;
use soulmate::{prefilter, SearchSettings};

fn day(offset: u64) -> NaiveDate {
    NaiveDate::from_ymd_opt(2003, 1, 1)
        .and_then(|d| d.checked_add_days(Days::new(offset)))
        .unwrap()
}

fn point(offset: u64, sun: f64, moon: f64) -> EphemerisPoint {
    EphemerisPoint {
        date: day(offset),
        sun: BodySnapshot::at(sun),
        moon: BodySnapshot::at(moon),
        venus: BodySnapshot::at(sun + 20.0),
        mars: BodySnapshot::at(moon + 90.0),
        north_node: BodySnapshot::at(50.0),
    }
}

#[test]
fn test_perfect_cross_conjunction_ranks_first() {
    // User Sun 100 (Cancer), Moon 250. Every other day keeps its Sun in
    // Virgo (mutable) and its Moon well away from the user's Sun.
    let user_sun = 100.0;
    let user_moon = 250.0;
    let mut points: Vec<_> = (0..365).map(|d| point(d, 160.0 + (d % 10) as f64, 20.0)).collect();
    points[212] = point(212, user_moon, user_sun);

    let ranked = prefilter(&points, user_sun, user_moon, Modality::Cardinal, &SearchSettings::default());

    assert_eq!(ranked[0].index, 212);
    assert_eq!(ranked[0].point.date, day(212));
    // 20 + 20 + destiny bonus (Sagittarius is mutable, so none)
    assert!((ranked[0].score - 40.0).abs() < 1e-9);
}

#[test]
fn test_pool_is_bounded_and_best_first() {
    let mut provider = SyntheticProvider::new();
    let points = provider
        .generate_ephemeris(day(0), day(365 * 4), &london())
        .unwrap();
    let settings = SearchSettings::default();

    let ranked = prefilter(&points, 84.0, 310.0, Modality::Mutable, &settings);

    assert_eq!(ranked.len(), settings.candidate_pool);
    assert!(ranked.windows(2).all(|w| w[0].score >= w[1].score));
    assert!(ranked[0].score > 20.0);
}

#[test]
fn test_does_not_reorder_input() {
    let points: Vec<_> = (0..30).map(|d| point(d, d as f64 * 12.0, 0.0)).collect();
    let before: Vec<_> = points.iter().map(|p| p.date).collect();

    let _ = prefilter(&points, 0.0, 0.0, Modality::Cardinal, &SearchSettings::default());

    let after: Vec<_> = points.iter().map(|p| p.date).collect();
    assert_eq!(before, after);
}

#[test]
fn test_custom_pool_size() {
    let points: Vec<_> = (0..365).map(|d| point(d, 0.0, 0.0)).collect();
    let settings = SearchSettings {
        candidate_pool: 10,
        min_ranked_candidates: 5,
        ..SearchSettings::default()
    };

    let ranked = prefilter(&points, 0.0, 0.0, Modality::Cardinal, &settings);

    assert_eq!(ranked.len(), 10);
    assert!(ranked.iter().all(|r| r.score > 0.0));
}
