mod common;

use aphrodite::chart::{BirthMoment, BirthPlace};
use aphrodite::provider::AstrologyProvider;
use aphrodite::zodiac::{angular_separation, Sign};
use chrono::NaiveDate;
use common::{london, new_york, reference_solve_time, SyntheticProvider};
use soulmate::ascendant::NOON;
use soulmate::solve_time_for_ascendant;

fn ascendant_at(provider: &mut SyntheticProvider, date: NaiveDate, time: (u32, u32), place: &BirthPlace) -> Sign {
    let chart = provider
        .calculate_chart(&BirthMoment::on_date(date, time.0, time.1, place))
        .unwrap();
    chart.ascendant().unwrap().sign
}

#[test]
fn test_solver_reaches_every_sign() {
    let mut provider = SyntheticProvider::new();
    let date = NaiveDate::from_ymd_opt(1995, 7, 3).unwrap();

    for target in Sign::ALL {
        let time = solve_time_for_ascendant(&mut provider, date, target, &london());
        assert_eq!(ascendant_at(&mut provider, date, time, &london()), target, "target {target}");
    }
}

#[test]
fn test_solver_uses_at_most_three_charts() {
    let mut provider = SyntheticProvider::new();
    let date = NaiveDate::from_ymd_opt(1999, 2, 11).unwrap();

    for target in Sign::ALL {
        provider.chart_calls = 0;
        solve_time_for_ascendant(&mut provider, date, target, &new_york());
        assert!(provider.chart_calls <= 3, "{} calls for {target}", provider.chart_calls);
    }
}

#[test]
fn test_solver_is_stable_when_re_verified() {
    let mut provider = SyntheticProvider::new();

    for day in [1, 9, 17, 25] {
        let date = NaiveDate::from_ymd_opt(2001, 11, day).unwrap();
        for target in [Sign::Aries, Sign::Cancer, Sign::Scorpio, Sign::Pisces] {
            let first = solve_time_for_ascendant(&mut provider, date, target, &london());
            let achieved = ascendant_at(&mut provider, date, first, &london());
            let second = solve_time_for_ascendant(&mut provider, date, achieved, &london());
            assert_eq!(ascendant_at(&mut provider, date, second, &london()), achieved);
        }
    }
}

#[test]
fn test_solver_agrees_with_quarter_hour_sweep() {
    let mut provider = SyntheticProvider::new();
    let date = NaiveDate::from_ymd_opt(1997, 4, 20).unwrap();

    for target in Sign::ALL {
        let fast = solve_time_for_ascendant(&mut provider, date, target, &new_york());
        let slow = reference_solve_time(&mut provider, date, target, &new_york());
        assert_eq!(ascendant_at(&mut provider, date, fast, &new_york()), target);
        assert_eq!(ascendant_at(&mut provider, date, slow, &new_york()), target);

        // Both land near the sign's midpoint, within a few degrees of each other
        let fast_min = fast.0 as f64 * 60.0 + fast.1 as f64;
        let slow_min = slow.0 as f64 * 60.0 + slow.1 as f64;
        let gap_degrees = angular_separation(fast_min / 4.0, slow_min / 4.0);
        assert!(gap_degrees < 10.0, "target {target}: {fast:?} vs {slow:?}");
    }
}

#[test]
fn test_midnight_failure_falls_back_to_noon() {
    let mut provider = SyntheticProvider {
        fail_chart_when: Some(|birth| birth.hour == 0 && birth.minute == 0),
        ..SyntheticProvider::new()
    };
    let date = NaiveDate::from_ymd_opt(1995, 7, 3).unwrap();

    assert_eq!(solve_time_for_ascendant(&mut provider, date, Sign::Leo, &london()), NOON);
    assert_eq!(provider.chart_calls, 1);
}

#[test]
fn test_verification_failure_returns_estimate() {
    let mut provider = SyntheticProvider {
        fail_chart_when: Some(|birth| !(birth.hour == 0 && birth.minute == 0)),
        ..SyntheticProvider::new()
    };
    let date = NaiveDate::from_ymd_opt(1995, 7, 3).unwrap();

    let time = solve_time_for_ascendant(&mut provider, date, Sign::Leo, &london());
    assert_eq!(provider.chart_calls, 2);

    let mut healthy = SyntheticProvider::new();
    assert_eq!(ascendant_at(&mut healthy, date, time, &london()), Sign::Leo);
}
