//! Deterministic stand-in for an ephemeris backend.
//!
//! Bodies move at their mean daily motion from J2000; the Ascendant is local
//! sidereal time plus ninety degrees with a small periodic wobble, so it is
//! close to, but not exactly, linear in clock time.
#![allow(dead_code)]

use aphrodite::chart::{BirthMoment, BirthPlace, Chart};
use aphrodite::ephemeris::{BodySnapshot, EphemerisPoint, HousePositions, LayerPositions, PlanetPosition};
use aphrodite::provider::{AstrologyProvider, RelationshipOutcome};
use aphrodite::zodiac::{normalize_degrees, Sign};
use aphrodite::AstroError;
use chrono::{DateTime, Days, NaiveDate, TimeZone, Utc};
use std::collections::HashMap;

const MEAN_MOTION: &[(&str, f64, f64)] = &[
    ("sun", 280.460, 0.985_647_4),
    ("moon", 218.316, 13.176_396),
    ("mercury", 252.251, 4.092_339),
    ("venus", 181.980, 1.602_130),
    ("mars", 355.433, 0.524_033),
    ("jupiter", 34.351, 0.083_091),
    ("saturn", 50.077, 0.033_459),
    ("north_node", 125.045, -0.052_954),
];

/// Amplitude of the Ascendant's departure from uniform motion, degrees.
const ASC_WOBBLE: f64 = 2.0;

pub fn london() -> BirthPlace {
    BirthPlace {
        latitude: 51.5074,
        longitude: -0.1278,
        timezone: "Europe/London".to_string(),
    }
}

pub fn new_york() -> BirthPlace {
    BirthPlace {
        latitude: 40.7128,
        longitude: -74.0060,
        timezone: "America/New_York".to_string(),
    }
}

pub fn days_since_j2000(utc: DateTime<Utc>) -> f64 {
    let epoch = Utc.with_ymd_and_hms(2000, 1, 1, 12, 0, 0).unwrap();
    (utc - epoch).num_seconds() as f64 / 86_400.0
}

pub fn positions_at(utc: DateTime<Utc>, place: &BirthPlace) -> LayerPositions {
    let d = days_since_j2000(utc);
    let planets = MEAN_MOTION
        .iter()
        .map(|(id, epoch, rate)| (id.to_string(), PlanetPosition::new(normalize_degrees(epoch + rate * d), *rate)))
        .collect::<HashMap<_, _>>();

    let lst = normalize_degrees(280.460_618 + 360.985_647_366 * d + place.longitude);
    let asc = normalize_degrees(lst + 90.0 + ASC_WOBBLE * lst.to_radians().sin());
    let mc = normalize_degrees(lst);
    let cusps = (0..12)
        .map(|i| ((i + 1).to_string(), normalize_degrees(asc + 30.0 * i as f64)))
        .collect();

    LayerPositions {
        planets,
        houses: Some(HousePositions {
            system: "equal".to_string(),
            cusps,
            angles: HashMap::from([("asc".to_string(), asc), ("mc".to_string(), mc)]),
        }),
    }
}

#[derive(Default)]
pub struct SyntheticProvider {
    pub chart_calls: usize,
    pub ephemeris_calls: usize,
    pub empty_ephemeris: bool,
    pub evaluator_unavailable: bool,
    pub detached_charts: bool,
    /// Fail any chart whose birth moment matches.
    pub fail_chart_when: Option<fn(&BirthMoment) -> bool>,
}

impl SyntheticProvider {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AstrologyProvider for SyntheticProvider {
    fn calculate_chart(&mut self, birth: &BirthMoment) -> Result<Chart, AstroError> {
        self.chart_calls += 1;
        let utc = birth.to_utc()?;
        if self.fail_chart_when.is_some_and(|fails| fails(birth)) {
            return Err(AstroError::ChartCalculation(format!("synthetic failure for {birth:?}")));
        }

        let chart = Chart::from_positions(birth.clone(), positions_at(utc, &birth.place()));
        if self.detached_charts {
            return Ok(Chart::detached(birth.clone(), chart.planets, chart.points));
        }
        Ok(chart)
    }

    fn calculate_relationship_aspects(&mut self, first: &Chart, second: &Chart) -> RelationshipOutcome {
        if self.evaluator_unavailable {
            return RelationshipOutcome::Unavailable;
        }
        let (Some(a), Some(b)) = (first.provider_handle(), second.provider_handle()) else {
            return RelationshipOutcome::Unavailable;
        };
        match aphrodite::aspects::relationship_score(a.positions(), b.positions()) {
            Some(score) => RelationshipOutcome::Scored(score),
            None => RelationshipOutcome::Unavailable,
        }
    }

    fn generate_ephemeris(
        &mut self,
        start: NaiveDate,
        end: NaiveDate,
        place: &BirthPlace,
    ) -> Result<Vec<EphemerisPoint>, AstroError> {
        self.ephemeris_calls += 1;
        if self.empty_ephemeris {
            return Ok(Vec::new());
        }

        let mut points = Vec::new();
        let mut date = start;
        while date <= end {
            let noon = BirthMoment::on_date(date, 12, 0, place).to_utc()?;
            let positions = positions_at(noon, place);
            let snapshot = |id: &str| BodySnapshot::at(positions.planets[id].lon);
            points.push(EphemerisPoint {
                date,
                sun: snapshot("sun"),
                moon: snapshot("moon"),
                venus: snapshot("venus"),
                mars: snapshot("mars"),
                north_node: snapshot("north_node"),
            });
            date = date.checked_add_days(Days::new(1)).unwrap();
        }
        Ok(points)
    }
}

/// Quarter-hour sweep of the whole day, closest Ascendant to the sign's
/// midpoint wins. Used only to check the analytic solver.
pub fn reference_solve_time<P: AstrologyProvider>(
    provider: &mut P,
    date: NaiveDate,
    target: Sign,
    place: &BirthPlace,
) -> (u32, u32) {
    let target_center = target.center_longitude();
    let mut best = (12, 0);
    let mut best_error = 360.0;

    for hour in 0..24 {
        for minute in (0..60).step_by(15) {
            let Ok(chart) = provider.calculate_chart(&BirthMoment::on_date(date, hour, minute, place)) else {
                continue;
            };
            let Some(asc) = chart.ascendant() else {
                continue;
            };
            let error = aphrodite::zodiac::angular_separation(target_center, asc.position);
            if error < best_error {
                best_error = error;
                best = (hour, minute);
            }
        }
    }
    best
}
