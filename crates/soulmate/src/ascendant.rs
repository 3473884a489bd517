//! Birth time that puts a chosen sign on the Ascendant.
//!
//! The Ascendant turns through the zodiac about once a day, roughly one
//! degree per four minutes of clock time. One chart at midnight gives a
//! reference; the offset to the target sign's midpoint gives an estimate;
//! a second chart verifies it and, if the sign is off, a single linear
//! correction is applied. Two or three chart calculations instead of a
//! 96-slot sweep.

use aphrodite::chart::{BirthMoment, BirthPlace};
use aphrodite::provider::AstrologyProvider;
use aphrodite::zodiac::{signed_delta, Sign};
use chrono::NaiveDate;

/// Clock minutes per degree of Ascendant motion.
pub const MINUTES_PER_DEGREE: f64 = 4.0;
const MINUTES_PER_DAY: i64 = 24 * 60;

/// Returned when not even the midnight reference chart can be computed.
pub const NOON: (u32, u32) = (12, 0);

/// Local (hour, minute) on `date` whose Ascendant falls in `target`.
///
/// Never fails: an unusable midnight chart yields noon, an unusable
/// verification chart yields the unverified estimate.
pub fn solve_time_for_ascendant<P: AstrologyProvider + ?Sized>(
    provider: &mut P,
    date: NaiveDate,
    target: Sign,
    place: &BirthPlace,
) -> (u32, u32) {
    let target_center = target.center_longitude();

    let midnight = match provider.calculate_chart(&BirthMoment::on_date(date, 0, 0, place)) {
        Ok(chart) => chart.ascendant().map(|asc| asc.position),
        Err(err) => {
            log::debug!("midnight chart for {date} failed: {err}");
            None
        }
    };
    let Some(midnight_asc) = midnight else {
        return NOON;
    };

    let rotation = (target_center - midnight_asc).rem_euclid(360.0);
    let minutes = (rotation * MINUTES_PER_DEGREE) as i64;
    let estimate = ((minutes / 60 % 24) as u32, (minutes % 60) as u32);

    let verify = BirthMoment::on_date(date, estimate.0, estimate.1, place);
    let actual = match provider.calculate_chart(&verify) {
        Ok(chart) => chart.ascendant().map(|asc| (asc.sign, asc.position)),
        Err(err) => {
            log::debug!("verification chart for {date} {:02}:{:02} failed: {err}", estimate.0, estimate.1);
            None
        }
    };
    let Some((actual_sign, actual_asc)) = actual else {
        return estimate;
    };
    if actual_sign == target {
        return estimate;
    }

    let error = signed_delta(actual_asc, target_center);
    let correction = (error * MINUTES_PER_DEGREE) as i64;
    let total = (estimate.0 as i64 * 60 + estimate.1 as i64 + correction).rem_euclid(MINUTES_PER_DAY);
    log::trace!("ascendant correction on {date}: {error:.2} deg, {correction} min");
    ((total / 60) as u32, (total % 60) as u32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use aphrodite::chart::Chart;
    use aphrodite::ephemeris::{EphemerisPoint, HousePositions, LayerPositions};
    use aphrodite::AstroError;
    use std::collections::HashMap;

    /// Ascendant turning uniformly at `rate` degrees per clock minute.
    struct UniformSky {
        start: f64,
        rate: f64,
    }

    impl AstrologyProvider for UniformSky {
        fn calculate_chart(&mut self, birth: &BirthMoment) -> Result<Chart, AstroError> {
            let minutes = (birth.hour * 60 + birth.minute) as f64;
            let asc = (self.start + self.rate * minutes).rem_euclid(360.0);
            let positions = LayerPositions {
                planets: HashMap::new(),
                houses: Some(HousePositions {
                    system: "equal".to_string(),
                    cusps: HashMap::new(),
                    angles: HashMap::from([("asc".to_string(), asc)]),
                }),
            };
            Ok(Chart::from_positions(birth.clone(), positions))
        }

        fn generate_ephemeris(
            &mut self,
            _start: NaiveDate,
            _end: NaiveDate,
            _place: &BirthPlace,
        ) -> Result<Vec<EphemerisPoint>, AstroError> {
            Ok(Vec::new())
        }
    }

    fn place() -> BirthPlace {
        BirthPlace {
            latitude: 0.0,
            longitude: 0.0,
            timezone: "UTC".to_string(),
        }
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2000, 3, 1).unwrap()
    }

    #[test]
    fn test_estimate_accepted_when_sign_matches() {
        let mut sky = UniformSky { start: 10.0, rate: 0.25 };
        // 285 - 10 = 275 degrees, 1100 minutes
        assert_eq!(solve_time_for_ascendant(&mut sky, date(), Sign::Capricorn, &place()), (18, 20));
    }

    #[test]
    fn test_single_correction_when_estimate_misses() {
        // Faster sky: the estimate lands on 319.375 (Aquarius), 34.375 degrees
        // past the target midpoint, so 137 minutes come off
        let mut sky = UniformSky { start: 10.0, rate: 0.28125 };
        let time = solve_time_for_ascendant(&mut sky, date(), Sign::Capricorn, &place());
        assert_eq!(time, (16, 3));
        let asc = sky.calculate_chart(&BirthMoment::on_date(date(), time.0, time.1, &place())).unwrap();
        assert_eq!(asc.ascendant().map(|a| a.sign), Some(Sign::Capricorn));
    }

    #[test]
    fn test_correction_wraps_into_the_day() {
        // Slow sky from 20: Aries midpoint needs 355 degrees, the 23:40
        // estimate lands on 286.25, and the +88.75 degree correction
        // carries past midnight
        let mut sky = UniformSky { start: 20.0, rate: 0.1875 };
        assert_eq!(solve_time_for_ascendant(&mut sky, date(), Sign::Aries, &place()), (5, 35));
    }
}
