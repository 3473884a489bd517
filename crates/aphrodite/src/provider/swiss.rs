use crate::chart::{BirthMoment, BirthPlace, Chart};
use crate::ephemeris::{
    BodySnapshot, EphemerisPoint, EphemerisSettings, LayerPositions,
    SwissEphemerisAdapter,
};
use crate::error::AstroError;
use crate::provider::AstrologyProvider;
use chrono::{Days, NaiveDate};
use std::path::PathBuf;

/// Bodies sampled for each ephemeris day.
const DAILY_OBJECTS: [&str; 5] = ["sun", "moon", "venus", "mars", "north_node"];

/// Swiss Ephemeris backed provider.
pub struct SwissProvider {
    adapter: SwissEphemerisAdapter,
    settings: EphemerisSettings,
}

impl SwissProvider {
    pub fn new(ephemeris_path: Option<PathBuf>, settings: EphemerisSettings) -> Result<Self, AstroError> {
        let adapter = SwissEphemerisAdapter::new(ephemeris_path)?;
        Ok(Self { adapter, settings })
    }

    fn daily_point(&mut self, date: NaiveDate, place: &BirthPlace) -> Result<EphemerisPoint, AstroError> {
        let noon = BirthMoment::on_date(date, 12, 0, place).to_utc()?;
        let settings = EphemerisSettings {
            include_objects: DAILY_OBJECTS.iter().map(|s| s.to_string()).collect(),
            ..self.settings.clone()
        };
        let positions = self.adapter.calc_positions(noon, None, &settings)?;

        Ok(EphemerisPoint {
            date,
            sun: snapshot(&positions, "sun")?,
            moon: snapshot(&positions, "moon")?,
            venus: snapshot(&positions, "venus")?,
            mars: snapshot(&positions, "mars")?,
            north_node: snapshot(&positions, "north_node")?,
        })
    }
}

impl AstrologyProvider for SwissProvider {
    fn calculate_chart(&mut self, birth: &BirthMoment) -> Result<Chart, AstroError> {
        let utc = birth.to_utc()?;
        let positions = self
            .adapter
            .calc_positions(utc, Some(birth.place().geo()), &self.settings)?;
        Ok(Chart::from_positions(birth.clone(), positions))
    }

    fn generate_ephemeris(
        &mut self,
        start: NaiveDate,
        end: NaiveDate,
        place: &BirthPlace,
    ) -> Result<Vec<EphemerisPoint>, AstroError> {
        place.resolve_timezone()?;

        let mut points = Vec::new();
        let mut date = start;
        while date <= end {
            points.push(self.daily_point(date, place)?);
            date = match date.checked_add_days(Days::new(1)) {
                Some(next) => next,
                None => break,
            };
        }
        log::debug!("generated {} ephemeris points {start}..={end}", points.len());
        Ok(points)
    }
}

fn snapshot(positions: &LayerPositions, id: &str) -> Result<BodySnapshot, AstroError> {
    positions
        .longitude_of(id)
        .map(BodySnapshot::at)
        .ok_or_else(|| AstroError::ChartCalculation(format!("{id} missing from ephemeris output")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn london() -> BirthPlace {
        BirthPlace {
            latitude: 51.5,
            longitude: -0.1,
            timezone: "Europe/London".to_string(),
        }
    }

    #[test]
    #[ignore] // needs Swiss Ephemeris data files
    fn test_chart_sun_in_gemini() {
        let mut provider = SwissProvider::new(None, EphemerisSettings::default()).unwrap();
        let chart = provider
            .calculate_chart(&BirthMoment::new(1990, 6, 15, 14, 30, &london()))
            .unwrap();
        assert_eq!(chart.sign_of(crate::chart::Body::Sun), Some(crate::zodiac::Sign::Gemini));
        assert!(chart.ascendant().is_some());
    }

    #[test]
    #[ignore] // needs Swiss Ephemeris data files
    fn test_ephemeris_one_point_per_day() {
        let mut provider = SwissProvider::new(None, EphemerisSettings::default()).unwrap();
        let start = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2000, 12, 31).unwrap();
        let points = provider.generate_ephemeris(start, end, &london()).unwrap();
        assert_eq!(points.len(), 366);
        assert_eq!(points[0].date, start);
    }
}
