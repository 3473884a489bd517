//! Birth moments: a local wall-clock instant plus the place it was observed.

use crate::ephemeris::GeoLocation;
use crate::error::AstroError;
use chrono::{DateTime, LocalResult, NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

pub const MIN_YEAR: i32 = 1900;
pub const MAX_YEAR: i32 = 2100;

/// Where a chart is cast. Candidates inherit the user's place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BirthPlace {
    pub latitude: f64,
    pub longitude: f64,
    pub timezone: String,
}

impl BirthPlace {
    pub fn geo(&self) -> GeoLocation {
        GeoLocation {
            lat: self.latitude,
            lon: self.longitude,
        }
    }

    pub fn resolve_timezone(&self) -> Result<Tz, AstroError> {
        self.timezone.parse::<Tz>().map_err(|_| {
            AstroError::InvalidBirthData(format!("unknown timezone '{}'", self.timezone))
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BirthMoment {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub latitude: f64,
    pub longitude: f64,
    pub timezone: String,
}

impl BirthMoment {
    pub fn new(year: i32, month: u32, day: u32, hour: u32, minute: u32, place: &BirthPlace) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            minute,
            latitude: place.latitude,
            longitude: place.longitude,
            timezone: place.timezone.clone(),
        }
    }

    /// Same place, a calendar date and a wall-clock time.
    pub fn on_date(date: NaiveDate, hour: u32, minute: u32, place: &BirthPlace) -> Self {
        use chrono::Datelike;
        Self::new(date.year(), date.month(), date.day(), hour, minute, place)
    }

    pub fn place(&self) -> BirthPlace {
        BirthPlace {
            latitude: self.latitude,
            longitude: self.longitude,
            timezone: self.timezone.clone(),
        }
    }

    pub fn date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)
    }

    /// Range checks on every field. Out-of-range data is reported, never clamped.
    pub fn validate(&self) -> Result<(), AstroError> {
        if !(MIN_YEAR..=MAX_YEAR).contains(&self.year) {
            return Err(AstroError::InvalidBirthData(format!(
                "year {} outside {MIN_YEAR}..={MAX_YEAR}",
                self.year
            )));
        }
        if !(1..=12).contains(&self.month) {
            return Err(AstroError::InvalidBirthData(format!("month {} outside 1..=12", self.month)));
        }
        if self.date().is_none() {
            return Err(AstroError::InvalidBirthData(format!(
                "day {} is not valid for {}-{:02}",
                self.day, self.year, self.month
            )));
        }
        if self.hour > 23 {
            return Err(AstroError::InvalidBirthData(format!("hour {} outside 0..=23", self.hour)));
        }
        if self.minute > 59 {
            return Err(AstroError::InvalidBirthData(format!("minute {} outside 0..=59", self.minute)));
        }
        if !(-90.0..=90.0).contains(&self.latitude) {
            return Err(AstroError::InvalidBirthData(format!(
                "latitude {} outside [-90, 90]",
                self.latitude
            )));
        }
        if !(-180.0..=180.0).contains(&self.longitude) {
            return Err(AstroError::InvalidBirthData(format!(
                "longitude {} outside [-180, 180]",
                self.longitude
            )));
        }
        self.place().resolve_timezone()?;
        Ok(())
    }

    /// The UTC instant of this local wall-clock time.
    ///
    /// An ambiguous time (DST fall-back) resolves to the earlier instant; a
    /// time skipped by a DST jump is a calculation failure.
    pub fn to_utc(&self) -> Result<DateTime<Utc>, AstroError> {
        self.validate()?;
        let tz = self.place().resolve_timezone()?;
        let naive = self
            .date()
            .and_then(|d| d.and_hms_opt(self.hour, self.minute, 0))
            .ok_or_else(|| AstroError::InvalidBirthData(format!("{self:?}")))?;

        match tz.from_local_datetime(&naive) {
            LocalResult::Single(dt) => Ok(dt.with_timezone(&Utc)),
            LocalResult::Ambiguous(earliest, _) => Ok(earliest.with_timezone(&Utc)),
            LocalResult::None => Err(AstroError::ChartCalculation(format!(
                "{naive} does not exist in {}",
                self.timezone
            ))),
        }
    }
}
