use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors that can occur during ephemeris calculations
#[derive(Error, Debug)]
pub enum EphemerisError {
    #[error("Ephemeris file not found at path: {path}. {message}")]
    FileNotFound { path: String, message: String },
    #[error("Invalid house system: {system}. Valid systems: {valid:?}")]
    InvalidHouseSystem { system: String, valid: Vec<String> },
    #[error("Invalid ayanamsa: {ayanamsa}. Valid ayanamsas: {valid:?}")]
    InvalidAyanamsa { ayanamsa: String, valid: Vec<String> },
    #[error("Failed to calculate position for {planet_id} at {datetime}: {message}")]
    CalculationFailed {
        planet_id: String,
        datetime: DateTime<Utc>,
        message: String,
    },
    #[error("House calculation failed: {message}")]
    HouseCalculationFailed { message: String },
}
