use crate::ephemeris::EphemerisError;
use thiserror::Error;

/// Failures surfaced by an astrology provider.
#[derive(Error, Debug)]
pub enum AstroError {
    /// Birth data outside the representable range. Client-facing, never corrected.
    #[error("Invalid birth data: {0}")]
    InvalidBirthData(String),
    #[error("Failed to calculate chart: {0}")]
    ChartCalculation(String),
    #[error(transparent)]
    Ephemeris(#[from] EphemerisError),
}

impl AstroError {
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, AstroError::InvalidBirthData(_))
    }
}
