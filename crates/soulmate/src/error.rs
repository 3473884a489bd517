use aphrodite::AstroError;
use thiserror::Error;

/// The only failures a soulmate search surfaces. Everything past the user's
/// own chart degrades instead of failing.
#[derive(Error, Debug)]
pub enum SoulmateError {
    #[error("Invalid birth data: {0}")]
    InvalidBirthData(String),
    #[error("Failed to calculate user chart: {0}")]
    UserChart(#[source] AstroError),
    /// Every candidate and the fallback date failed to produce a chart.
    #[error("No candidate chart could be calculated: {0}")]
    Exhausted(#[source] AstroError),
}

impl SoulmateError {
    /// Client-facing validation failure, as opposed to a backend failure.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, SoulmateError::InvalidBirthData(_))
    }
}

impl From<AstroError> for SoulmateError {
    fn from(err: AstroError) -> Self {
        match err {
            AstroError::InvalidBirthData(message) => SoulmateError::InvalidBirthData(message),
            other => SoulmateError::UserChart(other),
        }
    }
}
