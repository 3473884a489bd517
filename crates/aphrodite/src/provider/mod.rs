//! The seam between the soulmate search and any astrology backend.

#[cfg(feature = "swisseph")]
pub mod swiss;

#[cfg(feature = "swisseph")]
pub use swiss::SwissProvider;

use crate::aspects::{relationship_score, RelationshipScore};
use crate::chart::{BirthMoment, BirthPlace, Chart};
use crate::ephemeris::EphemerisPoint;
use crate::error::AstroError;
use chrono::NaiveDate;

/// Outcome of a relationship evaluation.
///
/// `Unavailable` is not an error: callers fall back to their own heuristic.
#[derive(Debug, Clone, PartialEq)]
pub enum RelationshipOutcome {
    Scored(RelationshipScore),
    Unavailable,
}

impl RelationshipOutcome {
    pub fn score(&self) -> Option<&RelationshipScore> {
        match self {
            RelationshipOutcome::Scored(score) => Some(score),
            RelationshipOutcome::Unavailable => None,
        }
    }
}

/// Chart calculation, synastry scoring and daily ephemeris.
///
/// Backends are not assumed to be reentrant, hence `&mut self` throughout.
pub trait AstrologyProvider {
    /// Natal chart for a birth moment. Invalid birth data is reported as
    /// `AstroError::InvalidBirthData`, everything else as a calculation error.
    fn calculate_chart(&mut self, birth: &BirthMoment) -> Result<Chart, AstroError>;

    /// Relationship score between two charts built by this provider.
    fn calculate_relationship_aspects(&mut self, first: &Chart, second: &Chart) -> RelationshipOutcome {
        let (Some(a), Some(b)) = (first.provider_handle(), second.provider_handle()) else {
            log::debug!("relationship evaluation skipped: chart without provider state");
            return RelationshipOutcome::Unavailable;
        };
        match relationship_score(a.positions(), b.positions()) {
            Some(score) => RelationshipOutcome::Scored(score),
            None => RelationshipOutcome::Unavailable,
        }
    }

    /// One point per calendar day of `start..=end`, sampled at local noon.
    fn generate_ephemeris(
        &mut self,
        start: NaiveDate,
        end: NaiveDate,
        place: &BirthPlace,
    ) -> Result<Vec<EphemerisPoint>, AstroError>;
}
