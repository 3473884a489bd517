//! Natal charts, synastry scoring and daily ephemeris behind a provider trait.

pub mod aspects;
pub mod chart;
pub mod ephemeris;
pub mod error;
pub mod provider;
pub mod zodiac;

pub use chart::{BirthMoment, BirthPlace, Body, Chart};
pub use error::AstroError;
pub use provider::{AstrologyProvider, RelationshipOutcome};
pub use zodiac::{Element, Modality, Sign};

#[cfg(feature = "swisseph")]
pub use provider::SwissProvider;
