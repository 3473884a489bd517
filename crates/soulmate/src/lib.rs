//! Soulmate birth-date search.
//!
//! Given a user's birth moment, searches the ephemeris of an age window for
//! the birth date and time whose chart scores best against the user's, with
//! the candidate's Ascendant opposite the user's.

pub mod age;
pub mod ascendant;
pub mod aspect_score;
pub mod error;
pub mod gender;
pub mod north_node;
pub mod percent;
pub mod prefilter;
pub mod result;
pub mod scoring;
pub mod search;
pub mod settings;

pub use age::{age_range, recalculate_birth_year, AgeWindow};
pub use ascendant::solve_time_for_ascendant;
pub use aspect_score::{score_aspect, AspectScore};
pub use error::SoulmateError;
pub use gender::Gender;
pub use north_node::score_north_node;
pub use percent::{to_percent, MAX_COMPATIBILITY_SCORE};
pub use prefilter::{prefilter, RankedPoint};
pub use result::CompatibilityResult;
pub use scoring::{fallback_score, score_pair, PairScore, ScoreSource};
pub use search::SoulmateSearch;
pub use settings::SearchSettings;
