//! Relationship score after Ciro Discepolo's synastry method.
//!
//! Points come from a Destiny Sign (shared Sun modality) and from a small
//! set of cross-chart contacts: Sun/Sun, Sun/Moon, Sun and Moon to the
//! Ascendant, and Venus/Mars.

use crate::aspects::calculator::AspectCalculator;
use crate::aspects::types::{AspectKind, AspectPair, AspectSettings};
use crate::ephemeris::LayerPositions;
use crate::zodiac::Sign;
use serde::{Deserialize, Serialize};

pub const DESTINY_SIGN_POINTS: u32 = 5;
pub const HIGH_PRECISION_POINTS: u32 = 11;
pub const MAJOR_CONTACT_POINTS: u32 = 8;
pub const MINOR_CONTACT_POINTS: u32 = 4;
/// Orb at or under which a main contact earns the high-precision score.
pub const HIGH_PRECISION_ORB: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreDescription {
    Minimal,
    Medium,
    Important,
    VeryImportant,
    Exceptional,
    RareExceptional,
}

impl ScoreDescription {
    pub fn for_score(score: u32) -> Self {
        match score {
            0..=4 => ScoreDescription::Minimal,
            5..=9 => ScoreDescription::Medium,
            10..=14 => ScoreDescription::Important,
            15..=19 => ScoreDescription::VeryImportant,
            20..=29 => ScoreDescription::Exceptional,
            _ => ScoreDescription::RareExceptional,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredAspect {
    pub points: u32,
    pub pair: AspectPair,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelationshipScore {
    pub value: u32,
    pub description: ScoreDescription,
    pub is_destiny_sign: bool,
    pub aspects: Vec<ScoredAspect>,
}

/// Score two charts' raw positions. Returns None when either chart lacks a
/// Sun, which the method cannot do without.
pub fn relationship_score(first: &LayerPositions, second: &LayerPositions) -> Option<RelationshipScore> {
    let first_sun = first.longitude_of("sun")?;
    let second_sun = second.longitude_of("sun")?;

    let mut value = 0;
    let is_destiny_sign =
        Sign::from_longitude(first_sun).modality() == Sign::from_longitude(second_sun).modality();
    if is_destiny_sign {
        value += DESTINY_SIGN_POINTS;
    }

    let settings = AspectSettings {
        include_objects: ["sun", "moon", "venus", "mars", "asc"]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        ..AspectSettings::default()
    };

    let mut aspects = Vec::new();
    for pair in AspectCalculator::new().synastry_aspects(first, second, &settings) {
        let points = contact_points(&pair);
        if points > 0 {
            value += points;
            aspects.push(ScoredAspect { points, pair });
        }
    }

    Some(RelationshipScore {
        value,
        description: ScoreDescription::for_score(value),
        is_destiny_sign,
        aspects,
    })
}

fn contact_points(pair: &AspectPair) -> u32 {
    let names = (pair.p1_name.as_str(), pair.p2_name.as_str());
    let kind = pair.aspect.kind;
    let precision_points = if pair.aspect.orb <= HIGH_PRECISION_ORB {
        HIGH_PRECISION_POINTS
    } else {
        MAJOR_CONTACT_POINTS
    };

    match names {
        ("Sun", "Sun") => match kind {
            AspectKind::Conjunction | AspectKind::Opposition | AspectKind::Square => precision_points,
            _ => MINOR_CONTACT_POINTS,
        },
        ("Sun", "Moon") | ("Moon", "Sun") => match kind {
            AspectKind::Conjunction => precision_points,
            _ => MINOR_CONTACT_POINTS,
        },
        ("Sun", "Ascendant") | ("Ascendant", "Sun") => MINOR_CONTACT_POINTS,
        ("Moon", "Ascendant") | ("Ascendant", "Moon") => MINOR_CONTACT_POINTS,
        ("Venus", "Mars") | ("Mars", "Venus") => MINOR_CONTACT_POINTS,
        _ => 0,
    }
}
