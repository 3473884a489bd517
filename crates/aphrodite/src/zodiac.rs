//! Zodiac signs and their classical groupings.
//!
//! Signs are indexed 0..12 from Aries. Element and modality follow from the
//! index, the remaining metadata lives in a static table.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Sign {
    #[serde(rename = "Ari")]
    Aries,
    #[serde(rename = "Tau")]
    Taurus,
    #[serde(rename = "Gem")]
    Gemini,
    #[serde(rename = "Can")]
    Cancer,
    #[serde(rename = "Leo")]
    Leo,
    #[serde(rename = "Vir")]
    Virgo,
    #[serde(rename = "Lib")]
    Libra,
    #[serde(rename = "Sco")]
    Scorpio,
    #[serde(rename = "Sag")]
    Sagittarius,
    #[serde(rename = "Cap")]
    Capricorn,
    #[serde(rename = "Aqu")]
    Aquarius,
    #[serde(rename = "Pis")]
    Pisces,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Element {
    Fire,
    Earth,
    Air,
    Water,
}

/// Sign quality. Two Suns sharing a modality form a "Destiny Sign" pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Modality {
    Cardinal,
    Fixed,
    Mutable,
}

#[derive(Debug, Clone, Serialize)]
pub struct SignMeta {
    pub sign: Sign,
    pub code: &'static str,
    pub name: &'static str,
    pub ruler: &'static str,
}

lazy_static::lazy_static! {
    static ref SIGNS: Vec<SignMeta> = vec![
        SignMeta { sign: Sign::Aries, code: "Ari", name: "Aries", ruler: "mars" },
        SignMeta { sign: Sign::Taurus, code: "Tau", name: "Taurus", ruler: "venus" },
        SignMeta { sign: Sign::Gemini, code: "Gem", name: "Gemini", ruler: "mercury" },
        SignMeta { sign: Sign::Cancer, code: "Can", name: "Cancer", ruler: "moon" },
        SignMeta { sign: Sign::Leo, code: "Leo", name: "Leo", ruler: "sun" },
        SignMeta { sign: Sign::Virgo, code: "Vir", name: "Virgo", ruler: "mercury" },
        SignMeta { sign: Sign::Libra, code: "Lib", name: "Libra", ruler: "venus" },
        SignMeta { sign: Sign::Scorpio, code: "Sco", name: "Scorpio", ruler: "mars" },
        SignMeta { sign: Sign::Sagittarius, code: "Sag", name: "Sagittarius", ruler: "jupiter" },
        SignMeta { sign: Sign::Capricorn, code: "Cap", name: "Capricorn", ruler: "saturn" },
        SignMeta { sign: Sign::Aquarius, code: "Aqu", name: "Aquarius", ruler: "saturn" },
        SignMeta { sign: Sign::Pisces, code: "Pis", name: "Pisces", ruler: "jupiter" },
    ];
}

impl Sign {
    pub const ALL: [Sign; 12] = [
        Sign::Aries,
        Sign::Taurus,
        Sign::Gemini,
        Sign::Cancer,
        Sign::Leo,
        Sign::Virgo,
        Sign::Libra,
        Sign::Scorpio,
        Sign::Sagittarius,
        Sign::Capricorn,
        Sign::Aquarius,
        Sign::Pisces,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Sign {
        Sign::ALL[index % 12]
    }

    /// Sign containing an absolute ecliptic longitude. Any finite input is
    /// normalised into [0, 360) first.
    pub fn from_longitude(longitude: f64) -> Sign {
        let normalized = normalize_degrees(longitude);
        Sign::from_index((normalized / 30.0).floor() as usize)
    }

    pub fn meta(self) -> &'static SignMeta {
        &SIGNS[self.index()]
    }

    /// Three-letter code, e.g. "Ari".
    pub fn code(self) -> &'static str {
        self.meta().code
    }

    pub fn name(self) -> &'static str {
        self.meta().name
    }

    pub fn ruler(self) -> &'static str {
        self.meta().ruler
    }

    pub fn element(self) -> Element {
        match self.index() % 4 {
            0 => Element::Fire,
            1 => Element::Earth,
            2 => Element::Air,
            _ => Element::Water,
        }
    }

    pub fn modality(self) -> Modality {
        match self.index() % 3 {
            0 => Modality::Cardinal,
            1 => Modality::Fixed,
            _ => Modality::Mutable,
        }
    }

    pub fn opposite(self) -> Sign {
        Sign::from_index(self.index() + 6)
    }

    /// Trine partners: the other two signs of the same element.
    pub fn trines(self) -> [Sign; 2] {
        [Sign::from_index(self.index() + 4), Sign::from_index(self.index() + 8)]
    }

    /// Absolute longitude of the sign's midpoint (index * 30 + 15).
    pub fn center_longitude(self) -> f64 {
        self.index() as f64 * 30.0 + 15.0
    }
}

impl fmt::Display for Sign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown zodiac sign: {0}")]
pub struct UnknownSign(pub String);

impl FromStr for Sign {
    type Err = UnknownSign;

    /// Accepts three-letter codes and full names, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        SIGNS
            .iter()
            .find(|meta| meta.code.to_lowercase() == needle || meta.name.to_lowercase() == needle)
            .map(|meta| meta.sign)
            .ok_or_else(|| UnknownSign(s.to_string()))
    }
}

impl Element {
    /// Fire pairs with Air, Earth with Water (including itself).
    pub fn is_compatible_with(self, other: Element) -> bool {
        matches!(
            (self, other),
            (Element::Fire, Element::Fire)
                | (Element::Fire, Element::Air)
                | (Element::Air, Element::Air)
                | (Element::Air, Element::Fire)
                | (Element::Earth, Element::Earth)
                | (Element::Earth, Element::Water)
                | (Element::Water, Element::Water)
                | (Element::Water, Element::Earth)
        )
    }
}

/// Normalise any finite angle into [0, 360).
pub fn normalize_degrees(degrees: f64) -> f64 {
    let normalized = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if normalized >= 360.0 {
        0.0
    } else {
        normalized
    }
}

/// Minimal angular separation between two longitudes, in [0, 180].
pub fn angular_separation(lon1: f64, lon2: f64) -> f64 {
    let diff = (lon1 - lon2).abs() % 360.0;
    if diff > 180.0 {
        360.0 - diff
    } else {
        diff
    }
}

/// Signed shortest rotation from `from` to `to`, in (-180, 180].
pub fn signed_delta(from: f64, to: f64) -> f64 {
    let delta = normalize_degrees(to - from);
    if delta > 180.0 {
        delta - 360.0
    } else {
        delta
    }
}
