use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AspectKind {
    Conjunction,
    Sextile,
    Square,
    Trine,
    Opposition,
}

impl AspectKind {
    pub const MAJOR: [AspectKind; 5] = [
        AspectKind::Conjunction,
        AspectKind::Opposition,
        AspectKind::Trine,
        AspectKind::Square,
        AspectKind::Sextile,
    ];

    pub fn exact_angle(self) -> f64 {
        match self {
            AspectKind::Conjunction => 0.0,
            AspectKind::Sextile => 60.0,
            AspectKind::Square => 90.0,
            AspectKind::Trine => 120.0,
            AspectKind::Opposition => 180.0,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            AspectKind::Conjunction => "conjunction",
            AspectKind::Sextile => "sextile",
            AspectKind::Square => "square",
            AspectKind::Trine => "trine",
            AspectKind::Opposition => "opposition",
        }
    }
}

impl fmt::Display for AspectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Core aspect information
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AspectCore {
    pub kind: AspectKind,
    /// Deviation from the exact angle, degrees
    pub orb: f64,
    /// Whether the aspect is applying (approaching exact)
    pub is_applying: bool,
    /// Whether the aspect is exact (within 0.1 degrees)
    pub is_exact: bool,
    /// Whether either body is retrograde
    pub is_retrograde: bool,
}

/// An aspect between two named bodies, e.g. Sun (first chart) trine Moon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AspectPair {
    pub p1_name: String,
    pub p2_name: String,
    #[serde(flatten)]
    pub aspect: AspectCore,
}

/// Orbs per aspect kind.
#[derive(Debug, Clone)]
pub struct AspectSettings {
    pub orbs: HashMap<AspectKind, f64>,
    /// Ephemeris ids considered, in this order.
    pub include_objects: Vec<String>,
}

impl AspectSettings {
    pub fn orb_for(&self, kind: AspectKind) -> Option<f64> {
        self.orbs.get(&kind).copied()
    }
}

impl Default for AspectSettings {
    /// Conjunction/opposition 10, trine 8, sextile 6, square 5.
    fn default() -> Self {
        Self {
            orbs: HashMap::from([
                (AspectKind::Conjunction, 10.0),
                (AspectKind::Opposition, 10.0),
                (AspectKind::Trine, 8.0),
                (AspectKind::Sextile, 6.0),
                (AspectKind::Square, 5.0),
            ]),
            include_objects: vec![
                "sun".to_string(),
                "moon".to_string(),
                "mercury".to_string(),
                "venus".to_string(),
                "mars".to_string(),
                "jupiter".to_string(),
                "saturn".to_string(),
                "uranus".to_string(),
                "neptune".to_string(),
                "pluto".to_string(),
                "north_node".to_string(),
                "asc".to_string(),
                "mc".to_string(),
            ],
        }
    }
}
