//! Point-scored aspects between two absolute positions, tuned to what the
//! relationship evaluator rewards.

use aphrodite::aspects::AspectKind;
use aphrodite::zodiac::angular_separation;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AspectScore {
    pub points: u32,
    pub kind: Option<AspectKind>,
    /// Deviation from the exact angle; the raw separation when no aspect.
    pub orb: f64,
}

/// Classify the separation of two longitudes. Windows are checked in order
/// and do not overlap: conjunction within 8 (11 points within 2, else 10),
/// sextile 54-66 (6), square 82-98 (0), trine 112-128 (8),
/// opposition 172-188 (4).
pub fn score_aspect(pos1: f64, pos2: f64) -> AspectScore {
    let diff = angular_separation(pos1, pos2);

    let (points, kind, exact) = if diff <= 8.0 {
        let points = if diff <= 2.0 { 11 } else { 10 };
        (points, AspectKind::Conjunction, 0.0)
    } else if (54.0..=66.0).contains(&diff) {
        (6, AspectKind::Sextile, 60.0)
    } else if (82.0..=98.0).contains(&diff) {
        // squares are challenging, they score nothing
        (0, AspectKind::Square, 90.0)
    } else if (112.0..=128.0).contains(&diff) {
        (8, AspectKind::Trine, 120.0)
    } else if (172.0..=188.0).contains(&diff) {
        (4, AspectKind::Opposition, 180.0)
    } else {
        return AspectScore {
            points: 0,
            kind: None,
            orb: diff,
        };
    };

    AspectScore {
        points,
        kind: Some(kind),
        orb: (diff - exact).abs(),
    }
}
