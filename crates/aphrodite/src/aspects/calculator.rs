use crate::aspects::types::{AspectCore, AspectKind, AspectPair, AspectSettings};
use crate::chart::Body;
use crate::ephemeris::LayerPositions;
use crate::zodiac::angular_separation;

/// Aspect calculator
pub struct AspectCalculator;

impl AspectCalculator {
    pub fn new() -> Self {
        Self
    }

    /// Aspects between the bodies of a single chart, each unordered pair once.
    pub fn natal_aspects(&self, positions: &LayerPositions, settings: &AspectSettings) -> Vec<AspectPair> {
        let ids = present_ids(positions, settings);

        let mut pairs = Vec::new();
        for i in 0..ids.len() {
            for j in (i + 1)..ids.len() {
                if let Some(pair) = self.pair_between(ids[i], positions, ids[j], positions, settings) {
                    pairs.push(pair);
                }
            }
        }
        pairs
    }

    /// Cross-chart aspects, every body of `first` against every body of
    /// `second` (same-body pairs such as Sun/Sun included).
    pub fn synastry_aspects(
        &self,
        first: &LayerPositions,
        second: &LayerPositions,
        settings: &AspectSettings,
    ) -> Vec<AspectPair> {
        let first_ids = present_ids(first, settings);
        let second_ids = present_ids(second, settings);

        let mut pairs = Vec::new();
        for p1 in &first_ids {
            for p2 in &second_ids {
                if let Some(pair) = self.pair_between(p1, first, p2, second, settings) {
                    pairs.push(pair);
                }
            }
        }
        pairs
    }

    fn pair_between(
        &self,
        id1: &str,
        layer1: &LayerPositions,
        id2: &str,
        layer2: &LayerPositions,
        settings: &AspectSettings,
    ) -> Option<AspectPair> {
        let lon1 = layer1.longitude_of(id1)?;
        let lon2 = layer2.longitude_of(id2)?;
        let aspect = self.calculate_aspect(
            lon1,
            lon2,
            layer1.speed_of(id1),
            layer2.speed_of(id2),
            settings,
        )?;
        Some(AspectPair {
            p1_name: display_name(id1),
            p2_name: display_name(id2),
            aspect,
        })
    }

    /// Calculate aspect between two longitudes using planet speeds
    pub fn calculate_aspect(
        &self,
        lon1: f64,
        lon2: f64,
        speed1: f64,
        speed2: f64,
        settings: &AspectSettings,
    ) -> Option<AspectCore> {
        let angle_diff = angular_separation(lon1, lon2);

        for kind in AspectKind::MAJOR {
            let Some(max_orb) = settings.orb_for(kind) else {
                continue;
            };
            let orb = (angle_diff - kind.exact_angle()).abs();
            if orb <= max_orb {
                return Some(AspectCore {
                    kind,
                    orb,
                    is_applying: is_applying(lon1, lon2, speed1, speed2, kind.exact_angle(), angle_diff),
                    is_exact: orb < 0.1,
                    is_retrograde: speed1 < 0.0 || speed2 < 0.0,
                });
            }
        }

        None
    }
}

impl Default for AspectCalculator {
    fn default() -> Self {
        Self::new()
    }
}

fn present_ids<'a>(positions: &LayerPositions, settings: &'a AspectSettings) -> Vec<&'a str> {
    settings
        .include_objects
        .iter()
        .map(String::as_str)
        .filter(|id| positions.longitude_of(id).is_some())
        .collect()
}

fn display_name(id: &str) -> String {
    Body::from_ephemeris_id(id)
        .map(|body| body.display_name().to_string())
        .unwrap_or_else(|| id.to_string())
}

/// Applying if a short step forward in time brings the pair closer to exact.
fn is_applying(
    lon1: f64,
    lon2: f64,
    speed1: f64,
    speed2: f64,
    aspect_angle: f64,
    current_angle: f64,
) -> bool {
    let relative_speed = speed1 - speed2;

    if relative_speed.abs() < 0.01 {
        return current_angle < aspect_angle + 0.5;
    }

    let time_step = 0.1; // days
    let future_angle = angular_separation(lon1 + relative_speed * time_step, lon2);

    let current_distance = (current_angle - aspect_angle).abs();
    let future_distance = (future_angle - aspect_angle).abs();
    future_distance < current_distance
}
