//! Cheap ranking of ephemeris days before any chart is built.
//!
//! A Sun/Moon cross-conjunction is the single largest contribution the
//! relationship evaluator can award, so days are ranked by how close the
//! candidate's Sun sits to the user's Moon and the candidate's Moon to the
//! user's Sun, plus a flat bonus for a shared Sun modality.

use crate::settings::SearchSettings;
use aphrodite::ephemeris::EphemerisPoint;
use aphrodite::zodiac::{angular_separation, Modality};
use std::collections::HashSet;

/// Points for an exact contact; each degree of separation costs one.
pub const PROXIMITY_BASE: f64 = 20.0;

/// An ephemeris day picked for full scoring. `index` is its position in the
/// input sequence and identifies it.
#[derive(Debug, Clone, Copy)]
pub struct RankedPoint<'a> {
    pub index: usize,
    pub point: &'a EphemerisPoint,
    /// Zero for days added only to fill the pool.
    pub score: f64,
}

/// Proximity plus destiny score of a single day. Zero means unrelated.
pub fn proximity_score(
    point: &EphemerisPoint,
    user_sun: f64,
    user_moon: f64,
    user_sun_modality: Modality,
    settings: &SearchSettings,
) -> f64 {
    let mut score = 0.0;

    let sun_moon = angular_separation(point.sun.position, user_moon);
    if sun_moon <= settings.proximity_orb {
        score += PROXIMITY_BASE - sun_moon;
    }
    let moon_sun = angular_separation(point.moon.position, user_sun);
    if moon_sun <= settings.proximity_orb {
        score += PROXIMITY_BASE - moon_sun;
    }
    if point.sun.sign.modality() == user_sun_modality {
        score += settings.destiny_sign_bonus;
    }
    score
}

/// Rank `points` best first and bound the pool.
///
/// Only positively scored days are ranked, ties keep their input order. When
/// fewer than `min_ranked_candidates` qualify, unscored days are appended in
/// input order until the pool is full or the input runs out.
pub fn prefilter<'a>(
    points: &'a [EphemerisPoint],
    user_sun: f64,
    user_moon: f64,
    user_sun_modality: Modality,
    settings: &SearchSettings,
) -> Vec<RankedPoint<'a>> {
    let mut ranked: Vec<RankedPoint<'a>> = points
        .iter()
        .enumerate()
        .filter_map(|(index, point)| {
            let score = proximity_score(point, user_sun, user_moon, user_sun_modality, settings);
            (score > 0.0).then_some(RankedPoint { index, point, score })
        })
        .collect();

    ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
    ranked.truncate(settings.candidate_pool);

    if ranked.len() < settings.min_ranked_candidates {
        let taken: HashSet<usize> = ranked.iter().map(|r| r.index).collect();
        let filler = points
            .iter()
            .enumerate()
            .filter(|(index, _)| !taken.contains(index))
            .map(|(index, point)| RankedPoint {
                index,
                point,
                score: 0.0,
            });
        let room = settings.candidate_pool.saturating_sub(ranked.len());
        ranked.extend(filler.take(room));
    }

    log::debug!(
        "pre-filter kept {} of {} ephemeris days",
        ranked.len(),
        points.len()
    );
    ranked
}
