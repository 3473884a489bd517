//! Composite relationship score: the provider's synastry evaluation, or a
//! sign heuristic when it is unavailable, plus the North Node bonus.

use crate::north_node::score_north_node;
use crate::percent::MAX_COMPATIBILITY_SCORE;
use aphrodite::chart::{Body, Chart};
use aphrodite::provider::{AstrologyProvider, RelationshipOutcome};
use aphrodite::zodiac::Sign;
use serde::Serialize;

/// Ceiling on the evaluator's base score, whatever its source.
pub const BASE_SCORE_CAP: u32 = 48;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreSource {
    Evaluator,
    Heuristic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PairScore {
    /// Base plus bonus, capped at the percentage ceiling.
    pub total: u32,
    pub base: u32,
    pub north_node_bonus: u32,
    pub source: ScoreSource,
}

/// Score a candidate chart against the user's.
pub fn score_pair<P: AstrologyProvider + ?Sized>(provider: &mut P, user: &Chart, candidate: &Chart) -> PairScore {
    let (base, source) = match provider.calculate_relationship_aspects(user, candidate) {
        RelationshipOutcome::Scored(score) => (score.value, ScoreSource::Evaluator),
        RelationshipOutcome::Unavailable => (fallback_score(user, candidate), ScoreSource::Heuristic),
    };
    let base = base.min(BASE_SCORE_CAP);

    let north_node_bonus = score_north_node(
        user_node_sign(user),
        sign_or_aries(candidate, Body::Sun),
        sign_or_aries(candidate, Body::Moon),
        sign_or_aries(candidate, Body::Venus),
    );

    PairScore {
        total: (base + north_node_bonus).min(MAX_COMPATIBILITY_SCORE),
        base,
        north_node_bonus,
        source,
    }
}

/// Sign-level stand-in for the evaluator: Sun elements (5), Moon affinity
/// (3 same sign, 2 opposite or trine), candidate Venus to user Mars (3) and
/// candidate Mars to user Venus (2) elements. At most 13.
pub fn fallback_score(user: &Chart, candidate: &Chart) -> u32 {
    let mut score = 0;

    let user_sun = sign_or_aries(user, Body::Sun);
    let candidate_sun = sign_or_aries(candidate, Body::Sun);
    if user_sun.element().is_compatible_with(candidate_sun.element()) {
        score += 5;
    }

    score += moon_affinity(sign_or_aries(user, Body::Moon), sign_or_aries(candidate, Body::Moon));

    let user_mars = sign_or_aries(user, Body::Mars);
    let candidate_venus = sign_or_aries(candidate, Body::Venus);
    if user_mars.element().is_compatible_with(candidate_venus.element()) {
        score += 3;
    }

    let user_venus = sign_or_aries(user, Body::Venus);
    let candidate_mars = sign_or_aries(candidate, Body::Mars);
    if user_venus.element().is_compatible_with(candidate_mars.element()) {
        score += 2;
    }

    score
}

pub fn moon_affinity(user_moon: Sign, candidate_moon: Sign) -> u32 {
    if candidate_moon == user_moon {
        3
    } else if candidate_moon == user_moon.opposite() || user_moon.trines().contains(&candidate_moon) {
        2
    } else {
        0
    }
}

/// Sign of the user's North Node; Leo when the chart has none.
pub fn user_node_sign(user: &Chart) -> Sign {
    user.sign_of(Body::TrueNode).unwrap_or(Sign::Leo)
}

fn sign_or_aries(chart: &Chart, body: Body) -> Sign {
    chart.sign_of(body).unwrap_or(Sign::Aries)
}
