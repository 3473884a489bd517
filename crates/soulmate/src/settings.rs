use crate::percent::MAX_COMPATIBILITY_SCORE;
use serde::{Deserialize, Serialize};

/// Search tuning, read from the `[search]` table of the config file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    /// Upper bound on candidates carried from the pre-filter into scoring.
    pub candidate_pool: usize,
    /// Below this many ranked points the pool is topped up with unranked days.
    pub min_ranked_candidates: usize,
    /// Widest Sun/Moon separation, in degrees, that earns proximity points.
    pub proximity_orb: f64,
    /// Pre-filter bonus for a candidate Sun sharing the user's Sun modality.
    pub destiny_sign_bonus: f64,
    /// Stop scoring candidates once the best reaches this.
    pub early_exit_score: u32,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            candidate_pool: 100,
            min_ranked_candidates: 50,
            proximity_orb: 10.0,
            destiny_sign_bonus: 5.0,
            early_exit_score: MAX_COMPATIBILITY_SCORE,
        }
    }
}
