use crate::age::AgeWindow;
use aphrodite::aspects::AspectPair;
use aphrodite::chart::{BirthMoment, Body, CelestialBody, Chart, HouseCusp};
use aphrodite::zodiac::Sign;
use serde::Serialize;
use std::collections::BTreeMap;

/// Outcome of a soulmate search.
#[derive(Debug, Clone, Serialize)]
pub struct CompatibilityResult {
    pub planets: BTreeMap<Body, CelestialBody>,
    pub houses: Vec<HouseCusp>,
    pub points: BTreeMap<Body, CelestialBody>,
    pub aspects: Vec<AspectPair>,
    pub compatibility_percent: u8,
    /// Capped composite score behind the percentage.
    pub score: u32,
    pub user_venus_sign: Option<Sign>,
    pub user_mars_sign: Option<Sign>,
    pub user_rising_sign: Option<Sign>,
    pub soulmate_birth_year: i32,
    /// Full birth moment of the winning candidate, time solved for its Ascendant.
    pub soulmate_birth: BirthMoment,
    pub age_window: AgeWindow,
}

impl CompatibilityResult {
    pub(crate) fn new(user: &Chart, soulmate: Chart, score: u32, percent: u8, age_window: AgeWindow) -> Self {
        let soulmate_birth_year = soulmate.birth.year;
        Self {
            planets: soulmate.planets,
            houses: soulmate.houses,
            points: soulmate.points,
            aspects: soulmate.aspects,
            compatibility_percent: percent,
            score,
            user_venus_sign: user.sign_of(Body::Venus),
            user_mars_sign: user.sign_of(Body::Mars),
            user_rising_sign: user.ascendant().map(|asc| asc.sign),
            soulmate_birth_year,
            soulmate_birth: soulmate.birth,
            age_window,
        }
    }

    pub fn soulmate_rising_sign(&self) -> Option<Sign> {
        self.points.get(&Body::Ascendant).map(|asc| asc.sign)
    }

    pub fn sign_of(&self, body: Body) -> Option<Sign> {
        self.planets.get(&body).or_else(|| self.points.get(&body)).map(|b| b.sign)
    }
}
