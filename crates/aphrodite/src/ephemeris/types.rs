use crate::zodiac::Sign;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Geographic location coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    pub lat: f64,
    pub lon: f64,
}

/// Planetary position data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanetPosition {
    /// Longitude in degrees (0-360)
    pub lon: f64,
    /// Latitude in degrees
    pub lat: f64,
    /// Speed in longitude (degrees per day)
    pub speed_lon: f64,
    /// Whether the planet is retrograde
    pub retrograde: bool,
}

impl PlanetPosition {
    pub fn new(lon: f64, speed_lon: f64) -> Self {
        Self {
            lon,
            lat: 0.0,
            speed_lon,
            retrograde: speed_lon < 0.0,
        }
    }
}

/// House system positions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HousePositions {
    /// House system name
    pub system: String,
    /// House cusps: "1".."12" -> degrees
    pub cusps: HashMap<String, f64>,
    /// Angles: "asc", "mc", "ic", "dc" -> degrees
    pub angles: HashMap<String, f64>,
}

impl HousePositions {
    /// Cusps ordered from the first house, or None if any is missing.
    pub fn ordered_cusps(&self) -> Option<[f64; 12]> {
        let mut ordered = [0.0; 12];
        for (i, slot) in ordered.iter_mut().enumerate() {
            *slot = *self.cusps.get(&(i + 1).to_string())?;
        }
        Some(ordered)
    }
}

/// Raw positions for one moment, as returned by the ephemeris backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayerPositions {
    /// Planet ID -> position
    pub planets: HashMap<String, PlanetPosition>,
    /// House positions (None if no location provided)
    pub houses: Option<HousePositions>,
}

impl LayerPositions {
    /// Longitude of a planet or a house angle ("asc", "mc").
    pub fn longitude_of(&self, id: &str) -> Option<f64> {
        if let Some(planet) = self.planets.get(id) {
            return Some(planet.lon);
        }
        self.houses.as_ref().and_then(|h| h.angles.get(id)).copied()
    }

    /// Longitudinal speed; angles are reported as stationary.
    pub fn speed_of(&self, id: &str) -> f64 {
        self.planets.get(id).map(|p| p.speed_lon).unwrap_or(0.0)
    }
}

/// Settings for ephemeris calculations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EphemerisSettings {
    /// Zodiac type: "tropical" or "sidereal"
    pub zodiac_type: String,
    /// Ayanamsa name (for sidereal zodiac)
    pub ayanamsa: Option<String>,
    /// House system name
    pub house_system: String,
    /// List of planet IDs to include
    pub include_objects: Vec<String>,
}

impl Default for EphemerisSettings {
    fn default() -> Self {
        Self {
            zodiac_type: "tropical".to_string(),
            ayanamsa: None,
            house_system: "placidus".to_string(),
            include_objects: [
                "sun", "moon", "mercury", "venus", "mars", "jupiter", "saturn", "uranus",
                "neptune", "pluto", "chiron", "north_node",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        }
    }
}

/// Sign and absolute longitude of one body on an ephemeris day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodySnapshot {
    pub sign: Sign,
    pub position: f64,
}

impl BodySnapshot {
    pub fn at(position: f64) -> Self {
        Self {
            sign: Sign::from_longitude(position),
            position,
        }
    }
}

/// Lightweight daily snapshot used to rank candidate birth dates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EphemerisPoint {
    pub date: NaiveDate,
    pub sun: BodySnapshot,
    pub moon: BodySnapshot,
    pub venus: BodySnapshot,
    pub mars: BodySnapshot,
    pub north_node: BodySnapshot,
}
