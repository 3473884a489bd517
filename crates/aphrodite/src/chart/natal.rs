use crate::aspects::{AspectCalculator, AspectPair, AspectSettings};
use crate::chart::birth::BirthMoment;
use crate::ephemeris::LayerPositions;
use crate::zodiac::Sign;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A body or sensitive point that a chart can place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Body {
    Sun,
    Moon,
    Mercury,
    Venus,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
    Pluto,
    Chiron,
    TrueNode,
    Ascendant,
    Midheaven,
}

impl Body {
    pub const PLANETS: [Body; 12] = [
        Body::Sun,
        Body::Moon,
        Body::Mercury,
        Body::Venus,
        Body::Mars,
        Body::Jupiter,
        Body::Saturn,
        Body::Uranus,
        Body::Neptune,
        Body::Pluto,
        Body::Chiron,
        Body::TrueNode,
    ];

    /// Identifier used by the ephemeris layer ("north_node", "asc", ...).
    pub fn ephemeris_id(self) -> &'static str {
        match self {
            Body::Sun => "sun",
            Body::Moon => "moon",
            Body::Mercury => "mercury",
            Body::Venus => "venus",
            Body::Mars => "mars",
            Body::Jupiter => "jupiter",
            Body::Saturn => "saturn",
            Body::Uranus => "uranus",
            Body::Neptune => "neptune",
            Body::Pluto => "pluto",
            Body::Chiron => "chiron",
            Body::TrueNode => "north_node",
            Body::Ascendant => "asc",
            Body::Midheaven => "mc",
        }
    }

    pub fn from_ephemeris_id(id: &str) -> Option<Body> {
        Body::PLANETS
            .into_iter()
            .chain([Body::Ascendant, Body::Midheaven])
            .find(|body| body.ephemeris_id() == id)
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Body::Sun => "Sun",
            Body::Moon => "Moon",
            Body::Mercury => "Mercury",
            Body::Venus => "Venus",
            Body::Mars => "Mars",
            Body::Jupiter => "Jupiter",
            Body::Saturn => "Saturn",
            Body::Uranus => "Uranus",
            Body::Neptune => "Neptune",
            Body::Pluto => "Pluto",
            Body::Chiron => "Chiron",
            Body::TrueNode => "True_Node",
            Body::Ascendant => "Ascendant",
            Body::Midheaven => "Medium_Coeli",
        }
    }

    pub fn is_point(self) -> bool {
        matches!(self, Body::Ascendant | Body::Midheaven | Body::TrueNode)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CelestialBody {
    pub name: String,
    pub sign: Sign,
    /// Absolute ecliptic longitude, 0-360
    pub position: f64,
    /// House number 1-12, absent for charts without houses
    pub house: Option<u8>,
    pub retrograde: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HouseCusp {
    pub number: u8,
    pub sign: Sign,
    pub position: f64,
}

/// Provider-internal state attached to a chart.
///
/// Owned by exactly one chart; the relationship evaluator borrows it. It is
/// deliberately not `Clone`.
#[derive(Debug)]
pub struct ProviderHandle {
    positions: LayerPositions,
}

impl ProviderHandle {
    pub fn new(positions: LayerPositions) -> Self {
        Self { positions }
    }

    pub fn positions(&self) -> &LayerPositions {
        &self.positions
    }
}

/// A computed natal chart. Read-only once built.
#[derive(Debug, Serialize)]
pub struct Chart {
    pub birth: BirthMoment,
    pub planets: BTreeMap<Body, CelestialBody>,
    pub points: BTreeMap<Body, CelestialBody>,
    pub houses: Vec<HouseCusp>,
    pub aspects: Vec<AspectPair>,
    #[serde(skip)]
    handle: Option<ProviderHandle>,
}

impl Chart {
    /// Assemble a chart from raw positions. The positions become the chart's
    /// provider handle.
    pub fn from_positions(birth: BirthMoment, positions: LayerPositions) -> Chart {
        let cusps = positions.houses.as_ref().and_then(|h| h.ordered_cusps());

        let mut planets = BTreeMap::new();
        let mut points = BTreeMap::new();
        for body in Body::PLANETS {
            let Some(pos) = positions.planets.get(body.ephemeris_id()) else {
                continue;
            };
            let placed = CelestialBody {
                name: body.display_name().to_string(),
                sign: Sign::from_longitude(pos.lon),
                position: pos.lon,
                house: cusps.as_ref().map(|c| house_of(pos.lon, c)),
                retrograde: pos.retrograde,
            };
            if body.is_point() {
                points.insert(body, placed);
            } else {
                planets.insert(body, placed);
            }
        }

        for body in [Body::Ascendant, Body::Midheaven] {
            if let Some(lon) = positions.longitude_of(body.ephemeris_id()) {
                points.insert(
                    body,
                    CelestialBody {
                        name: body.display_name().to_string(),
                        sign: Sign::from_longitude(lon),
                        position: lon,
                        house: cusps.as_ref().map(|c| house_of(lon, c)),
                        retrograde: false,
                    },
                );
            }
        }

        let houses = cusps
            .map(|c| {
                c.iter()
                    .enumerate()
                    .map(|(i, lon)| HouseCusp {
                        number: (i + 1) as u8,
                        sign: Sign::from_longitude(*lon),
                        position: *lon,
                    })
                    .collect()
            })
            .unwrap_or_default();

        let aspects = AspectCalculator::new().natal_aspects(&positions, &AspectSettings::default());

        Chart {
            birth,
            planets,
            points,
            houses,
            aspects,
            handle: Some(ProviderHandle::new(positions)),
        }
    }

    /// A chart with no provider state, e.g. rebuilt from stored placements.
    pub fn detached(
        birth: BirthMoment,
        planets: BTreeMap<Body, CelestialBody>,
        points: BTreeMap<Body, CelestialBody>,
    ) -> Chart {
        Chart {
            birth,
            planets,
            points,
            houses: Vec::new(),
            aspects: Vec::new(),
            handle: None,
        }
    }

    pub fn provider_handle(&self) -> Option<&ProviderHandle> {
        self.handle.as_ref()
    }

    pub fn body(&self, body: Body) -> Option<&CelestialBody> {
        self.planets.get(&body).or_else(|| self.points.get(&body))
    }

    pub fn sign_of(&self, body: Body) -> Option<Sign> {
        self.body(body).map(|b| b.sign)
    }

    pub fn position_of(&self, body: Body) -> Option<f64> {
        self.body(body).map(|b| b.position)
    }

    pub fn ascendant(&self) -> Option<&CelestialBody> {
        self.points.get(&Body::Ascendant)
    }
}

/// House (1-12) whose span contains `longitude`, spans running from each cusp
/// to the next one counter-clockwise.
pub fn house_of(longitude: f64, cusps: &[f64; 12]) -> u8 {
    for i in 0..12 {
        let start = cusps[i];
        let end = cusps[(i + 1) % 12];
        let span = (end - start).rem_euclid(360.0);
        let offset = (longitude - start).rem_euclid(360.0);
        if offset < span {
            return (i + 1) as u8;
        }
    }
    1
}
