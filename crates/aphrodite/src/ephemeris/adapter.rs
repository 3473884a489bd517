use crate::ephemeris::error::EphemerisError;
use crate::ephemeris::types::{
    EphemerisSettings, GeoLocation, HousePositions, LayerPositions, PlanetPosition,
};
use chrono::{DateTime, Datelike, TimeZone, Timelike, Utc};
use std::collections::HashMap;
use std::env;
use std::path::{Path, PathBuf};
use swisseph::swe::{calc_ut, julday, revjul};

/// Default data directory when neither a path nor SWISS_EPHEMERIS_PATH is given.
pub const DEFAULT_EPHEMERIS_PATH: &str = "/usr/local/share/swisseph";

// SUN=0 .. PLUTO=9, TRUE_NODE=11, CHIRON=15
const PLANET_IDS: &[(&str, i32)] = &[
    ("sun", 0),
    ("moon", 1),
    ("mercury", 2),
    ("venus", 3),
    ("mars", 4),
    ("jupiter", 5),
    ("saturn", 6),
    ("uranus", 7),
    ("neptune", 8),
    ("pluto", 9),
    ("chiron", 15),
    ("north_node", 11),
];

const HOUSE_SYSTEMS: &[(&str, u8)] = &[
    ("placidus", b'P'),
    ("whole_sign", b'W'),
    ("koch", b'K'),
    ("equal", b'E'),
    ("regiomontanus", b'R'),
    ("campanus", b'C'),
    ("alcabitius", b'A'),
    ("morinus", b'M'),
];

/// Swiss sidereal modes (SIDM_*)
const AYANAMSAS: &[(&str, i32)] = &[
    ("fagan_bradley", 0),
    ("lahiri", 1),
    ("de_luce", 2),
    ("raman", 3),
    ("krishnamurti", 5),
    ("yukteshwar", 7),
    ("djwhal_khul", 6),
    ("true_citra", 27),
    ("true_revati", 28),
];

const FLG_SWIEPH: i32 = 2;
const FLG_SPEED: i32 = 256;
const FLG_SIDEREAL: i32 = 64 * 1024;
const GREG_CAL: i32 = 1;

/// Thin wrapper over the Swiss Ephemeris C library.
///
/// The library keeps global state, so the adapter is used through `&mut self`
/// and must not be shared between threads.
pub struct SwissEphemerisAdapter {
    ephemeris_path: PathBuf,
    current_sidereal_mode: Option<i32>,
}

impl SwissEphemerisAdapter {
    /// Create a new adapter with optional ephemeris path
    pub fn new(ephemeris_path: Option<PathBuf>) -> Result<Self, EphemerisError> {
        let path = ephemeris_path.unwrap_or_else(|| {
            env::var("SWISS_EPHEMERIS_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_EPHEMERIS_PATH))
        });

        if !path.exists() {
            return Err(EphemerisError::FileNotFound {
                path: path.display().to_string(),
                message: "Ephemeris path does not exist. Please ensure Swiss Ephemeris data files are installed.".to_string(),
            });
        }
        log::debug!("Swiss Ephemeris data directory: {}", path.display());

        Ok(Self {
            ephemeris_path: path,
            current_sidereal_mode: None,
        })
    }

    pub fn ephemeris_path(&self) -> &Path {
        &self.ephemeris_path
    }

    /// Planetary positions, plus houses and angles when a location is given.
    pub fn calc_positions(
        &mut self,
        dt_utc: DateTime<Utc>,
        location: Option<GeoLocation>,
        settings: &EphemerisSettings,
    ) -> Result<LayerPositions, EphemerisError> {
        let jd = datetime_to_julian_day(dt_utc);
        let house_system_byte = get_house_system_byte(&settings.house_system)?;
        let flags = self.configure_flags(settings)?;

        let mut planets = HashMap::new();
        for obj_id in &settings.include_objects {
            let obj_id_lower = obj_id.to_lowercase();
            let planet_pos = self.calc_planet_position(&obj_id_lower, jd, flags)?;
            planets.insert(obj_id_lower, planet_pos);
        }

        let houses = match location {
            Some(loc) => Some(self.calc_houses(
                jd,
                loc.lat,
                loc.lon,
                house_system_byte,
                &settings.house_system,
                flags,
            )?),
            None => None,
        };

        Ok(LayerPositions { planets, houses })
    }

    pub fn calc_planet_position(
        &self,
        planet_id: &str,
        jd: f64,
        flags: i32,
    ) -> Result<PlanetPosition, EphemerisError> {
        let planet_code = PLANET_IDS
            .iter()
            .find(|(id, _)| *id == planet_id)
            .map(|(_, code)| *code)
            .ok_or_else(|| EphemerisError::CalculationFailed {
                planet_id: planet_id.to_string(),
                datetime: julian_day_to_datetime(jd),
                message: format!("Unknown planet ID: {}", planet_id),
            })?;

        let result = calc_ut(jd, planet_code as u32, flags as u32).map_err(|e| {
            EphemerisError::CalculationFailed {
                planet_id: planet_id.to_string(),
                datetime: julian_day_to_datetime(jd),
                message: format!("Swiss Ephemeris error: {}", e),
            }
        })?;

        let out = result.out;
        let speed_longitude = out[3];
        Ok(PlanetPosition {
            lon: out[0].rem_euclid(360.0),
            lat: out[1],
            speed_lon: speed_longitude,
            retrograde: speed_longitude < 0.0,
        })
    }

    pub fn calc_houses(
        &self,
        jd: f64,
        lat: f64,
        lon: f64,
        house_system_byte: u8,
        house_system_str: &str,
        flags: i32,
    ) -> Result<HousePositions, EphemerisError> {
        use swisseph::swe::houses_ex;
        use swisseph::{AscMc, Cusp};

        let (c, a) = houses_ex(jd, flags, lat, lon, house_system_byte as i32);
        let cusps = Cusp::from_array(c);
        let ascmc = AscMc::from_array(a);

        let cusp_values = [
            cusps.first, cusps.second, cusps.third, cusps.fourth,
            cusps.fifth, cusps.sixth, cusps.seventh, cusps.eighth,
            cusps.ninth, cusps.tenth, cusps.eleventh, cusps.twelfth,
        ];
        if cusp_values.iter().any(|v| !v.is_finite()) {
            return Err(EphemerisError::HouseCalculationFailed {
                message: format!("non-finite cusp for latitude {lat}"),
            });
        }

        let cusps_dict = cusp_values
            .iter()
            .enumerate()
            .map(|(i, cusp)| ((i + 1).to_string(), cusp.rem_euclid(360.0)))
            .collect();

        let asc = ascmc.ascendant.rem_euclid(360.0);
        let mc = ascmc.mc.rem_euclid(360.0);

        Ok(HousePositions {
            system: house_system_str.to_string(),
            cusps: cusps_dict,
            angles: HashMap::from([
                ("asc".to_string(), asc),
                ("mc".to_string(), mc),
                ("ic".to_string(), (mc + 180.0) % 360.0),
                ("dc".to_string(), (asc + 180.0) % 360.0),
            ]),
        })
    }

    fn configure_flags(&mut self, settings: &EphemerisSettings) -> Result<i32, EphemerisError> {
        let mut flags = FLG_SWIEPH | FLG_SPEED;

        if settings.zodiac_type == "sidereal" {
            let mode = resolve_ayanamsa(settings.ayanamsa.as_deref())?;
            if self.current_sidereal_mode != Some(mode) {
                self.current_sidereal_mode = Some(mode);
            }
            flags |= FLG_SIDEREAL;
        }

        Ok(flags)
    }
}

fn resolve_ayanamsa(ayanamsa: Option<&str>) -> Result<i32, EphemerisError> {
    let ayanamsa = ayanamsa.unwrap_or("lahiri");
    AYANAMSAS
        .iter()
        .find(|(name, _)| *name == ayanamsa.to_lowercase())
        .map(|(_, mode)| *mode)
        .ok_or_else(|| EphemerisError::InvalidAyanamsa {
            ayanamsa: ayanamsa.to_string(),
            valid: AYANAMSAS.iter().map(|(name, _)| name.to_string()).collect(),
        })
}

fn datetime_to_julian_day(dt: DateTime<Utc>) -> f64 {
    let hour_decimal =
        dt.hour() as f64 + dt.minute() as f64 / 60.0 + dt.second() as f64 / 3600.0;
    julday(dt.year(), dt.month() as i32, dt.day() as i32, hour_decimal, GREG_CAL)
}

/// Only used to label errors, so an unrepresentable instant maps to the epoch.
fn julian_day_to_datetime(jd: f64) -> DateTime<Utc> {
    let (year, month, day, hour_decimal) = revjul(jd, GREG_CAL);
    let hour = hour_decimal as u32;
    let minute = ((hour_decimal - hour as f64) * 60.0) as u32;
    let second = (((hour_decimal - hour as f64) * 60.0 - minute as f64) * 60.0) as u32;
    Utc.with_ymd_and_hms(year, month as u32, day as u32, hour, minute, second)
        .single()
        .unwrap_or_default()
}

pub fn get_house_system_byte(house_system: &str) -> Result<u8, EphemerisError> {
    HOUSE_SYSTEMS
        .iter()
        .find(|(name, _)| *name == house_system.to_lowercase())
        .map(|(_, byte)| *byte)
        .ok_or_else(|| EphemerisError::InvalidHouseSystem {
            system: house_system.to_string(),
            valid: HOUSE_SYSTEMS.iter().map(|(name, _)| name.to_string()).collect(),
        })
}
