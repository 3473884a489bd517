use anyhow::Context;
use aphrodite::ephemeris::EphemerisSettings;
use serde::Deserialize;
use soulmate::SearchSettings;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Overrides the config file location.
pub const CONFIG_ENV: &str = "SOULMATE_CONFIG";
const CONFIG_PATHS: [&str; 2] = ["configs/soulmate.toml", "../../configs/soulmate.toml"];

#[derive(Debug, Clone)]
pub struct Settings {
    pub ephemeris: EphemerisConfig,
    pub search: SearchSettings,
}

#[derive(Debug, Clone)]
pub struct EphemerisConfig {
    /// Swiss Ephemeris data directory; None defers to the backend's own lookup.
    pub path: Option<PathBuf>,
    pub settings: EphemerisSettings,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct EphemerisToml {
    #[serde(default)]
    path: Option<PathBuf>,
    #[serde(default)]
    house_system: Option<String>,
    #[serde(default)]
    zodiac_type: Option<String>,
    #[serde(default)]
    ayanamsa: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct RootConfigToml {
    #[serde(default)]
    ephemeris: EphemerisToml,
    #[serde(default)]
    search: SearchSettings,
}

impl Default for Settings {
    fn default() -> Self {
        from_root(RootConfigToml::default())
    }
}

/// Where the config file is: `$SOULMATE_CONFIG`, else the first of the
/// common relative paths that exists.
pub fn find_config_path() -> Option<PathBuf> {
    if let Ok(path) = env::var(CONFIG_ENV) {
        return Some(PathBuf::from(path));
    }
    CONFIG_PATHS
        .iter()
        .map(PathBuf::from)
        .find(|p| p.exists())
}

/// Load settings, falling back to defaults when no config file exists.
pub fn load_settings() -> anyhow::Result<Settings> {
    match find_config_path() {
        Some(path) => load_settings_from(&path),
        None => Ok(Settings::default()),
    }
}

pub fn load_settings_from(path: &Path) -> anyhow::Result<Settings> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Could not read config from {}", path.display()))?;
    parse_settings(&text).with_context(|| format!("Invalid config in {}", path.display()))
}

pub fn parse_settings(text: &str) -> anyhow::Result<Settings> {
    let root: RootConfigToml =
        toml::from_str(text).map_err(|e| anyhow::anyhow!("Failed to parse soulmate.toml: {e}"))?;
    let settings = from_root(root);
    validate(&settings)?;
    Ok(settings)
}

fn from_root(root: RootConfigToml) -> Settings {
    let EphemerisToml {
        path,
        house_system,
        zodiac_type,
        ayanamsa,
    } = root.ephemeris;
    let defaults = EphemerisSettings::default();
    Settings {
        ephemeris: EphemerisConfig {
            path,
            settings: EphemerisSettings {
                zodiac_type: zodiac_type.unwrap_or(defaults.zodiac_type),
                ayanamsa,
                house_system: house_system.unwrap_or(defaults.house_system),
                include_objects: defaults.include_objects,
            },
        },
        search: root.search,
    }
}

fn validate(settings: &Settings) -> anyhow::Result<()> {
    let zodiac = settings.ephemeris.settings.zodiac_type.as_str();
    if zodiac != "tropical" && zodiac != "sidereal" {
        anyhow::bail!("ephemeris.zodiac_type must be tropical or sidereal, got {zodiac}");
    }
    let search = &settings.search;
    if search.candidate_pool == 0 {
        anyhow::bail!("search.candidate_pool must be at least 1");
    }
    if search.min_ranked_candidates > search.candidate_pool {
        anyhow::bail!(
            "search.min_ranked_candidates ({}) exceeds search.candidate_pool ({})",
            search.min_ranked_candidates,
            search.candidate_pool
        );
    }
    if !(0.0..=20.0).contains(&search.proximity_orb) {
        anyhow::bail!("search.proximity_orb must be within 0-20 degrees, got {}", search.proximity_orb);
    }
    Ok(())
}
