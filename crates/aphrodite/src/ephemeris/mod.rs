#[cfg(feature = "swisseph")]
pub mod adapter;
pub mod error;
pub mod types;

#[cfg(feature = "swisseph")]
pub use adapter::SwissEphemerisAdapter;
pub use error::EphemerisError;
pub use types::{
    BodySnapshot, EphemerisPoint, EphemerisSettings, GeoLocation, HousePositions, LayerPositions,
    PlanetPosition,
};
