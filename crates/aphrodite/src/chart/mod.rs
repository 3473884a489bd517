pub mod birth;
pub mod natal;

pub use birth::{BirthMoment, BirthPlace, MAX_YEAR, MIN_YEAR};
pub use natal::{house_of, Body, CelestialBody, Chart, HouseCusp, ProviderHandle};
