use async_trait::async_trait;
use std::fmt::Debug;

use crate::{error::WeatherError, model::Location};

pub mod geocode;
pub mod table;

pub use geocode::GeocodingResolver;
pub use table::CityTableResolver;

/// Turns a free-text city name into coordinates.
///
/// Implementations return a single `Location` or a typed failure
/// (`CityNotFound` vs `Upstream`); never partial results, never raw
/// transport errors.
#[async_trait]
pub trait LocationResolver: Send + Sync + Debug {
    async fn resolve(&self, city: &str) -> Result<Location, WeatherError>;
}
