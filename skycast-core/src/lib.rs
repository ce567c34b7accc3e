//! Core library for the `skycast` weather dashboard.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - Location resolution (remote geocoding or a static city table)
//! - The OpenWeatherMap fetcher and forecast normalizer
//! - The one-shot search service and its domain models
//!
//! It is used by `skycast-cli`, but can also be reused by other binaries or services.

pub mod config;
pub mod error;
pub mod fetcher;
pub mod model;
pub mod normalize;
pub mod resolver;
pub mod service;

pub use config::Config;
pub use error::WeatherError;
pub use fetcher::OpenWeatherClient;
pub use model::{
    CurrentConditions, ForecastMode, ForecastRecord, Location, WeatherQuery, WeatherReport,
};
pub use resolver::{CityTableResolver, GeocodingResolver, LocationResolver};
pub use service::WeatherService;
