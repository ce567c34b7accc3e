use serde::{Deserialize, Serialize};

/// One user-submitted search. Built by the caller, consumed once.
#[derive(Debug, Clone)]
pub struct WeatherQuery {
    pub city: String,
    pub mode: ForecastMode,
    /// Whether to fetch current conditions in addition to the forecast.
    pub with_current: bool,
}

/// Forecast granularity requested from the upstream service.
///
/// `Daily` targets a deprecated endpoint and degrades to `ThreeHour` when
/// the upstream rejects it; see `OpenWeatherClient::fetch_forecast`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ForecastMode {
    #[default]
    ThreeHour,
    Daily,
}

impl ForecastMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ForecastMode::ThreeHour => "3-hour",
            ForecastMode::Daily => "daily",
        }
    }
}

/// A resolved place. Immutable after resolution, discarded at end of request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Location {
    pub city: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// Current observations at a location, metric units throughout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub temperature_c: f64,
    pub feels_like_c: f64,
    pub description: String,
    pub icon: String,
    pub humidity_pct: u8,
    pub pressure_hpa: u32,
    pub wind_speed_mps: f64,
    pub visibility_km: f64,
    /// Epoch seconds, UTC.
    pub sunrise_unix: i64,
    /// Epoch seconds, UTC.
    pub sunset_unix: i64,
    /// Shift in seconds from UTC at the observed location.
    pub timezone_offset_secs: i32,
}

/// One normalized forecast period.
///
/// `timestamp` keeps whatever the upstream provided: a human-readable
/// datetime string when available, otherwise the raw epoch seconds as text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastRecord {
    pub timestamp: String,
    pub temperature_c: f64,
    pub humidity_pct: u8,
    pub pressure_hpa: u32,
    pub description: String,
}

/// Everything one search produced, handed to the presentation layer.
///
/// `forecast` is never empty; an empty upstream list is a terminal error
/// for the search, not a partial-display case.
#[derive(Debug, Clone)]
pub struct WeatherReport {
    pub location: Location,
    pub current: Option<CurrentConditions>,
    pub forecast: Vec<ForecastRecord>,
}
