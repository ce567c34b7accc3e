use reqwest::Client;
use serde::Deserialize;

use crate::{
    error::WeatherError,
    model::{CurrentConditions, ForecastMode},
};

const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org";

/// Client for the OpenWeatherMap current-conditions and forecast endpoints.
///
/// Pure request/response: no retries, no caching, no rate limiting. A failed
/// call ends the search attempt.
#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    api_key: String,
    http: Client,
    base_url: String,
}

impl OpenWeatherClient {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL.to_string())
    }

    /// Point the client at a different host. Used by tests.
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self { api_key, http: Client::new(), base_url }
    }

    /// Fetch current conditions at the given coordinates, metric units.
    pub async fn fetch_current(
        &self,
        lat: f64,
        lon: f64,
    ) -> Result<CurrentConditions, WeatherError> {
        let url = format!("{}/data/2.5/weather", self.base_url);
        let body = self.get_metric(&url, lat, lon, "current weather").await?;

        let parsed: OwCurrentResponse = serde_json::from_str(&body).map_err(|e| {
            WeatherError::MalformedResponse(format!("current weather payload: {e}"))
        })?;

        let weather = parsed.weather.into_iter().next().ok_or_else(|| {
            WeatherError::MalformedResponse(
                "current weather payload has an empty 'weather' array".to_string(),
            )
        })?;

        Ok(CurrentConditions {
            temperature_c: parsed.main.temp,
            feels_like_c: parsed.main.feels_like,
            description: weather.description,
            icon: weather.icon,
            humidity_pct: parsed.main.humidity,
            pressure_hpa: parsed.main.pressure,
            wind_speed_mps: parsed.wind.speed,
            visibility_km: parsed.visibility.unwrap_or(0.0) / 1000.0,
            sunrise_unix: parsed.sys.sunrise,
            sunset_unix: parsed.sys.sunset,
            timezone_offset_secs: parsed.timezone,
        })
    }

    /// Fetch the forecast at the given coordinates.
    ///
    /// `ForecastMode::Daily` targets the deprecated daily endpoint; when that
    /// call fails for any reason it degrades to the 3-hour forecast instead
    /// of failing the search.
    pub async fn fetch_forecast(
        &self,
        lat: f64,
        lon: f64,
        mode: ForecastMode,
    ) -> Result<Vec<RawForecastEntry>, WeatherError> {
        if mode == ForecastMode::Daily {
            match self.fetch_daily(lat, lon).await {
                Ok(entries) => return Ok(entries),
                Err(e) => {
                    tracing::warn!(error = %e, "daily forecast unavailable, degrading to 3-hour");
                }
            }
        }

        self.fetch_three_hour(lat, lon).await
    }

    async fn fetch_three_hour(
        &self,
        lat: f64,
        lon: f64,
    ) -> Result<Vec<RawForecastEntry>, WeatherError> {
        let url = format!("{}/data/2.5/forecast", self.base_url);
        let body = self.get_metric(&url, lat, lon, "3-hour forecast").await?;

        let parsed: OwForecastResponse = serde_json::from_str(&body)
            .map_err(|e| WeatherError::MalformedResponse(format!("forecast payload: {e}")))?;

        Ok(parsed.list)
    }

    async fn fetch_daily(&self, lat: f64, lon: f64) -> Result<Vec<RawForecastEntry>, WeatherError> {
        let url = format!("{}/data/2.5/forecast/daily", self.base_url);
        let body = self.get_metric(&url, lat, lon, "daily forecast").await?;

        let parsed: OwDailyResponse = serde_json::from_str(&body)
            .map_err(|e| WeatherError::MalformedResponse(format!("daily forecast payload: {e}")))?;

        Ok(parsed
            .list
            .into_iter()
            .map(|day| RawForecastEntry {
                dt: day.dt,
                dt_txt: None,
                main: RawForecastMain {
                    temp: day.temp.day,
                    humidity: day.humidity,
                    pressure: day.pressure,
                },
                weather: day.weather,
            })
            .collect())
    }

    /// GET with the shared lat/lon/units/appid query, returning the body on 2xx.
    async fn get_metric(
        &self,
        url: &str,
        lat: f64,
        lon: f64,
        what: &str,
    ) -> Result<String, WeatherError> {
        tracing::debug!(url, lat, lon, "fetching {what}");

        let lat_s = lat.to_string();
        let lon_s = lon.to_string();

        let res = self
            .http
            .get(url)
            .query(&[
                ("lat", lat_s.as_str()),
                ("lon", lon_s.as_str()),
                ("units", "metric"),
                ("appid", self.api_key.as_str()),
            ])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(WeatherError::Upstream(format!(
                "{what} request failed with status {status}: {}",
                truncate_body(&body),
            )));
        }

        Ok(body)
    }
}

/// One raw forecast period as returned by the upstream, before normalization.
///
/// Both timestamp fields are optional because the two payload shapes differ:
/// the 3-hour endpoint carries a human-readable `dt_txt`, the daily one only
/// a numeric `dt`.
#[derive(Debug, Clone, Deserialize)]
pub struct RawForecastEntry {
    pub dt: Option<i64>,
    pub dt_txt: Option<String>,
    pub main: RawForecastMain,
    #[serde(default)]
    pub weather: Vec<RawWeatherDesc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawForecastMain {
    pub temp: f64,
    pub humidity: u8,
    pub pressure: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawWeatherDesc {
    pub description: String,
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    feels_like: f64,
    humidity: u8,
    pressure: u32,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwSys {
    sunrise: i64,
    sunset: i64,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
    visibility: Option<f64>,
    sys: OwSys,
    timezone: i32,
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    list: Vec<RawForecastEntry>,
}

#[derive(Debug, Deserialize)]
struct OwDailyTemp {
    day: f64,
}

#[derive(Debug, Deserialize)]
struct OwDailyEntry {
    dt: Option<i64>,
    temp: OwDailyTemp,
    humidity: u8,
    pressure: u32,
    #[serde(default)]
    weather: Vec<RawWeatherDesc>,
}

#[derive(Debug, Deserialize)]
struct OwDailyResponse {
    list: Vec<OwDailyEntry>,
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    // Cut on a char boundary; upstream error bodies are not always ASCII.
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
