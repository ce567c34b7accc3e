use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use super::LocationResolver;
use crate::{error::WeatherError, model::Location};

const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org";

/// Resolver backed by the OpenWeatherMap direct-geocoding endpoint.
///
/// Asks for a single candidate and takes its coordinates; an empty result
/// set means the city does not exist as far as the upstream is concerned.
#[derive(Debug, Clone)]
pub struct GeocodingResolver {
    api_key: String,
    http: Client,
    base_url: String,
}

impl GeocodingResolver {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL.to_string())
    }

    /// Point the resolver at a different host. Used by tests.
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self { api_key, http: Client::new(), base_url }
    }
}

#[derive(Debug, Deserialize)]
struct GeoCandidate {
    name: Option<String>,
    lat: f64,
    lon: f64,
}

#[async_trait]
impl LocationResolver for GeocodingResolver {
    async fn resolve(&self, city: &str) -> Result<Location, WeatherError> {
        let url = format!("{}/geo/1.0/direct", self.base_url);

        tracing::debug!(city, "geocoding lookup");

        let res = self
            .http
            .get(&url)
            .query(&[("q", city), ("limit", "1"), ("appid", self.api_key.as_str())])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(WeatherError::Upstream(format!(
                "geocoding request failed with status {status}: {}",
                truncate_body(&body),
            )));
        }

        let candidates: Vec<GeoCandidate> = serde_json::from_str(&body).map_err(|e| {
            WeatherError::MalformedResponse(format!("geocoding payload did not parse: {e}"))
        })?;

        let first = candidates
            .into_iter()
            .next()
            .ok_or_else(|| WeatherError::CityNotFound { city: city.to_string() })?;

        Ok(Location {
            city: first.name.unwrap_or_else(|| city.to_string()),
            latitude: first.lat,
            longitude: first.lon,
        })
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    // Cut on a char boundary; upstream error bodies are not always ASCII.
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
