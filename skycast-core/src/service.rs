use crate::{
    error::WeatherError,
    fetcher::OpenWeatherClient,
    model::{WeatherQuery, WeatherReport},
    normalize::normalize,
    resolver::LocationResolver,
};

/// One-shot request/response handler for a weather search.
///
/// Runs the single forward chain resolve -> current -> forecast -> normalize
/// and hands the caller a complete report. No step feeds back into an
/// earlier one and nothing here retries; a failed call ends the search.
#[derive(Debug)]
pub struct WeatherService {
    resolver: Box<dyn LocationResolver>,
    client: OpenWeatherClient,
}

impl WeatherService {
    pub fn new(resolver: Box<dyn LocationResolver>, client: OpenWeatherClient) -> Self {
        Self { resolver, client }
    }

    pub async fn lookup(&self, query: &WeatherQuery) -> Result<WeatherReport, WeatherError> {
        let location = self.resolver.resolve(&query.city).await?;

        tracing::debug!(
            city = %location.city,
            lat = location.latitude,
            lon = location.longitude,
            "location resolved"
        );

        let current = if query.with_current {
            Some(self.client.fetch_current(location.latitude, location.longitude).await?)
        } else {
            None
        };

        let raw = self
            .client
            .fetch_forecast(location.latitude, location.longitude, query.mode)
            .await?;
        let forecast = normalize(&raw)?;

        Ok(WeatherReport { location, current, forecast })
    }
}
