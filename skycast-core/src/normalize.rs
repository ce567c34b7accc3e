//! Reshapes raw forecast payloads into the uniform record sequence the
//! presentation layer consumes.

use chrono::DateTime;

use crate::{error::WeatherError, fetcher::RawForecastEntry, model::ForecastRecord};

/// Normalize a raw forecast list, preserving upstream order.
///
/// No sorting, filtering, or deduplication: output length always equals
/// input length. An empty input is a terminal error for the search, so the
/// renderer never sees an empty sequence.
pub fn normalize(entries: &[RawForecastEntry]) -> Result<Vec<ForecastRecord>, WeatherError> {
    if entries.is_empty() {
        return Err(WeatherError::MalformedResponse(
            "forecast response contained no records".to_string(),
        ));
    }

    entries.iter().map(record_from_entry).collect()
}

/// The timestamp comes from `dt_txt` when present, otherwise from the
/// numeric `dt` epoch. Some payload shapes only carry one of the two.
fn record_from_entry(entry: &RawForecastEntry) -> Result<ForecastRecord, WeatherError> {
    let timestamp = match (&entry.dt_txt, entry.dt) {
        (Some(txt), _) => txt.clone(),
        (None, Some(epoch)) => {
            if DateTime::from_timestamp(epoch, 0).is_none() {
                return Err(WeatherError::MalformedResponse(format!(
                    "forecast record epoch {epoch} is out of range"
                )));
            }
            epoch.to_string()
        }
        (None, None) => {
            return Err(WeatherError::MalformedResponse(
                "forecast record has neither 'dt_txt' nor 'dt'".to_string(),
            ));
        }
    };

    let description = entry.weather.first().map(|w| w.description.clone()).ok_or_else(|| {
        WeatherError::MalformedResponse("forecast record has no weather description".to_string())
    })?;

    Ok(ForecastRecord {
        timestamp,
        temperature_c: entry.main.temp,
        humidity_pct: entry.main.humidity,
        pressure_hpa: entry.main.pressure,
        description,
    })
}
