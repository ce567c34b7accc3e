use thiserror::Error;

/// Failure categories surfaced to the user.
///
/// Transport-level errors never escape the core as raw `reqwest::Error`;
/// they are folded into [`WeatherError::Upstream`] at the point of occurrence.
#[derive(Debug, Error)]
pub enum WeatherError {
    /// The city could not be resolved to coordinates.
    #[error("City '{city}' not found. Please try again.")]
    CityNotFound { city: String },

    /// Network failure or non-2xx response from a remote endpoint.
    #[error("Upstream request failed: {0}")]
    Upstream(String),

    /// A successful response was missing an expected field.
    #[error("Malformed upstream response: {0}")]
    MalformedResponse(String),

    /// Missing credential or unreadable reference table. Fatal at startup.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<reqwest::Error> for WeatherError {
    fn from(err: reqwest::Error) -> Self {
        WeatherError::Upstream(err.to_string())
    }
}
