//! Error types and handling for the `WeatherWise` application

use thiserror::Error;

/// Main error type for the `WeatherWise` application
#[derive(Error, Debug)]
pub enum WeatherWiseError {
    /// Geocoding produced no match for the query
    #[error("City not found")]
    NotFound,

    /// The weather service reported a non-success status in its payload
    #[error("{message}")]
    Upstream { message: String },

    /// Transport-level failure (connect, timeout, malformed body)
    #[error("Network error: {message}")]
    Network { message: String },

    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl WeatherWiseError {
    /// Create a new upstream error carrying the service-supplied message
    pub fn upstream<S: Into<String>>(message: S) -> Self {
        Self::Upstream {
            message: message.into(),
        }
    }

    /// Create a new network error
    pub fn network<S: Into<String>>(message: S) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}

impl From<reqwest::Error> for WeatherWiseError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network {
            message: err.to_string(),
        }
    }
}
