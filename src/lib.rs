//! `WeatherWise` - city weather lookup with AI outfit suggestions
//!
//! This library provides the core search flow: geocode a free-text place
//! query, retrieve current conditions and a short forecast from
//! OpenWeatherMap, and ask a generative-language model for clothing
//! advice, assembled into a single view-facing search state.

pub mod advisor;
pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod search;
pub mod units;

// Re-export core types for public API
pub use advisor::{FALLBACK_ADVICE, OutfitAdvisor};
pub use api::WeatherApiClient;
pub use config::WeatherWiseConfig;
pub use error::WeatherWiseError;
pub use models::{ConditionCategory, Coordinates, CurrentConditions, ForecastSlice};
pub use search::{SearchOrchestrator, SearchState};
pub use units::{DisplayUnit, display_temperature};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, WeatherWiseError>;
