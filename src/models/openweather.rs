//! Raw OpenWeatherMap API response structures
//!
//! These mirror the wire format of the geocoding, current-conditions and
//! forecast endpoints. Conversion into the view-facing models lives next
//! to those models.

use serde::Deserialize;

/// One match from the geocoding endpoint
#[derive(Debug, Deserialize)]
pub(crate) struct GeocodeMatch {
    pub lat: f64,
    pub lon: f64,
}

/// Current-conditions response. `cod` is numeric on this endpoint.
#[derive(Debug, Deserialize)]
pub(crate) struct CurrentResponse {
    pub cod: i64,
    pub message: Option<String>,
    pub main: Option<MainData>,
    pub wind: Option<WindData>,
    #[serde(default)]
    pub weather: Vec<ConditionEntry>,
    pub name: Option<String>,
    pub sys: Option<SysData>,
    pub rain: Option<RainData>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct MainData {
    /// Temperature in Kelvin
    pub temp: f64,
    /// Feels-like temperature in Kelvin
    pub feels_like: f64,
    /// Relative humidity percentage
    pub humidity: u8,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WindData {
    /// Wind speed in m/s
    pub speed: f64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ConditionEntry {
    /// Condition group label, e.g. "Clear" or "Clouds"
    pub main: String,
    /// Human-readable description, e.g. "scattered clouds"
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SysData {
    pub country: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RainData {
    /// Precipitation over the last hour in mm
    #[serde(rename = "1h")]
    pub one_hour: Option<f64>,
}

/// Forecast response. `cod` is a string on this endpoint, unlike the
/// numeric status of the current-conditions endpoint.
#[derive(Debug, Deserialize)]
pub(crate) struct ForecastResponse {
    pub cod: String,
    /// Numeric `0` on success, a string message on error
    #[serde(default)]
    pub message: serde_json::Value,
    #[serde(default)]
    pub list: Vec<ForecastEntry>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ForecastEntry {
    /// Unix timestamp (UTC) of the slice
    pub dt: i64,
    pub main: ForecastMain,
    #[serde(default)]
    pub weather: Vec<ConditionEntry>,
    /// Probability of precipitation in [0, 1]
    pub pop: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ForecastMain {
    /// Temperature in Kelvin
    pub temp: f64,
}
