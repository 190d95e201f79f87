//! Current-conditions model and its ingestion from the weather service

use crate::error::WeatherWiseError;
use crate::models::openweather;
use serde::{Deserialize, Serialize};

/// Current atmospheric conditions for a location
///
/// Temperatures are stored in Celsius regardless of source units; the
/// Kelvin conversion happens exactly once here, at ingestion. Rendering in
/// Fahrenheit is a display concern (see [`crate::units`]).
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CurrentConditions {
    /// Temperature in Celsius, rounded to the nearest integer
    pub temperature_c: i32,
    /// Feels-like temperature in Celsius, rounded to the nearest integer
    pub feels_like_c: i32,
    /// Relative humidity percentage
    pub humidity_pct: u8,
    /// Wind speed in km/h, rounded to one decimal place
    pub wind_speed_kmh: f64,
    /// Human-readable condition description
    pub description: String,
    /// Resolved city name
    pub city: String,
    /// Country code (ISO 3166-1 alpha-2)
    pub country: String,
    /// Precipitation over the last hour in mm, 0 when not reported
    pub precipitation_mm: f64,
}

impl CurrentConditions {
    /// Convert a Kelvin temperature to a rounded Celsius display value
    #[must_use]
    pub fn kelvin_to_celsius(kelvin: f64) -> i32 {
        (kelvin - 273.15).round() as i32
    }

    /// Convert a wind speed from m/s to km/h, rounded to one decimal place
    #[must_use]
    pub fn ms_to_kmh(ms: f64) -> f64 {
        (ms * 3.6 * 10.0).round() / 10.0
    }

    pub(crate) fn from_openweather(
        payload: openweather::CurrentResponse,
    ) -> Result<Self, WeatherWiseError> {
        let Some(main) = payload.main else {
            return Err(WeatherWiseError::upstream(
                "Weather service response was missing current conditions",
            ));
        };

        let condition = payload.weather.into_iter().next();

        Ok(Self {
            temperature_c: Self::kelvin_to_celsius(main.temp),
            feels_like_c: Self::kelvin_to_celsius(main.feels_like),
            humidity_pct: main.humidity,
            wind_speed_kmh: Self::ms_to_kmh(payload.wind.map_or(0.0, |w| w.speed)),
            description: condition.map(|c| c.description).unwrap_or_default(),
            city: payload.name.unwrap_or_default(),
            country: payload.sys.and_then(|s| s.country).unwrap_or_default(),
            precipitation_mm: payload.rain.and_then(|r| r.one_hour).unwrap_or(0.0),
        })
    }

    /// Format the wind speed with one decimal place, e.g. "18.0"
    #[must_use]
    pub fn format_wind(&self) -> String {
        format!("{:.1}", self.wind_speed_kmh)
    }

    /// Format the resolved location, e.g. "Tokyo, JP"
    #[must_use]
    pub fn format_location(&self) -> String {
        if self.country.is_empty() {
            self.city.clone()
        } else {
            format!("{}, {}", self.city, self.country)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(273.15, 0)]
    #[case(301.15, 28)]
    #[case(303.65, 31)] // 30.5 rounds away from zero
    #[case(250.0, -23)]
    fn test_kelvin_to_celsius(#[case] kelvin: f64, #[case] celsius: i32) {
        assert_eq!(CurrentConditions::kelvin_to_celsius(kelvin), celsius);
    }

    #[rstest]
    #[case(5.0, 18.0)]
    #[case(0.0, 0.0)]
    #[case(3.7, 13.3)] // 13.32 rounds to one decimal
    fn test_ms_to_kmh(#[case] ms: f64, #[case] kmh: f64) {
        assert_eq!(CurrentConditions::ms_to_kmh(ms), kmh);
    }

    #[test]
    fn test_format_wind_one_decimal() {
        let conditions = sample();
        assert_eq!(conditions.format_wind(), "18.0");
    }

    #[test]
    fn test_format_location() {
        let conditions = sample();
        assert_eq!(conditions.format_location(), "Tokyo, JP");

        let mut anonymous = sample();
        anonymous.country = String::new();
        assert_eq!(anonymous.format_location(), "Tokyo");
    }

    fn sample() -> CurrentConditions {
        CurrentConditions {
            temperature_c: 28,
            feels_like_c: 31,
            humidity_pct: 65,
            wind_speed_kmh: 18.0,
            description: "scattered clouds".to_string(),
            city: "Tokyo".to_string(),
            country: "JP".to_string(),
            precipitation_mm: 0.0,
        }
    }
}
