//! Forecast slice model and its ingestion from the weather service

use crate::models::CurrentConditions;
use crate::models::openweather;
use chrono::DateTime;
use serde::{Deserialize, Serialize};

/// Coarse condition category used for icon selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConditionCategory {
    Clear,
    Other,
}

impl ConditionCategory {
    /// Derive the category from the service's primary condition label
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        if label == "Clear" {
            Self::Clear
        } else {
            Self::Other
        }
    }

    /// Icon name for presentation
    #[must_use]
    pub fn icon_name(&self) -> &'static str {
        match self {
            Self::Clear => "sun",
            Self::Other => "cloud",
        }
    }
}

/// One future time-sliced reading, in source order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastSlice {
    /// Display time in UTC, e.g. "5 PM"
    pub display_time: String,
    /// Temperature in Celsius, rounded to the nearest integer
    pub temperature_c: i32,
    /// Coarse condition category
    pub category: ConditionCategory,
    /// Probability of precipitation as a whole percentage.
    /// 0 also stands in for "not reported"; the source API does not
    /// distinguish the two.
    pub precipitation_probability_pct: u8,
}

impl ForecastSlice {
    /// Maximum number of slices kept from a forecast response
    pub const MAX_SLICES: usize = 7;

    pub(crate) fn from_openweather(entry: openweather::ForecastEntry) -> Self {
        Self {
            display_time: Self::format_display_time(entry.dt),
            temperature_c: CurrentConditions::kelvin_to_celsius(entry.main.temp),
            category: entry
                .weather
                .first()
                .map_or(ConditionCategory::Other, |c| {
                    ConditionCategory::from_label(&c.main)
                }),
            precipitation_probability_pct: Self::probability_pct(entry.pop),
        }
    }

    /// Format a Unix timestamp as an hour-of-day label, e.g. "5 PM"
    fn format_display_time(unix: i64) -> String {
        DateTime::from_timestamp(unix, 0)
            .map(|t| t.format("%-I %p").to_string())
            .unwrap_or_else(|| "--".to_string())
    }

    /// Round a 0-1 probability to a whole percentage, 0 when absent
    fn probability_pct(pop: Option<f64>) -> u8 {
        (pop.unwrap_or(0.0).clamp(0.0, 1.0) * 100.0).round() as u8
    }

    /// Format the precipitation probability, e.g. "30%"
    #[must_use]
    pub fn format_probability(&self) -> String {
        format!("{}%", self.precipitation_probability_pct)
    }
}
