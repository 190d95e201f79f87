//! Render-time temperature unit conversion
//!
//! Stored temperatures are always Celsius; conversion applies to the
//! already-rounded display value at render time and never mutates state.

use serde::{Deserialize, Serialize};

/// Temperature unit preference, persisted across searches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DisplayUnit {
    #[default]
    Celsius,
    Fahrenheit,
}

impl DisplayUnit {
    /// The other unit
    #[must_use]
    pub fn toggle(self) -> Self {
        match self {
            Self::Celsius => Self::Fahrenheit,
            Self::Fahrenheit => Self::Celsius,
        }
    }

    /// Unit symbol for display
    #[must_use]
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Celsius => "°C",
            Self::Fahrenheit => "°F",
        }
    }
}

/// Convert a stored Celsius display value for rendering
#[must_use]
pub fn display_temperature(temp_c: i32, unit: DisplayUnit) -> i32 {
    match unit {
        DisplayUnit::Celsius => temp_c,
        DisplayUnit::Fahrenheit => (f64::from(temp_c) * 9.0 / 5.0 + 32.0).round() as i32,
    }
}
