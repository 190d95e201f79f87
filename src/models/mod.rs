//! Data models for the `WeatherWise` application

pub mod forecast;
pub mod location;
pub(crate) mod openweather;
pub mod weather;

pub use forecast::{ConditionCategory, ForecastSlice};
pub use location::Coordinates;
pub use weather::CurrentConditions;
