//! OpenWeatherMap API client
//!
//! HTTP client for the geocoding, current-conditions and forecast
//! endpoints. Both weather endpoints embed their own status in the JSON
//! payload; each is checked against its own success sentinel (numeric
//! `200` for current conditions, string `"200"` for the forecast).

use crate::Result;
use crate::config::WeatherWiseConfig;
use crate::error::WeatherWiseError;
use crate::models::{Coordinates, CurrentConditions, ForecastSlice, openweather};
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

const USER_AGENT: &str = "WeatherWise/0.1.0";

/// Weather API client for OpenWeatherMap
pub struct WeatherApiClient {
    /// HTTP client
    client: Client,
    /// API key; requests fail when absent
    api_key: Option<String>,
    /// Base URL for all endpoints
    base_url: String,
}

impl WeatherApiClient {
    /// Create a new weather API client
    pub fn new(config: &WeatherWiseConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.weather.timeout_seconds.into()))
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            api_key: config.weather.api_key.clone(),
            base_url: config.weather.base_url.clone(),
        })
    }

    /// The configured API key, or a request-time configuration error
    fn api_key(&self) -> Result<&str> {
        self.api_key
            .as_deref()
            .ok_or_else(|| WeatherWiseError::config("Weather API key is not configured"))
    }

    /// Resolve a free-text place query to coordinates (best match only)
    #[instrument(skip(self))]
    pub async fn geocode(&self, query: &str) -> Result<Coordinates> {
        let url = format!(
            "{}/geo/1.0/direct?q={}&limit=1&appid={}",
            self.base_url,
            urlencoding::encode(query),
            self.api_key()?
        );

        debug!("Geocoding '{}'", query);

        let matches: Vec<openweather::GeocodeMatch> = self
            .client
            .get(&url)
            .send()
            .await?
            .json()
            .await
            .map_err(|e| {
                WeatherWiseError::network(format!("Failed to parse geocoding response: {e}"))
            })?;

        let Some(first) = matches.into_iter().next() else {
            warn!("No geocoding match for '{}'", query);
            return Err(WeatherWiseError::NotFound);
        };

        info!(
            "Geocoded '{}' to ({:.4}, {:.4})",
            query, first.lat, first.lon
        );
        Ok(Coordinates::new(first.lat, first.lon))
    }

    /// Get current atmospheric conditions for coordinates
    #[instrument(skip(self), fields(lat = coordinates.latitude, lon = coordinates.longitude))]
    pub async fn current_conditions(
        &self,
        coordinates: &Coordinates,
    ) -> Result<CurrentConditions> {
        let url = format!(
            "{}/data/2.5/weather?lat={}&lon={}&appid={}",
            self.base_url,
            coordinates.latitude,
            coordinates.longitude,
            self.api_key()?
        );

        let response: openweather::CurrentResponse = self
            .client
            .get(&url)
            .send()
            .await?
            .json()
            .await
            .map_err(|e| {
                WeatherWiseError::network(format!("Failed to parse weather response: {e}"))
            })?;

        // Numeric success sentinel on this endpoint
        if response.cod != 200 {
            let message = response.message.unwrap_or_else(|| {
                format!("Weather service returned status {}", response.cod)
            });
            warn!("Current-conditions request failed: {}", message);
            return Err(WeatherWiseError::upstream(message));
        }

        let conditions = CurrentConditions::from_openweather(response)?;
        info!(
            "Retrieved current conditions for {}: {}°C, {}",
            conditions.city, conditions.temperature_c, conditions.description
        );
        Ok(conditions)
    }

    /// Get the short forecast for coordinates (at most
    /// [`ForecastSlice::MAX_SLICES`] slices, in service order)
    #[instrument(skip(self), fields(lat = coordinates.latitude, lon = coordinates.longitude))]
    pub async fn forecast(&self, coordinates: &Coordinates) -> Result<Vec<ForecastSlice>> {
        let url = format!(
            "{}/data/2.5/forecast?lat={}&lon={}&appid={}",
            self.base_url,
            coordinates.latitude,
            coordinates.longitude,
            self.api_key()?
        );

        let response: openweather::ForecastResponse = self
            .client
            .get(&url)
            .send()
            .await?
            .json()
            .await
            .map_err(|e| {
                WeatherWiseError::network(format!("Failed to parse forecast response: {e}"))
            })?;

        // String success sentinel on this endpoint
        if response.cod != "200" {
            let message = response
                .message
                .as_str()
                .map(str::to_string)
                .unwrap_or_else(|| {
                    format!("Weather service returned status {}", response.cod)
                });
            warn!("Forecast request failed: {}", message);
            return Err(WeatherWiseError::upstream(message));
        }

        let slices: Vec<ForecastSlice> = response
            .list
            .into_iter()
            .take(ForecastSlice::MAX_SLICES)
            .map(ForecastSlice::from_openweather)
            .collect();

        info!("Retrieved {} forecast slices", slices.len());
        Ok(slices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ConditionCategory;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> WeatherApiClient {
        let mut config = WeatherWiseConfig::default();
        config.weather.base_url = server.uri();
        config.weather.api_key = Some("test-key".to_string());
        WeatherApiClient::new(&config).unwrap()
    }

    #[tokio::test]
    async fn test_geocode_returns_first_match() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/geo/1.0/direct"))
            .and(query_param("q", "Tokyo"))
            .and(query_param("limit", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"name": "Tokyo", "lat": 35.6762, "lon": 139.6503, "country": "JP"}
            ])))
            .mount(&server)
            .await;

        let coords = client_for(&server).geocode("Tokyo").await.unwrap();
        assert_eq!(coords, Coordinates::new(35.6762, 139.6503));
    }

    #[tokio::test]
    async fn test_geocode_empty_result_is_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/geo/1.0/direct"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;

        let err = client_for(&server).geocode("Nowhereville").await.unwrap_err();
        assert!(matches!(err, WeatherWiseError::NotFound));
        assert_eq!(err.to_string(), "City not found");
    }

    #[tokio::test]
    async fn test_current_conditions_maps_units_at_ingestion() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/data/2.5/weather"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "cod": 200,
                "main": {"temp": 301.15, "feels_like": 303.65, "humidity": 65},
                "wind": {"speed": 5.0},
                "weather": [{"main": "Clouds", "description": "scattered clouds"}],
                "name": "Tokyo",
                "sys": {"country": "JP"},
            })))
            .mount(&server)
            .await;

        let coords = Coordinates::new(35.6762, 139.6503);
        let conditions = client_for(&server)
            .current_conditions(&coords)
            .await
            .unwrap();

        assert_eq!(conditions.temperature_c, 28);
        assert_eq!(conditions.feels_like_c, 31);
        assert_eq!(conditions.humidity_pct, 65);
        assert_eq!(conditions.format_wind(), "18.0");
        assert_eq!(conditions.description, "scattered clouds");
        assert_eq!(conditions.city, "Tokyo");
        assert_eq!(conditions.country, "JP");
        // No rain block: precipitation defaults to zero
        assert_eq!(conditions.precipitation_mm, 0.0);
    }

    #[tokio::test]
    async fn test_current_conditions_upstream_error_carries_message() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/data/2.5/weather"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "cod": 401,
                "message": "Invalid API key"
            })))
            .mount(&server)
            .await;

        let coords = Coordinates::new(0.0, 0.0);
        let err = client_for(&server)
            .current_conditions(&coords)
            .await
            .unwrap_err();
        assert!(matches!(err, WeatherWiseError::Upstream { .. }));
        assert_eq!(err.to_string(), "Invalid API key");
    }

    #[tokio::test]
    async fn test_forecast_string_status_error_carries_message() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/data/2.5/forecast"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "cod": "404",
                "message": "city not found"
            })))
            .mount(&server)
            .await;

        let coords = Coordinates::new(0.0, 0.0);
        let err = client_for(&server).forecast(&coords).await.unwrap_err();
        assert!(matches!(err, WeatherWiseError::Upstream { .. }));
        assert_eq!(err.to_string(), "city not found");
    }

    #[tokio::test]
    async fn test_forecast_truncates_and_preserves_order() {
        let list: Vec<_> = (0..9)
            .map(|i| {
                json!({
                    "dt": 1_700_240_400 + i * 10_800,
                    "main": {"temp": 283.15 + f64::from(i)},
                    "weather": [{"main": if i == 0 { "Clear" } else { "Clouds" }}],
                    "pop": 0.1 * f64::from(i),
                })
            })
            .collect();

        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/data/2.5/forecast"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "cod": "200",
                "message": 0,
                "list": list
            })))
            .mount(&server)
            .await;

        let coords = Coordinates::new(0.0, 0.0);
        let slices = client_for(&server).forecast(&coords).await.unwrap();

        assert_eq!(slices.len(), ForecastSlice::MAX_SLICES);
        let temps: Vec<i32> = slices.iter().map(|s| s.temperature_c).collect();
        assert_eq!(temps, vec![10, 11, 12, 13, 14, 15, 16]);
        assert_eq!(slices[0].category, ConditionCategory::Clear);
        assert_eq!(slices[1].category, ConditionCategory::Other);
        assert_eq!(slices[0].display_time, "5 PM");
        assert_eq!(slices[0].format_probability(), "0%");
        assert_eq!(slices[2].format_probability(), "20%");
    }

    #[tokio::test]
    async fn test_missing_api_key_fails_at_request_time() {
        // Client construction succeeds without a key; the request does not
        let client = WeatherApiClient::new(&WeatherWiseConfig::default()).unwrap();
        let err = client.geocode("Tokyo").await.unwrap_err();
        assert!(matches!(err, WeatherWiseError::Config { .. }));
    }
}
