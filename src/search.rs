//! Search orchestration
//!
//! Sequences the geocode, current-conditions, forecast and advisory steps
//! for one submission and owns the single search state. The three weather
//! steps are required and run strictly in order; any failure aborts the
//! sequence and becomes the `Failed` state with the error's display text.
//! The advisory step is best-effort and cannot fail a search.
//!
//! Every submission is tagged with a monotonically increasing generation;
//! an outcome is applied only while its generation is still current, so a
//! result superseded by a newer submission is discarded instead of racing
//! it for the shared state.

use crate::Result;
use crate::advisor::OutfitAdvisor;
use crate::api::WeatherApiClient;
use crate::config::WeatherWiseConfig;
use crate::models::{CurrentConditions, ForecastSlice};
use crate::units::DisplayUnit;
use tracing::{debug, info};

/// The single search state; exactly one variant holds at any time
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SearchState {
    /// No search has been submitted yet
    #[default]
    Idle,
    /// A search is in flight
    Loading,
    /// The last search completed
    Success {
        current: CurrentConditions,
        forecast: Vec<ForecastSlice>,
        advisory: String,
    },
    /// A required step of the last search failed
    Failed(String),
}

/// Payload assembled by a completed search run
#[derive(Debug, Clone, PartialEq)]
struct SearchOutcome {
    current: CurrentConditions,
    forecast: Vec<ForecastSlice>,
    advisory: String,
}

/// Orchestrates searches and owns the view-facing state
pub struct SearchOrchestrator {
    weather: WeatherApiClient,
    advisor: OutfitAdvisor,
    state: SearchState,
    unit: DisplayUnit,
    generation: u64,
}

impl SearchOrchestrator {
    /// Create an orchestrator from configuration
    pub fn new(config: &WeatherWiseConfig) -> Result<Self> {
        Ok(Self {
            weather: WeatherApiClient::new(config)?,
            advisor: OutfitAdvisor::new(config)?,
            state: SearchState::Idle,
            unit: DisplayUnit::default(),
            generation: 0,
        })
    }

    /// The current search state
    #[must_use]
    pub fn state(&self) -> &SearchState {
        &self.state
    }

    /// The current temperature unit preference
    #[must_use]
    pub fn unit(&self) -> DisplayUnit {
        self.unit
    }

    /// Flip the temperature unit. Touches only the unit preference; stored
    /// conditions are re-rendered through the converter, never refetched.
    pub fn toggle_unit(&mut self) -> DisplayUnit {
        self.unit = self.unit.toggle();
        self.unit
    }

    /// Run one search to completion. An empty or whitespace-only query is
    /// a no-op: no state transition, no network calls.
    pub async fn submit(&mut self, query: &str) {
        let query = query.trim();
        if query.is_empty() {
            debug!("Ignoring empty search submission");
            return;
        }

        let generation = self.begin();
        let outcome = self.run(query).await;
        self.apply(generation, outcome);
    }

    /// Start a new search: bump the generation and enter `Loading`
    fn begin(&mut self) -> u64 {
        self.generation += 1;
        self.state = SearchState::Loading;
        self.generation
    }

    /// The sequential pipeline; each step depends on its predecessor
    async fn run(&self, query: &str) -> Result<SearchOutcome> {
        let coordinates = self.weather.geocode(query).await?;
        let current = self.weather.current_conditions(&coordinates).await?;
        let forecast = self.weather.forecast(&coordinates).await?;
        // Best-effort: failures collapse to fallback text inside the advisor
        let advisory = self.advisor.suggest(&current).await;

        Ok(SearchOutcome {
            current,
            forecast,
            advisory,
        })
    }

    /// Apply a finished search unless a newer submission superseded it
    fn apply(&mut self, generation: u64, outcome: Result<SearchOutcome>) {
        if generation != self.generation {
            debug!(
                generation,
                current = self.generation,
                "Discarding stale search outcome"
            );
            return;
        }

        self.state = match outcome {
            Ok(SearchOutcome {
                current,
                forecast,
                advisory,
            }) => {
                info!("Search succeeded for {}", current.format_location());
                SearchState::Success {
                    current,
                    forecast,
                    advisory,
                }
            }
            Err(err) => SearchState::Failed(err.to_string()),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::WeatherWiseError;

    fn orchestrator() -> SearchOrchestrator {
        SearchOrchestrator::new(&WeatherWiseConfig::default()).unwrap()
    }

    fn sample_outcome() -> SearchOutcome {
        SearchOutcome {
            current: CurrentConditions {
                temperature_c: 28,
                feels_like_c: 31,
                humidity_pct: 65,
                wind_speed_kmh: 18.0,
                description: "scattered clouds".to_string(),
                city: "Tokyo".to_string(),
                country: "JP".to_string(),
                precipitation_mm: 0.0,
            },
            forecast: Vec::new(),
            advisory: "wear a hat".to_string(),
        }
    }

    #[tokio::test]
    async fn test_empty_query_is_a_noop() {
        let mut orchestrator = orchestrator();
        orchestrator.submit("").await;
        orchestrator.submit("   ").await;
        assert_eq!(*orchestrator.state(), SearchState::Idle);
        assert_eq!(orchestrator.generation, 0);
    }

    #[test]
    fn test_stale_outcome_is_discarded() {
        let mut orchestrator = orchestrator();
        let first = orchestrator.begin();
        // A second submission supersedes the first while it is in flight
        let _second = orchestrator.begin();

        orchestrator.apply(first, Ok(sample_outcome()));
        assert_eq!(*orchestrator.state(), SearchState::Loading);
    }

    #[test]
    fn test_current_outcome_is_applied() {
        let mut orchestrator = orchestrator();
        let generation = orchestrator.begin();
        orchestrator.apply(generation, Ok(sample_outcome()));
        assert!(matches!(orchestrator.state(), SearchState::Success { .. }));
    }

    #[test]
    fn test_failure_message_is_verbatim() {
        let mut orchestrator = orchestrator();
        let generation = orchestrator.begin();
        orchestrator.apply(generation, Err(WeatherWiseError::NotFound));
        assert_eq!(
            *orchestrator.state(),
            SearchState::Failed("City not found".to_string())
        );
    }

    #[test]
    fn test_stale_failure_does_not_clobber_newer_state() {
        let mut orchestrator = orchestrator();
        let first = orchestrator.begin();
        let second = orchestrator.begin();

        orchestrator.apply(second, Ok(sample_outcome()));
        orchestrator.apply(first, Err(WeatherWiseError::upstream("boom")));
        assert!(matches!(orchestrator.state(), SearchState::Success { .. }));
    }

    #[test]
    fn test_unit_toggle_is_orthogonal_to_state() {
        let mut orchestrator = orchestrator();
        assert_eq!(orchestrator.unit(), DisplayUnit::Celsius);
        assert_eq!(orchestrator.toggle_unit(), DisplayUnit::Fahrenheit);
        assert_eq!(orchestrator.toggle_unit(), DisplayUnit::Celsius);
        assert_eq!(*orchestrator.state(), SearchState::Idle);
    }
}
