//! AI outfit advisor backed by the Gemini generative-language API
//!
//! The advisory is strictly best-effort: any failure (missing credential,
//! transport error, non-success status, malformed or empty response)
//! collapses into a fixed fallback string so that the advisory step can
//! never fail a search.

use crate::config::WeatherWiseConfig;
use crate::models::CurrentConditions;
use anyhow::Context;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Advice shown whenever the generative model cannot be consulted
pub const FALLBACK_ADVICE: &str = "Could not generate outfit suggestions.";

const USER_AGENT: &str = "WeatherWise/0.1.0";

/// Outfit advisor client
pub struct OutfitAdvisor {
    client: Client,
    api_key: Option<String>,
    base_url: String,
    model: String,
}

/// Request body for the `generateContent` endpoint
#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

/// Response body from the `generateContent` endpoint
#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

impl OutfitAdvisor {
    /// Create a new advisor client
    pub fn new(config: &WeatherWiseConfig) -> crate::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.advisor.timeout_seconds.into()))
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            api_key: config.advisor.api_key.clone(),
            base_url: config.advisor.base_url.clone(),
            model: config.advisor.model.clone(),
        })
    }

    /// Ask the model for outfit advice. Never fails: errors collapse into
    /// [`FALLBACK_ADVICE`].
    #[instrument(skip_all)]
    pub async fn suggest(&self, conditions: &CurrentConditions) -> String {
        match self.generate(conditions).await {
            Ok(text) => text,
            Err(err) => {
                warn!("Outfit advisory failed: {:#}", err);
                FALLBACK_ADVICE.to_string()
            }
        }
    }

    async fn generate(&self, conditions: &CurrentConditions) -> anyhow::Result<String> {
        let api_key = self
            .api_key
            .as_deref()
            .context("advisor API key is not configured")?;

        let url = format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.base_url, self.model, api_key
        );

        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: build_prompt(conditions),
                }],
            }],
        };

        debug!("Requesting outfit advice from model {}", self.model);

        let response = self.client.post(&url).json(&request).send().await?;
        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("advisory endpoint returned status {status}");
        }

        let body: GenerateContentResponse = response.json().await?;
        let text = body
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .and_then(|c| c.parts.into_iter().next())
            .and_then(|p| p.text)
            .context("advisory response contained no text")?;

        Ok(clean_markup(&text))
    }
}

/// Build the deterministic advice prompt for the given conditions
#[must_use]
pub fn build_prompt(conditions: &CurrentConditions) -> String {
    format!(
        "As a fashion expert, suggest appropriate clothing and best time to go out for:\n\
         - Current temperature: {}°C (feels like {}°C)\n\
         - Weather condition: {}\n\
         - Humidity: {}%\n\
         - Wind speed: {} km/h\n\
         - Precipitation: {} mm\n\
         \n\
         Provide:\n\
         1. 3-4 outfit suggestions as bullet points along with the colour for man and woman\n\
         2. Recommended accessories\n\
         3. Special considerations\n\
         Use simple, clear language without markdown formatting.",
        conditions.temperature_c,
        conditions.feels_like_c,
        conditions.description,
        conditions.humidity_pct,
        conditions.format_wind(),
        conditions.precipitation_mm,
    )
}

/// Strip the markup the model tends to emit despite being asked not to:
/// bold markers are removed, emphasis markers become bullet glyphs.
#[must_use]
pub fn clean_markup(text: &str) -> String {
    text.replace("**", "").replace('*', "•").trim().to_string()
}
