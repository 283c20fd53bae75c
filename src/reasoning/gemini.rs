//! Model-backed commentary using the Gemini generateContent API

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::time::Duration;
use tracing::{debug, instrument};
use url::Url;

use super::traits::Commentator;
use crate::common::errors::{AdvisorError, Result};
use crate::common::types::ParlayEvaluation;
use crate::config::types::ReasoningConfig;

/// Gemini commentary client
#[derive(Debug, Clone)]
pub struct GeminiCommentator {
    client: Client,
    endpoint: Url,
    api_key: String,
    model: String,
}

impl GeminiCommentator {
    /// Create a client with a 30 second timeout
    pub fn new(endpoint: &str, api_key: impl Into<String>, model: impl Into<String>) -> Result<Self> {
        Self::with_timeout(endpoint, api_key, model, Duration::from_secs(30))
    }

    /// Create a client with a custom timeout
    pub fn with_timeout(
        endpoint: &str,
        api_key: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AdvisorError::Internal(e.to_string()))?;

        let mut endpoint = Url::parse(endpoint)?;
        if !endpoint.path().ends_with('/') {
            let path = format!("{}/", endpoint.path());
            endpoint.set_path(&path);
        }

        Ok(Self {
            client,
            endpoint,
            api_key: api_key.into(),
            model: model.into(),
        })
    }

    /// Build from configuration; fails when no API key is configured
    pub fn from_config(config: &ReasoningConfig) -> Result<Self> {
        let api_key = config
            .gemini_api_key
            .clone()
            .ok_or_else(|| AdvisorError::Configuration("GEMINI_API_KEY is not set".to_string()))?;
        Self::with_timeout(
            &config.gemini_endpoint,
            api_key,
            config.gemini_model.clone(),
            Duration::from_secs(config.request_timeout_seconds),
        )
    }

    fn request_url(&self) -> Result<Url> {
        let mut url = self
            .endpoint
            .join(&format!("v1beta/models/{}:generateContent", self.model))?;
        url.query_pairs_mut().append_pair("key", &self.api_key);
        Ok(url)
    }
}

/// Prompt handed to the model; numbers are final and must not be recomputed
pub fn build_prompt(evaluation: &ParlayEvaluation) -> String {
    let mut prompt = String::from(
        "You are an expert NFL betting advisor. Explain the value of this parlay using the \
         pre-calculated numbers below. Do not recalculate probabilities.\n\n",
    );

    let _ = writeln!(prompt, "PARLAY SUMMARY:");
    let _ = writeln!(prompt, "- Verdict: {}", evaluation.verdict);
    let _ = writeln!(prompt, "- Value Score: {:+.4}", evaluation.value_score);
    let _ = writeln!(prompt, "- Stake: ${:.2}", evaluation.stake);
    let _ = writeln!(prompt, "- Expected Value: ${:.2}", evaluation.expected_value);
    let _ = writeln!(
        prompt,
        "- Combined Hit Probability: {:.2}%",
        evaluation.combined_probability * 100.0
    );
    let _ = writeln!(prompt, "- Payout Multiplier: {:.3}x", evaluation.payout_multiplier);
    let _ = writeln!(prompt, "\nLEGS:");

    for leg in &evaluation.legs {
        let _ = writeln!(prompt, "\nLeg {}: {}", leg.leg_id, leg.description);
        let _ = writeln!(prompt, "  - Odds: {:+}", leg.odds);
        let _ = writeln!(
            prompt,
            "  - Implied Probability: {:.1}%",
            leg.implied_probability * 100.0
        );
        let _ = writeln!(
            prompt,
            "  - Adjusted Probability: {:.1}%",
            leg.adjusted_probability * 100.0
        );
        let _ = writeln!(prompt, "  - Difference: {:+.1} pts", leg.edge() * 100.0);
        if !leg.rationale.is_empty() {
            let _ = writeln!(prompt, "  - Signals:");
            for note in &leg.rationale {
                let _ = writeln!(prompt, "    * {}", note);
            }
        }
    }

    prompt.push_str(
        "\nTASK:\nWrite a concise analysis (under 200 words, Markdown). Open with a clear \
         recommendation, explain the adjusted legs by referring to their signals, and say \
         whether the expected value justifies the risk.\n",
    );
    prompt
}

#[derive(Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

#[derive(Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[async_trait]
impl Commentator for GeminiCommentator {
    fn name(&self) -> &'static str {
        "gemini"
    }

    #[instrument(skip(self, evaluation), fields(model = %self.model))]
    async fn produce_commentary(&self, evaluation: &ParlayEvaluation) -> Result<String> {
        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: build_prompt(evaluation),
                }],
            }],
        };

        let response = self
            .client
            .post(self.request_url()?)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AdvisorError::InvalidResponse(format!(
                "Server returned status {}: {}",
                status, body
            )));
        }

        let body: GenerateResponse = response.json().await?;
        let text: String = body
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .map(|p| p.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(AdvisorError::Reasoning("model returned no text".to_string()));
        }
        debug!(chars = text.len(), "Received model commentary");
        Ok(text)
    }
}
