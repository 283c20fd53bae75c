//! Configuration types

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::Level;

use crate::common::errors::AdvisorError;
use crate::engine::EngineSettings;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Heuristic constants for the evaluation engine
    #[serde(default)]
    pub engine: EngineSettings,
    /// Commentary strategy configuration
    #[serde(default)]
    pub reasoning: ReasoningConfig,
    /// General application settings
    #[serde(default)]
    pub settings: AppSettings,
}

/// Which commentary strategy to run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReasoningMode {
    #[default]
    RuleBased,
    Gemini,
}

impl fmt::Display for ReasoningMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReasoningMode::RuleBased => write!(f, "rule_based"),
            ReasoningMode::Gemini => write!(f, "gemini"),
        }
    }
}

impl FromStr for ReasoningMode {
    type Err = AdvisorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "rule_based" | "rules" | "heuristic" => Ok(ReasoningMode::RuleBased),
            "gemini" | "llm" => Ok(ReasoningMode::Gemini),
            other => Err(AdvisorError::Configuration(format!(
                "unknown reasoning mode '{}'",
                other
            ))),
        }
    }
}

/// Commentary strategy configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReasoningConfig {
    #[serde(default)]
    pub mode: ReasoningMode,
    /// API key for the Gemini generateContent endpoint
    #[serde(default)]
    pub gemini_api_key: Option<String>,
    #[serde(default = "default_gemini_model")]
    pub gemini_model: String,
    /// Base URL of the Generative Language API
    #[serde(default = "default_gemini_endpoint")]
    pub gemini_endpoint: String,
    /// Request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
}

impl Default for ReasoningConfig {
    fn default() -> Self {
        Self {
            mode: ReasoningMode::default(),
            gemini_api_key: None,
            gemini_model: default_gemini_model(),
            gemini_endpoint: default_gemini_endpoint(),
            request_timeout_seconds: default_request_timeout(),
        }
    }
}

fn default_gemini_model() -> String {
    "gemini-1.5-flash".to_string()
}

fn default_gemini_endpoint() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

/// General application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Stake used when the parlay file does not supply one
    #[serde(default = "default_stake")]
    pub default_stake: Decimal,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            default_stake: default_stake(),
        }
    }
}

impl AppSettings {
    /// Effective log level: `--verbose`, then `--log-level`, then the configured level
    pub fn resolve_log_level(&self, cli_level: Option<&str>, verbose: bool) -> Level {
        if verbose {
            return Level::DEBUG;
        }
        match cli_level.unwrap_or(self.log_level.as_str()).to_lowercase().as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "info" => Level::INFO,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::INFO,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_stake() -> Decimal {
    dec!(1.0)
}
