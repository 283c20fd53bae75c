//! Configuration loader

use config::{Config, Environment, File};
use std::path::Path;

use super::types::AppConfig;
use crate::common::errors::{AdvisorError, Result};

/// Load configuration from file and environment variables
///
/// Priority (highest to lowest):
/// 1. Environment variables (e.g. `PARLAY_REASONING__MODE=gemini`)
/// 2. Configuration file (TOML format)
/// 3. Default values
///
/// `GEMINI_API_KEY` is honoured when no key was configured otherwise.
pub fn load_config(config_path: Option<&str>) -> Result<AppConfig> {
    dotenvy::dotenv().ok();

    let mut builder = Config::builder();

    if let Some(path) = config_path {
        if Path::new(path).exists() {
            builder = builder.add_source(File::with_name(path).required(false));
        }
    }

    builder = builder.add_source(
        Environment::with_prefix("PARLAY")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder
        .build()
        .map_err(|e| AdvisorError::Configuration(e.to_string()))?;

    let mut app: AppConfig = config
        .try_deserialize()
        .map_err(|e| AdvisorError::Configuration(e.to_string()))?;

    if app.reasoning.gemini_api_key.is_none() {
        app.reasoning.gemini_api_key = gemini_key_from_env();
    }

    app.engine.validate()?;
    Ok(app)
}

/// Load configuration from environment variables only
pub fn load_from_env() -> Result<AppConfig> {
    load_config(None)
}

fn gemini_key_from_env() -> Option<String> {
    std::env::var("GEMINI_API_KEY")
        .ok()
        .map(|key| key.trim().to_string())
        .filter(|key| !key.is_empty())
}
