//! Commentary strategies
//!
//! The numeric engine never depends on which strategy is active. A
//! strategy only reads a finished [`ParlayEvaluation`](crate::ParlayEvaluation).
//!
//! - [`RuleBasedCommentator`]: deterministic text from the evaluation
//! - [`GeminiCommentator`]: model-written analysis over HTTP
//! - [`FallbackCommentator`]: tries one strategy, falls back to another

mod gemini;
mod rule_based;
mod traits;

use async_trait::async_trait;
use tracing::{info, warn};

pub use gemini::{build_prompt, GeminiCommentator};
pub use rule_based::RuleBasedCommentator;
pub use traits::{BoxedCommentator, Commentator};

use crate::common::errors::Result;
use crate::common::types::ParlayEvaluation;
use crate::config::types::{ReasoningConfig, ReasoningMode};

/// Runs `primary`; when it fails, returns `fallback`'s commentary instead
pub struct FallbackCommentator {
    primary: BoxedCommentator,
    fallback: BoxedCommentator,
}

impl FallbackCommentator {
    pub fn new(primary: BoxedCommentator, fallback: BoxedCommentator) -> Self {
        Self { primary, fallback }
    }
}

#[async_trait]
impl Commentator for FallbackCommentator {
    fn name(&self) -> &'static str {
        self.primary.name()
    }

    async fn produce_commentary(&self, evaluation: &ParlayEvaluation) -> Result<String> {
        match self.primary.produce_commentary(evaluation).await {
            Ok(text) => Ok(text),
            Err(e) => {
                warn!(
                    primary = self.primary.name(),
                    fallback = self.fallback.name(),
                    error = %e,
                    "Commentary failed, falling back"
                );
                let text = self.fallback.produce_commentary(evaluation).await?;
                Ok(format!(
                    "AI analysis unavailable. Falling back to {} commentary.\n{}",
                    self.fallback.name(),
                    text
                ))
            }
        }
    }
}

/// Build the commentary strategy selected by configuration
///
/// Gemini mode without an API key degrades to rule-based commentary.
pub fn build_commentator(config: &ReasoningConfig) -> Result<BoxedCommentator> {
    match config.mode {
        ReasoningMode::RuleBased => Ok(Box::new(RuleBasedCommentator::new())),
        ReasoningMode::Gemini => {
            if config.gemini_api_key.is_none() {
                warn!("GEMINI_API_KEY not found, using rule-based commentary");
                return Ok(Box::new(RuleBasedCommentator::new()));
            }
            let gemini = GeminiCommentator::from_config(config)?;
            info!(model = %config.gemini_model, "Using Gemini commentary");
            Ok(Box::new(FallbackCommentator::new(
                Box::new(gemini),
                Box::new(RuleBasedCommentator::new()),
            )))
        }
    }
}
