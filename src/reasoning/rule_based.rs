//! Deterministic commentary built from the evaluation itself

use async_trait::async_trait;

use super::traits::Commentator;
use crate::common::errors::Result;
use crate::common::types::{ParlayEvaluation, Verdict};

/// Rule-based commentary: one line per leg plus a parlay summary
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleBasedCommentator;

impl RuleBasedCommentator {
    pub fn new() -> Self {
        Self
    }

    /// Build the commentary lines
    pub fn lines(&self, evaluation: &ParlayEvaluation) -> Vec<String> {
        let mut lines = Vec::new();

        for leg in &evaluation.legs {
            lines.push(format!(
                "Leg {} {}: adjusted probability {:.2}% ({:+.2} pts vs market)",
                leg.leg_id,
                leg.description,
                leg.adjusted_probability * 100.0,
                leg.edge() * 100.0
            ));
            lines.extend(leg.rationale.iter().map(|note| format!("  - {}", note)));
        }

        lines.push(format!(
            "Combined expected value: ${:.2}",
            evaluation.expected_value
        ));
        lines.push(format!(
            "Parlay hit probability: {:.2}% (market implies {:.2}%)",
            evaluation.combined_probability * 100.0,
            evaluation.implied_combined_probability * 100.0
        ));
        lines.push(recommendation(evaluation));
        lines
    }
}

fn recommendation(evaluation: &ParlayEvaluation) -> String {
    match evaluation.verdict {
        Verdict::StrongValue => format!(
            "Recommendation: strong play. Contextual signals add {:.1} pts of hit probability over the market.",
            evaluation.value_score * 100.0
        ),
        Verdict::ModerateValue => format!(
            "Recommendation: playable. Signals add {:.1} pts over the market; size the stake accordingly.",
            evaluation.value_score * 100.0
        ),
        Verdict::Neutral => {
            "Recommendation: no clear edge. The price is roughly fair given the available signals.".to_string()
        }
        Verdict::HighRisk => format!(
            "Recommendation: proceed with caution. Signals cut {:.1} pts of hit probability versus the market.",
            evaluation.value_score.abs() * 100.0
        ),
    }
}

#[async_trait]
impl Commentator for RuleBasedCommentator {
    fn name(&self) -> &'static str {
        "rule_based"
    }

    async fn produce_commentary(&self, evaluation: &ParlayEvaluation) -> Result<String> {
        Ok(self.lines(evaluation).join("\n"))
    }
}
