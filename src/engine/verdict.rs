//! Value score to verdict classification

use serde::{Deserialize, Serialize};

use crate::common::types::Verdict;

/// Value-score boundaries between verdicts
///
/// `strong_value` and `moderate_value` are inclusive lower bounds,
/// `high_risk` is an inclusive upper bound. Everything strictly between
/// `high_risk` and `moderate_value` is neutral.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerdictThresholds {
    #[serde(default = "default_strong_value")]
    pub strong_value: f64,
    #[serde(default = "default_moderate_value")]
    pub moderate_value: f64,
    #[serde(default = "default_high_risk")]
    pub high_risk: f64,
}

impl Default for VerdictThresholds {
    fn default() -> Self {
        Self {
            strong_value: default_strong_value(),
            moderate_value: default_moderate_value(),
            high_risk: default_high_risk(),
        }
    }
}

fn default_strong_value() -> f64 {
    0.15
}

fn default_moderate_value() -> f64 {
    0.05
}

fn default_high_risk() -> f64 {
    -0.05
}

impl VerdictThresholds {
    /// Map a value score to a verdict
    pub fn classify(&self, value_score: f64) -> Verdict {
        if value_score >= self.strong_value {
            Verdict::StrongValue
        } else if value_score >= self.moderate_value {
            Verdict::ModerateValue
        } else if value_score <= self.high_risk {
            Verdict::HighRisk
        } else {
            Verdict::Neutral
        }
    }

    /// Classify, letting a qualitative override win when present
    pub fn resolve(&self, value_score: f64, override_verdict: Option<Verdict>) -> Verdict {
        override_verdict.unwrap_or_else(|| self.classify(value_score))
    }
}

/// Classify with the default thresholds
pub fn classify(value_score: f64) -> Verdict {
    VerdictThresholds::default().classify(value_score)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundaries() {
        assert_eq!(classify(0.15), Verdict::StrongValue);
        assert_eq!(classify(0.149999), Verdict::ModerateValue);
        assert_eq!(classify(0.05), Verdict::ModerateValue);
        assert_eq!(classify(0.049999), Verdict::Neutral);
        assert_eq!(classify(0.0), Verdict::Neutral);
        assert_eq!(classify(-0.049999), Verdict::Neutral);
        assert_eq!(classify(-0.05), Verdict::HighRisk);
        assert_eq!(classify(-0.4), Verdict::HighRisk);
    }

    #[test]
    fn test_custom_thresholds() {
        let thresholds = VerdictThresholds {
            strong_value: 0.2,
            moderate_value: 0.1,
            high_risk: -0.1,
        };
        assert_eq!(thresholds.classify(0.15), Verdict::ModerateValue);
        assert_eq!(thresholds.classify(-0.07), Verdict::Neutral);
    }

    #[test]
    fn test_override_wins() {
        let thresholds = VerdictThresholds::default();
        assert_eq!(
            thresholds.resolve(0.3, Some(Verdict::HighRisk)),
            Verdict::HighRisk
        );
        assert_eq!(thresholds.resolve(0.3, None), Verdict::StrongValue);
    }
}
