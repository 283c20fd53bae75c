//! Domain types shared by the engine, the commentators and the CLI

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use tracing::warn;

use super::errors::{AdvisorError, Result};
use crate::engine::odds;

/// Lowest baseline probability accepted from callers before clamping
pub const BASELINE_FLOOR: f64 = 0.01;

/// Highest baseline probability accepted from callers before clamping
pub const BASELINE_CEILING: f64 = 0.99;

/// Optional keys used to correlate external signal data with a leg
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegMetadata {
    /// Player the leg is about (player props)
    #[serde(default)]
    pub player_name: Option<String>,
    /// Team the subject is playing against
    #[serde(default)]
    pub opponent_team: Option<String>,
}

/// One bet proposition within a parlay
///
/// Constructed through [`Leg::new`], which guarantees valid American odds.
/// A leg is never mutated after construction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Leg {
    id: String,
    description: String,
    odds: i32,
    market: String,
    team: Option<String>,
    baseline_probability: Option<f64>,
    metadata: LegMetadata,
}

impl Leg {
    /// Create a leg, rejecting odds outside the American odds domain
    pub fn new(
        id: impl Into<String>,
        description: impl Into<String>,
        odds: i32,
    ) -> Result<Self> {
        let id = id.into();
        odds::implied_probability(odds).map_err(|e| AdvisorError::for_leg(id.clone(), e))?;

        Ok(Self {
            id,
            description: description.into(),
            odds,
            market: "custom".to_string(),
            team: None,
            baseline_probability: None,
            metadata: LegMetadata::default(),
        })
    }

    /// Set the subject team code
    pub fn with_team(mut self, team: impl Into<String>) -> Self {
        self.team = Some(team.into());
        self
    }

    /// Set the market label (e.g. "player_pass_yds")
    pub fn with_market(mut self, market: impl Into<String>) -> Self {
        self.market = market.into();
        self
    }

    /// Set the caller's prior probability
    ///
    /// Values outside (0, 1) are clamped into [0.01, 0.99]. Non-finite
    /// values are discarded and the implied probability is used instead.
    pub fn with_baseline(mut self, probability: f64) -> Self {
        if !probability.is_finite() {
            warn!(leg_id = %self.id, "Ignoring non-finite baseline probability");
            self.baseline_probability = None;
            return self;
        }
        let clamped = probability.clamp(BASELINE_FLOOR, BASELINE_CEILING);
        if probability <= 0.0 || probability >= 1.0 {
            warn!(
                leg_id = %self.id,
                baseline = probability,
                clamped,
                "Baseline probability outside (0, 1), clamping"
            );
            self.baseline_probability = Some(clamped);
        } else {
            self.baseline_probability = Some(probability);
        }
        self
    }

    /// Set the signal correlation keys
    pub fn with_metadata(mut self, metadata: LegMetadata) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn odds(&self) -> i32 {
        self.odds
    }

    pub fn market(&self) -> &str {
        &self.market
    }

    pub fn team(&self) -> Option<&str> {
        self.team.as_deref()
    }

    pub fn baseline_probability(&self) -> Option<f64> {
        self.baseline_probability
    }

    pub fn metadata(&self) -> &LegMetadata {
        &self.metadata
    }

    /// Name of the player this leg is about, if any
    pub fn player_name(&self) -> Option<&str> {
        self.metadata.player_name.as_deref()
    }

    /// Opponent team code, if any
    pub fn opponent_team(&self) -> Option<&str> {
        self.metadata.opponent_team.as_deref()
    }

    /// Probability implied by the leg's odds
    pub fn implied_probability(&self) -> f64 {
        // Odds were validated in `Leg::new`
        odds::implied_probability(self.odds).unwrap_or(0.5)
    }
}

/// A parlay: ordered legs plus a single stake
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Parlay {
    legs: Vec<Leg>,
    stake: Decimal,
}

impl Parlay {
    /// Create a parlay, rejecting duplicate leg ids and non-positive stakes
    ///
    /// An empty leg list is accepted here; aggregation reports it.
    pub fn new(legs: Vec<Leg>, stake: Decimal) -> Result<Self> {
        if stake <= Decimal::ZERO {
            return Err(AdvisorError::InvalidStake(stake));
        }

        let mut seen = HashSet::with_capacity(legs.len());
        for leg in &legs {
            if !seen.insert(leg.id()) {
                return Err(AdvisorError::DuplicateLegId(leg.id().to_string()));
            }
        }

        Ok(Self { legs, stake })
    }

    pub fn legs(&self) -> &[Leg] {
        &self.legs
    }

    pub fn stake(&self) -> Decimal {
        self.stake
    }

    /// Return a copy with a different stake
    pub fn with_stake(&self, stake: Decimal) -> Result<Self> {
        Self::new(self.legs.clone(), stake)
    }

    /// Find a leg by id
    pub fn leg(&self, leg_id: &str) -> Option<&Leg> {
        self.legs.iter().find(|leg| leg.id() == leg_id)
    }
}

/// Source of a contextual adjustment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalKind {
    Injury,
    #[serde(alias = "historical", alias = "matchup")]
    HistoricalMatchup,
}

impl fmt::Display for SignalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SignalKind::Injury => write!(f, "injury"),
            SignalKind::HistoricalMatchup => write!(f, "historical matchup"),
        }
    }
}

fn default_confidence() -> f64 {
    1.0
}

/// A single normalized adjustment for one leg
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    pub kind: SignalKind,
    /// Signed strength, in probability units
    pub magnitude: f64,
    /// Reliability in [0, 1]
    #[serde(default = "default_confidence")]
    pub confidence: f64,
    /// Human-readable description of the underlying datum
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl Signal {
    pub fn new(kind: SignalKind, magnitude: f64) -> Self {
        Self {
            kind,
            magnitude,
            confidence: default_confidence(),
            detail: None,
        }
    }

    pub fn injury(magnitude: f64) -> Self {
        Self::new(SignalKind::Injury, magnitude)
    }

    pub fn matchup(magnitude: f64) -> Self {
        Self::new(SignalKind::HistoricalMatchup, magnitude)
    }

    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = confidence;
        self
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Confidence clamped to [0, 1]; non-finite confidence counts as zero
    pub fn effective_confidence(&self) -> f64 {
        if self.confidence.is_finite() {
            self.confidence.clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    /// Contribution of this signal to the adjusted probability
    pub fn delta(&self) -> f64 {
        self.magnitude * self.effective_confidence()
    }
}

/// Output of the leg adjuster for one leg
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdjustedLeg {
    pub leg_id: String,
    pub description: String,
    pub odds: i32,
    pub implied_probability: f64,
    pub baseline_probability: f64,
    pub adjusted_probability: f64,
    /// One entry per non-negligible signal, in application order
    pub rationale: Vec<String>,
}

impl AdjustedLeg {
    /// Probability edge over the market for this leg
    pub fn edge(&self) -> f64 {
        self.adjusted_probability - self.implied_probability
    }
}

/// Categorical value judgement for a parlay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    StrongValue,
    ModerateValue,
    Neutral,
    HighRisk,
}

impl Verdict {
    pub fn label(&self) -> &'static str {
        match self {
            Verdict::StrongValue => "Strong Value",
            Verdict::ModerateValue => "Moderate Value",
            Verdict::Neutral => "Neutral",
            Verdict::HighRisk => "High Risk",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Verdict {
    type Err = AdvisorError;

    fn from_str(s: &str) -> Result<Self> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();
        match normalized.as_str() {
            "strongvalue" | "strong" => Ok(Verdict::StrongValue),
            "moderatevalue" | "moderate" => Ok(Verdict::ModerateValue),
            "neutral" => Ok(Verdict::Neutral),
            "highrisk" => Ok(Verdict::HighRisk),
            _ => Err(AdvisorError::Configuration(format!(
                "unknown verdict '{}'",
                s
            ))),
        }
    }
}

/// Aggregate result of evaluating a parlay
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParlayEvaluation {
    /// Adjusted legs in the caller's order
    pub legs: Vec<AdjustedLeg>,
    pub combined_probability: f64,
    pub implied_combined_probability: f64,
    /// combined_probability - implied_combined_probability
    pub value_score: f64,
    /// Total return per unit stake if every leg wins
    pub payout_multiplier: f64,
    pub stake: Decimal,
    pub expected_value: Decimal,
    pub verdict: Verdict,
}

impl ParlayEvaluation {
    /// Net profit if every leg wins
    pub fn potential_payout(&self) -> Result<Decimal> {
        let profit = self.payout_multiplier - 1.0;
        let multiplier = Decimal::from_f64(profit)
            .ok_or_else(|| AdvisorError::Internal(format!("non-representable payout multiplier {}", profit)))?;
        let payout = self
            .stake
            .checked_mul(multiplier)
            .ok_or_else(|| AdvisorError::Internal(format!("potential payout overflow for stake {}", self.stake)))?;
        Ok(payout.round_dp(2))
    }

    /// Replace the classified verdict with a qualitative override
    pub fn with_verdict_override(mut self, verdict: Verdict) -> Self {
        if verdict != self.verdict {
            warn!(
                classified = %self.verdict,
                overridden = %verdict,
                "Verdict overridden"
            );
        }
        self.verdict = verdict;
        self
    }

    pub fn leg(&self, leg_id: &str) -> Option<&AdjustedLeg> {
        self.legs.iter().find(|leg| leg.leg_id == leg_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_leg_rejects_invalid_odds() {
        let err = Leg::new("a", "bad", 50).unwrap_err();
        match err {
            AdvisorError::LegRejected { leg_id, reason } => {
                assert_eq!(leg_id, "a");
                assert!(matches!(*reason, AdvisorError::InvalidOdds(50)));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_leg_clamps_baseline() {
        let leg = Leg::new("a", "", -110).unwrap().with_baseline(1.4);
        assert_eq!(leg.baseline_probability(), Some(BASELINE_CEILING));

        let leg = Leg::new("b", "", -110).unwrap().with_baseline(-0.2);
        assert_eq!(leg.baseline_probability(), Some(BASELINE_FLOOR));

        let leg = Leg::new("c", "", -110).unwrap().with_baseline(f64::NAN);
        assert_eq!(leg.baseline_probability(), None);
    }

    #[test]
    fn test_parlay_rejects_duplicate_ids() {
        let legs = vec![
            Leg::new("a", "", -110).unwrap(),
            Leg::new("a", "", 120).unwrap(),
        ];
        let err = Parlay::new(legs, dec!(10)).unwrap_err();
        assert!(matches!(err, AdvisorError::DuplicateLegId(id) if id == "a"));
    }

    #[test]
    fn test_parlay_rejects_non_positive_stake() {
        let legs = vec![Leg::new("a", "", -110).unwrap()];
        assert!(matches!(
            Parlay::new(legs, dec!(0)),
            Err(AdvisorError::InvalidStake(_))
        ));
    }

    #[test]
    fn test_signal_confidence_is_clamped() {
        assert_eq!(Signal::injury(0.1).with_confidence(3.0).delta(), 0.1);
        assert_eq!(Signal::injury(0.1).with_confidence(-1.0).delta(), 0.0);
        assert_eq!(Signal::injury(0.1).with_confidence(f64::NAN).delta(), 0.0);
    }

    #[test]
    fn test_signal_confidence_defaults_to_one() {
        let signal: Signal =
            serde_json::from_str(r#"{"kind": "injury", "magnitude": 0.12}"#).unwrap();
        assert_eq!(signal.confidence, 1.0);
        assert_eq!(signal.kind, SignalKind::Injury);
    }

    fn evaluation(payout_multiplier: f64, stake: Decimal) -> ParlayEvaluation {
        ParlayEvaluation {
            legs: Vec::new(),
            combined_probability: 0.25,
            implied_combined_probability: 0.25,
            value_score: 0.0,
            payout_multiplier,
            stake,
            expected_value: Decimal::ZERO,
            verdict: Verdict::Neutral,
        }
    }

    #[test]
    fn test_potential_payout() {
        assert_eq!(evaluation(4.0, dec!(10)).potential_payout().unwrap(), dec!(30));
    }

    #[test]
    fn test_potential_payout_failures_are_errors() {
        assert!(matches!(
            evaluation(1000.0, Decimal::MAX).potential_payout(),
            Err(AdvisorError::Internal(_))
        ));
        assert!(matches!(
            evaluation(f64::INFINITY, dec!(10)).potential_payout(),
            Err(AdvisorError::Internal(_))
        ));
    }

    #[test]
    fn test_verdict_parsing() {
        assert_eq!("Strong Value".parse::<Verdict>().unwrap(), Verdict::StrongValue);
        assert_eq!("high-risk".parse::<Verdict>().unwrap(), Verdict::HighRisk);
        assert_eq!("neutral".parse::<Verdict>().unwrap(), Verdict::Neutral);
        assert!("maybe".parse::<Verdict>().is_err());
    }
}
