//! End-to-end parlay evaluation pipeline

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, info};

use super::adjuster::{AdjustmentSettings, LegAdjuster};
use super::aggregator::ParlayAggregator;
use super::signals::{NormalizerSettings, RawSignal, SignalNormalizer};
use super::verdict::VerdictThresholds;
use crate::common::errors::{AdvisorError, Result};
use crate::common::types::{Parlay, ParlayEvaluation, Signal};

/// Every heuristic constant the engine uses
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineSettings {
    #[serde(default)]
    pub normalizer: NormalizerSettings,
    #[serde(default)]
    pub adjustment: AdjustmentSettings,
    #[serde(default)]
    pub verdict: VerdictThresholds,
}

impl EngineSettings {
    /// Reject settings that would break the engine's invariants
    pub fn validate(&self) -> Result<()> {
        let adj = &self.adjustment;
        let bounds_ok = adj.probability_floor > 0.0
            && adj.probability_ceiling < 1.0
            && adj.probability_floor < adj.probability_ceiling;
        if !bounds_ok {
            return Err(AdvisorError::Configuration(format!(
                "probability bounds must satisfy 0 < floor < ceiling < 1, got [{}, {}]",
                adj.probability_floor, adj.probability_ceiling
            )));
        }
        if adj.negligible_delta < 0.0 || adj.minor_below > adj.moderate_below {
            return Err(AdvisorError::Configuration(
                "rationale thresholds must be non-negative and ordered".to_string(),
            ));
        }

        let v = &self.verdict;
        if !(v.high_risk < v.moderate_value && v.moderate_value <= v.strong_value) {
            return Err(AdvisorError::Configuration(format!(
                "verdict thresholds must satisfy high_risk < moderate_value <= strong_value, got {} / {} / {}",
                v.high_risk, v.moderate_value, v.strong_value
            )));
        }

        let n = &self.normalizer;
        let factors = [
            n.injury_base_magnitude,
            n.doubtful_factor,
            n.questionable_factor,
            n.teammate_factor,
            n.historical_scale,
        ];
        if factors.iter().any(|f| !f.is_finite() || *f < 0.0) {
            return Err(AdvisorError::Configuration(
                "normalizer magnitudes must be finite and non-negative".to_string(),
            ));
        }
        Ok(())
    }
}

/// Normalized signals keyed by leg id
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SignalSet {
    by_leg: HashMap<String, Vec<Signal>>,
}

impl SignalSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a signal for a leg, after any already present
    pub fn push(&mut self, leg_id: impl Into<String>, signal: Signal) {
        self.by_leg.entry(leg_id.into()).or_default().push(signal);
    }

    /// Append several signals for a leg, keeping their order
    pub fn extend(&mut self, leg_id: impl Into<String>, signals: impl IntoIterator<Item = Signal>) {
        self.by_leg.entry(leg_id.into()).or_default().extend(signals);
    }

    /// Signals for a leg; empty when none were supplied
    pub fn for_leg(&self, leg_id: &str) -> &[Signal] {
        self.by_leg.get(leg_id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn leg_ids(&self) -> impl Iterator<Item = &str> {
        self.by_leg.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.by_leg.values().all(Vec::is_empty)
    }
}

/// Runs normalizer, adjuster, aggregator and classifier over a parlay
#[derive(Debug, Clone, Default)]
pub struct ParlayEvaluator {
    normalizer: SignalNormalizer,
    adjuster: LegAdjuster,
    aggregator: ParlayAggregator,
}

impl ParlayEvaluator {
    pub fn new(settings: EngineSettings) -> Self {
        Self {
            normalizer: SignalNormalizer::new(settings.normalizer),
            adjuster: LegAdjuster::new(settings.adjustment),
            aggregator: ParlayAggregator::new(settings.verdict),
        }
    }

    pub fn normalizer(&self) -> &SignalNormalizer {
        &self.normalizer
    }

    pub fn adjuster(&self) -> &LegAdjuster {
        &self.adjuster
    }

    /// Normalize provider records for every leg of the parlay
    pub fn normalize_records(&self, parlay: &Parlay, records: &[RawSignal]) -> SignalSet {
        let mut set = SignalSet::new();
        for leg in parlay.legs() {
            let signals = self.normalizer.normalize(records, leg);
            if !signals.is_empty() {
                set.extend(leg.id(), signals);
            }
        }
        set
    }

    /// Evaluate a parlay with already-normalized signals
    ///
    /// Legs without an entry in `signals` are evaluated with zero signals.
    pub fn evaluate(&self, parlay: &Parlay, signals: &SignalSet) -> Result<ParlayEvaluation> {
        for leg_id in signals.leg_ids() {
            if parlay.leg(leg_id).is_none() {
                debug!(leg_id, "Dropping signals for unknown leg");
            }
        }

        let adjusted: Vec<_> = parlay
            .legs()
            .iter()
            .map(|leg| self.adjuster.adjust(leg, signals.for_leg(leg.id())))
            .collect();

        let evaluation = self.aggregator.aggregate(adjusted, parlay.stake())?;
        info!(
            legs = evaluation.legs.len(),
            value_score = evaluation.value_score,
            expected_value = %evaluation.expected_value,
            verdict = %evaluation.verdict,
            "Parlay evaluated"
        );
        Ok(evaluation)
    }

    /// Normalize provider records, then evaluate
    pub fn evaluate_records(&self, parlay: &Parlay, records: &[RawSignal]) -> Result<ParlayEvaluation> {
        let signals = self.normalize_records(parlay, records);
        self.evaluate(parlay, &signals)
    }
}
