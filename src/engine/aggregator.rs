//! Parlay-level aggregation
//!
//! Legs are combined under an independence assumption: legs sharing a game
//! or a player are not treated as correlated.

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use tracing::debug;

use super::odds::american_to_decimal;
use super::verdict::VerdictThresholds;
use crate::common::errors::{AdvisorError, Result};
use crate::common::types::{AdjustedLeg, ParlayEvaluation};

/// Decimal places kept on the expected value
const EV_DECIMAL_PLACES: u32 = 4;

/// Combines adjusted legs into a [`ParlayEvaluation`]
#[derive(Debug, Clone, Default)]
pub struct ParlayAggregator {
    thresholds: VerdictThresholds,
}

impl ParlayAggregator {
    pub fn new(thresholds: VerdictThresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &VerdictThresholds {
        &self.thresholds
    }

    /// Aggregate a non-empty, ordered list of adjusted legs
    pub fn aggregate(&self, adjusted_legs: Vec<AdjustedLeg>, stake: Decimal) -> Result<ParlayEvaluation> {
        if adjusted_legs.is_empty() {
            return Err(AdvisorError::EmptyParlay);
        }
        if stake <= Decimal::ZERO {
            return Err(AdvisorError::InvalidStake(stake));
        }

        let combined_probability: f64 = adjusted_legs.iter().map(|l| l.adjusted_probability).product();
        let implied_combined_probability: f64 =
            adjusted_legs.iter().map(|l| l.implied_probability).product();
        let value_score = combined_probability - implied_combined_probability;

        let mut payout_multiplier = 1.0;
        for leg in &adjusted_legs {
            payout_multiplier *= american_to_decimal(leg.odds)
                .map_err(|e| AdvisorError::for_leg(leg.leg_id.clone(), e))?;
        }

        let expected_value = expected_value(combined_probability, payout_multiplier, stake)?;
        let verdict = self.thresholds.classify(value_score);

        debug!(
            legs = adjusted_legs.len(),
            combined_probability,
            implied_combined_probability,
            value_score,
            payout_multiplier,
            %expected_value,
            %verdict,
            "Aggregated parlay"
        );

        Ok(ParlayEvaluation {
            legs: adjusted_legs,
            combined_probability,
            implied_combined_probability,
            value_score,
            payout_multiplier,
            stake,
            expected_value,
            verdict,
        })
    }
}

/// Expected profit of an all-or-nothing wager
///
/// `stake * (probability * payout_multiplier - 1)`
pub fn expected_value(probability: f64, payout_multiplier: f64, stake: Decimal) -> Result<Decimal> {
    let edge = probability * payout_multiplier - 1.0;
    let edge = Decimal::from_f64(edge)
        .ok_or_else(|| AdvisorError::Internal(format!("non-representable expected value edge {}", edge)))?;
    let ev = stake
        .checked_mul(edge)
        .ok_or_else(|| AdvisorError::Internal(format!("expected value overflow for stake {}", stake)))?;
    Ok(ev.round_dp(EV_DECIMAL_PLACES).normalize())
}

/// Aggregate with the default verdict thresholds
pub fn aggregate(adjusted_legs: Vec<AdjustedLeg>, stake: Decimal) -> Result<ParlayEvaluation> {
    ParlayAggregator::default().aggregate(adjusted_legs, stake)
}
