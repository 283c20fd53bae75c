//! Per-leg probability adjustment

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::common::types::{AdjustedLeg, Leg, Signal};

/// Thresholds and clamp bounds used by the [`LegAdjuster`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdjustmentSettings {
    /// Signals with |delta| at or below this are applied but not explained
    #[serde(default = "default_negligible_delta")]
    pub negligible_delta: f64,
    /// |delta| below this is a minor effect
    #[serde(default = "default_minor_below")]
    pub minor_below: f64,
    /// |delta| below this (and not minor) is a moderate effect
    #[serde(default = "default_moderate_below")]
    pub moderate_below: f64,
    #[serde(default = "default_probability_floor")]
    pub probability_floor: f64,
    #[serde(default = "default_probability_ceiling")]
    pub probability_ceiling: f64,
}

impl Default for AdjustmentSettings {
    fn default() -> Self {
        Self {
            negligible_delta: default_negligible_delta(),
            minor_below: default_minor_below(),
            moderate_below: default_moderate_below(),
            probability_floor: default_probability_floor(),
            probability_ceiling: default_probability_ceiling(),
        }
    }
}

fn default_negligible_delta() -> f64 {
    0.005
}

fn default_minor_below() -> f64 {
    0.03
}

fn default_moderate_below() -> f64 {
    0.08
}

fn default_probability_floor() -> f64 {
    0.01
}

fn default_probability_ceiling() -> f64 {
    0.99
}

/// Size bucket of a single signal's effect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectSize {
    Minor,
    Moderate,
    Major,
}

impl EffectSize {
    pub fn label(&self) -> &'static str {
        match self {
            EffectSize::Minor => "minor",
            EffectSize::Moderate => "moderate",
            EffectSize::Major => "major",
        }
    }
}

/// Applies normalized signals to a leg's baseline probability
#[derive(Debug, Clone, Default)]
pub struct LegAdjuster {
    settings: AdjustmentSettings,
}

impl LegAdjuster {
    pub fn new(settings: AdjustmentSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &AdjustmentSettings {
        &self.settings
    }

    /// Bucket an absolute delta into minor/moderate/major
    pub fn effect_size(&self, delta: f64) -> EffectSize {
        let magnitude = delta.abs();
        if magnitude < self.settings.minor_below {
            EffectSize::Minor
        } else if magnitude < self.settings.moderate_below {
            EffectSize::Moderate
        } else {
            EffectSize::Major
        }
    }

    /// Adjust one leg
    ///
    /// Starts from the leg's baseline (or implied probability), adds
    /// `magnitude * confidence` for every signal in order and clamps the sum
    /// into `[probability_floor, probability_ceiling]`. With no signals an
    /// in-range baseline is returned untouched.
    pub fn adjust(&self, leg: &Leg, signals: &[Signal]) -> AdjustedLeg {
        let implied_probability = leg.implied_probability();
        let baseline_probability = leg.baseline_probability().unwrap_or(implied_probability);

        let mut raw = baseline_probability;
        let mut rationale = Vec::new();

        for signal in signals {
            let delta = signal.delta();
            if !delta.is_finite() {
                warn!(leg_id = leg.id(), kind = %signal.kind, "Skipping non-finite signal");
                continue;
            }
            raw += delta;

            if delta.abs() > self.settings.negligible_delta {
                rationale.push(self.describe(signal, delta));
            }
        }

        let adjusted_probability =
            raw.clamp(self.settings.probability_floor, self.settings.probability_ceiling);

        if adjusted_probability != raw {
            debug!(leg_id = leg.id(), raw, adjusted_probability, "Clamped adjusted probability");
        }
        debug!(
            leg_id = leg.id(),
            implied_probability,
            baseline_probability,
            adjusted_probability,
            signals = signals.len(),
            "Adjusted leg"
        );

        AdjustedLeg {
            leg_id: leg.id().to_string(),
            description: leg.description().to_string(),
            odds: leg.odds(),
            implied_probability,
            baseline_probability,
            adjusted_probability,
            rationale,
        }
    }

    fn describe(&self, signal: &Signal, delta: f64) -> String {
        let direction = if delta > 0.0 { "boosts" } else { "lowers" };
        let mut text = format!(
            "{} {} effect {} probability by {:.1} pts",
            self.effect_size(delta).label(),
            signal.kind,
            direction,
            delta.abs() * 100.0
        );
        if let Some(detail) = &signal.detail {
            text.push_str(": ");
            text.push_str(detail);
        }
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn leg(baseline: Option<f64>) -> Leg {
        let leg = Leg::new("l1", "Chiefs ML", -110).unwrap();
        match baseline {
            Some(p) => leg.with_baseline(p),
            None => leg,
        }
    }

    #[test]
    fn test_no_signals_keeps_baseline_exactly() {
        let adjuster = LegAdjuster::default();
        let adjusted = adjuster.adjust(&leg(Some(0.57)), &[]);
        assert_eq!(adjusted.adjusted_probability, 0.57);
        assert!(adjusted.rationale.is_empty());

        let adjusted = adjuster.adjust(&leg(None), &[]);
        assert_eq!(adjusted.adjusted_probability, adjusted.implied_probability);
        assert_eq!(adjusted.baseline_probability, adjusted.implied_probability);
    }

    #[test]
    fn test_heavy_favorite_without_signals_is_still_bounded() {
        let adjuster = LegAdjuster::default();
        let leg = Leg::new("lock", "Heavy favorite", -20000).unwrap();
        let adjusted = adjuster.adjust(&leg, &[]);
        assert!(adjusted.implied_probability > 0.99);
        assert_eq!(adjusted.adjusted_probability, 0.99);
    }

    #[test]
    fn test_major_injury_boost() {
        let adjuster = LegAdjuster::default();
        let adjusted = adjuster.adjust(&leg(Some(0.50)), &[Signal::injury(0.12)]);
        assert!((adjusted.adjusted_probability - 0.62).abs() < 1e-12);
        assert_eq!(adjusted.rationale.len(), 1);
        assert!(adjusted.rationale[0].starts_with("major injury effect boosts"));
    }

    #[test]
    fn test_extreme_deltas_are_clamped() {
        let adjuster = LegAdjuster::default();
        let up = adjuster.adjust(&leg(Some(0.5)), &[Signal::injury(5.0), Signal::matchup(0.5)]);
        assert_eq!(up.adjusted_probability, 0.99);

        let down = adjuster.adjust(&leg(Some(0.5)), &[Signal::injury(-3.0)]);
        assert_eq!(down.adjusted_probability, 0.01);
    }

    #[test]
    fn test_negligible_signals_applied_but_unexplained() {
        let adjuster = LegAdjuster::default();
        let adjusted = adjuster.adjust(
            &leg(Some(0.5)),
            &[Signal::matchup(0.004), Signal::injury(-0.05)],
        );
        assert!((adjusted.adjusted_probability - 0.454).abs() < 1e-12);
        assert_eq!(adjusted.rationale.len(), 1);
        assert!(adjusted.rationale[0].starts_with("moderate injury effect lowers"));
    }

    #[test]
    fn test_delta_at_negligible_threshold_is_unexplained() {
        let adjuster = LegAdjuster::default();
        let adjusted = adjuster.adjust(&leg(Some(0.5)), &[Signal::matchup(0.005)]);
        assert!((adjusted.adjusted_probability - 0.505).abs() < 1e-12);
        assert!(adjusted.rationale.is_empty());
    }

    #[test]
    fn test_confidence_scales_delta() {
        let adjuster = LegAdjuster::default();
        let adjusted = adjuster.adjust(
            &leg(Some(0.5)),
            &[Signal::matchup(0.04).with_confidence(0.5).with_detail("KC 7-3 against BUF")],
        );
        assert!((adjusted.adjusted_probability - 0.52).abs() < 1e-12);
        assert_eq!(
            adjusted.rationale,
            vec!["minor historical matchup effect boosts probability by 2.0 pts: KC 7-3 against BUF".to_string()]
        );
    }

    #[test]
    fn test_effect_size_buckets() {
        let adjuster = LegAdjuster::default();
        assert_eq!(adjuster.effect_size(0.029), EffectSize::Minor);
        assert_eq!(adjuster.effect_size(-0.03), EffectSize::Moderate);
        assert_eq!(adjuster.effect_size(0.079), EffectSize::Moderate);
        assert_eq!(adjuster.effect_size(0.08), EffectSize::Major);
    }
}
