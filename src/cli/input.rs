//! JSON input documents for the command-line tool

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

use crate::common::errors::Result;
use crate::common::types::{Leg, LegMetadata, Parlay, Signal};
use crate::engine::{ParlayEvaluator, RawSignal, SignalSet};

fn default_market() -> String {
    "custom".to_string()
}

/// One leg as written in a parlay file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LegEntry {
    pub id: String,
    pub description: String,
    pub odds: i32,
    #[serde(default = "default_market")]
    pub market: String,
    #[serde(default)]
    pub team: Option<String>,
    #[serde(default)]
    pub baseline_probability: Option<f64>,
    #[serde(default)]
    pub metadata: LegMetadata,
}

impl LegEntry {
    pub fn into_leg(self) -> Result<Leg> {
        let mut leg = Leg::new(self.id, self.description, self.odds)?
            .with_market(self.market)
            .with_metadata(self.metadata);
        if let Some(team) = self.team {
            leg = leg.with_team(team);
        }
        if let Some(p) = self.baseline_probability {
            leg = leg.with_baseline(p);
        }
        Ok(leg)
    }
}

/// A parlay file: `{ "stake": 25, "legs": [...] }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParlayDocument {
    #[serde(default)]
    pub stake: Option<Decimal>,
    pub legs: Vec<LegEntry>,
}

impl ParlayDocument {
    /// Build a parlay; `stake_override` wins over the file, which wins over `default_stake`
    pub fn into_parlay(self, stake_override: Option<Decimal>, default_stake: Decimal) -> Result<Parlay> {
        let stake = stake_override.or(self.stake).unwrap_or(default_stake);
        let legs = self
            .legs
            .into_iter()
            .map(LegEntry::into_leg)
            .collect::<Result<Vec<_>>>()?;
        Parlay::new(legs, stake)
    }
}

/// Pre-normalized signals for one leg
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LegSignals {
    pub leg_id: String,
    #[serde(default)]
    pub signals: Vec<Signal>,
}

/// A signals file holding collaborator output
///
/// `records` are raw provider records that still need normalizing;
/// `signals` are already-normalized per-leg signals.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SignalDocument {
    #[serde(default)]
    pub records: Vec<RawSignal>,
    #[serde(default)]
    pub signals: Vec<LegSignals>,
}

impl SignalDocument {
    /// Normalize raw records per leg, then append pre-normalized signals
    pub fn into_signal_set(self, evaluator: &ParlayEvaluator, parlay: &Parlay) -> SignalSet {
        let mut set = evaluator.normalize_records(parlay, &self.records);
        for entry in self.signals {
            set.extend(entry.leg_id, entry.signals);
        }
        set
    }
}

/// Read and parse a parlay file
pub fn load_parlay_document(path: &Path) -> Result<ParlayDocument> {
    let text = std::fs::read_to_string(path)?;
    let document: ParlayDocument = serde_json::from_str(&text)?;
    debug!(path = %path.display(), legs = document.legs.len(), "Loaded parlay file");
    Ok(document)
}

/// Read and parse a signals file
pub fn load_signal_document(path: &Path) -> Result<SignalDocument> {
    let text = std::fs::read_to_string(path)?;
    let document: SignalDocument = serde_json::from_str(&text)?;
    debug!(
        path = %path.display(),
        records = document.records.len(),
        legs = document.signals.len(),
        "Loaded signals file"
    );
    Ok(document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::errors::AdvisorError;
    use rust_decimal_macros::dec;

    const PARLAY: &str = r#"{
        "stake": 25,
        "legs": [
            {"id": "1", "description": "Mahomes over 275.5 yds", "odds": -115, "team": "KC",
             "market": "player_pass_yds",
             "metadata": {"player_name": "Patrick Mahomes", "opponent_team": "BUF"}},
            {"id": "2", "description": "Bills +3.5", "odds": 110, "baseline_probability": 0.52}
        ]
    }"#;

    #[test]
    fn test_parlay_document() {
        let document: ParlayDocument = serde_json::from_str(PARLAY).unwrap();
        let parlay = document.into_parlay(None, dec!(1)).unwrap();
        assert_eq!(parlay.stake(), dec!(25));
        assert_eq!(parlay.legs()[0].market(), "player_pass_yds");
        assert_eq!(parlay.legs()[0].opponent_team(), Some("BUF"));
        assert_eq!(parlay.legs()[1].market(), "custom");
        assert_eq!(parlay.legs()[1].baseline_probability(), Some(0.52));
    }

    #[test]
    fn test_stake_precedence() {
        let document: ParlayDocument =
            serde_json::from_str(r#"{"legs": [{"id": "1", "description": "", "odds": 100}]}"#).unwrap();
        assert_eq!(document.clone().into_parlay(None, dec!(3)).unwrap().stake(), dec!(3));
        assert_eq!(document.into_parlay(Some(dec!(9)), dec!(3)).unwrap().stake(), dec!(9));
    }

    #[test]
    fn test_invalid_leg_names_the_leg() {
        let document: ParlayDocument = serde_json::from_str(
            r#"{"legs": [{"id": "ok", "description": "", "odds": 100}, {"id": "bad", "description": "", "odds": 0}]}"#,
        )
        .unwrap();
        let err = document.into_parlay(None, dec!(1)).unwrap_err();
        assert!(matches!(err, AdvisorError::LegRejected { ref leg_id, .. } if leg_id == "bad"));
    }

    #[test]
    fn test_signal_document_merges_records_and_signals() {
        let parlay = serde_json::from_str::<ParlayDocument>(PARLAY)
            .unwrap()
            .into_parlay(None, dec!(1))
            .unwrap();
        let document: SignalDocument = serde_json::from_str(
            r#"{
                "records": [{"kind": "injury", "player": "T. White", "team": "BUF", "position": "CB", "status": "Out"}],
                "signals": [{"leg_id": "1", "signals": [{"kind": "historical_matchup", "magnitude": 0.02}]}]
            }"#,
        )
        .unwrap();

        let set = document.into_signal_set(&ParlayEvaluator::default(), &parlay);
        let leg_signals = set.for_leg("1");
        assert_eq!(leg_signals.len(), 2);
        assert!((leg_signals[0].magnitude - 0.12).abs() < 1e-12);
        assert_eq!(leg_signals[1].magnitude, 0.02);
        assert!(set.for_leg("2").is_empty());
    }
}
