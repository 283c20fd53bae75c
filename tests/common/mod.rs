//! Common test utilities and fixtures

#![allow(dead_code)]

use parlay_advisor::engine::{InjuryRecord, InjuryStatus, MatchupRecord, RawSignal};
use parlay_advisor::{Leg, LegMetadata, Parlay};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Two legs, -115 and +110, no baselines
pub fn two_leg_parlay(stake: Decimal) -> Parlay {
    Parlay::new(
        vec![
            Leg::new("1", "Chiefs moneyline", -115).unwrap(),
            Leg::new("2", "Bills +3.5", 110).unwrap(),
        ],
        stake,
    )
    .unwrap()
}

/// A player prop leg with correlation metadata
pub fn mahomes_prop() -> Leg {
    Leg::new("mahomes-yds", "Patrick Mahomes over 275.5 passing yards", -115)
        .unwrap()
        .with_team("KC")
        .with_market("player_pass_yds")
        .with_baseline(0.50)
        .with_metadata(LegMetadata {
            player_name: Some("Patrick Mahomes".to_string()),
            opponent_team: Some("BUF".to_string()),
        })
}

/// A spread leg for the other side of the same game
pub fn bills_spread() -> Leg {
    Leg::new("bills-spread", "Bills +3.5", 110)
        .unwrap()
        .with_team("BUF")
        .with_metadata(LegMetadata {
            player_name: None,
            opponent_team: Some("KC".to_string()),
        })
}

pub fn prop_parlay() -> Parlay {
    Parlay::new(vec![mahomes_prop(), bills_spread()], dec!(25)).unwrap()
}

/// Injury and matchup feed covering both legs of [`prop_parlay`]
pub fn sample_records() -> Vec<RawSignal> {
    vec![
        RawSignal::Matchup(MatchupRecord::with_record("KC", "BUF", 7, 3)),
        RawSignal::Injury(InjuryRecord::new("T. White", "BUF", "CB", InjuryStatus::Out)),
        RawSignal::Injury(InjuryRecord::new("J. Cook", "BUF", "RB", InjuryStatus::Questionable)),
        RawSignal::Injury(InjuryRecord::new("Someone Else", "NYJ", "LB", InjuryStatus::Out)),
    ]
}

/// Sample JSON documents for the CLI input layer
pub mod documents {
    pub const PARLAY: &str = r#"{
        "stake": 25,
        "legs": [
            {"id": "1", "description": "Chiefs moneyline", "odds": -115},
            {"id": "2", "description": "Bills +3.5", "odds": 110}
        ]
    }"#;

    pub const SIGNALS: &str = r#"{
        "signals": [
            {"leg_id": "1", "signals": [{"kind": "injury", "magnitude": 0.12, "confidence": 1.0}]}
        ]
    }"#;
}
