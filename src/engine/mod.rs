//! Probability adjustment and parlay evaluation engine
//!
//! Pure, synchronous computation over in-memory values. Nothing in this
//! module performs I/O or reads the environment.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────┐   ┌──────────────────────────────┐
//! │  odds                        │   │  signals                     │
//! │    American odds → implied   │   │    injury / matchup records  │
//! │    probability, payout       │   │    → bounded Signal deltas   │
//! └──────────────┬───────────────┘   └──────────────┬───────────────┘
//!                │                                  │
//!                ▼                                  ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  adjuster (one call per leg)                                    │
//! │    baseline + Σ magnitude × confidence, clamped to [0.01, 0.99] │
//! │    rationale for every non-negligible signal                    │
//! └──────────────────────────────┬──────────────────────────────────┘
//!                                ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  aggregator                                                     │
//! │    product of probabilities, value score, payout, EV            │
//! └──────────────────────────────┬──────────────────────────────────┘
//!                                ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  verdict                                                        │
//! │    value score → Strong Value / Moderate Value / Neutral /      │
//! │    High Risk                                                    │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use parlay_advisor::engine::{ParlayEvaluator, SignalSet};
//! use parlay_advisor::{Leg, Parlay, Signal, Verdict};
//! use rust_decimal_macros::dec;
//!
//! let parlay = Parlay::new(
//!     vec![
//!         Leg::new("1", "Chiefs ML", -115).unwrap(),
//!         Leg::new("2", "Bills +3.5", 110).unwrap(),
//!     ],
//!     dec!(25),
//! )
//! .unwrap();
//!
//! let mut signals = SignalSet::new();
//! signals.push("1", Signal::injury(0.04));
//!
//! let evaluation = ParlayEvaluator::default().evaluate(&parlay, &signals).unwrap();
//! assert!(evaluation.value_score > 0.0);
//! assert_eq!(evaluation.verdict, Verdict::Neutral);
//! ```

pub mod adjuster;
pub mod aggregator;
pub mod evaluator;
pub mod odds;
pub mod signals;
pub mod verdict;

pub use adjuster::{AdjustmentSettings, EffectSize, LegAdjuster};
pub use aggregator::{aggregate, expected_value, ParlayAggregator};
pub use evaluator::{EngineSettings, ParlayEvaluator, SignalSet};
pub use odds::{american_to_decimal, decimal_to_american, implied_probability};
pub use signals::{
    InjuryRecord, InjuryStatus, MatchupRecord, NormalizerSettings, RawSignal, SignalNormalizer,
};
pub use verdict::{classify, VerdictThresholds};
