//! ParlayAdvisor Library
//!
//! Evaluates multi-leg sports parlays: converts American odds into
//! probabilities, adjusts each leg with injury and head-to-head signals,
//! and turns the combined edge into a verdict with rationale.

pub mod cli;
pub mod common;
pub mod config;
pub mod engine;
pub mod reasoning;

// Re-export commonly used types
pub use common::errors::{AdvisorError, Result};
pub use common::types::{
    AdjustedLeg, Leg, LegMetadata, Parlay, ParlayEvaluation, Signal, SignalKind, Verdict,
};
pub use config::types::AppConfig;
pub use engine::{ParlayEvaluator, SignalSet};

// Commentary types
pub use reasoning::{
    build_commentator, BoxedCommentator, Commentator, FallbackCommentator, GeminiCommentator,
    RuleBasedCommentator,
};
