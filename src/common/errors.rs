//! Error types for the application

use rust_decimal::Decimal;
use thiserror::Error;

/// Result type alias using our AdvisorError
pub type Result<T> = std::result::Result<T, AdvisorError>;

/// Main error type for parlay evaluation
#[derive(Error, Debug)]
pub enum AdvisorError {
    /// Odds outside the American odds domain (zero or magnitude below 100)
    #[error("Invalid American odds {0}: must be <= -100 or >= 100")]
    InvalidOdds(i32),

    /// Aggregation was asked to combine zero legs
    #[error("Parlay has no legs")]
    EmptyParlay,

    /// Stake must be strictly positive
    #[error("Invalid stake {0}: must be positive")]
    InvalidStake(Decimal),

    /// Two legs share the same identifier
    #[error("Duplicate leg id: {0}")]
    DuplicateLegId(String),

    /// A specific leg failed validation
    #[error("Leg '{leg_id}' rejected: {reason}")]
    LegRejected {
        leg_id: String,
        #[source]
        reason: Box<AdvisorError>,
    },

    /// HTTP request errors
    #[error("HTTP request error: {0}")]
    HttpRequest(#[from] reqwest::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON parsing error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// File access errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid API response
    #[error("Invalid API response: {0}")]
    InvalidResponse(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Commentary generation errors
    #[error("Reasoning error: {0}")]
    Reasoning(String),

    /// Generic internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AdvisorError {
    /// Attach the offending leg id to an error
    pub fn for_leg(leg_id: impl Into<String>, reason: AdvisorError) -> Self {
        AdvisorError::LegRejected {
            leg_id: leg_id.into(),
            reason: Box::new(reason),
        }
    }
}

impl From<url::ParseError> for AdvisorError {
    fn from(err: url::ParseError) -> Self {
        AdvisorError::Configuration(format!("invalid URL: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leg_rejection_names_leg_and_reason() {
        let err = AdvisorError::for_leg("leg-2", AdvisorError::InvalidOdds(50));
        let message = err.to_string();
        assert!(message.contains("leg-2"));
        assert!(message.contains("Invalid American odds 50"));
    }
}
