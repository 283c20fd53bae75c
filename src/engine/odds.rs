//! American odds conversions

use crate::common::errors::{AdvisorError, Result};

fn validate(odds: i32) -> Result<()> {
    if odds > -100 && odds < 100 {
        return Err(AdvisorError::InvalidOdds(odds));
    }
    Ok(())
}

/// Convert American odds into the implied probability (no bookmaker margin)
///
/// Favorites (`odds <= -100`) map into [0.5, 1), underdogs (`odds >= 100`)
/// into (0, 0.5].
pub fn implied_probability(odds: i32) -> Result<f64> {
    validate(odds)?;
    let odds = f64::from(odds);

    if odds < 0.0 {
        Ok(-odds / (-odds + 100.0))
    } else {
        Ok(100.0 / (odds + 100.0))
    }
}

/// Convert American odds into a decimal payout multiplier (stake included)
pub fn american_to_decimal(odds: i32) -> Result<f64> {
    validate(odds)?;
    let odds = f64::from(odds);

    if odds < 0.0 {
        Ok(1.0 + 100.0 / odds.abs())
    } else {
        Ok(1.0 + odds / 100.0)
    }
}

/// Convert a decimal payout multiplier back into American odds
///
/// The result is truncated toward zero.
pub fn decimal_to_american(decimal: f64) -> Result<i32> {
    if !decimal.is_finite() || decimal <= 1.0 {
        return Err(AdvisorError::InvalidOdds(0));
    }

    let american = if decimal >= 2.0 {
        (decimal - 1.0) * 100.0
    } else {
        -100.0 / (decimal - 1.0)
    };

    if american.abs() > f64::from(i32::MAX) {
        return Err(AdvisorError::InvalidOdds(0));
    }
    Ok(american as i32)
}
