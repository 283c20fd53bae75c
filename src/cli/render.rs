//! Plain-text report for an evaluation

use std::fmt::Write as _;

use crate::common::types::ParlayEvaluation;

const DESCRIPTION_WIDTH: usize = 40;

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let kept: String = text.chars().take(width.saturating_sub(3)).collect();
    format!("{}...", kept)
}

/// Leg table followed by the summary block
pub fn render_report(evaluation: &ParlayEvaluation) -> String {
    let mut out = String::new();
    let rule = "=".repeat(80);

    let _ = writeln!(out, "{}", rule);
    let _ = writeln!(out, "Parlay Evaluation");
    let _ = writeln!(out, "{}", rule);

    let header = format!(
        "{:<8} {:<width$} {:>7} {:>10} {:>10}",
        "Leg ID",
        "Description",
        "Odds",
        "Implied",
        "Adjusted",
        width = DESCRIPTION_WIDTH
    );
    let _ = writeln!(out, "{}", header);
    let _ = writeln!(out, "{}", "-".repeat(header.len()));

    for leg in &evaluation.legs {
        let _ = writeln!(
            out,
            "{:<8} {:<width$} {:>+7} {:>9.2}% {:>9.2}%",
            leg.leg_id,
            truncate(&leg.description, DESCRIPTION_WIDTH),
            leg.odds,
            leg.implied_probability * 100.0,
            leg.adjusted_probability * 100.0,
            width = DESCRIPTION_WIDTH
        );
        for note in &leg.rationale {
            let _ = writeln!(out, "         - {}", note);
        }
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Overall Verdict:          {}", evaluation.verdict);
    let _ = writeln!(out, "Value Score:              {:+.4}", evaluation.value_score);
    let _ = writeln!(
        out,
        "Combined Hit Probability: {:.2}%",
        evaluation.combined_probability * 100.0
    );
    let _ = writeln!(
        out,
        "Market Implied:           {:.2}%",
        evaluation.implied_combined_probability * 100.0
    );
    let _ = writeln!(out, "Payout Multiplier:        {:.3}x", evaluation.payout_multiplier);
    let _ = writeln!(out, "Stake:                    ${:.2}", evaluation.stake);
    match evaluation.potential_payout() {
        Ok(payout) => {
            let _ = writeln!(out, "Potential Payout:         ${:.2}", payout);
        }
        Err(_) => {
            let _ = writeln!(out, "Potential Payout:         n/a");
        }
    }
    let _ = writeln!(out, "Expected Value:           ${:.2}", evaluation.expected_value);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::types::{Leg, Parlay};
    use crate::engine::{ParlayEvaluator, SignalSet};
    use rust_decimal_macros::dec;

    #[test]
    fn test_report_rows_and_summary() {
        let parlay = Parlay::new(
            vec![
                Leg::new("1", "A very long description that will not fit in the table column", -115)
                    .unwrap(),
                Leg::new("2", "Bills +3.5", 110).unwrap(),
            ],
            dec!(25),
        )
        .unwrap();
        let evaluation = ParlayEvaluator::default()
            .evaluate(&parlay, &SignalSet::new())
            .unwrap();

        let report = render_report(&evaluation);
        assert!(report.contains("A very long description that will not..."));
        assert!(report.contains("Bills +3.5"));
        assert!(report.contains("   -115"));
        assert!(report.contains("Overall Verdict:          Neutral"));
        assert!(report.contains("Payout Multiplier:        3.926x"));
        assert!(report.contains("Expected Value:           $0.00"));
    }

    #[test]
    fn test_truncate_keeps_short_text() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdefghijkl", 8), "abcde...");
    }
}
