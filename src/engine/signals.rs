//! Signal normalization
//!
//! Turns provider records (injury reports, head-to-head records) into
//! bounded [`Signal`]s for a single leg. Records that cannot be correlated
//! with the leg, or that are malformed, are dropped without error: live
//! feeds are expected to be incomplete.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::common::types::{Leg, Signal};

/// Positions whose absence helps the opposing offense
const KEY_DEFENSIVE_POSITIONS: &[&str] = &["CB", "DB", "FS", "SS", "S", "LB", "DE", "DT", "EDGE"];

/// Positions whose absence hurts their own team's props
const OFFENSIVE_SKILL_POSITIONS: &[&str] = &["QB", "RB", "WR", "TE"];

/// Tunable constants for the normalizer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizerSettings {
    /// Magnitude of an "out" injury with a direct relation to the leg
    #[serde(default = "default_injury_base_magnitude")]
    pub injury_base_magnitude: f64,
    /// Fraction of the base magnitude for a doubtful player
    #[serde(default = "default_doubtful_factor")]
    pub doubtful_factor: f64,
    /// Fraction of the base magnitude for a questionable player
    #[serde(default = "default_questionable_factor")]
    pub questionable_factor: f64,
    /// Fraction applied when the injured player is the subject's teammate
    #[serde(default = "default_teammate_factor")]
    pub teammate_factor: f64,
    /// Multiplier applied to a head-to-head rate's deviation from 0.5
    #[serde(default = "default_historical_scale")]
    pub historical_scale: f64,
}

impl Default for NormalizerSettings {
    fn default() -> Self {
        Self {
            injury_base_magnitude: default_injury_base_magnitude(),
            doubtful_factor: default_doubtful_factor(),
            questionable_factor: default_questionable_factor(),
            teammate_factor: default_teammate_factor(),
            historical_scale: default_historical_scale(),
        }
    }
}

fn default_injury_base_magnitude() -> f64 {
    0.12
}

fn default_doubtful_factor() -> f64 {
    0.5
}

fn default_questionable_factor() -> f64 {
    0.25
}

fn default_teammate_factor() -> f64 {
    0.5
}

fn default_historical_scale() -> f64 {
    0.3
}

/// Reported availability of an injured player
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum InjuryStatus {
    Out,
    Doubtful,
    Questionable,
    /// Probable, active, day-to-day and anything else the feed reports
    Other(String),
}

impl From<String> for InjuryStatus {
    fn from(value: String) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "out" | "ir" | "injured reserve" => InjuryStatus::Out,
            "doubtful" => InjuryStatus::Doubtful,
            "questionable" => InjuryStatus::Questionable,
            _ => InjuryStatus::Other(value),
        }
    }
}

impl From<InjuryStatus> for String {
    fn from(value: InjuryStatus) -> Self {
        match value {
            InjuryStatus::Out => "Out".to_string(),
            InjuryStatus::Doubtful => "Doubtful".to_string(),
            InjuryStatus::Questionable => "Questionable".to_string(),
            InjuryStatus::Other(s) => s,
        }
    }
}

impl InjuryStatus {
    fn label(&self) -> &str {
        match self {
            InjuryStatus::Out => "out",
            InjuryStatus::Doubtful => "doubtful",
            InjuryStatus::Questionable => "questionable",
            InjuryStatus::Other(s) => s,
        }
    }
}

/// One entry from an injury/roster feed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InjuryRecord {
    pub player: String,
    pub team: String,
    #[serde(default)]
    pub position: String,
    pub status: InjuryStatus,
    #[serde(default)]
    pub confidence: Option<f64>,
}

impl InjuryRecord {
    pub fn new(
        player: impl Into<String>,
        team: impl Into<String>,
        position: impl Into<String>,
        status: InjuryStatus,
    ) -> Self {
        Self {
            player: player.into(),
            team: team.into(),
            position: position.into(),
            status,
            confidence: None,
        }
    }

    fn has_position(&self, positions: &[&str]) -> bool {
        let position = self.position.trim();
        positions.iter().any(|p| p.eq_ignore_ascii_case(position))
    }
}

/// Head-to-head history of the subject team against an opponent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchupRecord {
    pub subject_team: String,
    pub opponent_team: String,
    /// Win/cover rate in [0, 1]; takes precedence over wins/losses
    #[serde(default)]
    pub rate: Option<f64>,
    #[serde(default)]
    pub wins: Option<u32>,
    #[serde(default)]
    pub losses: Option<u32>,
    #[serde(default)]
    pub confidence: Option<f64>,
}

impl MatchupRecord {
    /// Record with a known win/cover rate
    pub fn with_rate(
        subject_team: impl Into<String>,
        opponent_team: impl Into<String>,
        rate: f64,
    ) -> Self {
        Self {
            subject_team: subject_team.into(),
            opponent_team: opponent_team.into(),
            rate: Some(rate),
            wins: None,
            losses: None,
            confidence: None,
        }
    }

    /// Record built from a win-loss tally
    pub fn with_record(
        subject_team: impl Into<String>,
        opponent_team: impl Into<String>,
        wins: u32,
        losses: u32,
    ) -> Self {
        Self {
            subject_team: subject_team.into(),
            opponent_team: opponent_team.into(),
            rate: None,
            wins: Some(wins),
            losses: Some(losses),
            confidence: None,
        }
    }

    /// Resolved rate, or None when the record is unusable
    pub fn resolved_rate(&self) -> Option<f64> {
        if let Some(rate) = self.rate {
            return (rate.is_finite() && (0.0..=1.0).contains(&rate)).then_some(rate);
        }
        let wins = self.wins.unwrap_or(0);
        let total = wins.checked_add(self.losses.unwrap_or(0))?;
        if total == 0 {
            return None;
        }
        Some(f64::from(wins) / f64::from(total))
    }
}

/// A provider record before normalization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RawSignal {
    Injury(InjuryRecord),
    #[serde(alias = "historical")]
    Matchup(MatchupRecord),
}

/// How an injured player relates to a leg's subject
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InjuryRelation {
    Subject,
    OpposingDefender,
    Teammate,
}

/// Maps provider records into signals for a leg
#[derive(Debug, Clone, Default)]
pub struct SignalNormalizer {
    settings: NormalizerSettings,
}

impl SignalNormalizer {
    pub fn new(settings: NormalizerSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &NormalizerSettings {
        &self.settings
    }

    /// Normalize all records relevant to `leg`
    ///
    /// Injury signals come first, then historical signals; each group keeps
    /// the input order.
    pub fn normalize(&self, raw_signals: &[RawSignal], leg: &Leg) -> Vec<Signal> {
        let injuries = raw_signals.iter().filter_map(|raw| match raw {
            RawSignal::Injury(record) => self.injury_signal(record, leg),
            RawSignal::Matchup(_) => None,
        });
        let matchups = raw_signals.iter().filter_map(|raw| match raw {
            RawSignal::Matchup(record) => self.matchup_signal(record, leg),
            RawSignal::Injury(_) => None,
        });

        let signals: Vec<Signal> = injuries.chain(matchups).collect();
        debug!(
            leg_id = leg.id(),
            records = raw_signals.len(),
            signals = signals.len(),
            "Normalized signals"
        );
        signals
    }

    fn relation(record: &InjuryRecord, leg: &Leg) -> Option<InjuryRelation> {
        if let Some(subject) = leg.player_name() {
            if subject.trim().eq_ignore_ascii_case(record.player.trim()) {
                return Some(InjuryRelation::Subject);
            }
        }
        if let Some(opponent) = leg.opponent_team() {
            if opponent.eq_ignore_ascii_case(&record.team)
                && record.has_position(KEY_DEFENSIVE_POSITIONS)
            {
                return Some(InjuryRelation::OpposingDefender);
            }
        }
        if let Some(team) = leg.team() {
            if team.eq_ignore_ascii_case(&record.team)
                && record.has_position(OFFENSIVE_SKILL_POSITIONS)
            {
                return Some(InjuryRelation::Teammate);
            }
        }
        None
    }

    fn injury_signal(&self, record: &InjuryRecord, leg: &Leg) -> Option<Signal> {
        let severity = match record.status {
            InjuryStatus::Out => 1.0,
            InjuryStatus::Doubtful => self.settings.doubtful_factor,
            InjuryStatus::Questionable => self.settings.questionable_factor,
            InjuryStatus::Other(_) => {
                debug!(leg_id = leg.id(), player = %record.player, "Skipping non-impact injury status");
                return None;
            }
        };

        let Some(relation) = Self::relation(record, leg) else {
            debug!(leg_id = leg.id(), player = %record.player, "Injury unrelated to leg, dropped");
            return None;
        };

        let base = self.settings.injury_base_magnitude * severity;
        let (magnitude, context) = match relation {
            InjuryRelation::Subject => (-base, "subject"),
            InjuryRelation::OpposingDefender => (base, "opposing defender"),
            InjuryRelation::Teammate => (-base * self.settings.teammate_factor, "teammate"),
        };

        let mut signal = Signal::injury(magnitude).with_detail(format!(
            "{} {} ({}, {}) {}",
            context,
            record.player,
            record.position,
            record.team,
            record.status.label()
        ));
        if let Some(confidence) = record.confidence {
            signal = signal.with_confidence(confidence);
        }
        Some(signal)
    }

    fn matchup_signal(&self, record: &MatchupRecord, leg: &Leg) -> Option<Signal> {
        let (Some(team), Some(opponent)) = (leg.team(), leg.opponent_team()) else {
            return None;
        };
        if !team.eq_ignore_ascii_case(&record.subject_team)
            || !opponent.eq_ignore_ascii_case(&record.opponent_team)
        {
            return None;
        }

        let Some(rate) = record.resolved_rate() else {
            debug!(leg_id = leg.id(), "Malformed head-to-head record, dropped");
            return None;
        };

        let magnitude = (rate - 0.5) * self.settings.historical_scale;
        let detail = match (record.wins, record.losses, record.rate) {
            (Some(w), Some(l), None) => format!(
                "{} {}-{} against {}",
                record.subject_team, w, l, record.opponent_team
            ),
            _ => format!(
                "{} {:.0}% against {}",
                record.subject_team,
                rate * 100.0,
                record.opponent_team
            ),
        };

        let mut signal = Signal::matchup(magnitude).with_detail(detail);
        if let Some(confidence) = record.confidence {
            signal = signal.with_confidence(confidence);
        }
        Some(signal)
    }
}
