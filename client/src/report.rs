//! Boundary with the match-history service.
//!
//! Reporting is best-effort by design: the session fires one record-match
//! call per finished game and never waits on it, retries it, or surfaces
//! a failure to the player. Whatever retry policy exists lives on the
//! other side of this boundary.

use log::info;
use serde::Serialize;

/// Opponent label recorded for AI matches.
pub const AI_OPPONENT_LABEL: &str = "AI";

/// Payload of the record-match call.
///
/// `opponent_label` is either the fixed AI marker or the opposing local
/// player's display name; local opponents are never tied to an account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchReport {
    pub user_score: u8,
    pub opponent_score: u8,
    pub opponent_label: String,
}

/// Where finished matches go.
pub trait MatchReporter {
    fn record_match(&self, report: &MatchReport) -> Result<(), Box<dyn std::error::Error>>;
}

/// Stands in for the history service in this repository: serializes the
/// payload the service expects and logs it at the boundary.
#[derive(Debug, Default)]
pub struct LoggingReporter;

impl MatchReporter for LoggingReporter {
    fn record_match(&self, report: &MatchReport) -> Result<(), Box<dyn std::error::Error>> {
        let body = serde_json::to_string(report)?;
        info!("recording match result: {body}");
        Ok(())
    }
}
