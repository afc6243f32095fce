//! Check-run report types.

use formguard::{ContactSubmission, GuardError};
use serde::Serialize;

/// Outcome of one submission fed through the guard.
#[derive(Debug, Clone, Serialize)]
pub struct SubmissionOutcome {
    /// Where the submission came from: `file.json`, or `file.json#2` for
    /// the third element of an array file.
    pub source: String,
    /// Accepted submission or the typed refusal.
    #[serde(flatten)]
    pub result: OutcomeResult,
}

/// Accepted-or-refused, tagged for JSON output.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum OutcomeResult {
    /// The guard accepted the submission.
    Accepted {
        /// The sanitized, validated submission.
        submission: ContactSubmission,
    },
    /// The guard refused the submission.
    Refused {
        /// Why it was refused.
        #[serde(flatten)]
        error: GuardError,
    },
}

/// Result of running every submission from every input file through one guard.
#[derive(Debug, Clone, Serialize)]
pub struct CheckReport {
    /// Total submissions fed to the guard.
    pub checked: usize,
    /// Submissions the guard accepted.
    pub accepted: usize,
    /// Whether every submission was accepted.
    pub ok: bool,
    /// Per-submission outcomes, in input order.
    pub outcomes: Vec<SubmissionOutcome>,
}

impl CheckReport {
    /// Build a report from per-submission outcomes.
    #[must_use]
    pub fn from_outcomes(outcomes: Vec<SubmissionOutcome>) -> Self {
        let checked = outcomes.len();
        let accepted = outcomes
            .iter()
            .filter(|outcome| matches!(outcome.result, OutcomeResult::Accepted { .. }))
            .count();
        Self {
            checked,
            accepted,
            ok: accepted == checked,
            outcomes,
        }
    }

    /// Submissions the guard refused.
    #[must_use]
    pub fn refused(&self) -> usize {
        self.checked - self.accepted
    }
}
