//! Output formatting for check reports: JSON and colored human-readable text.

use std::io::Write;

use colored::Colorize;
use formguard::GuardError;

use crate::report::{CheckReport, OutcomeResult, SubmissionOutcome};

/// Write the report as pretty-printed JSON.
///
/// # Errors
///
/// Returns an error if serialization or writing fails.
pub fn write_json(report: &CheckReport, writer: &mut dyn Write) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    writeln!(writer, "{json}")?;
    Ok(())
}

/// Write the report as human-readable text.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_human(report: &CheckReport, writer: &mut dyn Write) -> anyhow::Result<()> {
    writeln!(writer)?;
    writeln!(writer, "{}", "=".repeat(72))?;
    writeln!(writer, "  FORMGUARD SUBMISSION CHECK")?;
    writeln!(writer, "{}", "=".repeat(72))?;
    writeln!(writer)?;
    writeln!(writer, "  Submissions checked:  {}", report.checked)?;
    writeln!(writer, "  Accepted:             {}", report.accepted)?;
    writeln!(writer, "  Refused:              {}", report.refused())?;
    writeln!(writer)?;

    for outcome in &report.outcomes {
        write_outcome(outcome, writer)?;
    }

    writeln!(writer)?;
    if report.ok {
        writeln!(
            writer,
            "{}",
            format!(
                "\u{2713} All {} submission(s) accepted",
                report.checked
            )
            .green()
        )?;
    } else {
        writeln!(
            writer,
            "{}",
            format!("\u{2717} {} submission(s) refused", report.refused()).red()
        )?;
    }
    Ok(())
}

fn write_outcome(outcome: &SubmissionOutcome, writer: &mut dyn Write) -> anyhow::Result<()> {
    match &outcome.result {
        OutcomeResult::Accepted { submission } => {
            writeln!(
                writer,
                "  {} {}: accepted ({} <{}>)",
                "\u{2713}".green(),
                outcome.source,
                submission.name,
                submission.email
            )?;
        }
        OutcomeResult::Refused {
            error: GuardError::RateLimited { retry_after },
        } => {
            writeln!(
                writer,
                "  {} {}: rate limited, retry after {}ms",
                "\u{2717}".red(),
                outcome.source,
                retry_after.as_millis()
            )?;
        }
        OutcomeResult::Refused {
            error: GuardError::Invalid { field_errors },
        } => {
            writeln!(writer, "  {} {}: invalid", "\u{2717}".red(), outcome.source)?;
            for (field, message) in field_errors {
                writeln!(writer, "      {field}: {message}")?;
            }
        }
    }
    Ok(())
}
