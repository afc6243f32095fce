//! Command-line interface: argument parsing and the `check` command.

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use formguard::{ContactGuard, GuardConfig, RawSubmission};
use tracing_subscriber::EnvFilter;

use crate::output;
use crate::report::{CheckReport, OutcomeResult, SubmissionOutcome};

#[derive(Debug, Parser)]
#[command(
    name = "formguard",
    version,
    about = "Run contact-form submissions through the validation/rate-limit guard"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Check submission JSON files against the guard
    Check(CheckArgs),
}

#[derive(Debug, Args)]
struct CheckArgs {
    /// Submission files, each a JSON object or an array of objects (`-` reads stdin)
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Maximum accepted attempts per identifier within one window
    #[arg(long, default_value_t = 3)]
    max_attempts: usize,

    /// Sliding-window length in milliseconds
    #[arg(long, default_value_t = 60_000)]
    window_ms: u64,

    /// Emit the report as JSON instead of human-readable text
    #[arg(long)]
    json: bool,
}

/// Parse arguments, run the selected command, print the report.
///
/// Returns whether every submission was accepted; the caller maps that to
/// the process exit code.
///
/// # Errors
///
/// Returns an error for unreadable files or malformed JSON. Guard refusals
/// are not errors; they are part of the report.
pub fn run() -> anyhow::Result<bool> {
    init_tracing();
    let cli = Cli::parse();
    match cli.command {
        Command::Check(args) => {
            let report = run_check(&args)?;
            let mut stdout = io::stdout().lock();
            if args.json {
                output::write_json(&report, &mut stdout)?;
            } else {
                output::write_human(&report, &mut stdout)?;
            }
            Ok(report.ok)
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Feed every submission from every input file through one shared guard.
///
/// One guard means rate limiting applies across files, the same way a
/// single page session shares one limiter.
fn run_check(args: &CheckArgs) -> anyhow::Result<CheckReport> {
    let mut config = GuardConfig::default();
    config.max_attempts = args.max_attempts;
    config.window = Duration::from_millis(args.window_ms);
    let guard = ContactGuard::new(&config);

    let mut outcomes = Vec::new();
    for file in &args.files {
        let content = read_input(file)?;
        for (source, raw) in parse_submissions(&content, file)? {
            let result = match guard.submit(&raw) {
                Ok(submission) => OutcomeResult::Accepted { submission },
                Err(error) => OutcomeResult::Refused { error },
            };
            outcomes.push(SubmissionOutcome { source, result });
        }
    }
    Ok(CheckReport::from_outcomes(outcomes))
}

fn read_input(path: &Path) -> anyhow::Result<String> {
    if path.as_os_str() == "-" {
        let mut content = String::new();
        io::stdin()
            .read_to_string(&mut content)
            .context("failed to read stdin")?;
        return Ok(content);
    }
    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

/// Parse a file's JSON into submissions, keeping a `path#index` source label
/// for array elements.
fn parse_submissions(content: &str, path: &Path) -> anyhow::Result<Vec<(String, RawSubmission)>> {
    let value: serde_json::Value = serde_json::from_str(content)
        .with_context(|| format!("{}: invalid JSON", path.display()))?;

    match value {
        serde_json::Value::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(index, item)| {
                let raw = serde_json::from_value(item).with_context(|| {
                    format!("{}#{index}: not a valid submission object", path.display())
                })?;
                Ok((format!("{}#{index}", path.display()), raw))
            })
            .collect(),
        other => {
            let raw = serde_json::from_value(other)
                .with_context(|| format!("{}: not a valid submission object", path.display()))?;
            Ok(vec![(path.display().to_string(), raw)])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn check_args(files: Vec<PathBuf>, max_attempts: usize) -> CheckArgs {
        CheckArgs {
            files,
            max_attempts,
            window_ms: 60_000,
            json: false,
        }
    }

    #[test]
    fn test_parse_single_object() {
        let parsed = parse_submissions(
            r#"{"name": "Jo", "email": "jo@x.com"}"#,
            Path::new("form.json"),
        )
        .unwrap();
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].0, "form.json");
        assert_eq!(parsed[0].1.name, "Jo");
    }

    #[test]
    fn test_parse_array_labels_elements() {
        let parsed = parse_submissions(
            r#"[{"name": "Jo", "email": "jo@x.com"}, {"name": "Al", "email": "al@x.com"}]"#,
            Path::new("batch.json"),
        )
        .unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].0, "batch.json#0");
        assert_eq!(parsed[1].0, "batch.json#1");
    }

    #[test]
    fn test_parse_rejects_invalid_json() {
        let result = parse_submissions("not json", Path::new("bad.json"));
        let msg = result.unwrap_err().to_string();
        assert!(msg.contains("invalid JSON"), "got: {msg}");
    }

    #[test]
    fn test_parse_rejects_unknown_fields() {
        let result = parse_submissions(
            r#"{"name": "Jo", "email": "jo@x.com", "emial": "typo"}"#,
            Path::new("typo.json"),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_run_check_mixed_outcomes() {
        let tmp = TempDir::new().unwrap();
        let batch = tmp.path().join("batch.json");
        fs::write(
            &batch,
            r#"[{"name": "Jo", "email": "jo@x.com"}, {"name": "A1", "email": "bad"}]"#,
        )
        .unwrap();

        let report = run_check(&check_args(vec![batch], 3)).unwrap();
        assert_eq!(report.checked, 2);
        assert_eq!(report.accepted, 1);
        assert!(!report.ok);
    }

    #[test]
    fn test_run_check_shares_guard_across_files() {
        let tmp = TempDir::new().unwrap();
        let first = tmp.path().join("first.json");
        let second = tmp.path().join("second.json");
        let submission = r#"{"name": "Jo", "email": "jo@x.com"}"#;
        fs::write(&first, submission).unwrap();
        fs::write(&second, submission).unwrap();

        let report = run_check(&check_args(vec![first, second], 1)).unwrap();
        assert_eq!(report.checked, 2);
        assert_eq!(report.accepted, 1);
    }

    #[test]
    fn test_run_check_missing_file_errors() {
        let result = run_check(&check_args(vec![PathBuf::from("/no/such/file.json")], 3));
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_parses_check_flags() {
        let cli = Cli::try_parse_from([
            "formguard",
            "check",
            "--max-attempts",
            "5",
            "--window-ms",
            "1000",
            "--json",
            "subs.json",
        ])
        .unwrap();
        let Command::Check(args) = cli.command;
        assert_eq!(args.max_attempts, 5);
        assert_eq!(args.window_ms, 1000);
        assert!(args.json);
        assert_eq!(args.files, vec![PathBuf::from("subs.json")]);
    }

    #[test]
    fn test_cli_requires_at_least_one_file() {
        assert!(Cli::try_parse_from(["formguard", "check"]).is_err());
    }
}
