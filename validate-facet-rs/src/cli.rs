//! Argument handling and I/O for `validate-facet`

use std::fs;
use std::io::{Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use facet_validation::prelude::*;
use facet_validation::registry::DEFAULT_SOURCE;

/// Command-line arguments for validate-facet
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "validate-facet")]
#[command(about = "Validate and coerce a facet JSON record against the canonical schema")]
#[command(version)]
pub struct Args {
    /// Facet JSON file (reads stdin if omitted)
    pub file: Option<PathBuf>,

    /// Write the result back to FILE instead of stdout
    #[arg(long)]
    pub in_place: bool,

    /// Set the session_id field
    #[arg(long)]
    pub session_id: Option<String>,

    /// Set the facet_model field
    #[arg(long, env = "FACET_MODEL")]
    pub facet_model: Option<String>,

    /// Set the source field
    #[arg(long, default_value = DEFAULT_SOURCE, env = "FACET_SOURCE")]
    pub source: String,

    /// Suppress the coercion count
    #[arg(long)]
    pub quiet: bool,

    /// Assign a random session_id when the record has none
    #[arg(long)]
    pub generate_session_id: bool,

    /// Stamp the current time into `timestamp` when the record has none
    #[arg(long)]
    pub timestamp: bool,

    /// Print each repair as JSON on stderr
    #[arg(long)]
    pub report: bool,

    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    pub fn overrides(&self) -> MetadataOverrides {
        MetadataOverrides {
            session_id: self.session_id.clone(),
            facet_model: self.facet_model.clone(),
            source: self.source.clone(),
            generate_session_id: self.generate_session_id,
            stamp_timestamp: self.timestamp,
        }
    }
}

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// A JSON object was parsed and validated
    Success,
    /// Input was not a JSON object; nothing was written
    InvalidInput,
}

impl From<Status> for ExitCode {
    fn from(status: Status) -> Self {
        match status {
            Status::Success => ExitCode::SUCCESS,
            Status::InvalidInput => ExitCode::from(1),
        }
    }
}

/// Run one validation.
///
/// `stdin` is only read when no file was given. Fatal input errors are
/// reported on `stderr` and turned into [`Status::InvalidInput`]; I/O
/// failures are returned as errors.
pub fn run<R, W, E>(args: &Args, mut stdin: R, stdout: &mut W, stderr: &mut E) -> Result<Status>
where
    R: Read,
    W: Write,
    E: Write,
{
    let raw = match &args.file {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => {
            let mut buf = String::new();
            stdin
                .read_to_string(&mut buf)
                .context("Failed to read stdin")?;
            buf
        }
    };

    let outcome = match facet_validation::process(&raw, &args.overrides()) {
        Ok(outcome) => outcome,
        Err(err) => {
            tracing::debug!(error = %err, "Rejected facet input");
            writeln!(stderr, "ERROR: {err}")?;
            return Ok(Status::InvalidInput);
        }
    };

    let count = outcome.coercion_count();
    if !args.quiet && count > 0 {
        writeln!(stderr, "  Coerced {count} non-standard values")?;
    }
    if args.report {
        let log = serde_json::to_string_pretty(&outcome.coercions)
            .context("Failed to serialize coercion report")?;
        writeln!(stderr, "{log}")?;
    }

    let output = to_pretty_json(&outcome.facet).context("Failed to serialize facet")?;
    match (&args.file, args.in_place) {
        (Some(path), true) => {
            fs::write(path, format!("{output}\n"))
                .with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::debug!(path = %path.display(), "Wrote facet in place");
        }
        _ => writeln!(stdout, "{output}")?,
    }

    Ok(Status::Success)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["validate-facet"]).unwrap();
        assert_eq!(args.file, None);
        assert!(!args.in_place);
        assert!(!args.quiet);
        let overrides = args.overrides();
        assert_eq!(overrides.session_id, None);
        assert!(!overrides.generate_session_id);
        assert!(!overrides.stamp_timestamp);
    }

    #[test]
    fn test_full_flags() {
        let args = Args::try_parse_from([
            "validate-facet",
            "facet.json",
            "--in-place",
            "--session-id",
            "ABC",
            "--facet-model",
            "sonnet",
            "--source",
            "batch",
            "--quiet",
            "--timestamp",
        ])
        .unwrap();
        assert_eq!(args.file, Some(PathBuf::from("facet.json")));
        assert!(args.in_place && args.quiet && args.timestamp);
        let overrides = args.overrides();
        assert_eq!(overrides.session_id.as_deref(), Some("ABC"));
        assert_eq!(overrides.facet_model.as_deref(), Some("sonnet"));
        assert_eq!(overrides.source, "batch");
    }

    #[test]
    fn test_status_exit_codes() {
        assert_eq!(
            format!("{:?}", ExitCode::from(Status::Success)),
            format!("{:?}", ExitCode::SUCCESS)
        );
        assert_eq!(
            format!("{:?}", ExitCode::from(Status::InvalidInput)),
            format!("{:?}", ExitCode::from(1))
        );
    }
}
