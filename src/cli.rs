//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use crate::clock::FixedClock;
use crate::models::{HealthSignal, Language};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// FQHC Intel - market intelligence for California community health centers
///
/// Loads the organization directory, job listings, layoff log, salary
/// benchmarks and policy timeline from a data directory and writes a
/// Markdown or JSON market report.
///
/// Examples:
///   fqhc-intel --data ./data
///   fqhc-intel --data ./data --format json --output -
///   fqhc-intel --data ./data --lang es --as-of 2026-07-01
///   fqhc-intel --data ./data --fail-on warning
///   fqhc-intel --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Directory holding the reference datasets
    ///
    /// Expects organizations.json, jobs.json, layoffs.json,
    /// salary_benchmarks.json and policy_timeline.json (or directories
    /// of the same names containing .json files).
    #[arg(short, long, value_name = "DIR", env = "FQHC_INTEL_DATA")]
    pub data: Option<PathBuf>,

    /// Output file path for the report ("-" writes to stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format (markdown, json)
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<OutputFormat>,

    /// Report language (en, es)
    #[arg(long, value_name = "LANG")]
    pub lang: Option<Language>,

    /// Evaluate funding-cliff countdowns as of this date
    ///
    /// Accepts YYYY-MM-DD (midnight UTC) or an RFC 3339 timestamp.
    /// Defaults to the current time.
    #[arg(long, value_name = "DATE")]
    pub as_of: Option<String>,

    /// Path to configuration file
    ///
    /// If not specified, looks for .fqhc-intel.toml in the current directory
    /// and then in the data directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (minimal output)
    #[arg(short, long)]
    pub quiet: bool,

    /// Treat dataset validation warnings as errors
    #[arg(long)]
    pub strict: bool,

    /// Fail if any region's health signal is at or above this level
    ///
    /// Exit code 2 when the threshold is reached. Values: caution, warning
    #[arg(long, value_name = "LEVEL")]
    pub fail_on: Option<FailOnLevel>,

    /// Generate a default .fqhc-intel.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

/// Output format for the report.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Markdown format (default)
    #[default]
    Markdown,
    /// JSON format
    Json,
}

/// Health-signal threshold for --fail-on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, clap::ValueEnum)]
pub enum FailOnLevel {
    Caution,
    Warning,
}

impl FailOnLevel {
    /// The lowest health signal that trips this threshold.
    pub fn signal(&self) -> HealthSignal {
        match self {
            FailOnLevel::Caution => HealthSignal::Caution,
            FailOnLevel::Warning => HealthSignal::Warning,
        }
    }
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        // Skip validation for --init-config
        if self.init_config {
            return Ok(());
        }

        // Check for conflicting options
        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        if let Some(ref as_of) = self.as_of {
            FixedClock::parse(as_of).map_err(|e| e.to_string())?;
        }

        // Validate data directory if provided
        if let Some(ref data) = self.data {
            if !data.exists() {
                return Err(format!("Data directory does not exist: {}", data.display()));
            }
            if !data.is_dir() {
                return Err(format!("Data path is not a directory: {}", data.display()));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_args() -> Args {
        Args {
            data: None,
            output: None,
            format: None,
            lang: None,
            as_of: None,
            config: None,
            verbose: false,
            quiet: false,
            strict: false,
            fail_on: None,
            init_config: false,
        }
    }

    #[test]
    fn test_validation_conflicting_options() {
        let mut args = make_args();
        args.verbose = true;
        args.quiet = true;
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_validation_as_of() {
        let mut args = make_args();
        args.as_of = Some("2026-07-01".to_string());
        assert!(args.validate().is_ok());

        args.as_of = Some("July 1st".to_string());
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_validation_missing_data_dir() {
        let mut args = make_args();
        args.data = Some(PathBuf::from("/no/such/data/dir"));
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_parse_from_command_line() {
        let args = Args::try_parse_from([
            "fqhc-intel",
            "--format",
            "json",
            "--lang",
            "es",
            "--fail-on",
            "caution",
        ])
        .unwrap();

        assert_eq!(args.format, Some(OutputFormat::Json));
        assert_eq!(args.lang, Some(Language::Es));
        assert_eq!(args.fail_on.map(|l| l.signal()), Some(HealthSignal::Caution));
    }
}
