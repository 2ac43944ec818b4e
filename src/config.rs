//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.fqhc-intel.toml` files.

use crate::cli::OutputFormat;
use crate::models::Language;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the configuration file looked up by default.
pub const CONFIG_FILE_NAME: &str = ".fqhc-intel.toml";

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Dataset settings.
    #[serde(default)]
    pub data: DataConfig,

    /// Report settings.
    #[serde(default)]
    pub report: ReportConfig,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Default output file path.
    #[serde(default = "default_output")]
    pub output: String,

    /// Enable verbose logging by default.
    #[serde(default)]
    pub verbose: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            output: default_output(),
            verbose: false,
        }
    }
}

fn default_output() -> String {
    "fqhc_market_report.md".to_string()
}

/// Reference dataset settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// Directory holding the dataset files.
    #[serde(default = "default_data_dir")]
    pub dir: PathBuf,

    /// Fail on dataset validation warnings.
    #[serde(default)]
    pub strict: bool,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            dir: default_data_dir(),
            strict: false,
        }
    }
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

/// Report generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Output format.
    #[serde(default)]
    pub format: OutputFormat,

    /// Language for narrative text and labels.
    #[serde(default)]
    pub language: Language,

    /// Include the regional snapshot table.
    #[serde(default = "default_true")]
    pub include_regions: bool,

    /// Include the role demand table.
    #[serde(default = "default_true")]
    pub include_roles: bool,

    /// Include the funding-cliff timeline.
    #[serde(default = "default_true")]
    pub include_funding_cliffs: bool,

    /// Include the salary benchmark table.
    #[serde(default = "default_true")]
    pub include_salaries: bool,

    /// Include past policy events in the timeline.
    #[serde(default = "default_true")]
    pub include_past_events: bool,

    /// Maximum role-demand rows in the Markdown report.
    #[serde(default = "default_max_roles")]
    pub max_roles: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            language: Language::default(),
            include_regions: true,
            include_roles: true,
            include_funding_cliffs: true,
            include_salaries: true,
            include_past_events: true,
            max_roles: default_max_roles(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_max_roles() -> usize {
    15
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        Self::load_from_dir(Path::new("."))
    }

    /// Try to load configuration from a directory (e.g. the data directory).
    pub fn load_from_dir(dir: &Path) -> Result<Option<Self>> {
        let config_path = dir.join(CONFIG_FILE_NAME);

        if config_path.exists() {
            Ok(Some(Self::load(&config_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence over config file settings.
    /// This method only overrides config when CLI provides explicit values.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        if let Some(ref data) = args.data {
            self.data.dir = data.clone();
        }
        if let Some(ref output) = args.output {
            self.general.output = output.to_string_lossy().to_string();
        }
        if let Some(format) = args.format {
            self.report.format = format;
        }
        if let Some(lang) = args.lang {
            self.report.language = lang;
        }

        // Flags always override
        if args.strict {
            self.data.strict = true;
        }
        if args.verbose {
            self.general.verbose = true;
        }
    }

    /// Log level for the merged settings. Quiet mode wins over verbose.
    pub fn log_level(&self, quiet: bool) -> tracing::Level {
        if quiet {
            tracing::Level::ERROR
        } else if self.general.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }

    /// Whether the report goes to stdout (`output = "-"`) instead of a file.
    pub fn writes_to_stdout(&self) -> bool {
        self.general.output == "-"
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}
