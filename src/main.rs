//! FQHC Intel - market intelligence report for California community health centers
//!
//! Loads the reference datasets, runs every market-intelligence view and
//! writes a Markdown or JSON report.
//!
//! Exit codes:
//!   0 - Success (no region at or above --fail-on, or no --fail-on set)
//!   1 - Runtime error (missing data, parse failure, strict validation, etc.)
//!   2 - A region's health signal reached the --fail-on threshold

use anyhow::{Context, Result};
use fqhc_intel::cli::{Args, OutputFormat};
use fqhc_intel::config::{Config, CONFIG_FILE_NAME};
use fqhc_intel::models::MarketReport;
use fqhc_intel::{report, Clock, Dataset, FixedClock, MarketIntelligence, SystemClock};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, error, info, warn};
use tracing_subscriber::FmtSubscriber;

fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        return handle_init_config();
    }

    // Load config before logging so `[general] verbose` can raise the level
    let (mut config, source) = match load_config(&args) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("\n❌ Error: {:#}", e);
            std::process::exit(1);
        }
    };
    config.merge_with_args(&args);

    // Initialize logging
    init_logging(config.log_level(args.quiet));

    info!("FQHC Intel v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);
    source.log();

    match run(args, config) {
        Ok(exit_code) => {
            std::process::exit(exit_code);
        }
        Err(e) => {
            error!("Report failed: {:#}", e);
            eprintln!("\n❌ Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

/// Handle --init-config: generate a default .fqhc-intel.toml.
fn handle_init_config() -> Result<()> {
    let path = Path::new(CONFIG_FILE_NAME);

    if path.exists() {
        eprintln!(
            "⚠️  {} already exists. Remove it first or edit it manually.",
            CONFIG_FILE_NAME
        );
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content)
        .with_context(|| format!("Failed to write {}", CONFIG_FILE_NAME))?;

    println!("✅ Created {} with default settings.", CONFIG_FILE_NAME);
    println!("   Edit it to set the data directory, report language and sections.");
    Ok(())
}

/// Initialize logging at the merged verbosity level.
fn init_logging(level: tracing::Level) {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .compact()
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
    }
}

/// Load, analyze and write the report. Returns exit code (0 or 2).
fn run(args: Args, config: Config) -> Result<i32> {
    let start_time = Instant::now();

    let dataset = Dataset::load(&config.data.dir)
        .with_context(|| format!("Failed to load datasets from {}", config.data.dir.display()))?;
    dataset.check(config.data.strict)?;

    let clock: Box<dyn Clock> = match args.as_of {
        Some(ref as_of) => Box::new(FixedClock::parse(as_of)?),
        None => Box::new(SystemClock),
    };

    let engine = MarketIntelligence::new(&dataset);
    let market = engine.report(clock.as_ref(), config.report.language);

    let output = match config.report.format {
        OutputFormat::Json => report::generate_json_report(&market)?,
        OutputFormat::Markdown => report::generate_markdown_report(&market, &config.report),
    };

    if config.writes_to_stdout() {
        println!("{}", output);
    } else {
        std::fs::write(&config.general.output, &output)
            .with_context(|| format!("Failed to write report to {}", config.general.output))?;
    }

    if !args.quiet && !config.writes_to_stdout() {
        print_summary(&market, &config.general.output, start_time.elapsed().as_secs_f64());
    }

    // Check --fail-on threshold
    if let Some(level) = args.fail_on {
        let threshold = level.signal();
        let flagged: Vec<_> = market
            .regions
            .iter()
            .filter(|r| r.health_signal >= threshold)
            .map(|r| r.region.as_str())
            .collect();

        if !flagged.is_empty() {
            eprintln!(
                "\n⛔ Regions at or above {:?}: {}. Failing (exit code 2).",
                level,
                flagged.join(", ")
            );
            return Ok(2);
        }
    }

    Ok(0)
}

/// Print a short console summary of the report.
fn print_summary(market: &MarketReport, output: &str, duration: f64) {
    let overview = &market.overview;

    println!("\n📊 Market Summary:");
    println!(
        "   Health centers: {} | Listings: {} | Role types: {}",
        overview.total_fqhcs, overview.total_jobs, overview.role_types
    );
    println!(
        "   Layoffs: {} employees at {} organizations",
        overview.layoff_employees, overview.layoff_organizations
    );
    for region in &market.regions {
        println!(
            "   {} {}: {}",
            region.health_signal.emoji(),
            region.region,
            region.health_signal
        );
    }
    println!("   Insights: {}", market.insights.len());
    println!("   Duration: {:.2}s", duration);
    println!("\n✅ Report saved to: {}", output);
}

/// Where the configuration came from, logged once the subscriber is up.
enum ConfigSource {
    Explicit(PathBuf),
    CurrentDir,
    DataDir(PathBuf),
    Defaults,
    Unreadable(anyhow::Error),
}

impl ConfigSource {
    fn log(&self) {
        match self {
            ConfigSource::Explicit(path) => info!("Loaded config from: {}", path.display()),
            ConfigSource::CurrentDir => info!("Loaded default config from {}", CONFIG_FILE_NAME),
            ConfigSource::DataDir(dir) => {
                info!("Found {} in {}", CONFIG_FILE_NAME, dir.display())
            }
            ConfigSource::Defaults => debug!("No config file found, using defaults"),
            ConfigSource::Unreadable(e) => warn!("Failed to load config: {:#}", e),
        }
    }
}

/// Load configuration from file or use defaults.
fn load_config(args: &Args) -> Result<(Config, ConfigSource)> {
    // Try explicit config path
    if let Some(ref config_path) = args.config {
        let config = Config::load(config_path)?;
        return Ok((config, ConfigSource::Explicit(config_path.clone())));
    }

    // Try default location
    match Config::load_default() {
        Ok(Some(config)) => Ok((config, ConfigSource::CurrentDir)),
        Ok(None) => load_data_dir_config(args),
        Err(e) => Ok((Config::default(), ConfigSource::Unreadable(e))),
    }
}

/// Fall back to a config file shipped inside the data directory.
fn load_data_dir_config(args: &Args) -> Result<(Config, ConfigSource)> {
    let data_dir = args.data.clone().unwrap_or_else(|| Config::default().data.dir);

    match Config::load_from_dir(&data_dir)? {
        Some(config) => Ok((config, ConfigSource::DataDir(data_dir))),
        None => Ok((Config::default(), ConfigSource::Defaults)),
    }
}
