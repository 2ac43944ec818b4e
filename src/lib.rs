//! FQHC Intel - market intelligence for California community health centers.
//!
//! Combines the organization directory, job board, layoff log, salary
//! benchmarks and policy timeline into derived views: sitewide overview,
//! regional health signals, role demand, funding-cliff countdowns, salary
//! benchmark comparison and bilingual narrative insights.
//!
//! ```no_run
//! use fqhc_intel::{Dataset, MarketIntelligence, SystemClock};
//!
//! let data = Dataset::load(std::path::Path::new("data"))?;
//! let engine = MarketIntelligence::new(&data);
//! let cliffs = engine.funding_cliffs(&SystemClock);
//! # Ok::<(), fqhc_intel::DatasetError>(())
//! ```

pub mod analysis;
pub mod cli;
pub mod clock;
pub mod config;
pub mod dataset;
pub mod engine;
pub mod models;
pub mod report;

pub use clock::{Clock, FixedClock, SystemClock};
pub use dataset::{DataWarning, Dataset, DatasetError};
pub use engine::MarketIntelligence;
