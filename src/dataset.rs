//! Reference dataset loading and validation.
//!
//! A data directory holds one JSON array per collection, either as a single
//! file (`jobs.json`) or as a directory of files (`jobs/*.json`) that are
//! concatenated in sorted path order.

use crate::models::{JobListing, LayoffEvent, Organization, PolicyEvent, SalaryBenchmark};
use serde::de::DeserializeOwned;
use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// Errors raised while loading the reference datasets.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to walk {path}: {source}")]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("data directory not found: {0}")]
    MissingDirectory(PathBuf),

    #[error("dataset failed validation with {0} warning(s)")]
    Invalid(usize),
}

/// A data-quality problem found by [`Dataset::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataWarning {
    DuplicateSlug(String),
    InvertedSalaryRange { job: String, min: u32, max: u32 },
    UnknownOrganization { job: String, slug: String },
    UnorderedPercentiles { role: String },
}

impl fmt::Display for DataWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataWarning::DuplicateSlug(slug) => write!(f, "duplicate organization slug '{}'", slug),
            DataWarning::InvertedSalaryRange { job, min, max } => {
                write!(f, "job '{}' has salaryMin {} above salaryMax {}", job, min, max)
            }
            DataWarning::UnknownOrganization { job, slug } => {
                write!(f, "job '{}' references unknown organization '{}'", job, slug)
            }
            DataWarning::UnorderedPercentiles { role } => {
                write!(f, "benchmark '{}' percentiles are not ordered p25 <= p50 <= p75", role)
            }
        }
    }
}

/// All reference collections the engine reads.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub organizations: Vec<Organization>,
    pub jobs: Vec<JobListing>,
    pub layoffs: Vec<LayoffEvent>,
    pub benchmarks: Vec<SalaryBenchmark>,
    pub policy_events: Vec<PolicyEvent>,
}

impl Dataset {
    /// Load every collection from a data directory.
    pub fn load(dir: &Path) -> Result<Self, DatasetError> {
        if !dir.is_dir() {
            return Err(DatasetError::MissingDirectory(dir.to_path_buf()));
        }

        info!("Loading datasets from {}", dir.display());

        let dataset = Self {
            organizations: load_collection(dir, "organizations")?,
            jobs: load_collection(dir, "jobs")?,
            layoffs: load_collection(dir, "layoffs")?,
            benchmarks: load_collection(dir, "salary_benchmarks")?,
            policy_events: load_collection(dir, "policy_timeline")?,
        };

        info!(
            organizations = dataset.organizations.len(),
            jobs = dataset.jobs.len(),
            layoffs = dataset.layoffs.len(),
            benchmarks = dataset.benchmarks.len(),
            policy_events = dataset.policy_events.len(),
            "Datasets loaded"
        );

        Ok(dataset)
    }

    /// Check the data-provider invariants. The engine tolerates every
    /// problem reported here.
    pub fn validate(&self) -> Vec<DataWarning> {
        let mut warnings = Vec::new();

        let mut slugs = HashSet::new();
        for org in &self.organizations {
            if !slugs.insert(org.slug.as_str()) {
                warnings.push(DataWarning::DuplicateSlug(org.slug.clone()));
            }
        }

        for job in &self.jobs {
            if job.salary_min > job.salary_max {
                warnings.push(DataWarning::InvertedSalaryRange {
                    job: job.id.clone(),
                    min: job.salary_min,
                    max: job.salary_max,
                });
            }
            if !slugs.contains(job.fqhc_slug.as_str()) {
                warnings.push(DataWarning::UnknownOrganization {
                    job: job.id.clone(),
                    slug: job.fqhc_slug.clone(),
                });
            }
        }

        for benchmark in &self.benchmarks {
            if !(benchmark.p25 <= benchmark.p50 && benchmark.p50 <= benchmark.p75) {
                warnings.push(DataWarning::UnorderedPercentiles {
                    role: benchmark.role_id.clone(),
                });
            }
        }

        warnings
    }

    /// Validate and log every warning. In strict mode any warning is an error.
    pub fn check(&self, strict: bool) -> Result<(), DatasetError> {
        let warnings = self.validate();

        for warning in &warnings {
            warn!("Data warning: {}", warning);
        }

        if strict && !warnings.is_empty() {
            return Err(DatasetError::Invalid(warnings.len()));
        }

        Ok(())
    }
}

/// Load `<name>.json` and every `.json` file under `<name>/`.
fn load_collection<T: DeserializeOwned>(dir: &Path, name: &str) -> Result<Vec<T>, DatasetError> {
    let mut files = Vec::new();

    let single = dir.join(format!("{}.json", name));
    if single.is_file() {
        files.push(single);
    }

    let nested = dir.join(name);
    if nested.is_dir() {
        let mut found = Vec::new();
        for entry in WalkDir::new(&nested) {
            let entry = entry.map_err(|source| DatasetError::Walk {
                path: nested.clone(),
                source,
            })?;
            let path = entry.path();
            if entry.file_type().is_file() && path.extension().is_some_and(|e| e == "json") {
                found.push(path.to_path_buf());
            }
        }
        found.sort();
        files.extend(found);
    }

    if files.is_empty() {
        warn!("No {} data found in {}, using an empty collection", name, dir.display());
        return Ok(Vec::new());
    }

    let mut records = Vec::new();
    for path in files {
        let content = fs::read_to_string(&path).map_err(|source| DatasetError::Read {
            path: path.clone(),
            source,
        })?;
        let mut batch: Vec<T> = serde_json::from_str(&content)
            .map_err(|source| DatasetError::Parse { path: path.clone(), source })?;

        debug!("Loaded {} {} record(s) from {}", batch.len(), name, path.display());
        records.append(&mut batch);
    }

    Ok(records)
}
