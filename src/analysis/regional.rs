//! Regional snapshots and health signals.
//!
//! Jobs reach a region through their organization's slug; layoff events reach
//! a region through their own `region` string. The two joins are independent
//! and are not reconciled against each other.

use super::aggregator::{rounded_mean, share_exceeds, Tally};
use crate::models::{
    FundingImpact, HealthSignal, JobListing, LayoffEvent, Organization, Region, RegionalSnapshot,
};
use std::collections::HashSet;
use tracing::debug;

/// Layoff headcount above which a region is in `warning`.
pub const WARNING_LAYOFF_EMPLOYEES: u64 = 200;
/// High-impact share (percent) above which a region is in `warning`.
pub const WARNING_HIGH_IMPACT_PCT: usize = 50;
/// Layoff headcount above which a region is in `caution`.
pub const CAUTION_LAYOFF_EMPLOYEES: u64 = 50;
/// High-impact share (percent) above which a region is in `caution`.
pub const CAUTION_HIGH_IMPACT_PCT: usize = 30;
/// Role types listed per snapshot.
pub const TOP_ROLES_PER_REGION: usize = 5;

/// Build one snapshot per region in [`Region::SNAPSHOT_ORDER`].
pub fn regional_snapshots(
    organizations: &[Organization],
    jobs: &[JobListing],
    layoffs: &[LayoffEvent],
) -> Vec<RegionalSnapshot> {
    log_excluded_records(organizations, jobs, layoffs);

    Region::SNAPSHOT_ORDER
        .iter()
        .map(|&region| build_snapshot(region, organizations, jobs, layoffs))
        .collect()
}

fn build_snapshot(
    region: Region,
    organizations: &[Organization],
    jobs: &[JobListing],
    layoffs: &[LayoffEvent],
) -> RegionalSnapshot {
    let orgs: Vec<&Organization> = organizations.iter().filter(|o| o.region == region).collect();
    let slugs: HashSet<&str> = orgs.iter().map(|o| o.slug.as_str()).collect();

    let region_jobs: Vec<&JobListing> = jobs
        .iter()
        .filter(|j| slugs.contains(j.fqhc_slug.as_str()))
        .collect();

    let region_layoffs: Vec<&LayoffEvent> = layoffs
        .iter()
        .filter(|l| l.region == region.as_str())
        .collect();

    let layoff_employees: u64 = region_layoffs
        .iter()
        .map(|l| u64::from(l.employees_affected))
        .sum();

    let count_impact = |level: FundingImpact| {
        orgs.iter()
            .filter(|o| o.funding_impact_level == level)
            .count()
    };
    let high_impact = count_impact(FundingImpact::High);

    let roles = Tally::from_labels(region_jobs.iter().map(|j| j.role_type.as_str()));

    RegionalSnapshot {
        region,
        fqhc_count: orgs.len(),
        total_jobs: region_jobs.len(),
        avg_salary_min: rounded_mean(region_jobs.iter().map(|j| f64::from(j.salary_min))),
        avg_salary_max: rounded_mean(region_jobs.iter().map(|j| f64::from(j.salary_max))),
        recent_layoffs: region_layoffs.len(),
        layoff_employees,
        high_impact,
        moderate_impact: count_impact(FundingImpact::Moderate),
        low_impact: count_impact(FundingImpact::Low),
        top_roles: roles.top_n(TOP_ROLES_PER_REGION),
        health_signal: classify_health(layoff_employees, high_impact, orgs.len()),
    }
}

/// Classify a region's health. `warning` is checked before `caution`.
pub fn classify_health(layoff_employees: u64, high_impact: usize, fqhc_count: usize) -> HealthSignal {
    if layoff_employees > WARNING_LAYOFF_EMPLOYEES
        || share_exceeds(high_impact, fqhc_count, WARNING_HIGH_IMPACT_PCT)
    {
        HealthSignal::Warning
    } else if layoff_employees > CAUTION_LAYOFF_EMPLOYEES
        || share_exceeds(high_impact, fqhc_count, CAUTION_HIGH_IMPACT_PCT)
    {
        HealthSignal::Caution
    } else {
        HealthSignal::Strong
    }
}

/// Report records that no snapshot can pick up.
fn log_excluded_records(
    organizations: &[Organization],
    jobs: &[JobListing],
    layoffs: &[LayoffEvent],
) {
    let snapshot_slugs: HashSet<&str> = organizations
        .iter()
        .filter(|o| Region::SNAPSHOT_ORDER.contains(&o.region))
        .map(|o| o.slug.as_str())
        .collect();

    for job in jobs.iter().filter(|j| !snapshot_slugs.contains(j.fqhc_slug.as_str())) {
        debug!(
            job = %job.id,
            slug = %job.fqhc_slug,
            "Job excluded from regional snapshots: organization unknown or outside snapshot regions"
        );
    }

    for layoff in layoffs
        .iter()
        .filter(|l| !Region::SNAPSHOT_ORDER.iter().any(|r| r.as_str() == l.region))
    {
        debug!(
            layoff = %layoff.id,
            region = %layoff.region,
            "Layoff excluded from regional snapshots: region not in snapshot rotation"
        );
    }
}
