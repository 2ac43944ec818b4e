//! Observed salaries compared against canonical benchmarks.

use super::aggregator::rounded_mean;
use super::matching::benchmark_matches;
use crate::models::{JobListing, MarketPosition, SalaryBenchmark, SalaryIntelligence};
use tracing::debug;

/// One comparison per benchmark, in benchmark order.
pub fn salary_intelligence(
    benchmarks: &[SalaryBenchmark],
    jobs: &[JobListing],
) -> Vec<SalaryIntelligence> {
    benchmarks
        .iter()
        .map(|benchmark| {
            let matched: Vec<&JobListing> = jobs
                .iter()
                .filter(|j| benchmark_matches(&j.role_type, &benchmark.label.en))
                .collect();

            debug!(
                role = %benchmark.role_id,
                matched = matched.len(),
                "Matched listings to salary benchmark"
            );

            let avg_salary_min = rounded_mean(matched.iter().map(|j| f64::from(j.salary_min)));
            let avg_salary_max = rounded_mean(matched.iter().map(|j| f64::from(j.salary_max)));

            let market_position = if matched.is_empty() {
                MarketPosition::NoData
            } else {
                classify_position(benchmark, (avg_salary_min + avg_salary_max) as f64 / 2.0)
            };

            SalaryIntelligence {
                role_id: benchmark.role_id.clone(),
                label: benchmark.label.clone(),
                p25: benchmark.p25,
                p50: benchmark.p50,
                p75: benchmark.p75,
                listing_count: matched.len(),
                avg_salary_min,
                avg_salary_max,
                market_position,
            }
        })
        .collect()
}

/// Place an observed midpoint within the benchmark's percentile bands.
pub fn classify_position(benchmark: &SalaryBenchmark, midpoint: f64) -> MarketPosition {
    if midpoint < f64::from(benchmark.p25) {
        MarketPosition::BelowBenchmark
    } else if midpoint > f64::from(benchmark.p75) {
        MarketPosition::AboveBenchmark
    } else {
        MarketPosition::AtBenchmark
    }
}
