//! Role demand classification.

use super::aggregator::{group_by_key, percentage, rounded_mean, Tally};
use super::layoffs::layoffs_by_role;
use super::matching::role_group_key;
use crate::models::{DemandSignal, JobListing, LayoffEvent, Organization, RoleDemand};
use std::collections::HashMap;
use tracing::debug;

/// Minimum listings for a role to be `hot`.
pub const HOT_MIN_LISTINGS: usize = 10;
/// Regions listed per role.
pub const TOP_REGIONS_PER_ROLE: usize = 3;

/// Group listings by exact role type and classify demand for each.
///
/// Sorted by listing count, descending; equal counts keep first-seen order.
pub fn role_demand(
    organizations: &[Organization],
    jobs: &[JobListing],
    layoffs: &[LayoffEvent],
) -> Vec<RoleDemand> {
    let layoffs_per_role = layoffs_by_role(layoffs);
    // First organization wins on duplicate slugs, as in the overview.
    let mut org_regions: HashMap<&str, &str> = HashMap::new();
    for org in organizations {
        org_regions
            .entry(org.slug.as_str())
            .or_insert(org.region.as_str());
    }

    let mut demand: Vec<RoleDemand> = group_by_key(jobs, |j| role_group_key(&j.role_type))
        .into_iter()
        .map(|(role_type, listings)| {
            let job_count = listings.len();
            let layoffs_in_role = layoffs_per_role.get(&role_type).copied().unwrap_or(0);

            let mut regions = Tally::new();
            for job in &listings {
                match org_regions.get(job.fqhc_slug.as_str()) {
                    Some(region) => regions.add(region),
                    None => debug!(
                        job = %job.id,
                        slug = %job.fqhc_slug,
                        "Job excluded from role region breakdown: organization not found"
                    ),
                }
            }

            RoleDemand {
                job_count,
                avg_salary_min: rounded_mean(listings.iter().map(|j| f64::from(j.salary_min))),
                avg_salary_max: rounded_mean(listings.iter().map(|j| f64::from(j.salary_max))),
                bilingual_pct: percentage(
                    listings.iter().filter(|j| j.bilingual).count(),
                    job_count,
                ),
                top_regions: regions.top_n(TOP_REGIONS_PER_ROLE),
                layoffs_in_role,
                demand_signal: classify_demand(job_count, layoffs_in_role),
                role_type,
            }
        })
        .collect();

    demand.sort_by_key(|d| std::cmp::Reverse(d.job_count));
    demand
}

/// `hot` needs volume and few layoffs; `cooling` means layoffs outnumber openings.
pub fn classify_demand(job_count: usize, layoffs_in_role: u64) -> DemandSignal {
    let jobs = job_count as u64;

    if job_count >= HOT_MIN_LISTINGS && layoffs_in_role * 2 < jobs {
        DemandSignal::Hot
    } else if layoffs_in_role > jobs {
        DemandSignal::Cooling
    } else {
        DemandSignal::Steady
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::testing::*;
    use crate::models::{FundingImpact, LabelCount, Region};

    fn jobs_for(slug: &str, role: &str, n: usize) -> Vec<JobListing> {
        (0..n)
            .map(|i| {
                let mut job = create_test_job(slug, role, 40000, 50000, i % 2 == 0);
                job.id = format!("{}-{}-{}", slug, role, i);
                job
            })
            .collect()
    }

    #[test]
    fn test_grouping_is_exact_and_sorted() {
        let orgs = vec![create_test_org("a", Region::BayArea, FundingImpact::Low)];
        let mut jobs = jobs_for("a", "Medical Assistant", 2);
        jobs.extend(jobs_for("a", "Medical Assistants", 3));
        jobs.extend(jobs_for("a", "medical assistant", 1));

        let demand = role_demand(&orgs, &jobs, &[]);

        assert_eq!(demand.len(), 3);
        assert_eq!(demand[0].role_type, "Medical Assistants");
        assert_eq!(demand[0].job_count, 3);
        for entry in &demand {
            let expected = jobs.iter().filter(|j| j.role_type == entry.role_type).count();
            assert_eq!(entry.job_count, expected);
            assert!(entry.avg_salary_min <= entry.avg_salary_max);
        }
    }

    #[test]
    fn test_hot_role() {
        let orgs = vec![create_test_org("a", Region::LosAngeles, FundingImpact::Low)];
        let jobs = jobs_for("a", "Community Health Worker", 10);
        let layoffs = vec![create_test_layoff("X", "Los Angeles", 4, &["Community Health Worker"])];

        let demand = role_demand(&orgs, &jobs, &layoffs);

        assert_eq!(demand[0].layoffs_in_role, 4);
        assert_eq!(demand[0].demand_signal, DemandSignal::Hot);
        assert_eq!(demand[0].bilingual_pct, 50);
        assert_eq!(demand[0].top_regions[0].label, "Los Angeles");
        assert_eq!(demand[0].top_regions[0].count, 10);
    }

    #[test]
    fn test_cooling_role_with_multi_counted_layoffs() {
        let orgs = vec![create_test_org("a", Region::SanDiego, FundingImpact::Low)];
        let mut jobs = jobs_for("a", "Registered Nurse", 2);
        jobs.extend(jobs_for("a", "Medical Assistant", 1));
        let layoffs = vec![create_test_layoff(
            "X",
            "San Diego",
            300,
            &["Registered Nurse", "Medical Assistant"],
        )];

        let demand = role_demand(&orgs, &jobs, &layoffs);

        for entry in &demand {
            assert_eq!(entry.layoffs_in_role, 300);
            assert_eq!(entry.demand_signal, DemandSignal::Cooling);
        }
    }

    #[test]
    fn test_dangling_jobs_counted_but_not_in_regions() {
        let orgs = vec![create_test_org("a", Region::Sacramento, FundingImpact::Low)];
        let mut jobs = jobs_for("a", "Dentist", 1);
        jobs.extend(jobs_for("ghost", "Dentist", 2));

        let demand = role_demand(&orgs, &jobs, &[]);

        assert_eq!(demand[0].job_count, 3);
        assert_eq!(demand[0].top_regions.len(), 1);
        assert_eq!(demand[0].top_regions[0].count, 1);
    }

    #[test]
    fn test_top_regions_limited_to_three() {
        let orgs = vec![
            create_test_org("la", Region::LosAngeles, FundingImpact::Low),
            create_test_org("sd", Region::SanDiego, FundingImpact::Low),
            create_test_org("ba", Region::BayArea, FundingImpact::Low),
            create_test_org("nc", Region::NorthCoast, FundingImpact::Low),
        ];
        let mut jobs = jobs_for("la", "Dentist", 1);
        jobs.extend(jobs_for("sd", "Dentist", 2));
        jobs.extend(jobs_for("ba", "Dentist", 1));
        jobs.extend(jobs_for("nc", "Dentist", 3));

        let demand = role_demand(&orgs, &jobs, &[]);
        let labels: Vec<_> = demand[0].top_regions.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, vec!["North Coast", "San Diego", "Los Angeles"]);
    }

    #[test]
    fn test_classify_demand() {
        assert_eq!(classify_demand(10, 4), DemandSignal::Hot);
        assert_eq!(classify_demand(10, 5), DemandSignal::Steady);
        assert_eq!(classify_demand(9, 0), DemandSignal::Steady);
        assert_eq!(classify_demand(9, 10), DemandSignal::Cooling);
        assert_eq!(classify_demand(5, 5), DemandSignal::Steady);
        assert_eq!(classify_demand(0, 1), DemandSignal::Cooling);
    }

    #[test]
    fn test_duplicate_slug_uses_first_organization() {
        let orgs = vec![
            create_test_org("dup", Region::NorthCoast, FundingImpact::Low),
            create_test_org("dup", Region::SanDiego, FundingImpact::High),
        ];
        let jobs = jobs_for("dup", "Dentist", 2);

        let demand = role_demand(&orgs, &jobs, &[]);
        assert_eq!(
            demand[0].top_regions,
            vec![LabelCount {
                label: "North Coast".to_string(),
                count: 2
            }]
        );
    }
}
