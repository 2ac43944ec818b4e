//! Sitewide summary counters.

use super::aggregator::{percentage, rounded_mean, Tally};
use super::layoffs::layoff_stats;
use crate::models::{
    FundingImpact, JobListing, LayoffEvent, MarketOverview, Organization, TopEmployer,
};
use tracing::debug;

/// Compute the sitewide overview.
///
/// Ties for top employer, role and region go to the first one encountered
/// in listing order.
pub fn market_overview(
    organizations: &[Organization],
    jobs: &[JobListing],
    layoffs: &[LayoffEvent],
) -> MarketOverview {
    let layoff_totals = layoff_stats(layoffs);

    let employers = Tally::from_labels(jobs.iter().map(|j| j.fqhc_slug.as_str()));
    let roles = Tally::from_labels(jobs.iter().map(|j| j.role_type.as_str()));
    let regions = Tally::from_labels(jobs.iter().map(|j| j.region.as_str()));

    let top_employer = employers.top().map(|top| {
        let name = match organizations.iter().find(|o| o.slug == top.label) {
            Some(org) => org.name.clone(),
            None => {
                debug!(slug = %top.label, "Top employer not in directory, using slug as name");
                top.label.clone()
            }
        };
        TopEmployer {
            slug: top.label,
            name,
            job_count: top.count,
        }
    });

    MarketOverview {
        total_fqhcs: organizations.len(),
        total_jobs: jobs.len(),
        layoff_organizations: layoff_totals.unique_organizations,
        layoff_employees: layoff_totals.total_employees,
        regions_with_jobs: regions.len(),
        role_types: roles.len(),
        avg_salary: rounded_mean(jobs.iter().map(JobListing::midpoint)),
        bilingual_pct: percentage(jobs.iter().filter(|j| j.bilingual).count(), jobs.len()),
        high_impact_fqhcs: organizations
            .iter()
            .filter(|o| o.funding_impact_level == FundingImpact::High)
            .count(),
        top_employer,
        top_role: roles.top(),
        top_region: regions.top(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::testing::*;
    use crate::models::Region;

    #[test]
    fn test_overview_counts() {
        let orgs = vec![
            create_test_org("acme", Region::BayArea, FundingImpact::High),
            create_test_org("valley", Region::CentralValley, FundingImpact::Low),
        ];
        let mut jobs = vec![
            create_test_job("acme", "Medical Assistant", 40000, 50000, true),
            create_test_job("valley", "Registered Nurse", 90000, 110000, false),
            create_test_job("valley", "Medical Assistant", 42000, 48000, true),
        ];
        jobs[1].region = "Central Valley".to_string();
        jobs[2].region = "Central Valley".to_string();
        let layoffs = vec![
            create_test_layoff("Acme Health", "Bay Area", 30, &[]),
            create_test_layoff("ACME health", "Bay Area", 20, &[]),
        ];

        let overview = market_overview(&orgs, &jobs, &layoffs);

        assert_eq!(overview.total_fqhcs, 2);
        assert_eq!(overview.total_jobs, 3);
        assert_eq!(overview.layoff_organizations, 1);
        assert_eq!(overview.layoff_employees, 50);
        assert_eq!(overview.regions_with_jobs, 2);
        assert_eq!(overview.role_types, 2);
        // midpoints 45000, 100000, 45000
        assert_eq!(overview.avg_salary, 63333);
        assert_eq!(overview.bilingual_pct, 67);
        assert_eq!(overview.high_impact_fqhcs, 1);

        let top = overview.top_employer.unwrap();
        assert_eq!(top.slug, "valley");
        assert_eq!(top.name, "valley Health Center");
        assert_eq!(top.job_count, 2);

        assert_eq!(overview.top_role.unwrap().label, "Medical Assistant");
        assert_eq!(overview.top_region.unwrap().label, "Central Valley");
    }

    #[test]
    fn test_overview_ties_go_to_first_encountered() {
        let orgs = vec![
            create_test_org("a", Region::BayArea, FundingImpact::Low),
            create_test_org("b", Region::BayArea, FundingImpact::Low),
        ];
        let jobs = vec![
            create_test_job("b", "Dentist", 1, 1, false),
            create_test_job("a", "Dental Assistant", 1, 1, false),
        ];

        let overview = market_overview(&orgs, &jobs, &[]);
        assert_eq!(overview.top_employer.unwrap().slug, "b");
        assert_eq!(overview.top_role.unwrap().label, "Dentist");
    }

    #[test]
    fn test_overview_empty_inputs() {
        let overview = market_overview(&[], &[], &[]);

        assert_eq!(overview.total_jobs, 0);
        assert_eq!(overview.avg_salary, 0);
        assert_eq!(overview.bilingual_pct, 0);
        assert!(overview.top_employer.is_none());
        assert!(overview.top_role.is_none());
        assert!(overview.top_region.is_none());
    }

    #[test]
    fn test_dangling_top_employer_falls_back_to_slug() {
        let jobs = vec![create_test_job("ghost", "Dentist", 100, 200, false)];

        let overview = market_overview(&[], &jobs, &[]);
        let top = overview.top_employer.unwrap();
        assert_eq!(top.name, "ghost");
        assert_eq!(overview.total_jobs, 1);
        assert_eq!(overview.avg_salary, 150);
    }
}
