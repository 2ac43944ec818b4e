//! Record builders for analyzer tests.

use crate::models::{
    FundingImpact, JobListing, LayoffEvent, Localized, Organization, PolicyCategory, PolicyEvent,
    Region, SalaryBenchmark,
};
use chrono::NaiveDate;

pub fn create_test_org(slug: &str, region: Region, impact: FundingImpact) -> Organization {
    Organization {
        slug: slug.to_string(),
        name: format!("{} Health Center", slug),
        region,
        funding_impact_level: impact,
        ehr_system: "OCHIN Epic".to_string(),
        programs: vec!["ECM".to_string()],
    }
}

pub fn create_test_job(slug: &str, role: &str, min: u32, max: u32, bilingual: bool) -> JobListing {
    JobListing {
        id: format!("{}-{}-{}", slug, role, min),
        fqhc_slug: slug.to_string(),
        role_type: role.to_string(),
        region: "Bay Area".to_string(),
        salary_min: min,
        salary_max: max,
        bilingual,
        ehr_system: "OCHIN Epic".to_string(),
        programs: Vec::new(),
        posted_date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
    }
}

pub fn create_test_layoff(org: &str, region: &str, employees: u32, roles: &[&str]) -> LayoffEvent {
    LayoffEvent {
        id: format!("{}-{}", org, employees),
        organization: org.to_string(),
        region: region.to_string(),
        employees_affected: employees,
        roles_affected: roles.iter().map(|r| r.to_string()).collect(),
        reason: "medi-cal-cuts".to_string(),
        is_fqhc: true,
        status: "confirmed".to_string(),
    }
}

pub fn create_test_benchmark(role_id: &str, label: &str, p25: u32, p50: u32, p75: u32) -> SalaryBenchmark {
    SalaryBenchmark {
        role_id: role_id.to_string(),
        label: Localized::new(label, label),
        p25,
        p50,
        p75,
    }
}

pub fn create_test_policy(id: &str, date: &str) -> PolicyEvent {
    PolicyEvent {
        id: id.to_string(),
        date: date.parse().unwrap(),
        category: PolicyCategory::Federal,
        title: Localized::new(id, id),
        description: Localized::new("description", "descripción"),
        impact: Localized::new("impact", "impacto"),
        dollar_impact: None,
        people_affected: None,
    }
}
