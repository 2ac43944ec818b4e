//! Layoff log aggregation.

use super::matching::{org_name_key, role_group_key};
use crate::models::LayoffEvent;
use std::collections::{HashMap, HashSet};

/// Totals across the whole layoff log.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LayoffStats {
    /// Distinct organizations, by normalized name.
    pub unique_organizations: usize,
    pub total_employees: u64,
}

/// Count distinct organizations and sum headcount over all events.
pub fn layoff_stats(layoffs: &[LayoffEvent]) -> LayoffStats {
    let organizations: HashSet<String> = layoffs
        .iter()
        .map(|l| org_name_key(&l.organization))
        .collect();

    LayoffStats {
        unique_organizations: organizations.len(),
        total_employees: layoffs.iter().map(|l| u64::from(l.employees_affected)).sum(),
    }
}

/// Headcount per affected role label.
///
/// An event contributes its full headcount to every label it lists; a
/// 300-person layoff naming two roles adds 300 to each. Headcount is not
/// apportioned across roles.
pub fn layoffs_by_role(layoffs: &[LayoffEvent]) -> HashMap<String, u64> {
    let mut by_role: HashMap<String, u64> = HashMap::new();

    for layoff in layoffs {
        for role in &layoff.roles_affected {
            *by_role
                .entry(role_group_key(role).to_string())
                .or_default() += u64::from(layoff.employees_affected);
        }
    }

    by_role
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layoff(org: &str, employees: u32, roles: &[&str]) -> LayoffEvent {
        LayoffEvent {
            id: format!("{}-{}", org, employees),
            organization: org.to_string(),
            region: "Bay Area".to_string(),
            employees_affected: employees,
            roles_affected: roles.iter().map(|r| r.to_string()).collect(),
            reason: "funding".to_string(),
            is_fqhc: true,
            status: "completed".to_string(),
        }
    }

    #[test]
    fn test_layoff_stats() {
        let layoffs = vec![
            layoff("Acme Health", 40, &[]),
            layoff("acme  health", 10, &[]),
            layoff("Valley Clinic", 25, &[]),
        ];

        let stats = layoff_stats(&layoffs);
        assert_eq!(stats.unique_organizations, 2);
        assert_eq!(stats.total_employees, 75);
    }

    #[test]
    fn test_layoff_stats_empty() {
        assert_eq!(layoff_stats(&[]), LayoffStats::default());
    }

    #[test]
    fn test_headcount_counted_once_per_listed_role() {
        let layoffs = vec![layoff(
            "Acme Health",
            300,
            &["Registered Nurse", "Medical Assistant"],
        )];

        let by_role = layoffs_by_role(&layoffs);
        assert_eq!(by_role.get("Registered Nurse"), Some(&300));
        assert_eq!(by_role.get("Medical Assistant"), Some(&300));
        assert_eq!(by_role.values().sum::<u64>(), 600);
    }

    #[test]
    fn test_headcount_accumulates_across_events() {
        let layoffs = vec![
            layoff("A", 20, &["Medical Assistant"]),
            layoff("B", 15, &["Medical Assistant", "Front Desk"]),
        ];

        let by_role = layoffs_by_role(&layoffs);
        assert_eq!(by_role.get("Medical Assistant"), Some(&35));
        assert_eq!(by_role.get("Front Desk"), Some(&15));
        assert!(by_role.get("medical assistant").is_none());
    }
}
