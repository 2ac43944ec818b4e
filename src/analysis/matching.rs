//! Join-key normalization for the loosely related datasets.
//!
//! The datasets are maintained independently and reference each other by
//! free text. Each join owns exactly one key function here:
//!
//! | join | key | policy |
//! |---|---|---|
//! | job listings grouped by role | [`role_group_key`] | exact string |
//! | job listings to layoff role labels | [`role_group_key`] | exact string |
//! | job listings to salary benchmarks | [`benchmark_key`] / [`benchmark_matches`] | letters only, lowercase, substring either way |
//! | layoff events counted per organization | [`org_name_key`] | trimmed, lowercase, whitespace collapsed |
//!
//! Known failure modes: exact role grouping treats "Medical Assistant" and
//! "Medical Assistants" as two roles, while benchmark matching over-matches
//! whenever one key is a substring of another ("nurse" matches both
//! "registerednurse" and "nursepractitioner").

/// Grouping key for role-type labels. Exact, no normalization.
pub fn role_group_key(label: &str) -> &str {
    label
}

/// Matching key for salary benchmarks: lowercase letters only.
pub fn benchmark_key(label: &str) -> String {
    label
        .chars()
        .filter(|c| c.is_alphabetic())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Whether a listing's role label matches a benchmark label.
///
/// Keys match when equal or when either contains the other. An empty key
/// never matches.
pub fn benchmark_matches(role_type: &str, benchmark_label: &str) -> bool {
    let role = benchmark_key(role_type);
    let bench = benchmark_key(benchmark_label);

    if role.is_empty() || bench.is_empty() {
        return false;
    }

    role.contains(&bench) || bench.contains(&role)
}

/// Key used to count distinct organizations in the layoff log.
pub fn org_name_key(name: &str) -> String {
    name.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_group_key_is_exact() {
        assert_ne!(
            role_group_key("Medical Assistant"),
            role_group_key("Medical Assistants")
        );
        assert_ne!(role_group_key("nurse"), role_group_key("Nurse"));
    }

    #[test]
    fn test_benchmark_key_strips_non_letters() {
        assert_eq!(benchmark_key("Registered Nurse (RN)"), "registerednursern");
        assert_eq!(benchmark_key("LCSW - Behavioral Health"), "lcswbehavioralhealth");
        assert_eq!(benchmark_key("123 / -"), "");
    }

    #[test]
    fn test_benchmark_matches_either_direction() {
        assert!(benchmark_matches("Medical Assistant", "Medical Assistant"));
        assert!(benchmark_matches("Bilingual Medical Assistant", "Medical Assistant"));
        assert!(benchmark_matches("Nurse", "Registered Nurse"));
        assert!(benchmark_matches("Nurse", "Nurse Practitioner"));
        assert!(!benchmark_matches("Dentist", "Registered Nurse"));
    }

    #[test]
    fn test_empty_key_never_matches() {
        assert!(!benchmark_matches("---", "Registered Nurse"));
        assert!(!benchmark_matches("Registered Nurse", ""));
    }

    #[test]
    fn test_org_name_key() {
        assert_eq!(
            org_name_key("  La Clinica   de la Raza "),
            org_name_key("la clinica de la raza")
        );
    }
}
