//! Data models for the market-intelligence engine.
//!
//! This module contains the reference records published by the external
//! data providers (directory, job board, layoff tracker, salary tables and
//! policy timeline) and the derived records the engine computes from them.
//! Every record serializes to camelCase JSON.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Shared enumerations
// ---------------------------------------------------------------------------

/// California region an organization is cataloged under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Region {
    #[serde(rename = "Los Angeles")]
    LosAngeles,
    #[serde(rename = "San Diego")]
    SanDiego,
    #[serde(rename = "Bay Area")]
    BayArea,
    #[serde(rename = "Sacramento")]
    Sacramento,
    #[serde(rename = "Central Valley")]
    CentralValley,
    #[serde(rename = "Inland Empire")]
    InlandEmpire,
    #[serde(rename = "Central Coast")]
    CentralCoast,
    #[serde(rename = "North State")]
    NorthState,
    #[serde(rename = "North Coast")]
    NorthCoast,
    /// Organizations operating across the whole state. Not part of the
    /// regional snapshot rotation.
    #[serde(rename = "Statewide")]
    Statewide,
}

impl Region {
    /// Regions covered by regional snapshots, in display order.
    ///
    /// `Statewide` is intentionally absent.
    pub const SNAPSHOT_ORDER: [Region; 9] = [
        Region::LosAngeles,
        Region::SanDiego,
        Region::BayArea,
        Region::Sacramento,
        Region::CentralValley,
        Region::InlandEmpire,
        Region::CentralCoast,
        Region::NorthState,
        Region::NorthCoast,
    ];

    /// Display label, identical to the serialized form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Region::LosAngeles => "Los Angeles",
            Region::SanDiego => "San Diego",
            Region::BayArea => "Bay Area",
            Region::Sacramento => "Sacramento",
            Region::CentralValley => "Central Valley",
            Region::InlandEmpire => "Inland Empire",
            Region::CentralCoast => "Central Coast",
            Region::NorthState => "North State",
            Region::NorthCoast => "North Coast",
            Region::Statewide => "Statewide",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How exposed an organization is to the upcoming funding changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FundingImpact {
    Low,
    Moderate,
    High,
}

impl fmt::Display for FundingImpact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FundingImpact::Low => write!(f, "Low"),
            FundingImpact::Moderate => write!(f, "Moderate"),
            FundingImpact::High => write!(f, "High"),
        }
    }
}

/// Output language for bilingual text.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// English (default)
    #[default]
    En,
    /// Spanish
    Es,
}

/// A piece of text published in English and Spanish.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Localized {
    pub en: String,
    pub es: String,
}

impl Localized {
    pub fn new(en: impl Into<String>, es: impl Into<String>) -> Self {
        Self {
            en: en.into(),
            es: es.into(),
        }
    }

    /// Returns the text for the requested language.
    pub fn get(&self, lang: Language) -> &str {
        match lang {
            Language::En => &self.en,
            Language::Es => &self.es,
        }
    }
}

// ---------------------------------------------------------------------------
// Reference records
// ---------------------------------------------------------------------------

/// A community health center in the directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    /// Unique identifier; the join key used by job listings.
    pub slug: String,
    pub name: String,
    pub region: Region,
    pub funding_impact_level: FundingImpact,
    #[serde(default)]
    pub ehr_system: String,
    /// Care-program tags (ECM, CCM, Community Supports, ...).
    #[serde(default)]
    pub programs: Vec<String>,
}

/// An open position posted by an organization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobListing {
    pub id: String,
    /// Slug of the posting organization. May not resolve.
    pub fqhc_slug: String,
    /// Free-text role label.
    pub role_type: String,
    /// Free-text location string.
    pub region: String,
    pub salary_min: u32,
    pub salary_max: u32,
    #[serde(default)]
    pub bilingual: bool,
    #[serde(default)]
    pub ehr_system: String,
    #[serde(default)]
    pub programs: Vec<String>,
    pub posted_date: NaiveDate,
}

impl JobListing {
    /// Midpoint of the advertised salary range.
    pub fn midpoint(&self) -> f64 {
        (f64::from(self.salary_min) + f64::from(self.salary_max)) / 2.0
    }
}

/// A reported layoff or workforce reduction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoffEvent {
    pub id: String,
    /// Organization name as reported; not guaranteed to match a slug.
    pub organization: String,
    /// Region string as reported; joined directly against snapshot regions.
    pub region: String,
    pub employees_affected: u32,
    /// Free-text role labels affected by the layoff.
    #[serde(default)]
    pub roles_affected: Vec<String>,
    #[serde(default)]
    pub reason: String,
    #[serde(default)]
    pub is_fqhc: bool,
    #[serde(default)]
    pub status: String,
}

/// Canonical salary percentiles for a role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalaryBenchmark {
    pub role_id: String,
    pub label: Localized,
    pub p25: u32,
    pub p50: u32,
    pub p75: u32,
}

/// Level of government a policy event originates from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PolicyCategory {
    Federal,
    State,
    Local,
}

impl fmt::Display for PolicyCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PolicyCategory::Federal => write!(f, "Federal"),
            PolicyCategory::State => write!(f, "State"),
            PolicyCategory::Local => write!(f, "Local"),
        }
    }
}

/// A dated entry on the policy timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyEvent {
    pub id: String,
    /// Effective date (calendar date, no time component).
    pub date: NaiveDate,
    pub category: PolicyCategory,
    pub title: Localized,
    pub description: Localized,
    pub impact: Localized,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dollar_impact: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub people_affected: Option<String>,
}

// ---------------------------------------------------------------------------
// Derived records
// ---------------------------------------------------------------------------

/// A label with the number of listings carrying it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelCount {
    pub label: String,
    pub count: usize,
}

/// The organization with the most job listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopEmployer {
    pub slug: String,
    /// Directory name, or the slug when the organization is not in the directory.
    pub name: String,
    pub job_count: usize,
}

/// Sitewide summary counters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketOverview {
    pub total_fqhcs: usize,
    pub total_jobs: usize,
    /// Distinct organizations named in the layoff log.
    pub layoff_organizations: usize,
    /// Total headcount across all layoff events.
    pub layoff_employees: u64,
    /// Distinct region strings appearing in job listings.
    pub regions_with_jobs: usize,
    /// Distinct role-type strings appearing in job listings.
    pub role_types: usize,
    /// Mean salary midpoint across all listings.
    pub avg_salary: u64,
    pub bilingual_pct: u32,
    pub high_impact_fqhcs: usize,
    pub top_employer: Option<TopEmployer>,
    pub top_role: Option<LabelCount>,
    pub top_region: Option<LabelCount>,
}

/// Qualitative labor-market distress of a region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthSignal {
    Strong,
    Caution,
    Warning,
}

impl fmt::Display for HealthSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HealthSignal::Strong => write!(f, "Strong"),
            HealthSignal::Caution => write!(f, "Caution"),
            HealthSignal::Warning => write!(f, "Warning"),
        }
    }
}

impl HealthSignal {
    /// Returns an emoji representation of the signal.
    pub fn emoji(&self) -> &'static str {
        match self {
            HealthSignal::Strong => "🟢",
            HealthSignal::Caution => "🟡",
            HealthSignal::Warning => "🔴",
        }
    }
}

/// Per-region labor-market picture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionalSnapshot {
    pub region: Region,
    pub fqhc_count: usize,
    pub total_jobs: usize,
    pub avg_salary_min: u64,
    pub avg_salary_max: u64,
    /// Number of layoff events reported in the region.
    pub recent_layoffs: usize,
    /// Headcount summed over those events.
    pub layoff_employees: u64,
    pub high_impact: usize,
    pub moderate_impact: usize,
    pub low_impact: usize,
    pub top_roles: Vec<LabelCount>,
    pub health_signal: HealthSignal,
}

/// Hiring-demand classification for a role type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DemandSignal {
    Hot,
    Steady,
    Cooling,
}

impl fmt::Display for DemandSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DemandSignal::Hot => write!(f, "Hot"),
            DemandSignal::Steady => write!(f, "Steady"),
            DemandSignal::Cooling => write!(f, "Cooling"),
        }
    }
}

impl DemandSignal {
    pub fn emoji(&self) -> &'static str {
        match self {
            DemandSignal::Hot => "🔥",
            DemandSignal::Steady => "➖",
            DemandSignal::Cooling => "❄️",
        }
    }
}

/// Demand picture for one exact role-type label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleDemand {
    pub role_type: String,
    pub job_count: usize,
    pub avg_salary_min: u64,
    pub avg_salary_max: u64,
    pub bilingual_pct: u32,
    pub top_regions: Vec<LabelCount>,
    /// Layoff headcount attributed to this exact label.
    pub layoffs_in_role: u64,
    pub demand_signal: DemandSignal,
}

/// A policy event projected onto a countdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FundingCliff {
    pub id: String,
    pub date: NaiveDate,
    pub category: PolicyCategory,
    pub title: Localized,
    pub description: Localized,
    pub impact: Localized,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dollar_impact: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub people_affected: Option<String>,
    /// Whole days from the evaluation instant to the event, rounded up.
    pub days_until: i64,
    pub is_past: bool,
}

/// Where observed salaries sit against a benchmark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MarketPosition {
    BelowBenchmark,
    AtBenchmark,
    AboveBenchmark,
    NoData,
}

impl fmt::Display for MarketPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MarketPosition::BelowBenchmark => write!(f, "Below benchmark"),
            MarketPosition::AtBenchmark => write!(f, "At benchmark"),
            MarketPosition::AboveBenchmark => write!(f, "Above benchmark"),
            MarketPosition::NoData => write!(f, "No data"),
        }
    }
}

/// Observed listings compared against one salary benchmark.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalaryIntelligence {
    pub role_id: String,
    pub label: Localized,
    pub p25: u32,
    pub p50: u32,
    pub p75: u32,
    pub listing_count: usize,
    pub avg_salary_min: u64,
    pub avg_salary_max: u64,
    pub market_position: MarketPosition,
}

/// Theme of a generated insight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InsightCategory {
    DemandShift,
    SalaryTrend,
    FundingRisk,
    Opportunity,
}

impl fmt::Display for InsightCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InsightCategory::DemandShift => write!(f, "Demand shift"),
            InsightCategory::SalaryTrend => write!(f, "Salary trend"),
            InsightCategory::FundingRisk => write!(f, "Funding risk"),
            InsightCategory::Opportunity => write!(f, "Opportunity"),
        }
    }
}

/// A generated narrative insight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategicInsight {
    pub id: String,
    pub category: InsightCategory,
    pub title: Localized,
    pub narrative: Localized,
    /// Literal figures backing the narrative.
    pub data_points: Vec<String>,
    pub action: Localized,
}

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

/// Metadata about a generated market report.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportMetadata {
    /// Instant the funding-cliff countdowns were evaluated against.
    pub generated_at: DateTime<Utc>,
    pub language: Language,
    pub organizations: usize,
    pub job_listings: usize,
    pub layoff_events: usize,
    pub salary_benchmarks: usize,
    pub policy_events: usize,
}

/// Every engine view bundled for rendering.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketReport {
    pub metadata: ReportMetadata,
    pub overview: MarketOverview,
    pub regions: Vec<RegionalSnapshot>,
    pub roles: Vec<RoleDemand>,
    pub funding_cliffs: Vec<FundingCliff>,
    pub salaries: Vec<SalaryIntelligence>,
    pub insights: Vec<StrategicInsight>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_serializes_as_display_label() {
        let json = serde_json::to_string(&Region::InlandEmpire).unwrap();
        assert_eq!(json, "\"Inland Empire\"");

        let region: Region = serde_json::from_str("\"Statewide\"").unwrap();
        assert_eq!(region, Region::Statewide);
        assert_eq!(region.to_string(), "Statewide");
    }

    #[test]
    fn test_snapshot_order_excludes_statewide() {
        assert_eq!(Region::SNAPSHOT_ORDER.len(), 9);
        assert!(!Region::SNAPSHOT_ORDER.contains(&Region::Statewide));
        assert_eq!(Region::SNAPSHOT_ORDER[0], Region::LosAngeles);
        assert_eq!(Region::SNAPSHOT_ORDER[8], Region::NorthCoast);
    }

    #[test]
    fn test_health_signal_ordering() {
        assert!(HealthSignal::Strong < HealthSignal::Caution);
        assert!(HealthSignal::Caution < HealthSignal::Warning);
        assert_eq!(HealthSignal::Warning.emoji(), "🔴");
    }

    #[test]
    fn test_market_position_kebab_case() {
        let json = serde_json::to_string(&MarketPosition::BelowBenchmark).unwrap();
        assert_eq!(json, "\"below-benchmark\"");
        let json = serde_json::to_string(&MarketPosition::NoData).unwrap();
        assert_eq!(json, "\"no-data\"");
    }

    #[test]
    fn test_localized_get() {
        let text = Localized::new("Nurse", "Enfermera");
        assert_eq!(text.get(Language::En), "Nurse");
        assert_eq!(text.get(Language::Es), "Enfermera");
    }

    #[test]
    fn test_job_listing_from_provider_json() {
        let json = r#"{
            "id": "job-1",
            "fqhcSlug": "acme",
            "roleType": "Community Health Worker",
            "region": "Bay Area",
            "salaryMin": 46000,
            "salaryMax": 58000,
            "bilingual": true,
            "postedDate": "2025-03-01"
        }"#;

        let job: JobListing = serde_json::from_str(json).unwrap();
        assert_eq!(job.fqhc_slug, "acme");
        assert!(job.bilingual);
        assert!(job.programs.is_empty());
        assert_eq!(job.midpoint(), 52000.0);
        assert_eq!(
            job.posted_date,
            NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()
        );
    }

    #[test]
    fn test_policy_event_optional_fields() {
        let json = r#"{
            "id": "h1-fee",
            "date": "2026-01-01",
            "category": "federal",
            "title": {"en": "Fee", "es": "Tarifa"},
            "description": {"en": "d", "es": "d"},
            "impact": {"en": "i", "es": "i"}
        }"#;

        let event: PolicyEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event.category, PolicyCategory::Federal);
        assert!(event.dollar_impact.is_none());

        let out = serde_json::to_string(&event).unwrap();
        assert!(!out.contains("dollarImpact"));
    }
}
