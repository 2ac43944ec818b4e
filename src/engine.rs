//! Query facade over a loaded [`Dataset`].

use crate::analysis;
use crate::clock::Clock;
use crate::dataset::Dataset;
use crate::models::{
    FundingCliff, Language, MarketOverview, MarketReport, RegionalSnapshot, ReportMetadata,
    RoleDemand, SalaryIntelligence, StrategicInsight,
};
use tracing::debug;

/// Read-only market-intelligence queries.
///
/// Holds no state besides the borrowed dataset; every call recomputes its
/// view from scratch.
#[derive(Debug, Clone, Copy)]
pub struct MarketIntelligence<'a> {
    data: &'a Dataset,
}

impl<'a> MarketIntelligence<'a> {
    pub fn new(data: &'a Dataset) -> Self {
        Self { data }
    }

    pub fn market_overview(&self) -> MarketOverview {
        analysis::market_overview(&self.data.organizations, &self.data.jobs, &self.data.layoffs)
    }

    /// One snapshot per region, in fixed region order.
    pub fn regional_snapshots(&self) -> Vec<RegionalSnapshot> {
        analysis::regional_snapshots(&self.data.organizations, &self.data.jobs, &self.data.layoffs)
    }

    /// Role demand sorted by listing count, descending.
    pub fn role_demand(&self) -> Vec<RoleDemand> {
        analysis::role_demand(&self.data.organizations, &self.data.jobs, &self.data.layoffs)
    }

    /// Countdowns relative to the clock's current instant, sorted by date.
    pub fn funding_cliffs(&self, clock: &dyn Clock) -> Vec<FundingCliff> {
        analysis::funding_cliffs(&self.data.policy_events, clock.now())
    }

    /// One comparison per benchmark, in benchmark order.
    pub fn salary_intelligence(&self) -> Vec<SalaryIntelligence> {
        analysis::salary_intelligence(&self.data.benchmarks, &self.data.jobs)
    }

    pub fn strategic_insights(&self) -> Vec<StrategicInsight> {
        analysis::strategic_insights(
            &self.market_overview(),
            &self.regional_snapshots(),
            &self.role_demand(),
        )
    }

    /// Compute every view at once.
    pub fn report(&self, clock: &dyn Clock, language: Language) -> MarketReport {
        let generated_at = clock.now();
        debug!("Building market report as of {}", generated_at);

        let overview = self.market_overview();
        let regions = self.regional_snapshots();
        let roles = self.role_demand();
        let insights = analysis::strategic_insights(&overview, &regions, &roles);

        MarketReport {
            metadata: ReportMetadata {
                generated_at,
                language,
                organizations: self.data.organizations.len(),
                job_listings: self.data.jobs.len(),
                layoff_events: self.data.layoffs.len(),
                salary_benchmarks: self.data.benchmarks.len(),
                policy_events: self.data.policy_events.len(),
            },
            overview,
            regions,
            roles,
            funding_cliffs: analysis::funding_cliffs(&self.data.policy_events, generated_at),
            salaries: self.salary_intelligence(),
            insights,
        }
    }
}
