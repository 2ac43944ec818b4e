//! Analysis modules.
//!
//! Each view is a pure function over the reference collections. Only
//! [`funding_cliffs`] takes the current instant.

pub mod aggregator;
pub mod cliffs;
pub mod insights;
pub mod layoffs;
pub mod matching;
pub mod overview;
pub mod regional;
pub mod roles;
pub mod salary;

#[cfg(test)]
pub(crate) mod testing;

pub use cliffs::funding_cliffs;
pub use insights::strategic_insights;
pub use layoffs::{layoff_stats, layoffs_by_role, LayoffStats};
pub use overview::market_overview;
pub use regional::regional_snapshots;
pub use roles::role_demand;
pub use salary::salary_intelligence;
