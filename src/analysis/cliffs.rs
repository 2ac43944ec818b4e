//! Funding-cliff countdowns over the policy timeline.
//!
//! Output changes from day to day with no change in input. Callers pass the
//! evaluation instant explicitly.

use crate::models::{FundingCliff, PolicyEvent};
use chrono::{DateTime, NaiveTime, Utc};

const MILLIS_PER_DAY: i64 = 86_400_000;

/// Project every policy event onto a countdown from `now`, oldest first.
pub fn funding_cliffs(events: &[PolicyEvent], now: DateTime<Utc>) -> Vec<FundingCliff> {
    let today = now.date_naive();

    let mut cliffs: Vec<FundingCliff> = events
        .iter()
        .map(|event| FundingCliff {
            id: event.id.clone(),
            date: event.date,
            category: event.category,
            title: event.title.clone(),
            description: event.description.clone(),
            impact: event.impact.clone(),
            dollar_impact: event.dollar_impact.clone(),
            people_affected: event.people_affected.clone(),
            days_until: days_until(event, now),
            is_past: event.date < today,
        })
        .collect();

    // stable: same-day events keep timeline order
    cliffs.sort_by_key(|c| c.date);
    cliffs
}

/// Whole days from `now` to the start of the event date (UTC), rounded up.
fn days_until(event: &PolicyEvent, now: DateTime<Utc>) -> i64 {
    let start = event.date.and_time(NaiveTime::MIN).and_utc();
    let millis = (start - now).num_milliseconds();

    // ceil(millis / day) for a positive divisor
    -(-millis).div_euclid(MILLIS_PER_DAY)
}
