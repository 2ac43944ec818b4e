//! Time source for the funding-cliff countdowns.
//!
//! The cliff tracker is the only view whose output depends on the current
//! instant, so "now" is always passed in through a [`Clock`].

use anyhow::{anyhow, Result};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

/// Supplies the evaluation instant.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Reads the system wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Always returns the same instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub DateTime<Utc>);

impl FixedClock {
    /// Parse `YYYY-MM-DD` (midnight UTC) or an RFC 3339 timestamp.
    pub fn parse(value: &str) -> Result<Self> {
        if let Ok(instant) = DateTime::parse_from_rfc3339(value) {
            return Ok(Self(instant.with_timezone(&Utc)));
        }

        let date = NaiveDate::parse_from_str(value, "%Y-%m-%d")
            .map_err(|_| anyhow!("Invalid date '{}': expected YYYY-MM-DD or RFC 3339", value))?;

        Ok(Self(date.and_time(NaiveTime::MIN).and_utc()))
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
