//! Closed date interval used by period reports.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};
use crate::value_object::ValueObject;

/// A closed interval `[start, end]` in business time.
///
/// Both endpoints are inclusive: a movement stamped exactly at `start` or
/// exactly at `end` counts as *within* the interval. Opening-balance replay
/// therefore covers timestamps strictly before `start`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl ValueObject for DateRange {}

impl DateRange {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> DomainResult<Self> {
        if end < start {
            return Err(DomainError::validation("date range end precedes start"));
        }
        Ok(Self { start, end })
    }

    /// `[start, now]` — the interval period reports use for "to date".
    pub fn until_now(start: DateTime<Utc>) -> Self {
        let now = Utc::now();
        Self {
            start,
            end: now.max(start),
        }
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// Inclusive on both ends.
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        self.start <= at && at <= self.end
    }

    /// Strictly before the interval (opening-balance territory).
    pub fn is_before(&self, at: DateTime<Utc>) -> bool {
        at < self.start
    }

    /// `start_end` date pair for filenames, e.g. `2026-01-01_2026-01-31`.
    pub fn slug(&self) -> String {
        format!(
            "{}_{}",
            self.start.format("%Y-%m-%d"),
            self.end.format("%Y-%m-%d")
        )
    }
}
