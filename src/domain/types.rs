/// Core types used throughout the domain layer
///
/// This module defines the identifier type shared by Habit and CompletionRecord
/// and the calendar helpers that decide what "today" and "this week" mean.

use std::fmt;
use std::str::FromStr;

use chrono::{Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// Number of calendar days covered by the weekly report
pub const REPORT_DAYS: usize = 7;

/// Unique identifier for a habit
///
/// Habit ids are small integers handed out by counting the existing habits,
/// so the first habit is 1, the second is 2, and so on. The wrapper keeps
/// them from being mixed up with other integers while serializing as a
/// plain JSON number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HabitId(pub i64);

impl HabitId {
    /// Id for the habit that will be stored after `existing` others
    pub fn next_after(existing: usize) -> Self {
        Self(existing as i64 + 1)
    }

    /// Raw integer value
    pub fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for HabitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for HabitId {
    type Err = DomainError;

    /// Parse a habit id from a path segment such as `/habits/3`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<i64>()
            .map(HabitId)
            .map_err(|_| DomainError::Validation {
                message: format!("Habit id must be an integer, got '{}'", s),
            })
    }
}

impl From<i64> for HabitId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

/// Today's calendar date in UTC
pub fn today() -> NaiveDate {
    Utc::now().naive_utc().date()
}

/// The seven calendar days ending on `today`, oldest first
pub fn week_ending(today: NaiveDate) -> [NaiveDate; REPORT_DAYS] {
    let start = today - Duration::days(REPORT_DAYS as i64 - 1);
    std::array::from_fn(|offset| start + Duration::days(offset as i64))
}
