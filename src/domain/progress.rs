/// CompletionRecord entity for tracking daily habit completions
///
/// This module defines the record stored for each (habit, day) pair and the
/// lookups the service layer runs over a loaded progress collection.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::HabitId;

/// Whether a habit was completed on a given calendar day
///
/// There is at most one record per `(habit_id, date)`. The habit id is not
/// checked against the habit collection, so a record can point at a habit
/// that does not exist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionRecord {
    /// Which habit this record is for
    pub habit_id: HabitId,
    /// Calendar day, serialized as YYYY-MM-DD
    pub date: NaiveDate,
    /// True once the habit has been completed that day
    pub status: bool,
}

impl CompletionRecord {
    /// A completed record for the given habit and day
    pub fn completed(habit_id: HabitId, date: NaiveDate) -> Self {
        Self {
            habit_id,
            date,
            status: true,
        }
    }

    fn matches(&self, habit_id: HabitId, date: NaiveDate) -> bool {
        self.habit_id == habit_id && self.date == date
    }
}

/// Find the record for a habit on a specific day
pub fn find_record(
    records: &[CompletionRecord],
    habit_id: HabitId,
    date: NaiveDate,
) -> Option<&CompletionRecord> {
    records.iter().find(|record| record.matches(habit_id, date))
}

/// Recorded status for a habit on a day, false when nothing was recorded
pub fn status_on(records: &[CompletionRecord], habit_id: HabitId, date: NaiveDate) -> bool {
    find_record(records, habit_id, date)
        .map(|record| record.status)
        .unwrap_or(false)
}

/// Mark a habit complete for a day
///
/// An existing record for the pair is flipped to true in place; otherwise a
/// new record is appended. Returns a copy of the resulting record.
pub fn mark_complete(
    records: &mut Vec<CompletionRecord>,
    habit_id: HabitId,
    date: NaiveDate,
) -> CompletionRecord {
    match records.iter().position(|record| record.matches(habit_id, date)) {
        Some(index) => {
            records[index].status = true;
            records[index].clone()
        }
        None => {
            let record = CompletionRecord::completed(habit_id, date);
            records.push(record.clone());
            record
        }
    }
}
