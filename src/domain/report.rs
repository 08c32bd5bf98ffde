/// Weekly progress rows for the report endpoint

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::{status_on, week_ending, CompletionRecord, Habit, REPORT_DAYS};

/// Seven days of completion flags for one habit, oldest day first
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyProgress {
    /// Habit name
    pub habit: String,
    /// One entry per day, the last one is today
    pub weekly_progress: [bool; REPORT_DAYS],
}

impl WeeklyProgress {
    /// Build the row for `habit` over the week ending on `today`
    pub fn for_habit(habit: &Habit, records: &[CompletionRecord], today: NaiveDate) -> Self {
        let weekly_progress = week_ending(today).map(|date| status_on(records, habit.id, date));

        Self {
            habit: habit.name.clone(),
            weekly_progress,
        }
    }
}
