/// Seven-day completion report

use chrono::NaiveDate;

use crate::domain::{today, WeeklyProgress};
use crate::service::ServiceError;
use crate::storage::HabitStorage;

/// Completion flags for every habit over the last seven days, today last
pub fn get_weekly_report<S: HabitStorage + ?Sized>(
    storage: &S,
) -> Result<Vec<WeeklyProgress>, ServiceError> {
    get_weekly_report_on(storage, today())
}

pub fn get_weekly_report_on<S: HabitStorage + ?Sized>(
    storage: &S,
    today: NaiveDate,
) -> Result<Vec<WeeklyProgress>, ServiceError> {
    let habits = storage.load_habits()?;
    let records = storage.load_progress()?;

    Ok(habits
        .iter()
        .map(|habit| WeeklyProgress::for_habit(habit, &records, today))
        .collect())
}
