/// Listing habits with today's status

use chrono::NaiveDate;

use crate::domain::{status_on, today, Habit, HabitStatus};
use crate::service::ServiceError;
use crate::storage::HabitStorage;

/// Every habit with its completion status for today, in storage order
pub fn get_habits<S: HabitStorage + ?Sized>(
    storage: &S,
) -> Result<Vec<HabitStatus>, ServiceError> {
    get_habits_on(storage, today())
}

pub fn get_habits_on<S: HabitStorage + ?Sized>(
    storage: &S,
    date: NaiveDate,
) -> Result<Vec<HabitStatus>, ServiceError> {
    let habits = storage.load_habits()?;
    let records = storage.load_progress()?;

    Ok(habits
        .iter()
        .map(|habit| HabitStatus::new(habit, status_on(&records, habit.id, date)))
        .collect())
}

/// Habits without a completed record for today
pub fn get_incomplete_habits<S: HabitStorage + ?Sized>(
    storage: &S,
) -> Result<Vec<Habit>, ServiceError> {
    get_incomplete_habits_on(storage, today())
}

pub fn get_incomplete_habits_on<S: HabitStorage + ?Sized>(
    storage: &S,
    date: NaiveDate,
) -> Result<Vec<Habit>, ServiceError> {
    let habits = storage.load_habits()?;
    let records = storage.load_progress()?;

    Ok(habits
        .into_iter()
        .filter(|habit| !status_on(&records, habit.id, date))
        .collect())
}
