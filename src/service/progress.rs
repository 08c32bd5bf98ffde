/// Recording daily completions

use chrono::NaiveDate;

use crate::domain::{mark_complete, today, CompletionRecord, HabitId};
use crate::service::ServiceError;
use crate::storage::HabitStorage;

/// Mark a habit as completed today
pub fn update_habit_progress<S: HabitStorage + ?Sized>(
    storage: &S,
    habit_id: HabitId,
) -> Result<CompletionRecord, ServiceError> {
    update_habit_progress_on(storage, habit_id, today())
}

/// Mark a habit as completed on `date`
///
/// The habit id is not checked against the stored habits; an unknown id
/// produces an orphaned record.
pub fn update_habit_progress_on<S: HabitStorage + ?Sized>(
    storage: &S,
    habit_id: HabitId,
    date: NaiveDate,
) -> Result<CompletionRecord, ServiceError> {
    let mut records = storage.load_progress()?;
    let record = mark_complete(&mut records, habit_id, date);
    storage.save_progress(&records)?;

    tracing::info!("Recorded completion for habit {} on {}", habit_id, date);
    Ok(record)
}
