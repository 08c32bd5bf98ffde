/// Creating new habits

use serde_json::Number;

use crate::domain::{Habit, HabitId};
use crate::service::ServiceError;
use crate::storage::HabitStorage;

/// Create a new habit and persist it
///
/// The id is the number of stored habits plus one.
pub fn add_habit<S: HabitStorage + ?Sized>(
    storage: &S,
    name: String,
    daily_goal: impl Into<Number>,
) -> Result<Habit, ServiceError> {
    let mut habits = storage.load_habits()?;

    let habit = Habit::new(HabitId::next_after(habits.len()), name, daily_goal.into());
    habits.push(habit.clone());
    storage.save_habits(&habits)?;

    tracing::info!("Created habit '{}' with id {}", habit.name, habit.id);
    Ok(habit)
}
