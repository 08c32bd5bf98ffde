/// Habit entity and related functionality
///
/// This module defines the core Habit struct that represents a user's habit,
/// the validated input used to create one, and the per-day status view that
/// the list endpoint returns.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Number;

use crate::domain::{DomainError, HabitId};

/// A habit represents something the user wants to do every day
///
/// Habits are created once and never edited or removed. `daily_goal` is a
/// free-form number (minutes, pages, glasses of water) that the tracker
/// stores but does not interpret. It is kept as the JSON number the client
/// sent, so `30` comes back as `30` and `2.5` as `2.5`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Habit {
    /// Position-based identifier (1 for the first habit)
    pub id: HabitId,
    /// Display name (e.g., "Read", "Morning Run")
    pub name: String,
    /// Target amount per day
    pub daily_goal: Number,
    /// Always true for habits created through the API
    pub active: bool,
    /// When this habit was created
    pub created_at: DateTime<Utc>,
}

impl Habit {
    /// Create a new active habit stamped with the current time
    ///
    /// No validation happens here. Input checks belong to the HTTP boundary,
    /// see [`NewHabit::validate`].
    pub fn new(id: HabitId, name: String, daily_goal: Number) -> Self {
        Self {
            id,
            name,
            daily_goal,
            active: true,
            created_at: Utc::now(),
        }
    }

    /// Rebuild a habit from stored columns
    pub fn from_existing(
        id: HabitId,
        name: String,
        daily_goal: Number,
        active: bool,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name,
            daily_goal,
            active,
            created_at,
        }
    }
}

/// Validated input for creating a habit
#[derive(Debug, Clone, PartialEq)]
pub struct NewHabit {
    pub name: String,
    pub daily_goal: Number,
}

impl NewHabit {
    /// Check the raw request fields
    ///
    /// Both fields are required and must be truthy: an empty name or a goal
    /// of zero counts as missing.
    pub fn validate(
        name: Option<String>,
        daily_goal: Option<Number>,
    ) -> Result<Self, DomainError> {
        match (name, daily_goal) {
            (Some(name), Some(daily_goal)) if !name.is_empty() && !is_zero(&daily_goal) => {
                Ok(Self { name, daily_goal })
            }
            _ => Err(DomainError::Validation {
                message: "Name and daily_goal are required".to_string(),
            }),
        }
    }
}

fn is_zero(number: &Number) -> bool {
    number.as_f64() == Some(0.0)
}

/// A habit together with whether it has been completed today
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HabitStatus {
    pub id: HabitId,
    pub name: String,
    pub daily_goal: Number,
    pub completed: bool,
}

impl HabitStatus {
    pub fn new(habit: &Habit, completed: bool) -> Self {
        Self {
            id: habit.id,
            name: habit.name.clone(),
            daily_goal: habit.daily_goal.clone(),
            completed,
        }
    }
}
