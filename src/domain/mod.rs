/// Domain module containing core business logic and data types
///
/// This module defines the core entities (Habit, CompletionRecord) and the
/// views built from them (HabitStatus, WeeklyProgress). These types are what
/// storage persists and what the HTTP API returns.

pub mod habit;
pub mod progress;
pub mod report;
pub mod types;

// Re-export public types for easy access
pub use habit::*;
pub use progress::*;
pub use report::*;
pub use types::*;

use thiserror::Error;

/// Errors that can occur during domain operations
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// Reserved: progress updates do not check that the habit exists
    #[error("Habit not found: {habit_id}")]
    HabitNotFound { habit_id: HabitId },
}
