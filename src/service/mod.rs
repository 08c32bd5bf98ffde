/// Service operations for habit management
///
/// Each operation loads the snapshots it needs from storage, works on them in
/// memory and writes back whole collections. Inputs are not validated here;
/// the HTTP layer does that before calling in.

pub mod create;
pub mod list;
pub mod progress;
pub mod report;

// Re-export operations for easy access
pub use create::*;
pub use list::*;
pub use progress::*;
pub use report::*;

use thiserror::Error;

use crate::storage::StorageError;

/// Errors returned by service operations
///
/// Every variant is an infrastructure fault. Input problems are caught by
/// `NewHabit::validate` and `HabitId` parsing before a service runs.
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
