/// Storage layer for persisting habit data
///
/// Both collections (habits and completion records) are stored as whole
/// snapshots: every load returns the full collection and every save replaces
/// it. Filtering happens in the service layer after a full load.

pub mod json;
pub mod memory;
pub mod migrations;
pub mod sqlite;

// Re-export the main storage types
pub use json::JsonFileStorage;
pub use memory::MemoryStorage;
pub use sqlite::SqliteStorage;

use thiserror::Error;
use crate::domain::{CompletionRecord, Habit};

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Database connection error: {0}")]
    Connection(String),

    #[error("Database query error: {0}")]
    Query(#[from] rusqlite::Error),

    #[error("Migration error: {0}")]
    Migration(String),
}

/// Trait defining the snapshot storage interface
///
/// The service layer only ever talks to this trait, so JSON files, SQLite
/// and the in-memory store used by tests are interchangeable.
pub trait HabitStorage: Send + Sync {
    /// Load every habit, in creation order
    fn load_habits(&self) -> Result<Vec<Habit>, StorageError>;

    /// Load every completion record, in insertion order
    fn load_progress(&self) -> Result<Vec<CompletionRecord>, StorageError>;

    /// Replace the stored habits with `habits`
    fn save_habits(&self, habits: &[Habit]) -> Result<(), StorageError>;

    /// Replace the stored completion records with `records`
    fn save_progress(&self, records: &[CompletionRecord]) -> Result<(), StorageError>;
}

impl<S: HabitStorage + ?Sized> HabitStorage for std::sync::Arc<S> {
    fn load_habits(&self) -> Result<Vec<Habit>, StorageError> {
        (**self).load_habits()
    }

    fn load_progress(&self) -> Result<Vec<CompletionRecord>, StorageError> {
        (**self).load_progress()
    }

    fn save_habits(&self, habits: &[Habit]) -> Result<(), StorageError> {
        (**self).save_habits(habits)
    }

    fn save_progress(&self, records: &[CompletionRecord]) -> Result<(), StorageError> {
        (**self).save_progress(records)
    }
}
