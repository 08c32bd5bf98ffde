/// In-memory implementation of the habit storage interface
///
/// Keeps both snapshots in process memory. Used by tests and anywhere the
/// service layer needs to run without touching the filesystem.

use std::sync::{Mutex, MutexGuard};

use crate::domain::{CompletionRecord, Habit};
use crate::storage::{HabitStorage, StorageError};

#[derive(Default)]
pub struct MemoryStorage {
    habits: Mutex<Vec<Habit>>,
    progress: Mutex<Vec<CompletionRecord>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from existing snapshots
    pub fn with_data(habits: Vec<Habit>, progress: Vec<CompletionRecord>) -> Self {
        Self {
            habits: Mutex::new(habits),
            progress: Mutex::new(progress),
        }
    }

    fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>, StorageError> {
        mutex
            .lock()
            .map_err(|_| StorageError::Connection("memory storage lock poisoned".to_string()))
    }
}

impl HabitStorage for MemoryStorage {
    fn load_habits(&self) -> Result<Vec<Habit>, StorageError> {
        Ok(Self::lock(&self.habits)?.clone())
    }

    fn load_progress(&self) -> Result<Vec<CompletionRecord>, StorageError> {
        Ok(Self::lock(&self.progress)?.clone())
    }

    fn save_habits(&self, habits: &[Habit]) -> Result<(), StorageError> {
        *Self::lock(&self.habits)? = habits.to_vec();
        Ok(())
    }

    fn save_progress(&self, records: &[CompletionRecord]) -> Result<(), StorageError> {
        *Self::lock(&self.progress)? = records.to_vec();
        Ok(())
    }
}
