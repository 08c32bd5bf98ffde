/// JSON file implementation of the habit storage interface
///
/// Each collection lives in its own pretty-printed JSON array inside a data
/// directory. Files are created as `[]` when the storage is opened, and every
/// save rewrites the whole file.

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::domain::{CompletionRecord, Habit};
use crate::storage::{HabitStorage, StorageError};

/// File name of the habit snapshot
pub const HABITS_FILE: &str = "habits.json";
/// File name of the completion record snapshot
pub const PROGRESS_FILE: &str = "progress.json";

/// File-backed snapshot storage
pub struct JsonFileStorage {
    habits_path: PathBuf,
    progress_path: PathBuf,
}

impl JsonFileStorage {
    /// Open (or initialize) the snapshot files inside `data_dir`
    pub fn new(data_dir: impl AsRef<Path>) -> Result<Self, StorageError> {
        let data_dir = data_dir.as_ref();
        fs::create_dir_all(data_dir)?;

        let storage = Self {
            habits_path: data_dir.join(HABITS_FILE),
            progress_path: data_dir.join(PROGRESS_FILE),
        };

        Self::initialize_file(&storage.habits_path)?;
        Self::initialize_file(&storage.progress_path)?;

        tracing::info!("JSON storage initialized at: {:?}", data_dir);
        Ok(storage)
    }

    /// Path of the habit snapshot file
    pub fn habits_path(&self) -> &Path {
        &self.habits_path
    }

    /// Path of the completion record snapshot file
    pub fn progress_path(&self) -> &Path {
        &self.progress_path
    }

    fn initialize_file(path: &Path) -> Result<(), StorageError> {
        if !path.exists() {
            fs::write(path, "[]")?;
            tracing::debug!("Created empty snapshot: {:?}", path);
        }
        Ok(())
    }

    fn read_snapshot<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, StorageError> {
        match fs::read_to_string(path) {
            Ok(contents) => Ok(serde_json::from_str(&contents)?),
            // Deleted after open: behave like a fresh install
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(StorageError::Io(e)),
        }
    }

    fn write_snapshot<T: Serialize>(path: &Path, items: &[T]) -> Result<(), StorageError> {
        let contents = serde_json::to_string_pretty(items)?;
        fs::write(path, contents)?;
        Ok(())
    }
}

impl HabitStorage for JsonFileStorage {
    fn load_habits(&self) -> Result<Vec<Habit>, StorageError> {
        Self::read_snapshot(&self.habits_path)
    }

    fn load_progress(&self) -> Result<Vec<CompletionRecord>, StorageError> {
        Self::read_snapshot(&self.progress_path)
    }

    fn save_habits(&self, habits: &[Habit]) -> Result<(), StorageError> {
        Self::write_snapshot(&self.habits_path, habits)?;
        tracing::debug!("Saved {} habits", habits.len());
        Ok(())
    }

    fn save_progress(&self, records: &[CompletionRecord]) -> Result<(), StorageError> {
        Self::write_snapshot(&self.progress_path, records)?;
        tracing::debug!("Saved {} completion records", records.len());
        Ok(())
    }
}
