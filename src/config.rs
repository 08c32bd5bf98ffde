/// Server configuration
///
/// Holds the resolved settings the server is started with: where data
/// lives, which storage backend to use and which address to listen on.

use std::path::{Path, PathBuf};

use clap::ValueEnum;

/// Default HTTP port
pub const DEFAULT_PORT: u16 = 3000;

/// Default listen address
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Which storage backend persists the snapshots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum StorageBackend {
    /// `habits.json` and `progress.json` in the data directory
    #[default]
    Json,
    /// `habits.db` in the data directory
    Sqlite,
}

/// Settings for [`crate::HabitTrackerServer`]
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub data_dir: PathBuf,
    pub backend: StorageBackend,
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            backend: StorageBackend::default(),
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }

    pub fn with_backend(mut self, backend: StorageBackend) -> Self {
        self.backend = backend;
        self
    }

    pub fn with_address(mut self, host: impl Into<String>, port: u16) -> Self {
        self.host = host.into();
        self.port = port;
        self
    }

    /// `host:port` string to bind
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Pick a writable data directory when none was given
///
/// Tries the home directory first, then the platform data and config
/// directories, then the working directory, and finally the temp directory.
pub fn default_data_dir() -> std::io::Result<PathBuf> {
    let potential_paths = [
        dirs::home_dir().map(|p| p.join(".habit_tracker")),
        dirs::data_dir().map(|p| p.join("habit_tracker")),
        dirs::config_dir().map(|p| p.join("habit_tracker")),
        std::env::current_dir().ok().map(|p| p.join(".habit_tracker")),
    ];

    for potential_path in potential_paths.iter().flatten() {
        if is_writable_dir(potential_path) {
            return Ok(potential_path.clone());
        }
    }

    let temp_path = std::env::temp_dir().join("habit_tracker");
    std::fs::create_dir_all(&temp_path)?;

    tracing::warn!("Using temporary directory for data: {}", temp_path.display());
    Ok(temp_path)
}

fn is_writable_dir(path: &Path) -> bool {
    if std::fs::create_dir_all(path).is_err() {
        return false;
    }
    let test_file = path.join(".test_write");
    if std::fs::write(&test_file, "test").is_ok() {
        let _ = std::fs::remove_file(&test_file);
        return true;
    }
    false
}
