/// Public library interface for the Habit Tracker server
///
/// This module exports the server implementation and the public types that
/// can be used by other applications or tests.

use std::sync::Arc;

use thiserror::Error;
use tokio::net::TcpListener;

// Internal modules
pub mod config;
pub mod domain;
pub mod http;
pub mod realtime;
pub mod service;
pub mod storage;

// Re-export public modules and types
pub use config::{ServerConfig, StorageBackend};
pub use domain::{
    CompletionRecord, DomainError, Habit, HabitId, HabitStatus, NewHabit, WeeklyProgress,
};
pub use realtime::{ListenerRegistry, Reminder, ReminderOutcome, ReminderScheduler};
pub use service::{
    add_habit, get_habits, get_incomplete_habits, get_weekly_report, update_habit_progress,
    ServiceError,
};
pub use storage::{HabitStorage, JsonFileStorage, MemoryStorage, SqliteStorage, StorageError};

/// Errors that can occur during server operation
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Habit tracker server: HTTP API, listener channel and reminder scheduler
pub struct HabitTrackerServer {
    config: ServerConfig,
    storage: Arc<dyn HabitStorage>,
    listeners: ListenerRegistry,
}

impl HabitTrackerServer {
    /// Create a server, opening the configured storage backend
    ///
    /// Missing snapshot files or database tables are created empty.
    pub async fn new(config: ServerConfig) -> Result<Self, ServerError> {
        tracing::info!(
            "Initializing Habit Tracker server with {:?} storage in {:?}",
            config.backend,
            config.data_dir
        );

        let storage: Arc<dyn HabitStorage> = match config.backend {
            StorageBackend::Json => Arc::new(JsonFileStorage::new(&config.data_dir)?),
            StorageBackend::Sqlite => {
                std::fs::create_dir_all(&config.data_dir)?;
                Arc::new(SqliteStorage::new(
                    config.data_dir.join(storage::sqlite::DATABASE_FILE),
                )?)
            }
        };

        Ok(Self::with_storage(config, storage))
    }

    /// Create a server on top of an already opened storage
    pub fn with_storage(config: ServerConfig, storage: Arc<dyn HabitStorage>) -> Self {
        Self {
            config,
            storage,
            listeners: ListenerRegistry::new(),
        }
    }

    /// Bind the configured address and serve until Ctrl-C
    pub async fn run(self) -> Result<(), ServerError> {
        let listener = TcpListener::bind(self.config.bind_address()).await?;
        self.serve(listener).await
    }

    /// Serve on an existing listener until Ctrl-C
    pub async fn serve(self, listener: TcpListener) -> Result<(), ServerError> {
        let habits = self.storage.load_habits()?;
        tracing::info!("Server started successfully, found {} existing habits", habits.len());

        let scheduler = ReminderScheduler::new(self.storage.clone(), self.listeners.clone());
        let scheduler_task = tokio::spawn(scheduler.run());

        tracing::info!("Server running on http://{}", listener.local_addr()?);
        let result = axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await;

        scheduler_task.abort();
        result?;
        Ok(())
    }

    /// Router with all endpoints, bound to this server's state
    pub fn router(&self) -> axum::Router {
        http::router(http::AppState::new(self.storage.clone(), self.listeners.clone()))
    }

    /// Get a reference to the storage layer (useful for testing)
    pub fn storage(&self) -> &Arc<dyn HabitStorage> {
        &self.storage
    }

    /// Get a reference to the listener registry (useful for testing)
    pub fn listeners(&self) -> &ListenerRegistry {
        &self.listeners
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        // Without a signal handler, run until the process is killed
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
