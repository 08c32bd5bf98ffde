/// SQLite implementation of the habit storage interface
///
/// Each collection is a table. Saving a snapshot deletes the table contents
/// and reinserts every row inside one transaction, so the database always
/// holds a complete snapshot just like the JSON files do.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use chrono::NaiveDate;
use rusqlite::{params, Connection};
use serde_json::Number;

use crate::domain::{CompletionRecord, Habit, HabitId};
use crate::storage::{migrations, HabitStorage, StorageError};

/// File name used for the SQLite backend inside the data directory
pub const DATABASE_FILE: &str = "habits.db";

/// SQLite-based storage implementation
///
/// The connection sits behind a mutex so the storage can be shared between
/// request handlers and the reminder scheduler.
pub struct SqliteStorage {
    conn: Mutex<Connection>,
}

impl SqliteStorage {
    /// Open the database file and run any pending migrations
    pub fn new(db_path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let db_path = db_path.as_ref();
        let conn = Connection::open(db_path)
            .map_err(|e| StorageError::Connection(format!("Failed to open database: {}", e)))?;

        migrations::initialize_database(&conn)?;

        tracing::info!("SQLite storage initialized at: {:?}", db_path);
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Open a private in-memory database
    pub fn in_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()
            .map_err(|e| StorageError::Connection(format!("Failed to open database: {}", e)))?;
        migrations::initialize_database(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>, StorageError> {
        self.conn
            .lock()
            .map_err(|_| StorageError::Connection("connection lock poisoned".to_string()))
    }

    fn invalid_column(index: usize, message: &str) -> rusqlite::Error {
        rusqlite::Error::InvalidColumnType(index, message.to_string(), rusqlite::types::Type::Text)
    }
}

impl HabitStorage for SqliteStorage {
    fn load_habits(&self) -> Result<Vec<Habit>, StorageError> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, name, daily_goal, active, created_at FROM habits ORDER BY position",
        )?;

        let habit_iter = stmt.query_map([], |row| {
            let daily_goal_str: String = row.get(2)?;
            let daily_goal: Number = daily_goal_str
                .parse()
                .map_err(|_| Self::invalid_column(2, "Invalid daily goal"))?;

            let created_at_str: String = row.get(4)?;
            let created_at = chrono::DateTime::parse_from_rfc3339(&created_at_str)
                .map_err(|_| Self::invalid_column(4, "Invalid datetime"))?
                .with_timezone(&chrono::Utc);

            Ok(Habit::from_existing(
                HabitId(row.get(0)?),
                row.get(1)?, // name
                daily_goal,
                row.get(3)?, // active
                created_at,
            ))
        })?;

        let mut habits = Vec::new();
        for habit in habit_iter {
            habits.push(habit?);
        }

        Ok(habits)
    }

    fn load_progress(&self) -> Result<Vec<CompletionRecord>, StorageError> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT habit_id, date, status FROM progress ORDER BY position",
        )?;

        let record_iter = stmt.query_map([], |row| {
            let date_str: String = row.get(1)?;
            let date = NaiveDate::parse_from_str(&date_str, "%Y-%m-%d")
                .map_err(|_| Self::invalid_column(1, "Invalid date"))?;

            Ok(CompletionRecord {
                habit_id: HabitId(row.get(0)?),
                date,
                status: row.get(2)?,
            })
        })?;

        let mut records = Vec::new();
        for record in record_iter {
            records.push(record?);
        }

        Ok(records)
    }

    fn save_habits(&self, habits: &[Habit]) -> Result<(), StorageError> {
        let mut conn = self.conn()?;
        let tx = conn.transaction()?;
        tx.execute("DELETE FROM habits", [])?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO habits (position, id, name, daily_goal, active, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            )?;
            for (position, habit) in habits.iter().enumerate() {
                stmt.execute(params![
                    position as i64,
                    habit.id.value(),
                    habit.name,
                    habit.daily_goal.to_string(),
                    habit.active,
                    habit.created_at.to_rfc3339(),
                ])?;
            }
        }
        tx.commit()?;

        tracing::debug!("Saved {} habits", habits.len());
        Ok(())
    }

    fn save_progress(&self, records: &[CompletionRecord]) -> Result<(), StorageError> {
        let mut conn = self.conn()?;
        let tx = conn.transaction()?;
        tx.execute("DELETE FROM progress", [])?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO progress (position, habit_id, date, status) VALUES (?1, ?2, ?3, ?4)",
            )?;
            for (position, record) in records.iter().enumerate() {
                stmt.execute(params![
                    position as i64,
                    record.habit_id.value(),
                    record.date.to_string(),
                    record.status,
                ])?;
            }
        }
        tx.commit()?;

        tracing::debug!("Saved {} completion records", records.len());
        Ok(())
    }
}
