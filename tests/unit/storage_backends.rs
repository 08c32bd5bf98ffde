/// Every storage backend behaves the same behind the HabitStorage trait
use std::sync::Arc;

use chrono::NaiveDate;
use serde_json::Number;
use tempfile::TempDir;

use habit_tracker_server::service::{get_incomplete_habits_on, update_habit_progress_on};
use habit_tracker_server::*;

fn backends(dir: &TempDir) -> Vec<(&'static str, Arc<dyn HabitStorage>)> {
    let json = JsonFileStorage::new(dir.path().join("json")).unwrap();
    let sqlite = SqliteStorage::new(dir.path().join("habits.db")).unwrap();
    vec![
        ("memory", Arc::new(MemoryStorage::new()) as Arc<dyn HabitStorage>),
        ("json", Arc::new(json) as Arc<dyn HabitStorage>),
        ("sqlite", Arc::new(sqlite) as Arc<dyn HabitStorage>),
    ]
}

#[cfg(test)]
mod backend_tests {
    use super::*;

    #[test]
    fn test_fresh_backends_are_empty() {
        let dir = TempDir::new().unwrap();
        for (name, storage) in backends(&dir) {
            assert!(storage.load_habits().unwrap().is_empty(), "{}", name);
            assert!(storage.load_progress().unwrap().is_empty(), "{}", name);
        }
    }

    #[test]
    fn test_backends_agree_on_service_results() {
        let dir = TempDir::new().unwrap();
        let date = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();

        for (name, storage) in backends(&dir) {
            let storage = storage.as_ref();
            add_habit(storage, "Read".to_string(), 30).unwrap();
            add_habit(storage, "Walk".to_string(), Number::from_f64(2.5).unwrap()).unwrap();
            update_habit_progress_on(storage, HabitId(2), date).unwrap();
            update_habit_progress_on(storage, HabitId(2), date).unwrap();
            // Orphaned record
            update_habit_progress_on(storage, HabitId(9), date).unwrap();

            let habits = storage.load_habits().unwrap();
            assert_eq!(habits.len(), 2, "{}", name);
            assert_eq!(habits[0].daily_goal, Number::from(30), "{}", name);
            assert_eq!(habits[1].daily_goal.as_f64(), Some(2.5), "{}", name);

            let records = storage.load_progress().unwrap();
            assert_eq!(
                records,
                vec![
                    CompletionRecord::completed(HabitId(2), date),
                    CompletionRecord::completed(HabitId(9), date),
                ],
                "{}",
                name
            );

            let incomplete = get_incomplete_habits_on(storage, date).unwrap();
            assert_eq!(incomplete.len(), 1, "{}", name);
            assert_eq!(incomplete[0].name, "Read", "{}", name);
        }
    }
}
