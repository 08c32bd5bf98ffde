/// Periodic reminder scan
///
/// On a fixed interval the scheduler looks up today's incomplete habits and,
/// if there are any, broadcasts a reminder to every open listener. A scan
/// that is still running when the next tick fires causes that tick to be
/// skipped instead of starting a second, overlapping scan.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::time::MissedTickBehavior;
use tracing::{error, info};

use crate::realtime::ListenerRegistry;
use crate::service::{get_incomplete_habits, ServiceError};
use crate::storage::HabitStorage;

/// How often the reminder scan runs
pub const REMINDER_INTERVAL: Duration = Duration::from_secs(60);

/// Text sent with every reminder
pub const REMINDER_MESSAGE: &str = "You have incomplete habits for today!";

/// Payload pushed to listeners
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reminder {
    #[serde(rename = "type")]
    pub kind: String,
    pub message: String,
    /// Names of the habits still open today
    pub habits: Vec<String>,
}

impl Reminder {
    pub fn for_habits(habits: Vec<String>) -> Self {
        Self {
            kind: "reminder".to_string(),
            message: REMINDER_MESSAGE.to_string(),
            habits,
        }
    }
}

/// Result of a single scan
#[derive(Debug, Clone, PartialEq)]
pub enum ReminderOutcome {
    /// A reminder was queued for `recipients` open listeners
    Sent { recipients: usize, habits: Vec<String> },
    /// Everything is done for today, nothing was sent
    NothingIncomplete,
    /// The previous scan had not finished yet
    SkippedBusy,
}

/// Fixed-interval reminder scheduler
#[derive(Clone)]
pub struct ReminderScheduler {
    storage: Arc<dyn HabitStorage>,
    listeners: ListenerRegistry,
    interval: Duration,
    busy: Arc<AtomicBool>,
}

/// Clears the busy flag when a scan ends, including on early return
struct BusyGuard<'a>(&'a AtomicBool);

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl ReminderScheduler {
    pub fn new(storage: Arc<dyn HabitStorage>, listeners: ListenerRegistry) -> Self {
        Self::with_interval(storage, listeners, REMINDER_INTERVAL)
    }

    pub fn with_interval(
        storage: Arc<dyn HabitStorage>,
        listeners: ListenerRegistry,
        interval: Duration,
    ) -> Self {
        Self {
            storage,
            listeners,
            interval,
            busy: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Run one scan now
    pub fn run_once(&self) -> Result<ReminderOutcome, ServiceError> {
        if self.busy.swap(true, Ordering::AcqRel) {
            info!("Previous reminder scan still running, skipping");
            return Ok(ReminderOutcome::SkippedBusy);
        }
        let _guard = BusyGuard(&self.busy);

        let incomplete = get_incomplete_habits(self.storage.as_ref())?;
        if incomplete.is_empty() {
            info!("No incomplete habits. No reminders sent.");
            return Ok(ReminderOutcome::NothingIncomplete);
        }

        let habits: Vec<String> = incomplete.into_iter().map(|habit| habit.name).collect();
        let payload = serde_json::to_string(&Reminder::for_habits(habits.clone()))?;
        let recipients = self.listeners.broadcast(&payload);

        info!("Daily reminders sent to {} listeners", recipients);
        Ok(ReminderOutcome::Sent { recipients, habits })
    }

    /// Tick forever, running each scan on the blocking pool
    ///
    /// The first scan happens one full interval after start.
    pub async fn run(self) {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        ticker.tick().await;

        info!("Reminder scheduler started, interval {:?}", self.interval);
        loop {
            ticker.tick().await;

            let scheduler = self.clone();
            tokio::task::spawn_blocking(move || {
                if let Err(e) = scheduler.run_once() {
                    error!("Reminder scan failed: {}", e);
                }
            });
        }
    }
}
