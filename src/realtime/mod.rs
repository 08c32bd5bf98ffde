/// Real-time reminder delivery
///
/// Connected WebSocket clients are tracked in a listener registry and a
/// periodic scheduler pushes reminders about incomplete habits to them.

pub mod registry;
pub mod scheduler;
pub mod socket;

pub use registry::{ListenerId, ListenerRegistry};
pub use scheduler::{
    Reminder, ReminderOutcome, ReminderScheduler, REMINDER_INTERVAL, REMINDER_MESSAGE,
};
pub use socket::ws_handler;
