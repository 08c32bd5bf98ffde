/// Registry of connected real-time listeners
///
/// Socket sessions register on connect and remove themselves on close. The
/// reminder scheduler broadcasts through the registry. Broadcasts work on a
/// snapshot of the members, so a listener that disconnects mid-broadcast
/// never leaves iteration in a torn state.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};

use tokio::sync::mpsc;
use uuid::Uuid;

/// Identifier handed to each registered listener
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub Uuid);

impl ListenerId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ListenerId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ListenerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Shared set of open listeners
///
/// Cloning is cheap and every clone refers to the same set.
#[derive(Clone, Default)]
pub struct ListenerRegistry {
    listeners: Arc<Mutex<HashMap<ListenerId, mpsc::UnboundedSender<String>>>>,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a listener and return the receiving end of its outbound queue
    pub fn register(&self) -> (ListenerId, mpsc::UnboundedReceiver<String>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let id = ListenerId::new();
        self.lock().insert(id, tx);
        tracing::debug!("Registered listener {}", id);
        (id, rx)
    }

    /// Remove a listener; returns false if it was already gone
    pub fn remove(&self, id: ListenerId) -> bool {
        let removed = self.lock().remove(&id).is_some();
        if removed {
            tracing::debug!("Removed listener {}", id);
        }
        removed
    }

    /// Number of registered listeners, open or not
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Queue `message` for every open listener
    ///
    /// Listeners whose session has already ended are skipped but not removed;
    /// removal happens when their session reports the close. Returns the
    /// number of listeners the message was queued for.
    pub fn broadcast(&self, message: &str) -> usize {
        let snapshot: Vec<(ListenerId, mpsc::UnboundedSender<String>)> = self
            .lock()
            .iter()
            .map(|(id, tx)| (*id, tx.clone()))
            .collect();

        let mut delivered = 0;
        for (id, tx) in snapshot {
            if tx.is_closed() {
                tracing::debug!("Skipping closed listener {}", id);
                continue;
            }
            if tx.send(message.to_string()).is_ok() {
                delivered += 1;
            }
        }
        delivered
    }

    // A poisoned lock only means a panic happened while holding it; the map
    // itself is still usable.
    fn lock(&self) -> MutexGuard<'_, HashMap<ListenerId, mpsc::UnboundedSender<String>>> {
        self.listeners
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
