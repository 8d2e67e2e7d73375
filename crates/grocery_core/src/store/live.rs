//! Live read handle over the store snapshot channel.

use crate::model::item::TodoItem;
use std::sync::Arc;
use tokio::sync::watch;

/// Immutable full-list snapshot shared between subscribers.
pub type Snapshot = Arc<Vec<TodoItem>>;

/// Subscription that re-delivers the whole list whenever the table changes.
///
/// Only the latest snapshot is retained; a slow reader skips intermediate
/// states and always lands on the newest one.
#[derive(Debug, Clone)]
pub struct LiveList {
    rx: watch::Receiver<Snapshot>,
}

impl LiveList {
    pub(crate) fn new(rx: watch::Receiver<Snapshot>) -> Self {
        Self { rx }
    }

    /// Returns the most recent snapshot without waiting.
    ///
    /// Does not mark it seen: `has_changed()` keeps reporting a pending
    /// snapshot until `changed()` consumes it.
    pub fn current(&self) -> Snapshot {
        self.rx.borrow().clone()
    }

    /// Returns whether a snapshot newer than the last one taken by `changed()`
    /// is available.
    pub fn has_changed(&self) -> bool {
        self.rx.has_changed().unwrap_or(false)
    }

    /// Waits for the next snapshot and marks it seen.
    ///
    /// Returns `None` once the store has been dropped.
    pub async fn changed(&mut self) -> Option<Snapshot> {
        self.rx.changed().await.ok()?;
        Some(self.rx.borrow_and_update().clone())
    }
}
