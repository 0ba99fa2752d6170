//! Live task snapshots, delivered over a watch channel

use std::sync::Arc;

use tokio::sync::watch;

use crate::task::Task;

/// An event on a task subscription
#[derive(Clone, Debug)]
pub enum SnapshotEvent {
    /// The subscription is established but nothing has been delivered yet
    Pending,
    /// The full, current set of matching tasks. Always a complete result set, never a diff
    Snapshot(Arc<Vec<Task>>),
    /// The subscription broke. Consumers keep their last known data
    Lost(String),
}

impl Default for SnapshotEvent {
    fn default() -> Self {
        Self::Pending
    }
}

/// See [`snapshot_channel`]
pub type SnapshotSender = watch::Sender<SnapshotEvent>;
/// See [`snapshot_channel`]
pub type SnapshotReceiver = watch::Receiver<SnapshotEvent>;

/// Create a snapshot channel, that a store pushes full task snapshots into
pub fn snapshot_channel() -> (SnapshotSender, SnapshotReceiver) {
    watch::channel(SnapshotEvent::default())
}

/// Runs its cancel hook exactly once, when dropped
pub struct WatchGuard {
    cancel: Option<Box<dyn FnOnce() + Send>>,
}

impl WatchGuard {
    pub fn new(cancel: impl FnOnce() + Send + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }
}

impl Drop for WatchGuard {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

/// A standing subscription to all the tasks of one user.
///
/// Keep it alive for as long as snapshots are wanted: dropping it releases the store-side
/// watcher, exactly once
pub struct TaskWatch {
    events: SnapshotReceiver,
    closed: bool,
    _guard: WatchGuard,
}

impl TaskWatch {
    pub fn new(events: SnapshotReceiver, guard: WatchGuard) -> Self {
        Self {
            events,
            closed: false,
            _guard: guard,
        }
    }

    /// The most recently delivered event
    pub fn current(&self) -> SnapshotEvent {
        self.events.borrow().clone()
    }

    /// The latest event, in case one arrived since the last call. Does not wait.
    ///
    /// A store that dropped its end of the channel is reported as a single `Lost` event
    pub fn try_latest(&mut self) -> Option<SnapshotEvent> {
        if self.closed {
            return None;
        }
        match self.events.has_changed() {
            Ok(true) => Some(self.events.borrow_and_update().clone()),
            Ok(false) => None,
            Err(_) => self.on_closed(),
        }
    }

    /// Wait for the next event.
    ///
    /// Returns `None` once the stream has definitely ended
    pub async fn changed(&mut self) -> Option<SnapshotEvent> {
        if self.closed {
            return None;
        }
        match self.events.changed().await {
            Ok(()) => Some(self.events.borrow_and_update().clone()),
            Err(_) => self.on_closed(),
        }
    }

    fn on_closed(&mut self) -> Option<SnapshotEvent> {
        self.closed = true;
        Some(SnapshotEvent::Lost(String::from(
            "the store dropped this subscription",
        )))
    }
}
