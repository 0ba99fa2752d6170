//! A live, per-date view over the tasks of one user
//!
//! A [`TaskFeed`] owns the store subscription, recomputes its projections on every snapshot,
//! and republishes them on its own channel, so a screen only ever renders from one place

use std::sync::Arc;

use chrono::NaiveDate;
use tokio::sync::watch;

use crate::marks::CalendarMarks;
use crate::subscription::{SnapshotEvent, TaskWatch};
use crate::task::{Task, UserId};
use crate::traits::TaskStore;

/// What a [`TaskFeed`] currently shows
#[derive(Clone, Debug, Default)]
pub struct FeedState {
    /// The tasks of the selected day, in snapshot order (stores deliver tasks ordered by
    /// creation time, see [`MemoryStore`](crate::memory::MemoryStore))
    pub tasks: Vec<Task>,
    /// The calendar dots derived from every task of the user, whatever their day
    pub marked_dates: CalendarMarks,
    /// The reason the subscription broke, in case it did. The tasks and the marks then keep
    /// their last known value rather than going blank
    pub error: Option<String>,
}

/// See [`TaskFeed::updates`]
pub type FeedReceiver = watch::Receiver<FeedState>;

/// A live view over the tasks of one user, filtered on a selected day.
///
/// Dropping the feed tears the store subscription down
pub struct TaskFeed {
    watch: Option<TaskWatch>,
    selected_date: NaiveDate,
    /// The last full snapshot the store delivered
    snapshot: Arc<Vec<Task>>,
    state: FeedState,
    updates: watch::Sender<FeedState>,
}

impl TaskFeed {
    /// Start a feed for `user`, showing `selected_date`.
    ///
    /// Passing no user is not an error: the feed then subscribes to nothing and stays empty,
    /// which is what happens on a signed-out device. A failure to establish the subscription
    /// itself ends up in the error field of [`FeedState`]
    pub fn new<S: TaskStore + ?Sized>(
        store: &S,
        user: Option<&UserId>,
        selected_date: NaiveDate,
    ) -> Self {
        let (updates, _) = watch::channel(FeedState::default());
        let mut feed = Self {
            watch: None,
            selected_date,
            snapshot: Arc::new(Vec::new()),
            state: FeedState::default(),
            updates,
        };

        let user = match user {
            None => return feed,
            Some(user) => user,
        };

        match store.watch_tasks(user) {
            Ok(watch) => {
                // The store answers a fresh watcher with the current snapshot right away
                let initial = watch.current();
                feed.watch = Some(watch);
                feed.apply(initial);
            }
            Err(err) => {
                log::warn!("Unable to watch the tasks of {}: {}", user, err);
                feed.state.error = Some(err.to_string());
                feed.publish();
            }
        }

        feed
    }

    /// The day this feed currently filters on
    pub fn selected_date(&self) -> NaiveDate {
        self.selected_date
    }

    /// The tasks of the selected day
    pub fn visible_tasks(&self) -> &[Task] {
        &self.state.tasks
    }

    /// The calendar dots derived from the whole task set
    pub fn marked_dates(&self) -> &CalendarMarks {
        &self.state.marked_dates
    }

    /// Why the subscription broke, in case it did
    pub fn last_error(&self) -> Option<&str> {
        self.state.error.as_deref()
    }

    /// A channel that delivers the new [`FeedState`] after every recompute
    pub fn updates(&self) -> FeedReceiver {
        self.updates.subscribe()
    }

    /// Show another day.
    ///
    /// This re-filters the last received snapshot on the spot, it does not wait for the
    /// store to push anything
    pub fn set_selected_date(&mut self, date: NaiveDate) {
        if self.selected_date == date {
            return;
        }
        self.selected_date = date;
        self.state.tasks = filter_by_date(&self.snapshot, date);
        self.publish();
    }

    /// Apply whatever the subscription delivered since the last call, without waiting.
    /// Returns whether anything new was applied
    pub fn refresh(&mut self) -> bool {
        let event = match self.watch.as_mut().and_then(|watch| watch.try_latest()) {
            None => return false,
            Some(event) => event,
        };
        self.apply(event);
        true
    }

    /// Wait for the next snapshot (or subscription failure) and apply it.
    /// Returns `false` in case this feed has no subscription, or its stream has ended
    pub async fn changed(&mut self) -> bool {
        let event = match self.watch.as_mut() {
            None => return false,
            Some(watch) => match watch.changed().await {
                None => return false,
                Some(event) => event,
            },
        };
        self.apply(event);
        true
    }

    fn apply(&mut self, event: SnapshotEvent) {
        match event {
            SnapshotEvent::Pending => return,
            SnapshotEvent::Snapshot(tasks) => {
                self.state.tasks = filter_by_date(&tasks, self.selected_date);
                self.state.marked_dates = CalendarMarks::from_tasks(&tasks);
                self.state.error = None;
                self.snapshot = tasks;
            }
            SnapshotEvent::Lost(reason) => {
                // Stale data stays on screen until a snapshot arrives again
                log::warn!("Task subscription lost: {}", reason);
                self.state.error = Some(reason);
            }
        }
        self.publish();
    }

    fn publish(&self) {
        self.updates.send_replace(self.state.clone());
    }
}

fn filter_by_date(tasks: &[Task], date: NaiveDate) -> Vec<Task> {
    tasks
        .iter()
        .filter(|task| task.date() == date)
        .cloned()
        .collect()
}
