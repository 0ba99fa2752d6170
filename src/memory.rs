//! An in-memory task store
//!
//! Its main use is to mock the remote store in tests and demos, in which case it can be
//! tweaked to misbehave via a [`MockBehaviour`]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::watch;

use crate::error::StoreError;
use crate::mock_behaviour::MockBehaviour;
use crate::subscription::{SnapshotEvent, SnapshotSender, TaskWatch, WatchGuard};
use crate::task::{Task, TaskFields, TaskId, UserId};
use crate::traits::TaskStore;

/// A task store that keeps everything in memory.
///
/// Cloning it yields another handle onto the same tasks, the way cloning a store client
/// handle would
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Default)]
struct Inner {
    tasks: HashMap<TaskId, Task>,
    watchers: HashMap<u64, Watcher>,
    next_watcher_id: u64,
    mock_behaviour: Option<MockBehaviour>,
}

struct Watcher {
    user: UserId,
    sender: SnapshotSender,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a behaviour tweak, so that some of the next operations fail
    pub fn set_mock_behaviour(&self, behaviour: Option<MockBehaviour>) {
        self.inner.lock().unwrap().mock_behaviour = behaviour;
    }

    /// The tasks currently owned by `user`, in the order snapshots deliver them
    pub fn tasks_for(&self, user: &UserId) -> Vec<Task> {
        self.inner.lock().unwrap().snapshot_for(user)
    }

    /// How many subscriptions are currently registered
    pub fn active_watchers(&self) -> usize {
        self.inner.lock().unwrap().watchers.len()
    }

    /// Report every subscription as broken, like a remote store revoking a permission would.
    /// Watchers stay registered, and keep receiving the snapshots of later mutations
    pub fn break_subscriptions(&self, reason: &str) {
        let inner = self.inner.lock().unwrap();
        for watcher in inner.watchers.values() {
            watcher
                .sender
                .send_replace(SnapshotEvent::Lost(reason.to_string()));
        }
    }
}

impl Inner {
    /// Snapshots are ordered by creation time, ties broken by id, so every delivery is
    /// deterministic
    fn snapshot_for(&self, user: &UserId) -> Vec<Task> {
        let mut tasks: Vec<Task> = self
            .tasks
            .values()
            .filter(|task| task.user_id() == user)
            .cloned()
            .collect();
        tasks.sort_by(|a, b| {
            a.created_at()
                .cmp(b.created_at())
                .then_with(|| a.id().cmp(b.id()))
        });
        tasks
    }

    fn notify_watchers(&self) {
        for watcher in self.watchers.values() {
            let snapshot = Arc::new(self.snapshot_for(&watcher.user));
            watcher.sender.send_replace(SnapshotEvent::Snapshot(snapshot));
        }
    }

    fn allowed<F>(&mut self, check: F) -> Result<(), StoreError>
    where
        F: FnOnce(&mut MockBehaviour) -> Result<(), StoreError>,
    {
        match self.mock_behaviour.as_mut() {
            None => Ok(()),
            Some(behaviour) => check(behaviour),
        }
    }
}

#[async_trait]
impl TaskStore for MemoryStore {
    async fn create_task(&self, fields: TaskFields) -> Result<TaskId, StoreError> {
        let mut inner = self.inner.lock().unwrap();
        inner.allowed(|behaviour| behaviour.can_create_task())?;

        let id = TaskId::random();
        inner.tasks.insert(id.clone(), Task::new(id.clone(), fields));
        inner.notify_watchers();
        Ok(id)
    }

    async fn set_completed(&self, id: &TaskId, completed: bool) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().unwrap();
        inner.allowed(|behaviour| behaviour.can_set_completed())?;

        match inner.tasks.get_mut(id) {
            None => return Err(StoreError::NotFound(id.clone())),
            Some(task) => task.set_completed(completed),
        }
        inner.notify_watchers();
        Ok(())
    }

    async fn delete_task(&self, id: &TaskId) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().unwrap();
        inner.allowed(|behaviour| behaviour.can_delete_task())?;

        if inner.tasks.remove(id).is_none() {
            return Err(StoreError::NotFound(id.clone()));
        }
        inner.notify_watchers();
        Ok(())
    }

    fn watch_tasks(&self, user: &UserId) -> Result<TaskWatch, StoreError> {
        let mut inner = self.inner.lock().unwrap();
        inner.allowed(|behaviour| behaviour.can_watch_tasks())?;

        // A fresh watcher gets the current snapshot right away, like the remote
        // subscription mechanism delivers its initial result set
        let initial = SnapshotEvent::Snapshot(Arc::new(inner.snapshot_for(user)));
        let (sender, receiver) = watch::channel(initial);

        let id = inner.next_watcher_id;
        inner.next_watcher_id += 1;
        inner.watchers.insert(
            id,
            Watcher {
                user: user.clone(),
                sender,
            },
        );
        log::debug!("Registered watcher {} for {}", id, user);

        let registry = Arc::downgrade(&self.inner);
        let guard = WatchGuard::new(move || {
            if let Some(inner) = registry.upgrade() {
                inner.lock().unwrap().watchers.remove(&id);
                log::debug!("Removed watcher {}", id);
            }
        });

        Ok(TaskWatch::new(receiver, guard))
    }
}
