use async_trait::async_trait;

use crate::error::StoreError;
use crate::subscription::TaskWatch;
use crate::task::{TaskFields, TaskId, UserId};

/// A source of tasks (usually a hosted document store)
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Create a task and return the id the store assigned to it
    async fn create_task(&self, fields: TaskFields) -> Result<TaskId, StoreError>;

    /// Set the completion state of an existing task
    async fn set_completed(&self, id: &TaskId, completed: bool) -> Result<(), StoreError>;

    /// Delete a task
    async fn delete_task(&self, id: &TaskId) -> Result<(), StoreError>;

    /// Start watching every task owned by `user`.
    ///
    /// The returned [`TaskWatch`] delivers a full snapshot of the matching tasks every time
    /// any of them changes (from any client), never a diff. Dropping it cancels the
    /// subscription
    fn watch_tasks(&self, user: &UserId) -> Result<TaskWatch, StoreError>;
}
