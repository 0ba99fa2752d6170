//! Errors reported by task stores

use thiserror::Error;

use crate::task::TaskId;

/// What went wrong while talking to a task store
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store has no task for this id
    #[error("no task found for id {0}")]
    NotFound(TaskId),
    /// The store refused the operation for this user
    #[error("permission denied: {0}")]
    PermissionDenied(String),
    /// The store reported a failure
    #[error("remote store error: {0}")]
    Remote(String),
    /// The request did not reach the store
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
}
