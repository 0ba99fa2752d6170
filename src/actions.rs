//! Task mutations, and the input state of the "add a task" prompt

use chrono::NaiveDate;

use crate::error::StoreError;
use crate::task::{TaskFields, TaskId, UserId};
use crate::traits::TaskStore;

/// The local state of the "add a task" prompt.
///
/// This is UI state only, kept apart from anything the store confirmed. It is reset as soon
/// as a create request is issued; the next snapshot is what reconciles the screen with the
/// store
#[derive(Clone, Debug, Default)]
pub struct TaskComposer {
    draft: String,
    prompt_open: bool,
    submitting: bool,
}

impl TaskComposer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }
    pub fn set_draft<S: ToString>(&mut self, text: S) {
        self.draft = text.to_string();
    }

    pub fn open_prompt(&mut self) {
        self.prompt_open = true;
    }
    pub fn close_prompt(&mut self) {
        self.prompt_open = false;
    }
    pub fn is_prompt_open(&self) -> bool {
        self.prompt_open
    }

    /// Whether a create request is in flight (the UI disables the submit button on this)
    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Take the trimmed draft and reset the prompt
    fn take(&mut self) -> String {
        let text = self.draft.trim().to_string();
        self.draft.clear();
        self.prompt_open = false;
        text
    }
}

/// Performs task mutations against a store on behalf of the UI.
///
/// Every operation is a single fire-and-forget request; several of them may be in flight at
/// once and complete in any order, since the next snapshot re-derives the authoritative
/// state anyway. There is no batching, no undo and no client-side merge: the store's
/// last-writer-wins semantics are inherited as-is
pub struct TaskActions<S: TaskStore> {
    store: S,
}

impl<S: TaskStore> TaskActions<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Create a task for `date` out of the composer's draft.
    ///
    /// A draft that trims to nothing, a missing date or a missing user are silently ignored
    /// (`Ok(None)`): these preconditions fail often and carry no actionable message. \
    /// The composer is reset as soon as the request is issued, not when the store confirms
    /// it. On failure the draft therefore stays cleared, but the error is returned to the
    /// caller
    pub async fn add_task(
        &self,
        composer: &mut TaskComposer,
        date: Option<NaiveDate>,
        user: Option<&UserId>,
    ) -> Result<Option<TaskId>, StoreError> {
        if composer.draft().trim().is_empty() {
            return Ok(None);
        }
        let (date, user) = match (date, user) {
            (Some(date), Some(user)) => (date, user),
            _ => return Ok(None),
        };

        let text = composer.take();
        composer.submitting = true;

        let result = self
            .store
            .create_task(TaskFields::new(text, user.clone(), date))
            .await;
        composer.submitting = false;

        match result {
            Ok(id) => Ok(Some(id)),
            Err(err) => {
                log::warn!("Unable to add a task on {}: {}", date, err);
                Err(err)
            }
        }
    }

    /// Flip the completion state of a task.
    ///
    /// Nothing changes locally: the screen picks the new state up from the next snapshot
    pub async fn toggle_task(&self, id: &TaskId, currently_completed: bool) {
        if let Err(err) = self.store.set_completed(id, !currently_completed).await {
            log::warn!("Unable to toggle task {}: {}", id, err);
        }
    }

    /// Delete a task
    pub async fn delete_task(&self, id: &TaskId) {
        if let Err(err) = self.store.delete_task(id).await {
            log::warn!("Unable to delete task {}: {}", id, err);
        }
    }

    /// The underlying store
    pub fn store(&self) -> &S {
        &self.store
    }
}
