//! To-do tasks, one calendar day each

use std::fmt::{Display, Formatter};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The identifier of a [`Task`].
///
/// Ids are opaque strings, assigned by the store when the task is created
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TaskId(String);

impl TaskId {
    /// Generate a random TaskId.
    /// Only stores that are the id-assigning end need this (e.g. [`MemoryStore`](crate::memory::MemoryStore))
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_hyphenated().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for TaskId {
    fn from(id: String) -> Self {
        Self(id)
    }
}
impl From<&str> for TaskId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}
impl Display for TaskId {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        write!(f, "{}", self.0)
    }
}

/// The identifier of the user owning a task, as handed out by the identity provider
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct UserId(String);

impl UserId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for UserId {
    fn from(id: String) -> Self {
        Self(id)
    }
}
impl From<&str> for UserId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}
impl Display for UserId {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        write!(f, "{}", self.0)
    }
}

/// The fields of a task that has no store-assigned id yet.
///
/// This is the payload of a create request; the store answers with the generated [`TaskId`]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskFields {
    pub text: String,
    pub completed: bool,
    pub user_id: UserId,
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

impl TaskFields {
    /// A brand new, uncompleted task for the given day
    pub fn new(text: String, user_id: UserId, date: NaiveDate) -> Self {
        Self {
            text,
            completed: false,
            user_id,
            date,
            created_at: Utc::now(),
        }
    }
}

/// A to-do task.
///
/// Every task belongs to exactly one user and one calendar day. The text and the day are
/// immutable once created (there is no "move this task to another day" operation); only the
/// completion state can change, and the task can be deleted
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// The id the store assigned on creation
    id: TaskId,
    /// The user-entered text
    text: String,
    /// Whether this task is done
    completed: bool,
    /// The owner. Only this user ever sees the task
    user_id: UserId,
    /// The calendar day this task is planned on
    date: NaiveDate,
    /// The time this task was created. Used for ordering, never displayed
    created_at: DateTime<Utc>,
}

impl Task {
    /// Build a task out of the id a store assigned and the fields of the create request
    pub fn new(id: TaskId, fields: TaskFields) -> Self {
        Self {
            id,
            text: fields.text,
            completed: fields.completed,
            user_id: fields.user_id,
            date: fields.date,
            created_at: fields.created_at,
        }
    }

    pub fn id(&self) -> &TaskId        { &self.id }
    pub fn text(&self) -> &str         { &self.text }
    pub fn completed(&self) -> bool    { self.completed }
    pub fn user_id(&self) -> &UserId   { &self.user_id }
    pub fn date(&self) -> NaiveDate    { self.date }
    pub fn created_at(&self) -> &DateTime<Utc> { &self.created_at }

    pub(crate) fn set_completed(&mut self, completed: bool) {
        self.completed = completed;
    }
}
