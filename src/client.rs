//! This module provides a client to connect to a hosted task store over HTTP
//!
//! The store exposes the task collection as JSON: a `POST` creates a task and answers with
//! the generated id, a `PATCH` flips its completion state, a `DELETE` removes it. The live
//! subscription is a long-poll: the server holds a `GET` until the user's result set
//! changes, then answers with the full current snapshot and a cursor to poll from next

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use url::Url;

use crate::error::StoreError;
use crate::subscription::{snapshot_channel, SnapshotEvent, TaskWatch, WatchGuard};
use crate::task::{Task, TaskFields, TaskId, UserId};
use crate::traits::TaskStore;

/// How long to wait before retrying a failed long-poll
const POLL_RETRY_DELAY: Duration = Duration::from_secs(5);

/// A task store that lives behind a JSON-over-HTTP endpoint
#[derive(Clone)]
pub struct RestStore {
    url: Url,
    token: Option<String>,
    http: reqwest::Client,
}

#[derive(Deserialize)]
struct CreatedTask {
    id: TaskId,
}

/// One long-poll answer: the position to poll from next, plus the full current result set
#[derive(Deserialize)]
struct SnapshotPage {
    cursor: u64,
    tasks: Vec<Task>,
}

impl RestStore {
    /// Create a client. This does not start a connection
    pub fn new<S: AsRef<str>>(url: S, token: Option<String>) -> Result<Self, StoreError> {
        let url = Url::parse(url.as_ref())
            .map_err(|err| StoreError::Remote(format!("invalid store URL: {}", err)))?;

        Ok(Self {
            url,
            token,
            // No request timeout on purpose: long-polls are held open by the server, and
            // mutations rely on the transport defaults
            http: reqwest::Client::new(),
        })
    }

    fn collection_url(&self) -> String {
        format!("{}/tasks", self.url.as_str().trim_end_matches('/'))
    }

    fn task_url(&self, id: &TaskId) -> String {
        format!("{}/{}", self.collection_url(), id)
    }

    fn authed(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }
}

fn check_status(status: StatusCode, id: Option<&TaskId>) -> Result<(), StoreError> {
    if status.is_success() {
        return Ok(());
    }
    match (status, id) {
        (StatusCode::NOT_FOUND, Some(id)) => Err(StoreError::NotFound(id.clone())),
        (StatusCode::UNAUTHORIZED, _) | (StatusCode::FORBIDDEN, _) => {
            Err(StoreError::PermissionDenied(status.to_string()))
        }
        (other, _) => Err(StoreError::Remote(format!("unexpected status {}", other))),
    }
}

#[async_trait]
impl TaskStore for RestStore {
    async fn create_task(&self, fields: TaskFields) -> Result<TaskId, StoreError> {
        let res = self
            .authed(self.http.post(self.collection_url()))
            .json(&fields)
            .send()
            .await?;
        check_status(res.status(), None)?;
        let created: CreatedTask = res.json().await?;
        Ok(created.id)
    }

    async fn set_completed(&self, id: &TaskId, completed: bool) -> Result<(), StoreError> {
        let res = self
            .authed(self.http.patch(self.task_url(id)))
            .json(&serde_json::json!({ "completed": completed }))
            .send()
            .await?;
        check_status(res.status(), Some(id))
    }

    async fn delete_task(&self, id: &TaskId) -> Result<(), StoreError> {
        let res = self.authed(self.http.delete(self.task_url(id))).send().await?;
        check_status(res.status(), Some(id))
    }

    fn watch_tasks(&self, user: &UserId) -> Result<TaskWatch, StoreError> {
        let (sender, receiver) = snapshot_channel();
        let store = self.clone();
        let user = user.clone();

        // The loop ends by itself once every receiver is gone; the guard only hurries it up
        let handle = tokio::spawn(async move {
            let mut cursor: u64 = 0;
            loop {
                if sender.is_closed() {
                    break;
                }

                let url = format!(
                    "{}?user={}&cursor={}",
                    store.collection_url(),
                    user,
                    cursor
                );
                let page = async {
                    let res = store.authed(store.http.get(url)).send().await?;
                    check_status(res.status(), None)?;
                    Ok::<SnapshotPage, StoreError>(res.json().await?)
                }
                .await;

                match page {
                    Ok(page) => {
                        cursor = page.cursor;
                        sender.send_replace(SnapshotEvent::Snapshot(Arc::new(page.tasks)));
                    }
                    Err(err) => {
                        log::warn!("Task long-poll failed for {}: {}", user, err);
                        sender.send_replace(SnapshotEvent::Lost(err.to_string()));
                        tokio::time::sleep(POLL_RETRY_DELAY).await;
                    }
                }
            }
            log::debug!("Task long-poll for {} ended", user);
        });

        let guard = WatchGuard::new(move || handle.abort());
        Ok(TaskWatch::new(receiver, guard))
    }
}
