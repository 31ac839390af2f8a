//! This module provides a client to the Todoist REST API

use async_trait::async_trait;
use chrono::NaiveDate;
use serde_json::json;
use url::Url;

use crate::config::Config;
use crate::config::DueMode;
use crate::error::Error;
use crate::task::Task;
use crate::traits::TaskSource;

/// A task source that fetches its data from the Todoist REST API
pub struct Client {
    http: reqwest::Client,
    api_base: Url,
    token: String,
}

impl Client {
    /// Create a client. This does not start a connection
    pub fn new(config: &Config) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_base: config.api_base().clone(),
            token: config.token().to_string(),
        }
    }

    /// Append path segments to the API base (a plain `Url::join` would discard the base's own path)
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.api_base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }
}

#[async_trait]
impl TaskSource for Client {
    async fn tasks_with_label(&self, label: &str) -> Result<Vec<Task>, Error> {
        let res = self.http
            .get(self.endpoint(&["tasks"]))
            .query(&[("label", label)])
            .bearer_auth(&self.token)
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            return Err(Error::Fetch { status: status.as_u16(), body });
        }

        let tasks = res.json().await?;
        Ok(tasks)
    }

    async fn set_due_date(&self, task: &Task, date: NaiveDate, mode: DueMode) -> Result<(), Error> {
        let res = self.http
            .post(self.endpoint(&["tasks", &task.id]))
            .bearer_auth(&self.token)
            .json(&update_body(task, date, mode))
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            return Err(Error::Update {
                task_id: task.id.clone(),
                status: status.as_u16(),
                body,
            });
        }

        Ok(())
    }
}

/// Build the JSON body of an update request.
///
/// Todoist clears a task's recurrence as soon as a flat `due_date` is written, so [`DueMode::PreserveRecurrence`] re-submits the task's own phrase instead and lets the server re-compute the date.
fn update_body(task: &Task, date: NaiveDate, mode: DueMode) -> serde_json::Value {
    match (mode, task.due.as_ref()) {
        (DueMode::PreserveRecurrence, Some(due)) if due.is_recurring => {
            json!({ "due_string": due.string })
        },
        _ => json!({ "due_date": date.format("%Y-%m-%d").to_string() }),
    }
}
