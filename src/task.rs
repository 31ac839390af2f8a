//! The wire model of a Todoist task, as returned by the REST API

use serde::Deserialize;

/// The due-date structure of a task that has one
#[derive(Clone, Debug, Deserialize)]
pub struct Due {
    /// The calendar date this task is due (`YYYY-MM-DD`)
    pub date: String,
    /// The human-readable phrase the service parsed to compute `date` (e.g. "every day")
    pub string: String,
    /// Whether `string` describes a repeating schedule
    pub is_recurring: bool,
}

/// A read-only snapshot of a remote task.
///
/// Tasks are owned by the Todoist service and fetched fresh on every run, never cached. \
/// Only the attributes this crate consumes are deserialized; everything else the API returns is ignored.
#[derive(Clone, Debug, Deserialize)]
pub struct Task {
    /// The opaque identifier the update endpoint is addressed by
    pub id: String,
    /// The display text of the task, used for logging only
    pub content: String,
    /// `None` when the task has no due date yet
    #[serde(default)]
    pub due: Option<Due>,
}

impl Task {
    /// Whether this task already carries a recurring due date
    pub fn is_recurring(&self) -> bool {
        self.due.as_ref().map(|due| due.is_recurring).unwrap_or(false)
    }
}
