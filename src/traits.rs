use async_trait::async_trait;
use chrono::NaiveDate;

use crate::config::DueMode;
use crate::error::Error;
use crate::task::Task;

/// A source of labelled tasks whose due dates can be rewritten.
///
/// The run loop only knows this trait, so that tests can swap the real REST client for an in-memory fake.
#[async_trait]
pub trait TaskSource {
    /// Returns every task carrying the given label, in the order the service returns them.
    /// No client-side filtering, re-ordering or pagination happens; the result may be empty.
    async fn tasks_with_label(&self, label: &str) -> Result<Vec<Task>, Error>;

    /// Rewrites one task's due date to the given calendar date (no time component).
    /// How an existing recurrence is handled depends on `mode`.
    async fn set_due_date(&self, task: &Task, date: NaiveDate, mode: DueMode) -> Result<(), Error>;
}
