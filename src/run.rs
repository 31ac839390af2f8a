//! One whole run: a single fetch, then one update per task

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;

use crate::config::Config;
use crate::error::Error;
use crate::traits::TaskSource;

/// The label that selects which tasks get rescheduled
pub const TODAY_LABEL: &str = "today";

/// The recorded outcome of one update attempt
#[derive(Debug)]
pub enum UpdateOutcome {
    Updated { task_id: String },
    Failed { task_id: String, error: Error },
}

/// What a completed run did, one entry per fetched task
#[derive(Debug)]
pub struct RunSummary {
    /// The single calendar date every task in this run was scheduled to
    pub target_date: NaiveDate,
    /// Per-task outcomes, in fetch order
    pub outcomes: Vec<UpdateOutcome>,
}

impl RunSummary {
    pub fn updated(&self) -> usize {
        self.outcomes.iter()
            .filter(|outcome| matches!(outcome, UpdateOutcome::Updated { .. }))
            .count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.updated()
    }
}

/// Today's calendar date, as observed in the given time zone
pub fn target_date(now: DateTime<Utc>, time_zone: Tz) -> NaiveDate {
    now.with_timezone(&time_zone).date_naive()
}

/// Perform one full run against `source`: fetch the tasks labelled [`TODAY_LABEL`], then set each one's due date to today.
///
/// The target date is computed exactly once, before the first write, so a batch that straddles midnight still applies a single consistent date. \
/// A fetch failure aborts the run (nothing has been mutated yet); a single task's update failure is recorded in the summary and does not stop the batch.
pub async fn run<S: TaskSource>(config: &Config, source: &S) -> Result<RunSummary, Error> {
    let date = target_date(Utc::now(), config.time_zone());

    log::debug!("Fetching tasks with the @{} label...", TODAY_LABEL);
    let tasks = source.tasks_with_label(TODAY_LABEL).await?;
    if tasks.is_empty() {
        log::warn!("No tasks found with the @{} label.", TODAY_LABEL);
        return Ok(RunSummary { target_date: date, outcomes: Vec::new() });
    }

    log::info!("Found {} tasks. Updating due dates to today ({})...", tasks.len(), date);
    let mut outcomes = Vec::with_capacity(tasks.len());
    for task in &tasks {
        log::debug!("Updating task: {:?}", task);
        match source.set_due_date(task, date, config.due_mode()).await {
            Ok(()) => {
                log::debug!("Updated: {}", task.content);
                outcomes.push(UpdateOutcome::Updated { task_id: task.id.clone() });
            },
            Err(err) => {
                log::error!("{}", err);
                outcomes.push(UpdateOutcome::Failed { task_id: task.id.clone(), error: err });
            },
        }
    }

    let summary = RunSummary { target_date: date, outcomes };
    log::info!("Done. {} updated, {} failed.", summary.updated(), summary.failed());
    Ok(summary)
}
