//! The error taxonomy of a run

use thiserror::Error;

/// Everything that can go wrong during a run.
///
/// Only the `Update` variant is recoverable: the run loop records it and carries on with the next task. \
/// Every other variant aborts the run before anything has been mutated remotely.
#[derive(Debug, Error)]
pub enum Error {
    /// Missing or invalid process configuration. Detected before any network call.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The configured time zone is not a valid IANA name
    #[error("invalid time zone {0:?}")]
    TimeZone(String),

    /// The task-listing request was refused. Nothing can safely be updated
    /// without knowing the full set of tasks, so this terminates the run.
    #[error("task fetch failed with HTTP {status}: {body}")]
    Fetch { status: u16, body: String },

    /// The connection itself could not be established or broke down
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// A single task update was refused
    #[error("failed to update task {task_id} (HTTP {status}): {body}")]
    Update {
        task_id: String,
        status: u16,
        body: String,
    },
}
