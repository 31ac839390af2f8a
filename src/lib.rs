//! This crate keeps "@today"-labelled Todoist tasks actually due today.
//!
//! It fetches every task carrying a given label from the Todoist REST API, then rewrites each one's due date to the current calendar day in a configured time zone. \
//! It is meant to be triggered daily (e.g. by cron), so that recurring "do this today" items always surface as due today, regardless of what their due dates had drifted to.
//!
//! The REST client lives in the [`client`] module. \
//! The [`run`] module drives one whole run (a single fetch, then one update per task) against any [`traits::TaskSource`], so that tests can substitute an in-memory fake for the real API.

pub mod config;
pub use config::Config;
pub use config::DueMode;
mod task;
pub use task::Due;
pub use task::Task;
mod error;
pub use error::Error;
pub mod traits;

pub mod client;
pub use client::Client;
pub mod run;
pub use run::RunSummary;
pub use run::UpdateOutcome;
