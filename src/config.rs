//! Process configuration, read from the environment once at startup.
//!
//! Components never read the environment themselves: they receive a [`Config`] (or the relevant part of it) explicitly, so that tests can inject fake credentials and time zones.

use std::env;
use std::str::FromStr;

use chrono_tz::Tz;
use url::Url;

use crate::error::Error;

/// The Todoist REST API, as served in production
pub const DEFAULT_API_BASE: &str = "https://api.todoist.com/rest/v2";
/// The time zone used when `TZ` is not set
pub const DEFAULT_TIME_ZONE: &str = "America/New_York";

/// How the updater writes the new due date of a task that is already recurring
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DueMode {
    /// Always write a flat `YYYY-MM-DD` date. Todoist drops the recurrence of
    /// a task as soon as a flat date is written, so "every day"-style tasks
    /// stop repeating.
    PlainDate,
    /// Re-apply the task's own recurrence phrase when it has one, so that
    /// recurring tasks keep their schedule. Non-recurring tasks still get a
    /// flat date.
    PreserveRecurrence,
}

impl FromStr for DueMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        match s {
            "plain-date" => Ok(DueMode::PlainDate),
            "preserve-recurrence" => Ok(DueMode::PreserveRecurrence),
            other => Err(Error::Configuration(format!(
                "unknown due mode {:?} (expected \"plain-date\" or \"preserve-recurrence\")", other
            ))),
        }
    }
}

/// The settings of one run, built once at process entry
#[derive(Clone, Debug)]
pub struct Config {
    token: String,
    time_zone: Tz,
    due_mode: DueMode,
    api_base: Url,
}

impl Config {
    /// Create a configuration from explicit values (e.g. in tests)
    pub fn new<S: ToString>(token: S, time_zone: Tz, due_mode: DueMode, api_base: Url) -> Self {
        Self {
            token: token.to_string(),
            time_zone,
            due_mode,
            api_base,
        }
    }

    /// Build the configuration from the process environment.
    ///
    /// * `TODOIST_TOKEN` (required): the API bearer token
    /// * `TZ` (optional): an IANA time zone name, defaults to [`DEFAULT_TIME_ZONE`]
    /// * `TODOIST_DUE_MODE` (optional): `plain-date` or `preserve-recurrence` (the default)
    /// * `TODOIST_API_BASE` (optional): overrides [`DEFAULT_API_BASE`]
    pub fn from_env() -> Result<Self, Error> {
        let token = env::var("TODOIST_TOKEN")
            .map_err(|_| Error::Configuration("TODOIST_TOKEN environment variable is not set".to_string()))?;

        let tz_name = env::var("TZ").unwrap_or_else(|_| DEFAULT_TIME_ZONE.to_string());
        let time_zone: Tz = tz_name.parse()
            .map_err(|_| Error::TimeZone(tz_name))?;

        let due_mode = match env::var("TODOIST_DUE_MODE") {
            Ok(mode) => mode.parse()?,
            Err(_) => DueMode::PreserveRecurrence,
        };

        let api_base = match env::var("TODOIST_API_BASE") {
            Ok(base) => Url::parse(&base)
                .map_err(|err| Error::Configuration(format!("invalid TODOIST_API_BASE: {}", err)))?,
            Err(_) => Url::parse(DEFAULT_API_BASE).expect("the default API base is a valid URL"),
        };

        Ok(Self { token, time_zone, due_mode, api_base })
    }

    pub fn token(&self) -> &str { &self.token }
    pub fn time_zone(&self) -> Tz { self.time_zone }
    pub fn due_mode(&self) -> DueMode { self.due_mode }
    pub fn api_base(&self) -> &Url { &self.api_base }
}
