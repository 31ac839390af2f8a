//! Tests of the run loop against an in-memory task source

use std::collections::HashSet;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::NaiveDate;
use url::Url;

use todoist_today::config::{Config, DueMode, DEFAULT_API_BASE};
use todoist_today::run::{self, UpdateOutcome, TODAY_LABEL};
use todoist_today::traits::TaskSource;
use todoist_today::{Error, Task};

/// A task source that serves canned tasks and records every call it receives
struct FakeSource {
    tasks: Vec<Task>,
    /// Update calls for these task IDs will fail with a mocked HTTP 500
    failing_ids: HashSet<String>,
    fetches: Mutex<Vec<String>>,
    updates: Mutex<Vec<(String, NaiveDate, DueMode)>>,
}

impl FakeSource {
    fn serving(tasks: Vec<Task>) -> Self {
        Self {
            tasks,
            failing_ids: HashSet::new(),
            fetches: Mutex::new(Vec::new()),
            updates: Mutex::new(Vec::new()),
        }
    }

    fn failing_on<S: ToString>(mut self, task_id: S) -> Self {
        self.failing_ids.insert(task_id.to_string());
        self
    }
}

#[async_trait]
impl TaskSource for FakeSource {
    async fn tasks_with_label(&self, label: &str) -> Result<Vec<Task>, Error> {
        self.fetches.lock().unwrap().push(label.to_string());
        Ok(self.tasks.clone())
    }

    async fn set_due_date(&self, task: &Task, date: NaiveDate, mode: DueMode) -> Result<(), Error> {
        self.updates.lock().unwrap().push((task.id.clone(), date, mode));
        if self.failing_ids.contains(&task.id) {
            Err(Error::Update {
                task_id: task.id.clone(),
                status: 500,
                body: "Internal Server Error".to_string(),
            })
        } else {
            Ok(())
        }
    }
}

/// A source whose fetch itself fails
struct BrokenSource {
    updates_seen: Mutex<usize>,
}

#[async_trait]
impl TaskSource for BrokenSource {
    async fn tasks_with_label(&self, _label: &str) -> Result<Vec<Task>, Error> {
        Err(Error::Fetch { status: 503, body: "Service Unavailable".to_string() })
    }

    async fn set_due_date(&self, _task: &Task, _date: NaiveDate, _mode: DueMode) -> Result<(), Error> {
        *self.updates_seen.lock().unwrap() += 1;
        Ok(())
    }
}

fn task(id: &str) -> Task {
    serde_json::from_str(&format!(r#"{{"id": "{}", "content": "task {}", "due": null}}"#, id, id)).unwrap()
}

fn config(due_mode: DueMode) -> Config {
    Config::new(
        "fake-token",
        chrono_tz::America::New_York,
        due_mode,
        Url::parse(DEFAULT_API_BASE).unwrap(),
    )
}


#[tokio::test]
async fn one_update_per_fetched_task_with_a_shared_date() {
    let _ = env_logger::builder().is_test(true).try_init();

    let source = FakeSource::serving(vec![task("1"), task("2"), task("3")]);
    let summary = run::run(&config(DueMode::PreserveRecurrence), &source).await.unwrap();

    let updates = source.updates.lock().unwrap();
    assert_eq!(updates.len(), 3);
    // One update per task, in fetch order, all sharing the date the run computed
    let ids: Vec<&str> = updates.iter().map(|(id, _, _)| id.as_str()).collect();
    assert_eq!(ids, ["1", "2", "3"]);
    for (_, date, _) in updates.iter() {
        assert_eq!(*date, summary.target_date);
    }
    assert_eq!(summary.updated(), 3);
    assert_eq!(summary.failed(), 0);
}

#[tokio::test]
async fn the_fetch_uses_the_today_label_exactly_once() {
    let _ = env_logger::builder().is_test(true).try_init();

    let source = FakeSource::serving(vec![task("1")]);
    run::run(&config(DueMode::PreserveRecurrence), &source).await.unwrap();

    assert_eq!(*source.fetches.lock().unwrap(), vec![TODAY_LABEL.to_string()]);
}

#[tokio::test]
async fn an_empty_fetch_is_a_successful_noop() {
    let _ = env_logger::builder().is_test(true).try_init();

    let source = FakeSource::serving(Vec::new());
    let summary = run::run(&config(DueMode::PreserveRecurrence), &source).await.unwrap();

    assert!(source.updates.lock().unwrap().is_empty());
    assert!(summary.outcomes.is_empty());
}

#[tokio::test]
async fn a_single_failure_does_not_stop_the_batch() {
    let _ = env_logger::builder().is_test(true).try_init();

    let source = FakeSource::serving(vec![task("1"), task("2"), task("3")]).failing_on("2");
    let summary = run::run(&config(DueMode::PreserveRecurrence), &source).await.unwrap();

    // Every task was still attempted
    assert_eq!(source.updates.lock().unwrap().len(), 3);
    assert_eq!(summary.updated(), 2);
    assert_eq!(summary.failed(), 1);
    match &summary.outcomes[1] {
        UpdateOutcome::Failed { task_id, error } => {
            assert_eq!(task_id, "2");
            assert!(matches!(error, Error::Update { status: 500, .. }));
        },
        other => panic!("expected a failed outcome for task 2, got {:?}", other),
    }
}

#[tokio::test]
async fn a_fetch_failure_aborts_before_any_write() {
    let _ = env_logger::builder().is_test(true).try_init();

    let source = BrokenSource { updates_seen: Mutex::new(0) };
    let result = run::run(&config(DueMode::PreserveRecurrence), &source).await;

    assert!(matches!(result, Err(Error::Fetch { status: 503, .. })));
    assert_eq!(*source.updates_seen.lock().unwrap(), 0);
}

#[tokio::test]
async fn the_configured_due_mode_reaches_every_update() {
    let _ = env_logger::builder().is_test(true).try_init();

    let source = FakeSource::serving(vec![task("1"), task("2")]);
    run::run(&config(DueMode::PlainDate), &source).await.unwrap();

    for (_, _, mode) in source.updates.lock().unwrap().iter() {
        assert_eq!(*mode, DueMode::PlainDate);
    }
}
