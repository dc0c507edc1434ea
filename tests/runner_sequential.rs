// tests/runner_sequential.rs

mod common;
use crate::common::init_tracing;

use std::error::Error;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde_json::json;

use taskflow::errors::{TaskError, TaskflowError};
use taskflow::runner::{run_isolated, run_isolated_with, run_sequential, Task};
use taskflow::types::{ErrorKind, RunMode, TaskStatus};

type TestResult = Result<(), Box<dyn Error>>;

/// Task that records "start:<name>" / "end:<name>" around a short sleep.
fn recording_task(name: &str, log: Arc<Mutex<Vec<String>>>, ms: u64) -> Task {
    let name_owned = name.to_string();
    Task::new(name, move || async move {
        log.lock().unwrap().push(format!("start:{name_owned}"));
        tokio::time::sleep(Duration::from_millis(ms)).await;
        log.lock().unwrap().push(format!("end:{name_owned}"));
        Ok(json!(name_owned))
    })
}

#[tokio::test]
async fn report_has_one_outcome_per_task_in_input_order() -> TestResult {
    init_tracing();

    let tasks = vec![
        Task::new("A", || async { Ok(json!(1)) }),
        Task::new("B", || async { Err(TaskError::Network("refused".into())) }),
        Task::new("C", || async { Ok(json!(3)) }),
    ];

    let report = run_sequential(tasks).await?;

    assert_eq!(report.mode(), RunMode::Sequential);
    assert_eq!(report.len(), 3);
    let names: Vec<_> = report.iter().map(|o| o.name()).collect();
    assert_eq!(names, vec!["A", "B", "C"]);
    assert_eq!(report.count(TaskStatus::Success), 2);
    assert_eq!(report.count(TaskStatus::Failure), 1);
    Ok(())
}

#[tokio::test]
async fn failing_task_does_not_stop_the_next_one() -> TestResult {
    init_tracing();

    let ran_b = Arc::new(Mutex::new(false));
    let flag = Arc::clone(&ran_b);

    let tasks = vec![
        Task::new("A", || async { Err(TaskError::Other(anyhow::anyhow!("A exploded"))) }),
        Task::new("B", move || async move {
            *flag.lock().unwrap() = true;
            Ok(json!("B done"))
        }),
    ];

    let report = run_sequential(tasks).await?;

    assert!(*ran_b.lock().unwrap());
    let a = report.get("A").unwrap();
    assert_eq!(a.status(), TaskStatus::Failure);
    assert_eq!(a.error().unwrap().kind, ErrorKind::Unknown);
    assert!(a.error().unwrap().message.contains("A exploded"));

    let b = report.get("B").unwrap();
    assert_eq!(b.status(), TaskStatus::Success);
    assert_eq!(b.value(), Some(&json!("B done")));
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn tasks_never_overlap() -> TestResult {
    init_tracing();

    let log = Arc::new(Mutex::new(Vec::new()));
    let tasks = vec![
        recording_task("first", Arc::clone(&log), 300),
        recording_task("second", Arc::clone(&log), 10),
        recording_task("third", Arc::clone(&log), 100),
    ];

    let report = run_sequential(tasks).await?;

    assert_eq!(report.len(), 3);
    assert_eq!(
        *log.lock().unwrap(),
        vec![
            "start:first",
            "end:first",
            "start:second",
            "end:second",
            "start:third",
            "end:third",
        ]
    );
    // Sum of the individual durations, not the maximum.
    assert!(report.elapsed() >= Duration::from_millis(410));
    Ok(())
}

#[tokio::test]
async fn empty_list_gives_empty_report() -> TestResult {
    let report = run_sequential(Vec::new()).await?;
    assert!(report.is_empty());
    assert_eq!(report.elapsed(), Duration::ZERO);

    let report = run_isolated(Vec::new()).await?;
    assert!(report.is_empty());
    Ok(())
}

#[tokio::test]
async fn tasks_sharing_a_name_each_get_an_outcome() -> TestResult {
    init_tracing();

    let tasks = vec![
        Task::new("fetch", || async { Ok(json!(1)) }),
        Task::new("fetch", || async { Err(TaskError::Decode("not json".into())) }),
        Task::new("fetch", || async { Ok(json!(3)) }),
    ];

    let report = run_sequential(tasks).await?;

    assert_eq!(report.len(), 3);
    let statuses: Vec<_> = report.iter().map(|o| o.status()).collect();
    assert_eq!(
        statuses,
        [TaskStatus::Success, TaskStatus::Failure, TaskStatus::Success]
    );
    assert_eq!(report.outcomes()[2].value(), Some(&json!(3)));
    assert_eq!(report.get("fetch").unwrap().value(), Some(&json!(1)));
    Ok(())
}

#[tokio::test]
async fn zero_timeout_is_a_valid_deadline() -> TestResult {
    init_tracing();

    let task = Task::new("zero", || async { Ok(json!("ready")) }).with_timeout(Duration::ZERO);

    let report = run_sequential(vec![task]).await?;

    assert_eq!(report.len(), 1);
    assert_eq!(report.outcomes()[0].status(), TaskStatus::Success);
    Ok(())
}

#[tokio::test]
async fn invalid_batch_is_rejected_before_anything_runs() {
    let ran = Arc::new(Mutex::new(false));
    let flag = Arc::clone(&ran);

    let tasks = vec![
        Task::new("first", move || async move {
            *flag.lock().unwrap() = true;
            Ok(json!(null))
        }),
        Task::new("   ", || async { Ok(json!(null)) }),
    ];

    let err = run_sequential(tasks).await.unwrap_err();

    assert!(matches!(err, TaskflowError::InvalidTask(_)));
    assert!(!*ran.lock().unwrap());
}

#[tokio::test]
async fn isolated_mode_runs_finally_hook_for_every_task() -> TestResult {
    init_tracing();

    let tasks = vec![
        Task::new("fetch invalid host", || async {
            Err(TaskError::Network("connection failed".into()))
        }),
        Task::new("after", || async { Ok(json!("still running")) }),
    ];

    let mut settled = Vec::new();
    let report = run_isolated_with(tasks, |outcome| {
        settled.push((outcome.name().to_string(), outcome.status()));
    })
    .await?;

    assert_eq!(report.mode(), RunMode::Isolated);
    assert_eq!(
        settled,
        vec![
            ("fetch invalid host".to_string(), TaskStatus::Failure),
            ("after".to_string(), TaskStatus::Success),
        ]
    );
    assert_eq!(
        report.get("fetch invalid host").unwrap().error().unwrap().kind,
        ErrorKind::NetworkError
    );
    Ok(())
}
