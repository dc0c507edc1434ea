// src/runner/modes.rs

//! Batch runners: sequential, parallel and isolated.
//!
//! None of them abort on a failing task. Every task yields exactly one
//! `TaskOutcome` and the report lists them in submission order.

use std::time::Duration;

use tokio::task::JoinSet;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::errors::{Result, TaskflowError};
use crate::types::{ErrorInfo, ErrorKind, RunMode};

use super::execute::settle;
use super::outcome::{RunReport, TaskOutcome};
use super::task::Task;

/// Run tasks strictly one after another.
///
/// A task starts only once the previous one has settled.
pub async fn run_sequential(tasks: Vec<Task>) -> Result<RunReport> {
    validate_batch(&tasks)?;
    if tasks.is_empty() {
        return Ok(RunReport::empty(RunMode::Sequential));
    }

    info!(tasks = tasks.len(), "running batch sequentially");
    let started = Instant::now();
    let mut outcomes = Vec::with_capacity(tasks.len());

    for task in tasks {
        let (name, timeout, operation) = task.into_parts();
        outcomes.push(settle(name, timeout, operation).await);
    }

    Ok(RunReport::new(RunMode::Sequential, outcomes, started.elapsed()))
}

/// Start every task at once and wait until all of them have settled.
///
/// Never short-circuits on a failure. Tasks finish in any order, but the
/// report keeps the submission order.
pub async fn run_parallel(tasks: Vec<Task>) -> Result<RunReport> {
    validate_batch(&tasks)?;
    if tasks.is_empty() {
        return Ok(RunReport::empty(RunMode::Parallel));
    }

    info!(tasks = tasks.len(), "running batch in parallel");
    let started = Instant::now();

    let names: Vec<String> = tasks.iter().map(|t| t.name().to_string()).collect();
    let mut slots: Vec<Option<TaskOutcome>> = names.iter().map(|_| None).collect();
    let mut set = JoinSet::new();

    for (idx, task) in tasks.into_iter().enumerate() {
        let (name, timeout, operation) = task.into_parts();
        set.spawn(async move { (idx, settle(name, timeout, operation).await) });
    }

    while let Some(joined) = set.join_next().await {
        match joined {
            Ok((idx, outcome)) => {
                debug!(task = %outcome.name(), position = idx, "parallel task settled");
                slots[idx] = Some(outcome);
            }
            // `settle` contains panics itself, so this only happens if the
            // runtime is shutting down underneath us.
            Err(err) => warn!(error = %err, "parallel task join failed"),
        }
    }

    let elapsed = started.elapsed();
    let outcomes = slots
        .into_iter()
        .zip(names)
        .map(|(slot, name)| slot.unwrap_or_else(|| missing_outcome(name, elapsed)))
        .collect();

    Ok(RunReport::new(RunMode::Parallel, outcomes, elapsed))
}

/// Catch-log-continue mode with no extra hook.
pub async fn run_isolated(tasks: Vec<Task>) -> Result<RunReport> {
    run_isolated_with(tasks, |_| {}).await
}

/// Run tasks sequentially, logging every failure as caught and calling
/// `on_settled` after each task, whatever its status.
///
/// `on_settled` plays the role of a `finally` block: it runs exactly once
/// per task.
pub async fn run_isolated_with<F>(tasks: Vec<Task>, mut on_settled: F) -> Result<RunReport>
where
    F: FnMut(&TaskOutcome),
{
    validate_batch(&tasks)?;
    if tasks.is_empty() {
        return Ok(RunReport::empty(RunMode::Isolated));
    }

    info!(tasks = tasks.len(), "running batch with per-task isolation");
    let started = Instant::now();
    let mut outcomes = Vec::with_capacity(tasks.len());

    for task in tasks {
        let (name, timeout, operation) = task.into_parts();
        debug!(task = %name, "entering guarded section");

        let outcome = settle(name, timeout, operation).await;
        if let Some(error) = outcome.error() {
            warn!(task = %outcome.name(), error = %error, "caught task failure; continuing");
        }

        on_settled(&outcome);
        debug!(task = %outcome.name(), "left guarded section");
        outcomes.push(outcome);
    }

    Ok(RunReport::new(RunMode::Isolated, outcomes, started.elapsed()))
}

/// Dispatch to the runner for `mode`.
pub async fn run_batch(mode: RunMode, tasks: Vec<Task>) -> Result<RunReport> {
    match mode {
        RunMode::Sequential => run_sequential(tasks).await,
        RunMode::Parallel => run_parallel(tasks).await,
        RunMode::Isolated => run_isolated(tasks).await,
    }
}

/// Reject malformed task lists before anything starts running.
///
/// Names only need to be non-blank. Two tasks may share a name; outcomes are
/// told apart by position in the report.
pub fn validate_batch(tasks: &[Task]) -> Result<()> {
    for (idx, task) in tasks.iter().enumerate() {
        if task.name().trim().is_empty() {
            return Err(TaskflowError::InvalidTask(format!(
                "task at position {idx} has an empty name"
            )));
        }
    }

    Ok(())
}

fn missing_outcome(name: String, elapsed: Duration) -> TaskOutcome {
    TaskOutcome::failure(
        name,
        ErrorInfo::new(ErrorKind::Unknown, "task did not report an outcome"),
        elapsed,
    )
}
