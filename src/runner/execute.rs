// src/runner/execute.rs

//! Running a single task to its outcome.
//!
//! Every task is driven inside its own Tokio task so that a panicking
//! operation is contained and recorded as an `Unknown` failure. The Tokio
//! task is wrapped in an [`AbortOnDropHandle`]: if whoever awaits the outcome
//! goes away, the operation is dropped with it.

use std::time::Duration;

use serde_json::Value;
use tokio::task::JoinError;
use tokio::time::Instant;
use tokio_util::task::AbortOnDropHandle;
use tracing::{debug, info, warn};

use crate::delay::delay;
use crate::errors::TaskError;
use crate::types::{ErrorInfo, ErrorKind};

use super::outcome::TaskOutcome;
use super::task::{Operation, Task};

/// Race the task's operation against its timeout.
///
/// If the timeout wins, the outcome is `TimedOut` and the operation future is
/// dropped, releasing whatever it holds. Whatever it would have produced later
/// is never observed. Tasks without a timeout simply run to completion.
pub async fn run_with_timeout(task: Task) -> TaskOutcome {
    let (name, timeout, operation) = task.into_parts();
    settle(name, timeout, operation).await
}

/// Handle to a task started with [`spawn_detached`].
///
/// Dropping the handle without joining aborts the task.
pub struct DetachedTask {
    name: String,
    started: Instant,
    handle: AbortOnDropHandle<TaskOutcome>,
}

impl std::fmt::Debug for DetachedTask {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DetachedTask")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl DetachedTask {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Wait for the detached task to settle.
    pub async fn join(self) -> TaskOutcome {
        match self.handle.await {
            Ok(outcome) => outcome,
            Err(err) => join_failure(self.name, err, self.started.elapsed()),
        }
    }
}

/// Start a task in the background without waiting for it.
pub fn spawn_detached(task: Task) -> DetachedTask {
    let name = task.name().to_string();
    info!(task = %name, "starting detached task");
    DetachedTask {
        name,
        started: Instant::now(),
        handle: AbortOnDropHandle::new(tokio::spawn(run_with_timeout(task))),
    }
}

/// Run one task to completion, containing panics.
pub(crate) async fn settle(
    name: String,
    timeout: Option<Duration>,
    operation: Operation,
) -> TaskOutcome {
    let started = Instant::now();
    let handle = AbortOnDropHandle::new(tokio::spawn(drive(name.clone(), timeout, operation)));

    match handle.await {
        Ok(outcome) => outcome,
        Err(err) => join_failure(name, err, started.elapsed()),
    }
}

async fn drive(name: String, timeout: Option<Duration>, operation: Operation) -> TaskOutcome {
    debug!(task = %name, timeout_ms = ?timeout.map(|t| t.as_millis() as u64), "task started");
    let started = Instant::now();

    let fut = operation();
    let outcome = match timeout {
        // Polled in order: an operation that is already done wins a tie with
        // its deadline, including a zero one.
        Some(limit) => tokio::select! {
            biased;
            res = fut => from_result(name, res, started.elapsed()),
            _ = delay(limit) => TaskOutcome::timed_out(name, limit, started.elapsed()),
        },
        None => from_result(name, fut.await, started.elapsed()),
    };

    log_outcome(&outcome);
    outcome
}

fn from_result(name: String, result: Result<Value, TaskError>, duration: Duration) -> TaskOutcome {
    match result {
        Ok(value) => TaskOutcome::success(name, value, duration),
        Err(err) => TaskOutcome::failure(name, ErrorInfo::from(&err), duration),
    }
}

fn join_failure(name: String, err: JoinError, duration: Duration) -> TaskOutcome {
    let message = if err.is_panic() {
        "task panicked".to_string()
    } else {
        "task was cancelled before reporting an outcome".to_string()
    };
    warn!(task = %name, error = %err, "task did not complete normally");
    TaskOutcome::failure(name, ErrorInfo::new(ErrorKind::Unknown, message), duration)
}

fn log_outcome(outcome: &TaskOutcome) {
    match outcome.error() {
        None => info!(
            task = %outcome.name(),
            duration_ms = outcome.duration_ms(),
            "task succeeded"
        ),
        Some(error) => info!(
            task = %outcome.name(),
            status = %outcome.status(),
            duration_ms = outcome.duration_ms(),
            error = %error,
            "task settled without a value"
        ),
    }
}
