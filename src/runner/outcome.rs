// src/runner/outcome.rs

use std::time::Duration;

use serde::Serialize;
use serde_json::Value;

use crate::types::{ErrorInfo, ErrorKind, RunMode, TaskStatus};

/// Recorded result of running one task exactly once.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskOutcome {
    name: String,
    status: TaskStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    value: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<ErrorInfo>,
    #[serde(rename = "duration_ms", serialize_with = "crate::types::duration_ms::serialize")]
    duration: Duration,
}

impl TaskOutcome {
    pub fn success(name: impl Into<String>, value: Value, duration: Duration) -> Self {
        Self {
            name: name.into(),
            status: TaskStatus::Success,
            value: Some(value),
            error: None,
            duration,
        }
    }

    pub fn failure(name: impl Into<String>, error: ErrorInfo, duration: Duration) -> Self {
        Self {
            name: name.into(),
            status: TaskStatus::Failure,
            value: None,
            error: Some(error),
            duration,
        }
    }

    pub fn timed_out(name: impl Into<String>, limit: Duration, duration: Duration) -> Self {
        Self {
            name: name.into(),
            status: TaskStatus::TimedOut,
            value: None,
            error: Some(ErrorInfo::new(
                ErrorKind::Timeout,
                format!("no result within {} ms", limit.as_millis()),
            )),
            duration,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn status(&self) -> TaskStatus {
        self.status
    }

    pub fn value(&self) -> Option<&Value> {
        self.value.as_ref()
    }

    pub fn error(&self) -> Option<&ErrorInfo> {
        self.error.as_ref()
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn duration_ms(&self) -> u64 {
        self.duration.as_millis() as u64
    }

    pub fn is_success(&self) -> bool {
        self.status == TaskStatus::Success
    }
}

/// Ordered outcomes of one runner invocation.
///
/// Always holds exactly one outcome per submitted task, in submission order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunReport {
    mode: RunMode,
    outcomes: Vec<TaskOutcome>,
    #[serde(rename = "elapsed_ms", serialize_with = "crate::types::duration_ms::serialize")]
    elapsed: Duration,
}

impl RunReport {
    pub(crate) fn new(mode: RunMode, outcomes: Vec<TaskOutcome>, elapsed: Duration) -> Self {
        Self {
            mode,
            outcomes,
            elapsed,
        }
    }

    pub(crate) fn empty(mode: RunMode) -> Self {
        Self::new(mode, Vec::new(), Duration::ZERO)
    }

    pub fn mode(&self) -> RunMode {
        self.mode
    }

    /// Wall-clock time of the whole run.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn outcomes(&self) -> &[TaskOutcome] {
        &self.outcomes
    }

    pub fn iter(&self) -> impl Iterator<Item = &TaskOutcome> {
        self.outcomes.iter()
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// First outcome whose task is called `name`.
    ///
    /// Names need not be unique within a batch. Use [`RunReport::outcomes`]
    /// and index by submission position to reach a later task of the same
    /// name.
    pub fn get(&self, name: &str) -> Option<&TaskOutcome> {
        self.outcomes.iter().find(|o| o.name == name)
    }

    pub fn count(&self, status: TaskStatus) -> usize {
        self.outcomes.iter().filter(|o| o.status == status).count()
    }
}

impl<'a> IntoIterator for &'a RunReport {
    type Item = &'a TaskOutcome;
    type IntoIter = std::slice::Iter<'a, TaskOutcome>;

    fn into_iter(self) -> Self::IntoIter {
        self.outcomes.iter()
    }
}
