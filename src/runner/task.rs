// src/runner/task.rs

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use serde_json::Value;

use crate::errors::TaskError;

/// The future a task's operation produces when invoked.
pub type TaskFuture = Pin<Box<dyn Future<Output = Result<Value, TaskError>> + Send + 'static>>;

pub(crate) type Operation = Box<dyn FnOnce() -> TaskFuture + Send + 'static>;

/// A named unit of asynchronous work.
///
/// The operation is invoked at most once, when the runner starts the task.
/// A task without a timeout runs until its operation settles.
pub struct Task {
    name: String,
    operation: Operation,
    timeout: Option<Duration>,
}

impl Task {
    pub fn new<F, Fut>(name: impl Into<String>, operation: F) -> Self
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = Result<Value, TaskError>> + Send + 'static,
    {
        Self {
            name: name.into(),
            operation: Box::new(move || Box::pin(operation()) as TaskFuture),
            timeout: None,
        }
    }

    /// Give the task a deadline, enforced by the runner.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    pub(crate) fn into_parts(self) -> (String, Option<Duration>, Operation) {
        (self.name, self.timeout, self.operation)
    }
}

impl fmt::Debug for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Task")
            .field("name", &self.name)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}
