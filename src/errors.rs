// src/errors.rs

//! Crate-wide error aliases and helpers.
//!
//! Two layers:
//! - [`TaskflowError`] is what the public API returns. Only startup problems
//!   (bad config, invalid task lists) end up here.
//! - [`TaskError`] is what a task's operation fails with. The runner never
//!   propagates it; it is folded into a `TaskOutcome` instead.

use thiserror::Error;

use crate::types::{ErrorInfo, ErrorKind};

#[derive(Error, Debug)]
pub enum TaskflowError {
    #[error("Invalid task: {0}")]
    InvalidTask(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("HTTP client error: {0}")]
    HttpClientError(#[from] reqwest::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Failure raised while executing a single task's operation.
#[derive(Error, Debug)]
pub enum TaskError {
    #[error("network error: {0}")]
    Network(String),

    #[error("decode error: {0}")]
    Decode(String),

    #[error("cancelled before completion")]
    Cancelled,

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl TaskError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            TaskError::Network(_) => ErrorKind::NetworkError,
            TaskError::Decode(_) => ErrorKind::DecodeError,
            TaskError::Cancelled => ErrorKind::Timeout,
            TaskError::Other(_) => ErrorKind::Unknown,
        }
    }
}

impl From<&TaskError> for ErrorInfo {
    fn from(err: &TaskError) -> Self {
        // The kind already says what went wrong; keep only the detail.
        let message = match err {
            TaskError::Network(msg) | TaskError::Decode(msg) => msg.clone(),
            TaskError::Cancelled => err.to_string(),
            TaskError::Other(e) => format!("{e:#}"),
        };
        ErrorInfo::new(err.kind(), message)
    }
}

impl From<TaskError> for ErrorInfo {
    fn from(err: TaskError) -> Self {
        ErrorInfo::from(&err)
    }
}

pub type Result<T> = std::result::Result<T, TaskflowError>;
