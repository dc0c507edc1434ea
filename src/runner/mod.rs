// src/runner/mod.rs

//! Task runner.
//!
//! - [`task`] defines [`Task`], a named one-shot asynchronous operation with
//!   an optional timeout.
//! - [`execute`] drives a single task to a [`TaskOutcome`], enforcing its
//!   timeout and containing panics. It also hosts detached (fire-and-forget)
//!   tasks.
//! - [`modes`] runs whole batches sequentially, in parallel or isolated, and
//!   produces a [`RunReport`].
//! - [`outcome`] holds the immutable result types.
//!
//! Errors raised by operations never escape the runner; they end up in the
//! outcome. The only error a batch runner returns is
//! [`TaskflowError::InvalidTask`](crate::errors::TaskflowError::InvalidTask),
//! before any task has started.

pub mod execute;
pub mod modes;
pub mod outcome;
pub mod task;

pub use execute::{run_with_timeout, spawn_detached, DetachedTask};
pub use modes::{
    run_batch, run_isolated, run_isolated_with, run_parallel, run_sequential, validate_batch,
};
pub use outcome::{RunReport, TaskOutcome};
pub use task::{Task, TaskFuture};
