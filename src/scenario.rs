// src/scenario.rs

//! The fixed demonstration scenario.
//!
//! A scenario is a list of phases. Each phase is a batch of tasks run in one
//! [`RunMode`], optionally with background tasks that are started before the
//! batch and joined after it. The scenario holds no state once it has run.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use serde_json::Value;
use tracing::info;

use crate::config::ScenarioConfig;
use crate::delay::delay;
use crate::errors::Result;
use crate::fetch::{fetch_first, JsonFetcher};
use crate::runner::{run_batch, spawn_detached, validate_batch, RunReport, Task, TaskOutcome};
use crate::types::RunMode;

/// One batch of tasks plus the mode to run it in.
#[derive(Debug)]
pub struct Phase {
    pub title: String,
    pub mode: RunMode,
    pub tasks: Vec<Task>,
    /// Started before `tasks`, joined after them.
    pub background: Vec<Task>,
}

impl Phase {
    pub fn new(title: impl Into<String>, mode: RunMode, tasks: Vec<Task>) -> Self {
        Self {
            title: title.into(),
            mode,
            tasks,
            background: Vec::new(),
        }
    }

    pub fn with_background(mut self, task: Task) -> Self {
        self.background.push(task);
        self
    }
}

/// Outcome of running one phase.
#[derive(Debug, Clone, Serialize)]
pub struct PhaseReport {
    pub title: String,
    pub report: RunReport,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub background: Vec<TaskOutcome>,
}

#[derive(Debug, Default)]
pub struct Scenario {
    phases: Vec<Phase>,
}

impl Scenario {
    pub fn new(phases: Vec<Phase>) -> Self {
        Self { phases }
    }

    /// Build the demonstration scenario:
    ///
    /// 1. fetch a quote, wait, fetch a quote again (sequential);
    /// 2. fetch from a host that does not exist (isolated);
    /// 3. several delays at once, with a JSON fetch in the background (parallel);
    /// 4. fetch a JSON document (sequential).
    pub fn demo(cfg: &ScenarioConfig, fetcher: Arc<dyn JsonFetcher>) -> Self {
        let endpoints = &cfg.endpoints;

        let mut quote_again =
            fetch_first_task("fetch quote again", Arc::clone(&fetcher), &endpoints.quote_url);
        if let Some(limit) = cfg.fetch_timeout() {
            quote_again = quote_again.with_timeout(limit);
        }

        let awaiting = Phase::new(
            "awaiting one step at a time",
            RunMode::Sequential,
            vec![
                fetch_first_task("fetch quote", Arc::clone(&fetcher), &endpoints.quote_url),
                delay_task(format!("wait {}ms", cfg.timing.wait_ms), cfg.wait()),
                quote_again,
            ],
        );

        let caught = Phase::new(
            "catching a failed fetch",
            RunMode::Isolated,
            vec![fetch_json_task(
                "fetch invalid host",
                Arc::clone(&fetcher),
                &endpoints.invalid_url,
            )],
        );

        let delays = cfg
            .parallel_delays()
            .map(|d| delay_task(format!("wait {}ms", d.as_millis()), d))
            .collect();
        let mut background =
            fetch_json_task("fetch json (background)", Arc::clone(&fetcher), &endpoints.json_url);
        if let Some(limit) = cfg.fetch_timeout() {
            background = background.with_timeout(limit);
        }
        let parallel =
            Phase::new("waiting on several steps at once", RunMode::Parallel, delays)
                .with_background(background);

        let mut json = fetch_json_task("fetch json", fetcher, &endpoints.json_url);
        if let Some(limit) = cfg.fetch_timeout() {
            json = json.with_timeout(limit);
        }
        let simple = Phase::new("fetching a document", RunMode::Sequential, vec![json]);

        Self::new(vec![awaiting, caught, parallel, simple])
    }

    pub fn phases(&self) -> &[Phase] {
        &self.phases
    }

    /// Run every phase in order and collect one report per phase.
    ///
    /// Only an invalid task list aborts the run; task failures are recorded.
    pub async fn run(self) -> Result<Vec<PhaseReport>> {
        for phase in &self.phases {
            validate_batch(&phase.tasks)?;
            validate_batch(&phase.background)?;
        }

        let mut reports = Vec::with_capacity(self.phases.len());
        for phase in self.phases {
            info!(phase = %phase.title, mode = %phase.mode, "running phase");

            let detached: Vec<_> = phase.background.into_iter().map(spawn_detached).collect();
            let report = run_batch(phase.mode, phase.tasks).await?;

            let mut background = Vec::with_capacity(detached.len());
            for handle in detached {
                background.push(handle.join().await);
            }

            reports.push(PhaseReport {
                title: phase.title,
                report,
                background,
            });
        }

        Ok(reports)
    }
}

/// A task that waits for `duration` and yields `null`.
pub fn delay_task(name: impl Into<String>, duration: Duration) -> Task {
    Task::new(name, move || async move {
        delay(duration).await;
        Ok(Value::Null)
    })
}

/// A task that fetches `url` and yields the parsed document.
pub fn fetch_json_task(name: impl Into<String>, fetcher: Arc<dyn JsonFetcher>, url: &str) -> Task {
    let url = url.to_string();
    Task::new(name, move || async move { fetcher.fetch_json(&url).await })
}

/// A task that fetches `url` and yields the first element of the JSON array.
pub fn fetch_first_task(name: impl Into<String>, fetcher: Arc<dyn JsonFetcher>, url: &str) -> Task {
    let url = url.to_string();
    Task::new(name, move || async move { fetch_first(fetcher.as_ref(), &url).await })
}
