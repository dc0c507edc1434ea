// src/lib.rs

pub mod cli;
pub mod config;
pub mod delay;
pub mod errors;
pub mod fetch;
pub mod logging;
pub mod report;
pub mod runner;
pub mod scenario;
pub mod types;

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info};

use crate::cli::{CliArgs, ReportFormat};
use crate::config::{load_or_default, ScenarioConfig};
use crate::errors::Result;
use crate::fetch::HttpFetcher;
use crate::scenario::Scenario;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - scenario loading (file or built-in defaults)
/// - the HTTP fetcher
/// - the scenario driver and the task runner
/// - report rendering on stdout
///
/// Task failures never make this return an error; only startup problems do.
pub async fn run(args: CliArgs) -> Result<()> {
    let cfg = load_or_default(args.config.as_deref().map(Path::new))?;
    debug!(?cfg, "scenario configuration loaded");

    let scenario = Scenario::demo(&cfg, Arc::new(HttpFetcher::new()?));

    if args.dry_run {
        print_dry_run(&cfg, &scenario);
        return Ok(());
    }

    let phases = scenario.run().await?;
    info!(phases = phases.len(), "scenario finished");

    let rendered = match args.format {
        ReportFormat::Text => report::render_phases(&phases, cfg.report.preview_chars),
        ReportFormat::Json => report::render_json(&phases)?,
    };
    println!("{rendered}");

    Ok(())
}

/// Simple dry-run output: print endpoints, phases and their tasks.
fn print_dry_run(cfg: &ScenarioConfig, scenario: &Scenario) {
    println!("taskflow dry-run");
    println!("  endpoints.quote_url = {}", cfg.endpoints.quote_url);
    println!("  endpoints.json_url = {}", cfg.endpoints.json_url);
    println!("  endpoints.invalid_url = {}", cfg.endpoints.invalid_url);
    println!();

    println!("phases ({}):", scenario.phases().len());
    for phase in scenario.phases() {
        println!("  - {} [{}]", phase.title, phase.mode);
        for task in &phase.tasks {
            match task.timeout() {
                Some(limit) => println!("      {} (timeout {} ms)", task.name(), limit.as_millis()),
                None => println!("      {}", task.name()),
            }
        }
        for task in &phase.background {
            println!("      {} (background)", task.name());
        }
    }

    debug!("dry-run complete (no execution)");
}
