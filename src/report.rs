// src/report.rs

//! Rendering of run reports.
//!
//! Rendering is kept apart from the structured `RunReport` data so reports
//! can be checked in tests without parsing text.

use std::fmt::Write as _;

use serde_json::Value;

use crate::errors::{Result, TaskflowError};
use crate::runner::{RunReport, TaskOutcome};
use crate::scenario::PhaseReport;
use crate::types::TaskStatus;

/// Render one run report as a human-readable block.
pub fn render_text(report: &RunReport, preview_chars: usize) -> String {
    let mut out = String::new();
    for outcome in report {
        out.push_str(&render_outcome(outcome, preview_chars));
        out.push('\n');
    }
    out.push_str(&summary_line(report));
    out.push('\n');
    out
}

/// Render all phases of a scenario run.
pub fn render_phases(phases: &[PhaseReport], preview_chars: usize) -> String {
    let mut out = String::new();

    for (idx, phase) in phases.iter().enumerate() {
        let _ = writeln!(
            out,
            "----- phase {}: {} ({}) -----",
            idx + 1,
            phase.title,
            phase.report.mode()
        );
        out.push_str(&render_text(&phase.report, preview_chars));

        if !phase.background.is_empty() {
            out.push_str("  background:\n");
            for outcome in &phase.background {
                out.push_str(&render_outcome(outcome, preview_chars));
                out.push('\n');
            }
        }
        out.push('\n');
    }

    out
}

/// Render all phases as pretty-printed JSON.
pub fn render_json(phases: &[PhaseReport]) -> Result<String> {
    serde_json::to_string_pretty(phases).map_err(|e| TaskflowError::Other(e.into()))
}

/// One status line: name, status, duration, then the value preview or error.
pub fn render_outcome(outcome: &TaskOutcome, preview_chars: usize) -> String {
    let detail = match (outcome.value(), outcome.error()) {
        (Some(value), _) => preview(value, preview_chars),
        (None, Some(error)) => error.to_string(),
        (None, None) => String::new(),
    };

    format!(
        "  [{:<9}] {:<28} {:>7} ms  {}",
        outcome.status().to_string(),
        outcome.name(),
        outcome.duration_ms(),
        detail
    )
}

fn summary_line(report: &RunReport) -> String {
    format!(
        "  {} task(s): {} ok, {} failed, {} timed out in {} ms",
        report.len(),
        report.count(TaskStatus::Success),
        report.count(TaskStatus::Failure),
        report.count(TaskStatus::TimedOut),
        report.elapsed().as_millis()
    )
}

/// Compact JSON for `value`, cut to at most `max_chars` characters.
pub fn preview(value: &Value, max_chars: usize) -> String {
    let text = value.to_string();
    truncate_chars(&text, max_chars)
}

fn truncate_chars(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let kept: String = text.chars().take(max_chars).collect();
    format!("{kept}...")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ErrorInfo, ErrorKind};
    use serde_json::json;
    use std::time::Duration;

    #[test]
    fn preview_truncates_long_values_on_char_boundaries() {
        let v = json!("ééééééééééé");
        let p = preview(&v, 4);
        assert_eq!(p, "\"ééé...");
    }

    #[test]
    fn preview_keeps_short_values() {
        assert_eq!(preview(&json!([1, 2]), 50), "[1,2]");
    }

    #[test]
    fn outcome_line_shows_error_kind_and_message() {
        let outcome = TaskOutcome::failure(
            "fetch invalid host",
            ErrorInfo::new(ErrorKind::NetworkError, "connection failed"),
            Duration::from_millis(12),
        );
        let line = render_outcome(&outcome, 40);
        assert!(line.contains("failed"));
        assert!(line.contains("fetch invalid host"));
        assert!(line.contains("12 ms"));
        assert!(line.contains("NetworkError: connection failed"));
    }
}
