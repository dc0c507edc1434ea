// src/config/mod.rs

//! Scenario configuration.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Load a scenario file from disk (`loader.rs`).
//! - Validate values before they reach the driver (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{load_and_validate, load_from_path, load_or_default};
pub use model::{EndpointsSection, RawScenarioConfig, ReportSection, ScenarioConfig, TimingSection};
