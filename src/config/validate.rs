// src/config/validate.rs

use crate::config::model::{RawScenarioConfig, ScenarioConfig};
use crate::errors::{Result, TaskflowError};

impl TryFrom<RawScenarioConfig> for ScenarioConfig {
    type Error = TaskflowError;

    fn try_from(raw: RawScenarioConfig) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;
        Ok(ScenarioConfig::new_unchecked(
            raw.endpoints,
            raw.timing,
            raw.report,
        ))
    }
}

fn validate_raw_config(cfg: &RawScenarioConfig) -> Result<()> {
    validate_endpoints(cfg)?;
    validate_timing(cfg)?;
    validate_report(cfg)?;
    Ok(())
}

fn validate_endpoints(cfg: &RawScenarioConfig) -> Result<()> {
    let endpoints = [
        ("quote_url", &cfg.endpoints.quote_url),
        ("json_url", &cfg.endpoints.json_url),
        ("invalid_url", &cfg.endpoints.invalid_url),
    ];

    for (key, url) in endpoints {
        if url.trim().is_empty() {
            return Err(TaskflowError::ConfigError(format!(
                "[endpoints].{key} must not be empty"
            )));
        }
    }
    Ok(())
}

fn validate_timing(cfg: &RawScenarioConfig) -> Result<()> {
    if cfg.timing.parallel_delays_ms.is_empty() {
        return Err(TaskflowError::ConfigError(
            "[timing].parallel_delays_ms must contain at least one delay".to_string(),
        ));
    }
    Ok(())
}

fn validate_report(cfg: &RawScenarioConfig) -> Result<()> {
    if cfg.report.preview_chars == 0 {
        return Err(TaskflowError::ConfigError(
            "[report].preview_chars must be >= 1 (got 0)".to_string(),
        ));
    }
    Ok(())
}
