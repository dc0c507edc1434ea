// src/config/loader.rs

use std::fs;
use std::path::Path;

use crate::config::model::{RawScenarioConfig, ScenarioConfig};
use crate::errors::Result;

/// Load a scenario file from a given path and return the raw `RawScenarioConfig`.
///
/// This only performs TOML deserialization. Use [`load_and_validate`] to
/// also check the values.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawScenarioConfig> {
    let contents = fs::read_to_string(path.as_ref())?;
    let config: RawScenarioConfig = toml::from_str(&contents)?;
    Ok(config)
}

/// Load a scenario file from path and validate it.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<ScenarioConfig> {
    let raw_config = load_from_path(&path)?;
    let config = ScenarioConfig::try_from(raw_config)?;
    Ok(config)
}

/// Resolve the scenario to run: the given file, or the built-in defaults.
pub fn load_or_default(path: Option<&Path>) -> Result<ScenarioConfig> {
    match path {
        Some(p) => load_and_validate(p),
        None => Ok(ScenarioConfig::default()),
    }
}
