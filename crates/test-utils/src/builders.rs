#![allow(dead_code)]

use taskflow::config::{RawScenarioConfig, ScenarioConfig};

/// Builder for `ScenarioConfig` to simplify test setup.
///
/// Starts from short timings so scenario tests stay fast.
pub struct ScenarioConfigBuilder {
    config: RawScenarioConfig,
}

impl ScenarioConfigBuilder {
    pub fn new() -> Self {
        let mut config = RawScenarioConfig::default();
        config.endpoints.quote_url = "fake://quotes".to_string();
        config.endpoints.json_url = "fake://document".to_string();
        config.endpoints.invalid_url = "fake://nowhere".to_string();
        config.timing.wait_ms = 10;
        config.timing.parallel_delays_ms = vec![10, 20, 10];
        Self { config }
    }

    pub fn quote_url(mut self, url: &str) -> Self {
        self.config.endpoints.quote_url = url.to_string();
        self
    }

    pub fn json_url(mut self, url: &str) -> Self {
        self.config.endpoints.json_url = url.to_string();
        self
    }

    pub fn invalid_url(mut self, url: &str) -> Self {
        self.config.endpoints.invalid_url = url.to_string();
        self
    }

    pub fn wait_ms(mut self, ms: u64) -> Self {
        self.config.timing.wait_ms = ms;
        self
    }

    pub fn parallel_delays_ms(mut self, delays: &[u64]) -> Self {
        self.config.timing.parallel_delays_ms = delays.to_vec();
        self
    }

    pub fn fetch_timeout_ms(mut self, ms: u64) -> Self {
        self.config.timing.fetch_timeout_ms = ms;
        self
    }

    pub fn preview_chars(mut self, n: usize) -> Self {
        self.config.report.preview_chars = n;
        self
    }

    pub fn build(self) -> ScenarioConfig {
        ScenarioConfig::try_from(self.config).expect("Failed to build valid config from builder")
    }
}

impl Default for ScenarioConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
