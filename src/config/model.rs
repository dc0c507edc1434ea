// src/config/model.rs

use std::time::Duration;

use serde::Deserialize;

/// Scenario configuration as read from a TOML file.
///
/// ```toml
/// [endpoints]
/// quote_url = "http://ron-swanson-quotes.herokuapp.com/v2/quotes"
/// json_url = "http://www.reddit.com/r/golfpics/.json"
/// invalid_url = "http://something.not.real.blah"
///
/// [timing]
/// wait_ms = 2000
/// parallel_delays_ms = [1000, 2000, 1000]
/// fetch_timeout_ms = 10000   # 0 disables the deadline
///
/// [report]
/// preview_chars = 120
/// ```
///
/// All sections are optional and have reasonable defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawScenarioConfig {
    #[serde(default)]
    pub endpoints: EndpointsSection,

    #[serde(default)]
    pub timing: TimingSection,

    #[serde(default)]
    pub report: ReportSection,
}

/// Validated scenario configuration.
///
/// Only obtainable through `TryFrom<RawScenarioConfig>` (see `validate.rs`)
/// or [`ScenarioConfig::default`].
#[derive(Debug, Clone)]
pub struct ScenarioConfig {
    pub endpoints: EndpointsSection,
    pub timing: TimingSection,
    pub report: ReportSection,
}

impl ScenarioConfig {
    pub(crate) fn new_unchecked(
        endpoints: EndpointsSection,
        timing: TimingSection,
        report: ReportSection,
    ) -> Self {
        Self {
            endpoints,
            timing,
            report,
        }
    }

    pub fn wait(&self) -> Duration {
        Duration::from_millis(self.timing.wait_ms)
    }

    pub fn parallel_delays(&self) -> impl Iterator<Item = Duration> + '_ {
        self.timing
            .parallel_delays_ms
            .iter()
            .map(|ms| Duration::from_millis(*ms))
    }

    pub fn fetch_timeout(&self) -> Option<Duration> {
        match self.timing.fetch_timeout_ms {
            0 => None,
            ms => Some(Duration::from_millis(ms)),
        }
    }
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self::new_unchecked(
            EndpointsSection::default(),
            TimingSection::default(),
            ReportSection::default(),
        )
    }
}

/// `[endpoints]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct EndpointsSection {
    /// Returns a JSON array of quotes; the first one is used.
    #[serde(default = "default_quote_url")]
    pub quote_url: String,

    /// Any URL returning a JSON document.
    #[serde(default = "default_json_url")]
    pub json_url: String,

    /// A host that does not resolve, used to demonstrate a caught failure.
    #[serde(default = "default_invalid_url")]
    pub invalid_url: String,
}

fn default_quote_url() -> String {
    "http://ron-swanson-quotes.herokuapp.com/v2/quotes".to_string()
}

fn default_json_url() -> String {
    "http://www.reddit.com/r/golfpics/.json".to_string()
}

fn default_invalid_url() -> String {
    "http://something.not.real.blah".to_string()
}

impl Default for EndpointsSection {
    fn default() -> Self {
        Self {
            quote_url: default_quote_url(),
            json_url: default_json_url(),
            invalid_url: default_invalid_url(),
        }
    }
}

/// `[timing]` section. All values in milliseconds.
#[derive(Debug, Clone, Deserialize)]
pub struct TimingSection {
    #[serde(default = "default_wait_ms")]
    pub wait_ms: u64,

    #[serde(default = "default_parallel_delays_ms")]
    pub parallel_delays_ms: Vec<u64>,

    /// Deadline for the fetch tasks that carry one. `0` disables it.
    #[serde(default = "default_fetch_timeout_ms")]
    pub fetch_timeout_ms: u64,
}

fn default_wait_ms() -> u64 {
    2000
}

fn default_parallel_delays_ms() -> Vec<u64> {
    vec![1000, 2000, 1000]
}

fn default_fetch_timeout_ms() -> u64 {
    10_000
}

impl Default for TimingSection {
    fn default() -> Self {
        Self {
            wait_ms: default_wait_ms(),
            parallel_delays_ms: default_parallel_delays_ms(),
            fetch_timeout_ms: default_fetch_timeout_ms(),
        }
    }
}

/// `[report]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct ReportSection {
    /// Maximum number of characters of a value shown in the text report.
    #[serde(default = "default_preview_chars")]
    pub preview_chars: usize,
}

fn default_preview_chars() -> usize {
    120
}

impl Default for ReportSection {
    fn default() -> Self {
        Self {
            preview_chars: default_preview_chars(),
        }
    }
}
