use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde_json::Value;
use taskflow::errors::TaskError;
use taskflow::fetch::{FetchFuture, JsonFetcher};

/// Canned reply for one URL.
#[derive(Debug, Clone)]
pub enum FakeResponse {
    Json(Value),
    NetworkError(String),
    DecodeError(String),
}

/// An in-memory fetcher that:
/// - records which URLs were requested
/// - answers each URL with a canned response, optionally after a delay
///
/// Unknown URLs fail with a network error, like an unresolvable host.
#[derive(Debug, Clone, Default)]
pub struct FakeFetcher {
    responses: HashMap<String, (FakeResponse, Duration)>,
    requested: Arc<Mutex<Vec<String>>>,
}

impl FakeFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_json(self, url: &str, value: Value) -> Self {
        self.with_response(url, FakeResponse::Json(value), Duration::ZERO)
    }

    pub fn with_response(mut self, url: &str, response: FakeResponse, latency: Duration) -> Self {
        self.responses.insert(url.to_string(), (response, latency));
        self
    }

    /// Shared log of requested URLs, in request order.
    pub fn requested(&self) -> Arc<Mutex<Vec<String>>> {
        Arc::clone(&self.requested)
    }
}

impl JsonFetcher for FakeFetcher {
    fn fetch_json<'a>(&'a self, url: &'a str) -> FetchFuture<'a> {
        Box::pin(async move {
            self.requested.lock().unwrap().push(url.to_string());

            let Some((response, latency)) = self.responses.get(url).cloned() else {
                return Err(TaskError::Network(format!("connection failed for {url}")));
            };

            if !latency.is_zero() {
                tokio::time::sleep(latency).await;
            }

            match response {
                FakeResponse::Json(value) => Ok(value),
                FakeResponse::NetworkError(msg) => Err(TaskError::Network(msg)),
                FakeResponse::DecodeError(msg) => Err(TaskError::Decode(msg)),
            }
        })
    }
}
