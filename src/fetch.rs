// src/fetch.rs

//! Remote JSON fetch wrapper.
//!
//! One GET per call, no retries and no timeout of its own. Callers needing a
//! deadline give the task a timeout and let the runner enforce it.
//!
//! Failures are classified into:
//! - [`TaskError::Network`]: the request could not be built or sent, or the
//!   body could not be read.
//! - [`TaskError::Decode`]: the body is not valid JSON.
//!
//! The HTTP status is only logged. An error page that is not JSON fails with
//! a decode error like any other non-JSON body.

use std::future::Future;
use std::pin::Pin;

use serde_json::Value;
use tracing::debug;

use crate::errors::{Result as TaskflowResult, TaskError};

/// Boxed future returned by [`JsonFetcher::fetch_json`].
pub type FetchFuture<'a> = Pin<Box<dyn Future<Output = Result<Value, TaskError>> + Send + 'a>>;

/// Anything that can turn a URL into a parsed JSON document.
///
/// Production code uses [`HttpFetcher`]; tests can provide an in-memory
/// implementation.
pub trait JsonFetcher: Send + Sync {
    fn fetch_json<'a>(&'a self, url: &'a str) -> FetchFuture<'a>;
}

/// `reqwest`-backed fetcher.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    inner: reqwest::Client,
}

impl HttpFetcher {
    /// Build a fetcher with a default client.
    ///
    /// Fails if the TLS backend cannot be initialised.
    pub fn new() -> TaskflowResult<Self> {
        let inner = reqwest::Client::builder().build()?;
        Ok(Self { inner })
    }

    pub fn with_client(inner: reqwest::Client) -> Self {
        Self { inner }
    }

    async fn get_json(&self, url: &str) -> Result<Value, TaskError> {
        debug!(url = %url, "GET request");

        let response = self
            .inner
            .get(url)
            .send()
            .await
            .map_err(|e| TaskError::Network(describe_reqwest_error(url, &e)))?;

        let status = response.status();
        debug!(url = %url, status = status.as_u16(), "response received");

        let body = response
            .bytes()
            .await
            .map_err(|e| TaskError::Network(describe_reqwest_error(url, &e)))?;

        serde_json::from_slice(&body).map_err(|e| {
            TaskError::Decode(format!(
                "response from {url} (HTTP {status}) is not valid JSON: {e}"
            ))
        })
    }
}

impl JsonFetcher for HttpFetcher {
    fn fetch_json<'a>(&'a self, url: &'a str) -> FetchFuture<'a> {
        Box::pin(self.get_json(url))
    }
}

/// Fetch `url` with a default [`HttpFetcher`].
pub async fn fetch_json(url: &str) -> Result<Value, TaskError> {
    let fetcher = HttpFetcher::new().map_err(|e| TaskError::Other(e.into()))?;
    fetcher.get_json(url).await
}

/// Fetch `url` and return the first element of the top-level JSON array.
pub async fn fetch_first(fetcher: &dyn JsonFetcher, url: &str) -> Result<Value, TaskError> {
    let value = fetcher.fetch_json(url).await?;
    first_element(value)
}

/// Extract the first element of a JSON array.
///
/// Anything other than a non-empty array is a decode error.
pub fn first_element(value: Value) -> Result<Value, TaskError> {
    match value {
        Value::Array(items) => items
            .into_iter()
            .next()
            .ok_or_else(|| TaskError::Decode("expected a non-empty JSON array, got []".to_string())),
        other => Err(TaskError::Decode(format!(
            "expected a JSON array, got {}",
            json_type_name(&other)
        ))),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Render a transport error without leaking the full error chain.
fn describe_reqwest_error(url: &str, err: &reqwest::Error) -> String {
    let what = if err.is_builder() {
        "invalid request"
    } else if err.is_connect() {
        "connection failed"
    } else if err.is_timeout() {
        "transport timeout"
    } else if err.is_body() || err.is_decode() {
        "failed to read response body"
    } else {
        "request failed"
    };
    format!("{what} for {url}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn first_element_returns_head_of_array() {
        let v = json!(["I'm a simple man.", "second"]);
        assert_eq!(first_element(v).unwrap(), json!("I'm a simple man."));
    }

    #[test]
    fn first_element_rejects_empty_array() {
        let err = first_element(json!([])).unwrap_err();
        assert!(matches!(err, TaskError::Decode(_)));
    }

    #[test]
    fn first_element_rejects_non_array() {
        let err = first_element(json!({"quote": "x"})).unwrap_err();
        match err {
            TaskError::Decode(msg) => assert!(msg.contains("an object")),
            other => panic!("expected Decode error, got {other:?}"),
        }
    }

    #[test]
    fn default_client_builds() {
        assert!(HttpFetcher::new().is_ok());
    }

    #[tokio::test]
    async fn malformed_url_is_a_network_error() {
        let err = fetch_json("not a url").await.unwrap_err();
        assert!(matches!(err, TaskError::Network(_)));
    }
}
