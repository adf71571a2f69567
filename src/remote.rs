//! HTTP client for the remote key-value configuration source.
//!
//! The remote source serves a JSON-encoded configuration document at a
//! fixed path. This client is a narrow collaborator: fetch the document,
//! nothing else. All failures are recoverable from the resolver's point
//! of view.

use std::time::Duration;

use serde_json::Value;

use crate::core::{Result, StrataError};

/// Requests that outlive this are treated as an unreachable endpoint, so a
/// slow remote delays at most one daemon tick.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// A remote key-value configuration endpoint.
#[derive(Debug, Clone)]
pub struct RemoteSource {
    client: reqwest::Client,
    endpoint: String,
    path: String,
}

impl RemoteSource {
    /// Creates a remote source for the given endpoint and document path.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be constructed.
    pub fn new(endpoint: impl Into<String>, path: impl Into<String>) -> Result<Self> {
        let endpoint = endpoint.into();

        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| StrataError::remote(e, &endpoint))?;

        Ok(Self {
            client,
            endpoint,
            path: path.into(),
        })
    }

    /// Full URL of the remote configuration document.
    pub fn url(&self) -> String {
        format!("{}{}", self.endpoint.trim_end_matches('/'), self.path)
    }

    /// Fetches and decodes the remote configuration document.
    ///
    /// # Errors
    /// Returns `StrataError::Remote` when the endpoint is unreachable, the
    /// request times out, the response status is not successful, or the
    /// body is not valid JSON.
    pub async fn fetch(&self) -> Result<Value> {
        let url = self.url();

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| StrataError::remote(e, &url))?;

        let status = response.status();
        if !status.is_success() {
            return Err(StrataError::remote(
                format!("unexpected status {status}"),
                &url,
            ));
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| StrataError::remote(e, &url))
    }
}
