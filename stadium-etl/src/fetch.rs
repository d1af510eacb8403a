//! HTTP fetching of the source page.

use async_trait::async_trait;
use tracing::{info, warn};

use crate::config::EtlConfig;
use crate::errors::{EtlError, FetchError};

/// Protocol for fetching raw page content.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetches a URL and returns the response body.
    ///
    /// Network failures, timeouts, and non-2xx statuses are errors; a fetch
    /// failure halts the run rather than flowing into the extractor.
    async fn fetch(&self, url: &str) -> Result<String, EtlError>;
}

/// Fetches pages over HTTP with a bounded timeout.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
    timeout_seconds: f64,
}

impl HttpFetcher {
    /// Creates a fetcher from the pipeline configuration.
    pub fn new(config: &EtlConfig) -> Result<Self, EtlError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| FetchError::Client(e.to_string()))?;

        Ok(Self {
            client,
            timeout_seconds: config.request_timeout_seconds,
        })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String, EtlError> {
        info!(url, "fetching source page");

        let response = self.client.get(url).send().await.map_err(|e| {
            warn!(url, error = %e, "failed to fetch source page");
            if e.is_timeout() {
                FetchError::Timeout {
                    url: url.to_string(),
                    timeout_seconds: self.timeout_seconds,
                }
            } else {
                FetchError::Network {
                    url: url.to_string(),
                    reason: e.to_string(),
                }
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!(url, status = status.as_u16(), "source page returned non-success status");
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            }
            .into());
        }

        let body = response.text().await.map_err(|e| FetchError::Network {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(body)
    }
}

/// A fetcher serving a fixed response, for tests and offline runs.
#[derive(Debug, Clone)]
pub struct StaticFetcher {
    body: Option<String>,
}

impl StaticFetcher {
    /// Creates a fetcher that always succeeds with `body`.
    #[must_use]
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            body: Some(body.into()),
        }
    }

    /// Creates a fetcher that always fails with a network error.
    #[must_use]
    pub fn failing() -> Self {
        Self { body: None }
    }
}

#[async_trait]
impl PageFetcher for StaticFetcher {
    async fn fetch(&self, url: &str) -> Result<String, EtlError> {
        match &self.body {
            Some(body) => Ok(body.clone()),
            None => Err(FetchError::Network {
                url: url.to_string(),
                reason: "static fetcher configured to fail".to_string(),
            }
            .into()),
        }
    }
}
