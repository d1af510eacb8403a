//! Configuration for the ETL pipeline.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Configuration shared by all pipeline stages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EtlConfig {
    /// URL of the article listing stadiums by capacity.
    #[serde(default = "default_source_url")]
    pub source_url: String,

    /// Directory the output CSV is written into. Must already exist.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub request_timeout_seconds: f64,

    /// Image URL substituted when a stadium row carries no image.
    #[serde(default = "default_placeholder_image_url")]
    pub placeholder_image_url: String,

    /// User agent string sent with the fetch request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_source_url() -> String {
    "https://en.wikipedia.org/wiki/List_of_association_football_stadiums_by_capacity"
        .to_string()
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_timeout() -> f64 {
    10.0
}

fn default_placeholder_image_url() -> String {
    "https://upload.wikimedia.org/wikipedia/commons/thumb/0/0a/No-image-available.png/480px-No-image-available.png"
        .to_string()
}

fn default_user_agent() -> String {
    "stadium-etl/0.1".to_string()
}

impl Default for EtlConfig {
    fn default() -> Self {
        Self {
            source_url: default_source_url(),
            output_dir: default_output_dir(),
            request_timeout_seconds: default_timeout(),
            placeholder_image_url: default_placeholder_image_url(),
            user_agent: default_user_agent(),
        }
    }
}

impl EtlConfig {
    /// Creates a new configuration with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the source URL.
    #[must_use]
    pub fn with_source_url(mut self, url: impl Into<String>) -> Self {
        self.source_url = url.into();
        self
    }

    /// Sets the output directory.
    #[must_use]
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, seconds: f64) -> Self {
        self.request_timeout_seconds = seconds;
        self
    }

    /// Sets the placeholder image URL.
    #[must_use]
    pub fn with_placeholder_image_url(mut self, url: impl Into<String>) -> Self {
        self.placeholder_image_url = url.into();
        self
    }

    /// Gets the request timeout as a `Duration`.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs_f64(self.request_timeout_seconds)
    }
}
