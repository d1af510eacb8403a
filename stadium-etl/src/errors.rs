//! Error types for the stadium ETL pipeline.
//!
//! Every error here is step-fatal: the runner aborts the run on the first
//! failure and surfaces it as the unit of observability.

use thiserror::Error;

/// The main error type for pipeline operations.
#[derive(Debug, Error)]
pub enum EtlError {
    /// The source page could not be fetched.
    #[error("{0}")]
    Fetch(#[from] FetchError),

    /// The source page could not be parsed into stadium rows.
    #[error("{0}")]
    Parse(#[from] ParseError),

    /// A capacity value could not be coerced to an integer.
    #[error("capacity for '{stadium}' is not an integer: '{value}'")]
    Coercion {
        /// The stadium whose row failed coercion.
        stadium: String,
        /// The offending capacity text.
        value: String,
    },

    /// The inter-stage handoff store rejected a push or pull.
    #[error("{0}")]
    Handoff(#[from] HandoffError),

    /// CSV serialization or write failure.
    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),

    /// Filesystem failure.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Handoff payload serialization failure.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Errors raised while fetching the source page.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The HTTP client itself could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    Client(String),

    /// A connection or protocol level failure.
    #[error("request to {url} failed: {reason}")]
    Network {
        /// The requested URL.
        url: String,
        /// The underlying failure description.
        reason: String,
    },

    /// The request exceeded the configured timeout.
    #[error("request to {url} timed out after {timeout_seconds}s")]
    Timeout {
        /// The requested URL.
        url: String,
        /// The configured timeout.
        timeout_seconds: f64,
    },

    /// The server answered with a non-2xx status.
    #[error("request to {url} returned status {status}")]
    Status {
        /// The requested URL.
        url: String,
        /// The HTTP status code.
        status: u16,
    },
}

/// Errors raised while locating or reading the source table.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The page contained no tables at all.
    #[error("no tables found on the source page")]
    NoTables,

    /// No table caption mentioned football.
    #[error("no table with a caption mentioning football was found")]
    NoFootballTable,

    /// The football table matched but yielded no data rows.
    #[error("the football table contained no data rows")]
    EmptyTable,
}

/// Errors raised by the inter-stage transfer store.
#[derive(Debug, Error)]
pub enum HandoffError {
    /// A stage pulled a payload that was never pushed (or already consumed).
    #[error("no payload from task '{task_id}' under key '{key}'")]
    Missing {
        /// The producing task id.
        task_id: String,
        /// The payload key.
        key: String,
    },

    /// A stage pushed twice under the same task id and key.
    #[error("task '{task_id}' already pushed a payload under key '{key}'")]
    Conflict {
        /// The producing task id.
        task_id: String,
        /// The payload key.
        key: String,
    },
}
