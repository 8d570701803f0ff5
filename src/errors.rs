//! Error types, one enum per pipeline boundary
//!
//! Fetch and delivery errors are recoverable: the orchestrator logs them and
//! moves on. State and config errors are fatal for the run.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StateError {
    #[error("Failed to read state file '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("State file '{}' is corrupt: {source}", path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to write state file '{}': {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize seen-set: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Failed to build HTTP client: {0}")]
    Client(String),

    #[error("Request to {url} failed: {message}")]
    Request { url: String, message: String },

    #[error("Upstream returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("No '{marker}' segment found in response ({body_len} bytes)")]
    MarkerNotFound { marker: String, body_len: usize },

    #[error("Embedded payload is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum DeliveryError {
    #[error("Telegram credentials missing: {0}")]
    MissingCredentials(&'static str),

    #[error("Failed to build HTTP client: {0}")]
    Client(String),

    #[error("Telegram request failed: {0}")]
    Request(String),

    #[error("Telegram rejected message (HTTP {status}): {description}")]
    Rejected { status: u16, description: String },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid config field '{field}': {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Fatal errors that end a run with a non-zero exit code
#[derive(Error, Debug)]
pub enum RunError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("State error: {0}")]
    State(#[from] StateError),

    #[error("Precondition failed: {0}")]
    Precondition(String),
}

impl FetchError {
    /// Short label for log lines and run reports
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::Client(_) => "client",
            FetchError::Request { .. } => "network",
            FetchError::Status { .. } => "status",
            FetchError::MarkerNotFound { .. } => "marker",
            FetchError::Parse(_) => "parse",
        }
    }
}
