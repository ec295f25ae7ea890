//! Error types for the data-acquisition layer.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while acquiring quotes or exchange rates.
///
/// Every variant is fatal for a run; the application layer decides how to
/// report it. Missing quotes or rates are not errors and never show up here.
#[derive(Error, Debug)]
pub enum FetchError {
    /// The request could not be sent or the response body could not be read.
    /// Timeouts land here too.
    #[error("{source_name} request failed: {error}")]
    Transport {
        source_name: &'static str,
        #[source]
        error: reqwest::Error,
    },

    /// The configured provider address does not form a valid URL.
    #[error("invalid {source_name} provider URL {url}: {reason}")]
    InvalidUrl {
        source_name: &'static str,
        url: String,
        reason: String,
    },

    /// The provider answered with a non-success HTTP status.
    #[error("{source_name} provider responded with HTTP {status}")]
    Status {
        source_name: &'static str,
        status: reqwest::StatusCode,
    },

    /// The payload (from the provider, a fixture or a cache file) is not the
    /// expected JSON document.
    #[error("failed to decode {source_name} payload: {error}")]
    Decode {
        source_name: &'static str,
        #[source]
        error: serde_json::Error,
    },

    /// Reading or writing a cache entry failed.
    #[error("cache entry {}: {error}", .path.display())]
    Cache {
        path: PathBuf,
        #[source]
        error: std::io::Error,
    },

    /// A spawned fetch task panicked or was cancelled before finishing.
    #[error("fetch task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl FetchError {
    pub(crate) fn transport(source_name: &'static str, error: reqwest::Error) -> Self {
        FetchError::Transport { source_name, error }
    }

    pub(crate) fn decode(source_name: &'static str, error: serde_json::Error) -> Self {
        FetchError::Decode { source_name, error }
    }

    pub(crate) fn cache(path: impl Into<PathBuf>, error: std::io::Error) -> Self {
        FetchError::Cache {
            path: path.into(),
            error,
        }
    }
}
