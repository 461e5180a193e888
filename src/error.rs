//! Error types shared across the client.

use thiserror::Error;

/// Failures while talking to the tracker backend.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The configured base URL cannot carry path segments (e.g. `mailto:`)
    #[error("Invalid API base URL: {0}")]
    InvalidBaseUrl(String),

    /// Connection, TLS or timeout failure before a response arrived
    #[error("Request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The backend answered with a non-success status code
    #[error("Backend returned {status} for {url}")]
    Status {
        status: reqwest::StatusCode,
        url: String,
    },

    /// The response body was not the JSON shape we expected
    #[error("Failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

impl ApiError {
    /// True when the backend reported that the resource does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::Status { status, .. } if *status == reqwest::StatusCode::NOT_FOUND)
    }
}

/// Client-side search form validation failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Invalid transaction hash format. Should start with 0x followed by 64 hexadecimal characters.")]
    InvalidHash,

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("From date must be before or equal to To date")]
    InvertedRange,
}
