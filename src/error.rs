//! Error types for the elements client
//!
//! Every failure carries a human-readable context naming the query that
//! failed (e.g. "Element Xx not found"), so callers can surface the message
//! as-is without inspecting the variant.

use thiserror::Error;

/// Errors raised by a [`Transport`](crate::transport::Transport) before any
/// response status is available
#[derive(Debug, Error)]
pub enum TransportError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The transport could not reach the endpoint for a non-HTTP reason
    #[error("Endpoint unavailable: {0}")]
    Unavailable(String),
}

/// Errors that can occur when querying the elements dataset
#[derive(Debug, Error)]
pub enum ElementsError {
    /// The request never produced a response
    #[error("{context}: {source}")]
    Transport {
        context: String,
        #[source]
        source: TransportError,
    },

    /// The server answered with a non-success status
    #[error("{context} (HTTP {status})")]
    Status { context: String, status: u16 },

    /// The response body was not the expected JSON shape
    #[error("{context}: failed to parse response: {source}")]
    Parse {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}

impl ElementsError {
    /// Describes the failed query, e.g. "Failed to fetch period 9"
    pub fn context(&self) -> &str {
        match self {
            ElementsError::Transport { context, .. }
            | ElementsError::Status { context, .. }
            | ElementsError::Parse { context, .. } => context,
        }
    }

    /// HTTP status code, if the server answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            ElementsError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the server reported the requested resource as missing
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

/// Convenience Result type for the elements client
pub type Result<T> = std::result::Result<T, ElementsError>;
