//! Client configuration
//!
//! Holds where the dataset lives and how the HTTP client is built. The
//! snapshot cache is separate state owned by the client, not configuration.

use std::time::Duration;

/// Default dataset endpoint of the reference server
pub const DEFAULT_BASE_URL: &str = "http://localhost:1253/data/elements";

/// Settings used to build an [`HttpTransport`](crate::transport::HttpTransport)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Endpoint that answers both the full dataset and parameterized queries
    pub base_url: String,
    /// Per-request timeout; `None` waits for the transport indefinitely
    pub timeout: Option<Duration>,
    /// Value of the `User-Agent` header
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
            user_agent: concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl ClientConfig {
    /// Create a config pointing at a custom endpoint
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Set a per-request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set a custom `User-Agent`
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}
