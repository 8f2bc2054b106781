//! HTTP transport for the elements endpoint
//!
//! The client only needs "GET the endpoint with at most one query parameter
//! and hand back the status and body". [`Transport`] captures that so the
//! client can be driven by something other than a live server.

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::config::ClientConfig;
use crate::data::ElementQuery;
use crate::error::TransportError;

/// Status and body of a completed request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    /// HTTP status code
    pub status: u16,
    /// Response body as text
    pub body: String,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Whether the status is in the 2xx range
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Issues GET requests against the elements endpoint
///
/// `None` requests the full dataset; `Some(query)` adds that query's single
/// parameter. A non-success status is a normal `Ok` response; `Err` is
/// reserved for requests that never produced one.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, query: Option<&ElementQuery>) -> Result<RawResponse, TransportError>;
}

/// [`Transport`] backed by a `reqwest` client
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: String,
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::with_client(Client::new(), ClientConfig::default().base_url)
    }
}

impl HttpTransport {
    /// Build a transport from config
    pub fn new(config: &ClientConfig) -> Result<Self, TransportError> {
        let mut builder = Client::builder().user_agent(config.user_agent.clone());
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self::with_client(builder.build()?, config.base_url.clone()))
    }

    /// Create a transport with a custom HTTP client
    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Prepare the GET request for a query without sending it
    fn request(&self, query: Option<&ElementQuery>) -> reqwest::RequestBuilder {
        let request = self.client.get(&self.base_url);
        match query {
            Some(query) => request.query(&[query.pair()]),
            None => request,
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, query: Option<&ElementQuery>) -> Result<RawResponse, TransportError> {
        let response = self.request(query).send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        debug!(url = %self.base_url, status, bytes = body.len(), "elements endpoint responded");
        Ok(RawResponse { status, body })
    }
}
