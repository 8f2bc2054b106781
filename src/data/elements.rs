//! Elements API client
//!
//! This module provides [`ElementsClient`], the single entry point for reading
//! the periodic-table dataset. The full dataset is fetched once and cached;
//! search and category listing run against that snapshot, while the
//! parameterized lookups always go to the server.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use super::query::FETCH_ALL_CONTEXT;
use super::{ElementCollection, ElementQuery, ElementRecord};
use crate::cache::SnapshotCache;
use crate::config::ClientConfig;
use crate::error::{ElementsError, Result, TransportError};
use crate::transport::{HttpTransport, Transport};

/// Client for the periodic-table elements endpoint
///
/// Construct one per consumer and pass it where it is needed; the client is
/// `Send + Sync` when its transport is, so it can be shared behind an `Arc`.
#[derive(Debug)]
pub struct ElementsClient<T = HttpTransport> {
    transport: T,
    cache: SnapshotCache,
}

impl Default for ElementsClient<HttpTransport> {
    fn default() -> Self {
        Self::new()
    }
}

impl ElementsClient<HttpTransport> {
    /// Create a new client against the default endpoint
    pub fn new() -> Self {
        Self::with_transport(HttpTransport::default())
    }

    /// Create a new client from config
    pub fn with_config(config: &ClientConfig) -> std::result::Result<Self, TransportError> {
        Ok(Self::with_transport(HttpTransport::new(config)?))
    }
}

impl<T: Transport> ElementsClient<T> {
    /// Create a new client over any transport, with an empty cache
    pub fn with_transport(transport: T) -> Self {
        Self {
            transport,
            cache: SnapshotCache::new(),
        }
    }

    /// The transport requests go through
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Fetch the full dataset, serving it from the cache after the first
    /// successful call
    ///
    /// Every call made while the cache is populated returns the same shared
    /// collection. Concurrent calls on an empty cache issue a single request.
    pub async fn fetch_all(&self) -> Result<Arc<ElementCollection>> {
        let snapshot = self
            .cache
            .get_or_try_fill(move || async move {
                info!("fetching full elements dataset");
                self.request::<ElementCollection>(None, FETCH_ALL_CONTEXT).await
            })
            .await?;

        Ok(snapshot.elements)
    }

    /// Fetch one element by chemical symbol
    ///
    /// Always asks the server; the cache is neither read nor written. The
    /// symbol is forwarded as given and the record is returned as the server
    /// reports it, so `symbol` is only set if the body includes it.
    pub async fn fetch_by_symbol(&self, symbol: &str) -> Result<ElementRecord> {
        self.query(&ElementQuery::Symbol(symbol.to_string())).await
    }

    /// Fetch one element by atomic number
    ///
    /// The server's single-record body carries no symbol key, so `symbol` is
    /// only set if the body includes it.
    pub async fn fetch_by_number(&self, number: u32) -> Result<ElementRecord> {
        self.query(&ElementQuery::Number(number)).await
    }

    /// Fetch every element in a category, filtered by the server
    pub async fn fetch_by_category(&self, category: &str) -> Result<ElementCollection> {
        self.query(&ElementQuery::Category(category.to_string())).await
    }

    /// Fetch every element in a period; out-of-range values are the
    /// server's call
    pub async fn fetch_by_period(&self, period: u8) -> Result<ElementCollection> {
        self.query(&ElementQuery::Period(period)).await
    }

    /// Fetch every element in a group; out-of-range values are the
    /// server's call
    pub async fn fetch_by_group(&self, group: u8) -> Result<ElementCollection> {
        self.query(&ElementQuery::Group(group)).await
    }

    /// Search the cached dataset by symbol, name, English name or exact
    /// atomic number
    ///
    /// Fetches the dataset on first use. Results follow dataset order and each
    /// carries its symbol. No match yields an empty vector.
    pub async fn search(&self, query: &str) -> Result<Vec<ElementRecord>> {
        let elements = self.fetch_all().await?;
        let results = elements.search(query);
        debug!(query, matches = results.len(), "searched elements");
        Ok(results)
    }

    /// Distinct categories of the cached dataset in order of first occurrence
    pub async fn list_categories(&self) -> Result<Vec<String>> {
        Ok(self.fetch_all().await?.categories())
    }

    /// Look up an element by symbol in the cached dataset
    pub async fn find_by_symbol(&self, symbol: &str) -> Result<Option<ElementRecord>> {
        Ok(self.fetch_all().await?.get(symbol).cloned())
    }

    /// Look up an element by atomic number in the cached dataset
    pub async fn find_by_number(&self, number: u32) -> Result<Option<ElementRecord>> {
        Ok(self.fetch_all().await?.get_by_number(number).cloned())
    }

    /// Drop the cached dataset so the next full-dataset call refetches
    pub fn clear_cache(&self) {
        if self.cache.clear() {
            debug!("elements cache cleared");
        }
    }

    /// Whether the full dataset is currently cached
    pub fn is_cached(&self) -> bool {
        self.cache.is_populated()
    }

    /// When the cached dataset was fetched, if there is one
    pub fn cached_at(&self) -> Option<DateTime<Utc>> {
        self.cache.get().map(|snapshot| snapshot.fetched_at)
    }

    async fn query<R: DeserializeOwned>(&self, query: &ElementQuery) -> Result<R> {
        self.request(Some(query), &query.failure_context()).await
    }

    /// Issue one request and decode a successful body
    async fn request<R: DeserializeOwned>(
        &self,
        query: Option<&ElementQuery>,
        context: &str,
    ) -> Result<R> {
        let response = self
            .transport
            .get(query)
            .await
            .map_err(|source| {
                warn!(error = %source, "{}", context);
                ElementsError::Transport {
                    context: context.to_string(),
                    source,
                }
            })?;

        if !response.is_success() {
            warn!(status = response.status, "{}", context);
            return Err(ElementsError::Status {
                context: context.to_string(),
                status: response.status,
            });
        }

        serde_json::from_str(&response.body).map_err(|source| {
            warn!(error = %source, "{}", context);
            ElementsError::Parse {
                context: context.to_string(),
                source,
            }
        })
    }
}
