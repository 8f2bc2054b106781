//! Periodic-table elements client
//!
//! Fetches element records from an HTTP dataset endpoint, keeps the full
//! dataset in a per-client cache and answers search and category queries
//! from it.

pub mod cache;
pub mod config;
pub mod data;
pub mod error;
pub mod transport;

pub use config::ClientConfig;
pub use data::{ElementCollection, ElementQuery, ElementRecord, ElementsClient};
pub use error::{ElementsError, Result, TransportError};
pub use transport::{HttpTransport, RawResponse, Transport};
