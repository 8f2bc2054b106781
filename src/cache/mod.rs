//! Cache module for the full elements dataset
//!
//! This module provides a single-slot, in-memory snapshot cache. It is filled
//! by the first successful full-dataset fetch and emptied only on request,
//! never by age.

mod snapshot;

pub use snapshot::{CachedSnapshot, SnapshotCache};
