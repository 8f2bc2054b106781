//! In-memory holder for the full elements dataset
//!
//! Provides a `SnapshotCache` that keeps at most one complete collection,
//! stamped with the time it was fetched, and lets concurrent callers share a
//! single fill when the cache is empty.

use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::data::ElementCollection;

/// A complete dataset as returned by the unparameterized request
#[derive(Debug, Clone)]
pub struct CachedSnapshot {
    /// The cached elements, shared with every caller
    pub elements: Arc<ElementCollection>,
    /// When the snapshot was fetched
    pub fetched_at: DateTime<Utc>,
}

/// Holds zero or one dataset snapshot
///
/// The snapshot never expires and is never partially updated: it is either
/// absent or a whole collection. Only [`clear`](Self::clear) removes it.
#[derive(Debug, Default)]
pub struct SnapshotCache {
    /// The snapshot itself, locked only for reads and swaps
    slot: Mutex<Slot>,
    /// Held for the duration of a fill so concurrent misses share one fetch
    fill_gate: tokio::sync::Mutex<()>,
}

#[derive(Debug, Default)]
struct Slot {
    snapshot: Option<CachedSnapshot>,
    /// Bumped by every clear; a fill only stores into the generation it started in
    generation: u64,
}

impl CachedSnapshot {
    fn new(elements: ElementCollection) -> Self {
        Self {
            elements: Arc::new(elements),
            fetched_at: Utc::now(),
        }
    }
}

impl SnapshotCache {
    /// Creates an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self) -> MutexGuard<'_, Slot> {
        // A panic while holding the slot cannot leave a half-written snapshot
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns the current snapshot, if any
    pub fn get(&self) -> Option<CachedSnapshot> {
        self.slot().snapshot.clone()
    }

    /// Whether a snapshot is currently held
    pub fn is_populated(&self) -> bool {
        self.slot().snapshot.is_some()
    }

    /// Replaces the snapshot with a freshly fetched collection
    pub fn store(&self, elements: ElementCollection) -> CachedSnapshot {
        let snapshot = CachedSnapshot::new(elements);
        self.slot().snapshot = Some(snapshot.clone());
        snapshot
    }

    /// Discards the snapshot
    ///
    /// Returns `true` if one was present. A fill already in flight is
    /// orphaned: its caller still gets the result, but it is not stored and
    /// callers arriving after the clear fetch again.
    pub fn clear(&self) -> bool {
        let mut slot = self.slot();
        slot.generation = slot.generation.wrapping_add(1);
        slot.snapshot.take().is_some()
    }

    /// Returns the snapshot, running `fill` to create it if the cache is empty
    ///
    /// Callers that miss while another fill is running wait for it and reuse
    /// its result instead of starting their own. A failed fill stores nothing;
    /// the next waiter then makes its own attempt.
    pub async fn get_or_try_fill<F, Fut, E>(&self, fill: F) -> Result<CachedSnapshot, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<ElementCollection, E>>,
    {
        if let Some(snapshot) = self.get() {
            debug!(elements = snapshot.elements.len(), "snapshot cache hit");
            return Ok(snapshot);
        }

        let _gate = self.fill_gate.lock().await;

        // Another caller may have filled the cache while we waited
        let generation = {
            let slot = self.slot();
            if let Some(snapshot) = &slot.snapshot {
                debug!(
                    elements = snapshot.elements.len(),
                    "snapshot filled by concurrent caller"
                );
                return Ok(snapshot.clone());
            }
            slot.generation
        };

        debug!("snapshot cache miss");
        let snapshot = CachedSnapshot::new(fill().await?);

        let mut slot = self.slot();
        if slot.generation == generation {
            slot.snapshot = Some(snapshot.clone());
        } else {
            debug!("cache cleared during fill, result not stored");
        }
        Ok(snapshot)
    }
}
