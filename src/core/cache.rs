use crate::core::rate::RateSnapshot;
use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

/// Single-slot cache holding the latest rate snapshot.
///
/// The slot is replaced wholesale on `put`; readers get a shared handle to the
/// snapshot, so a refresh never mutates what an in-flight request is reading.
pub struct RateCache {
    ttl: Duration,
    slot: RwLock<Option<Arc<RateSnapshot>>>,
}

impl RateCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            slot: RwLock::new(None),
        }
    }

    /// Returns the snapshot if it is non-empty and younger than the TTL at `now`.
    pub async fn get(&self, now: DateTime<Utc>) -> Option<Arc<RateSnapshot>> {
        let slot = self.slot.read().await;
        match slot.as_ref() {
            Some(snapshot) if snapshot.is_empty() => {
                debug!("Cache MISS: snapshot is empty");
                None
            }
            Some(snapshot) if now - snapshot.fetched_at() < self.ttl => {
                debug!("Cache HIT");
                Some(Arc::clone(snapshot))
            }
            Some(_) => {
                debug!("Cache MISS: snapshot expired");
                None
            }
            None => {
                debug!("Cache MISS");
                None
            }
        }
    }

    pub async fn put(&self, snapshot: Arc<RateSnapshot>) {
        let mut slot = self.slot.write().await;
        debug!(fetched_at = %snapshot.fetched_at(), "Cache PUT");
        *slot = Some(snapshot);
    }
}

impl Default for RateCache {
    fn default() -> Self {
        Self::new(Duration::hours(1))
    }
}
