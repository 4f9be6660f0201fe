//! Single-slot TTL cache for the rendered home feed.
//!
//! The home feed has no per-user variation, so one slot holds the serialized
//! first page. Within the TTL the snapshot is served verbatim even when new
//! posts exist; only expiry or an explicit `invalidate` forces a recompute.
//! A cache entry moves `Empty → Fresh → Expired → Fresh`; `Empty` and
//! `Expired` behave identically (both trigger recomputation).

use std::future::Future;
use std::sync::RwLock;
use std::time::Duration;

use bytes::Bytes;
use tokio::sync::Mutex;
use tokio::time::Instant;

use super::config::CacheConfig;
use super::lock::{rw_read, rw_write};

const SOURCE: &str = "cache::home";

#[derive(Clone)]
struct Snapshot {
    body: Bytes,
    stored_at: Instant,
}

pub struct HomeFeedCache {
    slot: RwLock<Option<Snapshot>>,
    // Serializes recomputation: at most one flight fills the slot per miss
    // storm; readers never take this lock.
    recompute: Mutex<()>,
    ttl: Duration,
    enabled: bool,
}

impl HomeFeedCache {
    pub fn new(config: &CacheConfig) -> Self {
        Self {
            slot: RwLock::new(None),
            recompute: Mutex::new(()),
            ttl: config.home_ttl(),
            enabled: config.enable_home_cache,
        }
    }

    /// Serve the cached snapshot, recomputing through `compute` on a miss.
    ///
    /// `compute` runs at most once per call and only when the slot is empty
    /// or expired after the single-flight lock is held.
    pub async fn get_or_compute<F, Fut, E>(&self, compute: F) -> Result<Bytes, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Bytes, E>>,
    {
        if !self.enabled {
            return compute().await;
        }

        if let Some(body) = self.fresh() {
            metrics::counter!("brusio_home_cache_hit_total").increment(1);
            return Ok(body);
        }

        let _flight = self.recompute.lock().await;

        // Another flight may have refilled the slot while we waited.
        if let Some(body) = self.fresh() {
            metrics::counter!("brusio_home_cache_hit_total").increment(1);
            return Ok(body);
        }

        metrics::counter!("brusio_home_cache_miss_total").increment(1);
        let body = compute().await?;
        *rw_write(&self.slot, SOURCE, "store") = Some(Snapshot {
            body: body.clone(),
            stored_at: Instant::now(),
        });
        Ok(body)
    }

    /// Drop the snapshot so the next request recomputes before the TTL.
    pub fn invalidate(&self) {
        metrics::counter!("brusio_home_cache_invalidate_total").increment(1);
        *rw_write(&self.slot, SOURCE, "invalidate") = None;
    }

    /// True while the slot holds an unexpired snapshot.
    pub fn is_fresh(&self) -> bool {
        self.fresh().is_some()
    }

    fn fresh(&self) -> Option<Bytes> {
        let guard = rw_read(&self.slot, SOURCE, "read");
        guard
            .as_ref()
            .filter(|snapshot| snapshot.stored_at.elapsed() < self.ttl)
            .map(|snapshot| snapshot.body.clone())
    }
}
