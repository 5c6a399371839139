//! TTL response cache with stale-fallback semantics.
//!
//! Wraps a fetch operation per key: fresh entries are served without
//! fetching, expired or missing entries trigger exactly one underlying fetch
//! (concurrent callers for the same key share the in-flight attempt), and a
//! failed refresh of an already-cached key downgrades to the last-known value
//! marked stale instead of raising. The dashboard never goes blank once it
//! has shown data.
//!
//! Time is measured with `tokio::time::Instant`, so tests can drive expiry
//! with the runtime's paused clock.

use crate::error::FetchError;
use crate::metrics::Metrics;
use futures::future::{BoxFuture, FutureExt, Shared};
use std::collections::HashMap;
use std::future::Future;
use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;

/// A cached payload annotated with staleness, returned per call.
#[derive(Debug, Clone, PartialEq)]
pub struct CachedValue<V> {
    /// The response payload
    pub value: V,

    /// True when this value is a fallback from a failed refresh (or older
    /// than the TTL it was requested with)
    pub is_stale: bool,

    /// Time since the value was fetched
    pub age: Duration,
}

/// A stored entry. Overwritten whole on refetch, never merged.
struct CacheEntry<V> {
    value: V,
    fetched_at: Instant,
}

type SharedFetch<V> = Shared<BoxFuture<'static, Result<V, FetchError>>>;

/// An in-flight fetch that concurrent callers can join. The id lets the
/// caller that observes completion remove exactly this attempt from the map,
/// not a successor registered for the same key.
struct InFlight<V> {
    future: SharedFetch<V>,
    id: u64,
}

struct CacheState<K, V> {
    entries: HashMap<K, CacheEntry<V>>,
    in_flight: HashMap<K, InFlight<V>>,
    next_fetch_id: u64,
}

/// A keyed response cache with TTL expiry, request coalescing and stale
/// fallback.
///
/// Cloning is cheap and clones share the same underlying state.
pub struct ResponseCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    state: Arc<Mutex<CacheState<K, V>>>,
    default_ttl: Duration,
    metrics: Metrics,
}

impl<K, V> Clone for ResponseCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
            default_ttl: self.default_ttl,
            metrics: self.metrics.clone(),
        }
    }
}

impl<K, V> ResponseCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone + Send + 'static,
{
    /// Create a cache with the given layer-wide default TTL.
    pub fn new(default_ttl: Duration) -> Self {
        Self::with_metrics(default_ttl, Metrics::new())
    }

    /// Create a cache that records hit/miss/stale counters into a shared
    /// metrics collector.
    pub fn with_metrics(default_ttl: Duration, metrics: Metrics) -> Self {
        Self {
            state: Arc::new(Mutex::new(CacheState {
                entries: HashMap::new(),
                in_flight: HashMap::new(),
                next_fetch_id: 0,
            })),
            default_ttl,
            metrics,
        }
    }

    /// The layer-wide default TTL.
    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    /// [`Self::get_with_ttl`] using the layer-wide default TTL.
    pub async fn get_with<F, Fut>(&self, key: K, fetch: F) -> Result<CachedValue<V>, FetchError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, FetchError>> + Send + 'static,
    {
        self.get_with_ttl(key, self.default_ttl, fetch).await
    }

    /// Serve the freshest available value for `key`.
    ///
    /// - No entry: run `fetch`; store and return fresh on success, propagate
    ///   the error on failure (nothing to fall back to).
    /// - Entry younger than `ttl`: return it without fetching.
    /// - Entry expired: run `fetch`; replace and return fresh on success, or
    ///   return the old value with `is_stale = true` on failure.
    ///
    /// Concurrent callers for the same missing/expired key share one
    /// underlying fetch and all observe its result.
    pub async fn get_with_ttl<F, Fut>(
        &self,
        key: K,
        ttl: Duration,
        fetch: F,
    ) -> Result<CachedValue<V>, FetchError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, FetchError>> + Send + 'static,
    {
        let started = Instant::now();

        let (future, fetch_id) = {
            let mut state = self.state.lock().await;

            if let Some(entry) = state.entries.get(&key) {
                let age = started.saturating_duration_since(entry.fetched_at);
                if age <= ttl {
                    self.metrics.record_cache_hit();
                    return Ok(CachedValue {
                        value: entry.value.clone(),
                        is_stale: false,
                        age,
                    });
                }
            }

            self.metrics.record_cache_miss();

            match state.in_flight.get(&key) {
                Some(in_flight) => (in_flight.future.clone(), in_flight.id),
                None => {
                    let id = state.next_fetch_id;
                    state.next_fetch_id += 1;
                    let future = fetch().boxed().shared();
                    state.in_flight.insert(
                        key.clone(),
                        InFlight {
                            future: future.clone(),
                            id,
                        },
                    );
                    (future, id)
                }
            }
        };

        let result = future.await;

        let mut state = self.state.lock().await;

        // Deregister the attempt we awaited; a later attempt for the same key
        // may already be registered and must be left alone.
        if state
            .in_flight
            .get(&key)
            .is_some_and(|in_flight| in_flight.id == fetch_id)
        {
            state.in_flight.remove(&key);
        }

        match result {
            Ok(value) => {
                // Monotonic replacement: never let a fetch that started before
                // the current entry was installed overwrite it.
                let replace = match state.entries.get(&key) {
                    Some(entry) => entry.fetched_at <= started,
                    None => true,
                };
                if replace {
                    state.entries.insert(
                        key,
                        CacheEntry {
                            value: value.clone(),
                            fetched_at: Instant::now(),
                        },
                    );
                }
                Ok(CachedValue {
                    value,
                    is_stale: false,
                    age: Duration::ZERO,
                })
            }
            Err(err) => match state.entries.get(&key) {
                // Failed refresh of a known key: serve the previous value,
                // honestly marked. The entry itself is left untouched.
                Some(entry) => {
                    self.metrics.record_stale_served();
                    Ok(CachedValue {
                        value: entry.value.clone(),
                        is_stale: true,
                        age: entry.fetched_at.elapsed(),
                    })
                }
                // First-ever fetch for the key: nothing to show, surface it.
                None => Err(err),
            },
        }
    }

    /// Remove a specific key from the cache.
    pub async fn remove(&self, key: &K) {
        self.state.lock().await.entries.remove(key);
    }

    /// Clear all entries from the cache.
    pub async fn clear(&self) {
        self.state.lock().await.entries.clear();
    }

    /// Number of stored entries (expired ones included; nothing evicts them
    /// before process teardown).
    pub async fn len(&self) -> usize {
        self.state.lock().await.entries.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
