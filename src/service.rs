//! Cached access to the pricing API.
//!
//! [`PricingService`] is the single data source for the rendering layer: it
//! wraps the async client behind one [`ResponseCache`] per endpoint and
//! exposes the manual invalidation paths the dashboard's refresh button uses.
//! Constructed once at process start and passed around explicitly; there is
//! no process-wide singleton.

use crate::cache::{CacheKey, CachedValue, ResponseCache};
use crate::client::AsyncPricingApi;
use crate::error::FetchResult;
use crate::metrics::Metrics;
use crate::models::{PpsInfo, VaultDetailsResponse, VaultsResponse};
use std::sync::Arc;
use std::time::Duration;

/// Cached, read-only view of the pricing API.
#[derive(Clone)]
pub struct PricingService {
    api: Arc<dyn AsyncPricingApi>,
    vaults_cache: ResponseCache<CacheKey, VaultsResponse>,
    details_cache: ResponseCache<CacheKey, VaultDetailsResponse>,
    pps_cache: ResponseCache<CacheKey, PpsInfo>,
    metrics: Metrics,
}

impl PricingService {
    /// Create a service with the given cache TTL applied to all endpoints.
    pub fn new(api: Arc<dyn AsyncPricingApi>, cache_ttl: Duration) -> Self {
        Self::with_metrics(api, cache_ttl, Metrics::new())
    }

    /// Like [`Self::new`], recording cache activity into a shared collector.
    /// Pass the HTTP client's collector so one summary covers both layers.
    pub fn with_metrics(
        api: Arc<dyn AsyncPricingApi>,
        cache_ttl: Duration,
        metrics: Metrics,
    ) -> Self {
        Self {
            api,
            vaults_cache: ResponseCache::with_metrics(cache_ttl, metrics.clone()),
            details_cache: ResponseCache::with_metrics(cache_ttl, metrics.clone()),
            pps_cache: ResponseCache::with_metrics(cache_ttl, metrics.clone()),
            metrics,
        }
    }

    /// Get a reference to the metrics collector shared by the caches.
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Vault list for a chain, cached.
    pub async fn vaults(&self, chain_id: &str) -> FetchResult<CachedValue<VaultsResponse>> {
        let key = CacheKey::vaults(chain_id);
        let api = self.api.clone();
        let chain_id = chain_id.to_string();

        self.vaults_cache
            .get_with(key, move || async move { api.fetch_vaults(&chain_id).await })
            .await
    }

    /// Full detail for one vault, cached per (chain, vault, block).
    pub async fn vault(
        &self,
        chain_id: &str,
        vault: &str,
        block_number: Option<u64>,
    ) -> FetchResult<CachedValue<VaultDetailsResponse>> {
        let key = CacheKey::vault_detail(chain_id, vault, block_number);
        let api = self.api.clone();
        let chain_id = chain_id.to_string();
        let vault = vault.to_string();

        self.details_cache
            .get_with(key, move || async move {
                api.fetch_vault(&chain_id, &vault, block_number).await
            })
            .await
    }

    /// PPS feed for one vault, cached per (chain, vault, block).
    pub async fn pps(
        &self,
        chain_id: &str,
        vault: &str,
        block_number: Option<u64>,
    ) -> FetchResult<CachedValue<PpsInfo>> {
        let key = CacheKey::pps(chain_id, vault, block_number);
        let api = self.api.clone();
        let chain_id = chain_id.to_string();
        let vault = vault.to_string();

        self.pps_cache
            .get_with(key, move || async move {
                api.fetch_pps(&chain_id, &vault, block_number).await
            })
            .await
    }

    /// Liveness of the API itself. Not cached.
    pub async fn health_check(&self) -> bool {
        self.api.health_check().await
    }

    /// Drop the cached "latest" data for one vault so the next `get` refetches.
    /// Block-pinned entries are immutable history and are left in place.
    pub async fn clear_vault_cache(&self, chain_id: &str, vault: &str) {
        tracing::debug!(chain_id, vault, "clearing cached vault data");
        self.details_cache
            .remove(&CacheKey::vault_detail(chain_id, vault, None))
            .await;
        self.pps_cache.remove(&CacheKey::pps(chain_id, vault, None)).await;
    }

    /// Drop every cached response.
    pub async fn clear_cache(&self) {
        self.vaults_cache.clear().await;
        self.details_cache.clear().await;
        self.pps_cache.clear().await;
    }
}
