//! Async wrapper around the synchronous PricingClient.
//!
//! This module provides an async interface to the synchronous client by using
//! `tokio::task::spawn_blocking` to run HTTP operations on a dedicated thread
//! pool, preventing blocking of the async runtime. The `AsyncPricingApi`
//! trait is the seam the cache layer consumes; tests substitute scripted
//! implementations for it.

use crate::client::PricingClient;
use crate::error::{FetchError, FetchResult};
use crate::models::{PpsInfo, VaultDetailsResponse, VaultsResponse};
use async_trait::async_trait;
use std::sync::Arc;

/// Async interface to the pricing API.
#[async_trait]
pub trait AsyncPricingApi: Send + Sync {
    async fn fetch_vaults(&self, chain_id: &str) -> FetchResult<VaultsResponse>;

    async fn fetch_vault(
        &self,
        chain_id: &str,
        vault: &str,
        block_number: Option<u64>,
    ) -> FetchResult<VaultDetailsResponse>;

    async fn fetch_pps(
        &self,
        chain_id: &str,
        vault: &str,
        block_number: Option<u64>,
    ) -> FetchResult<PpsInfo>;

    async fn health_check(&self) -> bool;
}

/// Async wrapper around the synchronous [`PricingClient`].
#[derive(Clone)]
pub struct AsyncPricingApiImpl {
    client: Arc<PricingClient>,
}

impl AsyncPricingApiImpl {
    pub fn new(client: PricingClient) -> Self {
        Self {
            client: Arc::new(client),
        }
    }
}

#[async_trait]
impl AsyncPricingApi for AsyncPricingApiImpl {
    async fn fetch_vaults(&self, chain_id: &str) -> FetchResult<VaultsResponse> {
        let client = self.client.clone();
        let chain_id = chain_id.to_string();

        tokio::task::spawn_blocking(move || client.get_all_vaults(&chain_id))
            .await
            .map_err(|e| FetchError::Network(format!("task join error: {}", e)))?
    }

    async fn fetch_vault(
        &self,
        chain_id: &str,
        vault: &str,
        block_number: Option<u64>,
    ) -> FetchResult<VaultDetailsResponse> {
        let client = self.client.clone();
        let chain_id = chain_id.to_string();
        let vault = vault.to_string();

        tokio::task::spawn_blocking(move || client.get_vault(&chain_id, &vault, block_number))
            .await
            .map_err(|e| FetchError::Network(format!("task join error: {}", e)))?
    }

    async fn fetch_pps(
        &self,
        chain_id: &str,
        vault: &str,
        block_number: Option<u64>,
    ) -> FetchResult<PpsInfo> {
        let client = self.client.clone();
        let chain_id = chain_id.to_string();
        let vault = vault.to_string();

        tokio::task::spawn_blocking(move || client.get_pps(&chain_id, &vault, block_number))
            .await
            .map_err(|e| FetchError::Network(format!("task join error: {}", e)))?
    }

    async fn health_check(&self) -> bool {
        let client = self.client.clone();

        tokio::task::spawn_blocking(move || client.health_check())
            .await
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Config;

    #[tokio::test]
    async fn test_async_client_creation() {
        let config = Config::default();
        let client = PricingClient::new(&config);
        let async_client = AsyncPricingApiImpl::new(client);

        // Should be able to clone
        let _cloned = async_client.clone();
    }
}
