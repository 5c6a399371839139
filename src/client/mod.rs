//! HTTP client for the SuperVault pricing API.
//!
//! This module provides a synchronous, read-only HTTP client that can be used
//! from async contexts via `tokio::task::spawn_blocking`. Each method issues
//! exactly one request and classifies the outcome; retry policy, if any,
//! belongs to the caller. No caching happens here.

mod async_wrapper;
pub use async_wrapper::{AsyncPricingApi, AsyncPricingApiImpl};

use crate::config::Config;
use crate::error::{FetchError, FetchResult};
use crate::metrics::Metrics;
use crate::models::{PpsInfo, VaultDetailsResponse, VaultsResponse};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// HTTP client for the pricing API.
///
/// Uses `ureq` for synchronous requests; clone freely, the underlying agent
/// is shared.
#[derive(Clone)]
pub struct PricingClient {
    /// Base URL for the pricing API
    base_url: String,

    /// HTTP client agent
    agent: Arc<ureq::Agent>,

    /// Metrics collector
    metrics: Metrics,
}

impl PricingClient {
    /// Create a new PricingClient from configuration.
    pub fn new(config: &Config) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build();

        Self {
            base_url: config.api_base_url.clone(),
            agent: Arc::new(agent),
            metrics: Metrics::new(),
        }
    }

    /// Create a PricingClient with a custom base URL (useful for testing).
    #[doc(hidden)]
    pub fn with_base_url(base_url: String) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(10))
            .build();

        Self {
            base_url,
            agent: Arc::new(agent),
            metrics: Metrics::new(),
        }
    }

    /// Replace the metrics collector with a shared one, so HTTP counters and
    /// cache counters land in the same summary.
    pub fn with_metrics(mut self, metrics: Metrics) -> Self {
        self.metrics = metrics;
        self
    }

    /// Get a reference to the metrics collector.
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Build a full URL from a path.
    fn build_url(&self, path: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{}/{}", base, path)
    }

    /// Execute a single GET request.
    fn get(&self, path: &str) -> Result<ureq::Response, FetchError> {
        let start = Instant::now();
        let url = self.build_url(path);

        tracing::debug!("GET {}", url);

        let result = self.agent.get(&url).call().map_err(|e| self.map_error(e));

        let duration = start.elapsed();
        if result.is_err() {
            self.metrics.record_http_error();
        }
        self.metrics.record_http_request(duration);

        result
    }

    /// Execute a GET request and deserialize the JSON body.
    fn get_json<T: DeserializeOwned>(&self, path: &str) -> FetchResult<T> {
        let response = self.get(path)?;
        let body = response
            .into_string()
            .map_err(|e| FetchError::Parse(e.to_string()))?;
        serde_json::from_str(&body).map_err(|e| FetchError::Parse(e.to_string()))
    }

    /// Map a ureq error to a FetchError.
    fn map_error(&self, error: ureq::Error) -> FetchError {
        match error {
            ureq::Error::Status(code, response) => {
                let message = response
                    .into_string()
                    .unwrap_or_else(|_| "Unknown error".to_string());

                FetchError::Http {
                    status: code,
                    message,
                }
            }
            ureq::Error::Transport(transport) => FetchError::Network(transport.to_string()),
        }
    }

    /// Get all SuperVaults for a chain.
    pub fn get_all_vaults(&self, chain_id: &str) -> FetchResult<VaultsResponse> {
        let path = format!("/api/v1/vaults?chain_id={}", urlencoding::encode(chain_id));
        self.get_json(&path)
    }

    /// Get comprehensive data for one vault: identity, pps, status, config,
    /// fees, managers, upkeep and TVL breakdown in a single call.
    ///
    /// `block_number` selects a historical block; `None` means latest.
    pub fn get_vault(
        &self,
        chain_id: &str,
        vault: &str,
        block_number: Option<u64>,
    ) -> FetchResult<VaultDetailsResponse> {
        let mut path = format!(
            "/api/v1/vault/{}?chain_id={}",
            urlencoding::encode(vault),
            urlencoding::encode(chain_id)
        );
        if let Some(block) = block_number {
            path.push_str(&format!("&block_number={}", block));
        }
        self.get_json(&path)
    }

    /// Get the current PPS for one vault.
    pub fn get_pps(
        &self,
        chain_id: &str,
        vault: &str,
        block_number: Option<u64>,
    ) -> FetchResult<PpsInfo> {
        let mut path = format!(
            "/api/v1/pps?chain_id={}&vault={}",
            urlencoding::encode(chain_id),
            urlencoding::encode(vault)
        );
        if let Some(block) = block_number {
            path.push_str(&format!("&block_number={}", block));
        }
        self.get_json(&path)
    }

    /// Check if the API is healthy.
    pub fn health_check(&self) -> bool {
        self.get("/health").is_ok()
    }
}
