//! Timer-driven refresh.
//!
//! A single scheduled task polls the pricing API every `REFRESH_INTERVAL`
//! seconds through the [`PricingService`], so cache TTL decides whether a
//! cycle actually hits the network. One cycle renders every vault on the
//! configured chain; fetch failures are rendered as error cards and logged,
//! never fatal.

use crate::render;
use crate::service::PricingService;
use std::time::Duration;
use tokio::time::MissedTickBehavior;

/// Run refresh cycles forever, printing each rendered block to stdout.
///
/// The first cycle runs immediately; later cycles are spaced by `interval`.
pub async fn run_refresh_loop(service: &PricingService, chain_id: &str, interval: Duration) {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;

        let blocks = refresh_once(service, chain_id).await;
        for block in blocks {
            println!("{}", block);
        }

        let summary = service.metrics().summary();
        tracing::debug!(
            http_requests = summary.http_requests_total,
            http_errors = summary.http_errors_total,
            cache_hits = summary.cache_hits_total,
            cache_misses = summary.cache_misses_total,
            stale_served = summary.stale_served_total,
            "refresh cycle complete"
        );
    }
}

/// Execute one refresh cycle and return the rendered text blocks.
///
/// A failed vault-list fetch with nothing cached produces a single error
/// block; individual vault failures only replace that vault's card.
pub async fn refresh_once(service: &PricingService, chain_id: &str) -> Vec<String> {
    let vaults = match service.vaults(chain_id).await {
        Ok(cached) => cached,
        Err(err) => {
            tracing::error!(chain_id, error = %err, "failed to fetch vault list");
            return vec![render::render_fetch_error("vault list", &err)];
        }
    };

    if vaults.is_stale {
        tracing::warn!(chain_id, "serving stale vault list");
    }

    let options = vaults.value.options();
    if options.is_empty() {
        return vec![format!("No vaults found on chain {}.\n", chain_id)];
    }

    let mut blocks = Vec::with_capacity(options.len());
    for option in &options {
        match service.vault(chain_id, &option.address, None).await {
            Ok(cached) => blocks.push(render::render_vault(&cached, chain_id)),
            Err(err) => {
                tracing::error!(vault = %option.address, error = %err, "failed to fetch vault");
                blocks.push(render::render_fetch_error(&option.label, &err));
            }
        }
    }
    blocks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::AsyncPricingApi;
    use crate::error::{FetchError, FetchResult};
    use crate::models::{PpsInfo, VaultDetailsResponse, VaultsResponse};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct ScriptedApi {
        vaults: FetchResult<VaultsResponse>,
        detail: FetchResult<VaultDetailsResponse>,
        vault_calls: AtomicUsize,
    }

    impl ScriptedApi {
        fn new(
            vaults: FetchResult<VaultsResponse>,
            detail: FetchResult<VaultDetailsResponse>,
        ) -> Self {
            Self {
                vaults,
                detail,
                vault_calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl AsyncPricingApi for ScriptedApi {
        async fn fetch_vaults(&self, _chain_id: &str) -> FetchResult<VaultsResponse> {
            self.vaults.clone()
        }

        async fn fetch_vault(
            &self,
            _chain_id: &str,
            _vault: &str,
            _block_number: Option<u64>,
        ) -> FetchResult<VaultDetailsResponse> {
            self.vault_calls.fetch_add(1, Ordering::SeqCst);
            self.detail.clone()
        }

        async fn fetch_pps(
            &self,
            _chain_id: &str,
            _vault: &str,
            _block_number: Option<u64>,
        ) -> FetchResult<PpsInfo> {
            Ok(PpsInfo::default())
        }

        async fn health_check(&self) -> bool {
            true
        }
    }

    fn one_vault_response() -> VaultsResponse {
        VaultsResponse {
            vaults: vec!["0xAAA".to_string()],
            names: vec!["Alpha Vault".to_string()],
            symbols: vec!["aVLT".to_string()],
            strategies: Vec::new(),
            escrows: Vec::new(),
        }
    }

    #[tokio::test]
    async fn test_refresh_renders_each_vault() {
        let api = Arc::new(ScriptedApi::new(
            Ok(one_vault_response()),
            Ok(VaultDetailsResponse::default()),
        ));
        let service = PricingService::new(api.clone(), Duration::from_secs(60));

        let blocks = refresh_once(&service, "1").await;
        assert_eq!(blocks.len(), 1);
        assert!(blocks[0].contains("Price Per Share"));
    }

    #[tokio::test]
    async fn test_refresh_within_ttl_hits_cache() {
        let api = Arc::new(ScriptedApi::new(
            Ok(one_vault_response()),
            Ok(VaultDetailsResponse::default()),
        ));
        let service = PricingService::new(api.clone(), Duration::from_secs(60));

        refresh_once(&service, "1").await;
        refresh_once(&service, "1").await;

        assert_eq!(api.vault_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_refresh_list_failure_renders_error_block() {
        let api = Arc::new(ScriptedApi::new(
            Err(FetchError::Network("down".to_string())),
            Ok(VaultDetailsResponse::default()),
        ));
        let service = PricingService::new(api, Duration::from_secs(60));

        let blocks = refresh_once(&service, "1").await;
        assert_eq!(blocks.len(), 1);
        assert!(blocks[0].contains("Error fetching data"));
    }

    #[tokio::test]
    async fn test_refresh_vault_failure_renders_error_card() {
        let api = Arc::new(ScriptedApi::new(
            Ok(one_vault_response()),
            Err(FetchError::Http {
                status: 500,
                message: "boom".to_string(),
            }),
        ));
        let service = PricingService::new(api, Duration::from_secs(60));

        let blocks = refresh_once(&service, "1").await;
        assert_eq!(blocks.len(), 1);
        assert!(blocks[0].contains("Alpha Vault (aVLT)"));
        assert!(blocks[0].contains("status 500"));
    }

    #[tokio::test]
    async fn test_refresh_empty_vault_list() {
        let api = Arc::new(ScriptedApi::new(
            Ok(VaultsResponse {
                vaults: Vec::new(),
                names: Vec::new(),
                symbols: Vec::new(),
                strategies: Vec::new(),
                escrows: Vec::new(),
            }),
            Ok(VaultDetailsResponse::default()),
        ));
        let service = PricingService::new(api, Duration::from_secs(60));

        let blocks = refresh_once(&service, "1").await;
        assert_eq!(blocks.len(), 1);
        assert!(blocks[0].contains("No vaults found"));
    }
}
