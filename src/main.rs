//! Supervault Monitor - Main entry point
//!
//! Loads configuration from the environment, wires the pricing client behind
//! the cached service layer, and runs the refresh loop until interrupted.

use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;
use supervault_monitor::client::{AsyncPricingApi, AsyncPricingApiImpl};
use supervault_monitor::{Config, Metrics, PricingClient, PricingService};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Load configuration first so LOG_LEVEL can seed the filter default
    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    // Log to stderr only; stdout carries the rendered dashboard
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.clone()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    info!(
        "Starting Supervault Monitor against {} (chain {})",
        config.api_base_url, config.chain_id
    );

    // One collector for both layers, so the refresh loop's summary covers
    // HTTP traffic as well as cache activity
    let metrics = Metrics::new();
    let client = PricingClient::new(&config).with_metrics(metrics.clone());
    let api = Arc::new(AsyncPricingApiImpl::new(client)) as Arc<dyn AsyncPricingApi>;

    let service =
        PricingService::with_metrics(api, Duration::from_secs(config.cache_ttl_secs), metrics);

    if !service.health_check().await {
        warn!("pricing API health check failed; continuing anyway");
    }

    info!(
        "Cache TTL: {}s, refresh interval: {}s",
        config.cache_ttl_secs, config.refresh_interval_secs
    );

    supervault_monitor::refresh::run_refresh_loop(
        &service,
        &config.chain_id,
        Duration::from_secs(config.refresh_interval_secs),
    )
    .await;

    Ok(())
}
