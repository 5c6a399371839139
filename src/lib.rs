//! Supervault Monitor - a read-only terminal dashboard for SuperVault metrics.
//!
//! This library wraps the Superform pricing API behind a TTL response cache
//! and renders per-vault metrics (price per share, fees, upkeep funding and
//! TVL allocations) as plain text on a fixed refresh interval.
//!
//! # Architecture
//!
//! - **models**: Data structures for vault lists, vault details and PPS feeds
//! - **error**: Custom error types for precise error handling
//! - **config**: Configuration management from environment variables
//! - **client**: HTTP client for the pricing API, with an async wrapper
//! - **cache**: TTL response cache with stale fallback and request coalescing
//! - **service**: Cached service layer the rendering code talks to
//! - **chains**: Static chain registry (names and explorer URLs)
//! - **formatters**: Numeric and address display helpers
//! - **render**: Plain-text cards for vault data
//! - **refresh**: Timer-driven refresh loop

pub mod cache;
pub mod chains;
pub mod client;
pub mod config;
pub mod error;
pub mod formatters;
pub mod metrics;
pub mod models;
pub mod refresh;
pub mod render;
pub mod service;

pub use cache::{CacheKey, CachedValue, ResponseCache};
pub use client::{AsyncPricingApi, AsyncPricingApiImpl, PricingClient};
pub use config::Config;
pub use error::{ConfigError, FetchError};
pub use metrics::{Metrics, MetricsSummary};
pub use models::{PpsInfo, VaultDetailsResponse, VaultsResponse};
pub use service::PricingService;
