//! Response model for the comprehensive vault detail endpoint.
//!
//! `GET /api/v1/vault/{address}` returns everything about one vault in a
//! single call: identity, PPS, status flags, strategy config, fees, managers,
//! upkeep balance and the TVL allocation breakdown.

use crate::models::pps::PpsInfo;
use serde::Deserialize;

/// Full response from `GET /api/v1/vault/{address}`.
#[derive(Debug, Clone, Deserialize, PartialEq, Default)]
pub struct VaultDetailsResponse {
    #[serde(default)]
    pub vault: VaultInfo,

    #[serde(default)]
    pub pps: PpsInfo,

    #[serde(default)]
    pub status: StatusInfo,

    #[serde(default)]
    pub config: StrategyConfig,

    #[serde(default)]
    pub fees: FeeInfo,

    #[serde(default)]
    pub managers: ManagerInfo,

    #[serde(default)]
    pub upkeep: UpkeepInfo,

    #[serde(default)]
    pub tvl: TvlInfo,

    /// Unix timestamp the API assembled this response at
    #[serde(default)]
    pub timestamp: Option<i64>,

    /// Block number the data was read at (historical queries only)
    #[serde(default)]
    pub block_number: Option<u64>,
}

impl VaultDetailsResponse {
    /// Decimals of the underlying asset, defaulting to 18 when the API omits
    /// asset metadata.
    pub fn asset_decimals(&self) -> u32 {
        self.vault.asset.decimals.unwrap_or(18)
    }
}

/// Vault identity and balances.
#[derive(Debug, Clone, Deserialize, PartialEq, Default)]
pub struct VaultInfo {
    #[serde(default)]
    pub address: String,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub symbol: String,

    #[serde(default)]
    pub strategy: String,

    #[serde(default)]
    pub escrow: String,

    /// Assets held in escrow, wei-scale decimal string
    #[serde(default)]
    pub escrowed_assets: String,

    /// Total managed assets, wei-scale decimal string
    #[serde(default)]
    pub total_assets: String,

    /// Total share supply, wei-scale decimal string
    #[serde(default)]
    pub total_supply: String,

    #[serde(default)]
    pub asset: AssetInfo,
}

/// Underlying asset metadata.
#[derive(Debug, Clone, Deserialize, PartialEq, Default)]
pub struct AssetInfo {
    #[serde(default)]
    pub address: String,

    #[serde(default)]
    pub symbol: String,

    #[serde(default)]
    pub decimals: Option<u32>,
}

/// Vault status flags.
#[derive(Debug, Clone, Deserialize, PartialEq, Default)]
pub struct StatusInfo {
    #[serde(default)]
    pub is_paused: bool,

    /// Set by the API when the on-chain PPS has exceeded its max staleness
    #[serde(default)]
    pub is_pps_stale: bool,
}

/// Strategy configuration.
#[derive(Debug, Clone, Deserialize, PartialEq, Default)]
pub struct StrategyConfig {
    /// Allowed PPS deviation, 1e18-scale decimal string
    #[serde(default)]
    pub deviation_threshold: String,

    /// Seconds after which a reported PPS expires
    #[serde(default)]
    pub pps_expiration: u64,
}

impl StrategyConfig {
    /// Deviation threshold as a percentage (1e18 scale → percent).
    pub fn deviation_pct(&self) -> f64 {
        self.deviation_threshold.parse::<f64>().unwrap_or(0.0) / 1e16
    }
}

/// Fee configuration and accrual state.
#[derive(Debug, Clone, Deserialize, PartialEq, Default)]
pub struct FeeInfo {
    /// Performance fee in basis points
    #[serde(default)]
    pub performance_fee_bps: u64,

    /// Management fee in basis points
    #[serde(default)]
    pub management_fee_bps: u64,

    /// Fee recipient address
    #[serde(default)]
    pub recipient: String,

    /// High-water-mark PPS, decimal string
    #[serde(default)]
    pub vault_hwm_pps: String,

    /// Unrealized profit above the HWM, wei-scale decimal string
    #[serde(default)]
    pub unrealized_profit: String,
}

/// Manager addresses.
#[derive(Debug, Clone, Deserialize, PartialEq, Default)]
pub struct ManagerInfo {
    #[serde(default)]
    pub main: String,

    #[serde(default)]
    pub secondary: Vec<String>,
}

/// Chainlink-style upkeep funding state.
#[derive(Debug, Clone, Deserialize, PartialEq, Default)]
pub struct UpkeepInfo {
    /// Upkeep balance, wei-scale decimal string
    #[serde(default)]
    pub balance: String,
}

/// TVL allocation breakdown.
#[derive(Debug, Clone, Deserialize, PartialEq, Default)]
pub struct TvlInfo {
    /// Total assets across all sources, wei-scale decimal string
    #[serde(default)]
    pub total: String,

    #[serde(default)]
    pub sources: Vec<TvlSource>,
}

/// One yield source in the TVL breakdown.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct TvlSource {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub address: String,

    #[serde(default)]
    pub oracle: String,

    /// Assets allocated to this source, wei-scale decimal string
    #[serde(default)]
    pub assets: String,

    /// Share of total TVL, already in percent
    #[serde(default)]
    pub percentage: f64,

    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

impl TvlSource {
    /// Idle balances are reported as pseudo-sources named "Idle ..."; they are
    /// not active yield positions.
    pub fn is_idle(&self) -> bool {
        self.name.starts_with("Idle ")
    }
}
