//! Plain-text rendering of vault metrics.
//!
//! The renderer consumes [`CachedValue`]s only; it never touches the network.
//! Two distinct failure surfaces exist and must not be conflated: "no data
//! available" (a propagated fetch error, rendered by [`render_fetch_error`])
//! and "showing possibly outdated data" (a stale fallback, rendered as a
//! banner above otherwise normal cards).

use crate::cache::CachedValue;
use crate::chains::{chain_info, explorer_address_url};
use crate::error::FetchError;
use crate::formatters::{format_age, format_amount, format_percentage, truncate_address, wei_to_token};
use crate::models::{
    FeeInfo, PpsInfo, StatusInfo, StrategyConfig, TvlInfo, UpkeepInfo, VaultDetailsResponse,
};
use chrono::{DateTime, Utc};
use std::fmt::Write;

/// Health of the on-chain PPS value, derived from its age relative to the
/// configured maximum staleness.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PpsHealth {
    Fresh,
    Warning,
    Stale,
    Unknown,
}

impl PpsHealth {
    pub fn label(&self) -> &'static str {
        match self {
            PpsHealth::Fresh => "Fresh",
            PpsHealth::Warning => "Warning",
            PpsHealth::Stale => "Stale",
            PpsHealth::Unknown => "Unknown",
        }
    }
}

/// Classify PPS health. The API's explicit `is_pps_stale` flag overrides the
/// age-based heuristic.
pub fn pps_health(pps: &PpsInfo, status: &StatusInfo, now: i64) -> PpsHealth {
    if status.is_pps_stale {
        return PpsHealth::Stale;
    }
    if pps.max_staleness == 0 {
        return PpsHealth::Unknown;
    }

    let age = (now - pps.last_update_timestamp).max(0) as f64;
    let ratio = age / pps.max_staleness as f64;
    if ratio < 0.5 {
        PpsHealth::Fresh
    } else if ratio < 1.0 {
        PpsHealth::Warning
    } else {
        PpsHealth::Stale
    }
}

/// Funding level of the vault's upkeep balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpkeepStatus {
    Low,
    Medium,
    Good,
}

impl UpkeepStatus {
    /// Thresholds are in native-token wei: below 0.1 is Low, below 1 is Medium.
    pub fn from_balance_wei(balance_wei: f64) -> Self {
        if balance_wei < 1e17 {
            UpkeepStatus::Low
        } else if balance_wei < 1e18 {
            UpkeepStatus::Medium
        } else {
            UpkeepStatus::Good
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            UpkeepStatus::Low => "Low",
            UpkeepStatus::Medium => "Medium",
            UpkeepStatus::Good => "Good",
        }
    }
}

fn format_timestamp(timestamp: i64) -> String {
    match DateTime::<Utc>::from_timestamp(timestamp, 0) {
        Some(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
        None => "N/A".to_string(),
    }
}

/// One vault rendered in full: identity, PPS, fees, upkeep and allocations,
/// preceded by a staleness banner when the cache served a fallback.
pub fn render_vault(cached: &CachedValue<VaultDetailsResponse>, chain_id: &str) -> String {
    let details = &cached.value;
    let mut out = String::new();

    if cached.is_stale {
        let _ = writeln!(
            out,
            "!! data may be outdated (last successful fetch {})",
            format_age(cached.age)
        );
    }

    out.push_str(&render_vault_details(details, chain_id));
    out.push_str(&render_pps(
        &details.pps,
        &details.status,
        Utc::now().timestamp(),
    ));
    out.push_str(&render_config(&details.config));
    out.push_str(&render_fees(&details.fees, details.asset_decimals()));
    out.push_str(&render_upkeep(&details.upkeep));
    out.push_str(&render_allocations(&details.tvl, details.asset_decimals()));
    out
}

/// Identity and balances card.
pub fn render_vault_details(details: &VaultDetailsResponse, chain_id: &str) -> String {
    let vault = &details.vault;
    let decimals = details.asset_decimals();
    let asset_symbol = if vault.asset.symbol.is_empty() {
        "N/A"
    } else {
        &vault.asset.symbol
    };

    let chain = chain_info(chain_id);
    let mut out = String::new();
    let _ = writeln!(
        out,
        "=== {} ({}) on {} [{}] ===",
        vault.name, vault.symbol, chain.name, chain.short_name
    );
    let _ = writeln!(out, "  Vault:        {}", vault.address);
    let _ = writeln!(out, "  Strategy:     {}", truncate_address(&vault.strategy, 4));
    let _ = writeln!(out, "  Escrow:       {}", truncate_address(&vault.escrow, 4));
    let _ = writeln!(out, "  Main manager: {}", truncate_address(&details.managers.main, 4));
    if !details.managers.secondary.is_empty() {
        let secondary: Vec<String> = details
            .managers
            .secondary
            .iter()
            .map(|m| truncate_address(m, 4))
            .collect();
        let _ = writeln!(out, "  Co-managers:  {}", secondary.join(", "));
    }
    let _ = writeln!(
        out,
        "  Explorer:     {}",
        explorer_address_url(chain_id, &vault.address)
    );
    let _ = writeln!(
        out,
        "  Total assets: {} {}",
        format_amount(wei_to_token(&vault.total_assets, decimals), 4),
        asset_symbol
    );
    let _ = writeln!(
        out,
        "  Total supply: {} {}",
        format_amount(wei_to_token(&vault.total_supply, decimals), 4),
        vault.symbol
    );
    let _ = writeln!(
        out,
        "  Escrowed:     {} {}",
        format_amount(wei_to_token(&vault.escrowed_assets, decimals), 4),
        asset_symbol
    );
    let _ = writeln!(
        out,
        "  Status:       {}",
        if details.status.is_paused { "Paused" } else { "Active" }
    );
    if let Some(timestamp) = details.timestamp {
        let block = details
            .block_number
            .map(|b| format!(" | block {}", b))
            .unwrap_or_default();
        let _ = writeln!(out, "  Fetched:      {}{}", format_timestamp(timestamp), block);
    }
    out
}

/// PPS card with health classification.
pub fn render_pps(pps: &PpsInfo, status: &StatusInfo, now: i64) -> String {
    let health = pps_health(pps, status, now);

    let mut out = String::new();
    let _ = writeln!(out, "--- Price Per Share [{}] ---", health.label());
    let _ = writeln!(out, "  Current:    {}", pps.current_pps);
    let _ = writeln!(out, "  Calculated: {}", pps.calculated_pps);
    let _ = writeln!(out, "  Delta:      {}", format_percentage(pps.delta_pct(), 2));
    let _ = writeln!(
        out,
        "  Updated:    {} (max staleness {}s)",
        format_timestamp(pps.last_update_timestamp),
        pps.max_staleness
    );
    out
}

/// Strategy configuration card.
pub fn render_config(config: &StrategyConfig) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "--- Strategy Config ---");
    let _ = writeln!(
        out,
        "  Deviation threshold: {}",
        format_percentage(config.deviation_pct(), 2)
    );
    let _ = writeln!(
        out,
        "  PPS expiration:      {:.1}h",
        config.pps_expiration as f64 / 3600.0
    );
    out
}

/// Fee configuration card.
pub fn render_fees(fees: &FeeInfo, asset_decimals: u32) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "--- Fees ---");
    let _ = writeln!(
        out,
        "  Performance: {}",
        format_percentage(fees.performance_fee_bps as f64 / 100.0, 1)
    );
    let _ = writeln!(
        out,
        "  Management:  {}",
        format_percentage(fees.management_fee_bps as f64 / 100.0, 2)
    );
    let _ = writeln!(out, "  HWM PPS:     {}", fees.vault_hwm_pps);
    let _ = writeln!(
        out,
        "  Unrealized:  {}",
        format_amount(wei_to_token(&fees.unrealized_profit, asset_decimals), 4)
    );
    out
}

/// Upkeep funding card.
pub fn render_upkeep(upkeep: &UpkeepInfo) -> String {
    let balance_wei: f64 = upkeep.balance.parse().unwrap_or(0.0);
    let status = UpkeepStatus::from_balance_wei(balance_wei);

    let mut out = String::new();
    let _ = writeln!(out, "--- Upkeep ---");
    let _ = writeln!(
        out,
        "  Balance: {}",
        format_amount(wei_to_token(&upkeep.balance, 18), 4)
    );
    let _ = writeln!(out, "  Status:  {}", status.label());
    out
}

/// Allocation breakdown table, largest position first.
pub fn render_allocations(tvl: &TvlInfo, asset_decimals: u32) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "--- Allocations ---");

    if tvl.sources.is_empty() {
        let _ = writeln!(out, "  No allocation data available for this vault.");
        return out;
    }

    let mut sources: Vec<_> = tvl.sources.iter().collect();
    sources.sort_by(|a, b| {
        wei_to_token(&b.assets, asset_decimals)
            .partial_cmp(&wei_to_token(&a.assets, asset_decimals))
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    for source in &sources {
        let status = if source.is_idle() {
            "Idle"
        } else if source.is_active {
            "Active"
        } else {
            "Inactive"
        };
        let _ = writeln!(
            out,
            "  {:<28} {:>14} {:>8} [{}]",
            source.name,
            format_amount(wei_to_token(&source.assets, asset_decimals), 4),
            format_percentage(source.percentage, 2),
            status
        );
    }

    let active = sources.iter().filter(|s| !s.is_idle() && s.is_active).count();
    let idle = sources.iter().filter(|s| s.is_idle()).count();
    let _ = writeln!(
        out,
        "  Total: {} across {} sources ({} active, {} idle)",
        format_amount(wei_to_token(&tvl.total, asset_decimals), 4),
        sources.len(),
        active,
        idle
    );
    out
}

/// "No data available": a fetch error with nothing cached to fall back to.
pub fn render_fetch_error(vault: &str, err: &FetchError) -> String {
    format!(
        "=== {} ===\n  Error fetching data: {}\n  Please try again later or select a different vault.\n",
        vault, err
    )
}
