//! Price-per-share model, shared by the PPS feed endpoint and the vault
//! detail response.

use serde::Deserialize;

/// PPS data for one vault.
///
/// `current_pps` is the value reported on-chain; `calculated_pps` is what the
/// pricing service derives from the vault's holdings. A widening gap between
/// the two is the main thing this dashboard exists to surface.
#[derive(Debug, Clone, Deserialize, PartialEq, Default)]
pub struct PpsInfo {
    /// On-chain PPS, decimal string
    #[serde(default)]
    pub current_pps: String,

    /// Recalculated PPS, decimal string
    #[serde(default)]
    pub calculated_pps: String,

    /// Unix timestamp of the last on-chain PPS update
    #[serde(default)]
    pub last_update_timestamp: i64,

    /// Minimum seconds between on-chain updates
    #[serde(default)]
    pub min_update_interval: u64,

    /// Maximum allowed on-chain staleness in seconds (0 = unknown)
    #[serde(default)]
    pub max_staleness: u64,
}

impl PpsInfo {
    /// Difference between calculated and current PPS as a percentage of the
    /// current value. Returns 0 when the current PPS is zero or unparseable.
    pub fn delta_pct(&self) -> f64 {
        let current: f64 = self.current_pps.parse().unwrap_or(0.0);
        let calculated: f64 = self.calculated_pps.parse().unwrap_or(0.0);
        if current > 0.0 {
            (calculated - current) / current * 100.0
        } else {
            0.0
        }
    }
}
