//! Data structures for pricing API responses.
//!
//! Big integer amounts (wei-scale balances, PPS values) arrive from the API as
//! decimal strings and are kept as strings in these models; conversion to
//! human-readable numbers happens in the `formatters` module.

pub mod pps;
pub mod vault;
pub mod vault_detail;

pub use pps::PpsInfo;
pub use vault::{VaultOption, VaultsResponse};
pub use vault_detail::{
    AssetInfo, FeeInfo, ManagerInfo, StatusInfo, StrategyConfig, TvlInfo, TvlSource, UpkeepInfo,
    VaultDetailsResponse, VaultInfo,
};
