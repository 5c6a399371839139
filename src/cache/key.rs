//! Cache key derivation.
//!
//! A [`CacheKey`] is derived deterministically from request parameters: equal
//! requests always produce equal keys, and a historical (block-pinned) query
//! never collides with the latest-data query for the same vault.

use std::fmt;

/// Identifies one distinct queryable resource.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CacheKey {
    /// Vault list for a chain
    Vaults { chain_id: String },

    /// Full detail for one vault, optionally pinned to a block
    VaultDetail {
        chain_id: String,
        vault: String,
        block_number: Option<u64>,
    },

    /// PPS feed for one vault, optionally pinned to a block
    Pps {
        chain_id: String,
        vault: String,
        block_number: Option<u64>,
    },
}

impl CacheKey {
    pub fn vaults(chain_id: &str) -> Self {
        CacheKey::Vaults {
            chain_id: chain_id.to_string(),
        }
    }

    pub fn vault_detail(chain_id: &str, vault: &str, block_number: Option<u64>) -> Self {
        CacheKey::VaultDetail {
            chain_id: chain_id.to_string(),
            vault: vault.to_string(),
            block_number,
        }
    }

    pub fn pps(chain_id: &str, vault: &str, block_number: Option<u64>) -> Self {
        CacheKey::Pps {
            chain_id: chain_id.to_string(),
            vault: vault.to_string(),
            block_number,
        }
    }
}

fn block_suffix(block_number: &Option<u64>) -> String {
    match block_number {
        Some(block) => block.to_string(),
        None => "latest".to_string(),
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheKey::Vaults { chain_id } => write!(f, "vaults_{}", chain_id),
            CacheKey::VaultDetail {
                chain_id,
                vault,
                block_number,
            } => write!(
                f,
                "vault_{}_{}_{}",
                chain_id,
                vault,
                block_suffix(block_number)
            ),
            CacheKey::Pps {
                chain_id,
                vault,
                block_number,
            } => write!(
                f,
                "pps_{}_{}_{}",
                chain_id,
                vault,
                block_suffix(block_number)
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equal_requests_produce_equal_keys() {
        let a = CacheKey::vault_detail("1", "0xAAA", None);
        let b = CacheKey::vault_detail("1", "0xAAA", None);
        assert_eq!(a, b);
    }

    #[test]
    fn test_distinct_parameters_produce_distinct_keys() {
        let latest = CacheKey::vault_detail("1", "0xAAA", None);
        let pinned = CacheKey::vault_detail("1", "0xAAA", Some(18000000));
        let other_chain = CacheKey::vault_detail("8453", "0xAAA", None);
        let pps = CacheKey::pps("1", "0xAAA", None);

        assert_ne!(latest, pinned);
        assert_ne!(latest, other_chain);
        assert_ne!(
            std::mem::discriminant(&latest),
            std::mem::discriminant(&pps)
        );
    }

    #[test]
    fn test_display_format() {
        assert_eq!(CacheKey::vaults("1").to_string(), "vaults_1");
        assert_eq!(
            CacheKey::vault_detail("1", "0xAAA", None).to_string(),
            "vault_1_0xAAA_latest"
        );
        assert_eq!(
            CacheKey::pps("1", "0xAAA", Some(42)).to_string(),
            "pps_1_0xAAA_42"
        );
    }
}
