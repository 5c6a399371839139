//! Static registry of supported chains.

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Metadata for one supported chain.
#[derive(Debug, Clone)]
pub struct ChainInfo {
    pub name: &'static str,
    pub short_name: &'static str,
    pub explorer: &'static str,
}

static CHAINS: Lazy<HashMap<&'static str, ChainInfo>> = Lazy::new(|| {
    let mut m = HashMap::new();
    m.insert(
        "1",
        ChainInfo {
            name: "Ethereum",
            short_name: "ETH",
            explorer: "https://etherscan.io",
        },
    );
    m.insert(
        "8453",
        ChainInfo {
            name: "Base",
            short_name: "BASE",
            explorer: "https://basescan.org",
        },
    );
    m
});

/// Look up chain metadata, falling back to Ethereum mainnet for unknown ids.
pub fn chain_info(chain_id: &str) -> &'static ChainInfo {
    CHAINS.get(chain_id).unwrap_or_else(|| &CHAINS["1"])
}

/// Block explorer URL for an address on the given chain.
pub fn explorer_address_url(chain_id: &str, address: &str) -> String {
    format!("{}/address/{}", chain_info(chain_id).explorer, address)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_chain() {
        let info = chain_info("8453");
        assert_eq!(info.name, "Base");
        assert_eq!(info.short_name, "BASE");
    }

    #[test]
    fn test_unknown_chain_falls_back_to_mainnet() {
        let info = chain_info("999999");
        assert_eq!(info.name, "Ethereum");
    }

    #[test]
    fn test_explorer_address_url() {
        assert_eq!(
            explorer_address_url("1", "0xabc"),
            "https://etherscan.io/address/0xabc"
        );
    }
}
