//! Response model for the vault list endpoint.

use serde::Deserialize;

/// Response from `GET /api/v1/vaults`.
///
/// The API returns parallel arrays: `vaults[i]` is the address whose display
/// name and share symbol are `names[i]` and `symbols[i]`.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct VaultsResponse {
    /// Vault addresses
    #[serde(default)]
    pub vaults: Vec<String>,

    /// Vault display names, parallel to `vaults`
    #[serde(default)]
    pub names: Vec<String>,

    /// Share token symbols, parallel to `vaults`
    #[serde(default)]
    pub symbols: Vec<String>,

    /// Strategy addresses, parallel to `vaults`
    #[serde(default)]
    pub strategies: Vec<String>,

    /// Escrow addresses, parallel to `vaults`
    #[serde(default)]
    pub escrows: Vec<String>,
}

/// A selectable vault, assembled from the parallel arrays of [`VaultsResponse`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VaultOption {
    pub address: String,
    pub label: String,
}

impl VaultsResponse {
    /// Build display options, tolerating name/symbol arrays shorter than the
    /// address array (the API has shipped truncated metadata before).
    pub fn options(&self) -> Vec<VaultOption> {
        self.vaults
            .iter()
            .enumerate()
            .map(|(i, address)| {
                let name = self.names.get(i).map(String::as_str).unwrap_or("Unknown");
                let symbol = self.symbols.get(i).map(String::as_str).unwrap_or("???");
                VaultOption {
                    address: address.clone(),
                    label: format!("{} ({})", name, symbol),
                }
            })
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.vaults.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_vaults_response() {
        let json = r#"{
            "vaults": ["0xAAA", "0xBBB"],
            "names": ["Alpha Vault", "Beta Vault"],
            "symbols": ["aVLT", "bVLT"],
            "strategies": ["0x111", "0x222"],
            "escrows": ["0x333", "0x444"]
        }"#;

        let response: VaultsResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.vaults.len(), 2);
        assert_eq!(response.names[1], "Beta Vault");
        assert_eq!(response.strategies[0], "0x111");
    }

    #[test]
    fn test_missing_arrays_default_empty() {
        let response: VaultsResponse = serde_json::from_str(r#"{"vaults": ["0xAAA"]}"#).unwrap();
        assert_eq!(response.vaults.len(), 1);
        assert!(response.names.is_empty());
        assert!(response.escrows.is_empty());
    }

    #[test]
    fn test_options_pairs_names_and_symbols() {
        let response = VaultsResponse {
            vaults: vec!["0xAAA".to_string(), "0xBBB".to_string()],
            names: vec!["Alpha Vault".to_string()],
            symbols: vec!["aVLT".to_string()],
            strategies: Vec::new(),
            escrows: Vec::new(),
        };

        let options = response.options();
        assert_eq!(options[0].label, "Alpha Vault (aVLT)");
        // Second vault has no metadata; falls back to placeholders
        assert_eq!(options[1].label, "Unknown (???)");
        assert_eq!(options[1].address, "0xBBB");
    }
}
