use crate::{LedgerError, Result};
use serde::{Deserialize, Serialize};

/// Supported chains for history export
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Chain {
    MegaEth,
    Keeta,
}

impl Chain {
    pub fn as_str(&self) -> &'static str {
        match self {
            Chain::MegaEth => "megaeth",
            Chain::Keeta => "keeta",
        }
    }

    pub fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "megaeth" | "mega-eth" => Ok(Chain::MegaEth),
            "keeta" => Ok(Chain::Keeta),
            other => Err(LedgerError::UnsupportedChain(other.to_string())),
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Chain::MegaEth => "MegaETH Mainnet",
            Chain::Keeta => "Keeta Network",
        }
    }

    /// EVM chain id, where the chain has one
    pub fn chain_id(&self) -> Option<u32> {
        match self {
            Chain::MegaEth => Some(4326),
            Chain::Keeta => None,
        }
    }

    pub fn native_symbol(&self) -> &'static str {
        match self {
            Chain::MegaEth => "ETH",
            Chain::Keeta => "KEETA",
        }
    }

    /// Decimals of the native token as it appears on the wire
    pub fn native_decimals(&self) -> u32 {
        18
    }

    /// Infer the chain from the address format. `0x…` is MegaETH,
    /// `keeta_…` is Keeta.
    pub fn detect(address: &str) -> Option<Chain> {
        let trimmed = address.trim();
        if trimmed.starts_with("keeta_") {
            Some(Chain::Keeta)
        } else if trimmed.starts_with("0x") {
            Some(Chain::MegaEth)
        } else {
            None
        }
    }

    /// Validate an address against this chain's format
    pub fn validate_address(&self, address: &str) -> Result<()> {
        let valid = match self {
            Chain::MegaEth => is_valid_evm_address(address),
            Chain::Keeta => is_valid_keeta_address(address),
        };

        if valid {
            Ok(())
        } else {
            Err(LedgerError::InvalidAddress(address.to_string()))
        }
    }

    pub fn explorer_tx_url(&self, explorer_base: &str, hash: &str) -> String {
        match self {
            Chain::Keeta => format!("{}/transaction/{}", explorer_base, hash),
            Chain::MegaEth => format!("{}/tx/{}", explorer_base, hash),
        }
    }

    pub fn explorer_address_url(&self, explorer_base: &str, address: &str) -> String {
        match self {
            Chain::Keeta => format!("{}/account/{}", explorer_base, address),
            Chain::MegaEth => format!("{}/address/{}", explorer_base, address),
        }
    }
}

/// EVM address: 0x followed by exactly 40 hex characters
fn is_valid_evm_address(address: &str) -> bool {
    address.len() == 42
        && address.starts_with("0x")
        && address[2..].chars().all(|c| c.is_ascii_hexdigit())
}

/// Keeta address: `keeta_` prefix followed by at least one alphanumeric
fn is_valid_keeta_address(address: &str) -> bool {
    match address.strip_prefix("keeta_") {
        Some(rest) => !rest.is_empty() && rest.chars().all(|c| c.is_ascii_alphanumeric()),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chain_string_round_trip() {
        assert_eq!(Chain::MegaEth.as_str(), "megaeth");
        assert_eq!(Chain::Keeta.as_str(), "keeta");
        assert_eq!(Chain::from_str("megaeth").unwrap(), Chain::MegaEth);
        assert_eq!(Chain::from_str("KEETA").unwrap(), Chain::Keeta);
        assert!(Chain::from_str("solana").is_err());
    }

    #[test]
    fn detects_chain_from_address_prefix() {
        assert_eq!(
            Chain::detect("0x742d35cc6131b2f6e7f4c3b5e8a8c8d8f0b4c4e3"),
            Some(Chain::MegaEth)
        );
        assert_eq!(Chain::detect("keeta_abc123"), Some(Chain::Keeta));
        assert_eq!(Chain::detect("bc1qxyz"), None);
    }

    #[test]
    fn validates_evm_addresses() {
        let chain = Chain::MegaEth;
        assert!(chain
            .validate_address("0x742d35cc6131b2f6e7f4c3b5e8a8c8d8f0b4c4e3")
            .is_ok());
        assert!(chain
            .validate_address("0x742D35CC6131B2F6E7F4C3B5E8A8C8D8F0B4C4E3")
            .is_ok());
        // No 0x prefix
        assert!(chain
            .validate_address("742d35cc6131b2f6e7f4c3b5e8a8c8d8f0b4c4e3")
            .is_err());
        // Too short
        assert!(chain
            .validate_address("0x742d35cc6131b2f6e7f4c3b5e8a8c8d8f0b4c4")
            .is_err());
        // Invalid hex character
        assert!(chain
            .validate_address("0x742d35cc6131b2f6e7f4c3b5e8a8c8d8f0b4c4g3")
            .is_err());
    }

    #[test]
    fn validates_keeta_addresses() {
        let chain = Chain::Keeta;
        assert!(chain.validate_address("keeta_aabd2mkz3pyawn").is_ok());
        assert!(chain.validate_address("keeta_").is_err());
        assert!(chain.validate_address("keeta_with-dash").is_err());
        assert!(chain.validate_address("0x742d35cc6131b2f6e7f4c3b5e8a8c8d8f0b4c4e3").is_err());
    }

    #[test]
    fn explorer_urls_use_chain_specific_paths() {
        assert_eq!(
            Chain::MegaEth.explorer_tx_url("https://megaeth.blockscout.com", "0xabc"),
            "https://megaeth.blockscout.com/tx/0xabc"
        );
        assert_eq!(
            Chain::Keeta.explorer_tx_url("https://explorer.keeta.com", "HASH"),
            "https://explorer.keeta.com/transaction/HASH"
        );
        assert_eq!(
            Chain::Keeta.explorer_address_url("https://explorer.keeta.com", "keeta_x"),
            "https://explorer.keeta.com/account/keeta_x"
        );
    }
}
