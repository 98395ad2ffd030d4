pub mod chain;
pub mod export;
pub mod ledger;
pub mod units;

pub use chain::Chain;
pub use export::{export_filename, to_csv_string, AWAKEN_CSV_HEADERS};
pub use ledger::{matches_filter, merge_entries, summarize, LedgerSummary};

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Amount out of range: {0}")]
    OutOfRange(String),
    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),
    #[error("Invalid wallet address: {0}")]
    InvalidAddress(String),
    #[error("Unsupported chain: {0}")]
    UnsupportedChain(String),
    #[error("CSV encoding error: {0}")]
    Csv(String),
}

pub type Result<T> = std::result::Result<T, LedgerError>;

/// Canonical tax-report row in the Awaken format.
///
/// Every chain-specific record is normalized into one of these before
/// export. The amount is signed: positive for funds received by the
/// queried wallet, negative for funds leaving it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LedgerEntry {
    /// When the transaction was confirmed
    pub timestamp: DateTime<Utc>,

    /// Asset symbol (ETH, KEETA, token ticker, or UNKNOWN)
    pub asset: String,

    /// Signed amount in whole-token units
    pub amount: Decimal,

    /// Gas/network fee in the chain's native token; zero unless the
    /// queried wallet was the sender
    pub fee: Decimal,

    /// Token the fee was paid in (the chain's native symbol)
    pub payment_token: String,

    /// Short identifier shown in tax software (first 10 chars of the hash)
    pub id: String,

    /// Human-readable description of the transfer
    pub notes: String,

    /// Classification of the entry
    pub kind: EntryKind,

    /// Full transaction hash
    pub tx_hash: String,
}

/// Classification of a ledger entry, derived from the direction of the
/// transfer relative to the queried wallet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    TransferIn,
    TransferOut,
    TokenIn,
    TokenOut,
    ContractInteraction,
    Unknown,
}

impl EntryKind {
    /// Awaken `Tag` column value for this kind
    pub fn tag(&self) -> &'static str {
        match self {
            EntryKind::TransferIn | EntryKind::TokenIn => "deposit",
            EntryKind::TransferOut | EntryKind::TokenOut => "withdrawal",
            EntryKind::ContractInteraction => "contract",
            EntryKind::Unknown => "other",
        }
    }

    pub fn is_incoming(&self) -> bool {
        matches!(self, EntryKind::TransferIn | EntryKind::TokenIn)
    }
}

impl LedgerEntry {
    pub fn tag(&self) -> &'static str {
        self.kind.tag()
    }

    pub fn is_incoming(&self) -> bool {
        self.kind.is_incoming()
    }

    /// Date column value, `YYYY-MM-DD` in UTC
    pub fn date(&self) -> String {
        self.timestamp.format("%Y-%m-%d").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn entry(kind: EntryKind) -> LedgerEntry {
        LedgerEntry {
            timestamp: DateTime::from_timestamp(1_700_000_000, 0).unwrap(),
            asset: "ETH".to_string(),
            amount: Decimal::from_str("1.50000000").unwrap(),
            fee: Decimal::ZERO,
            payment_token: "ETH".to_string(),
            id: "0x12345678".to_string(),
            notes: String::new(),
            kind,
            tx_hash: "0x1234567890abcdef".to_string(),
        }
    }

    #[test]
    fn tag_mapping_matches_awaken_vocabulary() {
        assert_eq!(EntryKind::TransferIn.tag(), "deposit");
        assert_eq!(EntryKind::TokenIn.tag(), "deposit");
        assert_eq!(EntryKind::TransferOut.tag(), "withdrawal");
        assert_eq!(EntryKind::TokenOut.tag(), "withdrawal");
        assert_eq!(EntryKind::ContractInteraction.tag(), "contract");
        assert_eq!(EntryKind::Unknown.tag(), "other");
    }

    #[test]
    fn only_inbound_kinds_are_incoming() {
        assert!(EntryKind::TransferIn.is_incoming());
        assert!(EntryKind::TokenIn.is_incoming());
        assert!(!EntryKind::TransferOut.is_incoming());
        assert!(!EntryKind::ContractInteraction.is_incoming());
        assert!(!EntryKind::Unknown.is_incoming());
    }

    #[test]
    fn date_renders_utc_day() {
        let e = entry(EntryKind::TransferIn);
        assert_eq!(e.date(), "2023-11-14");
    }
}
