//! Conversion of raw Blockscout records into canonical ledger entries.

use crate::types::{RawTokenTransfer, RawTransaction};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tax_core::{units, EntryKind, LedgerEntry, LedgerError};
use tracing::warn;

/// Default decimals when a token transfer carries no parsable
/// `tokenDecimal`
const DEFAULT_TOKEN_DECIMALS: u32 = 18;

/// Length of `0x` plus a 4-byte method selector. Input data beyond
/// this means the transaction called into a contract.
const METHOD_ID_LEN: usize = 10;

/// Converts raw explorer records for one wallet into [`LedgerEntry`]s
pub struct EntryConverter {
    wallet_address: String,
    native_symbol: String,
}

impl EntryConverter {
    pub fn new(wallet_address: &str, native_symbol: &str) -> Self {
        Self {
            wallet_address: wallet_address.to_lowercase(),
            native_symbol: native_symbol.to_string(),
        }
    }

    /// Convert native transactions. Zero-value transactions with no
    /// input data are noise and are dropped; records that fail to
    /// parse are skipped with a warning rather than failing the batch.
    pub fn convert_transactions(&self, txs: &[RawTransaction]) -> Vec<LedgerEntry> {
        txs.iter()
            .filter(|tx| tx.value != "0" || tx.input != "0x")
            .filter_map(|tx| match self.convert_transaction(tx) {
                Ok(entry) => Some(entry),
                Err(e) => {
                    warn!("Skipping transaction {}: {}", tx.hash, e);
                    None
                }
            })
            .collect()
    }

    pub fn convert_transaction(&self, tx: &RawTransaction) -> tax_core::Result<LedgerEntry> {
        let kind = self.classify_transaction(tx);
        let timestamp = parse_timestamp(&tx.time_stamp)?;

        let raw_amount = units::wei_to_eth(&tx.value)?;
        let amount = if kind.is_incoming() { raw_amount } else { -raw_amount };

        // Gas is only paid by the sender
        let fee = if tx.from.to_lowercase() == self.wallet_address {
            units::gas_fee_eth(&tx.gas_used, &tx.gas_price)?
        } else {
            Decimal::ZERO
        };

        Ok(LedgerEntry {
            timestamp,
            asset: self.native_symbol.clone(),
            amount,
            fee,
            payment_token: self.native_symbol.clone(),
            id: short_prefix(&tx.hash, 10).to_string(),
            notes: self.notes(kind, &tx.from, &tx.to),
            kind,
            tx_hash: tx.hash.clone(),
        })
    }

    pub fn convert_token_transfers(&self, transfers: &[RawTokenTransfer]) -> Vec<LedgerEntry> {
        transfers
            .iter()
            .filter_map(|tx| match self.convert_token_transfer(tx) {
                Ok(entry) => Some(entry),
                Err(e) => {
                    warn!("Skipping token transfer {}: {}", tx.hash, e);
                    None
                }
            })
            .collect()
    }

    pub fn convert_token_transfer(&self, tx: &RawTokenTransfer) -> tax_core::Result<LedgerEntry> {
        let kind = self.classify_token_transfer(tx);
        let timestamp = parse_timestamp(&tx.time_stamp)?;

        let decimals = tx
            .token_decimal
            .trim()
            .parse::<u32>()
            .unwrap_or(DEFAULT_TOKEN_DECIMALS);
        let raw_amount = units::format_units(&tx.value, decimals)?;
        let amount = if kind.is_incoming() { raw_amount } else { -raw_amount };

        let fee = if tx.from.to_lowercase() == self.wallet_address {
            units::gas_fee_eth(&tx.gas_used, &tx.gas_price)?
        } else {
            Decimal::ZERO
        };

        let asset = if tx.token_symbol.trim().is_empty() {
            "UNKNOWN".to_string()
        } else {
            tx.token_symbol.clone()
        };

        Ok(LedgerEntry {
            timestamp,
            asset,
            amount,
            fee,
            payment_token: self.native_symbol.clone(),
            id: short_prefix(&tx.hash, 10).to_string(),
            notes: self.notes(kind, &tx.from, &tx.to),
            kind,
            tx_hash: tx.hash.clone(),
        })
    }

    fn classify_transaction(&self, tx: &RawTransaction) -> EntryKind {
        let from = tx.from.to_lowercase();
        let to = tx.to.to_lowercase();

        // Input beyond the method selector means a contract call
        if !tx.input.is_empty()
            && tx.input != "0x"
            && tx.input.len() > METHOD_ID_LEN
            && from == self.wallet_address
        {
            return EntryKind::ContractInteraction;
        }

        if from == self.wallet_address {
            EntryKind::TransferOut
        } else if !to.is_empty() && to == self.wallet_address {
            EntryKind::TransferIn
        } else {
            EntryKind::Unknown
        }
    }

    fn classify_token_transfer(&self, tx: &RawTokenTransfer) -> EntryKind {
        let from = tx.from.to_lowercase();
        let to = tx.to.to_lowercase();

        if from == self.wallet_address {
            EntryKind::TokenOut
        } else if !to.is_empty() && to == self.wallet_address {
            EntryKind::TokenIn
        } else {
            EntryKind::Unknown
        }
    }

    fn notes(&self, kind: EntryKind, from: &str, to: &str) -> String {
        match kind {
            EntryKind::TransferIn => format!("Received from {}...", short_prefix(from, 10)),
            EntryKind::TransferOut => format!("Sent to {}...", short_prefix(to, 10)),
            EntryKind::TokenIn => format!("Token received from {}...", short_prefix(from, 10)),
            EntryKind::TokenOut => format!("Token sent to {}...", short_prefix(to, 10)),
            EntryKind::ContractInteraction => {
                format!("Contract interaction with {}...", short_prefix(to, 10))
            }
            EntryKind::Unknown => String::new(),
        }
    }
}

fn parse_timestamp(raw: &str) -> tax_core::Result<DateTime<Utc>> {
    let secs: i64 = raw
        .trim()
        .parse()
        .map_err(|_| LedgerError::InvalidTimestamp(raw.to_string()))?;
    DateTime::from_timestamp(secs, 0).ok_or_else(|| LedgerError::InvalidTimestamp(raw.to_string()))
}

fn short_prefix(s: &str, n: usize) -> &str {
    s.get(..n).unwrap_or(s)
}
