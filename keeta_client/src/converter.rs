//! Conversion of Keeta block operations into canonical ledger entries.

use crate::types::{Block, OP_SEND};
use rust_decimal::Decimal;
use tax_core::{units, EntryKind, LedgerEntry};

/// Native symbol used for all Keeta entries
pub const NATIVE_SYMBOL: &str = "KEETA";

/// Converts settled block operations for one account into
/// [`LedgerEntry`]s
pub struct OperationConverter {
    account: String,
}

impl OperationConverter {
    pub fn new(account: &str) -> Self {
        Self {
            account: account.to_lowercase(),
        }
    }

    /// Extract ledger entries from one block. Only send operations
    /// (type 0) carrying an amount produce entries; the block account
    /// is the sender, `op.to` the recipient.
    pub fn convert_block(&self, block: &Block) -> tax_core::Result<Vec<LedgerEntry>> {
        let mut entries = Vec::new();

        for op in &block.operations {
            if op.op_type != OP_SEND {
                continue;
            }
            let Some(raw) = op.amount.as_deref() else {
                continue;
            };

            let amount = units::hex_to_amount(raw)?;
            let to = op.to.clone().unwrap_or_default();
            let incoming = to.to_lowercase() == self.account;

            let (kind, signed, notes) = if incoming {
                (
                    EntryKind::TransferIn,
                    amount,
                    format!("Received from {}", shorten_address(&block.account)),
                )
            } else {
                (
                    EntryKind::TransferOut,
                    -amount,
                    format!("Sent to {}", shorten_address(&to)),
                )
            };

            entries.push(LedgerEntry {
                timestamp: block.date,
                asset: NATIVE_SYMBOL.to_string(),
                amount: signed,
                // Keeta has no user-visible fees
                fee: Decimal::ZERO,
                payment_token: NATIVE_SYMBOL.to_string(),
                id: block.hash.chars().take(10).collect(),
                notes,
                kind,
                tx_hash: block.hash.clone(),
            });
        }

        Ok(entries)
    }
}

/// `keeta_aabd2mkz…` style addresses are long; show the first 12 and
/// last 6 characters. Counts characters, not bytes, so arbitrary
/// node-supplied strings cannot split a multi-byte sequence.
pub fn shorten_address(address: &str) -> String {
    let count = address.chars().count();
    if count <= 20 {
        return address.to_string();
    }
    let head: String = address.chars().take(12).collect();
    let tail: String = address.chars().skip(count - 6).collect();
    format!("{}...{}", head, tail)
}
