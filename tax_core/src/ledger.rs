//! Merge, ordering, and de-duplication of canonical ledger entries.

use crate::LedgerEntry;
use rust_decimal::Decimal;
use std::collections::HashSet;
use tracing::debug;

/// Merge native and token entries into one ledger: newest first, at
/// most one entry per `(tx hash, asset)` pair.
///
/// A token transfer shares its transaction hash with the native
/// transaction that carried it, so the dedup key includes the asset —
/// the ETH leg and the token leg of the same transaction both survive.
pub fn merge_entries(native: Vec<LedgerEntry>, token: Vec<LedgerEntry>) -> Vec<LedgerEntry> {
    let mut all = native;
    all.extend(token);
    sort_entries(&mut all);
    dedup_entries(all)
}

/// Sort newest first. Equal timestamps fall back to the tx hash so the
/// output is deterministic regardless of fetch interleaving.
pub fn sort_entries(entries: &mut [LedgerEntry]) {
    entries.sort_by(|a, b| {
        b.timestamp
            .cmp(&a.timestamp)
            .then_with(|| a.tx_hash.cmp(&b.tx_hash))
    });
}

fn dedup_entries(entries: Vec<LedgerEntry>) -> Vec<LedgerEntry> {
    let before = entries.len();
    let mut seen = HashSet::new();

    let kept: Vec<LedgerEntry> = entries
        .into_iter()
        .filter(|e| seen.insert((e.tx_hash.clone(), e.asset.clone())))
        .collect();

    if kept.len() < before {
        debug!("Removed {} duplicate ledger entries", before - kept.len());
    }
    kept
}

/// Aggregate stats over an exported ledger
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerSummary {
    pub entries: usize,
    pub incoming: usize,
    pub outgoing: usize,
    /// Distinct UTC days with at least one entry
    pub active_days: usize,
    /// Sum of |amount| over entries in the native asset
    pub native_volume: Decimal,
    /// Sum of fees across all entries
    pub total_fees: Decimal,
}

pub fn summarize(entries: &[LedgerEntry], native_symbol: &str) -> LedgerSummary {
    let incoming = entries.iter().filter(|e| e.is_incoming()).count();

    let active_days = entries
        .iter()
        .map(|e| e.date())
        .collect::<HashSet<_>>()
        .len();

    let native_volume = entries
        .iter()
        .filter(|e| e.asset == native_symbol)
        .map(|e| e.amount.abs())
        .sum();

    let total_fees = entries.iter().map(|e| e.fee).sum();

    LedgerSummary {
        entries: entries.len(),
        incoming,
        outgoing: entries.len() - incoming,
        active_days,
        native_volume,
        total_fees,
    }
}

/// Case-insensitive substring match over asset, tag, hash, and notes
pub fn matches_filter(entry: &LedgerEntry, query: &str) -> bool {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return true;
    }

    entry.asset.to_lowercase().contains(&query)
        || entry.tag().contains(&query)
        || entry.tx_hash.to_lowercase().contains(&query)
        || entry.notes.to_lowercase().contains(&query)
}
