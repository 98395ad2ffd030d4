//! CSV encoding of ledger entries in the Awaken Tax column layout.

use crate::{Chain, LedgerEntry, LedgerError, Result};
use chrono::Utc;
use csv::Writer;
use std::io::Cursor;

/// Awaken CSV column headers in exact order
pub const AWAKEN_CSV_HEADERS: [&str; 10] = [
    "Date",
    "Asset",
    "Amount",
    "Fee",
    "P&L",
    "Payment Token",
    "ID",
    "Notes",
    "Tag",
    "Transaction Hash",
];

/// Encode entries as a complete CSV document (header + one row per
/// entry). Quoting and escaping follow RFC 4180 via the `csv` crate.
pub fn to_csv_string(entries: &[LedgerEntry]) -> Result<String> {
    let mut wtr = Writer::from_writer(Cursor::new(Vec::new()));

    wtr.write_record(AWAKEN_CSV_HEADERS)
        .map_err(|e| LedgerError::Csv(e.to_string()))?;

    for entry in entries {
        wtr.write_record(&[
            entry.date(),
            entry.asset.clone(),
            entry.amount.to_string(),
            entry.fee.to_string(),
            // P&L is not calculated for basic transactions
            String::new(),
            entry.payment_token.clone(),
            entry.id.clone(),
            entry.notes.clone(),
            entry.tag().to_string(),
            entry.tx_hash.clone(),
        ])
        .map_err(|e| LedgerError::Csv(e.to_string()))?;
    }

    let data = wtr
        .into_inner()
        .map_err(|e| LedgerError::Csv(e.to_string()))?
        .into_inner();

    String::from_utf8(data).map_err(|e| LedgerError::Csv(e.to_string()))
}

/// Default export filename: `{chain}-transactions-{YYYY-MM-DD}.csv`
pub fn export_filename(chain: Chain) -> String {
    format!(
        "{}-transactions-{}.csv",
        chain.as_str(),
        Utc::now().format("%Y-%m-%d")
    )
}
