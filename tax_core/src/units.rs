//! Fixed-point unit conversion for raw on-chain amounts.
//!
//! Explorer APIs return amounts as base-unit integer strings (wei for
//! ETH, scaled integers for ERC-20 tokens) or hex strings (Keeta). All
//! arithmetic here is integer arithmetic on `u128`; the final value is
//! built as a decimal string and parsed into a `Decimal`, so no float
//! precision is lost.

use crate::{LedgerError, Result};
use rust_decimal::Decimal;
use std::str::FromStr;

/// Decimals used by ETH and by Keeta amounts on the wire
pub const NATIVE_DECIMALS: u32 = 18;

/// Fractional digits kept in exported amounts
pub const MAX_DISPLAY_DECIMALS: usize = 8;

/// Convert a base-unit integer string into a whole-token `Decimal`,
/// truncated to at most [`MAX_DISPLAY_DECIMALS`] fractional digits.
/// Tokens with fewer decimals keep their natural precision.
pub fn format_units(raw: &str, decimals: u32) -> Result<Decimal> {
    let value: u128 = raw
        .trim()
        .parse()
        .map_err(|_| LedgerError::InvalidAmount(raw.to_string()))?;
    scale_units(value, decimals, MAX_DISPLAY_DECIMALS)
}

/// Wei string to ETH, always 8 fractional digits
pub fn wei_to_eth(wei: &str) -> Result<Decimal> {
    format_units(wei, NATIVE_DECIMALS)
}

/// Gas fee in ETH: `gas_used * gas_price` wei, checked
pub fn gas_fee_eth(gas_used: &str, gas_price: &str) -> Result<Decimal> {
    let used: u128 = gas_used
        .trim()
        .parse()
        .map_err(|_| LedgerError::InvalidAmount(gas_used.to_string()))?;
    let price: u128 = gas_price
        .trim()
        .parse()
        .map_err(|_| LedgerError::InvalidAmount(gas_price.to_string()))?;

    let fee = used
        .checked_mul(price)
        .ok_or_else(|| LedgerError::OutOfRange(format!("{} * {}", gas_used, gas_price)))?;

    scale_units(fee, NATIVE_DECIMALS, MAX_DISPLAY_DECIMALS)
}

/// Hex amount (with or without `0x`) to an 18-decimal `Decimal`,
/// keeping the full 18 fractional digits. Used for Keeta operation
/// amounts and RPC balance results.
pub fn hex_to_amount(hex: &str) -> Result<Decimal> {
    let trimmed = hex.trim();
    if trimmed.is_empty() || trimmed == "0" || trimmed == "0x0" {
        return Ok(Decimal::ZERO);
    }

    let digits = trimmed.strip_prefix("0x").unwrap_or(trimmed);
    let value = u128::from_str_radix(digits, 16)
        .map_err(|_| LedgerError::InvalidAmount(hex.to_string()))?;

    scale_units(value, NATIVE_DECIMALS, NATIVE_DECIMALS as usize)
}

/// Scale an integer base-unit value by `10^decimals`, keeping at most
/// `keep` fractional digits (truncated, not rounded).
fn scale_units(value: u128, decimals: u32, keep: usize) -> Result<Decimal> {
    let divisor = 10u128
        .checked_pow(decimals)
        .ok_or_else(|| LedgerError::OutOfRange(format!("10^{} exceeds u128", decimals)))?;

    let whole = value / divisor;
    let frac = value % divisor;

    let text = if decimals == 0 {
        whole.to_string()
    } else {
        let frac_digits = format!("{:0>width$}", frac, width = decimals as usize);
        let kept = &frac_digits[..frac_digits.len().min(keep)];
        format!("{}.{}", whole, kept)
    };

    Decimal::from_str(&text).map_err(|_| LedgerError::OutOfRange(text))
}
