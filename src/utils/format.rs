use alloy::primitives::utils::{format_units, parse_units, ParseUnits};
use alloy::primitives::{Address, U256};
use eyre::{bail, Result};

use super::constants::TOKEN_DECIMALS;

/// Shortens an address to `0x1234...abcd` (checksummed) for display.
#[must_use]
pub fn shorten_address(address: &Address) -> String {
    let checksummed = address.to_checksum(None);
    format!(
        "{}...{}",
        &checksummed[..6],
        &checksummed[checksummed.len() - 4..]
    )
}

/// Formats a raw amount with 18 decimals, trimming trailing zeros.
///
/// `1500000000000000000` becomes `1.5`, zero becomes `0.0`.
#[must_use]
pub fn format_amount(amount: U256) -> String {
    let Ok(formatted) = format_units(amount, TOKEN_DECIMALS) else {
        return amount.to_string();
    };
    match formatted.split_once('.') {
        Some((whole, fraction)) => {
            let fraction = fraction.trim_end_matches('0');
            if fraction.is_empty() {
                format!("{whole}.0")
            } else {
                format!("{whole}.{fraction}")
            }
        }
        None => formatted,
    }
}

/// Parses a decimal token amount with 18 decimals, e.g. `1.5`.
///
/// # Errors
/// * If the text is not a decimal number
/// * If it has more than 18 fractional digits
/// * If the amount is negative
pub fn parse_amount(text: &str) -> Result<U256> {
    let text = text.trim();
    if let Some((_, fraction)) = text.split_once('.') {
        if fraction.len() > usize::from(TOKEN_DECIMALS) {
            bail!("Amount {text:?} has more than {TOKEN_DECIMALS} decimals");
        }
    }
    match parse_units(text, TOKEN_DECIMALS)? {
        ParseUnits::U256(amount) => Ok(amount),
        ParseUnits::I256(_) => bail!("Amount must not be negative"),
    }
}
