//! Price parsing for receipt amounts.
//!
//! Amounts are fixed-point dollars with exactly two fractional digits. Negative
//! values and thousands separators are rejected unless stripped beforehand.

use rust_decimal::Decimal;
use std::str::FromStr;

use super::patterns::PRICE_AMOUNT;
use crate::error::ExtractionError;

/// Parse a strict amount such as `"2.99"` or `"$2.99"`.
pub fn parse_price(s: &str) -> Result<Decimal, ExtractionError> {
    let invalid = || ExtractionError::InvalidPrice {
        value: s.to_string(),
    };

    let caps = PRICE_AMOUNT.captures(s.trim()).ok_or_else(invalid)?;
    Decimal::from_str(&caps[1]).map_err(|_| invalid())
}

/// Parse a token from irregular OCR output.
///
/// One leading dollar sign and any thousands-separator commas are stripped
/// before the strict parse.
pub fn parse_loose_price(token: &str) -> Option<Decimal> {
    let token = token.trim();
    let token = token.strip_prefix('$').unwrap_or(token);
    let cleaned = token.replace(',', "");
    if cleaned.starts_with('$') {
        return None;
    }

    parse_price(&cleaned).ok()
}

/// Format an amount as dollars, e.g. `$1234.50`.
pub fn format_price(amount: Decimal) -> String {
    format!("${:.2}", amount)
}
