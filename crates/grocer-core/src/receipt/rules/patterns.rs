//! Common regex patterns for receipt line extraction.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Split layout: the price line starts with a dollar amount not followed by another digit
    pub static ref SPLIT_PRICE: Regex = Regex::new(
        r"^\$([0-9]+\.[0-9]{2})(?:[^0-9]|$)"
    ).unwrap();

    // Line breaks: \r\n, bare \r or \n, and the vertical tab, form feed,
    // separator and NEL / LS / PS breaks
    pub static ref LINE_BREAK: Regex = Regex::new(
        r"\r\n|[\n\r\x0b\x0c\x1c\x1d\x1e\x{85}\x{2028}\x{2029}]"
    ).unwrap();

    // Inline layout: name, whitespace, optional dollar sign, amount at end of line
    pub static ref INLINE_ITEM: Regex = Regex::new(
        r"^(.*\S)\s+\$?([0-9]+\.[0-9]{2})$"
    ).unwrap();

    // A bare amount with exactly two fractional digits
    pub static ref PRICE_AMOUNT: Regex = Regex::new(
        r"^\$?([0-9]+\.[0-9]{2})$"
    ).unwrap();

    // Any amount on a line
    pub static ref PRICE_ANYWHERE: Regex = Regex::new(
        r"\$?[0-9]+\.[0-9]{2}\b"
    ).unwrap();
}
