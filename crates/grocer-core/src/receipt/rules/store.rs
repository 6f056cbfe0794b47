//! Store name guessing from the receipt header.

use super::patterns::PRICE_ANYWHERE;
use crate::ocr::RawLine;

/// Guess the store from the first non-blank OCR line.
///
/// Receipts print the store name at the top. A first line that already
/// carries an amount is an item, not a header, and yields no guess.
pub fn guess_store(lines: &[RawLine]) -> Option<String> {
    let first = lines.iter().find(|line| !line.is_blank())?;
    let text = first.trimmed();

    if PRICE_ANYWHERE.is_match(text) {
        return None;
    }

    Some(text.split_whitespace().collect::<Vec<_>>().join(" "))
}
