//! Split layout: the item name on one line, its price on the next.

use rust_decimal::Decimal;
use std::str::FromStr;

use super::patterns::SPLIT_PRICE;
use super::LayoutExtractor;
use crate::models::receipt::LineItem;
use crate::ocr::RawLine;

/// Extractor for receipts where each price sits below its item name.
///
/// A non-blank line followed by a line starting with `$d.dd` forms a pair
/// and both lines are consumed; anything else advances one line.
#[derive(Debug, Clone, Copy, Default)]
pub struct SplitExtractor;

impl SplitExtractor {
    pub fn new() -> Self {
        Self
    }

    fn price_of(line: &RawLine) -> Option<Decimal> {
        SPLIT_PRICE
            .captures(line.trimmed())
            .and_then(|caps| Decimal::from_str(&caps[1]).ok())
    }
}

impl LayoutExtractor for SplitExtractor {
    fn name(&self) -> &'static str {
        "split"
    }

    fn extract_all(&self, lines: &[RawLine]) -> Vec<LineItem> {
        let mut items = Vec::new();
        let mut i = 0;

        while i < lines.len() {
            let line = &lines[i];
            let price = lines.get(i + 1).and_then(Self::price_of);

            match price {
                Some(price) if !line.is_blank() => {
                    items.push(LineItem::new(line.trimmed(), price).with_source_line(line.index));
                    i += 2;
                }
                _ => i += 1,
            }
        }

        items
    }
}
