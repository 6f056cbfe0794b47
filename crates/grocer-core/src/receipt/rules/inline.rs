//! Inline layout: the item name and its price on the same line.

use rust_decimal::Decimal;
use std::str::FromStr;

use super::patterns::INLINE_ITEM;
use super::LayoutExtractor;
use crate::models::receipt::LineItem;
use crate::ocr::RawLine;

/// Extractor for lines shaped like `Organic Bananas $2.99`.
///
/// The amount must end the line; the dollar sign is optional. Lines without
/// a trailing amount are skipped, so misses are preferred over false items.
#[derive(Debug, Clone, Copy, Default)]
pub struct InlineExtractor;

impl InlineExtractor {
    pub fn new() -> Self {
        Self
    }

    pub fn extract_line(&self, line: &RawLine) -> Option<LineItem> {
        let caps = INLINE_ITEM.captures(line.trimmed())?;
        let name = caps[1].trim();
        let price = Decimal::from_str(&caps[2]).ok()?;

        Some(LineItem::new(name, price).with_source_line(line.index))
    }
}

impl LayoutExtractor for InlineExtractor {
    fn name(&self) -> &'static str {
        "inline"
    }

    fn extract_all(&self, lines: &[RawLine]) -> Vec<LineItem> {
        lines.iter().filter_map(|line| self.extract_line(line)).collect()
    }
}
