//! Whitespace-tokenized fallback for irregular currency formatting.

use super::price::parse_loose_price;
use super::LayoutExtractor;
use crate::models::receipt::LineItem;
use crate::ocr::RawLine;

/// Extractor that reads the last whitespace token of a line as the price.
#[derive(Debug, Clone, Copy, Default)]
pub struct WhitespaceExtractor;

impl WhitespaceExtractor {
    pub fn new() -> Self {
        Self
    }

    pub fn extract_line(&self, line: &RawLine) -> Option<LineItem> {
        let tokens: Vec<&str> = line.text.split_whitespace().collect();
        let (last, rest) = tokens.split_last()?;
        if rest.is_empty() {
            return None;
        }

        let price = parse_loose_price(last)?;
        Some(LineItem::new(rest.join(" "), price).with_source_line(line.index))
    }
}

impl LayoutExtractor for WhitespaceExtractor {
    fn name(&self) -> &'static str {
        "whitespace"
    }

    fn extract_all(&self, lines: &[RawLine]) -> Vec<LineItem> {
        lines.iter().filter_map(|line| self.extract_line(line)).collect()
    }
}
