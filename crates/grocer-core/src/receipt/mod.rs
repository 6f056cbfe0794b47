//! Receipt line extraction.

mod parser;
mod pipeline;
pub mod rules;

pub use parser::{ParseReport, ReceiptParser};
pub use pipeline::{ReceiptPipeline, Scan, ScanOutcome};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::models::receipt::LineItem;
use crate::ocr::OcrInput;

/// How item names and prices are laid out in the OCR text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParseStrategy {
    /// Name on one line, `$price` on the next.
    #[default]
    Split,
    /// Name and price on one line, price last.
    Inline,
    /// Last whitespace token is the price.
    Whitespace,
    /// Split, then inline, then whitespace; the first with any items wins.
    Auto,
}

impl ParseStrategy {
    /// Concrete strategies tried by [`ParseStrategy::Auto`], in order.
    pub const FALLBACK_ORDER: [ParseStrategy; 3] = [
        ParseStrategy::Split,
        ParseStrategy::Inline,
        ParseStrategy::Whitespace,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ParseStrategy::Split => "split",
            ParseStrategy::Inline => "inline",
            ParseStrategy::Whitespace => "whitespace",
            ParseStrategy::Auto => "auto",
        }
    }
}

impl fmt::Display for ParseStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ParseStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "split" | "a" => Ok(ParseStrategy::Split),
            "inline" | "b" => Ok(ParseStrategy::Inline),
            "whitespace" | "c" => Ok(ParseStrategy::Whitespace),
            "auto" => Ok(ParseStrategy::Auto),
            other => Err(format!("unknown parse strategy: {}", other)),
        }
    }
}

/// Parse OCR output into line items with the default exclusion keywords.
///
/// Malformed lines are skipped; an empty vector means nothing was found.
pub fn parse(input: impl Into<OcrInput>, strategy: ParseStrategy) -> Vec<LineItem> {
    ReceiptParser::new().with_strategy(strategy).parse(input)
}
