//! End-to-end receipt scanning: OCR text in, ledger records out.

use std::time::Instant;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{info, warn};

use crate::category::Taxonomy;
use crate::error::{ExtractionError, Result};
use crate::ledger::assemble_records;
use crate::models::config::GrocerConfig;
use crate::models::receipt::{CategorizedItem, ReceiptRecord};
use crate::ocr::OcrInput;

use super::rules::guess_store;
use super::{ParseStrategy, ReceiptParser};

/// Records produced from one receipt.
#[derive(Debug, Clone, Serialize)]
pub struct Scan {
    /// Store name stamped on every record.
    pub store: String,
    /// Strategy that produced the items.
    pub strategy: ParseStrategy,
    /// Ledger records awaiting review.
    pub records: Vec<ReceiptRecord>,
    /// Number of OCR lines read.
    pub lines: usize,
    /// Candidates dropped by exclusion keywords.
    pub excluded: usize,
    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

impl Scan {
    pub fn into_records(self) -> Vec<ReceiptRecord> {
        self.records
    }

    /// Sum of all record prices, or `None` if it overflows `Decimal`.
    pub fn total(&self) -> Option<Decimal> {
        self.records
            .iter()
            .try_fold(Decimal::ZERO, |sum, record| sum.checked_add(record.price))
    }
}

/// Result of scanning a receipt that had readable text.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ScanOutcome {
    /// At least one item was found.
    Items(Scan),
    /// The text was readable but held no purchase lines.
    NoItemsDetected {
        /// Number of OCR lines read.
        lines: usize,
    },
}

impl ScanOutcome {
    pub fn scan(&self) -> Option<&Scan> {
        match self {
            ScanOutcome::Items(scan) => Some(scan),
            ScanOutcome::NoItemsDetected { .. } => None,
        }
    }

    pub fn into_scan(self) -> Option<Scan> {
        match self {
            ScanOutcome::Items(scan) => Some(scan),
            ScanOutcome::NoItemsDetected { .. } => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, ScanOutcome::NoItemsDetected { .. })
    }
}

/// Parser, taxonomy and store handling wired together.
#[derive(Debug, Clone)]
pub struct ReceiptPipeline {
    parser: ReceiptParser,
    taxonomy: Taxonomy,
    default_store: String,
    guess_store: bool,
}

impl ReceiptPipeline {
    pub fn new(parser: ReceiptParser, taxonomy: Taxonomy) -> Self {
        Self {
            parser,
            taxonomy,
            default_store: "Unknown".to_string(),
            guess_store: true,
        }
    }

    pub fn from_config(config: &GrocerConfig) -> Self {
        Self {
            parser: ReceiptParser::from_config(&config.parser),
            taxonomy: config.taxonomy.clone(),
            default_store: config.ledger.default_store.clone(),
            guess_store: config.ledger.guess_store,
        }
    }

    /// Store name used when none is supplied or guessed.
    pub fn with_default_store(mut self, store: impl Into<String>) -> Self {
        self.default_store = store.into();
        self
    }

    /// Enable or disable guessing the store from the first OCR line.
    pub fn with_store_guessing(mut self, enabled: bool) -> Self {
        self.guess_store = enabled;
        self
    }

    pub fn parser(&self) -> &ReceiptParser {
        &self.parser
    }

    pub fn taxonomy(&self) -> &Taxonomy {
        &self.taxonomy
    }

    /// Scan one receipt.
    ///
    /// An explicit non-blank `store` wins over a guess. Fails only when the
    /// input has no visible text at all.
    pub fn scan(
        &self,
        input: impl Into<OcrInput>,
        store: Option<&str>,
        date: NaiveDate,
    ) -> Result<ScanOutcome> {
        let start = Instant::now();
        let input = input.into();

        if input.is_blank() {
            return Err(ExtractionError::NoText.into());
        }

        let lines = input.into_lines();
        let report = self.parser.parse_lines(&lines);

        if report.is_empty() {
            warn!("No items detected in {} OCR lines", lines.len());
            return Ok(ScanOutcome::NoItemsDetected { lines: lines.len() });
        }

        let store = store
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .or_else(|| self.guess_store.then(|| guess_store(&lines)).flatten())
            .unwrap_or_else(|| self.default_store.clone());

        let items: Vec<CategorizedItem> = report
            .items
            .into_iter()
            .map(|item| CategorizedItem::new(item, &self.taxonomy))
            .collect();
        let records = assemble_records(date, &store, &items);

        info!(
            "Scanned {} items from {} at {} ({} excluded)",
            records.len(),
            store,
            date,
            report.excluded
        );

        Ok(ScanOutcome::Items(Scan {
            store,
            strategy: report.strategy,
            records,
            lines: lines.len(),
            excluded: report.excluded,
            processing_time_ms: start.elapsed().as_millis() as u64,
        }))
    }
}

impl Default for ReceiptPipeline {
    fn default() -> Self {
        Self::new(ReceiptParser::new(), Taxonomy::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GrocerError;
    use crate::models::receipt::LineItem;
    use pretty_assertions::assert_eq;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 4).unwrap()
    }

    const RECEIPT: &str = "FRESH MART\nOrganic Bananas\n$2.99\nWhole Milk\n$4.50\nSales Tax\n$0.60\nTOTAL\n$8.09\n";

    #[test]
    fn test_scan_builds_records() {
        let outcome = ReceiptPipeline::default().scan(RECEIPT, None, date()).unwrap();
        let scan = outcome.into_scan().unwrap();

        assert_eq!(scan.store, "FRESH MART");
        assert_eq!(scan.strategy, ParseStrategy::Split);
        assert_eq!(scan.excluded, 2);

        let rows: Vec<_> = scan.records.iter().map(|r| r.to_row()).collect();
        assert_eq!(
            rows[0].values(),
            ["2024-03-04", "Monday", "FRESH MART", "Organic Bananas", "2.99", "Produce"]
        );
        assert_eq!(
            rows[1].values(),
            ["2024-03-04", "Monday", "FRESH MART", "Whole Milk", "4.50", "Dairy"]
        );
    }

    #[test]
    fn test_explicit_store_wins() {
        let outcome = ReceiptPipeline::default()
            .scan(RECEIPT, Some("  Corner Shop "), date())
            .unwrap();
        assert_eq!(outcome.scan().unwrap().store, "Corner Shop");
    }

    #[test]
    fn test_default_store_without_guessing() {
        let pipeline = ReceiptPipeline::default()
            .with_store_guessing(false)
            .with_default_store("Costco");
        let outcome = pipeline.scan(RECEIPT, Some("   "), date()).unwrap();
        assert_eq!(outcome.scan().unwrap().store, "Costco");
    }

    #[test]
    fn test_default_store_when_first_line_is_item() {
        let pipeline = ReceiptPipeline::new(
            ReceiptParser::new().with_strategy(ParseStrategy::Inline),
            Taxonomy::default(),
        );
        let outcome = pipeline.scan("Eggs 5.00", None, date()).unwrap();
        assert_eq!(outcome.scan().unwrap().store, "Unknown");
    }

    #[test]
    fn test_no_items_detected_is_not_error() {
        let outcome = ReceiptPipeline::default()
            .scan(["Thank you", "Have a nice day"], None, date())
            .unwrap();

        assert!(outcome.is_empty());
        assert!(matches!(outcome, ScanOutcome::NoItemsDetected { lines: 2 }));
    }

    #[test]
    fn test_blank_input_is_error() {
        let err = ReceiptPipeline::default().scan(" \n\n ", None, date()).unwrap_err();
        assert!(matches!(err, GrocerError::Extraction(ExtractionError::NoText)));
    }

    #[test]
    fn test_from_config() {
        let mut config = GrocerConfig::default();
        config.parser.strategy = ParseStrategy::Auto;
        config.ledger.guess_store = false;
        config.ledger.default_store = "Aldi".to_string();

        let pipeline = ReceiptPipeline::from_config(&config);
        let scan = pipeline
            .scan("ALDI\nBread 3.19", None, date())
            .unwrap()
            .into_scan()
            .unwrap();

        assert_eq!(scan.store, "Aldi");
        assert_eq!(scan.strategy, ParseStrategy::Inline);
        assert_eq!(scan.records[0].category, "Bakery");
    }

    #[test]
    fn test_outcome_json_is_tagged() {
        let json = serde_json::to_value(ScanOutcome::NoItemsDetected { lines: 3 }).unwrap();
        assert_eq!(json["status"], "no_items_detected");
        assert_eq!(json["lines"], 3);
    }

    fn scan_of(prices: &[Decimal]) -> Scan {
        let taxonomy = Taxonomy::default();
        let items: Vec<CategorizedItem> = prices
            .iter()
            .map(|price| CategorizedItem::new(LineItem::new("Saffron", *price), &taxonomy))
            .collect();

        Scan {
            store: "Spice Shop".to_string(),
            strategy: ParseStrategy::Split,
            records: assemble_records(date(), "Spice Shop", &items),
            lines: prices.len() * 2,
            excluded: 0,
            processing_time_ms: 0,
        }
    }

    #[test]
    fn test_total() {
        let scan = scan_of(&[Decimal::new(299, 2), Decimal::new(450, 2)]);
        assert_eq!(scan.total(), Some(Decimal::new(749, 2)));
    }

    #[test]
    fn test_total_overflow_is_none() {
        let huge = Decimal::from_i128_with_scale(7 * 10_i128.pow(28), 2);
        let scan = scan_of(&vec![huge; 150]);
        assert_eq!(scan.total(), None);
    }

}
