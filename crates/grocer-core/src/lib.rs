//! Core library for grocery receipt OCR processing.
//!
//! This crate provides:
//! - OCR input normalisation (text blocks, line lists, positioned boxes)
//! - Receipt line parsing with split, inline and whitespace layouts
//! - Keyword-based spending categorization
//! - Ledger row assembly and sinks for tabular persistence

pub mod error;
pub mod models;
pub mod ocr;
pub mod receipt;
pub mod category;
pub mod ledger;

pub use error::{GrocerError, Result};
pub use models::config::GrocerConfig;
pub use models::receipt::{CategorizedItem, LineItem, ReceiptRecord, ReceiptRow};
pub use ocr::{OcrEngine, OcrInput, RawLine, TextBox};
pub use receipt::{parse, ParseStrategy, ReceiptParser, ReceiptPipeline, Scan, ScanOutcome};
pub use category::{categorize, Category, Taxonomy};
pub use ledger::{assemble_records, read_records, CsvSink, MemorySink, RecordSink};
