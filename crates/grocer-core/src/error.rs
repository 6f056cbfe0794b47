//! Error types for the grocer-core library.

use thiserror::Error;

/// Main error type for the grocer library.
#[derive(Error, Debug)]
pub enum GrocerError {
    /// Receipt extraction error.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// Ledger sink error.
    #[error("sink error: {0}")]
    Sink(#[from] SinkError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to receipt line extraction.
///
/// Individual lines never produce these inside a parse; they are swallowed
/// and the line is skipped.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    /// The OCR output contained no readable text at all.
    #[error("no text detected in OCR output")]
    NoText,

    /// A token could not be read as a two-decimal amount.
    #[error("invalid price: {value}")]
    InvalidPrice { value: String },
}

/// Errors related to writing or reading ledger rows.
#[derive(Error, Debug)]
pub enum SinkError {
    /// CSV encoding or decoding failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A row read back from the ledger is not a valid record.
    #[error("invalid row {row}: {reason}")]
    InvalidRow { row: usize, reason: String },
}

/// Errors raised when a flat ledger row cannot be turned back into a record.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RowError {
    /// The date column is not a `YYYY-MM-DD` calendar date.
    #[error("invalid date: {0:?}")]
    Date(String),

    /// The price column is not a non-negative two-decimal amount.
    #[error("invalid price: {0:?}")]
    Price(String),

    /// The item column is blank.
    #[error("item name is empty")]
    EmptyItem,
}

/// Result type for the grocer library.
pub type Result<T> = std::result::Result<T, GrocerError>;
