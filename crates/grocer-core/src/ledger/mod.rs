//! Ledger row assembly and persistence sinks.
//!
//! The core only produces plain rows. Durable storage sits behind
//! [`RecordSink`]; records handed to a sink are consumed and can no longer be
//! edited.

mod csv_sink;
mod memory;

pub use csv_sink::{read_records, CsvSink};
pub use memory::MemorySink;

use chrono::NaiveDate;

use crate::error::Result;
use crate::models::receipt::{CategorizedItem, ReceiptRecord};

/// A durable, append-only store of ledger rows.
pub trait RecordSink {
    /// Append records in order, returning how many were written.
    fn append(&mut self, records: Vec<ReceiptRecord>) -> Result<usize>;
}

impl<S: RecordSink + ?Sized> RecordSink for &mut S {
    fn append(&mut self, records: Vec<ReceiptRecord>) -> Result<usize> {
        (**self).append(records)
    }
}

/// Stamp each item with the receipt date and store, preserving item order.
pub fn assemble_records(date: NaiveDate, store: &str, items: &[CategorizedItem]) -> Vec<ReceiptRecord> {
    items
        .iter()
        .map(|item| ReceiptRecord::new(date, store, item))
        .collect()
}
