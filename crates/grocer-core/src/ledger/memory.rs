//! In-memory sink, used for review staging and tests.

use super::RecordSink;
use crate::error::Result;
use crate::models::receipt::{ReceiptRecord, ReceiptRow};

#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    rows: Vec<ReceiptRow>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Committed rows, in append order.
    pub fn rows(&self) -> &[ReceiptRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl RecordSink for MemorySink {
    fn append(&mut self, records: Vec<ReceiptRecord>) -> Result<usize> {
        let count = records.len();
        self.rows.extend(records.into_iter().map(ReceiptRow::from));
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::receipt::ReceiptPipeline;
    use chrono::NaiveDate;

    #[test]
    fn test_appends_reviewed_rows() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
        let scan = ReceiptPipeline::default()
            .scan("Kroger\nBananas\n$1.99\nMilk\n$3.49", None, date)
            .unwrap()
            .into_scan()
            .unwrap();

        let mut records = scan.into_records();
        records[1].item = "2% Milk".to_string();
        records.remove(0);

        let mut sink = MemorySink::new();
        assert_eq!(sink.append(records).unwrap(), 1);
        assert_eq!(sink.len(), 1);
        assert_eq!(sink.rows()[0].item, "2% Milk");
        assert_eq!(sink.rows()[0].store, "Kroger");
        assert_eq!(sink.rows()[0].category, "Dairy");
    }
}
