//! CSV ledger sink.

use std::fs::{File, OpenOptions};
use std::io::{Read, Write};
use std::path::Path;

use tracing::debug;

use super::RecordSink;
use crate::error::{GrocerError, Result, SinkError};
use crate::models::receipt::{ReceiptRecord, ReceiptRow, COLUMNS};

/// Appends ledger rows as CSV with the fixed column order.
pub struct CsvSink<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> CsvSink<W> {
    /// Wrap a writer, writing the header row first when `write_header` is set.
    pub fn new(writer: W, write_header: bool) -> Result<Self> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(writer);

        if write_header {
            writer.write_record(COLUMNS).map_err(SinkError::from)?;
        }

        Ok(Self { writer })
    }

    /// Flush and return the underlying writer.
    pub fn into_inner(self) -> Result<W> {
        self.writer
            .into_inner()
            .map_err(|e| GrocerError::Io(e.into_error()))
    }
}

impl CsvSink<File> {
    /// Open a ledger file for appending, creating it with a header if new or empty.
    pub fn open_append(path: &Path) -> Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        let is_empty = file.metadata()?.len() == 0;
        debug!("Opened ledger {} (new: {})", path.display(), is_empty);

        Self::new(file, is_empty)
    }
}

impl<W: Write> RecordSink for CsvSink<W> {
    fn append(&mut self, records: Vec<ReceiptRecord>) -> Result<usize> {
        let count = records.len();
        for record in records {
            let row = record.to_row();
            self.writer
                .write_record(row.values())
                .map_err(SinkError::from)?;
        }
        self.writer.flush()?;

        debug!("Appended {} rows to CSV ledger", count);
        Ok(count)
    }
}

/// Read a CSV ledger (with header row) back into records.
pub fn read_records<R: Read>(reader: R) -> Result<Vec<ReceiptRecord>> {
    let mut reader = csv::Reader::from_reader(reader);
    let mut records = Vec::new();

    for (i, row) in reader.deserialize::<ReceiptRow>().enumerate() {
        let row = row.map_err(SinkError::from)?;
        let record = ReceiptRecord::try_from(row).map_err(|e| SinkError::InvalidRow {
            row: i + 1,
            reason: e.to_string(),
        })?;
        records.push(record);
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::Taxonomy;
    use crate::ledger::assemble_records;
    use crate::models::receipt::{CategorizedItem, LineItem};
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn records() -> Vec<ReceiptRecord> {
        let taxonomy = Taxonomy::default();
        let items = vec![
            CategorizedItem::new(LineItem::new("Whole Milk", Decimal::from_str("4.50").unwrap()), &taxonomy),
            CategorizedItem::new(LineItem::new("Chips, Salted", Decimal::from_str("3.00").unwrap()), &taxonomy),
        ];
        assemble_records(NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(), "Trader Joe's", &items)
    }

    fn write(records: Vec<ReceiptRecord>) -> String {
        let mut sink = CsvSink::new(Vec::new(), true).unwrap();
        sink.append(records).unwrap();
        String::from_utf8(sink.into_inner().unwrap()).unwrap()
    }

    #[test]
    fn test_writes_fixed_columns() {
        let csv = write(records());
        let lines: Vec<_> = csv.lines().collect();
        assert_eq!(
            lines,
            vec![
                "Date,Day,Store,Item,Price,Category",
                "2024-03-04,Monday,Trader Joe's,Whole Milk,4.50,Dairy",
                "2024-03-04,Monday,Trader Joe's,\"Chips, Salted\",3.00,Snacks",
            ]
        );
    }

    #[test]
    fn test_round_trip_preserves_fields() {
        let original = records();
        let back = read_records(write(original.clone()).as_bytes()).unwrap();

        assert_eq!(back.len(), 2);
        for (a, b) in original.iter().zip(&back) {
            assert_eq!(a.item, b.item);
            assert_eq!(a.price, b.price);
            assert_eq!(a.price.to_string(), b.price.to_string());
            assert_eq!(a.category, b.category);
            assert_eq!(a.store, b.store);
        }
        assert_eq!(back, original);
    }

    #[test]
    fn test_without_header() {
        let mut sink = CsvSink::new(Vec::new(), false).unwrap();
        sink.append(Vec::new()).unwrap();
        assert!(sink.into_inner().unwrap().is_empty());
    }

    #[test]
    fn test_read_rejects_invalid_row() {
        let csv = "Date,Day,Store,Item,Price,Category\n2024-03-04,Monday,Shop,Milk,abc,Dairy\n";
        let err = read_records(csv.as_bytes()).unwrap_err();
        match err {
            GrocerError::Sink(SinkError::InvalidRow { row, reason }) => {
                assert_eq!(row, 1);
                assert!(reason.contains("abc"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_open_append_writes_header_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger.csv");

        let mut sink = CsvSink::open_append(&path).unwrap();
        sink.append(records()).unwrap();
        drop(sink);

        let mut sink = CsvSink::open_append(&path).unwrap();
        sink.append(records()).unwrap();
        drop(sink);

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.matches("Date,Day,Store").count(), 1);
        assert_eq!(read_records(content.as_bytes()).unwrap().len(), 4);
    }
}
