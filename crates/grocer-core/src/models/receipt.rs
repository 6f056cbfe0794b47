//! Receipt data models: parsed items, categorized items and ledger records.

use chrono::{Datelike, NaiveDate, Weekday};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::category::Taxonomy;
use crate::error::RowError;
use crate::receipt::rules::price::parse_price;

/// Date format used in ledger rows.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Ledger column headers, in row order.
pub const COLUMNS: [&str; 6] = ["Date", "Day", "Store", "Item", "Price", "Category"];

/// A single purchase candidate read off the receipt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Item name as printed, trimmed.
    pub name: String,

    /// Price with exactly two fractional digits.
    pub price: Decimal,

    /// Index of the OCR line the name was read from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_line: Option<usize>,
}

impl LineItem {
    /// Create a line item, trimming the name and fixing the price scale at two digits.
    pub fn new(name: impl Into<String>, price: Decimal) -> Self {
        let name = name.into();
        Self {
            name: name.trim().to_string(),
            price: normalize_price(price),
            source_line: None,
        }
    }

    pub fn with_source_line(mut self, index: usize) -> Self {
        self.source_line = Some(index);
        self
    }
}

/// A line item with its spending category.
///
/// The category is derived from the item name when the value is built and
/// cannot be changed afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategorizedItem {
    #[serde(flatten)]
    item: LineItem,
    category: String,
}

impl CategorizedItem {
    /// Categorize `item` against `taxonomy`.
    pub fn new(item: LineItem, taxonomy: &Taxonomy) -> Self {
        let category = taxonomy.categorize(&item.name).to_string();
        Self { item, category }
    }

    pub fn item(&self) -> &LineItem {
        &self.item
    }

    pub fn name(&self) -> &str {
        &self.item.name
    }

    pub fn price(&self) -> Decimal {
        self.item.price
    }

    pub fn category(&self) -> &str {
        &self.category
    }
}

/// A categorized item stamped with receipt-level metadata, ready for the ledger.
///
/// Every field may be edited during review except the day of week, which
/// always follows the date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ReceiptRow", into = "ReceiptRow")]
pub struct ReceiptRecord {
    date: NaiveDate,

    /// Store name.
    pub store: String,

    /// Item name.
    pub item: String,

    /// Item price.
    pub price: Decimal,

    /// Spending category label.
    pub category: String,
}

impl ReceiptRecord {
    pub fn new(date: NaiveDate, store: impl Into<String>, item: &CategorizedItem) -> Self {
        Self {
            date,
            store: store.into().trim().to_string(),
            item: item.name().to_string(),
            price: item.price(),
            category: item.category().to_string(),
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Change the receipt date; the day of week follows.
    pub fn set_date(&mut self, date: NaiveDate) {
        self.date = date;
    }

    pub fn weekday(&self) -> Weekday {
        self.date.weekday()
    }

    /// English day name, e.g. "Monday".
    pub fn day(&self) -> String {
        self.date.format("%A").to_string()
    }

    /// Flatten into a ledger row.
    pub fn to_row(&self) -> ReceiptRow {
        ReceiptRow {
            date: self.date.format(DATE_FORMAT).to_string(),
            day: self.day(),
            store: self.store.clone(),
            item: self.item.clone(),
            price: format!("{:.2}", self.price),
            category: self.category.clone(),
        }
    }
}

/// Flat tabular form of a [`ReceiptRecord`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiptRow {
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Day")]
    pub day: String,
    #[serde(rename = "Store")]
    pub store: String,
    #[serde(rename = "Item")]
    pub item: String,
    #[serde(rename = "Price")]
    pub price: String,
    #[serde(rename = "Category")]
    pub category: String,
}

impl ReceiptRow {
    /// Cell values in [`COLUMNS`] order.
    pub fn values(&self) -> [&str; 6] {
        [
            self.date.as_str(),
            self.day.as_str(),
            self.store.as_str(),
            self.item.as_str(),
            self.price.as_str(),
            self.category.as_str(),
        ]
    }
}

impl From<ReceiptRecord> for ReceiptRow {
    fn from(record: ReceiptRecord) -> Self {
        record.to_row()
    }
}

/// The `Day` column is ignored on read; it is recomputed from `Date`.
impl TryFrom<ReceiptRow> for ReceiptRecord {
    type Error = RowError;

    fn try_from(row: ReceiptRow) -> Result<Self, Self::Error> {
        let date = NaiveDate::parse_from_str(row.date.trim(), DATE_FORMAT)
            .map_err(|_| RowError::Date(row.date.clone()))?;
        let price = parse_price(&row.price).map_err(|_| RowError::Price(row.price.clone()))?;
        let item = row.item.trim().to_string();
        if item.is_empty() {
            return Err(RowError::EmptyItem);
        }

        Ok(Self {
            date,
            store: row.store.trim().to_string(),
            item,
            price,
            category: row.category,
        })
    }
}

fn normalize_price(mut price: Decimal) -> Decimal {
    price.rescale(2);
    price
}
