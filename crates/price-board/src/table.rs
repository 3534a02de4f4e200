//! Two-level column table returned by the price board.
//!
//! Columns are addressed by a `(section, field)` pair, e.g.
//! `('listing', 'ref_price')` or `('match', 'open_price')`. Rows keep the
//! raw JSON cell values sent by the provider so integer prices stay integers.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;

use crate::error::TableError;

/// Section holding static listing data (symbol, reference, ceiling, floor).
pub const LISTING: &str = "listing";
/// Section holding the current match (open, last, highest, lowest).
pub const MATCH: &str = "match";
/// Section holding the order book depth.
pub const BID_ASK: &str = "bid_ask";

/// A two-part column address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ColumnKey {
    pub section: String,
    pub field: String,
}

impl ColumnKey {
    pub fn new(section: impl Into<String>, field: impl Into<String>) -> Self {
        Self {
            section: section.into(),
            field: field.into(),
        }
    }

    /// `('listing', 'symbol')`
    pub fn symbol() -> Self {
        Self::new(LISTING, "symbol")
    }

    /// `('listing', 'ref_price')`
    pub fn ref_price() -> Self {
        Self::new(LISTING, "ref_price")
    }

    /// `('match', 'open_price')`
    pub fn open_price() -> Self {
        Self::new(MATCH, "open_price")
    }
}

impl fmt::Display for ColumnKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "('{}', '{}')", self.section, self.field)
    }
}

/// A single row: column address to cell value.
pub type Row = HashMap<ColumnKey, Value>;

/// Table of price board rows, one per symbol returned by the provider.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PriceTable {
    columns: Vec<ColumnKey>,
    rows: Vec<Row>,
}

impl PriceTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty table with a declared schema.
    pub fn with_columns(columns: impl IntoIterator<Item = ColumnKey>) -> Self {
        let mut table = Self::new();
        for column in columns {
            table.add_column(column);
        }
        table
    }

    /// Append a row. Columns not seen before are appended to the schema.
    pub fn push_row(&mut self, cells: impl IntoIterator<Item = (ColumnKey, Value)>) {
        let mut row = Row::new();
        for (column, value) in cells {
            self.add_column(column.clone());
            row.insert(column, value);
        }
        self.rows.push(row);
    }

    fn add_column(&mut self, column: ColumnKey) {
        if !self.columns.contains(&column) {
            self.columns.push(column);
        }
    }

    pub fn columns(&self) -> &[ColumnKey] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_column(&self, column: &ColumnKey) -> bool {
        self.columns.contains(column)
    }

    /// Columns from `wanted` that are not part of the schema, in `wanted` order.
    pub fn missing_columns(&self, wanted: &[ColumnKey]) -> Vec<ColumnKey> {
        wanted
            .iter()
            .filter(|c| !self.has_column(c))
            .cloned()
            .collect()
    }

    /// Select `wanted` columns from every row, in row order.
    ///
    /// Fails if any requested column is absent from the schema. A column that
    /// exists but is missing from a particular row yields `Value::Null`.
    pub fn project(&self, wanted: &[ColumnKey]) -> Result<Vec<Vec<Value>>, TableError> {
        let missing = self.missing_columns(wanted);
        if !missing.is_empty() {
            return Err(TableError::MissingColumns(missing));
        }

        Ok(self
            .rows
            .iter()
            .map(|row| {
                wanted
                    .iter()
                    .map(|c| row.get(c).cloned().unwrap_or(Value::Null))
                    .collect()
            })
            .collect())
    }

    /// Remove a column from the schema and from every row.
    pub fn drop_column(&mut self, column: &ColumnKey) {
        self.columns.retain(|c| c != column);
        for row in &mut self.rows {
            row.remove(column);
        }
    }
}
