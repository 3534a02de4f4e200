//! Price board client - trait and in-memory implementation

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;

use crate::error::PriceBoardResult;
use crate::table::{ColumnKey, PriceTable};

/// Client trait for the upstream price board - provider agnostic
#[async_trait]
pub trait PriceBoardClient: Send + Sync {
    /// Short name of the data source, used in logs.
    fn source(&self) -> &str;

    /// Fetch the full price board for exactly the given symbols.
    ///
    /// Providers may return fewer rows than requested symbols (unknown
    /// symbols are dropped without an error), and the row order is the
    /// provider's, not the caller's.
    async fn price_board(&self, symbols: &[String]) -> PriceBoardResult<PriceTable>;
}

// ==================== Static Implementation ====================

/// In-memory price board.
///
/// Returns one row per requested symbol it knows, in request order, and
/// silently skips unknown symbols. The schema is fixed at construction so an
/// all-unknown request still yields a table with the expected columns.
#[derive(Debug, Clone)]
pub struct StaticPriceBoard {
    columns: Vec<ColumnKey>,
    rows: HashMap<String, Vec<(ColumnKey, Value)>>,
}

impl StaticPriceBoard {
    /// Create an empty board exposing symbol, reference and open price columns.
    pub fn new() -> Self {
        Self {
            columns: vec![
                ColumnKey::symbol(),
                ColumnKey::ref_price(),
                ColumnKey::open_price(),
            ],
            rows: HashMap::new(),
        }
    }

    /// Register a symbol with its reference and open prices.
    pub fn with_quote(
        self,
        symbol: impl Into<String>,
        ref_price: impl Into<Value>,
        open_price: impl Into<Value>,
    ) -> Self {
        self.with_row(
            symbol,
            vec![
                (ColumnKey::ref_price(), ref_price.into()),
                (ColumnKey::open_price(), open_price.into()),
            ],
        )
    }

    /// Register a symbol with arbitrary cells. The `('listing', 'symbol')`
    /// cell is filled in automatically.
    pub fn with_row(mut self, symbol: impl Into<String>, cells: Vec<(ColumnKey, Value)>) -> Self {
        let symbol = symbol.into().to_uppercase();
        let mut row = vec![(ColumnKey::symbol(), Value::String(symbol.clone()))];
        for (column, value) in cells {
            if !self.columns.contains(&column) {
                self.columns.push(column.clone());
            }
            row.push((column, value));
        }
        self.rows.insert(symbol, row);
        self
    }

    /// Remove a column from the schema, simulating a provider schema change.
    pub fn without_column(mut self, column: &ColumnKey) -> Self {
        self.columns.retain(|c| c != column);
        for row in self.rows.values_mut() {
            row.retain(|(c, _)| c != column);
        }
        self
    }

    /// Number of symbols known to the board.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl Default for StaticPriceBoard {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PriceBoardClient for StaticPriceBoard {
    fn source(&self) -> &str {
        "static"
    }

    async fn price_board(&self, symbols: &[String]) -> PriceBoardResult<PriceTable> {
        let mut table = PriceTable::with_columns(self.columns.iter().cloned());
        for symbol in symbols {
            if let Some(row) = self.rows.get(symbol) {
                table.push_row(row.iter().cloned());
            }
        }
        Ok(table)
    }
}
