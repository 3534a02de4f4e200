//! Price extraction from the upstream price board.
//!
//! Two forms share the same shape: fetch the table for exactly the requested
//! symbols, project a fixed set of `(section, field)` columns, rename them to
//! flat keys and emit one record per upstream row.
//!
//! - [`fetch_quotes`] (combined) projects symbol, reference and open price and
//!   reacts to a failed projection after the fact.
//! - [`fetch_field`] (split) projects symbol plus one column and checks that
//!   both columns exist before projecting.

use price_board::{ColumnKey, PriceBoardClient, PriceBoardError};
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Number, Value};
use tracing::{debug, error};

use crate::error::{QuoteError, QuoteResult};

/// Reference and opening price for one symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteRecord {
    pub symbol: String,
    pub ref_price: Option<Number>,
    pub open_price: Option<Number>,
}

/// Column to extract in the split form, and the flat key it is emitted under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSelector {
    pub column: ColumnKey,
    pub output_key: String,
}

impl FieldSelector {
    pub fn new(column: ColumnKey, output_key: impl Into<String>) -> Self {
        Self {
            column,
            output_key: output_key.into(),
        }
    }

    /// `('listing', 'ref_price')` as `ref_price`
    pub fn ref_price() -> Self {
        Self::new(ColumnKey::ref_price(), "ref_price")
    }

    /// `('match', 'open_price')` as `open_price`
    pub fn open_price() -> Self {
        Self::new(ColumnKey::open_price(), "open_price")
    }
}

/// One symbol with a single extracted value, serialized as
/// `{"symbol": ..., "<output_key>": ...}`.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldRecord {
    pub symbol: String,
    pub key: String,
    pub value: Option<Number>,
}

impl Serialize for FieldRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry("symbol", &self.symbol)?;
        map.serialize_entry(&self.key, &self.value)?;
        map.end()
    }
}

fn quote_columns() -> [ColumnKey; 3] {
    [
        ColumnKey::symbol(),
        ColumnKey::ref_price(),
        ColumnKey::open_price(),
    ]
}

/// Fetch reference and opening prices for `symbols` (combined form).
///
/// `symbols` must already be normalized. An empty list fails before any
/// upstream call.
pub async fn fetch_quotes(
    client: &dyn PriceBoardClient,
    symbols: &[String],
) -> QuoteResult<Vec<QuoteRecord>> {
    if symbols.is_empty() {
        return Err(QuoteError::NoSymbols);
    }

    let rows = fetch_projected(client, symbols, &quote_columns())
        .await
        .map_err(|e| {
            error!(source = client.source(), error = %e, "Failed to extract quotes");
            if e.is_missing_column() {
                QuoteError::SchemaChanged
            } else {
                QuoteError::Upstream(e)
            }
        })?;

    Ok(rows
        .into_iter()
        .map(|cells| {
            let mut cells = cells.into_iter();
            QuoteRecord {
                symbol: cell_to_symbol(cells.next().unwrap_or_default()),
                ref_price: cell_to_price(cells.next().unwrap_or_default()),
                open_price: cell_to_price(cells.next().unwrap_or_default()),
            }
        })
        .collect())
}

async fn fetch_projected(
    client: &dyn PriceBoardClient,
    symbols: &[String],
    columns: &[ColumnKey],
) -> Result<Vec<Vec<Value>>, PriceBoardError> {
    let table = client.price_board(symbols).await?;
    debug!(requested = symbols.len(), returned = table.len(), "Price board received");
    // no rows carries no schema to check
    if table.is_empty() {
        return Ok(Vec::new());
    }
    Ok(table.project(columns)?)
}

/// Fetch a single price column for `symbols` (split form).
///
/// Both `('listing', 'symbol')` and the selected column must be present in
/// a non-empty upstream table; the first missing one is reported by name.
/// An upstream table without rows yields an empty list.
pub async fn fetch_field(
    client: &dyn PriceBoardClient,
    symbols: &[String],
    selector: &FieldSelector,
) -> QuoteResult<Vec<FieldRecord>> {
    if symbols.is_empty() {
        return Err(QuoteError::NoSymbols);
    }

    let table = client.price_board(symbols).await.map_err(|e| {
        error!(source = client.source(), error = %e, "Failed to fetch price board");
        QuoteError::Upstream(e)
    })?;

    if table.is_empty() {
        debug!(requested = symbols.len(), "Price board returned no rows");
        return Ok(Vec::new());
    }

    let required = [ColumnKey::symbol(), selector.column.clone()];
    if let Some(missing) = table.missing_columns(&required).into_iter().next() {
        error!(column = %missing, "Column missing from price board");
        return Err(QuoteError::MissingColumn(missing));
    }

    let rows = table.project(&required).map_err(|e| {
        error!(error = %e, "Failed to project price board");
        QuoteError::Upstream(e.into())
    })?;

    Ok(rows
        .into_iter()
        .map(|cells| {
            let mut cells = cells.into_iter();
            FieldRecord {
                symbol: cell_to_symbol(cells.next().unwrap_or_default()),
                key: selector.output_key.clone(),
                value: cell_to_price(cells.next().unwrap_or_default()),
            }
        })
        .collect())
}

fn cell_to_symbol(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn cell_to_price(value: Value) -> Option<Number> {
    match value {
        Value::Number(n) => Some(n),
        Value::String(s) => serde_json::from_str(s.trim()).ok(),
        _ => None,
    }
}
