//! Error types for the price board crate.

use thiserror::Error;

use crate::table::ColumnKey;

/// Result type alias for price board operations.
pub type PriceBoardResult<T> = Result<T, PriceBoardError>;

/// Errors raised while reading columns out of a [`PriceTable`](crate::PriceTable).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    /// One or more requested columns are absent from the table.
    #[error("{} not in index", format_columns(.0))]
    MissingColumns(Vec<ColumnKey>),
}

fn format_columns(columns: &[ColumnKey]) -> String {
    let joined = columns
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    format!("[{}]", joined)
}

/// Errors that can occur when fetching the price board from the upstream provider.
#[derive(Error, Debug, Clone)]
pub enum PriceBoardError {
    /// The request never produced a response (connect, TLS, timeout).
    #[error("Price board request failed: {0}")]
    Transport(String),

    /// The provider answered with a non-success status.
    #[error("Price board returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body did not have the expected shape.
    #[error("Failed to decode price board response: {0}")]
    Decode(String),

    /// Column lookup failed on the returned table.
    #[error(transparent)]
    Table(#[from] TableError),
}

impl PriceBoardError {
    /// Stable type name of the failure, safe to show to API clients.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Transport(_) => "Transport",
            Self::Status { .. } => "Status",
            Self::Decode(_) => "Decode",
            Self::Table(_) => "Table",
        }
    }

    /// True when the failure means an expected column is absent.
    pub fn is_missing_column(&self) -> bool {
        matches!(self, Self::Table(TableError::MissingColumns(_)))
    }
}

impl From<reqwest::Error> for PriceBoardError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            PriceBoardError::Decode(err.to_string())
        } else {
            PriceBoardError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for PriceBoardError {
    fn from(err: serde_json::Error) -> Self {
        PriceBoardError::Decode(err.to_string())
    }
}
