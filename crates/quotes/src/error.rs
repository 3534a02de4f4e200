//! Error types for the quotes crate.

use price_board::{ColumnKey, PriceBoardError};
use thiserror::Error;

/// Result type alias for quote operations.
pub type QuoteResult<T> = Result<T, QuoteError>;

/// Errors that can occur while serving a quote request.
///
/// The `Display` text of each variant is what API clients see; raw upstream
/// error text is only ever logged.
#[derive(Error, Debug)]
pub enum QuoteError {
    /// No symbol left after normalization.
    #[error("Please provide at least one stock symbol.")]
    NoSymbols,

    /// Request body or query string could not be decoded.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Missing or wrong shared-secret header.
    #[error("Invalid API Key. Please provide the correct token in the '{header}' header.")]
    Unauthorized { header: &'static str },

    /// Column projection failed on the combined endpoint.
    #[error("The data structure returned by the upstream provider has changed. Please check the column names.")]
    SchemaChanged,

    /// A required column is absent from the upstream table.
    #[error("Column {0} does not exist in the data. The upstream schema may have changed.")]
    MissingColumn(ColumnKey),

    /// Any other upstream failure.
    #[error("An error occurred while processing data: {}", .0.kind())]
    Upstream(#[source] PriceBoardError),
}

impl QuoteError {
    /// HTTP status code for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::NoSymbols | Self::InvalidRequest(_) => 400,
            Self::Unauthorized { .. } => 403,
            Self::SchemaChanged | Self::MissingColumn(_) | Self::Upstream(_) => 500,
        }
    }

    /// True for failures the client could not have avoided.
    pub fn is_server_error(&self) -> bool {
        self.status_code() >= 500
    }
}
