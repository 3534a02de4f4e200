//! Stock quote service for QuoteGateway
//!
//! Normalizes ticker symbols, pulls the price board from an upstream
//! [`PriceBoardClient`](price_board::PriceBoardClient) and reshapes its
//! two-level columns into flat records.
//!
//! With the `api` feature (default) the [`api`] module exposes the three
//! HTTP endpoints:
//!
//! - `POST /stocks/quotes` - reference and open price, token protected
//! - `GET /stocks/ref-price` - reference price
//! - `GET /stocks/open-price` - open price

pub mod error;
pub mod extract;
pub mod symbols;

#[cfg(feature = "api")]
pub mod api;

#[cfg(test)]
pub(crate) mod testing;

pub use error::{QuoteError, QuoteResult};
pub use extract::{fetch_field, fetch_quotes, FieldRecord, FieldSelector, QuoteRecord};
pub use symbols::{normalize_symbols, parse_symbol_list};
