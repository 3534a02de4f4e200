//! Upstream price board access for QuoteGateway
//!
//! This crate provides:
//! - [`PriceTable`] - rows addressed by two-level `(section, field)` columns
//! - [`PriceBoardClient`] - the provider-agnostic fetch trait
//! - [`VciPriceBoardClient`] - HTTP client for the VCI trading API
//! - [`StaticPriceBoard`] - in-memory board for development and tests

pub mod client;
pub mod error;
pub mod table;
pub mod vci;

pub use client::{PriceBoardClient, StaticPriceBoard};
pub use error::{PriceBoardError, PriceBoardResult, TableError};
pub use table::{ColumnKey, PriceTable, Row};
pub use vci::VciPriceBoardClient;
