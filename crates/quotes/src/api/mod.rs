//! HTTP API for stock quotes.
//!
//! ## Modules
//!
//! - `handlers` - Endpoint handlers and shared state
//! - `auth` - `X-Access-Token` guard middleware
//! - `routes` - Axum router
//! - `models` - Request/response types

pub mod auth;
pub mod handlers;
pub mod models;
pub mod routes;

pub use auth::ACCESS_TOKEN_HEADER;
pub use handlers::QuoteApiState;
pub use routes::quote_routes;
