//! Request/response types for the stock quote API.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::error::QuoteError;

/// Body of `POST /stocks/quotes`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StockRequest {
    pub symbols: Vec<String>,
}

/// Query of `GET /stocks/ref-price` and `GET /stocks/open-price`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SymbolsQuery {
    /// Comma separated symbols, e.g. `VCB,ACB,BID`.
    #[serde(default)]
    pub symbols: Option<String>,
}

/// Error body returned by every endpoint.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ErrorResponse {
    pub detail: String,
}

impl IntoResponse for QuoteError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let body = ErrorResponse {
            detail: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
