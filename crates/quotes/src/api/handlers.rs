//! HTTP request handlers for the stock quote API.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::Json;
use observability::QuoteMetrics;
use price_board::PriceBoardClient;
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

use crate::api::models::{StockRequest, SymbolsQuery};
use crate::error::{QuoteError, QuoteResult};
use crate::extract::{fetch_field, fetch_quotes, FieldRecord, FieldSelector, QuoteRecord};
use crate::symbols::{normalize_symbols, parse_symbol_list};

/// Shared state for quote API handlers.
///
/// Immutable after construction; requests never lock anything.
pub struct QuoteApiState {
    pub client: Arc<dyn PriceBoardClient>,
    pub metrics: QuoteMetrics,
    secret_token: String,
}

impl QuoteApiState {
    pub fn new(
        client: Arc<dyn PriceBoardClient>,
        secret_token: impl Into<String>,
        metrics: QuoteMetrics,
    ) -> Self {
        Self {
            client,
            metrics,
            secret_token: secret_token.into(),
        }
    }

    pub(crate) fn secret_token(&self) -> &str {
        &self.secret_token
    }

    fn record<T>(&self, endpoint: &'static str, started: Instant, result: &QuoteResult<T>) {
        let status = match result {
            Ok(_) => 200,
            Err(e) => e.status_code(),
        };
        self.metrics
            .record_request(endpoint, started.elapsed(), status);

        match result {
            Err(QuoteError::Upstream(e)) => self.metrics.record_upstream_failure(e.kind()),
            Err(QuoteError::SchemaChanged) | Err(QuoteError::MissingColumn(_)) => {
                self.metrics.record_upstream_failure("Schema")
            }
            Err(e) => debug!(endpoint, error = %e, "Rejected quote request"),
            Ok(_) => {}
        }
    }

    /// Record and return a request that failed to decode.
    fn rejected<T>(&self, endpoint: &'static str, message: String) -> QuoteResult<T> {
        let result = Err(QuoteError::InvalidRequest(message));
        self.record(endpoint, Instant::now(), &result);
        result
    }
}

/// POST /stocks/quotes
///
/// Reference and opening price for every symbol in the body. Guarded by
/// [`require_access_token`](crate::api::auth::require_access_token).
pub async fn get_combined_quotes(
    State(state): State<Arc<QuoteApiState>>,
    payload: Result<Json<StockRequest>, JsonRejection>,
) -> QuoteResult<Json<Vec<QuoteRecord>>> {
    let req = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return state.rejected("quotes", rejection.body_text()),
    };
    let symbols = normalize_symbols(&req.symbols);
    let started = Instant::now();

    let result = fetch_quotes(state.client.as_ref(), &symbols).await;
    state.record("quotes", started, &result);

    result.map(Json)
}

/// GET /stocks/ref-price?symbols=VCB,ACB
pub async fn get_reference_price(
    State(state): State<Arc<QuoteApiState>>,
    params: Result<Query<SymbolsQuery>, QueryRejection>,
) -> QuoteResult<Json<Vec<FieldRecord>>> {
    field_prices(&state, "ref_price", params, &FieldSelector::ref_price()).await
}

/// GET /stocks/open-price?symbols=VCB,ACB
pub async fn get_opening_price(
    State(state): State<Arc<QuoteApiState>>,
    params: Result<Query<SymbolsQuery>, QueryRejection>,
) -> QuoteResult<Json<Vec<FieldRecord>>> {
    field_prices(&state, "open_price", params, &FieldSelector::open_price()).await
}

async fn field_prices(
    state: &QuoteApiState,
    endpoint: &'static str,
    params: Result<Query<SymbolsQuery>, QueryRejection>,
    selector: &FieldSelector,
) -> QuoteResult<Json<Vec<FieldRecord>>> {
    let params = match params {
        Ok(Query(params)) => params,
        Err(rejection) => return state.rejected(endpoint, rejection.body_text()),
    };
    let symbols = parse_symbol_list(params.symbols.as_deref().unwrap_or_default());
    let started = Instant::now();

    let result = fetch_field(state.client.as_ref(), &symbols, selector).await;
    state.record(endpoint, started, &result);

    result.map(Json)
}
