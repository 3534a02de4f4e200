//! Shared-secret guard for protected routes.
//!
//! The token is compared with plain string equality; there is no hashing,
//! rate limiting or constant-time comparison.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use std::sync::Arc;
use tracing::warn;

use crate::api::handlers::QuoteApiState;
use crate::error::QuoteError;

/// Header carrying the shared secret.
pub const ACCESS_TOKEN_HEADER: &str = "X-Access-Token";

/// Reject the request with 403 unless `X-Access-Token` matches the configured secret.
///
/// Installed with `route_layer`, so it runs before the body is read and
/// before any handler logic.
pub async fn require_access_token(
    State(state): State<Arc<QuoteApiState>>,
    request: Request,
    next: Next,
) -> Response {
    let provided = request
        .headers()
        .get(ACCESS_TOKEN_HEADER)
        .and_then(|v| v.to_str().ok());

    if provided == Some(state.secret_token()) {
        return next.run(request).await;
    }

    warn!(
        path = %request.uri().path(),
        header_present = provided.is_some(),
        "Rejected request with invalid access token"
    );
    state.metrics.record_auth_rejected();

    QuoteError::Unauthorized {
        header: ACCESS_TOKEN_HEADER,
    }
    .into_response()
}
