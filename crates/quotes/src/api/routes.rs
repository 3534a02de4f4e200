//! Axum route definitions for the stock quote API.

use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::api::auth::require_access_token;
use crate::api::handlers::{self, QuoteApiState};

/// Create all stock quote routes.
///
/// # Routes
///
/// - `POST /stocks/quotes` - Reference and open price (requires `X-Access-Token`)
/// - `GET /stocks/ref-price?symbols=..` - Reference price only
/// - `GET /stocks/open-price?symbols=..` - Open price only
pub fn quote_routes(state: Arc<QuoteApiState>) -> Router {
    let guarded_quotes = post(handlers::get_combined_quotes).route_layer(
        middleware::from_fn_with_state(state.clone(), require_access_token),
    );

    Router::new()
        .route("/stocks/quotes", guarded_quotes)
        .route("/stocks/ref-price", get(handlers::get_reference_price))
        .route("/stocks/open-price", get(handlers::get_opening_price))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::auth::ACCESS_TOKEN_HEADER;
    use crate::testing::CountingClient;
    use axum::body::Body;
    use axum::http::{header, Method, Request, StatusCode};
    use observability::QuoteMetrics;
    use price_board::{ColumnKey, PriceBoardError, StaticPriceBoard};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    const TOKEN: &str = "test-secret";

    fn board() -> StaticPriceBoard {
        StaticPriceBoard::new()
            .with_quote("VCB", 41000, 41200)
            .with_quote("ACB", 24000, 24100)
    }

    fn app(client: Arc<CountingClient>) -> Router {
        let state = QuoteApiState::new(client, TOKEN, QuoteMetrics::new("test"));
        quote_routes(Arc::new(state))
    }

    fn quotes_request(token: Option<&str>, body: Value) -> Request<Body> {
        let mut builder = Request::builder()
            .method(Method::POST)
            .uri("/stocks/quotes")
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(token) = token {
            builder = builder.header(ACCESS_TOKEN_HEADER, token);
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_quotes_with_valid_token() {
        let client = Arc::new(CountingClient::new(board()));
        let (status, body) = send(
            app(client.clone()),
            quotes_request(Some(TOKEN), json!({"symbols": ["vcb", "acb"]})),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!([
                {"symbol": "VCB", "ref_price": 41000, "open_price": 41200},
                {"symbol": "ACB", "ref_price": 24000, "open_price": 24100}
            ])
        );
        assert_eq!(client.last_symbols(), vec!["VCB", "ACB"]);
    }

    #[tokio::test]
    async fn test_quotes_rejects_bad_or_missing_token() {
        for token in [None, Some("wrong"), Some("")] {
            let client = Arc::new(CountingClient::new(board()));
            let (status, body) = send(
                app(client.clone()),
                quotes_request(token, json!({"symbols": ["VCB"]})),
            )
            .await;

            assert_eq!(status, StatusCode::FORBIDDEN);
            assert!(body["detail"].as_str().unwrap().contains(ACCESS_TOKEN_HEADER));
            assert_eq!(client.calls(), 0);
        }
    }

    #[tokio::test]
    async fn test_quotes_blank_symbols_is_bad_request() {
        let client = Arc::new(CountingClient::new(board()));
        let (status, body) = send(
            app(client.clone()),
            quotes_request(Some(TOKEN), json!({"symbols": ["  ", ""]})),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["detail"], "Please provide at least one stock symbol.");
        assert_eq!(client.calls(), 0);
    }

    #[tokio::test]
    async fn test_quotes_schema_change() {
        let client = Arc::new(CountingClient::new(
            board().without_column(&ColumnKey::ref_price()),
        ));
        let (status, body) = send(
            app(client),
            quotes_request(Some(TOKEN), json!({"symbols": ["VCB"]})),
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body["detail"].as_str().unwrap().contains("has changed"));
    }

    #[tokio::test]
    async fn test_quotes_upstream_failure_hides_raw_text() {
        let client = Arc::new(CountingClient::failing(PriceBoardError::Status {
            status: 503,
            body: "secret upstream diagnostics".into(),
        }));
        let (status, body) = send(
            app(client),
            quotes_request(Some(TOKEN), json!({"symbols": ["VCB"]})),
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body["detail"],
            "An error occurred while processing data: Status"
        );
    }

    #[tokio::test]
    async fn test_ref_price_is_unguarded() {
        let client = Arc::new(CountingClient::new(board()));
        let (status, body) = send(app(client), get_request("/stocks/ref-price?symbols=%20vcb%20,Acb")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!([
                {"symbol": "VCB", "ref_price": 41000},
                {"symbol": "ACB", "ref_price": 24000}
            ])
        );
    }

    #[tokio::test]
    async fn test_open_price_duplicates_pass_through() {
        let client = Arc::new(CountingClient::new(board()));
        let (status, body) = send(
            app(client.clone()),
            get_request("/stocks/open-price?symbols=VCB,VCB"),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 2);
        assert_eq!(client.last_symbols(), vec!["VCB", "VCB"]);
    }

    #[tokio::test]
    async fn test_open_price_missing_column() {
        let client = Arc::new(CountingClient::new(
            board().without_column(&ColumnKey::open_price()),
        ));
        let (status, body) = send(app(client), get_request("/stocks/open-price?symbols=VCB")).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body["detail"],
            "Column ('match', 'open_price') does not exist in the data. The upstream schema may have changed."
        );
    }

    #[tokio::test]
    async fn test_split_endpoints_reject_empty_lists() {
        for uri in [
            "/stocks/ref-price?symbols=",
            "/stocks/ref-price?symbols=%20,%20",
            "/stocks/open-price",
        ] {
            let client = Arc::new(CountingClient::new(board()));
            let (status, _) = send(app(client.clone()), get_request(uri)).await;

            assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
            assert_eq!(client.calls(), 0);
        }
    }

    fn raw_quotes_request(token: &str, content_type: Option<&str>, body: &str) -> Request<Body> {
        let mut builder = Request::builder()
            .method(Method::POST)
            .uri("/stocks/quotes")
            .header(ACCESS_TOKEN_HEADER, token);
        if let Some(content_type) = content_type {
            builder = builder.header(header::CONTENT_TYPE, content_type);
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    #[tokio::test]
    async fn test_quotes_undecodable_body_returns_detail() {
        for (content_type, body) in [
            (Some("application/json"), "{\"symbols\": [\"VCB\""),
            (Some("application/json"), "{\"tickers\": [\"VCB\"]}"),
            (Some("application/json"), ""),
            (None, "{\"symbols\": [\"VCB\"]}"),
        ] {
            let client = Arc::new(CountingClient::new(board()));
            let (status, body) =
                send(app(client.clone()), raw_quotes_request(TOKEN, content_type, body)).await;

            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert!(body["detail"].as_str().unwrap().starts_with("Invalid request: "));
            assert_eq!(client.calls(), 0);
        }
    }

    #[tokio::test]
    async fn test_token_checked_before_body() {
        let client = Arc::new(CountingClient::new(board()));
        let (status, _) = send(
            app(client),
            raw_quotes_request("wrong", Some("application/json"), "not json"),
        )
        .await;

        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_empty_upstream_response_is_empty_list() {
        let table = price_board::vci::decode_price_board(json!([])).unwrap();

        let client = Arc::new(CountingClient::with_table(table.clone()));
        let (status, body) = send(
            app(client),
            quotes_request(Some(TOKEN), json!({"symbols": ["VCBX"]})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([]));

        let client = Arc::new(CountingClient::with_table(table));
        let (status, body) = send(app(client), get_request("/stocks/open-price?symbols=VCBX")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([]));
    }
}
