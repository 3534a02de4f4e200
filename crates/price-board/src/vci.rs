//! HTTP price board client for the VCI (Vietcap) trading API.
//!
//! The provider answers `POST /api/price/symbols/getList` with a JSON array,
//! one element per known symbol:
//!
//! ```json
//! [{
//!   "listingInfo": { "symbol": "VCB", "refPrice": 41000, "ceiling": 43850 },
//!   "bidAsk":      { "bidPrices": [...], "askPrices": [...] },
//!   "matchPrice":  { "matchPrice": 41300, "openPrice": 41200 }
//! }]
//! ```
//!
//! Each nested object becomes a column section (`listing`, `bid_ask`,
//! `match`) and each field is renamed to snake_case, so `refPrice` lands in
//! `('listing', 'ref_price')`.

use async_trait::async_trait;
use reqwest::header::{ACCEPT, ORIGIN, REFERER, USER_AGENT};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

use crate::client::PriceBoardClient;
use crate::error::{PriceBoardError, PriceBoardResult};
use crate::table::{ColumnKey, PriceTable, BID_ASK, LISTING, MATCH};

/// Public VCI trading endpoint.
pub const DEFAULT_BASE_URL: &str = "https://trading.vietcap.com.vn";

const PRICE_BOARD_PATH: &str = "/api/price/symbols/getList";
const BROWSER_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36";

/// HTTP-based VCI price board client
pub struct VciPriceBoardClient {
    client: Client,
    base_url: String,
}

impl VciPriceBoardClient {
    /// Create a new client.
    ///
    /// `timeout` of `None` leaves requests unbounded; a hung provider then
    /// blocks the calling request until the connection drops.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> PriceBoardResult<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl PriceBoardClient for VciPriceBoardClient {
    fn source(&self) -> &str {
        "VCI"
    }

    async fn price_board(&self, symbols: &[String]) -> PriceBoardResult<PriceTable> {
        let url = format!("{}{}", self.base_url, PRICE_BOARD_PATH);
        debug!(%url, count = symbols.len(), "Requesting price board");

        let response = self
            .client
            .post(&url)
            .header(ACCEPT, "application/json, text/plain, */*")
            .header(ORIGIN, DEFAULT_BASE_URL)
            .header(REFERER, format!("{}/", DEFAULT_BASE_URL))
            .header(USER_AGENT, BROWSER_USER_AGENT)
            .json(&serde_json::json!({ "symbols": symbols }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PriceBoardError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body: Value = response.json().await?;
        decode_price_board(body)
    }
}

/// Turn a VCI price board response body into a [`PriceTable`].
pub fn decode_price_board(body: Value) -> PriceBoardResult<PriceTable> {
    let Value::Array(items) = body else {
        return Err(PriceBoardError::Decode(format!(
            "expected a JSON array, got {}",
            json_type(&body)
        )));
    };

    let mut table = PriceTable::new();
    for item in items {
        let Value::Object(groups) = item else {
            continue;
        };

        let mut cells = Vec::new();
        for (group, fields) in groups {
            let Value::Object(fields) = fields else {
                continue;
            };
            let section = section_name(&group);
            for (field, value) in fields {
                cells.push((ColumnKey::new(section.clone(), to_snake_case(&field)), value));
            }
        }
        table.push_row(cells);
    }

    Ok(table)
}

fn section_name(group: &str) -> String {
    match group {
        "listingInfo" => LISTING.to_string(),
        "bidAsk" => BID_ASK.to_string(),
        "matchPrice" => MATCH.to_string(),
        other => to_snake_case(other),
    }
}

fn to_snake_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for (i, ch) in name.chars().enumerate() {
        if ch.is_ascii_uppercase() {
            if i > 0 {
                out.push('_');
            }
            out.push(ch.to_ascii_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
