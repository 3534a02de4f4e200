//! Configuration for QuoteGateway.
//!
//! The config file is YAML with `${VAR}` placeholders substituted from the
//! environment before parsing. Every section is optional and falls back to
//! the values in [`defaults`].

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub mod defaults;
pub mod parser;
pub mod secret;
pub mod substitution;
pub mod validator;

pub use defaults::*;
pub use parser::*;
pub use secret::*;
pub use substitution::*;
pub use validator::*;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct GatewayConfig {
    #[serde(default)]
    pub service: ServiceConfig,
    #[serde(default)]
    pub server: HttpConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub upstream: UpstreamConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServiceConfig {
    #[serde(default = "default_service_name")]
    pub name: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            name: default_service_name(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HttpConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Shared-secret settings for the protected endpoint.
///
/// `API_SECRET_TOKEN` in the environment takes precedence over
/// `secret_token`. With neither set, the insecure fallback token is only
/// accepted when `dev_mode` is on.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    /// Informational; the guard always reads `X-Access-Token`.
    #[serde(default = "default_auth_header")]
    pub header: String,
    #[serde(default)]
    pub secret_token: Option<String>,
    #[serde(default)]
    pub dev_mode: bool,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            header: default_auth_header(),
            secret_token: None,
            dev_mode: false,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UpstreamSource {
    /// VCI trading API over HTTP
    #[default]
    Vci,
    /// Prices from `upstream.static_prices`
    Static,
}

impl UpstreamSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            UpstreamSource::Vci => "vci",
            UpstreamSource::Static => "static",
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UpstreamConfig {
    #[serde(default)]
    pub source: UpstreamSource,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request timeout. Unset means no timeout.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    /// Symbol to prices, used when `source` is `static`.
    #[serde(default)]
    pub static_prices: BTreeMap<String, StaticQuote>,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            source: UpstreamSource::default(),
            base_url: default_base_url(),
            timeout_secs: None,
            static_prices: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct StaticQuote {
    #[serde(default)]
    pub ref_price: Option<serde_json::Number>,
    #[serde(default)]
    pub open_price: Option<serde_json::Number>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ObservabilityConfig {
    #[serde(default = "default_log_format")]
    pub log_format: String,
    #[serde(default)]
    pub metrics_port: Option<u16>,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_format: default_log_format(),
            metrics_port: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config: GatewayConfig = serde_yaml::from_str("{}").unwrap();

        assert_eq!(config.service.name, "quotegw");
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.upstream.source, UpstreamSource::Vci);
        assert_eq!(config.upstream.base_url, "https://trading.vietcap.com.vn");
        assert!(!config.auth.dev_mode);
        assert_eq!(config.observability.log_format, "pretty");
    }

    #[test]
    fn test_static_prices_section() {
        let yaml = r#"
upstream:
  source: static
  static_prices:
    VCB: { ref_price: 41000, open_price: 41200 }
    HPG: { ref_price: 27350.5 }
"#;
        let config: GatewayConfig = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(config.upstream.source, UpstreamSource::Static);
        let vcb = &config.upstream.static_prices["VCB"];
        assert_eq!(vcb.ref_price, Some(41000.into()));
        assert_eq!(vcb.open_price, Some(41200.into()));
        assert!(config.upstream.static_prices["HPG"].open_price.is_none());
    }
}
