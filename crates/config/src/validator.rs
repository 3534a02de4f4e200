use crate::*;
use thiserror::Error;
use url::Url;

#[derive(Error, Debug, Clone)]
pub enum ValidationError {
    #[error("Service name is required")]
    MissingServiceName,

    #[error("Server host is required")]
    MissingHost,

    #[error("Server port cannot be 0")]
    InvalidPort,

    #[error("{var} is not set and dev mode is off. Set {var} or enable auth.dev_mode for local use")]
    MissingSecret { var: String },

    #[error("Invalid upstream base_url '{url}': {message}")]
    InvalidBaseUrl { url: String, message: String },

    #[error("upstream.timeout_secs must be a positive integer")]
    InvalidTimeout,

    #[error("Static price for '{symbol}': {message}")]
    InvalidStaticPrice { symbol: String, message: String },

    #[error("Invalid log format: {0}. Must be one of: pretty, json, compact")]
    InvalidLogFormat(String),

    #[error("metrics_port {0} collides with the HTTP server port")]
    MetricsPortConflict(u16),
}

#[derive(Debug, Clone)]
pub struct ValidationWarning {
    pub field: String,
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct DefaultApplied {
    pub field: String,
    pub value: String,
}

#[derive(Debug, Clone)]
pub struct ValidationReport {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
    pub defaults_applied: Vec<DefaultApplied>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self {
            errors: Vec::new(),
            warnings: Vec::new(),
            defaults_applied: Vec::new(),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, field: &str, message: &str) {
        self.warnings.push(ValidationWarning {
            field: field.to_string(),
            message: message.to_string(),
        });
    }

    pub fn add_default(&mut self, field: &str, value: &str) {
        self.defaults_applied.push(DefaultApplied {
            field: field.to_string(),
            value: value.to_string(),
        });
    }
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self::new()
    }
}

/// Secrets shorter than this draw a warning.
const MIN_SECRET_LEN: usize = 16;

pub fn validate_config(config: &GatewayConfig) -> ValidationReport {
    validate_config_with_env(config, std::env::var(SECRET_TOKEN_ENV).ok())
}

/// Same as [`validate_config`] with an explicit `API_SECRET_TOKEN` value.
pub fn validate_config_with_env(
    config: &GatewayConfig,
    secret_env: Option<String>,
) -> ValidationReport {
    let mut report = ValidationReport::new();

    if config.service.name.trim().is_empty() {
        report.add_error(ValidationError::MissingServiceName);
    }
    validate_server(&config.server, &mut report);
    validate_auth(&config.auth, secret_env, &mut report);
    validate_upstream(&config.upstream, &mut report);
    validate_observability(&config.observability, config.server.port, &mut report);

    report
}

fn validate_server(server: &HttpConfig, report: &mut ValidationReport) {
    if server.host.trim().is_empty() {
        report.add_error(ValidationError::MissingHost);
    }
    if server.port == 0 {
        report.add_error(ValidationError::InvalidPort);
    }
}

fn validate_auth(auth: &AuthConfig, secret_env: Option<String>, report: &mut ValidationReport) {
    if !auth.header.eq_ignore_ascii_case(ACCESS_TOKEN_HEADER) {
        report.add_warning(
            "auth.header",
            &format!("custom headers are not supported; clients must send {}", ACCESS_TOKEN_HEADER),
        );
    }

    if let Some(token) = &auth.secret_token {
        if has_unresolved_env_vars(token) {
            report.add_warning(
                "auth.secret_token",
                "contains an unresolved environment variable and will be ignored",
            );
        }
    }

    match resolve_secret_with(auth, secret_env) {
        Ok(secret) if secret.is_insecure() => {
            report.add_warning(
                "auth.dev_mode",
                "no secret configured; the well-known fallback token is accepted. Never use this in production",
            );
            report.add_default("auth.secret_token", INSECURE_FALLBACK_TOKEN);
        }
        Ok(secret) => {
            if secret.token.len() < MIN_SECRET_LEN {
                report.add_warning(
                    "auth.secret_token",
                    &format!(
                        "secret from {} is shorter than {} characters",
                        secret.source, MIN_SECRET_LEN
                    ),
                );
            }
        }
        Err(e) => report.add_error(e),
    }
}

fn validate_upstream(upstream: &UpstreamConfig, report: &mut ValidationReport) {
    match upstream.timeout_secs {
        Some(0) => report.add_error(ValidationError::InvalidTimeout),
        Some(_) => {}
        None if upstream.source == UpstreamSource::Vci => {
            report.add_default("upstream.timeout_secs", "none (requests wait indefinitely)");
        }
        None => {}
    }

    match upstream.source {
        UpstreamSource::Vci => validate_base_url(&upstream.base_url, report),
        UpstreamSource::Static => {
            if upstream.static_prices.is_empty() {
                report.add_warning(
                    "upstream.static_prices",
                    "static source has no prices; every request will return an empty list",
                );
            }
        }
    }

    for (symbol, quote) in &upstream.static_prices {
        if symbol.trim().is_empty() {
            report.add_error(ValidationError::InvalidStaticPrice {
                symbol: symbol.clone(),
                message: "symbol must not be blank".to_string(),
            });
        } else if symbol.trim() != symbol.trim().to_uppercase() {
            report.add_warning(
                &format!("upstream.static_prices.{}", symbol),
                "symbols are matched after uppercasing; use uppercase keys",
            );
        }

        for (field, price) in [("ref_price", &quote.ref_price), ("open_price", &quote.open_price)] {
            if let Some(value) = price.as_ref().and_then(|n| n.as_f64()) {
                if value < 0.0 {
                    report.add_error(ValidationError::InvalidStaticPrice {
                        symbol: symbol.clone(),
                        message: format!("{} must not be negative", field),
                    });
                }
            }
        }
    }
}

fn validate_base_url(base_url: &str, report: &mut ValidationReport) {
    match Url::parse(base_url) {
        Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {
            if url.scheme() == "http" {
                report.add_warning("upstream.base_url", "upstream is reached over plain http");
            }
        }
        Ok(url) => report.add_error(ValidationError::InvalidBaseUrl {
            url: base_url.to_string(),
            message: format!("unsupported scheme '{}'", url.scheme()),
        }),
        Err(e) => report.add_error(ValidationError::InvalidBaseUrl {
            url: base_url.to_string(),
            message: e.to_string(),
        }),
    }
}

fn validate_observability(
    observability: &ObservabilityConfig,
    http_port: u16,
    report: &mut ValidationReport,
) {
    if !LOG_FORMATS.contains(&observability.log_format.to_lowercase().as_str()) {
        report.add_error(ValidationError::InvalidLogFormat(
            observability.log_format.clone(),
        ));
    }

    match observability.metrics_port {
        Some(port) if port == http_port => {
            report.add_error(ValidationError::MetricsPortConflict(port))
        }
        Some(_) => {}
        None => report.add_default("observability.metrics_port", "disabled"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn secured() -> GatewayConfig {
        let mut config = GatewayConfig::default();
        config.auth.secret_token = Some("a-long-enough-shared-secret".to_string());
        config
    }

    #[test]
    fn test_default_config_requires_secret() {
        let report = validate_config_with_env(&GatewayConfig::default(), None);

        assert!(!report.is_valid());
        assert_matches!(report.errors[0], ValidationError::MissingSecret { .. });
    }

    #[test]
    fn test_secret_from_env_is_valid() {
        let report = validate_config_with_env(
            &GatewayConfig::default(),
            Some("a-long-enough-shared-secret".into()),
        );

        assert!(report.is_valid(), "{:?}", report.errors);
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn test_dev_mode_warns_and_records_fallback() {
        let mut config = GatewayConfig::default();
        config.auth.dev_mode = true;

        let report = validate_config_with_env(&config, None);

        assert!(report.is_valid());
        assert!(report.warnings.iter().any(|w| w.field == "auth.dev_mode"));
        assert!(report
            .defaults_applied
            .iter()
            .any(|d| d.field == "auth.secret_token" && d.value == INSECURE_FALLBACK_TOKEN));
    }

    #[test]
    fn test_short_secret_warns() {
        let report = validate_config_with_env(&GatewayConfig::default(), Some("short".into()));

        assert!(report.is_valid());
        assert!(report.warnings.iter().any(|w| w.message.contains("shorter")));
    }

    #[test]
    fn test_custom_header_warns() {
        let mut config = secured();
        config.auth.header = "Authorization".to_string();

        let report = validate_config_with_env(&config, None);

        assert!(report.is_valid());
        assert!(report.warnings.iter().any(|w| w.field == "auth.header"));
    }

    #[test]
    fn test_bad_base_url() {
        let mut config = secured();
        config.upstream.base_url = "not a url".to_string();
        let report = validate_config_with_env(&config, None);
        assert_matches!(report.errors[0], ValidationError::InvalidBaseUrl { .. });

        config.upstream.base_url = "ftp://trading.example".to_string();
        let report = validate_config_with_env(&config, None);
        assert_matches!(report.errors[0], ValidationError::InvalidBaseUrl { .. });
    }

    #[test]
    fn test_base_url_ignored_for_static_source() {
        let mut config = secured();
        config.upstream.source = UpstreamSource::Static;
        config.upstream.base_url = "not a url".to_string();

        let report = validate_config_with_env(&config, None);

        assert!(report.is_valid());
        assert!(report
            .warnings
            .iter()
            .any(|w| w.field == "upstream.static_prices" && w.message.contains("empty list")));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let mut config = secured();
        config.upstream.timeout_secs = Some(0);
        let report = validate_config_with_env(&config, None);
        assert_matches!(report.errors[0], ValidationError::InvalidTimeout);
    }

    #[test]
    fn test_negative_static_price_rejected() {
        let mut config = secured();
        config.upstream.static_prices.insert(
            "VCB".to_string(),
            StaticQuote {
                ref_price: Some(serde_json::Number::from(-1)),
                open_price: None,
            },
        );

        let report = validate_config_with_env(&config, None);

        assert_matches!(
            &report.errors[0],
            ValidationError::InvalidStaticPrice { symbol, .. } if symbol == "VCB"
        );
    }

    #[test]
    fn test_observability_checks() {
        let mut config = secured();
        config.observability.log_format = "xml".to_string();
        config.observability.metrics_port = Some(config.server.port);

        let report = validate_config_with_env(&config, None);

        assert_eq!(report.errors.len(), 2);
        assert_matches!(report.errors[0], ValidationError::InvalidLogFormat(_));
        assert_matches!(report.errors[1], ValidationError::MetricsPortConflict(8000));
    }
}
