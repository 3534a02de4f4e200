pub const DEFAULT_SERVICE_NAME: &str = "quotegw";
pub const DEFAULT_BASE_URL: &str = "https://trading.vietcap.com.vn";

pub fn default_service_name() -> String {
    DEFAULT_SERVICE_NAME.to_string()
}

pub const ACCESS_TOKEN_HEADER: &str = "X-Access-Token";

pub fn default_auth_header() -> String {
    ACCESS_TOKEN_HEADER.to_string()
}

pub fn default_host() -> String {
    "0.0.0.0".to_string()
}

pub fn default_port() -> u16 {
    8000
}

pub fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

pub fn default_log_format() -> String {
    "pretty".to_string()
}

pub const LOG_FORMATS: [&str; 3] = ["pretty", "json", "compact"];
