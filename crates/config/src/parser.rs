use crate::*;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing::{debug, info, instrument};

#[instrument(skip(path))]
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<GatewayConfig> {
    let path = path.as_ref();
    info!("Loading configuration from: {:?}", path);

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    debug!("Config file content length: {} bytes", content.len());

    parse_config(&content)
}

/// Parse YAML text after environment variable substitution.
pub fn parse_config(content: &str) -> Result<GatewayConfig> {
    let substituted = substitution::substitute_env_vars(content)?;

    let config: GatewayConfig = serde_yaml::from_str(&substituted)
        .with_context(|| "Failed to parse YAML configuration")?;

    info!(
        service = %config.service.name,
        upstream = config.upstream.source.as_str(),
        "Configuration loaded successfully"
    );
    Ok(config)
}

/// Load `path` if it exists, otherwise start from built-in defaults.
pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<GatewayConfig> {
    let path = path.as_ref();
    if path.exists() {
        load_config(path)
    } else {
        info!("No config file at {:?}, using defaults", path);
        Ok(GatewayConfig::default())
    }
}

#[instrument]
pub fn generate_default_config() -> GatewayConfig {
    let mut config = GatewayConfig::default();
    config.auth.secret_token = Some(format!("${{{}}}", SECRET_TOKEN_ENV));
    config.upstream.timeout_secs = Some(10);
    config
}

pub fn save_config<P: AsRef<Path> + std::fmt::Debug>(config: &GatewayConfig, path: P) -> Result<()> {
    let path = path.as_ref();
    info!("Saving configuration to: {:?}", path);

    let yaml = serde_yaml::to_string(config)
        .with_context(|| "Failed to serialize configuration to YAML")?;

    fs::write(path, yaml)
        .with_context(|| format!("Failed to write config file: {:?}", path))?;

    info!("Configuration saved successfully");
    Ok(())
}
