//! Port validation utilities
//!
//! Checking a port before binding is racy: another process can take it in
//! between. The checks give early feedback at startup; the bind in
//! [`HttpServer::run`](crate::HttpServer) remains the source of truth.

use tokio::net::TcpListener;
use tracing::{debug, error, info, warn};

use crate::config::ServerConfig;
use crate::error::{Result, ServerError};

/// Check that the configured HTTP port can be bound right now.
pub async fn validate_port_available(config: &ServerConfig) -> Result<()> {
    validate_port_range(config.port)?;

    let addr = format!("{}:{}", config.host, config.port);
    debug!(%addr, "Checking HTTP port");

    match TcpListener::bind(&addr).await {
        Ok(listener) => {
            let local_addr = listener
                .local_addr()
                .map_err(|e| ServerError::bind(addr.clone(), e))?;
            drop(listener);

            info!(%local_addr, "HTTP port is available");
            Ok(())
        }
        Err(e) => {
            error!(port = config.port, %e, "HTTP port is NOT available");
            Err(ServerError::port_in_use(config.port, e.to_string()))
        }
    }
}

/// Reject port 0 and warn on privileged ports.
pub fn validate_port_range(port: u16) -> Result<()> {
    if port == 0 {
        return Err(ServerError::ConfigError(
            "Port cannot be 0 (ephemeral port assignment not supported for explicit binding)"
                .to_string(),
        ));
    }
    if port < 1024 {
        warn!(port, "Privileged port (requires root/admin privileges)");
    }
    Ok(())
}
