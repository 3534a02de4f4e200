//! HTTP server infrastructure for QuoteGateway
//!
//! Servers implement the [`Server`] trait; [`ServerExt`] adds `spawn()` and
//! `run_with_ctrl_c()`. Shutdown is coordinated with a `CancellationToken`
//! from `tokio_util`.
//!
//! # Quick Start
//!
//! ```ignore
//! use server::{HttpServer, ServerConfig, ServerExt};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let server = HttpServer::with_health(ServerConfig::default(), "quotegw", api_router);
//!     server.run_with_ctrl_c().await?;
//!     Ok(())
//! }
//! ```
//!
//! # Modules
//!
//! - [`config`] - Bind configuration
//! - [`traits`] - `Server` and `ServerExt` traits
//! - [`http`] - HTTP server using Axum
//! - [`health`] - Health check endpoint
//! - [`shutdown`] - Graceful shutdown utilities
//! - [`port_validator`] - Startup port checks

pub mod config;
pub mod error;
pub mod health;
pub mod http;
pub mod port_validator;
pub mod shutdown;
pub mod traits;

pub use config::{ServerConfig, DEFAULT_HOST, DEFAULT_HTTP_PORT};
pub use error::{Result, ServerError};
pub use health::{health_routes, HealthState, HealthStatus};
pub use http::HttpServer;
pub use port_validator::{validate_port_available, validate_port_range};
pub use shutdown::ShutdownController;
pub use traits::{Server, ServerExt};
