//! Observability infrastructure for QuoteGateway
//!
//! This crate provides:
//! - Structured logging via tracing
//! - Prometheus metrics
//! - Quote endpoint metric helpers
//!
//! # Quick Start
//!
//! ```ignore
//! use observability::{init_logging, LogFormat};
//!
//! init_logging("quotegw", LogFormat::Pretty)?;
//!
//! // Optional
//! observability::init_metrics(9100)?;
//! ```

pub mod logging;
pub mod metrics;

pub use logging::{init_logging, LogFormat};
pub use metrics::{init_metrics, QuoteMetrics};
