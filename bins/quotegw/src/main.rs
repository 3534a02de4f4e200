//! QuoteGateway CLI and Server Binary
//!
//! Entry point for the `quotegw` command: initialize a config file,
//! validate one, or start the HTTP service.

use anyhow::{Context, Result};
use cli::{Cli, Commands};
use config::{
    generate_default_config, load_config, load_or_default, resolve_secret, save_config,
    validate_config, GatewayConfig, UpstreamConfig, UpstreamSource, ValidationReport,
};
use observability::{init_logging, init_metrics, LogFormat, QuoteMetrics};
use price_board::{PriceBoardClient, StaticPriceBoard, VciPriceBoardClient};
use quotes::api::{quote_routes, QuoteApiState};
use serde_json::Value;
use server::{validate_port_available, HttpServer, ServerConfig, ServerExt};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse_args();

    match cli.command {
        Commands::Start {
            config,
            host,
            port,
            dev,
        } => {
            let mut gateway = load_or_default(&config)?;
            let format = log_format(cli.log_format.as_deref(), Some(&gateway))?;
            init_logging(&gateway.service.name, format)?;
            info!(path = ?config, "Executing 'start' command");

            if let Some(host) = host {
                gateway.server.host = host;
            }
            if let Some(port) = port {
                gateway.server.port = port;
            }
            if dev {
                gateway.auth.dev_mode = true;
            }
            start_service(gateway).await
        }
        Commands::Validate { config } => {
            init_logging("quotegw", log_format(cli.log_format.as_deref(), None)?)?;
            info!("Executing 'validate' command");
            validate_command(config)
        }
        Commands::Init { output } => {
            init_logging("quotegw", log_format(cli.log_format.as_deref(), None)?)?;
            info!("Executing 'init' command");
            init_command(output)
        }
    }
}

/// The CLI flag wins over the config file; pretty is the fallback.
fn log_format(flag: Option<&str>, config: Option<&GatewayConfig>) -> Result<LogFormat> {
    let raw = flag.or(config.map(|c| c.observability.log_format.as_str()));
    match raw {
        Some(raw) => raw.parse::<LogFormat>().map_err(anyhow::Error::msg),
        None => Ok(LogFormat::default()),
    }
}

fn log_report(report: &ValidationReport) {
    for default in &report.defaults_applied {
        debug!(field = %default.field, value = %default.value, "Default applied");
    }
    for warning in &report.warnings {
        warn!(field = %warning.field, message = %warning.message);
    }
    for err in &report.errors {
        error!("{}", err);
    }
}

async fn start_service(config: GatewayConfig) -> Result<()> {
    let report = validate_config(&config);
    log_report(&report);
    if !report.is_valid() {
        error!(
            error_count = report.errors.len(),
            "Configuration validation failed"
        );
        anyhow::bail!("Cannot start service due to configuration errors");
    }

    let secret = resolve_secret(&config.auth)?;
    info!(source = %secret.source, "Access token configured");

    let client = build_client(&config.upstream)?;
    info!(
        source = client.source(),
        "Price board client ready"
    );

    if let Some(metrics_port) = config.observability.metrics_port {
        init_metrics(metrics_port)?;
    }

    let state = Arc::new(QuoteApiState::new(
        client,
        secret.token,
        QuoteMetrics::new(&config.service.name),
    ));

    let server_config = ServerConfig::new(config.server.host.clone(), config.server.port);
    validate_port_available(&server_config).await?;

    info!(
        service = %config.service.name,
        host = %server_config.host,
        port = server_config.port,
        "Starting service"
    );

    let server = HttpServer::with_health(server_config, &config.service.name, quote_routes(state));
    server.run_with_ctrl_c().await?;

    Ok(())
}

fn build_client(upstream: &UpstreamConfig) -> Result<Arc<dyn PriceBoardClient>> {
    match upstream.source {
        UpstreamSource::Vci => {
            let timeout = upstream.timeout_secs.map(Duration::from_secs);
            let client = VciPriceBoardClient::new(&upstream.base_url, timeout)
                .context("Failed to build VCI price board client")?;
            Ok(Arc::new(client))
        }
        UpstreamSource::Static => {
            let board = upstream
                .static_prices
                .iter()
                .fold(StaticPriceBoard::new(), |board, (symbol, quote)| {
                    board.with_quote(
                        symbol.trim(),
                        price_value(&quote.ref_price),
                        price_value(&quote.open_price),
                    )
                });
            info!(symbols = board.len(), "Serving static prices");
            Ok(Arc::new(board))
        }
    }
}

fn price_value(price: &Option<serde_json::Number>) -> Value {
    price.clone().map(Value::Number).unwrap_or(Value::Null)
}

fn validate_command<P: AsRef<Path>>(config_path: P) -> Result<()> {
    info!(path = ?config_path.as_ref(), "Validating configuration");

    let config = match load_config(&config_path) {
        Ok(c) => c,
        Err(e) => {
            error!(%e, "Failed to load configuration");
            anyhow::bail!(e);
        }
    };

    let report = validate_config(&config);

    println!("\n=== Configuration Validation Report ===\n");

    if !report.defaults_applied.is_empty() {
        println!("Defaults Applied ({}):", report.defaults_applied.len());
        for default in &report.defaults_applied {
            println!("  [info] {} = {}", default.field, default.value);
        }
        println!();
    }

    if !report.warnings.is_empty() {
        println!("Warnings ({}):", report.warnings.len());
        for warning in &report.warnings {
            println!("  [warn] [{}] {}", warning.field, warning.message);
        }
        println!();
    }

    if !report.errors.is_empty() {
        println!("Errors ({}):", report.errors.len());
        for err in &report.errors {
            println!("  [error] {}", err);
        }
        println!();
        anyhow::bail!("Configuration validation failed");
    }

    println!("[ok] Configuration is valid!");
    println!();
    println!("Service: {}", config.service.name);
    println!("Listen: {}:{}", config.server.host, config.server.port);
    println!("Upstream: {}", config.upstream.source.as_str());
    match config.upstream.source {
        UpstreamSource::Vci => println!("Base URL: {}", config.upstream.base_url),
        UpstreamSource::Static => println!(
            "Static symbols: {}",
            config.upstream.static_prices.len()
        ),
    }

    Ok(())
}

fn init_command<P: AsRef<Path>>(output_path: P) -> Result<()> {
    let output_path = output_path.as_ref();
    info!(?output_path, "Initializing new configuration file");

    let config = generate_default_config();

    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {:?}", parent))?;
        }
    }

    save_config(&config, output_path)?;

    println!("[ok] Configuration file created successfully!");
    println!();
    println!("Location: {:?}", output_path);
    println!();
    println!("Next steps:");
    println!("  1. Export API_SECRET_TOKEN with the shared secret for POST /stocks/quotes");
    println!(
        "  2. Run 'quotegw validate --config {:?}' to check configuration",
        output_path
    );
    println!(
        "  3. Run 'quotegw start --config {:?}' to start the service",
        output_path
    );

    Ok(())
}
