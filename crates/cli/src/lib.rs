use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub const DEFAULT_CONFIG_PATH: &str = "quotegw.yaml";

#[derive(Parser, Debug)]
#[command(name = "quotegw")]
#[command(about = "QuoteGateway - HTTP facade over a stock price board")]
#[command(version)]
pub struct Cli {
    /// Log output format: pretty, json or compact
    #[arg(long, global = true, env = "QUOTEGW_LOG_FORMAT")]
    pub log_format: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP service
    Start {
        /// Path to the configuration file (defaults apply if it is missing)
        #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
        config: PathBuf,

        /// Override bind host
        #[arg(long)]
        host: Option<String>,

        /// Override HTTP port
        #[arg(short, long)]
        port: Option<u16>,

        /// Accept the insecure fallback token when API_SECRET_TOKEN is unset
        #[arg(long)]
        dev: bool,
    },

    /// Validate configuration without starting the service
    Validate {
        /// Path to the configuration file
        #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
        config: PathBuf,
    },

    /// Write a configuration file with all defaults
    Init {
        /// Output path for the new configuration file
        #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
        output: PathBuf,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_defaults() {
        let cli = Cli::try_parse_from(["quotegw", "start"]).unwrap();

        match cli.command {
            Commands::Start {
                config,
                host,
                port,
                dev,
            } => {
                assert_eq!(config, PathBuf::from(DEFAULT_CONFIG_PATH));
                assert!(host.is_none());
                assert!(port.is_none());
                assert!(!dev);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_start_overrides() {
        let cli = Cli::try_parse_from([
            "quotegw",
            "start",
            "--config",
            "etc/gw.yaml",
            "--host",
            "127.0.0.1",
            "-p",
            "9000",
            "--dev",
            "--log-format",
            "json",
        ])
        .unwrap();

        assert_eq!(cli.log_format.as_deref(), Some("json"));
        match cli.command {
            Commands::Start {
                config,
                host,
                port,
                dev,
            } => {
                assert_eq!(config, PathBuf::from("etc/gw.yaml"));
                assert_eq!(host.as_deref(), Some("127.0.0.1"));
                assert_eq!(port, Some(9000));
                assert!(dev);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_subcommand_required() {
        assert!(Cli::try_parse_from(["quotegw"]).is_err());
    }

    #[test]
    fn test_init_output() {
        let cli = Cli::try_parse_from(["quotegw", "init", "-o", "/tmp/gw.yaml"]).unwrap();
        assert!(matches!(cli.command, Commands::Init { output } if output == PathBuf::from("/tmp/gw.yaml")));
    }
}
