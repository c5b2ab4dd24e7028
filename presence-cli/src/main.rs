//! Presence CLI
//!
//! Runs the presence registry server and inspects its configuration.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::*;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use presence_api::{ApiConfig, ApiServer};
use presence_core::constants::DEFAULT_PORT;
use presence_core::types::RegistryConfig;

/// Presence - in-memory presence registry
#[derive(Parser)]
#[command(name = "presence")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the API server
    Serve {
        /// Port to listen on
        #[arg(short, long, env = "PORT", default_value_t = DEFAULT_PORT)]
        port: u16,
        /// Bind address
        #[arg(short, long, default_value = "0.0.0.0")]
        bind: String,
        #[command(flatten)]
        expiry: ExpiryArgs,
    },

    /// Print the effective configuration
    Config {
        #[command(flatten)]
        expiry: ExpiryArgs,
    },
}

/// Overrides for the values read from the environment.
#[derive(Args)]
struct ExpiryArgs {
    /// Seconds without a refresh before an entry expires
    #[arg(long)]
    timeout_secs: Option<u64>,
    /// Seconds between two sweeps
    #[arg(long)]
    sweep_interval_secs: Option<u64>,
}

impl ExpiryArgs {
    /// Loads the environment configuration and applies the overrides.
    fn resolve(&self) -> Result<ApiConfig> {
        let mut config = ApiConfig::from_env().context("Invalid environment configuration")?;

        let timeout = self
            .timeout_secs
            .map(Duration::from_secs)
            .unwrap_or(config.registry.timeout);
        let sweep_interval = self
            .sweep_interval_secs
            .map(Duration::from_secs)
            .unwrap_or(config.registry.sweep_interval);

        config.registry =
            RegistryConfig::new(timeout, sweep_interval).context("Invalid expiry settings")?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        "presence=debug,info"
    } else {
        "presence=info,warn"
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with(cli.json.then(|| tracing_subscriber::fmt::layer().json()))
        .with((!cli.json).then(tracing_subscriber::fmt::layer))
        .init();

    match cli.command {
        Commands::Serve { port, bind, expiry } => cmd_serve(port, &bind, &expiry).await,
        Commands::Config { expiry } => cmd_config(&expiry),
    }
}

/// Run API server
async fn cmd_serve(port: u16, bind: &str, expiry: &ExpiryArgs) -> Result<()> {
    let config = expiry.resolve()?;
    let addr: SocketAddr = format!("{}:{}", bind, port)
        .parse()
        .with_context(|| format!("Invalid bind address {bind}:{port}"))?;

    println!("{}", "🚀 Starting presence server...".cyan().bold());
    println!("   {} http://{}", "Listening on:".green(), addr);
    println!("   {} http://{}/health", "Health check:".dimmed(), addr);
    println!("\n   Press Ctrl+C to stop.\n");

    info!(
        timeout_secs = config.registry.timeout.as_secs(),
        sweep_interval_secs = config.registry.sweep_interval.as_secs(),
        "Expiry configured"
    );

    let server = ApiServer::new(config);
    server.run(addr).await?;

    info!("Server stopped");
    Ok(())
}

/// Print effective configuration
fn cmd_config(expiry: &ExpiryArgs) -> Result<()> {
    let config = expiry.resolve()?;

    let json = serde_json::json!({
        "timeoutSecs": config.registry.timeout.as_secs(),
        "sweepIntervalSecs": config.registry.sweep_interval.as_secs(),
    });
    println!("{}", serde_json::to_string_pretty(&json)?);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_serve_args() {
        let cli = Cli::try_parse_from([
            "presence",
            "serve",
            "--port",
            "4000",
            "--timeout-secs",
            "30",
        ])
        .unwrap();

        match cli.command {
            Commands::Serve { port, bind, expiry } => {
                assert_eq!(port, 4000);
                assert_eq!(bind, "0.0.0.0");
                assert_eq!(expiry.timeout_secs, Some(30));
                assert_eq!(expiry.sweep_interval_secs, None);
            }
            Commands::Config { .. } => panic!("expected serve"),
        }
    }

    #[test]
    fn test_zero_override_rejected() {
        let expiry = ExpiryArgs {
            timeout_secs: Some(0),
            sweep_interval_secs: None,
        };
        assert!(expiry.resolve().is_err());
    }
}
