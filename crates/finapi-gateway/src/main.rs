//! Finance data gateway - entry point.

use anyhow::Result;
use clap::Parser;
use tracing::info;

/// Authenticated HTTP gateway aggregating third-party financial data.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Configuration file path (can also be set via FINAPI_CONFIG env var)
    #[arg(short, long)]
    config: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize TLS crypto provider (must be before any WS connections)
    finapi_ws::init_crypto();

    let args = Args::parse();

    finapi_telemetry::init_logging()?;

    info!("Starting finance gateway v{}", env!("CARGO_PKG_VERSION"));

    // Config path resolution: CLI arg > FINAPI_CONFIG env var > default
    let config = match args.config {
        Some(path) => {
            info!(config_path = %path, "Loading configuration");
            finapi_gateway::GatewayConfig::from_file(&path)?
        }
        None => finapi_gateway::GatewayConfig::load()?,
    };

    let state = finapi_gateway::AppState::new(config)?;
    finapi_gateway::run_server(state).await?;

    Ok(())
}
