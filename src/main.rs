//! Gateway entry point.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;

use legacy_gateway::config::{self, GatewayConfig};
use legacy_gateway::crypto::FieldCipher;
use legacy_gateway::gateway::Gateway;
use legacy_gateway::http::HttpServer;
use legacy_gateway::legacy::InMemoryLegacyStore;
use legacy_gateway::observability;

#[derive(Parser, Debug)]
#[command(
    name = "legacy-gateway",
    about = "JSON/HTTP gateway for the XML legacy customer store"
)]
struct Cli {
    /// Path to the TOML configuration file. Defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => config::load_config(path)?,
        None => GatewayConfig::default(),
    };

    observability::logging::init(&config.observability.log_level);

    tracing::info!(
        bind_address = %config.listener.bind_address,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => observability::metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let cipher = FieldCipher::from_passphrase(&config.crypto.passphrase, &config.crypto.salt)?;
    let store = Arc::new(InMemoryLegacyStore::new());
    let gateway = Gateway::new(cipher, store);

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let server = HttpServer::new(config, gateway);
    server.run(listener).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
