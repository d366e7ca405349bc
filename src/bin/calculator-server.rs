//! Calculator HTTP server entry point.
//!
//! Initializes logging, loads configuration, selects the arithmetic backend
//! and serves JSON requests. The bound port is printed as `PORT:<port>`.

use anyhow::Result;
use clap::Parser;
use tracing::{info, warn};

use mathformer_calc::core::transport::{AppState, HttpTransport};
use mathformer_calc::core::{Config, init_logging};
use mathformer_calc::domains::calculator::{BackendSelection, Calculator};

#[derive(Parser)]
#[command(name = "calculator-server", version)]
#[command(about = "JSON-over-HTTP calculator backed by mathformer")]
struct Args {
    /// Port to listen on (0 lets the OS choose). Unparseable values mean 0.
    #[arg(allow_hyphen_values = true)]
    port: Option<String>,

    /// Host address to bind to.
    #[arg(long)]
    host: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Load configuration from environment
    let mut config = Config::from_env();

    // Initialize logging
    init_logging(&config.logging);
    config.log_summary();

    if let Some(port) = args.port {
        config.http.port = port.trim().parse().unwrap_or_else(|_| {
            warn!("Ignoring invalid port {:?}, letting the OS choose", port);
            0
        });
    }
    if let Some(host) = args.host {
        config.http.host = host;
    }

    info!("Starting {} v{}", config.server.name, config.server.version);
    info!("Starting transport: {}", config.http.description());

    let selection = BackendSelection::resolve(&config.backend).await;
    let state = AppState::new(Calculator::from_selection(&selection), &config.server);

    HttpTransport::new(config.http).run(state).await?;

    info!("Server shutting down");

    Ok(())
}
