//! Hubs API server.
//!
//! # Architecture Overview
//!
//! ```text
//!   Client ──▶ request id ──▶ trace ──▶ limits ──▶ timeout ──▶ router ──▶ HubStore
//!                                                                 │          │
//!   Client ◀────────────── status + JSON (ApiError mapping) ◀─────┘    MemoryStore
//!                                                                     (+ JSON file)
//! ```

use clap::Parser;
use std::path::PathBuf;

use hubs_api::config::{load_config, validate_config, AppConfig, ConfigError};
use hubs_api::lifecycle::startup;
use hubs_api::observability::logging;
use hubs_api::{HttpServer, Shutdown};

#[derive(Parser)]
#[command(name = "hubs-api")]
#[command(about = "REST API over the hubs resource", long_about = None)]
struct Args {
    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override `listener.bind_address`.
    #[arg(short, long)]
    bind: Option<String>,

    /// Override `observability.log_level`.
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => AppConfig::default(),
    };
    if let Some(bind) = args.bind {
        config.listener.bind_address = bind;
    }
    if let Some(level) = args.log_level {
        config.observability.log_level = level;
    }
    validate_config(&config).map_err(ConfigError::Validation)?;

    logging::init(&config.observability);
    tracing::info!("hubs-api v{} starting", env!("CARGO_PKG_VERSION"));

    tracing::info!(
        bind_address = %config.listener.bind_address,
        max_connections = config.listener.max_connections,
        request_timeout_secs = config.timeouts.request_secs,
        persistence_path = ?config.storage.persistence_path,
        "Configuration loaded"
    );

    let store = startup::open_store(&config.storage)?;
    startup::start_metrics(&config.observability);
    let listener = startup::bind_listener(&config.listener).await?;

    let shutdown = Shutdown::new();
    shutdown.trigger_on_signal();

    let server = HttpServer::new(config, store);
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
