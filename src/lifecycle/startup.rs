//! Startup orchestration.
//!
//! Subsystems initialize in order: store, metrics, then the listener.

use std::sync::Arc;
use tokio::net::TcpListener;

use crate::config::{ListenerConfig, ObservabilityConfig, StorageConfig};
use crate::observability::metrics;
use crate::store::{HubStore, MemoryStore, StoreError};

/// Open the configured hub store.
pub fn open_store(config: &StorageConfig) -> Result<Arc<dyn HubStore>, StoreError> {
    let store = match &config.persistence_path {
        Some(path) => MemoryStore::open(path)?,
        None => {
            tracing::warn!("No persistence_path configured; hubs will be lost on exit");
            MemoryStore::new()
        }
    };
    Ok(Arc::new(store))
}

/// Start the Prometheus exporter when enabled. Failure is logged, not fatal.
pub fn start_metrics(config: &ObservabilityConfig) {
    if !config.metrics_enabled {
        return;
    }

    match config.metrics_address.parse() {
        Ok(addr) => {
            if let Err(e) = metrics::init_metrics(addr) {
                tracing::error!(error = %e, "Failed to start metrics exporter");
            }
        }
        Err(_) => tracing::error!(
            metrics_address = %config.metrics_address,
            "Failed to parse metrics address"
        ),
    }
}

/// Bind the public listener.
pub async fn bind_listener(config: &ListenerConfig) -> std::io::Result<TcpListener> {
    let listener = TcpListener::bind(&config.bind_address).await?;
    tracing::info!(
        address = %listener.local_addr()?,
        max_connections = config.max_connections,
        "Listening for connections"
    );
    Ok(listener)
}
