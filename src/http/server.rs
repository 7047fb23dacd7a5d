//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (request ID, tracing, limits, timeout, security headers, metrics)
//! - Bind server to listener and drain on shutdown

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware,
    routing::get,
    Router,
};
use chrono::{SecondsFormat, Utc};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};
use tracing::Span;

use crate::config::AppConfig;
use crate::http::request::{assign_request_id, RequestIdExt};
use crate::http::response::{ApiError, ROUTE_NOT_FOUND};
use crate::hubs::hubs_router;
use crate::observability::metrics;
use crate::security;
use crate::store::HubStore;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn HubStore>,
    pub greeting: Arc<str>,
}

impl AppState {
    pub fn new(store: Arc<dyn HubStore>, config: &AppConfig) -> Self {
        Self {
            store,
            greeting: Arc::from(config.api.greeting.as_str()),
        }
    }
}

/// HTTP server for the hubs API.
pub struct HttpServer {
    router: Router,
    config: AppConfig,
}

impl HttpServer {
    /// Create a new HTTP server over the given store.
    pub fn new(config: AppConfig, store: Arc<dyn HubStore>) -> Self {
        let state = AppState::new(store, &config);
        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    pub fn build_router(config: &AppConfig, state: AppState) -> Router {
        let app = Router::new()
            .route("/", get(greeting))
            .route("/now", get(now))
            .merge(hubs_router())
            .route_layer(middleware::from_fn(metrics::track_metrics))
            .fallback(route_not_found)
            .with_state(state);

        let app = security::headers::apply(app, &config.security);
        let app = security::limits::apply(app, config);

        // Timeout sits outside the in-flight gate so queued requests also expire.
        app.layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
            .layer(middleware::from_fn(assign_request_id))
    }

    /// The fully layered router, for in-process serving.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until `shutdown` fires, then drain in-flight requests.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        let app = self.router.into_make_service_with_connect_info::<SocketAddr>();

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Draining connections");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }
}

fn make_request_span(request: &Request<Body>) -> Span {
    let request_id = request
        .request_id()
        .map(|id| id.as_str())
        .unwrap_or("unknown");

    tracing::info_span!(
        "request",
        method = %request.method(),
        uri = %request.uri(),
        request_id = %request_id,
    )
}

/// `GET /`
async fn greeting(State(state): State<AppState>) -> String {
    state.greeting.to_string()
}

/// `GET /now`: current UTC time, millisecond precision, `Z` suffix.
async fn now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

async fn route_not_found() -> ApiError {
    ApiError::NotFound(ROUTE_NOT_FOUND)
}
