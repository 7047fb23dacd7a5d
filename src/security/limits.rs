//! Request limits.
//!
//! # Responsibilities
//! - Enforce maximum request body size
//! - Cap requests in flight (`listener.max_connections`)
//!
//! # Design Decisions
//! - The body cap rides on axum's `DefaultBodyLimit`, so an oversized body
//!   is rejected by the JSON extractor and answered with the usual
//!   `{"success": false, "message": ...}` envelope and 413
//! - Requests over the in-flight cap wait for a slot rather than fail

use axum::{
    body::Body,
    extract::{DefaultBodyLimit, State},
    http::{Request, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    Router,
};
use std::sync::Arc;
use tokio::sync::Semaphore;

use crate::config::AppConfig;

pub fn apply<S>(router: Router<S>, config: &AppConfig) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    let permits = Arc::new(Semaphore::new(config.listener.max_connections));

    router
        .layer(DefaultBodyLimit::max(config.security.max_body_size))
        .layer(middleware::from_fn_with_state(permits, limit_concurrency))
}

/// Hold a semaphore permit for the lifetime of the request.
pub async fn limit_concurrency(
    State(permits): State<Arc<Semaphore>>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let Ok(_permit) = Arc::clone(&permits).acquire_owned().await else {
        return StatusCode::SERVICE_UNAVAILABLE.into_response();
    };

    tracing::trace!(available_permits = permits.available_permits(), "Request admitted");
    next.run(request).await
}
