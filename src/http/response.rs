//! Response mapping for the hubs API.
//!
//! Outcomes fall into two buckets: "not found" (404) and everything the
//! store rejects (500, with the error attached). Bodies the JSON
//! extractor refuses keep the extractor's status.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::store::StoreError;

pub const HUB_NOT_FOUND: &str = "We cannot find the hub you are looking for";
pub const HUB_NOT_FOUND_FOR_CHANGE: &str = "I cannot find the hub you are looking for";
pub const ROUTE_NOT_FOUND: &str = "route not found";

/// Failure returned by a route handler.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(&'static str),

    #[error(transparent)]
    InvalidBody(#[from] JsonRejection),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::InvalidBody(rejection) => rejection.status(),
            ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            ApiError::NotFound(message) => {
                (status, Json(json!({ "success": false, "message": message }))).into_response()
            }
            ApiError::InvalidBody(rejection) => {
                tracing::debug!(error = %rejection, "Rejected request body");
                (
                    status,
                    Json(json!({ "success": false, "message": rejection.body_text() })),
                )
                    .into_response()
            }
            ApiError::Store(err) => {
                tracing::error!(error = %err, code = err.code(), "Store operation failed");
                (status, Json(json!({ "success": false, "err": err }))).into_response()
            }
        }
    }
}
