//! The `/hubs` resource.

pub mod handlers;
pub mod model;

use axum::{routing::get, Router};

use self::handlers::*;
use crate::http::server::AppState;

pub use model::{Hub, HubFields, HubId};

/// Routes for listing, creating, reading, updating and deleting hubs.
pub fn hubs_router() -> Router<AppState> {
    Router::new()
        .route("/hubs", get(list_hubs).post(create_hub))
        .route(
            "/hubs/{id}",
            get(get_hub).put(update_hub).delete(delete_hub),
        )
}
