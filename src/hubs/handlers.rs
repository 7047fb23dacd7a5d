use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::http::response::{ApiError, HUB_NOT_FOUND, HUB_NOT_FOUND_FOR_CHANGE};
use crate::http::server::AppState;
use crate::hubs::model::{parse_id, Hub, HubEnvelope, HubFields, UpdatedEnvelope};

/// `GET /hubs`
pub async fn list_hubs(State(state): State<AppState>) -> Result<Json<Vec<Hub>>, ApiError> {
    let hubs = state.store.find().await?;
    Ok(Json(hubs))
}

/// `POST /hubs`
pub async fn create_hub(
    State(state): State<AppState>,
    payload: Result<Json<HubFields>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(info) = payload?;
    let hub = state.store.add(info).await?;

    tracing::info!(hub_id = hub.id, "Hub created");
    Ok((StatusCode::CREATED, Json(HubEnvelope { success: true, hub })))
}

/// `GET /hubs/{id}`
pub async fn get_hub(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<HubEnvelope>, ApiError> {
    let Some(id) = parse_id(&id) else {
        return Err(ApiError::NotFound(HUB_NOT_FOUND));
    };

    match state.store.find_by_id(id).await? {
        Some(hub) => Ok(Json(HubEnvelope { success: true, hub })),
        None => Err(ApiError::NotFound(HUB_NOT_FOUND)),
    }
}

/// `PUT /hubs/{id}`
pub async fn update_hub(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<HubFields>, JsonRejection>,
) -> Result<Json<UpdatedEnvelope>, ApiError> {
    let Json(changes) = payload?;
    let Some(id) = parse_id(&id) else {
        return Err(ApiError::NotFound(HUB_NOT_FOUND_FOR_CHANGE));
    };

    match state.store.update(id, changes).await? {
        Some(updated) => {
            tracing::info!(hub_id = id, "Hub updated");
            Ok(Json(UpdatedEnvelope { success: true, updated }))
        }
        None => Err(ApiError::NotFound(HUB_NOT_FOUND_FOR_CHANGE)),
    }
}

/// `DELETE /hubs/{id}`
pub async fn delete_hub(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let Some(id) = parse_id(&id) else {
        return Err(ApiError::NotFound(HUB_NOT_FOUND_FOR_CHANGE));
    };

    if state.store.remove(id).await? {
        tracing::info!(hub_id = id, "Hub deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound(HUB_NOT_FOUND_FOR_CHANGE))
    }
}
