//! Handlers for the `/devices` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use skylane_core::error::CoreError;
use skylane_core::types::EntityId;
use skylane_db::models::device::{CreateDevice, Device, DeviceListParams, UpdateDevice};
use skylane_db::models::event::{Event, EventListParams};
use skylane_db::models::ListMeta;
use skylane_db::repositories::{DeviceRepo, EventRepo};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /api/v1/devices
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateDevice>,
) -> AppResult<(StatusCode, Json<Device>)> {
    let device = DeviceRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(device)))
}

/// GET /api/v1/devices
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<DeviceListParams>,
) -> AppResult<Json<Vec<Device>>> {
    let devices = DeviceRepo::list(&state.pool, &params).await?;
    Ok(Json(devices))
}

/// POST /api/v1/devices/meta
pub async fn meta(
    State(state): State<AppState>,
    Query(params): Query<DeviceListParams>,
) -> AppResult<Json<ListMeta>> {
    let count = DeviceRepo::count(&state.pool, &params).await?;
    Ok(Json(ListMeta { count }))
}

/// GET /api/v1/devices/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
) -> AppResult<Json<Device>> {
    let device = DeviceRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Device",
            id,
        }))?;
    Ok(Json(device))
}

/// PATCH /api/v1/devices/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
    Json(input): Json<UpdateDevice>,
) -> AppResult<Json<Device>> {
    let device = DeviceRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Device",
            id,
        }))?;
    Ok(Json(device))
}

/// DELETE /api/v1/devices/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
) -> AppResult<StatusCode> {
    let deleted = DeviceRepo::delete(&state.pool, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Device",
            id,
        }))
    }
}

// ---------------------------------------------------------------------------
// Events collection
// ---------------------------------------------------------------------------

/// GET /api/v1/devices/{id}/events
pub async fn list_events(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
    Query(params): Query<EventListParams>,
) -> AppResult<Json<Vec<Event>>> {
    let events = EventRepo::list_by_device(&state.pool, id, &params).await?;
    Ok(Json(events))
}

/// POST /api/v1/devices/{id}/events
pub async fn connect_events(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
    Json(ids): Json<Vec<EntityId>>,
) -> AppResult<StatusCode> {
    DeviceRepo::connect_events(&state.pool, id, &ids).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// PATCH /api/v1/devices/{id}/events
pub async fn replace_events(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
    Json(ids): Json<Vec<EntityId>>,
) -> AppResult<StatusCode> {
    DeviceRepo::replace_events(&state.pool, id, &ids).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/v1/devices/{id}/events
pub async fn disconnect_events(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
    Json(ids): Json<Vec<EntityId>>,
) -> AppResult<StatusCode> {
    DeviceRepo::disconnect_events(&state.pool, id, &ids).await?;
    Ok(StatusCode::NO_CONTENT)
}
