//! Handlers for the `/events` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use skylane_core::error::CoreError;
use skylane_core::types::EntityId;
use skylane_db::models::device::Device;
use skylane_db::models::event::{CreateEvent, Event, EventListParams, UpdateEvent};
use skylane_db::models::ListMeta;
use skylane_db::repositories::{DeviceRepo, EventRepo};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /api/v1/events
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateEvent>,
) -> AppResult<(StatusCode, Json<Event>)> {
    let event = EventRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(event)))
}

/// GET /api/v1/events
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<EventListParams>,
) -> AppResult<Json<Vec<Event>>> {
    let events = EventRepo::list(&state.pool, &params).await?;
    Ok(Json(events))
}

/// POST /api/v1/events/meta
pub async fn meta(
    State(state): State<AppState>,
    Query(params): Query<EventListParams>,
) -> AppResult<Json<ListMeta>> {
    let count = EventRepo::count(&state.pool, &params).await?;
    Ok(Json(ListMeta { count }))
}

/// GET /api/v1/events/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
) -> AppResult<Json<Event>> {
    let event = EventRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Event",
            id,
        }))?;
    Ok(Json(event))
}

/// PATCH /api/v1/events/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
    Json(input): Json<UpdateEvent>,
) -> AppResult<Json<Event>> {
    let event = EventRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Event",
            id,
        }))?;
    Ok(Json(event))
}

/// DELETE /api/v1/events/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
) -> AppResult<StatusCode> {
    let deleted = EventRepo::delete(&state.pool, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Event",
            id,
        }))
    }
}

// ---------------------------------------------------------------------------
// Device reference
// ---------------------------------------------------------------------------

/// GET /api/v1/events/{id}/device
pub async fn get_device(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
) -> AppResult<Json<Device>> {
    let event = EventRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Event",
            id,
        }))?;
    let device_id = event
        .device
        .ok_or(AppError::Core(CoreError::NotFoundMany { entity: "Device" }))?;
    let device = DeviceRepo::find_by_id(&state.pool, device_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Device",
            id: device_id,
        }))?;
    Ok(Json(device))
}
