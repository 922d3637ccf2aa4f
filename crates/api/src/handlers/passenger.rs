//! Handlers for the `/passengers` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use skylane_core::error::CoreError;
use skylane_core::types::EntityId;
use skylane_db::models::booking::{Booking, BookingListParams};
use skylane_db::models::passenger::{
    CreatePassenger, Passenger, PassengerListParams, UpdatePassenger,
};
use skylane_db::models::ListMeta;
use skylane_db::repositories::{BookingRepo, PassengerRepo};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /api/v1/passengers
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreatePassenger>,
) -> AppResult<(StatusCode, Json<Passenger>)> {
    let passenger = PassengerRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(passenger)))
}

/// GET /api/v1/passengers
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<PassengerListParams>,
) -> AppResult<Json<Vec<Passenger>>> {
    let passengers = PassengerRepo::list(&state.pool, &params).await?;
    Ok(Json(passengers))
}

/// POST /api/v1/passengers/meta
pub async fn meta(
    State(state): State<AppState>,
    Query(params): Query<PassengerListParams>,
) -> AppResult<Json<ListMeta>> {
    let count = PassengerRepo::count(&state.pool, &params).await?;
    Ok(Json(ListMeta { count }))
}

/// GET /api/v1/passengers/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
) -> AppResult<Json<Passenger>> {
    let passenger = PassengerRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Passenger",
            id,
        }))?;
    Ok(Json(passenger))
}

/// PATCH /api/v1/passengers/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
    Json(input): Json<UpdatePassenger>,
) -> AppResult<Json<Passenger>> {
    let passenger = PassengerRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Passenger",
            id,
        }))?;
    Ok(Json(passenger))
}

/// DELETE /api/v1/passengers/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
) -> AppResult<StatusCode> {
    let deleted = PassengerRepo::delete(&state.pool, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Passenger",
            id,
        }))
    }
}

// ---------------------------------------------------------------------------
// Bookings collection
// ---------------------------------------------------------------------------

/// GET /api/v1/passengers/{id}/bookings
pub async fn list_bookings(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
    Query(params): Query<BookingListParams>,
) -> AppResult<Json<Vec<Booking>>> {
    let bookings = BookingRepo::list_by_passenger(&state.pool, id, &params).await?;
    Ok(Json(bookings))
}

/// POST /api/v1/passengers/{id}/bookings
pub async fn connect_bookings(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
    Json(ids): Json<Vec<EntityId>>,
) -> AppResult<StatusCode> {
    PassengerRepo::connect_bookings(&state.pool, id, &ids).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// PATCH /api/v1/passengers/{id}/bookings
pub async fn replace_bookings(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
    Json(ids): Json<Vec<EntityId>>,
) -> AppResult<StatusCode> {
    PassengerRepo::replace_bookings(&state.pool, id, &ids).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/v1/passengers/{id}/bookings
pub async fn disconnect_bookings(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
    Json(ids): Json<Vec<EntityId>>,
) -> AppResult<StatusCode> {
    PassengerRepo::disconnect_bookings(&state.pool, id, &ids).await?;
    Ok(StatusCode::NO_CONTENT)
}
