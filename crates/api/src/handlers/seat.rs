//! Handlers for the `/seats` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use skylane_core::error::CoreError;
use skylane_core::types::EntityId;
use skylane_db::models::booking::Booking;
use skylane_db::models::flight::Flight;
use skylane_db::models::seat::{CreateSeat, Seat, SeatListParams, UpdateSeat};
use skylane_db::models::ListMeta;
use skylane_db::repositories::{BookingRepo, FlightRepo, SeatRepo};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /api/v1/seats
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateSeat>,
) -> AppResult<(StatusCode, Json<Seat>)> {
    let seat = SeatRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(seat)))
}

/// GET /api/v1/seats
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<SeatListParams>,
) -> AppResult<Json<Vec<Seat>>> {
    let seats = SeatRepo::list(&state.pool, &params).await?;
    Ok(Json(seats))
}

/// POST /api/v1/seats/meta
pub async fn meta(
    State(state): State<AppState>,
    Query(params): Query<SeatListParams>,
) -> AppResult<Json<ListMeta>> {
    let count = SeatRepo::count(&state.pool, &params).await?;
    Ok(Json(ListMeta { count }))
}

/// GET /api/v1/seats/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
) -> AppResult<Json<Seat>> {
    let seat = SeatRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Seat", id }))?;
    Ok(Json(seat))
}

/// PATCH /api/v1/seats/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
    Json(input): Json<UpdateSeat>,
) -> AppResult<Json<Seat>> {
    let seat = SeatRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Seat", id }))?;
    Ok(Json(seat))
}

/// DELETE /api/v1/seats/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
) -> AppResult<StatusCode> {
    let deleted = SeatRepo::delete(&state.pool, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound { entity: "Seat", id }))
    }
}

// ---------------------------------------------------------------------------
// Booking and flight references
// ---------------------------------------------------------------------------

/// GET /api/v1/seats/{id}/booking
pub async fn get_booking(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
) -> AppResult<Json<Booking>> {
    let seat = SeatRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Seat", id }))?;
    let booking_id = seat
        .booking
        .ok_or(AppError::Core(CoreError::NotFoundMany { entity: "Booking" }))?;
    let booking = BookingRepo::find_by_id(&state.pool, booking_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Booking",
            id: booking_id,
        }))?;
    Ok(Json(booking))
}

/// GET /api/v1/seats/{id}/flight
pub async fn get_flight(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
) -> AppResult<Json<Flight>> {
    let seat = SeatRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Seat", id }))?;
    let flight_id = seat
        .flight
        .ok_or(AppError::Core(CoreError::NotFoundMany { entity: "Flight" }))?;
    let flight = FlightRepo::find_by_id(&state.pool, flight_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Flight",
            id: flight_id,
        }))?;
    Ok(Json(flight))
}
