//! Handlers for the `/bookings` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use skylane_core::error::CoreError;
use skylane_core::types::EntityId;
use skylane_db::models::booking::{Booking, BookingListParams, CreateBooking, UpdateBooking};
use skylane_db::models::flight::Flight;
use skylane_db::models::passenger::Passenger;
use skylane_db::models::seat::{Seat, SeatListParams};
use skylane_db::models::ListMeta;
use skylane_db::repositories::{BookingRepo, FlightRepo, PassengerRepo, SeatRepo};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /api/v1/bookings
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateBooking>,
) -> AppResult<(StatusCode, Json<Booking>)> {
    let booking = BookingRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(booking)))
}

/// GET /api/v1/bookings
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<BookingListParams>,
) -> AppResult<Json<Vec<Booking>>> {
    let bookings = BookingRepo::list(&state.pool, &params).await?;
    Ok(Json(bookings))
}

/// POST /api/v1/bookings/meta
pub async fn meta(
    State(state): State<AppState>,
    Query(params): Query<BookingListParams>,
) -> AppResult<Json<ListMeta>> {
    let count = BookingRepo::count(&state.pool, &params).await?;
    Ok(Json(ListMeta { count }))
}

/// GET /api/v1/bookings/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
) -> AppResult<Json<Booking>> {
    let booking = BookingRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Booking",
            id,
        }))?;
    Ok(Json(booking))
}

/// PATCH /api/v1/bookings/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
    Json(input): Json<UpdateBooking>,
) -> AppResult<Json<Booking>> {
    let booking = BookingRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Booking",
            id,
        }))?;
    Ok(Json(booking))
}

/// DELETE /api/v1/bookings/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
) -> AppResult<StatusCode> {
    let deleted = BookingRepo::delete(&state.pool, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Booking",
            id,
        }))
    }
}

// ---------------------------------------------------------------------------
// Flight and passenger references
// ---------------------------------------------------------------------------

/// GET /api/v1/bookings/{id}/flight
pub async fn get_flight(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
) -> AppResult<Json<Flight>> {
    let booking = BookingRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Booking",
            id,
        }))?;
    let flight_id = booking
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

/// GET /api/v1/bookings/{id}/passenger
pub async fn get_passenger(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
) -> AppResult<Json<Passenger>> {
    let booking = BookingRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Booking",
            id,
        }))?;
    let passenger_id = booking.passenger.ok_or(AppError::Core(CoreError::NotFoundMany {
        entity: "Passenger",
    }))?;
    let passenger = PassengerRepo::find_by_id(&state.pool, passenger_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Passenger",
            id: passenger_id,
        }))?;
    Ok(Json(passenger))
}

// ---------------------------------------------------------------------------
// Seats collection
// ---------------------------------------------------------------------------

/// GET /api/v1/bookings/{id}/seats
pub async fn list_seats(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
    Query(params): Query<SeatListParams>,
) -> AppResult<Json<Vec<Seat>>> {
    let seats = SeatRepo::list_by_booking(&state.pool, id, &params).await?;
    Ok(Json(seats))
}

/// POST /api/v1/bookings/{id}/seats
pub async fn connect_seats(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
    Json(ids): Json<Vec<EntityId>>,
) -> AppResult<StatusCode> {
    BookingRepo::connect_seats(&state.pool, id, &ids).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// PATCH /api/v1/bookings/{id}/seats
pub async fn replace_seats(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
    Json(ids): Json<Vec<EntityId>>,
) -> AppResult<StatusCode> {
    BookingRepo::replace_seats(&state.pool, id, &ids).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/v1/bookings/{id}/seats
pub async fn disconnect_seats(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
    Json(ids): Json<Vec<EntityId>>,
) -> AppResult<StatusCode> {
    BookingRepo::disconnect_seats(&state.pool, id, &ids).await?;
    Ok(StatusCode::NO_CONTENT)
}
