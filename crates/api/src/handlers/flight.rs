//! Handlers for the `/flights` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use skylane_core::error::CoreError;
use skylane_core::types::EntityId;
use skylane_db::models::aircraft::Aircraft;
use skylane_db::models::airline::Airline;
use skylane_db::models::booking::{Booking, BookingListParams};
use skylane_db::models::flight::{CreateFlight, Flight, FlightListParams, UpdateFlight};
use skylane_db::models::seat::{Seat, SeatListParams};
use skylane_db::models::ListMeta;
use skylane_db::repositories::{AircraftRepo, AirlineRepo, BookingRepo, FlightRepo, SeatRepo};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /api/v1/flights
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateFlight>,
) -> AppResult<(StatusCode, Json<Flight>)> {
    let flight = FlightRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(flight)))
}

/// GET /api/v1/flights
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<FlightListParams>,
) -> AppResult<Json<Vec<Flight>>> {
    let flights = FlightRepo::list(&state.pool, &params).await?;
    Ok(Json(flights))
}

/// POST /api/v1/flights/meta
pub async fn meta(
    State(state): State<AppState>,
    Query(params): Query<FlightListParams>,
) -> AppResult<Json<ListMeta>> {
    let count = FlightRepo::count(&state.pool, &params).await?;
    Ok(Json(ListMeta { count }))
}

/// GET /api/v1/flights/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
) -> AppResult<Json<Flight>> {
    let flight = FlightRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Flight",
            id,
        }))?;
    Ok(Json(flight))
}

/// PATCH /api/v1/flights/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
    Json(input): Json<UpdateFlight>,
) -> AppResult<Json<Flight>> {
    let flight = FlightRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Flight",
            id,
        }))?;
    Ok(Json(flight))
}

/// DELETE /api/v1/flights/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
) -> AppResult<StatusCode> {
    let deleted = FlightRepo::delete(&state.pool, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Flight",
            id,
        }))
    }
}

// ---------------------------------------------------------------------------
// Single references
// ---------------------------------------------------------------------------

/// GET /api/v1/flights/{id}/aircraft
pub async fn get_aircraft(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
) -> AppResult<Json<Aircraft>> {
    let flight = FlightRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Flight",
            id,
        }))?;
    let aircraft_id = flight.aircraft.ok_or(AppError::Core(CoreError::NotFoundMany {
        entity: "Aircraft",
    }))?;
    let aircraft = AircraftRepo::find_by_id(&state.pool, aircraft_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Aircraft",
            id: aircraft_id,
        }))?;
    Ok(Json(aircraft))
}

/// GET /api/v1/flights/{id}/airline
pub async fn get_airline(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
) -> AppResult<Json<Airline>> {
    let flight = FlightRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Flight",
            id,
        }))?;
    let airline_id = flight.airline.ok_or(AppError::Core(CoreError::NotFoundMany {
        entity: "Airline",
    }))?;
    let airline = AirlineRepo::find_by_id(&state.pool, airline_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Airline",
            id: airline_id,
        }))?;
    Ok(Json(airline))
}

// ---------------------------------------------------------------------------
// Bookings collection
// ---------------------------------------------------------------------------

/// GET /api/v1/flights/{id}/bookings
///
/// An unknown flight id yields an empty list, not a 404.
pub async fn list_bookings(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
    Query(params): Query<BookingListParams>,
) -> AppResult<Json<Vec<Booking>>> {
    let bookings = BookingRepo::list_by_flight(&state.pool, id, &params).await?;
    Ok(Json(bookings))
}

/// POST /api/v1/flights/{id}/bookings
pub async fn connect_bookings(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
    Json(ids): Json<Vec<EntityId>>,
) -> AppResult<StatusCode> {
    FlightRepo::connect_bookings(&state.pool, id, &ids).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// PATCH /api/v1/flights/{id}/bookings
pub async fn replace_bookings(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
    Json(ids): Json<Vec<EntityId>>,
) -> AppResult<StatusCode> {
    FlightRepo::replace_bookings(&state.pool, id, &ids).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/v1/flights/{id}/bookings
pub async fn disconnect_bookings(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
    Json(ids): Json<Vec<EntityId>>,
) -> AppResult<StatusCode> {
    FlightRepo::disconnect_bookings(&state.pool, id, &ids).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Seats collection
// ---------------------------------------------------------------------------

/// GET /api/v1/flights/{id}/seats
pub async fn list_seats(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
    Query(params): Query<SeatListParams>,
) -> AppResult<Json<Vec<Seat>>> {
    let seats = SeatRepo::list_by_flight(&state.pool, id, &params).await?;
    Ok(Json(seats))
}

/// POST /api/v1/flights/{id}/seats
pub async fn connect_seats(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
    Json(ids): Json<Vec<EntityId>>,
) -> AppResult<StatusCode> {
    FlightRepo::connect_seats(&state.pool, id, &ids).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// PATCH /api/v1/flights/{id}/seats
pub async fn replace_seats(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
    Json(ids): Json<Vec<EntityId>>,
) -> AppResult<StatusCode> {
    FlightRepo::replace_seats(&state.pool, id, &ids).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/v1/flights/{id}/seats
pub async fn disconnect_seats(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
    Json(ids): Json<Vec<EntityId>>,
) -> AppResult<StatusCode> {
    FlightRepo::disconnect_seats(&state.pool, id, &ids).await?;
    Ok(StatusCode::NO_CONTENT)
}
