//! Handlers for the `/airlines` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use skylane_core::error::CoreError;
use skylane_core::types::EntityId;
use skylane_db::models::aircraft::{Aircraft, AircraftListParams};
use skylane_db::models::airline::{Airline, AirlineListParams, CreateAirline, UpdateAirline};
use skylane_db::models::flight::{Flight, FlightListParams};
use skylane_db::models::ListMeta;
use skylane_db::repositories::{AircraftRepo, AirlineRepo, FlightRepo};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /api/v1/airlines
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateAirline>,
) -> AppResult<(StatusCode, Json<Airline>)> {
    let airline = AirlineRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(airline)))
}

/// GET /api/v1/airlines
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<AirlineListParams>,
) -> AppResult<Json<Vec<Airline>>> {
    let airlines = AirlineRepo::list(&state.pool, &params).await?;
    Ok(Json(airlines))
}

/// POST /api/v1/airlines/meta
pub async fn meta(
    State(state): State<AppState>,
    Query(params): Query<AirlineListParams>,
) -> AppResult<Json<ListMeta>> {
    let count = AirlineRepo::count(&state.pool, &params).await?;
    Ok(Json(ListMeta { count }))
}

/// GET /api/v1/airlines/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
) -> AppResult<Json<Airline>> {
    let airline = AirlineRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Airline",
            id,
        }))?;
    Ok(Json(airline))
}

/// PATCH /api/v1/airlines/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
    Json(input): Json<UpdateAirline>,
) -> AppResult<Json<Airline>> {
    let airline = AirlineRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Airline",
            id,
        }))?;
    Ok(Json(airline))
}

/// DELETE /api/v1/airlines/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
) -> AppResult<StatusCode> {
    let deleted = AirlineRepo::delete(&state.pool, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Airline",
            id,
        }))
    }
}

// ---------------------------------------------------------------------------
// Aircraft collection
// ---------------------------------------------------------------------------

/// GET /api/v1/airlines/{id}/aircraft
pub async fn list_aircraft(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
    Query(params): Query<AircraftListParams>,
) -> AppResult<Json<Vec<Aircraft>>> {
    let aircraft = AircraftRepo::list_by_airline(&state.pool, id, &params).await?;
    Ok(Json(aircraft))
}

/// POST /api/v1/airlines/{id}/aircraft
pub async fn connect_aircraft(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
    Json(ids): Json<Vec<EntityId>>,
) -> AppResult<StatusCode> {
    AirlineRepo::connect_aircraft(&state.pool, id, &ids).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// PATCH /api/v1/airlines/{id}/aircraft
pub async fn replace_aircraft(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
    Json(ids): Json<Vec<EntityId>>,
) -> AppResult<StatusCode> {
    AirlineRepo::replace_aircraft(&state.pool, id, &ids).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/v1/airlines/{id}/aircraft
pub async fn disconnect_aircraft(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
    Json(ids): Json<Vec<EntityId>>,
) -> AppResult<StatusCode> {
    AirlineRepo::disconnect_aircraft(&state.pool, id, &ids).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Flights collection
// ---------------------------------------------------------------------------

/// GET /api/v1/airlines/{id}/flights
pub async fn list_flights(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
    Query(params): Query<FlightListParams>,
) -> AppResult<Json<Vec<Flight>>> {
    let flights = FlightRepo::list_by_airline(&state.pool, id, &params).await?;
    Ok(Json(flights))
}

/// POST /api/v1/airlines/{id}/flights
pub async fn connect_flights(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
    Json(ids): Json<Vec<EntityId>>,
) -> AppResult<StatusCode> {
    AirlineRepo::connect_flights(&state.pool, id, &ids).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// PATCH /api/v1/airlines/{id}/flights
pub async fn replace_flights(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
    Json(ids): Json<Vec<EntityId>>,
) -> AppResult<StatusCode> {
    AirlineRepo::replace_flights(&state.pool, id, &ids).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/v1/airlines/{id}/flights
pub async fn disconnect_flights(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
    Json(ids): Json<Vec<EntityId>>,
) -> AppResult<StatusCode> {
    AirlineRepo::disconnect_flights(&state.pool, id, &ids).await?;
    Ok(StatusCode::NO_CONTENT)
}
