//! Handlers for the `/aircraft` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use skylane_core::error::CoreError;
use skylane_core::types::EntityId;
use skylane_db::models::aircraft::{Aircraft, AircraftListParams, CreateAircraft, UpdateAircraft};
use skylane_db::models::airline::Airline;
use skylane_db::models::flight::{Flight, FlightListParams};
use skylane_db::models::ListMeta;
use skylane_db::repositories::{AircraftRepo, AirlineRepo, FlightRepo};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /api/v1/aircraft
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateAircraft>,
) -> AppResult<(StatusCode, Json<Aircraft>)> {
    let aircraft = AircraftRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(aircraft)))
}

/// GET /api/v1/aircraft
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<AircraftListParams>,
) -> AppResult<Json<Vec<Aircraft>>> {
    let aircraft = AircraftRepo::list(&state.pool, &params).await?;
    Ok(Json(aircraft))
}

/// POST /api/v1/aircraft/meta
pub async fn meta(
    State(state): State<AppState>,
    Query(params): Query<AircraftListParams>,
) -> AppResult<Json<ListMeta>> {
    let count = AircraftRepo::count(&state.pool, &params).await?;
    Ok(Json(ListMeta { count }))
}

/// GET /api/v1/aircraft/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
) -> AppResult<Json<Aircraft>> {
    let aircraft = AircraftRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Aircraft",
            id,
        }))?;
    Ok(Json(aircraft))
}

/// PATCH /api/v1/aircraft/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
    Json(input): Json<UpdateAircraft>,
) -> AppResult<Json<Aircraft>> {
    let aircraft = AircraftRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Aircraft",
            id,
        }))?;
    Ok(Json(aircraft))
}

/// DELETE /api/v1/aircraft/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
) -> AppResult<StatusCode> {
    let deleted = AircraftRepo::delete(&state.pool, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Aircraft",
            id,
        }))
    }
}

// ---------------------------------------------------------------------------
// Airline reference
// ---------------------------------------------------------------------------

/// GET /api/v1/aircraft/{id}/airline
pub async fn get_airline(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
) -> AppResult<Json<Airline>> {
    let aircraft = AircraftRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Aircraft",
            id,
        }))?;
    let airline_id = aircraft
        .airline
        .ok_or(AppError::Core(CoreError::NotFoundMany { entity: "Airline" }))?;
    let airline = AirlineRepo::find_by_id(&state.pool, airline_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Airline",
            id: airline_id,
        }))?;
    Ok(Json(airline))
}

// ---------------------------------------------------------------------------
// Flights collection
// ---------------------------------------------------------------------------

/// GET /api/v1/aircraft/{id}/flights
pub async fn list_flights(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
    Query(params): Query<FlightListParams>,
) -> AppResult<Json<Vec<Flight>>> {
    let flights = FlightRepo::list_by_aircraft(&state.pool, id, &params).await?;
    Ok(Json(flights))
}

/// POST /api/v1/aircraft/{id}/flights
pub async fn connect_flights(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
    Json(ids): Json<Vec<EntityId>>,
) -> AppResult<StatusCode> {
    AircraftRepo::connect_flights(&state.pool, id, &ids).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// PATCH /api/v1/aircraft/{id}/flights
pub async fn replace_flights(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
    Json(ids): Json<Vec<EntityId>>,
) -> AppResult<StatusCode> {
    AircraftRepo::replace_flights(&state.pool, id, &ids).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/v1/aircraft/{id}/flights
pub async fn disconnect_flights(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
    Json(ids): Json<Vec<EntityId>>,
) -> AppResult<StatusCode> {
    AircraftRepo::disconnect_flights(&state.pool, id, &ids).await?;
    Ok(StatusCode::NO_CONTENT)
}
