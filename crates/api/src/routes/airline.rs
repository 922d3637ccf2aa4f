//! Route definitions for the `/airlines` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::airline;
use crate::state::AppState;

/// Routes mounted at `/airlines`.
///
/// ```text
/// POST   /                 -> create
/// GET    /                 -> list
/// POST   /meta             -> meta
/// GET    /{id}             -> get_by_id
/// PATCH  /{id}             -> update
/// DELETE /{id}             -> delete
///
/// GET    /{id}/aircraft    -> list_aircraft
/// POST   /{id}/aircraft    -> connect_aircraft
/// PATCH  /{id}/aircraft    -> replace_aircraft
/// DELETE /{id}/aircraft    -> disconnect_aircraft
///
/// GET    /{id}/flights     -> list_flights
/// POST   /{id}/flights     -> connect_flights
/// PATCH  /{id}/flights     -> replace_flights
/// DELETE /{id}/flights     -> disconnect_flights
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(airline::list).post(airline::create))
        .route("/meta", post(airline::meta))
        .route(
            "/{id}",
            get(airline::get_by_id)
                .patch(airline::update)
                .delete(airline::delete),
        )
        .route(
            "/{id}/aircraft",
            get(airline::list_aircraft)
                .post(airline::connect_aircraft)
                .patch(airline::replace_aircraft)
                .delete(airline::disconnect_aircraft),
        )
        .route(
            "/{id}/flights",
            get(airline::list_flights)
                .post(airline::connect_flights)
                .patch(airline::replace_flights)
                .delete(airline::disconnect_flights),
        )
}
