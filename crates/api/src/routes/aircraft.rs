//! Route definitions for the `/aircraft` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::aircraft;
use crate::state::AppState;

/// Routes mounted at `/aircraft`.
///
/// ```text
/// POST   /                -> create
/// GET    /                -> list
/// POST   /meta            -> meta
/// GET    /{id}            -> get_by_id
/// PATCH  /{id}            -> update
/// DELETE /{id}            -> delete
///
/// GET    /{id}/airline    -> get_airline
///
/// GET    /{id}/flights    -> list_flights
/// POST   /{id}/flights    -> connect_flights
/// PATCH  /{id}/flights    -> replace_flights
/// DELETE /{id}/flights    -> disconnect_flights
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(aircraft::list).post(aircraft::create))
        .route("/meta", post(aircraft::meta))
        .route(
            "/{id}",
            get(aircraft::get_by_id)
                .patch(aircraft::update)
                .delete(aircraft::delete),
        )
        .route("/{id}/airline", get(aircraft::get_airline))
        .route(
            "/{id}/flights",
            get(aircraft::list_flights)
                .post(aircraft::connect_flights)
                .patch(aircraft::replace_flights)
                .delete(aircraft::disconnect_flights),
        )
}
