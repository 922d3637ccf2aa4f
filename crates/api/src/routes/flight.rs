//! Route definitions for the `/flights` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::flight;
use crate::state::AppState;

/// Routes mounted at `/flights`.
///
/// ```text
/// POST   /                 -> create
/// GET    /                 -> list
/// POST   /meta             -> meta
/// GET    /{id}             -> get_by_id
/// PATCH  /{id}             -> update
/// DELETE /{id}             -> delete
///
/// GET    /{id}/aircraft    -> get_aircraft
/// GET    /{id}/airline     -> get_airline
///
/// GET    /{id}/bookings    -> list_bookings
/// POST   /{id}/bookings    -> connect_bookings
/// PATCH  /{id}/bookings    -> replace_bookings
/// DELETE /{id}/bookings    -> disconnect_bookings
///
/// GET    /{id}/seats       -> list_seats
/// POST   /{id}/seats       -> connect_seats
/// PATCH  /{id}/seats       -> replace_seats
/// DELETE /{id}/seats       -> disconnect_seats
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(flight::list).post(flight::create))
        .route("/meta", post(flight::meta))
        .route(
            "/{id}",
            get(flight::get_by_id)
                .patch(flight::update)
                .delete(flight::delete),
        )
        .route("/{id}/aircraft", get(flight::get_aircraft))
        .route("/{id}/airline", get(flight::get_airline))
        .route(
            "/{id}/bookings",
            get(flight::list_bookings)
                .post(flight::connect_bookings)
                .patch(flight::replace_bookings)
                .delete(flight::disconnect_bookings),
        )
        .route(
            "/{id}/seats",
            get(flight::list_seats)
                .post(flight::connect_seats)
                .patch(flight::replace_seats)
                .delete(flight::disconnect_seats),
        )
}
