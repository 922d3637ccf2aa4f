//! Route definitions for the `/bookings` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::booking;
use crate::state::AppState;

/// Routes mounted at `/bookings`.
///
/// ```text
/// POST   /                  -> create
/// GET    /                  -> list
/// POST   /meta              -> meta
/// GET    /{id}              -> get_by_id
/// PATCH  /{id}              -> update
/// DELETE /{id}              -> delete
///
/// GET    /{id}/flight       -> get_flight
/// GET    /{id}/passenger    -> get_passenger
///
/// GET    /{id}/seats        -> list_seats
/// POST   /{id}/seats        -> connect_seats
/// PATCH  /{id}/seats        -> replace_seats
/// DELETE /{id}/seats        -> disconnect_seats
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(booking::list).post(booking::create))
        .route("/meta", post(booking::meta))
        .route(
            "/{id}",
            get(booking::get_by_id)
                .patch(booking::update)
                .delete(booking::delete),
        )
        .route("/{id}/flight", get(booking::get_flight))
        .route("/{id}/passenger", get(booking::get_passenger))
        .route(
            "/{id}/seats",
            get(booking::list_seats)
                .post(booking::connect_seats)
                .patch(booking::replace_seats)
                .delete(booking::disconnect_seats),
        )
}
