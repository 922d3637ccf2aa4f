//! Route definitions for the `/passengers` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::passenger;
use crate::state::AppState;

/// Routes mounted at `/passengers`.
///
/// ```text
/// POST   /                 -> create
/// GET    /                 -> list
/// POST   /meta             -> meta
/// GET    /{id}             -> get_by_id
/// PATCH  /{id}             -> update
/// DELETE /{id}             -> delete
///
/// GET    /{id}/bookings    -> list_bookings
/// POST   /{id}/bookings    -> connect_bookings
/// PATCH  /{id}/bookings    -> replace_bookings
/// DELETE /{id}/bookings    -> disconnect_bookings
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(passenger::list).post(passenger::create))
        .route("/meta", post(passenger::meta))
        .route(
            "/{id}",
            get(passenger::get_by_id)
                .patch(passenger::update)
                .delete(passenger::delete),
        )
        .route(
            "/{id}/bookings",
            get(passenger::list_bookings)
                .post(passenger::connect_bookings)
                .patch(passenger::replace_bookings)
                .delete(passenger::disconnect_bookings),
        )
}
