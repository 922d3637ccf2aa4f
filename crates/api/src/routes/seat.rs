//! Route definitions for the `/seats` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::seat;
use crate::state::AppState;

/// Routes mounted at `/seats`.
///
/// ```text
/// POST   /                -> create
/// GET    /                -> list
/// POST   /meta            -> meta
/// GET    /{id}            -> get_by_id
/// PATCH  /{id}            -> update
/// DELETE /{id}            -> delete
///
/// GET    /{id}/booking    -> get_booking
/// GET    /{id}/flight     -> get_flight
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(seat::list).post(seat::create))
        .route("/meta", post(seat::meta))
        .route(
            "/{id}",
            get(seat::get_by_id).patch(seat::update).delete(seat::delete),
        )
        .route("/{id}/booking", get(seat::get_booking))
        .route("/{id}/flight", get(seat::get_flight))
}
