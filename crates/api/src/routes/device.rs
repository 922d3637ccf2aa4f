//! Route definitions for the `/devices` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::device;
use crate::state::AppState;

/// Routes mounted at `/devices`.
///
/// ```text
/// POST   /               -> create
/// GET    /               -> list
/// POST   /meta           -> meta
/// GET    /{id}           -> get_by_id
/// PATCH  /{id}           -> update
/// DELETE /{id}           -> delete
///
/// GET    /{id}/events    -> list_events
/// POST   /{id}/events    -> connect_events
/// PATCH  /{id}/events    -> replace_events
/// DELETE /{id}/events    -> disconnect_events
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(device::list).post(device::create))
        .route("/meta", post(device::meta))
        .route(
            "/{id}",
            get(device::get_by_id)
                .patch(device::update)
                .delete(device::delete),
        )
        .route(
            "/{id}/events",
            get(device::list_events)
                .post(device::connect_events)
                .patch(device::replace_events)
                .delete(device::disconnect_events),
        )
}
