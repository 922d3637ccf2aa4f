//! Route definitions for the `/events` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::event;
use crate::state::AppState;

/// Routes mounted at `/events`.
///
/// ```text
/// POST   /               -> create
/// GET    /               -> list
/// POST   /meta           -> meta
/// GET    /{id}           -> get_by_id
/// PATCH  /{id}           -> update
/// DELETE /{id}           -> delete
///
/// GET    /{id}/device    -> get_device
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(event::list).post(event::create))
        .route("/meta", post(event::meta))
        .route(
            "/{id}",
            get(event::get_by_id)
                .patch(event::update)
                .delete(event::delete),
        )
        .route("/{id}/device", get(event::get_device))
}
