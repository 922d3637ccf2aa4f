//! Route definitions for the `/payments` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::payment;
use crate::state::AppState;

/// Routes mounted at `/payments`.
///
/// ```text
/// POST   /              -> create
/// GET    /              -> list
/// POST   /meta          -> meta
/// GET    /{id}          -> get_by_id
/// PATCH  /{id}          -> update
/// DELETE /{id}          -> delete
///
/// GET    /{id}/order    -> get_order
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(payment::list).post(payment::create))
        .route("/meta", post(payment::meta))
        .route(
            "/{id}",
            get(payment::get_by_id)
                .patch(payment::update)
                .delete(payment::delete),
        )
        .route("/{id}/order", get(payment::get_order))
}
