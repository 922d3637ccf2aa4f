//! Route definitions for the `/order-items` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::order_item;
use crate::state::AppState;

/// Routes mounted at `/order-items`.
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
        .route("/", get(order_item::list).post(order_item::create))
        .route("/meta", post(order_item::meta))
        .route(
            "/{id}",
            get(order_item::get_by_id)
                .patch(order_item::update)
                .delete(order_item::delete),
        )
        .route("/{id}/order", get(order_item::get_order))
}
