//! Route definitions for the `/customers` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::customer;
use crate::state::AppState;

/// Routes mounted at `/customers`.
///
/// ```text
/// POST   /               -> create
/// GET    /               -> list
/// POST   /meta           -> meta
/// GET    /{id}           -> get_by_id
/// PATCH  /{id}           -> update
/// DELETE /{id}           -> delete
///
/// GET    /{id}/orders    -> list_orders
/// POST   /{id}/orders    -> connect_orders
/// PATCH  /{id}/orders    -> replace_orders
/// DELETE /{id}/orders    -> disconnect_orders
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(customer::list).post(customer::create))
        .route("/meta", post(customer::meta))
        .route(
            "/{id}",
            get(customer::get_by_id)
                .patch(customer::update)
                .delete(customer::delete),
        )
        .route(
            "/{id}/orders",
            get(customer::list_orders)
                .post(customer::connect_orders)
                .patch(customer::replace_orders)
                .delete(customer::disconnect_orders),
        )
}
