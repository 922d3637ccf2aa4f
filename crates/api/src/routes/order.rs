//! Route definitions for the `/orders` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::order;
use crate::state::AppState;

/// Routes mounted at `/orders`.
///
/// ```text
/// POST   /                    -> create
/// GET    /                    -> list
/// POST   /meta                -> meta
/// GET    /{id}                -> get_by_id
/// PATCH  /{id}                -> update
/// DELETE /{id}                -> delete
///
/// GET    /{id}/customer       -> get_customer
///
/// GET    /{id}/order-items    -> list_order_items
/// POST   /{id}/order-items    -> connect_order_items
/// PATCH  /{id}/order-items    -> replace_order_items
/// DELETE /{id}/order-items    -> disconnect_order_items
///
/// GET    /{id}/payments       -> list_payments
/// POST   /{id}/payments       -> connect_payments
/// PATCH  /{id}/payments       -> replace_payments
/// DELETE /{id}/payments       -> disconnect_payments
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(order::list).post(order::create))
        .route("/meta", post(order::meta))
        .route(
            "/{id}",
            get(order::get_by_id)
                .patch(order::update)
                .delete(order::delete),
        )
        .route("/{id}/customer", get(order::get_customer))
        .route(
            "/{id}/order-items",
            get(order::list_order_items)
                .post(order::connect_order_items)
                .patch(order::replace_order_items)
                .delete(order::disconnect_order_items),
        )
        .route(
            "/{id}/payments",
            get(order::list_payments)
                .post(order::connect_payments)
                .patch(order::replace_payments)
                .delete(order::disconnect_payments),
        )
}
