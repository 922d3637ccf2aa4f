//! Handlers for the `/orders` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use skylane_core::error::CoreError;
use skylane_core::types::EntityId;
use skylane_db::models::customer::Customer;
use skylane_db::models::order::{CreateOrder, Order, OrderListParams, UpdateOrder};
use skylane_db::models::order_item::{OrderItem, OrderItemListParams};
use skylane_db::models::payment::{Payment, PaymentListParams};
use skylane_db::models::ListMeta;
use skylane_db::repositories::{CustomerRepo, OrderItemRepo, OrderRepo, PaymentRepo};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /api/v1/orders
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateOrder>,
) -> AppResult<(StatusCode, Json<Order>)> {
    let order = OrderRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(order)))
}

/// GET /api/v1/orders
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<OrderListParams>,
) -> AppResult<Json<Vec<Order>>> {
    let orders = OrderRepo::list(&state.pool, &params).await?;
    Ok(Json(orders))
}

/// POST /api/v1/orders/meta
pub async fn meta(
    State(state): State<AppState>,
    Query(params): Query<OrderListParams>,
) -> AppResult<Json<ListMeta>> {
    let count = OrderRepo::count(&state.pool, &params).await?;
    Ok(Json(ListMeta { count }))
}

/// GET /api/v1/orders/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
) -> AppResult<Json<Order>> {
    let order = OrderRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Order",
            id,
        }))?;
    Ok(Json(order))
}

/// PATCH /api/v1/orders/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
    Json(input): Json<UpdateOrder>,
) -> AppResult<Json<Order>> {
    let order = OrderRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Order",
            id,
        }))?;
    Ok(Json(order))
}

/// DELETE /api/v1/orders/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
) -> AppResult<StatusCode> {
    let deleted = OrderRepo::delete(&state.pool, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Order",
            id,
        }))
    }
}

// ---------------------------------------------------------------------------
// Customer reference
// ---------------------------------------------------------------------------

/// GET /api/v1/orders/{id}/customer
pub async fn get_customer(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
) -> AppResult<Json<Customer>> {
    let order = OrderRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Order",
            id,
        }))?;
    let customer_id = order
        .customer
        .ok_or(AppError::Core(CoreError::NotFoundMany { entity: "Customer" }))?;
    let customer = CustomerRepo::find_by_id(&state.pool, customer_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Customer",
            id: customer_id,
        }))?;
    Ok(Json(customer))
}

// ---------------------------------------------------------------------------
// Order items collection
// ---------------------------------------------------------------------------

/// GET /api/v1/orders/{id}/order-items
pub async fn list_order_items(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
    Query(params): Query<OrderItemListParams>,
) -> AppResult<Json<Vec<OrderItem>>> {
    let items = OrderItemRepo::list_by_order(&state.pool, id, &params).await?;
    Ok(Json(items))
}

/// POST /api/v1/orders/{id}/order-items
pub async fn connect_order_items(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
    Json(ids): Json<Vec<EntityId>>,
) -> AppResult<StatusCode> {
    OrderRepo::connect_order_items(&state.pool, id, &ids).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// PATCH /api/v1/orders/{id}/order-items
pub async fn replace_order_items(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
    Json(ids): Json<Vec<EntityId>>,
) -> AppResult<StatusCode> {
    OrderRepo::replace_order_items(&state.pool, id, &ids).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/v1/orders/{id}/order-items
pub async fn disconnect_order_items(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
    Json(ids): Json<Vec<EntityId>>,
) -> AppResult<StatusCode> {
    OrderRepo::disconnect_order_items(&state.pool, id, &ids).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Payments collection
// ---------------------------------------------------------------------------

/// GET /api/v1/orders/{id}/payments
pub async fn list_payments(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
    Query(params): Query<PaymentListParams>,
) -> AppResult<Json<Vec<Payment>>> {
    let payments = PaymentRepo::list_by_order(&state.pool, id, &params).await?;
    Ok(Json(payments))
}

/// POST /api/v1/orders/{id}/payments
pub async fn connect_payments(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
    Json(ids): Json<Vec<EntityId>>,
) -> AppResult<StatusCode> {
    OrderRepo::connect_payments(&state.pool, id, &ids).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// PATCH /api/v1/orders/{id}/payments
pub async fn replace_payments(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
    Json(ids): Json<Vec<EntityId>>,
) -> AppResult<StatusCode> {
    OrderRepo::replace_payments(&state.pool, id, &ids).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/v1/orders/{id}/payments
pub async fn disconnect_payments(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
    Json(ids): Json<Vec<EntityId>>,
) -> AppResult<StatusCode> {
    OrderRepo::disconnect_payments(&state.pool, id, &ids).await?;
    Ok(StatusCode::NO_CONTENT)
}
