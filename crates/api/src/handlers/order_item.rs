//! Handlers for the `/order-items` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use skylane_core::error::CoreError;
use skylane_core::types::EntityId;
use skylane_db::models::order::Order;
use skylane_db::models::order_item::{
    CreateOrderItem, OrderItem, OrderItemListParams, UpdateOrderItem,
};
use skylane_db::models::ListMeta;
use skylane_db::repositories::{OrderItemRepo, OrderRepo};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /api/v1/order-items
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateOrderItem>,
) -> AppResult<(StatusCode, Json<OrderItem>)> {
    let item = OrderItemRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// GET /api/v1/order-items
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<OrderItemListParams>,
) -> AppResult<Json<Vec<OrderItem>>> {
    let items = OrderItemRepo::list(&state.pool, &params).await?;
    Ok(Json(items))
}

/// POST /api/v1/order-items/meta
pub async fn meta(
    State(state): State<AppState>,
    Query(params): Query<OrderItemListParams>,
) -> AppResult<Json<ListMeta>> {
    let count = OrderItemRepo::count(&state.pool, &params).await?;
    Ok(Json(ListMeta { count }))
}

/// GET /api/v1/order-items/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
) -> AppResult<Json<OrderItem>> {
    let item = OrderItemRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "OrderItem",
            id,
        }))?;
    Ok(Json(item))
}

/// PATCH /api/v1/order-items/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
    Json(input): Json<UpdateOrderItem>,
) -> AppResult<Json<OrderItem>> {
    let item = OrderItemRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "OrderItem",
            id,
        }))?;
    Ok(Json(item))
}

/// DELETE /api/v1/order-items/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
) -> AppResult<StatusCode> {
    let deleted = OrderItemRepo::delete(&state.pool, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "OrderItem",
            id,
        }))
    }
}

// ---------------------------------------------------------------------------
// Order reference
// ---------------------------------------------------------------------------

/// GET /api/v1/order-items/{id}/order
pub async fn get_order(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
) -> AppResult<Json<Order>> {
    let item = OrderItemRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "OrderItem",
            id,
        }))?;
    let order_id = item
        .order
        .ok_or(AppError::Core(CoreError::NotFoundMany { entity: "Order" }))?;
    let order = OrderRepo::find_by_id(&state.pool, order_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Order",
            id: order_id,
        }))?;
    Ok(Json(order))
}
