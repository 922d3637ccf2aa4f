//! Handlers for the `/payments` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use skylane_core::error::CoreError;
use skylane_core::types::EntityId;
use skylane_db::models::order::Order;
use skylane_db::models::payment::{CreatePayment, Payment, PaymentListParams, UpdatePayment};
use skylane_db::models::ListMeta;
use skylane_db::repositories::{OrderRepo, PaymentRepo};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /api/v1/payments
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreatePayment>,
) -> AppResult<(StatusCode, Json<Payment>)> {
    let payment = PaymentRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(payment)))
}

/// GET /api/v1/payments
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<PaymentListParams>,
) -> AppResult<Json<Vec<Payment>>> {
    let payments = PaymentRepo::list(&state.pool, &params).await?;
    Ok(Json(payments))
}

/// POST /api/v1/payments/meta
pub async fn meta(
    State(state): State<AppState>,
    Query(params): Query<PaymentListParams>,
) -> AppResult<Json<ListMeta>> {
    let count = PaymentRepo::count(&state.pool, &params).await?;
    Ok(Json(ListMeta { count }))
}

/// GET /api/v1/payments/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
) -> AppResult<Json<Payment>> {
    let payment = PaymentRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Payment",
            id,
        }))?;
    Ok(Json(payment))
}

/// PATCH /api/v1/payments/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
    Json(input): Json<UpdatePayment>,
) -> AppResult<Json<Payment>> {
    let payment = PaymentRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Payment",
            id,
        }))?;
    Ok(Json(payment))
}

/// DELETE /api/v1/payments/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
) -> AppResult<StatusCode> {
    let deleted = PaymentRepo::delete(&state.pool, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Payment",
            id,
        }))
    }
}

// ---------------------------------------------------------------------------
// Order reference
// ---------------------------------------------------------------------------

/// GET /api/v1/payments/{id}/order
pub async fn get_order(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
) -> AppResult<Json<Order>> {
    let payment = PaymentRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Payment",
            id,
        }))?;
    let order_id = payment
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
