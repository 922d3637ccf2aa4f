//! Handlers for the `/customers` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use skylane_core::error::CoreError;
use skylane_core::types::EntityId;
use skylane_db::models::customer::{CreateCustomer, Customer, CustomerListParams, UpdateCustomer};
use skylane_db::models::order::{Order, OrderListParams};
use skylane_db::models::ListMeta;
use skylane_db::repositories::{CustomerRepo, OrderRepo};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /api/v1/customers
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateCustomer>,
) -> AppResult<(StatusCode, Json<Customer>)> {
    let customer = CustomerRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(customer)))
}

/// GET /api/v1/customers
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<CustomerListParams>,
) -> AppResult<Json<Vec<Customer>>> {
    let customers = CustomerRepo::list(&state.pool, &params).await?;
    Ok(Json(customers))
}

/// POST /api/v1/customers/meta
pub async fn meta(
    State(state): State<AppState>,
    Query(params): Query<CustomerListParams>,
) -> AppResult<Json<ListMeta>> {
    let count = CustomerRepo::count(&state.pool, &params).await?;
    Ok(Json(ListMeta { count }))
}

/// GET /api/v1/customers/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
) -> AppResult<Json<Customer>> {
    let customer = CustomerRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Customer",
            id,
        }))?;
    Ok(Json(customer))
}

/// PATCH /api/v1/customers/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
    Json(input): Json<UpdateCustomer>,
) -> AppResult<Json<Customer>> {
    let customer = CustomerRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Customer",
            id,
        }))?;
    Ok(Json(customer))
}

/// DELETE /api/v1/customers/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
) -> AppResult<StatusCode> {
    let deleted = CustomerRepo::delete(&state.pool, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Customer",
            id,
        }))
    }
}

// ---------------------------------------------------------------------------
// Orders collection
// ---------------------------------------------------------------------------

/// GET /api/v1/customers/{id}/orders
pub async fn list_orders(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
    Query(params): Query<OrderListParams>,
) -> AppResult<Json<Vec<Order>>> {
    let orders = OrderRepo::list_by_customer(&state.pool, id, &params).await?;
    Ok(Json(orders))
}

/// POST /api/v1/customers/{id}/orders
pub async fn connect_orders(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
    Json(ids): Json<Vec<EntityId>>,
) -> AppResult<StatusCode> {
    CustomerRepo::connect_orders(&state.pool, id, &ids).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// PATCH /api/v1/customers/{id}/orders
pub async fn replace_orders(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
    Json(ids): Json<Vec<EntityId>>,
) -> AppResult<StatusCode> {
    CustomerRepo::replace_orders(&state.pool, id, &ids).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/v1/customers/{id}/orders
pub async fn disconnect_orders(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
    Json(ids): Json<Vec<EntityId>>,
) -> AppResult<StatusCode> {
    CustomerRepo::disconnect_orders(&state.pool, id, &ids).await?;
    Ok(StatusCode::NO_CONTENT)
}
