//! Repository for the `order_items` table.

use skylane_core::error::CoreError;
use skylane_core::types::EntityId;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::RepoError;
use crate::filter::{bind_filter, bind_filter_scalar, clamp_skip, clamp_take, BindValue, SqlFilter};
use crate::models::order_item::{
    CreateOrderItem, OrderItem, OrderItemListParams, OrderItemRow, UpdateOrderItem,
};
use crate::repositories::relations;

const COLUMNS: &str = "id, order_id, name, price, sku, created_at, updated_at";

/// Provides CRUD operations for order items.
pub struct OrderItemRepo;

impl OrderItemRepo {
    /// Insert a new order item and return the canonical record.
    pub async fn create(pool: &PgPool, input: &CreateOrderItem) -> Result<OrderItem, RepoError> {
        let mut tx = pool.begin().await?;

        if let Some(order_id) = input.order {
            relations::ensure_exists(&mut *tx, "orders", "Order", order_id).await?;
        }

        let id = input.id.unwrap_or_else(Uuid::now_v7);
        let query = format!(
            "INSERT INTO order_items (id, order_id, name, price, sku) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, OrderItemRow>(&query)
            .bind(id)
            .bind(input.order)
            .bind(&input.name)
            .bind(input.price)
            .bind(&input.sku)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;

        Self::find_by_id(pool, row.id).await?.ok_or_else(|| {
            CoreError::NotFound {
                entity: "OrderItem",
                id: row.id,
            }
            .into()
        })
    }

    /// Find an order item by its ID.
    pub async fn find_by_id(pool: &PgPool, id: EntityId) -> Result<Option<OrderItem>, RepoError> {
        let query = format!("SELECT {COLUMNS} FROM order_items WHERE id = $1");
        let row = sqlx::query_as::<_, OrderItemRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(OrderItem::from))
    }

    /// List order items with filtering, paging and sort.
    pub async fn list(
        pool: &PgPool,
        params: &OrderItemListParams,
    ) -> Result<Vec<OrderItem>, RepoError> {
        Self::list_filtered(pool, None, params).await
    }

    /// List items belonging to a given order.
    pub async fn list_by_order(
        pool: &PgPool,
        order_id: EntityId,
        params: &OrderItemListParams,
    ) -> Result<Vec<OrderItem>, RepoError> {
        Self::list_filtered(pool, Some(("order_id", order_id)), params).await
    }

    /// Count order items matching the given filter.
    pub async fn count(pool: &PgPool, params: &OrderItemListParams) -> Result<i64, RepoError> {
        let filter = build_order_item_filter(params, None);
        let query = format!(
            "SELECT COUNT(*)::BIGINT FROM order_items {}",
            filter.where_clause()
        );
        let q = bind_filter_scalar(sqlx::query_scalar::<_, i64>(&query), filter.values());
        Ok(q.fetch_one(pool).await?)
    }

    /// Update an order item. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: EntityId,
        input: &UpdateOrderItem,
    ) -> Result<Option<OrderItem>, RepoError> {
        let mut tx = pool.begin().await?;

        if let Some(order_id) = input.order {
            relations::ensure_exists(&mut *tx, "orders", "Order", order_id).await?;
        }

        let query = format!(
            "UPDATE order_items SET \
                order_id = COALESCE($2, order_id), \
                name = COALESCE($3, name), \
                price = COALESCE($4, price), \
                sku = COALESCE($5, sku), \
                updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, OrderItemRow>(&query)
            .bind(id)
            .bind(input.order)
            .bind(&input.name)
            .bind(input.price)
            .bind(&input.sku)
            .fetch_optional(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(row.map(OrderItem::from))
    }

    /// Delete an order item by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: EntityId) -> Result<bool, RepoError> {
        let result = sqlx::query("DELETE FROM order_items WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // -----------------------------------------------------------------------
    // Internal helpers
    // -----------------------------------------------------------------------

    async fn list_filtered(
        pool: &PgPool,
        scope: Option<(&'static str, EntityId)>,
        params: &OrderItemListParams,
    ) -> Result<Vec<OrderItem>, RepoError> {
        let filter = build_order_item_filter(params, scope);
        let order = params.sort_by.unwrap_or_default().column();
        let dir = params.sort_order.unwrap_or_default().as_sql();
        let query = format!(
            "SELECT {COLUMNS} FROM order_items {} \
             ORDER BY {order} {dir}, id ASC \
             LIMIT ${} OFFSET ${}",
            filter.where_clause(),
            filter.next_idx(),
            filter.next_idx() + 1
        );

        let q = bind_filter(sqlx::query_as::<_, OrderItemRow>(&query), filter.values());
        let rows = q
            .bind(clamp_take(params.take))
            .bind(clamp_skip(params.skip))
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(OrderItem::from).collect())
    }
}

/// Build a WHERE clause from order item filter parameters.
fn build_order_item_filter(
    params: &OrderItemListParams,
    scope: Option<(&'static str, EntityId)>,
) -> SqlFilter {
    let mut filter = SqlFilter::new();

    if let Some((column, id)) = scope {
        filter.push(column, BindValue::Id(id));
    }
    if let Some(id) = params.id {
        filter.push("id", BindValue::Id(id));
    }
    if let Some(ref name) = params.name {
        filter.push("name", BindValue::Text(name.clone()));
    }
    if let Some(price) = params.price {
        filter.push("price", BindValue::Float(price));
    }
    if let Some(ref sku) = params.sku {
        filter.push("sku", BindValue::Text(sku.clone()));
    }
    if let Some(order_id) = params.order {
        filter.push("order_id", BindValue::Id(order_id));
    }
    if let Some(created_at) = params.created_at {
        filter.push("created_at", BindValue::Timestamp(created_at));
    }
    if let Some(updated_at) = params.updated_at {
        filter.push("updated_at", BindValue::Timestamp(updated_at));
    }

    filter
}
