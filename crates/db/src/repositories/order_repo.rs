//! Repository for the `orders` table.

use skylane_core::error::CoreError;
use skylane_core::types::EntityId;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::RepoError;
use crate::filter::{bind_filter, bind_filter_scalar, clamp_skip, clamp_take, BindValue, SqlFilter};
use crate::models::order::{CreateOrder, Order, OrderListParams, OrderRow, UpdateOrder};
use crate::repositories::relations;

const COLUMNS: &str = "id, customer_id, status, created_at, updated_at";

/// Provides CRUD and relation operations for orders.
pub struct OrderRepo;

impl OrderRepo {
    /// Insert a new order and return the canonical record.
    pub async fn create(pool: &PgPool, input: &CreateOrder) -> Result<Order, RepoError> {
        let mut tx = pool.begin().await?;

        if let Some(customer_id) = input.customer {
            relations::ensure_exists(&mut *tx, "customers", "Customer", customer_id).await?;
        }

        let id = input.id.unwrap_or_else(Uuid::now_v7);
        let query = format!(
            "INSERT INTO orders (id, customer_id, status) \
             VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, OrderRow>(&query)
            .bind(id)
            .bind(input.customer)
            .bind(&input.status)
            .fetch_one(&mut *tx)
            .await?;

        if !input.order_items.is_empty() {
            relations::attach_children(
                &mut tx,
                "order_items",
                "order_id",
                "OrderItem",
                row.id,
                &input.order_items,
            )
            .await?;
        }
        if !input.payments.is_empty() {
            relations::attach_children(
                &mut tx,
                "payments",
                "order_id",
                "Payment",
                row.id,
                &input.payments,
            )
            .await?;
        }

        tx.commit().await?;

        Self::find_by_id(pool, row.id).await?.ok_or_else(|| {
            CoreError::NotFound {
                entity: "Order",
                id: row.id,
            }
            .into()
        })
    }

    /// Find an order by ID, with its item and payment ID lists.
    pub async fn find_by_id(pool: &PgPool, id: EntityId) -> Result<Option<Order>, RepoError> {
        let query = format!("SELECT {COLUMNS} FROM orders WHERE id = $1");
        let row = sqlx::query_as::<_, OrderRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        match row {
            Some(row) => Ok(Self::assemble(pool, vec![row]).await?.into_iter().next()),
            None => Ok(None),
        }
    }

    /// List orders with filtering, paging and sort.
    pub async fn list(pool: &PgPool, params: &OrderListParams) -> Result<Vec<Order>, RepoError> {
        Self::list_filtered(pool, None, params).await
    }

    /// List orders placed by a given customer.
    pub async fn list_by_customer(
        pool: &PgPool,
        customer_id: EntityId,
        params: &OrderListParams,
    ) -> Result<Vec<Order>, RepoError> {
        Self::list_filtered(pool, Some(("customer_id", customer_id)), params).await
    }

    /// Count orders matching the given filter.
    pub async fn count(pool: &PgPool, params: &OrderListParams) -> Result<i64, RepoError> {
        let filter = build_order_filter(params, None);
        let query = format!("SELECT COUNT(*)::BIGINT FROM orders {}", filter.where_clause());
        let q = bind_filter_scalar(sqlx::query_scalar::<_, i64>(&query), filter.values());
        Ok(q.fetch_one(pool).await?)
    }

    /// Update an order. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: EntityId,
        input: &UpdateOrder,
    ) -> Result<Option<Order>, RepoError> {
        let mut tx = pool.begin().await?;

        if let Some(customer_id) = input.customer {
            relations::ensure_exists(&mut *tx, "customers", "Customer", customer_id).await?;
        }

        let query = format!(
            "UPDATE orders SET \
                customer_id = COALESCE($2, customer_id), \
                status = COALESCE($3, status), \
                updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, OrderRow>(&query)
            .bind(id)
            .bind(input.customer)
            .bind(&input.status)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        if let Some(ref order_items) = input.order_items {
            relations::set_children(&mut tx, "order_items", "order_id", "OrderItem", row.id, order_items)
                .await?;
        }
        if let Some(ref payments) = input.payments {
            relations::set_children(&mut tx, "payments", "order_id", "Payment", row.id, payments)
                .await?;
        }

        tx.commit().await?;
        Self::find_by_id(pool, id).await
    }

    /// Delete an order by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: EntityId) -> Result<bool, RepoError> {
        let result = sqlx::query("DELETE FROM orders WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // -----------------------------------------------------------------------
    // Relation operations
    // -----------------------------------------------------------------------

    /// Attach the listed items to this order (idempotent per child).
    pub async fn connect_order_items(
        pool: &PgPool,
        id: EntityId,
        item_ids: &[EntityId],
    ) -> Result<(), RepoError> {
        let mut tx = pool.begin().await?;
        relations::ensure_exists(&mut *tx, "orders", "Order", id).await?;
        relations::attach_children(&mut tx, "order_items", "order_id", "OrderItem", id, item_ids)
            .await?;
        tx.commit().await?;
        Ok(())
    }

    /// Detach the listed items from this order.
    pub async fn disconnect_order_items(
        pool: &PgPool,
        id: EntityId,
        item_ids: &[EntityId],
    ) -> Result<(), RepoError> {
        let mut tx = pool.begin().await?;
        relations::ensure_exists(&mut *tx, "orders", "Order", id).await?;
        relations::detach_children(&mut tx, "order_items", "order_id", id, item_ids).await?;
        tx.commit().await?;
        Ok(())
    }

    /// Replace this order's items with exactly the listed set.
    pub async fn replace_order_items(
        pool: &PgPool,
        id: EntityId,
        item_ids: &[EntityId],
    ) -> Result<(), RepoError> {
        if item_ids.is_empty() {
            return Err(CoreError::NotFoundMany { entity: "OrderItem" }.into());
        }
        let mut tx = pool.begin().await?;
        relations::ensure_exists(&mut *tx, "orders", "Order", id).await?;
        relations::set_children(&mut tx, "order_items", "order_id", "OrderItem", id, item_ids)
            .await?;
        tx.commit().await?;
        Ok(())
    }

    /// Attach the listed payments to this order (idempotent per child).
    pub async fn connect_payments(
        pool: &PgPool,
        id: EntityId,
        payment_ids: &[EntityId],
    ) -> Result<(), RepoError> {
        let mut tx = pool.begin().await?;
        relations::ensure_exists(&mut *tx, "orders", "Order", id).await?;
        relations::attach_children(&mut tx, "payments", "order_id", "Payment", id, payment_ids)
            .await?;
        tx.commit().await?;
        Ok(())
    }

    /// Detach the listed payments from this order.
    pub async fn disconnect_payments(
        pool: &PgPool,
        id: EntityId,
        payment_ids: &[EntityId],
    ) -> Result<(), RepoError> {
        let mut tx = pool.begin().await?;
        relations::ensure_exists(&mut *tx, "orders", "Order", id).await?;
        relations::detach_children(&mut tx, "payments", "order_id", id, payment_ids).await?;
        tx.commit().await?;
        Ok(())
    }

    /// Replace this order's payments with exactly the listed set.
    pub async fn replace_payments(
        pool: &PgPool,
        id: EntityId,
        payment_ids: &[EntityId],
    ) -> Result<(), RepoError> {
        if payment_ids.is_empty() {
            return Err(CoreError::NotFoundMany { entity: "Payment" }.into());
        }
        let mut tx = pool.begin().await?;
        relations::ensure_exists(&mut *tx, "orders", "Order", id).await?;
        relations::set_children(&mut tx, "payments", "order_id", "Payment", id, payment_ids)
            .await?;
        tx.commit().await?;
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Internal helpers
    // -----------------------------------------------------------------------

    async fn list_filtered(
        pool: &PgPool,
        scope: Option<(&'static str, EntityId)>,
        params: &OrderListParams,
    ) -> Result<Vec<Order>, RepoError> {
        let filter = build_order_filter(params, scope);
        let order = params.sort_by.unwrap_or_default().column();
        let dir = params.sort_order.unwrap_or_default().as_sql();
        let query = format!(
            "SELECT {COLUMNS} FROM orders {} \
             ORDER BY {order} {dir}, id ASC \
             LIMIT ${} OFFSET ${}",
            filter.where_clause(),
            filter.next_idx(),
            filter.next_idx() + 1
        );

        let q = bind_filter(sqlx::query_as::<_, OrderRow>(&query), filter.values());
        let rows = q
            .bind(clamp_take(params.take))
            .bind(clamp_skip(params.skip))
            .fetch_all(pool)
            .await?;
        Self::assemble(pool, rows).await
    }

    /// Enrich rows with their item and payment ID lists.
    async fn assemble(pool: &PgPool, rows: Vec<OrderRow>) -> Result<Vec<Order>, RepoError> {
        let ids: Vec<EntityId> = rows.iter().map(|r| r.id).collect();
        let mut items =
            relations::child_ids_by_parent(pool, "order_items", "order_id", &ids).await?;
        let mut payments =
            relations::child_ids_by_parent(pool, "payments", "order_id", &ids).await?;
        Ok(rows
            .into_iter()
            .map(|row| {
                let i = items.remove(&row.id).unwrap_or_default();
                let p = payments.remove(&row.id).unwrap_or_default();
                Order::from_parts(row, i, p)
            })
            .collect())
    }
}

/// Build a WHERE clause from order filter parameters.
fn build_order_filter(
    params: &OrderListParams,
    scope: Option<(&'static str, EntityId)>,
) -> SqlFilter {
    let mut filter = SqlFilter::new();

    if let Some((column, id)) = scope {
        filter.push(column, BindValue::Id(id));
    }
    if let Some(id) = params.id {
        filter.push("id", BindValue::Id(id));
    }
    if let Some(ref status) = params.status {
        filter.push("status", BindValue::Text(status.clone()));
    }
    if let Some(customer_id) = params.customer {
        filter.push("customer_id", BindValue::Id(customer_id));
    }
    if let Some(created_at) = params.created_at {
        filter.push("created_at", BindValue::Timestamp(created_at));
    }
    if let Some(updated_at) = params.updated_at {
        filter.push("updated_at", BindValue::Timestamp(updated_at));
    }

    filter
}
