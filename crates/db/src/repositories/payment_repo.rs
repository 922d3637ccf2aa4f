//! Repository for the `payments` table.

use skylane_core::error::CoreError;
use skylane_core::types::EntityId;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::RepoError;
use crate::filter::{bind_filter, bind_filter_scalar, clamp_skip, clamp_take, BindValue, SqlFilter};
use crate::models::payment::{
    CreatePayment, Payment, PaymentListParams, PaymentRow, UpdatePayment,
};
use crate::repositories::relations;

const COLUMNS: &str = "id, order_id, amount, created_at, updated_at";

/// Provides CRUD operations for payments.
pub struct PaymentRepo;

impl PaymentRepo {
    /// Insert a new payment and return the canonical record.
    pub async fn create(pool: &PgPool, input: &CreatePayment) -> Result<Payment, RepoError> {
        let mut tx = pool.begin().await?;

        if let Some(order_id) = input.order {
            relations::ensure_exists(&mut *tx, "orders", "Order", order_id).await?;
        }

        let id = input.id.unwrap_or_else(Uuid::now_v7);
        let query = format!(
            "INSERT INTO payments (id, order_id, amount) \
             VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, PaymentRow>(&query)
            .bind(id)
            .bind(input.order)
            .bind(input.amount)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;

        Self::find_by_id(pool, row.id).await?.ok_or_else(|| {
            CoreError::NotFound {
                entity: "Payment",
                id: row.id,
            }
            .into()
        })
    }

    /// Find a payment by its ID.
    pub async fn find_by_id(pool: &PgPool, id: EntityId) -> Result<Option<Payment>, RepoError> {
        let query = format!("SELECT {COLUMNS} FROM payments WHERE id = $1");
        let row = sqlx::query_as::<_, PaymentRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(Payment::from))
    }

    /// List payments with filtering, paging and sort.
    pub async fn list(
        pool: &PgPool,
        params: &PaymentListParams,
    ) -> Result<Vec<Payment>, RepoError> {
        Self::list_filtered(pool, None, params).await
    }

    /// List payments applied to a given order.
    pub async fn list_by_order(
        pool: &PgPool,
        order_id: EntityId,
        params: &PaymentListParams,
    ) -> Result<Vec<Payment>, RepoError> {
        Self::list_filtered(pool, Some(("order_id", order_id)), params).await
    }

    /// Count payments matching the given filter.
    pub async fn count(pool: &PgPool, params: &PaymentListParams) -> Result<i64, RepoError> {
        let filter = build_payment_filter(params, None);
        let query = format!(
            "SELECT COUNT(*)::BIGINT FROM payments {}",
            filter.where_clause()
        );
        let q = bind_filter_scalar(sqlx::query_scalar::<_, i64>(&query), filter.values());
        Ok(q.fetch_one(pool).await?)
    }

    /// Update a payment. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: EntityId,
        input: &UpdatePayment,
    ) -> Result<Option<Payment>, RepoError> {
        let mut tx = pool.begin().await?;

        if let Some(order_id) = input.order {
            relations::ensure_exists(&mut *tx, "orders", "Order", order_id).await?;
        }

        let query = format!(
            "UPDATE payments SET \
                order_id = COALESCE($2, order_id), \
                amount = COALESCE($3, amount), \
                updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, PaymentRow>(&query)
            .bind(id)
            .bind(input.order)
            .bind(input.amount)
            .fetch_optional(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(row.map(Payment::from))
    }

    /// Delete a payment by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: EntityId) -> Result<bool, RepoError> {
        let result = sqlx::query("DELETE FROM payments WHERE id = $1")
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
        params: &PaymentListParams,
    ) -> Result<Vec<Payment>, RepoError> {
        let filter = build_payment_filter(params, scope);
        let order = params.sort_by.unwrap_or_default().column();
        let dir = params.sort_order.unwrap_or_default().as_sql();
        let query = format!(
            "SELECT {COLUMNS} FROM payments {} \
             ORDER BY {order} {dir}, id ASC \
             LIMIT ${} OFFSET ${}",
            filter.where_clause(),
            filter.next_idx(),
            filter.next_idx() + 1
        );

        let q = bind_filter(sqlx::query_as::<_, PaymentRow>(&query), filter.values());
        let rows = q
            .bind(clamp_take(params.take))
            .bind(clamp_skip(params.skip))
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(Payment::from).collect())
    }
}

/// Build a WHERE clause from payment filter parameters.
fn build_payment_filter(
    params: &PaymentListParams,
    scope: Option<(&'static str, EntityId)>,
) -> SqlFilter {
    let mut filter = SqlFilter::new();

    if let Some((column, id)) = scope {
        filter.push(column, BindValue::Id(id));
    }
    if let Some(id) = params.id {
        filter.push("id", BindValue::Id(id));
    }
    if let Some(amount) = params.amount {
        filter.push("amount", BindValue::Float(amount));
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
