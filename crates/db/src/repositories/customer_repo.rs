//! Repository for the `customers` table.

use skylane_core::error::CoreError;
use skylane_core::types::EntityId;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::RepoError;
use crate::filter::{bind_filter, bind_filter_scalar, clamp_skip, clamp_take, BindValue, SqlFilter};
use crate::models::customer::{
    CreateCustomer, Customer, CustomerListParams, CustomerRow, UpdateCustomer,
};
use crate::repositories::relations;

const COLUMNS: &str = "id, first_name, last_name, created_at, updated_at";

/// Provides CRUD and relation operations for customers.
pub struct CustomerRepo;

impl CustomerRepo {
    /// Insert a new customer and return the canonical record.
    pub async fn create(pool: &PgPool, input: &CreateCustomer) -> Result<Customer, RepoError> {
        let mut tx = pool.begin().await?;

        let id = input.id.unwrap_or_else(Uuid::now_v7);
        let query = format!(
            "INSERT INTO customers (id, first_name, last_name) \
             VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, CustomerRow>(&query)
            .bind(id)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .fetch_one(&mut *tx)
            .await?;

        if !input.orders.is_empty() {
            relations::attach_children(&mut tx, "orders", "customer_id", "Order", row.id, &input.orders)
                .await?;
        }

        tx.commit().await?;

        Self::find_by_id(pool, row.id).await?.ok_or_else(|| {
            CoreError::NotFound {
                entity: "Customer",
                id: row.id,
            }
            .into()
        })
    }

    /// Find a customer by ID, with their order ID list.
    pub async fn find_by_id(pool: &PgPool, id: EntityId) -> Result<Option<Customer>, RepoError> {
        let query = format!("SELECT {COLUMNS} FROM customers WHERE id = $1");
        let row = sqlx::query_as::<_, CustomerRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        match row {
            Some(row) => Ok(Self::assemble(pool, vec![row]).await?.into_iter().next()),
            None => Ok(None),
        }
    }

    /// List customers with filtering, paging and sort.
    pub async fn list(
        pool: &PgPool,
        params: &CustomerListParams,
    ) -> Result<Vec<Customer>, RepoError> {
        let filter = build_customer_filter(params);
        let order = params.sort_by.unwrap_or_default().column();
        let dir = params.sort_order.unwrap_or_default().as_sql();
        let query = format!(
            "SELECT {COLUMNS} FROM customers {} \
             ORDER BY {order} {dir}, id ASC \
             LIMIT ${} OFFSET ${}",
            filter.where_clause(),
            filter.next_idx(),
            filter.next_idx() + 1
        );

        let q = bind_filter(sqlx::query_as::<_, CustomerRow>(&query), filter.values());
        let rows = q
            .bind(clamp_take(params.take))
            .bind(clamp_skip(params.skip))
            .fetch_all(pool)
            .await?;
        Self::assemble(pool, rows).await
    }

    /// Count customers matching the given filter.
    pub async fn count(pool: &PgPool, params: &CustomerListParams) -> Result<i64, RepoError> {
        let filter = build_customer_filter(params);
        let query = format!(
            "SELECT COUNT(*)::BIGINT FROM customers {}",
            filter.where_clause()
        );
        let q = bind_filter_scalar(sqlx::query_scalar::<_, i64>(&query), filter.values());
        Ok(q.fetch_one(pool).await?)
    }

    /// Update a customer. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: EntityId,
        input: &UpdateCustomer,
    ) -> Result<Option<Customer>, RepoError> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE customers SET \
                first_name = COALESCE($2, first_name), \
                last_name = COALESCE($3, last_name), \
                updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, CustomerRow>(&query)
            .bind(id)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        if let Some(ref orders) = input.orders {
            relations::set_children(&mut tx, "orders", "customer_id", "Order", row.id, orders)
                .await?;
        }

        tx.commit().await?;
        Self::find_by_id(pool, id).await
    }

    /// Delete a customer by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: EntityId) -> Result<bool, RepoError> {
        let result = sqlx::query("DELETE FROM customers WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // -----------------------------------------------------------------------
    // Relation operations
    // -----------------------------------------------------------------------

    /// Attach the listed orders to this customer (idempotent per child).
    pub async fn connect_orders(
        pool: &PgPool,
        id: EntityId,
        order_ids: &[EntityId],
    ) -> Result<(), RepoError> {
        let mut tx = pool.begin().await?;
        relations::ensure_exists(&mut *tx, "customers", "Customer", id).await?;
        relations::attach_children(&mut tx, "orders", "customer_id", "Order", id, order_ids)
            .await?;
        tx.commit().await?;
        Ok(())
    }

    /// Detach the listed orders from this customer.
    pub async fn disconnect_orders(
        pool: &PgPool,
        id: EntityId,
        order_ids: &[EntityId],
    ) -> Result<(), RepoError> {
        let mut tx = pool.begin().await?;
        relations::ensure_exists(&mut *tx, "customers", "Customer", id).await?;
        relations::detach_children(&mut tx, "orders", "customer_id", id, order_ids).await?;
        tx.commit().await?;
        Ok(())
    }

    /// Replace this customer's orders with exactly the listed set.
    pub async fn replace_orders(
        pool: &PgPool,
        id: EntityId,
        order_ids: &[EntityId],
    ) -> Result<(), RepoError> {
        if order_ids.is_empty() {
            return Err(CoreError::NotFoundMany { entity: "Order" }.into());
        }
        let mut tx = pool.begin().await?;
        relations::ensure_exists(&mut *tx, "customers", "Customer", id).await?;
        relations::set_children(&mut tx, "orders", "customer_id", "Order", id, order_ids).await?;
        tx.commit().await?;
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Internal helpers
    // -----------------------------------------------------------------------

    /// Enrich rows with their order ID lists.
    async fn assemble(pool: &PgPool, rows: Vec<CustomerRow>) -> Result<Vec<Customer>, RepoError> {
        let ids: Vec<EntityId> = rows.iter().map(|r| r.id).collect();
        let mut orders =
            relations::child_ids_by_parent(pool, "orders", "customer_id", &ids).await?;
        Ok(rows
            .into_iter()
            .map(|row| {
                let o = orders.remove(&row.id).unwrap_or_default();
                Customer::from_parts(row, o)
            })
            .collect())
    }
}

/// Build a WHERE clause from customer filter parameters.
fn build_customer_filter(params: &CustomerListParams) -> SqlFilter {
    let mut filter = SqlFilter::new();

    if let Some(id) = params.id {
        filter.push("id", BindValue::Id(id));
    }
    if let Some(ref first_name) = params.first_name {
        filter.push("first_name", BindValue::Text(first_name.clone()));
    }
    if let Some(ref last_name) = params.last_name {
        filter.push("last_name", BindValue::Text(last_name.clone()));
    }
    if let Some(created_at) = params.created_at {
        filter.push("created_at", BindValue::Timestamp(created_at));
    }
    if let Some(updated_at) = params.updated_at {
        filter.push("updated_at", BindValue::Timestamp(updated_at));
    }

    filter
}
