//! Repository for the `passengers` table.

use skylane_core::error::CoreError;
use skylane_core::types::EntityId;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::RepoError;
use crate::filter::{bind_filter, bind_filter_scalar, clamp_skip, clamp_take, BindValue, SqlFilter};
use crate::models::passenger::{
    CreatePassenger, Passenger, PassengerListParams, PassengerRow, UpdatePassenger,
};
use crate::repositories::relations;

const COLUMNS: &str = "id, email, first_name, last_name, phone, created_at, updated_at";

/// Provides CRUD and relation operations for passengers.
pub struct PassengerRepo;

impl PassengerRepo {
    /// Insert a new passenger and return the canonical record.
    pub async fn create(pool: &PgPool, input: &CreatePassenger) -> Result<Passenger, RepoError> {
        let mut tx = pool.begin().await?;

        let id = input.id.unwrap_or_else(Uuid::now_v7);
        let query = format!(
            "INSERT INTO passengers (id, email, first_name, last_name, phone) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, PassengerRow>(&query)
            .bind(id)
            .bind(&input.email)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .bind(&input.phone)
            .fetch_one(&mut *tx)
            .await?;

        if !input.bookings.is_empty() {
            relations::attach_children(
                &mut tx,
                "bookings",
                "passenger_id",
                "Booking",
                row.id,
                &input.bookings,
            )
            .await?;
        }

        tx.commit().await?;

        Self::find_by_id(pool, row.id).await?.ok_or_else(|| {
            CoreError::NotFound {
                entity: "Passenger",
                id: row.id,
            }
            .into()
        })
    }

    /// Find a passenger by ID, with their booking ID list.
    pub async fn find_by_id(pool: &PgPool, id: EntityId) -> Result<Option<Passenger>, RepoError> {
        let query = format!("SELECT {COLUMNS} FROM passengers WHERE id = $1");
        let row = sqlx::query_as::<_, PassengerRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        match row {
            Some(row) => Ok(Self::assemble(pool, vec![row]).await?.into_iter().next()),
            None => Ok(None),
        }
    }

    /// List passengers with filtering, paging and sort.
    pub async fn list(
        pool: &PgPool,
        params: &PassengerListParams,
    ) -> Result<Vec<Passenger>, RepoError> {
        let filter = build_passenger_filter(params);
        let order = params.sort_by.unwrap_or_default().column();
        let dir = params.sort_order.unwrap_or_default().as_sql();
        let query = format!(
            "SELECT {COLUMNS} FROM passengers {} \
             ORDER BY {order} {dir}, id ASC \
             LIMIT ${} OFFSET ${}",
            filter.where_clause(),
            filter.next_idx(),
            filter.next_idx() + 1
        );

        let q = bind_filter(sqlx::query_as::<_, PassengerRow>(&query), filter.values());
        let rows = q
            .bind(clamp_take(params.take))
            .bind(clamp_skip(params.skip))
            .fetch_all(pool)
            .await?;
        Self::assemble(pool, rows).await
    }

    /// Count passengers matching the given filter.
    pub async fn count(pool: &PgPool, params: &PassengerListParams) -> Result<i64, RepoError> {
        let filter = build_passenger_filter(params);
        let query = format!(
            "SELECT COUNT(*)::BIGINT FROM passengers {}",
            filter.where_clause()
        );
        let q = bind_filter_scalar(sqlx::query_scalar::<_, i64>(&query), filter.values());
        Ok(q.fetch_one(pool).await?)
    }

    /// Update a passenger. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: EntityId,
        input: &UpdatePassenger,
    ) -> Result<Option<Passenger>, RepoError> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE passengers SET \
                email = COALESCE($2, email), \
                first_name = COALESCE($3, first_name), \
                last_name = COALESCE($4, last_name), \
                phone = COALESCE($5, phone), \
                updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, PassengerRow>(&query)
            .bind(id)
            .bind(&input.email)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .bind(&input.phone)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        if let Some(ref bookings) = input.bookings {
            relations::set_children(&mut tx, "bookings", "passenger_id", "Booking", row.id, bookings)
                .await?;
        }

        tx.commit().await?;
        Self::find_by_id(pool, id).await
    }

    /// Delete a passenger by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: EntityId) -> Result<bool, RepoError> {
        let result = sqlx::query("DELETE FROM passengers WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // -----------------------------------------------------------------------
    // Relation operations
    // -----------------------------------------------------------------------

    /// Attach the listed bookings to this passenger (idempotent per child).
    pub async fn connect_bookings(
        pool: &PgPool,
        id: EntityId,
        booking_ids: &[EntityId],
    ) -> Result<(), RepoError> {
        let mut tx = pool.begin().await?;
        relations::ensure_exists(&mut *tx, "passengers", "Passenger", id).await?;
        relations::attach_children(&mut tx, "bookings", "passenger_id", "Booking", id, booking_ids)
            .await?;
        tx.commit().await?;
        Ok(())
    }

    /// Detach the listed bookings from this passenger.
    pub async fn disconnect_bookings(
        pool: &PgPool,
        id: EntityId,
        booking_ids: &[EntityId],
    ) -> Result<(), RepoError> {
        let mut tx = pool.begin().await?;
        relations::ensure_exists(&mut *tx, "passengers", "Passenger", id).await?;
        relations::detach_children(&mut tx, "bookings", "passenger_id", id, booking_ids).await?;
        tx.commit().await?;
        Ok(())
    }

    /// Replace this passenger's bookings with exactly the listed set.
    pub async fn replace_bookings(
        pool: &PgPool,
        id: EntityId,
        booking_ids: &[EntityId],
    ) -> Result<(), RepoError> {
        if booking_ids.is_empty() {
            return Err(CoreError::NotFoundMany { entity: "Booking" }.into());
        }
        let mut tx = pool.begin().await?;
        relations::ensure_exists(&mut *tx, "passengers", "Passenger", id).await?;
        relations::set_children(&mut tx, "bookings", "passenger_id", "Booking", id, booking_ids)
            .await?;
        tx.commit().await?;
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Internal helpers
    // -----------------------------------------------------------------------

    /// Enrich rows with their booking ID lists.
    async fn assemble(pool: &PgPool, rows: Vec<PassengerRow>) -> Result<Vec<Passenger>, RepoError> {
        let ids: Vec<EntityId> = rows.iter().map(|r| r.id).collect();
        let mut bookings =
            relations::child_ids_by_parent(pool, "bookings", "passenger_id", &ids).await?;
        Ok(rows
            .into_iter()
            .map(|row| {
                let b = bookings.remove(&row.id).unwrap_or_default();
                Passenger::from_parts(row, b)
            })
            .collect())
    }
}

/// Build a WHERE clause from passenger filter parameters.
fn build_passenger_filter(params: &PassengerListParams) -> SqlFilter {
    let mut filter = SqlFilter::new();

    if let Some(id) = params.id {
        filter.push("id", BindValue::Id(id));
    }
    if let Some(ref email) = params.email {
        filter.push("email", BindValue::Text(email.clone()));
    }
    if let Some(ref first_name) = params.first_name {
        filter.push("first_name", BindValue::Text(first_name.clone()));
    }
    if let Some(ref last_name) = params.last_name {
        filter.push("last_name", BindValue::Text(last_name.clone()));
    }
    if let Some(ref phone) = params.phone {
        filter.push("phone", BindValue::Text(phone.clone()));
    }
    if let Some(created_at) = params.created_at {
        filter.push("created_at", BindValue::Timestamp(created_at));
    }
    if let Some(updated_at) = params.updated_at {
        filter.push("updated_at", BindValue::Timestamp(updated_at));
    }

    filter
}
