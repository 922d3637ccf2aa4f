//! Repository for the `seats` table.

use skylane_core::error::CoreError;
use skylane_core::types::EntityId;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::RepoError;
use crate::filter::{bind_filter, bind_filter_scalar, clamp_skip, clamp_take, BindValue, SqlFilter};
use crate::models::seat::{CreateSeat, Seat, SeatListParams, SeatRow, UpdateSeat};
use crate::repositories::relations;

const COLUMNS: &str = "id, booking_id, flight_id, seat_number, created_at, updated_at";

/// Provides CRUD operations for seats.
pub struct SeatRepo;

impl SeatRepo {
    /// Insert a new seat and return the canonical record.
    pub async fn create(pool: &PgPool, input: &CreateSeat) -> Result<Seat, RepoError> {
        let mut tx = pool.begin().await?;

        if let Some(booking_id) = input.booking {
            relations::ensure_exists(&mut *tx, "bookings", "Booking", booking_id).await?;
        }
        if let Some(flight_id) = input.flight {
            relations::ensure_exists(&mut *tx, "flights", "Flight", flight_id).await?;
        }

        let id = input.id.unwrap_or_else(Uuid::now_v7);
        let query = format!(
            "INSERT INTO seats (id, booking_id, flight_id, seat_number) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, SeatRow>(&query)
            .bind(id)
            .bind(input.booking)
            .bind(input.flight)
            .bind(&input.seat_number)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;

        Self::find_by_id(pool, row.id).await?.ok_or_else(|| {
            CoreError::NotFound {
                entity: "Seat",
                id: row.id,
            }
            .into()
        })
    }

    /// Find a seat by its ID.
    pub async fn find_by_id(pool: &PgPool, id: EntityId) -> Result<Option<Seat>, RepoError> {
        let query = format!("SELECT {COLUMNS} FROM seats WHERE id = $1");
        let row = sqlx::query_as::<_, SeatRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(Seat::from))
    }

    /// List seats with filtering, paging and sort.
    pub async fn list(pool: &PgPool, params: &SeatListParams) -> Result<Vec<Seat>, RepoError> {
        Self::list_filtered(pool, None, params).await
    }

    /// List seats on a given flight.
    pub async fn list_by_flight(
        pool: &PgPool,
        flight_id: EntityId,
        params: &SeatListParams,
    ) -> Result<Vec<Seat>, RepoError> {
        Self::list_filtered(pool, Some(("flight_id", flight_id)), params).await
    }

    /// List seats held by a given booking.
    pub async fn list_by_booking(
        pool: &PgPool,
        booking_id: EntityId,
        params: &SeatListParams,
    ) -> Result<Vec<Seat>, RepoError> {
        Self::list_filtered(pool, Some(("booking_id", booking_id)), params).await
    }

    /// Count seats matching the given filter.
    pub async fn count(pool: &PgPool, params: &SeatListParams) -> Result<i64, RepoError> {
        let filter = build_seat_filter(params, None);
        let query = format!("SELECT COUNT(*)::BIGINT FROM seats {}", filter.where_clause());
        let q = bind_filter_scalar(sqlx::query_scalar::<_, i64>(&query), filter.values());
        Ok(q.fetch_one(pool).await?)
    }

    /// Update a seat. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: EntityId,
        input: &UpdateSeat,
    ) -> Result<Option<Seat>, RepoError> {
        let mut tx = pool.begin().await?;

        if let Some(booking_id) = input.booking {
            relations::ensure_exists(&mut *tx, "bookings", "Booking", booking_id).await?;
        }
        if let Some(flight_id) = input.flight {
            relations::ensure_exists(&mut *tx, "flights", "Flight", flight_id).await?;
        }

        let query = format!(
            "UPDATE seats SET \
                booking_id = COALESCE($2, booking_id), \
                flight_id = COALESCE($3, flight_id), \
                seat_number = COALESCE($4, seat_number), \
                updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, SeatRow>(&query)
            .bind(id)
            .bind(input.booking)
            .bind(input.flight)
            .bind(&input.seat_number)
            .fetch_optional(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(row.map(Seat::from))
    }

    /// Delete a seat by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: EntityId) -> Result<bool, RepoError> {
        let result = sqlx::query("DELETE FROM seats WHERE id = $1")
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
        params: &SeatListParams,
    ) -> Result<Vec<Seat>, RepoError> {
        let filter = build_seat_filter(params, scope);
        let order = params.sort_by.unwrap_or_default().column();
        let dir = params.sort_order.unwrap_or_default().as_sql();
        let query = format!(
            "SELECT {COLUMNS} FROM seats {} \
             ORDER BY {order} {dir}, id ASC \
             LIMIT ${} OFFSET ${}",
            filter.where_clause(),
            filter.next_idx(),
            filter.next_idx() + 1
        );

        let q = bind_filter(sqlx::query_as::<_, SeatRow>(&query), filter.values());
        let rows = q
            .bind(clamp_take(params.take))
            .bind(clamp_skip(params.skip))
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(Seat::from).collect())
    }
}

/// Build a WHERE clause from seat filter parameters.
fn build_seat_filter(params: &SeatListParams, scope: Option<(&'static str, EntityId)>) -> SqlFilter {
    let mut filter = SqlFilter::new();

    if let Some((column, id)) = scope {
        filter.push(column, BindValue::Id(id));
    }
    if let Some(id) = params.id {
        filter.push("id", BindValue::Id(id));
    }
    if let Some(ref seat_number) = params.seat_number {
        filter.push("seat_number", BindValue::Text(seat_number.clone()));
    }
    if let Some(booking_id) = params.booking {
        filter.push("booking_id", BindValue::Id(booking_id));
    }
    if let Some(flight_id) = params.flight {
        filter.push("flight_id", BindValue::Id(flight_id));
    }
    if let Some(created_at) = params.created_at {
        filter.push("created_at", BindValue::Timestamp(created_at));
    }
    if let Some(updated_at) = params.updated_at {
        filter.push("updated_at", BindValue::Timestamp(updated_at));
    }

    filter
}
