//! Repository for the `bookings` table.

use skylane_core::error::CoreError;
use skylane_core::types::EntityId;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::RepoError;
use crate::filter::{bind_filter, bind_filter_scalar, clamp_skip, clamp_take, BindValue, SqlFilter};
use crate::models::booking::{
    Booking, BookingListParams, BookingRow, CreateBooking, UpdateBooking,
};
use crate::repositories::relations;

const COLUMNS: &str = "id, flight_id, passenger_id, booking_date, status, created_at, updated_at";

/// Provides CRUD and relation operations for bookings.
pub struct BookingRepo;

impl BookingRepo {
    /// Insert a new booking and return the canonical record.
    pub async fn create(pool: &PgPool, input: &CreateBooking) -> Result<Booking, RepoError> {
        let mut tx = pool.begin().await?;

        if let Some(flight_id) = input.flight {
            relations::ensure_exists(&mut *tx, "flights", "Flight", flight_id).await?;
        }
        if let Some(passenger_id) = input.passenger {
            relations::ensure_exists(&mut *tx, "passengers", "Passenger", passenger_id).await?;
        }

        let id = input.id.unwrap_or_else(Uuid::now_v7);
        let query = format!(
            "INSERT INTO bookings (id, flight_id, passenger_id, booking_date, status) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, BookingRow>(&query)
            .bind(id)
            .bind(input.flight)
            .bind(input.passenger)
            .bind(input.booking_date)
            .bind(input.status)
            .fetch_one(&mut *tx)
            .await?;

        if !input.seats.is_empty() {
            relations::attach_children(&mut tx, "seats", "booking_id", "Seat", row.id, &input.seats)
                .await?;
        }

        tx.commit().await?;

        Self::find_by_id(pool, row.id).await?.ok_or_else(|| {
            CoreError::NotFound {
                entity: "Booking",
                id: row.id,
            }
            .into()
        })
    }

    /// Find a booking by its ID, with its seat ID list.
    pub async fn find_by_id(pool: &PgPool, id: EntityId) -> Result<Option<Booking>, RepoError> {
        let query = format!("SELECT {COLUMNS} FROM bookings WHERE id = $1");
        let row = sqlx::query_as::<_, BookingRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        match row {
            Some(row) => Ok(Self::assemble(pool, vec![row]).await?.into_iter().next()),
            None => Ok(None),
        }
    }

    /// List bookings with filtering, paging and sort.
    pub async fn list(
        pool: &PgPool,
        params: &BookingListParams,
    ) -> Result<Vec<Booking>, RepoError> {
        Self::list_filtered(pool, None, params).await
    }

    /// List bookings for a given flight.
    pub async fn list_by_flight(
        pool: &PgPool,
        flight_id: EntityId,
        params: &BookingListParams,
    ) -> Result<Vec<Booking>, RepoError> {
        Self::list_filtered(pool, Some(("flight_id", flight_id)), params).await
    }

    /// List bookings made by a given passenger.
    pub async fn list_by_passenger(
        pool: &PgPool,
        passenger_id: EntityId,
        params: &BookingListParams,
    ) -> Result<Vec<Booking>, RepoError> {
        Self::list_filtered(pool, Some(("passenger_id", passenger_id)), params).await
    }

    /// Count bookings matching the given filter.
    pub async fn count(pool: &PgPool, params: &BookingListParams) -> Result<i64, RepoError> {
        let filter = build_booking_filter(params, None);
        let query = format!("SELECT COUNT(*)::BIGINT FROM bookings {}", filter.where_clause());
        let q = bind_filter_scalar(sqlx::query_scalar::<_, i64>(&query), filter.values());
        Ok(q.fetch_one(pool).await?)
    }

    /// Update a booking. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: EntityId,
        input: &UpdateBooking,
    ) -> Result<Option<Booking>, RepoError> {
        let mut tx = pool.begin().await?;

        if let Some(flight_id) = input.flight {
            relations::ensure_exists(&mut *tx, "flights", "Flight", flight_id).await?;
        }
        if let Some(passenger_id) = input.passenger {
            relations::ensure_exists(&mut *tx, "passengers", "Passenger", passenger_id).await?;
        }

        let query = format!(
            "UPDATE bookings SET \
                flight_id = COALESCE($2, flight_id), \
                passenger_id = COALESCE($3, passenger_id), \
                booking_date = COALESCE($4, booking_date), \
                status = COALESCE($5, status), \
                updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, BookingRow>(&query)
            .bind(id)
            .bind(input.flight)
            .bind(input.passenger)
            .bind(input.booking_date)
            .bind(input.status)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        if let Some(ref seats) = input.seats {
            relations::set_children(&mut tx, "seats", "booking_id", "Seat", row.id, seats).await?;
        }

        tx.commit().await?;
        Self::find_by_id(pool, id).await
    }

    /// Delete a booking by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: EntityId) -> Result<bool, RepoError> {
        let result = sqlx::query("DELETE FROM bookings WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // -----------------------------------------------------------------------
    // Relation operations
    // -----------------------------------------------------------------------

    /// Attach the listed seats to this booking (idempotent per child).
    pub async fn connect_seats(
        pool: &PgPool,
        id: EntityId,
        seat_ids: &[EntityId],
    ) -> Result<(), RepoError> {
        let mut tx = pool.begin().await?;
        relations::ensure_exists(&mut *tx, "bookings", "Booking", id).await?;
        relations::attach_children(&mut tx, "seats", "booking_id", "Seat", id, seat_ids).await?;
        tx.commit().await?;
        Ok(())
    }

    /// Detach the listed seats from this booking.
    pub async fn disconnect_seats(
        pool: &PgPool,
        id: EntityId,
        seat_ids: &[EntityId],
    ) -> Result<(), RepoError> {
        let mut tx = pool.begin().await?;
        relations::ensure_exists(&mut *tx, "bookings", "Booking", id).await?;
        relations::detach_children(&mut tx, "seats", "booking_id", id, seat_ids).await?;
        tx.commit().await?;
        Ok(())
    }

    /// Replace this booking's seats with exactly the listed set.
    pub async fn replace_seats(
        pool: &PgPool,
        id: EntityId,
        seat_ids: &[EntityId],
    ) -> Result<(), RepoError> {
        if seat_ids.is_empty() {
            return Err(CoreError::NotFoundMany { entity: "Seat" }.into());
        }
        let mut tx = pool.begin().await?;
        relations::ensure_exists(&mut *tx, "bookings", "Booking", id).await?;
        relations::set_children(&mut tx, "seats", "booking_id", "Seat", id, seat_ids).await?;
        tx.commit().await?;
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Internal helpers
    // -----------------------------------------------------------------------

    async fn list_filtered(
        pool: &PgPool,
        scope: Option<(&'static str, EntityId)>,
        params: &BookingListParams,
    ) -> Result<Vec<Booking>, RepoError> {
        let filter = build_booking_filter(params, scope);
        let order = params.sort_by.unwrap_or_default().column();
        let dir = params.sort_order.unwrap_or_default().as_sql();
        let query = format!(
            "SELECT {COLUMNS} FROM bookings {} \
             ORDER BY {order} {dir}, id ASC \
             LIMIT ${} OFFSET ${}",
            filter.where_clause(),
            filter.next_idx(),
            filter.next_idx() + 1
        );

        let q = bind_filter(sqlx::query_as::<_, BookingRow>(&query), filter.values());
        let rows = q
            .bind(clamp_take(params.take))
            .bind(clamp_skip(params.skip))
            .fetch_all(pool)
            .await?;
        Self::assemble(pool, rows).await
    }

    /// Enrich rows with their seat ID lists.
    async fn assemble(pool: &PgPool, rows: Vec<BookingRow>) -> Result<Vec<Booking>, RepoError> {
        let ids: Vec<EntityId> = rows.iter().map(|r| r.id).collect();
        let mut seats = relations::child_ids_by_parent(pool, "seats", "booking_id", &ids).await?;
        Ok(rows
            .into_iter()
            .map(|row| {
                let s = seats.remove(&row.id).unwrap_or_default();
                Booking::from_parts(row, s)
            })
            .collect())
    }
}

/// Build a WHERE clause from booking filter parameters.
fn build_booking_filter(
    params: &BookingListParams,
    scope: Option<(&'static str, EntityId)>,
) -> SqlFilter {
    let mut filter = SqlFilter::new();

    if let Some((column, id)) = scope {
        filter.push(column, BindValue::Id(id));
    }
    if let Some(id) = params.id {
        filter.push("id", BindValue::Id(id));
    }
    if let Some(booking_date) = params.booking_date {
        filter.push("booking_date", BindValue::Timestamp(booking_date));
    }
    if let Some(status) = params.status {
        filter.push("status", BindValue::Status(status));
    }
    if let Some(flight_id) = params.flight {
        filter.push("flight_id", BindValue::Id(flight_id));
    }
    if let Some(passenger_id) = params.passenger {
        filter.push("passenger_id", BindValue::Id(passenger_id));
    }
    if let Some(created_at) = params.created_at {
        filter.push("created_at", BindValue::Timestamp(created_at));
    }
    if let Some(updated_at) = params.updated_at {
        filter.push("updated_at", BindValue::Timestamp(updated_at));
    }

    filter
}
