//! Repository for the `flights` table.

use skylane_core::error::CoreError;
use skylane_core::types::EntityId;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::RepoError;
use crate::filter::{bind_filter, bind_filter_scalar, clamp_skip, clamp_take, BindValue, SqlFilter};
use crate::models::flight::{
    CreateFlight, Flight, FlightListParams, FlightRow, FlightSortField, UpdateFlight,
};
use crate::repositories::relations;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, aircraft_id, airline_id, flight_number, departure_time, arrival_time, \
     created_at, updated_at";

/// Provides CRUD and relation operations for flights.
pub struct FlightRepo;

impl FlightRepo {
    /// Insert a new flight and return the canonical record.
    ///
    /// Validates every referenced ID, inserts the row, attaches any
    /// listed bookings and seats, then re-reads the record by ID.
    pub async fn create(pool: &PgPool, input: &CreateFlight) -> Result<Flight, RepoError> {
        let mut tx = pool.begin().await?;

        if let Some(aircraft_id) = input.aircraft {
            relations::ensure_exists(&mut *tx, "aircraft", "Aircraft", aircraft_id).await?;
        }
        if let Some(airline_id) = input.airline {
            relations::ensure_exists(&mut *tx, "airlines", "Airline", airline_id).await?;
        }

        let id = input.id.unwrap_or_else(Uuid::now_v7);
        let query = format!(
            "INSERT INTO flights \
                (id, aircraft_id, airline_id, flight_number, departure_time, arrival_time) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, FlightRow>(&query)
            .bind(id)
            .bind(input.aircraft)
            .bind(input.airline)
            .bind(&input.flight_number)
            .bind(input.departure_time)
            .bind(input.arrival_time)
            .fetch_one(&mut *tx)
            .await?;

        if !input.bookings.is_empty() {
            relations::attach_children(&mut tx, "bookings", "flight_id", "Booking", row.id, &input.bookings)
                .await?;
        }
        if !input.seats.is_empty() {
            relations::attach_children(&mut tx, "seats", "flight_id", "Seat", row.id, &input.seats)
                .await?;
        }

        tx.commit().await?;

        Self::find_by_id(pool, row.id).await?.ok_or_else(|| {
            CoreError::NotFound {
                entity: "Flight",
                id: row.id,
            }
            .into()
        })
    }

    /// Find a flight by its ID, with its collection ID lists.
    pub async fn find_by_id(pool: &PgPool, id: EntityId) -> Result<Option<Flight>, RepoError> {
        let query = format!("SELECT {COLUMNS} FROM flights WHERE id = $1");
        let row = sqlx::query_as::<_, FlightRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        match row {
            Some(row) => Ok(Self::assemble(pool, vec![row]).await?.into_iter().next()),
            None => Ok(None),
        }
    }

    /// List flights with filtering, paging and sort.
    pub async fn list(pool: &PgPool, params: &FlightListParams) -> Result<Vec<Flight>, RepoError> {
        Self::list_filtered(pool, None, params).await
    }

    /// List flights belonging to a given airline.
    pub async fn list_by_airline(
        pool: &PgPool,
        airline_id: EntityId,
        params: &FlightListParams,
    ) -> Result<Vec<Flight>, RepoError> {
        Self::list_filtered(pool, Some(("airline_id", airline_id)), params).await
    }

    /// List flights operated by a given aircraft.
    pub async fn list_by_aircraft(
        pool: &PgPool,
        aircraft_id: EntityId,
        params: &FlightListParams,
    ) -> Result<Vec<Flight>, RepoError> {
        Self::list_filtered(pool, Some(("aircraft_id", aircraft_id)), params).await
    }

    /// Count flights matching the given filter (paging and sort ignored).
    pub async fn count(pool: &PgPool, params: &FlightListParams) -> Result<i64, RepoError> {
        let filter = build_flight_filter(params, None);
        let query = format!("SELECT COUNT(*)::BIGINT FROM flights {}", filter.where_clause());
        let q = bind_filter_scalar(sqlx::query_scalar::<_, i64>(&query), filter.values());
        Ok(q.fetch_one(pool).await?)
    }

    /// Update a flight. Only non-`None` fields in `input` are applied;
    /// provided collections are wholesale-replaced.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: EntityId,
        input: &UpdateFlight,
    ) -> Result<Option<Flight>, RepoError> {
        let mut tx = pool.begin().await?;

        if let Some(aircraft_id) = input.aircraft {
            relations::ensure_exists(&mut *tx, "aircraft", "Aircraft", aircraft_id).await?;
        }
        if let Some(airline_id) = input.airline {
            relations::ensure_exists(&mut *tx, "airlines", "Airline", airline_id).await?;
        }

        let query = format!(
            "UPDATE flights SET \
                aircraft_id = COALESCE($2, aircraft_id), \
                airline_id = COALESCE($3, airline_id), \
                flight_number = COALESCE($4, flight_number), \
                departure_time = COALESCE($5, departure_time), \
                arrival_time = COALESCE($6, arrival_time), \
                updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, FlightRow>(&query)
            .bind(id)
            .bind(input.aircraft)
            .bind(input.airline)
            .bind(&input.flight_number)
            .bind(input.departure_time)
            .bind(input.arrival_time)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        if let Some(ref bookings) = input.bookings {
            relations::set_children(&mut tx, "bookings", "flight_id", "Booking", row.id, bookings)
                .await?;
        }
        if let Some(ref seats) = input.seats {
            relations::set_children(&mut tx, "seats", "flight_id", "Seat", row.id, seats).await?;
        }

        tx.commit().await?;
        Self::find_by_id(pool, id).await
    }

    /// Delete a flight by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: EntityId) -> Result<bool, RepoError> {
        let result = sqlx::query("DELETE FROM flights WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // -----------------------------------------------------------------------
    // Relation operations
    // -----------------------------------------------------------------------

    /// Attach the listed bookings to this flight (idempotent per child).
    pub async fn connect_bookings(
        pool: &PgPool,
        id: EntityId,
        booking_ids: &[EntityId],
    ) -> Result<(), RepoError> {
        let mut tx = pool.begin().await?;
        relations::ensure_exists(&mut *tx, "flights", "Flight", id).await?;
        relations::attach_children(&mut tx, "bookings", "flight_id", "Booking", id, booking_ids)
            .await?;
        tx.commit().await?;
        Ok(())
    }

    /// Detach the listed bookings from this flight.
    pub async fn disconnect_bookings(
        pool: &PgPool,
        id: EntityId,
        booking_ids: &[EntityId],
    ) -> Result<(), RepoError> {
        let mut tx = pool.begin().await?;
        relations::ensure_exists(&mut *tx, "flights", "Flight", id).await?;
        relations::detach_children(&mut tx, "bookings", "flight_id", id, booking_ids).await?;
        tx.commit().await?;
        Ok(())
    }

    /// Replace this flight's bookings with exactly the listed set.
    pub async fn replace_bookings(
        pool: &PgPool,
        id: EntityId,
        booking_ids: &[EntityId],
    ) -> Result<(), RepoError> {
        if booking_ids.is_empty() {
            return Err(CoreError::NotFoundMany { entity: "Booking" }.into());
        }
        let mut tx = pool.begin().await?;
        relations::ensure_exists(&mut *tx, "flights", "Flight", id).await?;
        relations::set_children(&mut tx, "bookings", "flight_id", "Booking", id, booking_ids)
            .await?;
        tx.commit().await?;
        Ok(())
    }

    /// Attach the listed seats to this flight (idempotent per child).
    pub async fn connect_seats(
        pool: &PgPool,
        id: EntityId,
        seat_ids: &[EntityId],
    ) -> Result<(), RepoError> {
        let mut tx = pool.begin().await?;
        relations::ensure_exists(&mut *tx, "flights", "Flight", id).await?;
        relations::attach_children(&mut tx, "seats", "flight_id", "Seat", id, seat_ids).await?;
        tx.commit().await?;
        Ok(())
    }

    /// Detach the listed seats from this flight.
    pub async fn disconnect_seats(
        pool: &PgPool,
        id: EntityId,
        seat_ids: &[EntityId],
    ) -> Result<(), RepoError> {
        let mut tx = pool.begin().await?;
        relations::ensure_exists(&mut *tx, "flights", "Flight", id).await?;
        relations::detach_children(&mut tx, "seats", "flight_id", id, seat_ids).await?;
        tx.commit().await?;
        Ok(())
    }

    /// Replace this flight's seats with exactly the listed set.
    pub async fn replace_seats(
        pool: &PgPool,
        id: EntityId,
        seat_ids: &[EntityId],
    ) -> Result<(), RepoError> {
        if seat_ids.is_empty() {
            return Err(CoreError::NotFoundMany { entity: "Seat" }.into());
        }
        let mut tx = pool.begin().await?;
        relations::ensure_exists(&mut *tx, "flights", "Flight", id).await?;
        relations::set_children(&mut tx, "seats", "flight_id", "Seat", id, seat_ids).await?;
        tx.commit().await?;
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Internal helpers
    // -----------------------------------------------------------------------

    async fn list_filtered(
        pool: &PgPool,
        scope: Option<(&'static str, EntityId)>,
        params: &FlightListParams,
    ) -> Result<Vec<Flight>, RepoError> {
        let filter = build_flight_filter(params, scope);
        let order = params.sort_by.unwrap_or_default().column();
        let dir = params.sort_order.unwrap_or_default().as_sql();
        let query = format!(
            "SELECT {COLUMNS} FROM flights {} \
             ORDER BY {order} {dir}, id ASC \
             LIMIT ${} OFFSET ${}",
            filter.where_clause(),
            filter.next_idx(),
            filter.next_idx() + 1
        );

        let q = bind_filter(sqlx::query_as::<_, FlightRow>(&query), filter.values());
        let rows = q
            .bind(clamp_take(params.take))
            .bind(clamp_skip(params.skip))
            .fetch_all(pool)
            .await?;
        Self::assemble(pool, rows).await
    }

    /// Enrich rows with their booking and seat ID lists.
    async fn assemble(pool: &PgPool, rows: Vec<FlightRow>) -> Result<Vec<Flight>, RepoError> {
        let ids: Vec<EntityId> = rows.iter().map(|r| r.id).collect();
        let mut bookings =
            relations::child_ids_by_parent(pool, "bookings", "flight_id", &ids).await?;
        let mut seats = relations::child_ids_by_parent(pool, "seats", "flight_id", &ids).await?;
        Ok(rows
            .into_iter()
            .map(|row| {
                let b = bookings.remove(&row.id).unwrap_or_default();
                let s = seats.remove(&row.id).unwrap_or_default();
                Flight::from_parts(row, b, s)
            })
            .collect())
    }
}

/// Build a WHERE clause from flight filter parameters.
///
/// `scope` prepends a parent FK condition for scoped child listings.
fn build_flight_filter(
    params: &FlightListParams,
    scope: Option<(&'static str, EntityId)>,
) -> SqlFilter {
    let mut filter = SqlFilter::new();

    if let Some((column, id)) = scope {
        filter.push(column, BindValue::Id(id));
    }
    if let Some(id) = params.id {
        filter.push("id", BindValue::Id(id));
    }
    if let Some(ref flight_number) = params.flight_number {
        filter.push("flight_number", BindValue::Text(flight_number.clone()));
    }
    if let Some(departure_time) = params.departure_time {
        filter.push("departure_time", BindValue::Timestamp(departure_time));
    }
    if let Some(arrival_time) = params.arrival_time {
        filter.push("arrival_time", BindValue::Timestamp(arrival_time));
    }
    if let Some(aircraft_id) = params.aircraft {
        filter.push("aircraft_id", BindValue::Id(aircraft_id));
    }
    if let Some(airline_id) = params.airline {
        filter.push("airline_id", BindValue::Id(airline_id));
    }
    if let Some(created_at) = params.created_at {
        filter.push("created_at", BindValue::Timestamp(created_at));
    }
    if let Some(updated_at) = params.updated_at {
        filter.push("updated_at", BindValue::Timestamp(updated_at));
    }

    filter
}
