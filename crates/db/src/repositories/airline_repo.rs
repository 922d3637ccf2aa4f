//! Repository for the `airlines` table.

use skylane_core::error::CoreError;
use skylane_core::types::EntityId;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::RepoError;
use crate::filter::{bind_filter, bind_filter_scalar, clamp_skip, clamp_take, BindValue, SqlFilter};
use crate::models::airline::{
    Airline, AirlineListParams, AirlineRow, CreateAirline, UpdateAirline,
};
use crate::repositories::relations;

const COLUMNS: &str = "id, name, country, created_at, updated_at";

/// Provides CRUD and relation operations for airlines.
pub struct AirlineRepo;

impl AirlineRepo {
    /// Insert a new airline and return the canonical record.
    pub async fn create(pool: &PgPool, input: &CreateAirline) -> Result<Airline, RepoError> {
        let mut tx = pool.begin().await?;

        let id = input.id.unwrap_or_else(Uuid::now_v7);
        let query = format!(
            "INSERT INTO airlines (id, name, country) \
             VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, AirlineRow>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.country)
            .fetch_one(&mut *tx)
            .await?;

        if !input.aircraft.is_empty() {
            relations::attach_children(&mut tx, "aircraft", "airline_id", "Aircraft", row.id, &input.aircraft)
                .await?;
        }
        if !input.flights.is_empty() {
            relations::attach_children(&mut tx, "flights", "airline_id", "Flight", row.id, &input.flights)
                .await?;
        }

        tx.commit().await?;

        Self::find_by_id(pool, row.id).await?.ok_or_else(|| {
            CoreError::NotFound {
                entity: "Airline",
                id: row.id,
            }
            .into()
        })
    }

    /// Find an airline by its ID, with its collection ID lists.
    pub async fn find_by_id(pool: &PgPool, id: EntityId) -> Result<Option<Airline>, RepoError> {
        let query = format!("SELECT {COLUMNS} FROM airlines WHERE id = $1");
        let row = sqlx::query_as::<_, AirlineRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        match row {
            Some(row) => Ok(Self::assemble(pool, vec![row]).await?.into_iter().next()),
            None => Ok(None),
        }
    }

    /// List airlines with filtering, paging and sort.
    pub async fn list(pool: &PgPool, params: &AirlineListParams) -> Result<Vec<Airline>, RepoError> {
        let filter = build_airline_filter(params);
        let order = params.sort_by.unwrap_or_default().column();
        let dir = params.sort_order.unwrap_or_default().as_sql();
        let query = format!(
            "SELECT {COLUMNS} FROM airlines {} \
             ORDER BY {order} {dir}, id ASC \
             LIMIT ${} OFFSET ${}",
            filter.where_clause(),
            filter.next_idx(),
            filter.next_idx() + 1
        );

        let q = bind_filter(sqlx::query_as::<_, AirlineRow>(&query), filter.values());
        let rows = q
            .bind(clamp_take(params.take))
            .bind(clamp_skip(params.skip))
            .fetch_all(pool)
            .await?;
        Self::assemble(pool, rows).await
    }

    /// Count airlines matching the given filter.
    pub async fn count(pool: &PgPool, params: &AirlineListParams) -> Result<i64, RepoError> {
        let filter = build_airline_filter(params);
        let query = format!("SELECT COUNT(*)::BIGINT FROM airlines {}", filter.where_clause());
        let q = bind_filter_scalar(sqlx::query_scalar::<_, i64>(&query), filter.values());
        Ok(q.fetch_one(pool).await?)
    }

    /// Update an airline. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: EntityId,
        input: &UpdateAirline,
    ) -> Result<Option<Airline>, RepoError> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE airlines SET \
                name = COALESCE($2, name), \
                country = COALESCE($3, country), \
                updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, AirlineRow>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.country)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        if let Some(ref aircraft) = input.aircraft {
            relations::set_children(&mut tx, "aircraft", "airline_id", "Aircraft", row.id, aircraft)
                .await?;
        }
        if let Some(ref flights) = input.flights {
            relations::set_children(&mut tx, "flights", "airline_id", "Flight", row.id, flights)
                .await?;
        }

        tx.commit().await?;
        Self::find_by_id(pool, id).await
    }

    /// Delete an airline by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: EntityId) -> Result<bool, RepoError> {
        let result = sqlx::query("DELETE FROM airlines WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // -----------------------------------------------------------------------
    // Relation operations
    // -----------------------------------------------------------------------

    /// Attach the listed aircraft to this airline (idempotent per child).
    pub async fn connect_aircraft(
        pool: &PgPool,
        id: EntityId,
        aircraft_ids: &[EntityId],
    ) -> Result<(), RepoError> {
        let mut tx = pool.begin().await?;
        relations::ensure_exists(&mut *tx, "airlines", "Airline", id).await?;
        relations::attach_children(&mut tx, "aircraft", "airline_id", "Aircraft", id, aircraft_ids)
            .await?;
        tx.commit().await?;
        Ok(())
    }

    /// Detach the listed aircraft from this airline.
    pub async fn disconnect_aircraft(
        pool: &PgPool,
        id: EntityId,
        aircraft_ids: &[EntityId],
    ) -> Result<(), RepoError> {
        let mut tx = pool.begin().await?;
        relations::ensure_exists(&mut *tx, "airlines", "Airline", id).await?;
        relations::detach_children(&mut tx, "aircraft", "airline_id", id, aircraft_ids).await?;
        tx.commit().await?;
        Ok(())
    }

    /// Replace this airline's aircraft with exactly the listed set.
    pub async fn replace_aircraft(
        pool: &PgPool,
        id: EntityId,
        aircraft_ids: &[EntityId],
    ) -> Result<(), RepoError> {
        if aircraft_ids.is_empty() {
            return Err(CoreError::NotFoundMany { entity: "Aircraft" }.into());
        }
        let mut tx = pool.begin().await?;
        relations::ensure_exists(&mut *tx, "airlines", "Airline", id).await?;
        relations::set_children(&mut tx, "aircraft", "airline_id", "Aircraft", id, aircraft_ids)
            .await?;
        tx.commit().await?;
        Ok(())
    }

    /// Attach the listed flights to this airline (idempotent per child).
    pub async fn connect_flights(
        pool: &PgPool,
        id: EntityId,
        flight_ids: &[EntityId],
    ) -> Result<(), RepoError> {
        let mut tx = pool.begin().await?;
        relations::ensure_exists(&mut *tx, "airlines", "Airline", id).await?;
        relations::attach_children(&mut tx, "flights", "airline_id", "Flight", id, flight_ids)
            .await?;
        tx.commit().await?;
        Ok(())
    }

    /// Detach the listed flights from this airline.
    pub async fn disconnect_flights(
        pool: &PgPool,
        id: EntityId,
        flight_ids: &[EntityId],
    ) -> Result<(), RepoError> {
        let mut tx = pool.begin().await?;
        relations::ensure_exists(&mut *tx, "airlines", "Airline", id).await?;
        relations::detach_children(&mut tx, "flights", "airline_id", id, flight_ids).await?;
        tx.commit().await?;
        Ok(())
    }

    /// Replace this airline's flights with exactly the listed set.
    pub async fn replace_flights(
        pool: &PgPool,
        id: EntityId,
        flight_ids: &[EntityId],
    ) -> Result<(), RepoError> {
        if flight_ids.is_empty() {
            return Err(CoreError::NotFoundMany { entity: "Flight" }.into());
        }
        let mut tx = pool.begin().await?;
        relations::ensure_exists(&mut *tx, "airlines", "Airline", id).await?;
        relations::set_children(&mut tx, "flights", "airline_id", "Flight", id, flight_ids).await?;
        tx.commit().await?;
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Internal helpers
    // -----------------------------------------------------------------------

    /// Enrich rows with their aircraft and flight ID lists.
    async fn assemble(pool: &PgPool, rows: Vec<AirlineRow>) -> Result<Vec<Airline>, RepoError> {
        let ids: Vec<EntityId> = rows.iter().map(|r| r.id).collect();
        let mut aircraft =
            relations::child_ids_by_parent(pool, "aircraft", "airline_id", &ids).await?;
        let mut flights =
            relations::child_ids_by_parent(pool, "flights", "airline_id", &ids).await?;
        Ok(rows
            .into_iter()
            .map(|row| {
                let a = aircraft.remove(&row.id).unwrap_or_default();
                let f = flights.remove(&row.id).unwrap_or_default();
                Airline::from_parts(row, a, f)
            })
            .collect())
    }
}

/// Build a WHERE clause from airline filter parameters.
fn build_airline_filter(params: &AirlineListParams) -> SqlFilter {
    let mut filter = SqlFilter::new();

    if let Some(id) = params.id {
        filter.push("id", BindValue::Id(id));
    }
    if let Some(ref name) = params.name {
        filter.push("name", BindValue::Text(name.clone()));
    }
    if let Some(ref country) = params.country {
        filter.push("country", BindValue::Text(country.clone()));
    }
    if let Some(created_at) = params.created_at {
        filter.push("created_at", BindValue::Timestamp(created_at));
    }
    if let Some(updated_at) = params.updated_at {
        filter.push("updated_at", BindValue::Timestamp(updated_at));
    }

    filter
}
