//! Repository for the `aircraft` table.

use skylane_core::error::CoreError;
use skylane_core::types::EntityId;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::RepoError;
use crate::filter::{bind_filter, bind_filter_scalar, clamp_skip, clamp_take, BindValue, SqlFilter};
use crate::models::aircraft::{
    Aircraft, AircraftListParams, AircraftRow, CreateAircraft, UpdateAircraft,
};
use crate::repositories::relations;

const COLUMNS: &str = "id, airline_id, model, capacity, created_at, updated_at";

/// Provides CRUD and relation operations for aircraft.
pub struct AircraftRepo;

impl AircraftRepo {
    /// Insert a new aircraft and return the canonical record.
    pub async fn create(pool: &PgPool, input: &CreateAircraft) -> Result<Aircraft, RepoError> {
        let mut tx = pool.begin().await?;

        if let Some(airline_id) = input.airline {
            relations::ensure_exists(&mut *tx, "airlines", "Airline", airline_id).await?;
        }

        let id = input.id.unwrap_or_else(Uuid::now_v7);
        let query = format!(
            "INSERT INTO aircraft (id, airline_id, model, capacity) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, AircraftRow>(&query)
            .bind(id)
            .bind(input.airline)
            .bind(&input.model)
            .bind(input.capacity)
            .fetch_one(&mut *tx)
            .await?;

        if !input.flights.is_empty() {
            relations::attach_children(&mut tx, "flights", "aircraft_id", "Flight", row.id, &input.flights)
                .await?;
        }

        tx.commit().await?;

        Self::find_by_id(pool, row.id).await?.ok_or_else(|| {
            CoreError::NotFound {
                entity: "Aircraft",
                id: row.id,
            }
            .into()
        })
    }

    /// Find an aircraft by its ID, with its flight ID list.
    pub async fn find_by_id(pool: &PgPool, id: EntityId) -> Result<Option<Aircraft>, RepoError> {
        let query = format!("SELECT {COLUMNS} FROM aircraft WHERE id = $1");
        let row = sqlx::query_as::<_, AircraftRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        match row {
            Some(row) => Ok(Self::assemble(pool, vec![row]).await?.into_iter().next()),
            None => Ok(None),
        }
    }

    /// List aircraft with filtering, paging and sort.
    pub async fn list(
        pool: &PgPool,
        params: &AircraftListParams,
    ) -> Result<Vec<Aircraft>, RepoError> {
        Self::list_filtered(pool, None, params).await
    }

    /// List aircraft belonging to a given airline.
    pub async fn list_by_airline(
        pool: &PgPool,
        airline_id: EntityId,
        params: &AircraftListParams,
    ) -> Result<Vec<Aircraft>, RepoError> {
        Self::list_filtered(pool, Some(("airline_id", airline_id)), params).await
    }

    /// Count aircraft matching the given filter.
    pub async fn count(pool: &PgPool, params: &AircraftListParams) -> Result<i64, RepoError> {
        let filter = build_aircraft_filter(params, None);
        let query = format!("SELECT COUNT(*)::BIGINT FROM aircraft {}", filter.where_clause());
        let q = bind_filter_scalar(sqlx::query_scalar::<_, i64>(&query), filter.values());
        Ok(q.fetch_one(pool).await?)
    }

    /// Update an aircraft. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: EntityId,
        input: &UpdateAircraft,
    ) -> Result<Option<Aircraft>, RepoError> {
        let mut tx = pool.begin().await?;

        if let Some(airline_id) = input.airline {
            relations::ensure_exists(&mut *tx, "airlines", "Airline", airline_id).await?;
        }

        let query = format!(
            "UPDATE aircraft SET \
                airline_id = COALESCE($2, airline_id), \
                model = COALESCE($3, model), \
                capacity = COALESCE($4, capacity), \
                updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, AircraftRow>(&query)
            .bind(id)
            .bind(input.airline)
            .bind(&input.model)
            .bind(input.capacity)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        if let Some(ref flights) = input.flights {
            relations::set_children(&mut tx, "flights", "aircraft_id", "Flight", row.id, flights)
                .await?;
        }

        tx.commit().await?;
        Self::find_by_id(pool, id).await
    }

    /// Delete an aircraft by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: EntityId) -> Result<bool, RepoError> {
        let result = sqlx::query("DELETE FROM aircraft WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // -----------------------------------------------------------------------
    // Relation operations
    // -----------------------------------------------------------------------

    /// Attach the listed flights to this aircraft (idempotent per child).
    pub async fn connect_flights(
        pool: &PgPool,
        id: EntityId,
        flight_ids: &[EntityId],
    ) -> Result<(), RepoError> {
        let mut tx = pool.begin().await?;
        relations::ensure_exists(&mut *tx, "aircraft", "Aircraft", id).await?;
        relations::attach_children(&mut tx, "flights", "aircraft_id", "Flight", id, flight_ids)
            .await?;
        tx.commit().await?;
        Ok(())
    }

    /// Detach the listed flights from this aircraft.
    pub async fn disconnect_flights(
        pool: &PgPool,
        id: EntityId,
        flight_ids: &[EntityId],
    ) -> Result<(), RepoError> {
        let mut tx = pool.begin().await?;
        relations::ensure_exists(&mut *tx, "aircraft", "Aircraft", id).await?;
        relations::detach_children(&mut tx, "flights", "aircraft_id", id, flight_ids).await?;
        tx.commit().await?;
        Ok(())
    }

    /// Replace this aircraft's flights with exactly the listed set.
    pub async fn replace_flights(
        pool: &PgPool,
        id: EntityId,
        flight_ids: &[EntityId],
    ) -> Result<(), RepoError> {
        if flight_ids.is_empty() {
            return Err(CoreError::NotFoundMany { entity: "Flight" }.into());
        }
        let mut tx = pool.begin().await?;
        relations::ensure_exists(&mut *tx, "aircraft", "Aircraft", id).await?;
        relations::set_children(&mut tx, "flights", "aircraft_id", "Flight", id, flight_ids)
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
        params: &AircraftListParams,
    ) -> Result<Vec<Aircraft>, RepoError> {
        let filter = build_aircraft_filter(params, scope);
        let order = params.sort_by.unwrap_or_default().column();
        let dir = params.sort_order.unwrap_or_default().as_sql();
        let query = format!(
            "SELECT {COLUMNS} FROM aircraft {} \
             ORDER BY {order} {dir}, id ASC \
             LIMIT ${} OFFSET ${}",
            filter.where_clause(),
            filter.next_idx(),
            filter.next_idx() + 1
        );

        let q = bind_filter(sqlx::query_as::<_, AircraftRow>(&query), filter.values());
        let rows = q
            .bind(clamp_take(params.take))
            .bind(clamp_skip(params.skip))
            .fetch_all(pool)
            .await?;
        Self::assemble(pool, rows).await
    }

    /// Enrich rows with their flight ID lists.
    async fn assemble(pool: &PgPool, rows: Vec<AircraftRow>) -> Result<Vec<Aircraft>, RepoError> {
        let ids: Vec<EntityId> = rows.iter().map(|r| r.id).collect();
        let mut flights =
            relations::child_ids_by_parent(pool, "flights", "aircraft_id", &ids).await?;
        Ok(rows
            .into_iter()
            .map(|row| {
                let f = flights.remove(&row.id).unwrap_or_default();
                Aircraft::from_parts(row, f)
            })
            .collect())
    }
}

/// Build a WHERE clause from aircraft filter parameters.
fn build_aircraft_filter(
    params: &AircraftListParams,
    scope: Option<(&'static str, EntityId)>,
) -> SqlFilter {
    let mut filter = SqlFilter::new();

    if let Some((column, id)) = scope {
        filter.push(column, BindValue::Id(id));
    }
    if let Some(id) = params.id {
        filter.push("id", BindValue::Id(id));
    }
    if let Some(ref model) = params.model {
        filter.push("model", BindValue::Text(model.clone()));
    }
    if let Some(capacity) = params.capacity {
        filter.push("capacity", BindValue::Int(capacity));
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
