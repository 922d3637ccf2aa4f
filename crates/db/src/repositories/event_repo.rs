//! Repository for the `events` table.

use skylane_core::error::CoreError;
use skylane_core::types::EntityId;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::RepoError;
use crate::filter::{bind_filter, bind_filter_scalar, clamp_skip, clamp_take, BindValue, SqlFilter};
use crate::models::event::{CreateEvent, Event, EventListParams, EventRow, UpdateEvent};
use crate::repositories::relations;

const COLUMNS: &str = "id, device_id, event_type, temperature, humidity, timestamp, created_at, updated_at";

/// Provides CRUD operations for telemetry events.
pub struct EventRepo;

impl EventRepo {
    /// Insert a new event and return the canonical record.
    pub async fn create(pool: &PgPool, input: &CreateEvent) -> Result<Event, RepoError> {
        let mut tx = pool.begin().await?;

        if let Some(device_id) = input.device {
            relations::ensure_exists(&mut *tx, "devices", "Device", device_id).await?;
        }

        let id = input.id.unwrap_or_else(Uuid::now_v7);
        let query = format!(
            "INSERT INTO events (id, device_id, event_type, temperature, humidity, timestamp) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, EventRow>(&query)
            .bind(id)
            .bind(input.device)
            .bind(&input.event_type)
            .bind(input.temperature)
            .bind(input.humidity)
            .bind(input.timestamp)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;

        Self::find_by_id(pool, row.id).await?.ok_or_else(|| {
            CoreError::NotFound {
                entity: "Event",
                id: row.id,
            }
            .into()
        })
    }

    /// Find an event by its ID.
    pub async fn find_by_id(pool: &PgPool, id: EntityId) -> Result<Option<Event>, RepoError> {
        let query = format!("SELECT {COLUMNS} FROM events WHERE id = $1");
        let row = sqlx::query_as::<_, EventRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(Event::from))
    }

    /// List events with filtering, paging and sort.
    pub async fn list(pool: &PgPool, params: &EventListParams) -> Result<Vec<Event>, RepoError> {
        Self::list_filtered(pool, None, params).await
    }

    /// List events reported by a given device.
    pub async fn list_by_device(
        pool: &PgPool,
        device_id: EntityId,
        params: &EventListParams,
    ) -> Result<Vec<Event>, RepoError> {
        Self::list_filtered(pool, Some(("device_id", device_id)), params).await
    }

    /// Count events matching the given filter.
    pub async fn count(pool: &PgPool, params: &EventListParams) -> Result<i64, RepoError> {
        let filter = build_event_filter(params, None);
        let query = format!("SELECT COUNT(*)::BIGINT FROM events {}", filter.where_clause());
        let q = bind_filter_scalar(sqlx::query_scalar::<_, i64>(&query), filter.values());
        Ok(q.fetch_one(pool).await?)
    }

    /// Update an event. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: EntityId,
        input: &UpdateEvent,
    ) -> Result<Option<Event>, RepoError> {
        let mut tx = pool.begin().await?;

        if let Some(device_id) = input.device {
            relations::ensure_exists(&mut *tx, "devices", "Device", device_id).await?;
        }

        let query = format!(
            "UPDATE events SET \
                device_id = COALESCE($2, device_id), \
                event_type = COALESCE($3, event_type), \
                temperature = COALESCE($4, temperature), \
                humidity = COALESCE($5, humidity), \
                timestamp = COALESCE($6, timestamp), \
                updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, EventRow>(&query)
            .bind(id)
            .bind(input.device)
            .bind(&input.event_type)
            .bind(input.temperature)
            .bind(input.humidity)
            .bind(input.timestamp)
            .fetch_optional(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(row.map(Event::from))
    }

    /// Delete an event by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: EntityId) -> Result<bool, RepoError> {
        let result = sqlx::query("DELETE FROM events WHERE id = $1")
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
        params: &EventListParams,
    ) -> Result<Vec<Event>, RepoError> {
        let filter = build_event_filter(params, scope);
        let order = params.sort_by.unwrap_or_default().column();
        let dir = params.sort_order.unwrap_or_default().as_sql();
        let query = format!(
            "SELECT {COLUMNS} FROM events {} \
             ORDER BY {order} {dir}, id ASC \
             LIMIT ${} OFFSET ${}",
            filter.where_clause(),
            filter.next_idx(),
            filter.next_idx() + 1
        );

        let q = bind_filter(sqlx::query_as::<_, EventRow>(&query), filter.values());
        let rows = q
            .bind(clamp_take(params.take))
            .bind(clamp_skip(params.skip))
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(Event::from).collect())
    }
}

/// Build a WHERE clause from event filter parameters.
fn build_event_filter(
    params: &EventListParams,
    scope: Option<(&'static str, EntityId)>,
) -> SqlFilter {
    let mut filter = SqlFilter::new();

    if let Some((column, id)) = scope {
        filter.push(column, BindValue::Id(id));
    }
    if let Some(id) = params.id {
        filter.push("id", BindValue::Id(id));
    }
    if let Some(ref event_type) = params.event_type {
        filter.push("event_type", BindValue::Text(event_type.clone()));
    }
    if let Some(temperature) = params.temperature {
        filter.push("temperature", BindValue::Float(temperature));
    }
    if let Some(humidity) = params.humidity {
        filter.push("humidity", BindValue::Float(humidity));
    }
    if let Some(timestamp) = params.timestamp {
        filter.push("timestamp", BindValue::Timestamp(timestamp));
    }
    if let Some(device_id) = params.device {
        filter.push("device_id", BindValue::Id(device_id));
    }
    if let Some(created_at) = params.created_at {
        filter.push("created_at", BindValue::Timestamp(created_at));
    }
    if let Some(updated_at) = params.updated_at {
        filter.push("updated_at", BindValue::Timestamp(updated_at));
    }

    filter
}
