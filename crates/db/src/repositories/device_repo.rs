//! Repository for the `devices` table.

use skylane_core::error::CoreError;
use skylane_core::types::EntityId;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::RepoError;
use crate::filter::{bind_filter, bind_filter_scalar, clamp_skip, clamp_take, BindValue, SqlFilter};
use crate::models::device::{CreateDevice, Device, DeviceListParams, DeviceRow, UpdateDevice};
use crate::repositories::relations;

const COLUMNS: &str = "id, device_id, device_name, created_at, updated_at";

/// Provides CRUD and relation operations for devices.
pub struct DeviceRepo;

impl DeviceRepo {
    /// Insert a new device and return the canonical record.
    pub async fn create(pool: &PgPool, input: &CreateDevice) -> Result<Device, RepoError> {
        let mut tx = pool.begin().await?;

        let id = input.id.unwrap_or_else(Uuid::now_v7);
        let query = format!(
            "INSERT INTO devices (id, device_id, device_name) \
             VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, DeviceRow>(&query)
            .bind(id)
            .bind(&input.device_id)
            .bind(&input.device_name)
            .fetch_one(&mut *tx)
            .await?;

        if !input.events.is_empty() {
            relations::attach_children(&mut tx, "events", "device_id", "Event", row.id, &input.events)
                .await?;
        }

        tx.commit().await?;

        Self::find_by_id(pool, row.id).await?.ok_or_else(|| {
            CoreError::NotFound {
                entity: "Device",
                id: row.id,
            }
            .into()
        })
    }

    /// Find a device by ID, with its event ID list.
    pub async fn find_by_id(pool: &PgPool, id: EntityId) -> Result<Option<Device>, RepoError> {
        let query = format!("SELECT {COLUMNS} FROM devices WHERE id = $1");
        let row = sqlx::query_as::<_, DeviceRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        match row {
            Some(row) => Ok(Self::assemble(pool, vec![row]).await?.into_iter().next()),
            None => Ok(None),
        }
    }

    /// List devices with filtering, paging and sort.
    pub async fn list(pool: &PgPool, params: &DeviceListParams) -> Result<Vec<Device>, RepoError> {
        let filter = build_device_filter(params);
        let order = params.sort_by.unwrap_or_default().column();
        let dir = params.sort_order.unwrap_or_default().as_sql();
        let query = format!(
            "SELECT {COLUMNS} FROM devices {} \
             ORDER BY {order} {dir}, id ASC \
             LIMIT ${} OFFSET ${}",
            filter.where_clause(),
            filter.next_idx(),
            filter.next_idx() + 1
        );

        let q = bind_filter(sqlx::query_as::<_, DeviceRow>(&query), filter.values());
        let rows = q
            .bind(clamp_take(params.take))
            .bind(clamp_skip(params.skip))
            .fetch_all(pool)
            .await?;
        Self::assemble(pool, rows).await
    }

    /// Count devices matching the given filter.
    pub async fn count(pool: &PgPool, params: &DeviceListParams) -> Result<i64, RepoError> {
        let filter = build_device_filter(params);
        let query = format!(
            "SELECT COUNT(*)::BIGINT FROM devices {}",
            filter.where_clause()
        );
        let q = bind_filter_scalar(sqlx::query_scalar::<_, i64>(&query), filter.values());
        Ok(q.fetch_one(pool).await?)
    }

    /// Update a device. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: EntityId,
        input: &UpdateDevice,
    ) -> Result<Option<Device>, RepoError> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE devices SET \
                device_id = COALESCE($2, device_id), \
                device_name = COALESCE($3, device_name), \
                updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, DeviceRow>(&query)
            .bind(id)
            .bind(&input.device_id)
            .bind(&input.device_name)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        if let Some(ref events) = input.events {
            relations::set_children(&mut tx, "events", "device_id", "Event", row.id, events)
                .await?;
        }

        tx.commit().await?;
        Self::find_by_id(pool, id).await
    }

    /// Delete a device by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: EntityId) -> Result<bool, RepoError> {
        let result = sqlx::query("DELETE FROM devices WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // -----------------------------------------------------------------------
    // Relation operations
    // -----------------------------------------------------------------------

    /// Attach the listed events to this device (idempotent per child).
    pub async fn connect_events(
        pool: &PgPool,
        id: EntityId,
        event_ids: &[EntityId],
    ) -> Result<(), RepoError> {
        let mut tx = pool.begin().await?;
        relations::ensure_exists(&mut *tx, "devices", "Device", id).await?;
        relations::attach_children(&mut tx, "events", "device_id", "Event", id, event_ids).await?;
        tx.commit().await?;
        Ok(())
    }

    /// Detach the listed events from this device.
    pub async fn disconnect_events(
        pool: &PgPool,
        id: EntityId,
        event_ids: &[EntityId],
    ) -> Result<(), RepoError> {
        let mut tx = pool.begin().await?;
        relations::ensure_exists(&mut *tx, "devices", "Device", id).await?;
        relations::detach_children(&mut tx, "events", "device_id", id, event_ids).await?;
        tx.commit().await?;
        Ok(())
    }

    /// Replace this device's events with exactly the listed set.
    pub async fn replace_events(
        pool: &PgPool,
        id: EntityId,
        event_ids: &[EntityId],
    ) -> Result<(), RepoError> {
        if event_ids.is_empty() {
            return Err(CoreError::NotFoundMany { entity: "Event" }.into());
        }
        let mut tx = pool.begin().await?;
        relations::ensure_exists(&mut *tx, "devices", "Device", id).await?;
        relations::set_children(&mut tx, "events", "device_id", "Event", id, event_ids).await?;
        tx.commit().await?;
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Internal helpers
    // -----------------------------------------------------------------------

    /// Enrich rows with their event ID lists.
    async fn assemble(pool: &PgPool, rows: Vec<DeviceRow>) -> Result<Vec<Device>, RepoError> {
        let ids: Vec<EntityId> = rows.iter().map(|r| r.id).collect();
        let mut events = relations::child_ids_by_parent(pool, "events", "device_id", &ids).await?;
        Ok(rows
            .into_iter()
            .map(|row| {
                let e = events.remove(&row.id).unwrap_or_default();
                Device::from_parts(row, e)
            })
            .collect())
    }
}

/// Build a WHERE clause from device filter parameters.
fn build_device_filter(params: &DeviceListParams) -> SqlFilter {
    let mut filter = SqlFilter::new();

    if let Some(id) = params.id {
        filter.push("id", BindValue::Id(id));
    }
    if let Some(ref device_id) = params.device_id {
        filter.push("device_id", BindValue::Text(device_id.clone()));
    }
    if let Some(ref device_name) = params.device_name {
        filter.push("device_name", BindValue::Text(device_name.clone()));
    }
    if let Some(created_at) = params.created_at {
        filter.push("created_at", BindValue::Timestamp(created_at));
    }
    if let Some(updated_at) = params.updated_at {
        filter.push("updated_at", BindValue::Timestamp(updated_at));
    }

    filter
}
