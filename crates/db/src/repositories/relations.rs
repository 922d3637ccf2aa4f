//! Shared helpers for foreign-key relation management.
//!
//! Collections are the inverse side of a nullable child foreign key, so
//! attaching means setting the child's FK to the parent and detaching
//! means nulling it. Attach paths are strict (every requested child must
//! resolve), detach paths are lenient (unknown or unattached IDs are
//! no-ops).

use std::collections::{HashMap, HashSet};

use skylane_core::error::CoreError;
use skylane_core::types::EntityId;
use sqlx::{PgPool, Postgres, Transaction};

use crate::error::RepoError;

/// Fail with `NotFound` unless a row with `id` exists in `table`.
pub(crate) async fn ensure_exists<'e, E>(
    executor: E,
    table: &str,
    entity: &'static str,
    id: EntityId,
) -> Result<(), RepoError>
where
    E: sqlx::PgExecutor<'e>,
{
    let query = format!("SELECT EXISTS (SELECT 1 FROM {table} WHERE id = $1)");
    let exists: bool = sqlx::query_scalar(&query)
        .bind(id)
        .fetch_one(executor)
        .await?;
    if exists {
        Ok(())
    } else {
        Err(CoreError::NotFound { entity, id }.into())
    }
}

/// Point each child's FK at `parent_id`.
///
/// Strict: an empty request set fails with `NotFoundMany`, and every
/// requested ID must resolve to an existing child row or the first
/// missing one fails with `NotFound`. Re-attaching an already-attached
/// child is a no-op.
pub(crate) async fn attach_children(
    tx: &mut Transaction<'_, Postgres>,
    child_table: &str,
    fk_column: &str,
    child_entity: &'static str,
    parent_id: EntityId,
    child_ids: &[EntityId],
) -> Result<(), RepoError> {
    if child_ids.is_empty() {
        return Err(CoreError::NotFoundMany {
            entity: child_entity,
        }
        .into());
    }

    let query = format!(
        "UPDATE {child_table} SET {fk_column} = $1, updated_at = NOW() \
         WHERE id = ANY($2) \
         RETURNING id"
    );
    let updated: HashSet<EntityId> = sqlx::query_scalar(&query)
        .bind(parent_id)
        .bind(child_ids)
        .fetch_all(&mut **tx)
        .await?
        .into_iter()
        .collect();

    if let Some(&missing) = child_ids.iter().find(|id| !updated.contains(id)) {
        return Err(CoreError::NotFound {
            entity: child_entity,
            id: missing,
        }
        .into());
    }

    Ok(())
}

/// Null the FK of exactly the listed children currently attached to
/// `parent_id`. Lenient: IDs that do not exist or are attached
/// elsewhere are ignored.
pub(crate) async fn detach_children(
    tx: &mut Transaction<'_, Postgres>,
    child_table: &str,
    fk_column: &str,
    parent_id: EntityId,
    child_ids: &[EntityId],
) -> Result<(), RepoError> {
    if child_ids.is_empty() {
        return Ok(());
    }

    let query = format!(
        "UPDATE {child_table} SET {fk_column} = NULL, updated_at = NOW() \
         WHERE {fk_column} = $1 AND id = ANY($2)"
    );
    sqlx::query(&query)
        .bind(parent_id)
        .bind(child_ids)
        .execute(&mut **tx)
        .await?;
    Ok(())
}

/// Wholesale-set the children of `parent_id` to exactly `child_ids`.
///
/// Current members not in the set are detached; an empty set detaches
/// everything. Attachment is strict per [`attach_children`].
pub(crate) async fn set_children(
    tx: &mut Transaction<'_, Postgres>,
    child_table: &str,
    fk_column: &str,
    child_entity: &'static str,
    parent_id: EntityId,
    child_ids: &[EntityId],
) -> Result<(), RepoError> {
    // `id <> ALL('{}')` is true for every row, so an empty set clears all.
    let clear = format!(
        "UPDATE {child_table} SET {fk_column} = NULL, updated_at = NOW() \
         WHERE {fk_column} = $1 AND id <> ALL($2)"
    );
    sqlx::query(&clear)
        .bind(parent_id)
        .bind(child_ids)
        .execute(&mut **tx)
        .await?;

    if child_ids.is_empty() {
        return Ok(());
    }
    attach_children(tx, child_table, fk_column, child_entity, parent_id, child_ids).await
}

/// Collect child IDs grouped by parent for a batch of parents.
///
/// Children are ordered by creation time (ID as tiebreaker), which fixes
/// the order of collection ID lists in wire DTOs.
pub(crate) async fn child_ids_by_parent(
    pool: &PgPool,
    child_table: &str,
    fk_column: &str,
    parent_ids: &[EntityId],
) -> Result<HashMap<EntityId, Vec<EntityId>>, RepoError> {
    if parent_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let query = format!(
        "SELECT id, {fk_column} FROM {child_table} \
         WHERE {fk_column} = ANY($1) \
         ORDER BY created_at ASC, id ASC"
    );
    let rows: Vec<(EntityId, Option<EntityId>)> = sqlx::query_as(&query)
        .bind(parent_ids)
        .fetch_all(pool)
        .await?;

    let mut map: HashMap<EntityId, Vec<EntityId>> = HashMap::new();
    for (child_id, parent_id) in rows {
        if let Some(parent_id) = parent_id {
            map.entry(parent_id).or_default().push(child_id);
        }
    }
    Ok(map)
}
