//! Device entity model and DTOs.

use serde::{Deserialize, Serialize};
use skylane_core::types::{EntityId, Timestamp};
use sqlx::FromRow;

use crate::filter::SortOrder;

/// A device row from the `devices` table.
///
/// `device_id` is the external hardware tag, distinct from the record's
/// primary key.
#[derive(Debug, Clone, FromRow)]
pub struct DeviceRow {
    pub id: EntityId,
    pub device_id: Option<String>,
    pub device_name: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Wire representation of a device.
#[derive(Debug, Clone, Serialize)]
pub struct Device {
    pub id: EntityId,
    pub device_id: Option<String>,
    pub device_name: Option<String>,
    pub events: Vec<EntityId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Device {
    pub fn from_parts(row: DeviceRow, events: Vec<EntityId>) -> Self {
        Self {
            id: row.id,
            device_id: row.device_id,
            device_name: row.device_name,
            events,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// DTO for creating a new device.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateDevice {
    pub id: Option<EntityId>,
    pub device_id: Option<String>,
    pub device_name: Option<String>,
    #[serde(default)]
    pub events: Vec<EntityId>,
}

/// DTO for updating a device. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateDevice {
    pub device_id: Option<String>,
    pub device_name: Option<String>,
    pub events: Option<Vec<EntityId>>,
}

/// Query parameters for device list endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeviceListParams {
    pub id: Option<EntityId>,
    pub device_id: Option<String>,
    pub device_name: Option<String>,
    pub created_at: Option<Timestamp>,
    pub updated_at: Option<Timestamp>,
    pub skip: Option<i64>,
    pub take: Option<i64>,
    pub sort_by: Option<DeviceSortField>,
    pub sort_order: Option<SortOrder>,
}

/// Sortable columns for device list queries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceSortField {
    DeviceId,
    DeviceName,
    #[default]
    CreatedAt,
    UpdatedAt,
}

impl DeviceSortField {
    pub fn column(self) -> &'static str {
        match self {
            Self::DeviceId => "device_id",
            Self::DeviceName => "device_name",
            Self::CreatedAt => "created_at",
            Self::UpdatedAt => "updated_at",
        }
    }
}
