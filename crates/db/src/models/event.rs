//! Event entity model and DTOs.
//!
//! Events are telemetry readings reported by devices. `timestamp` is the
//! device-reported reading time, separate from the record timestamps.

use serde::{Deserialize, Serialize};
use skylane_core::types::{EntityId, Timestamp};
use sqlx::FromRow;

use crate::filter::SortOrder;

/// An event row from the `events` table.
#[derive(Debug, Clone, FromRow)]
pub struct EventRow {
    pub id: EntityId,
    pub device_id: Option<EntityId>,
    pub event_type: Option<String>,
    pub temperature: Option<f64>,
    pub humidity: Option<f64>,
    pub timestamp: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Wire representation of an event.
#[derive(Debug, Clone, Serialize)]
pub struct Event {
    pub id: EntityId,
    pub event_type: Option<String>,
    pub temperature: Option<f64>,
    pub humidity: Option<f64>,
    pub timestamp: Option<Timestamp>,
    pub device: Option<EntityId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<EventRow> for Event {
    fn from(row: EventRow) -> Self {
        Self {
            id: row.id,
            event_type: row.event_type,
            temperature: row.temperature,
            humidity: row.humidity,
            timestamp: row.timestamp,
            device: row.device_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// DTO for creating a new event.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateEvent {
    pub id: Option<EntityId>,
    pub event_type: Option<String>,
    pub temperature: Option<f64>,
    pub humidity: Option<f64>,
    pub timestamp: Option<Timestamp>,
    pub device: Option<EntityId>,
}

/// DTO for updating an event. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateEvent {
    pub event_type: Option<String>,
    pub temperature: Option<f64>,
    pub humidity: Option<f64>,
    pub timestamp: Option<Timestamp>,
    pub device: Option<EntityId>,
}

/// Query parameters for event list endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventListParams {
    pub id: Option<EntityId>,
    pub event_type: Option<String>,
    pub temperature: Option<f64>,
    pub humidity: Option<f64>,
    pub timestamp: Option<Timestamp>,
    pub device: Option<EntityId>,
    pub created_at: Option<Timestamp>,
    pub updated_at: Option<Timestamp>,
    pub skip: Option<i64>,
    pub take: Option<i64>,
    pub sort_by: Option<EventSortField>,
    pub sort_order: Option<SortOrder>,
}

/// Sortable columns for event list queries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventSortField {
    EventType,
    Temperature,
    Humidity,
    Timestamp,
    #[default]
    CreatedAt,
    UpdatedAt,
}

impl EventSortField {
    pub fn column(self) -> &'static str {
        match self {
            Self::EventType => "event_type",
            Self::Temperature => "temperature",
            Self::Humidity => "humidity",
            Self::Timestamp => "timestamp",
            Self::CreatedAt => "created_at",
            Self::UpdatedAt => "updated_at",
        }
    }
}
