//! Aircraft entity model and DTOs.

use serde::{Deserialize, Serialize};
use skylane_core::types::{EntityId, Timestamp};
use sqlx::FromRow;

use crate::filter::SortOrder;

/// An aircraft row from the `aircraft` table.
#[derive(Debug, Clone, FromRow)]
pub struct AircraftRow {
    pub id: EntityId,
    pub airline_id: Option<EntityId>,
    pub model: Option<String>,
    pub capacity: Option<i32>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Wire representation of an aircraft.
#[derive(Debug, Clone, Serialize)]
pub struct Aircraft {
    pub id: EntityId,
    pub model: Option<String>,
    pub capacity: Option<i32>,
    pub airline: Option<EntityId>,
    pub flights: Vec<EntityId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Aircraft {
    pub fn from_parts(row: AircraftRow, flights: Vec<EntityId>) -> Self {
        Self {
            id: row.id,
            model: row.model,
            capacity: row.capacity,
            airline: row.airline_id,
            flights,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// DTO for creating a new aircraft.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateAircraft {
    pub id: Option<EntityId>,
    pub model: Option<String>,
    pub capacity: Option<i32>,
    pub airline: Option<EntityId>,
    #[serde(default)]
    pub flights: Vec<EntityId>,
}

/// DTO for updating an aircraft. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateAircraft {
    pub model: Option<String>,
    pub capacity: Option<i32>,
    pub airline: Option<EntityId>,
    pub flights: Option<Vec<EntityId>>,
}

/// Query parameters for aircraft list endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AircraftListParams {
    pub id: Option<EntityId>,
    pub model: Option<String>,
    pub capacity: Option<i32>,
    pub airline: Option<EntityId>,
    pub created_at: Option<Timestamp>,
    pub updated_at: Option<Timestamp>,
    pub skip: Option<i64>,
    pub take: Option<i64>,
    pub sort_by: Option<AircraftSortField>,
    pub sort_order: Option<SortOrder>,
}

/// Sortable columns for aircraft list queries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AircraftSortField {
    Model,
    Capacity,
    #[default]
    CreatedAt,
    UpdatedAt,
}

impl AircraftSortField {
    pub fn column(self) -> &'static str {
        match self {
            Self::Model => "model",
            Self::Capacity => "capacity",
            Self::CreatedAt => "created_at",
            Self::UpdatedAt => "updated_at",
        }
    }
}
