//! Airline entity model and DTOs.

use serde::{Deserialize, Serialize};
use skylane_core::types::{EntityId, Timestamp};
use sqlx::FromRow;

use crate::filter::SortOrder;

/// An airline row from the `airlines` table.
#[derive(Debug, Clone, FromRow)]
pub struct AirlineRow {
    pub id: EntityId,
    pub name: Option<String>,
    pub country: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Wire representation of an airline, with related record IDs.
#[derive(Debug, Clone, Serialize)]
pub struct Airline {
    pub id: EntityId,
    pub name: Option<String>,
    pub country: Option<String>,
    pub aircraft: Vec<EntityId>,
    pub flights: Vec<EntityId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Airline {
    pub fn from_parts(row: AirlineRow, aircraft: Vec<EntityId>, flights: Vec<EntityId>) -> Self {
        Self {
            id: row.id,
            name: row.name,
            country: row.country,
            aircraft,
            flights,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// DTO for creating a new airline.
///
/// Collection members are attached by setting their foreign key; every
/// listed ID must already exist.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateAirline {
    pub id: Option<EntityId>,
    pub name: Option<String>,
    pub country: Option<String>,
    #[serde(default)]
    pub aircraft: Vec<EntityId>,
    #[serde(default)]
    pub flights: Vec<EntityId>,
}

/// DTO for updating an airline. Absent fields are left untouched;
/// a provided collection wholesale-replaces the current members.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateAirline {
    pub name: Option<String>,
    pub country: Option<String>,
    pub aircraft: Option<Vec<EntityId>>,
    pub flights: Option<Vec<EntityId>>,
}

/// Query parameters for airline list endpoints.
///
/// Equality filters combine with AND. `sort_by` defaults to `created_at`
/// ascending; `id` is always appended as a tiebreaker.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AirlineListParams {
    pub id: Option<EntityId>,
    pub name: Option<String>,
    pub country: Option<String>,
    pub created_at: Option<Timestamp>,
    pub updated_at: Option<Timestamp>,
    pub skip: Option<i64>,
    pub take: Option<i64>,
    pub sort_by: Option<AirlineSortField>,
    pub sort_order: Option<SortOrder>,
}

/// Sortable columns for airline list queries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AirlineSortField {
    Name,
    Country,
    #[default]
    CreatedAt,
    UpdatedAt,
}

impl AirlineSortField {
    pub fn column(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Country => "country",
            Self::CreatedAt => "created_at",
            Self::UpdatedAt => "updated_at",
        }
    }
}
