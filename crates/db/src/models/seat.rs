//! Seat entity model and DTOs.

use serde::{Deserialize, Serialize};
use skylane_core::types::{EntityId, Timestamp};
use sqlx::FromRow;

use crate::filter::SortOrder;

/// A seat row from the `seats` table.
#[derive(Debug, Clone, FromRow)]
pub struct SeatRow {
    pub id: EntityId,
    pub booking_id: Option<EntityId>,
    pub flight_id: Option<EntityId>,
    pub seat_number: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Wire representation of a seat.
#[derive(Debug, Clone, Serialize)]
pub struct Seat {
    pub id: EntityId,
    pub seat_number: Option<String>,
    pub booking: Option<EntityId>,
    pub flight: Option<EntityId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<SeatRow> for Seat {
    fn from(row: SeatRow) -> Self {
        Self {
            id: row.id,
            seat_number: row.seat_number,
            booking: row.booking_id,
            flight: row.flight_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// DTO for creating a new seat.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateSeat {
    pub id: Option<EntityId>,
    pub seat_number: Option<String>,
    pub booking: Option<EntityId>,
    pub flight: Option<EntityId>,
}

/// DTO for updating a seat. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateSeat {
    pub seat_number: Option<String>,
    pub booking: Option<EntityId>,
    pub flight: Option<EntityId>,
}

/// Query parameters for seat list endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SeatListParams {
    pub id: Option<EntityId>,
    pub seat_number: Option<String>,
    pub booking: Option<EntityId>,
    pub flight: Option<EntityId>,
    pub created_at: Option<Timestamp>,
    pub updated_at: Option<Timestamp>,
    pub skip: Option<i64>,
    pub take: Option<i64>,
    pub sort_by: Option<SeatSortField>,
    pub sort_order: Option<SortOrder>,
}

/// Sortable columns for seat list queries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeatSortField {
    SeatNumber,
    #[default]
    CreatedAt,
    UpdatedAt,
}

impl SeatSortField {
    pub fn column(self) -> &'static str {
        match self {
            Self::SeatNumber => "seat_number",
            Self::CreatedAt => "created_at",
            Self::UpdatedAt => "updated_at",
        }
    }
}
