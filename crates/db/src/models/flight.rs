//! Flight entity model and DTOs.

use serde::{Deserialize, Serialize};
use skylane_core::types::{EntityId, Timestamp};
use sqlx::FromRow;

use crate::filter::SortOrder;

/// A flight row from the `flights` table.
#[derive(Debug, Clone, FromRow)]
pub struct FlightRow {
    pub id: EntityId,
    pub aircraft_id: Option<EntityId>,
    pub airline_id: Option<EntityId>,
    pub flight_number: Option<String>,
    pub departure_time: Option<Timestamp>,
    pub arrival_time: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Wire representation of a flight, with related record IDs.
///
/// Single relations render as the related ID or null; collections as
/// the list of member IDs ordered by creation time.
#[derive(Debug, Clone, Serialize)]
pub struct Flight {
    pub id: EntityId,
    pub flight_number: Option<String>,
    pub departure_time: Option<Timestamp>,
    pub arrival_time: Option<Timestamp>,
    pub aircraft: Option<EntityId>,
    pub airline: Option<EntityId>,
    pub bookings: Vec<EntityId>,
    pub seats: Vec<EntityId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Flight {
    pub fn from_parts(row: FlightRow, bookings: Vec<EntityId>, seats: Vec<EntityId>) -> Self {
        Self {
            id: row.id,
            flight_number: row.flight_number,
            departure_time: row.departure_time,
            arrival_time: row.arrival_time,
            aircraft: row.aircraft_id,
            airline: row.airline_id,
            bookings,
            seats,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// DTO for creating a new flight.
///
/// Every referenced ID (single relations and collection members) must
/// already exist.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateFlight {
    pub id: Option<EntityId>,
    pub flight_number: Option<String>,
    pub departure_time: Option<Timestamp>,
    pub arrival_time: Option<Timestamp>,
    pub aircraft: Option<EntityId>,
    pub airline: Option<EntityId>,
    #[serde(default)]
    pub bookings: Vec<EntityId>,
    #[serde(default)]
    pub seats: Vec<EntityId>,
}

/// DTO for updating a flight. Absent fields are left untouched;
/// a provided collection wholesale-replaces the current members
/// (an empty list detaches everything).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateFlight {
    pub flight_number: Option<String>,
    pub departure_time: Option<Timestamp>,
    pub arrival_time: Option<Timestamp>,
    pub aircraft: Option<EntityId>,
    pub airline: Option<EntityId>,
    pub bookings: Option<Vec<EntityId>>,
    pub seats: Option<Vec<EntityId>>,
}

/// Query parameters for flight list endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FlightListParams {
    pub id: Option<EntityId>,
    pub flight_number: Option<String>,
    pub departure_time: Option<Timestamp>,
    pub arrival_time: Option<Timestamp>,
    pub aircraft: Option<EntityId>,
    pub airline: Option<EntityId>,
    pub created_at: Option<Timestamp>,
    pub updated_at: Option<Timestamp>,
    pub skip: Option<i64>,
    pub take: Option<i64>,
    pub sort_by: Option<FlightSortField>,
    pub sort_order: Option<SortOrder>,
}

/// Sortable columns for flight list queries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlightSortField {
    FlightNumber,
    DepartureTime,
    ArrivalTime,
    #[default]
    CreatedAt,
    UpdatedAt,
}

impl FlightSortField {
    pub fn column(self) -> &'static str {
        match self {
            Self::FlightNumber => "flight_number",
            Self::DepartureTime => "departure_time",
            Self::ArrivalTime => "arrival_time",
            Self::CreatedAt => "created_at",
            Self::UpdatedAt => "updated_at",
        }
    }
}
