//! Booking entity model and DTOs.

use serde::{Deserialize, Serialize};
use skylane_core::types::{EntityId, Timestamp};
use sqlx::FromRow;

use crate::filter::SortOrder;

/// Lifecycle status of a booking.
///
/// Stored as the `booking_status` PostgreSQL enum; serialized lowercase
/// on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "booking_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
}

/// A booking row from the `bookings` table.
#[derive(Debug, Clone, FromRow)]
pub struct BookingRow {
    pub id: EntityId,
    pub flight_id: Option<EntityId>,
    pub passenger_id: Option<EntityId>,
    pub booking_date: Option<Timestamp>,
    pub status: Option<BookingStatus>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Wire representation of a booking, with related record IDs.
#[derive(Debug, Clone, Serialize)]
pub struct Booking {
    pub id: EntityId,
    pub booking_date: Option<Timestamp>,
    pub status: Option<BookingStatus>,
    pub flight: Option<EntityId>,
    pub passenger: Option<EntityId>,
    pub seats: Vec<EntityId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Booking {
    pub fn from_parts(row: BookingRow, seats: Vec<EntityId>) -> Self {
        Self {
            id: row.id,
            booking_date: row.booking_date,
            status: row.status,
            flight: row.flight_id,
            passenger: row.passenger_id,
            seats,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// DTO for creating a new booking.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateBooking {
    pub id: Option<EntityId>,
    pub booking_date: Option<Timestamp>,
    pub status: Option<BookingStatus>,
    pub flight: Option<EntityId>,
    pub passenger: Option<EntityId>,
    #[serde(default)]
    pub seats: Vec<EntityId>,
}

/// DTO for updating a booking. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateBooking {
    pub booking_date: Option<Timestamp>,
    pub status: Option<BookingStatus>,
    pub flight: Option<EntityId>,
    pub passenger: Option<EntityId>,
    pub seats: Option<Vec<EntityId>>,
}

/// Query parameters for booking list endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookingListParams {
    pub id: Option<EntityId>,
    pub booking_date: Option<Timestamp>,
    pub status: Option<BookingStatus>,
    pub flight: Option<EntityId>,
    pub passenger: Option<EntityId>,
    pub created_at: Option<Timestamp>,
    pub updated_at: Option<Timestamp>,
    pub skip: Option<i64>,
    pub take: Option<i64>,
    pub sort_by: Option<BookingSortField>,
    pub sort_order: Option<SortOrder>,
}

/// Sortable columns for booking list queries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingSortField {
    BookingDate,
    Status,
    #[default]
    CreatedAt,
    UpdatedAt,
}

impl BookingSortField {
    pub fn column(self) -> &'static str {
        match self {
            Self::BookingDate => "booking_date",
            Self::Status => "status",
            Self::CreatedAt => "created_at",
            Self::UpdatedAt => "updated_at",
        }
    }
}
