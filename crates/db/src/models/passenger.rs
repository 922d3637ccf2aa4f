//! Passenger entity model and DTOs.

use serde::{Deserialize, Serialize};
use skylane_core::types::{EntityId, Timestamp};
use sqlx::FromRow;

use crate::filter::SortOrder;

/// A passenger row from the `passengers` table.
#[derive(Debug, Clone, FromRow)]
pub struct PassengerRow {
    pub id: EntityId,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Wire representation of a passenger.
#[derive(Debug, Clone, Serialize)]
pub struct Passenger {
    pub id: EntityId,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub bookings: Vec<EntityId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Passenger {
    pub fn from_parts(row: PassengerRow, bookings: Vec<EntityId>) -> Self {
        Self {
            id: row.id,
            email: row.email,
            first_name: row.first_name,
            last_name: row.last_name,
            phone: row.phone,
            bookings,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// DTO for creating a new passenger.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreatePassenger {
    pub id: Option<EntityId>,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    #[serde(default)]
    pub bookings: Vec<EntityId>,
}

/// DTO for updating a passenger. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdatePassenger {
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub bookings: Option<Vec<EntityId>>,
}

/// Query parameters for passenger list endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PassengerListParams {
    pub id: Option<EntityId>,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub created_at: Option<Timestamp>,
    pub updated_at: Option<Timestamp>,
    pub skip: Option<i64>,
    pub take: Option<i64>,
    pub sort_by: Option<PassengerSortField>,
    pub sort_order: Option<SortOrder>,
}

/// Sortable columns for passenger list queries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PassengerSortField {
    Email,
    FirstName,
    LastName,
    Phone,
    #[default]
    CreatedAt,
    UpdatedAt,
}

impl PassengerSortField {
    pub fn column(self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::FirstName => "first_name",
            Self::LastName => "last_name",
            Self::Phone => "phone",
            Self::CreatedAt => "created_at",
            Self::UpdatedAt => "updated_at",
        }
    }
}
