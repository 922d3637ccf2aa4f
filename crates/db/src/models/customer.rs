//! Customer entity model and DTOs.

use serde::{Deserialize, Serialize};
use skylane_core::types::{EntityId, Timestamp};
use sqlx::FromRow;

use crate::filter::SortOrder;

/// A customer row from the `customers` table.
#[derive(Debug, Clone, FromRow)]
pub struct CustomerRow {
    pub id: EntityId,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Wire representation of a customer.
#[derive(Debug, Clone, Serialize)]
pub struct Customer {
    pub id: EntityId,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub orders: Vec<EntityId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Customer {
    pub fn from_parts(row: CustomerRow, orders: Vec<EntityId>) -> Self {
        Self {
            id: row.id,
            first_name: row.first_name,
            last_name: row.last_name,
            orders,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// DTO for creating a new customer.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateCustomer {
    pub id: Option<EntityId>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    #[serde(default)]
    pub orders: Vec<EntityId>,
}

/// DTO for updating a customer. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateCustomer {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub orders: Option<Vec<EntityId>>,
}

/// Query parameters for customer list endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CustomerListParams {
    pub id: Option<EntityId>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub created_at: Option<Timestamp>,
    pub updated_at: Option<Timestamp>,
    pub skip: Option<i64>,
    pub take: Option<i64>,
    pub sort_by: Option<CustomerSortField>,
    pub sort_order: Option<SortOrder>,
}

/// Sortable columns for customer list queries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CustomerSortField {
    FirstName,
    LastName,
    #[default]
    CreatedAt,
    UpdatedAt,
}

impl CustomerSortField {
    pub fn column(self) -> &'static str {
        match self {
            Self::FirstName => "first_name",
            Self::LastName => "last_name",
            Self::CreatedAt => "created_at",
            Self::UpdatedAt => "updated_at",
        }
    }
}
