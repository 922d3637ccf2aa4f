//! Order entity model and DTOs.

use serde::{Deserialize, Serialize};
use skylane_core::types::{EntityId, Timestamp};
use sqlx::FromRow;

use crate::filter::SortOrder;

/// An order row from the `orders` table.
///
/// `status` is free-form text, unlike the constrained booking status.
#[derive(Debug, Clone, FromRow)]
pub struct OrderRow {
    pub id: EntityId,
    pub customer_id: Option<EntityId>,
    pub status: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Wire representation of an order, with related record IDs.
#[derive(Debug, Clone, Serialize)]
pub struct Order {
    pub id: EntityId,
    pub status: Option<String>,
    pub customer: Option<EntityId>,
    pub order_items: Vec<EntityId>,
    pub payments: Vec<EntityId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Order {
    pub fn from_parts(row: OrderRow, order_items: Vec<EntityId>, payments: Vec<EntityId>) -> Self {
        Self {
            id: row.id,
            status: row.status,
            customer: row.customer_id,
            order_items,
            payments,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// DTO for creating a new order.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateOrder {
    pub id: Option<EntityId>,
    pub status: Option<String>,
    pub customer: Option<EntityId>,
    #[serde(default)]
    pub order_items: Vec<EntityId>,
    #[serde(default)]
    pub payments: Vec<EntityId>,
}

/// DTO for updating an order. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateOrder {
    pub status: Option<String>,
    pub customer: Option<EntityId>,
    pub order_items: Option<Vec<EntityId>>,
    pub payments: Option<Vec<EntityId>>,
}

/// Query parameters for order list endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrderListParams {
    pub id: Option<EntityId>,
    pub status: Option<String>,
    pub customer: Option<EntityId>,
    pub created_at: Option<Timestamp>,
    pub updated_at: Option<Timestamp>,
    pub skip: Option<i64>,
    pub take: Option<i64>,
    pub sort_by: Option<OrderSortField>,
    pub sort_order: Option<SortOrder>,
}

/// Sortable columns for order list queries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderSortField {
    Status,
    #[default]
    CreatedAt,
    UpdatedAt,
}

impl OrderSortField {
    pub fn column(self) -> &'static str {
        match self {
            Self::Status => "status",
            Self::CreatedAt => "created_at",
            Self::UpdatedAt => "updated_at",
        }
    }
}
