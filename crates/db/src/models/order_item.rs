//! Order item entity model and DTOs.

use serde::{Deserialize, Serialize};
use skylane_core::types::{EntityId, Timestamp};
use sqlx::FromRow;

use crate::filter::SortOrder;

/// An order item row from the `order_items` table.
#[derive(Debug, Clone, FromRow)]
pub struct OrderItemRow {
    pub id: EntityId,
    pub order_id: Option<EntityId>,
    pub name: Option<String>,
    pub price: Option<f64>,
    pub sku: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Wire representation of an order item.
#[derive(Debug, Clone, Serialize)]
pub struct OrderItem {
    pub id: EntityId,
    pub name: Option<String>,
    pub price: Option<f64>,
    pub sku: Option<String>,
    pub order: Option<EntityId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<OrderItemRow> for OrderItem {
    fn from(row: OrderItemRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            price: row.price,
            sku: row.sku,
            order: row.order_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// DTO for creating a new order item.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateOrderItem {
    pub id: Option<EntityId>,
    pub name: Option<String>,
    pub price: Option<f64>,
    pub sku: Option<String>,
    pub order: Option<EntityId>,
}

/// DTO for updating an order item. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateOrderItem {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub sku: Option<String>,
    pub order: Option<EntityId>,
}

/// Query parameters for order item list endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrderItemListParams {
    pub id: Option<EntityId>,
    pub name: Option<String>,
    pub price: Option<f64>,
    pub sku: Option<String>,
    pub order: Option<EntityId>,
    pub created_at: Option<Timestamp>,
    pub updated_at: Option<Timestamp>,
    pub skip: Option<i64>,
    pub take: Option<i64>,
    pub sort_by: Option<OrderItemSortField>,
    pub sort_order: Option<SortOrder>,
}

/// Sortable columns for order item list queries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderItemSortField {
    Name,
    Price,
    Sku,
    #[default]
    CreatedAt,
    UpdatedAt,
}

impl OrderItemSortField {
    pub fn column(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Price => "price",
            Self::Sku => "sku",
            Self::CreatedAt => "created_at",
            Self::UpdatedAt => "updated_at",
        }
    }
}
