//! Payment entity model and DTOs.

use serde::{Deserialize, Serialize};
use skylane_core::types::{EntityId, Timestamp};
use sqlx::FromRow;

use crate::filter::SortOrder;

/// A payment row from the `payments` table.
#[derive(Debug, Clone, FromRow)]
pub struct PaymentRow {
    pub id: EntityId,
    pub order_id: Option<EntityId>,
    pub amount: Option<f64>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Wire representation of a payment.
#[derive(Debug, Clone, Serialize)]
pub struct Payment {
    pub id: EntityId,
    pub amount: Option<f64>,
    pub order: Option<EntityId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<PaymentRow> for Payment {
    fn from(row: PaymentRow) -> Self {
        Self {
            id: row.id,
            amount: row.amount,
            order: row.order_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// DTO for creating a new payment.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreatePayment {
    pub id: Option<EntityId>,
    pub amount: Option<f64>,
    pub order: Option<EntityId>,
}

/// DTO for updating a payment. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdatePayment {
    pub amount: Option<f64>,
    pub order: Option<EntityId>,
}

/// Query parameters for payment list endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaymentListParams {
    pub id: Option<EntityId>,
    pub amount: Option<f64>,
    pub order: Option<EntityId>,
    pub created_at: Option<Timestamp>,
    pub updated_at: Option<Timestamp>,
    pub skip: Option<i64>,
    pub take: Option<i64>,
    pub sort_by: Option<PaymentSortField>,
    pub sort_order: Option<SortOrder>,
}

/// Sortable columns for payment list queries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentSortField {
    Amount,
    #[default]
    CreatedAt,
    UpdatedAt,
}

impl PaymentSortField {
    pub fn column(self) -> &'static str {
        match self {
            Self::Amount => "amount",
            Self::CreatedAt => "created_at",
            Self::UpdatedAt => "updated_at",
        }
    }
}
