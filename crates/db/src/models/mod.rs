//! Domain model structs and DTOs.
//!
//! Each submodule contains, for one resource:
//! - A `FromRow` row struct matching the database table
//! - A `Serialize` wire DTO (single relations as the related ID or null,
//!   collections as ordered ID lists)
//! - A `Deserialize` create DTO (all fields optional, client may supply
//!   an `id`)
//! - A `Deserialize` update DTO (absent fields are left untouched)
//! - A list-params struct carrying equality filters, paging and sort
//! - A sort-field enum allow-listing the sortable columns

use serde::Serialize;

pub mod aircraft;
pub mod airline;
pub mod booking;
pub mod customer;
pub mod device;
pub mod event;
pub mod flight;
pub mod order;
pub mod order_item;
pub mod passenger;
pub mod payment;
pub mod seat;

/// Count envelope returned by `/meta` endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct ListMeta {
    pub count: i64,
}
