//! HTTP handlers, one module per resource.
//!
//! Handlers stay thin: extract, call the repository, map the absent row
//! to [`CoreError::NotFound`](skylane_core::error::CoreError), serialize.

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
