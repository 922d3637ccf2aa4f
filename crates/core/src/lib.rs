//! Shared domain types and errors for the Skylane resource backend.
//!
//! This crate has no I/O. It defines the ID and timestamp aliases used
//! across the workspace and the domain error taxonomy the persistence
//! and HTTP layers both map onto.

pub mod error;
pub mod types;
