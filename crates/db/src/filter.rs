//! Shared plumbing for dynamically-built list queries.
//!
//! Every resource supports the same listing contract: optional per-field
//! equality filters, `skip`/`take` paging and an allow-listed sort column.
//! The pieces that do not depend on the concrete entity live here; each
//! repository contributes its own `build_*_filter` function on top.

use serde::Deserialize;
use skylane_core::types::{EntityId, Timestamp};

use crate::models::booking::BookingStatus;

/// Upper bound applied to a client-supplied `take` value.
pub const MAX_TAKE: i64 = 500;

/// Sort direction for list queries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    /// SQL keyword for this direction.
    pub fn as_sql(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// Clamp a user-provided page size. `None` means no limit.
///
/// Bound as `LIMIT $n`; PostgreSQL treats a NULL limit as "no limit",
/// so the `Option` can be bound directly.
pub fn clamp_take(take: Option<i64>) -> Option<i64> {
    take.map(|t| t.clamp(1, MAX_TAKE))
}

/// Clamp a user-provided offset to non-negative.
pub fn clamp_skip(skip: Option<i64>) -> i64 {
    skip.unwrap_or(0).max(0)
}

/// Typed bind value for dynamically-built queries.
///
/// Covers every column type that appears in an equality filter across
/// the twelve resources.
pub(crate) enum BindValue {
    Id(EntityId),
    Text(String),
    Int(i32),
    Float(f64),
    Timestamp(Timestamp),
    Status(BookingStatus),
}

/// Incrementally builds a WHERE clause with numbered bind parameters.
///
/// Conditions combine with AND. The clause is empty when no filters are
/// active, otherwise it starts with `WHERE `.
pub(crate) struct SqlFilter {
    conditions: Vec<String>,
    values: Vec<BindValue>,
    next_idx: u32,
}

impl SqlFilter {
    pub(crate) fn new() -> Self {
        Self {
            conditions: Vec::new(),
            values: Vec::new(),
            next_idx: 1,
        }
    }

    /// Add an equality condition on `column`.
    pub(crate) fn push(&mut self, column: &str, value: BindValue) {
        self.conditions.push(format!("{column} = ${}", self.next_idx));
        self.next_idx += 1;
        self.values.push(value);
    }

    pub(crate) fn where_clause(&self) -> String {
        if self.conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", self.conditions.join(" AND "))
        }
    }

    /// Index of the next free bind parameter (for LIMIT/OFFSET).
    pub(crate) fn next_idx(&self) -> u32 {
        self.next_idx
    }

    pub(crate) fn values(&self) -> &[BindValue] {
        &self.values
    }
}

/// Bind a slice of `BindValue` to a sqlx `QueryAs`.
pub(crate) fn bind_filter<'q, O>(
    mut q: sqlx::query::QueryAs<'q, sqlx::Postgres, O, sqlx::postgres::PgArguments>,
    values: &'q [BindValue],
) -> sqlx::query::QueryAs<'q, sqlx::Postgres, O, sqlx::postgres::PgArguments> {
    for val in values {
        q = match val {
            BindValue::Id(v) => q.bind(*v),
            BindValue::Text(v) => q.bind(v.as_str()),
            BindValue::Int(v) => q.bind(*v),
            BindValue::Float(v) => q.bind(*v),
            BindValue::Timestamp(v) => q.bind(*v),
            BindValue::Status(v) => q.bind(*v),
        };
    }
    q
}

/// Bind a slice of `BindValue` to a sqlx `QueryScalar`.
pub(crate) fn bind_filter_scalar<'q>(
    mut q: sqlx::query::QueryScalar<'q, sqlx::Postgres, i64, sqlx::postgres::PgArguments>,
    values: &'q [BindValue],
) -> sqlx::query::QueryScalar<'q, sqlx::Postgres, i64, sqlx::postgres::PgArguments> {
    for val in values {
        q = match val {
            BindValue::Id(v) => q.bind(*v),
            BindValue::Text(v) => q.bind(v.as_str()),
            BindValue::Int(v) => q.bind(*v),
            BindValue::Float(v) => q.bind(*v),
            BindValue::Timestamp(v) => q.bind(*v),
            BindValue::Status(v) => q.bind(*v),
        };
    }
    q
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_take_none_means_unlimited() {
        assert_eq!(clamp_take(None), None);
    }

    #[test]
    fn clamp_take_respects_max() {
        assert_eq!(clamp_take(Some(100_000)), Some(MAX_TAKE));
    }

    #[test]
    fn clamp_take_floors_at_one() {
        assert_eq!(clamp_take(Some(0)), Some(1));
        assert_eq!(clamp_take(Some(-5)), Some(1));
    }

    #[test]
    fn clamp_take_passes_through_valid_value() {
        assert_eq!(clamp_take(Some(25)), Some(25));
    }

    #[test]
    fn clamp_skip_defaults_to_zero() {
        assert_eq!(clamp_skip(None), 0);
        assert_eq!(clamp_skip(Some(-10)), 0);
        assert_eq!(clamp_skip(Some(40)), 40);
    }

    #[test]
    fn empty_filter_has_no_where_clause() {
        let filter = SqlFilter::new();
        assert_eq!(filter.where_clause(), "");
        assert_eq!(filter.next_idx(), 1);
    }

    #[test]
    fn filter_numbers_conditions_sequentially() {
        let mut filter = SqlFilter::new();
        filter.push("name", BindValue::Text("a".into()));
        filter.push("capacity", BindValue::Int(7));
        assert_eq!(filter.where_clause(), "WHERE name = $1 AND capacity = $2");
        assert_eq!(filter.next_idx(), 3);
        assert_eq!(filter.values().len(), 2);
    }

    #[test]
    fn sort_order_sql_keywords() {
        assert_eq!(SortOrder::Asc.as_sql(), "ASC");
        assert_eq!(SortOrder::Desc.as_sql(), "DESC");
        assert_eq!(SortOrder::default(), SortOrder::Asc);
    }
}
