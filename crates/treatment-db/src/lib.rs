//! treatment-db
//!
//! Postgres access for the Treatment AI backend: pool construction, schema
//! bootstrap, and one query module per entity. Every statement is
//! parameterized, and statements over record data carry an `account_id`
//! predicate so ownership is enforced in SQL, not in handler logic.

pub mod accounts;
pub mod conditions;
pub mod documents;
pub mod error;
pub mod linked_accounts;
pub mod medications;
pub mod pool;
pub mod schema;
pub mod sessions;
pub mod shares;
pub mod timeline;
pub mod vector;
pub mod wearables;

/// Ceiling applied to every caller-supplied page size.
const MAX_PAGE_SIZE: u32 = 500;

/// Default page size when the caller does not ask for one.
const DEFAULT_PAGE_SIZE: u32 = 100;

pub(crate) fn clamp_limit(limit: Option<u32>) -> i64 {
    i64::from(limit.unwrap_or(DEFAULT_PAGE_SIZE).min(MAX_PAGE_SIZE))
}
