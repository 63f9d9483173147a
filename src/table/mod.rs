//! # Table Core
//!
//! An ordered sequence of uniform rows with a dual-indexing dispatcher:
//! integer keys address rows, field names address columns, spans address
//! sub-tables and partial-row predicates address the first matching row.
//! Every row in a non-empty table shares one ordered set of field names,
//! the schema. Row-producing operations come in value form (returning a new
//! table) and in-place `_mut` form (mutating the receiver).
use thiserror::Error;

pub(crate) mod key;
pub(crate) mod row;
#[allow(clippy::module_inception)]
pub(crate) mod table;
pub(crate) mod value;

/// Errors raised by table operations.
///
/// Accessors with a natural absent result (`get`, `dig`, `delete_at` on a
/// missing name) return `None` instead; these variants cover required
/// lookups and contract violations. Length and key checks run before any
/// mutation, so a failed operation never leaves a half-updated table.
#[derive(Error, Debug)]
pub enum TableError {
    /// Required row lookup out of range
    #[error("row index {index} is out of range for {len} rows")]
    RowIndexOutOfRange { index: i64, len: usize },

    /// Required column lookup on a name no row carries
    #[error("column '{0}' does not exist")]
    ColumnNotFound(String),

    /// Required predicate lookup with no matching row
    #[error("no row matches {0}")]
    NoMatchingRow(String),

    /// Column write whose value count disagrees with the row count
    #[error("column of {actual} values does not fit {expected} rows")]
    ColumnLengthMismatch { expected: usize, actual: usize },

    /// Position-aligned merge with a right-hand table shorter than the left
    #[error("combined table has {other} rows, expected at least {expected}")]
    CombineLengthMismatch { expected: usize, other: usize },

    /// Key variant the operation cannot dispatch on
    #[error("invalid key {0} for this operation")]
    InvalidKey(String),
}
