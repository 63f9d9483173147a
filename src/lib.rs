//! # rowtable
//!
//! An ordered sequence of uniform records (rows) presented simultaneously
//! as a row-major and column-major structure, with delimiter-separated text
//! codecs layered on top.
//!
//! ## Features
//!
//! - **Dual indexing**: one dispatcher routes integer keys to rows, field
//!   names to columns, spans to sub-tables and partial-row predicates to
//!   the first matching row
//! - **Schema uniformity**: every row of a non-empty table shares one
//!   ordered set of field names, derived from the first row
//! - **Value and in-place operation pairs**: `select`/`select_mut`,
//!   `sort_by`/`sort_by_mut`, `rotate`/`rotate_mut` and friends — the value
//!   form returns a new table, the `_mut` form mutates the receiver
//! - **Set algebra over rows**: `difference`, `intersection`, `union` by
//!   full value equality, first-occurrence order preserved
//! - **Column writes**: assigning a column creates or updates the field in
//!   every row, validated against the row count before mutating
//! - **Text codecs**: CSV/TSV encode and decode with header handling and
//!   numeric type inference, quoting delegated to the csv crate
//!
//! ## Example
//!
//! ```
//! use rowtable::{Table, Value};
//!
//! let mut table = Table::from_csv("year,population\n2020,2000000\n2021,20000").unwrap();
//! table.set_col("infected", vec![Value::Integer(0), Value::Integer(5)]).unwrap();
//! assert_eq!(table.headers(), ["year", "population", "infected"]);
//! assert_eq!(table.col("infected"), vec![Value::Integer(0), Value::Integer(5)]);
//! ```
mod codec;
mod error;
mod table;

pub use crate::codec::delimited::decode;
pub use crate::codec::delimited::encode;
pub use crate::codec::delimited::DecodeOptions;
pub use crate::codec::delimited::Format;
pub use crate::codec::CodecError;
pub use crate::error::RowTableError;
pub use crate::table::key::Key;
pub use crate::table::key::Selection;
pub use crate::table::row::Row;
pub use crate::table::table::Table;
pub use crate::table::value::Value;
pub use crate::table::TableError;
