use crate::table::row::Row;
use crate::table::table::Table;
use crate::table::value::Value;
use std::ops::Range;

/// Key accepted by the dual-indexing dispatcher.
///
/// The source of a table lookup decides the shape of its result: an index
/// addresses a row, a name addresses a column, a span addresses a sub-table
/// and a predicate addresses the first matching row. Negative indexes count
/// from the end.
#[derive(Clone, Debug, PartialEq)]
pub enum Key {
    /// Row position, 0-based; negative counts from the end
    Index(i64),
    /// Column name
    Name(String),
    /// Row range; bounds may be negative
    Span(Range<i64>),
    /// Partial-row match: every pair must hold in the selected row
    Predicate(Vec<(String, Value)>),
}

impl Key {
    /// Builds a predicate key from (field, value) pairs.
    pub fn matching<S: Into<String>>(pairs: impl IntoIterator<Item = (S, Value)>) -> Self {
        Key::Predicate(
            pairs
                .into_iter()
                .map(|(name, value)| (name.into(), value))
                .collect(),
        )
    }

    /// Resolves a possibly-negative index against a length.
    /// Returns `None` when the index falls outside `0..len`.
    pub(crate) fn resolve_index(index: i64, len: usize) -> Option<usize> {
        let resolved = if index < 0 { index + len as i64 } else { index };
        if (0..len as i64).contains(&resolved) {
            Some(resolved as usize)
        } else {
            None
        }
    }

    /// Resolves a possibly-negative span against a length, clamping to the
    /// table bounds. An inverted span resolves to an empty range.
    pub(crate) fn resolve_span(span: &Range<i64>, len: usize) -> Range<usize> {
        let clamp = |bound: i64| -> usize {
            let resolved = if bound < 0 { bound + len as i64 } else { bound };
            resolved.clamp(0, len as i64) as usize
        };
        let start = clamp(span.start);
        let end = clamp(span.end);
        start..end.max(start)
    }
}

impl From<i64> for Key {
    fn from(index: i64) -> Self {
        Key::Index(index)
    }
}

impl From<usize> for Key {
    fn from(index: usize) -> Self {
        Key::Index(index as i64)
    }
}

impl From<&str> for Key {
    fn from(name: &str) -> Self {
        Key::Name(name.to_owned())
    }
}

impl From<String> for Key {
    fn from(name: String) -> Self {
        Key::Name(name)
    }
}

impl From<Range<i64>> for Key {
    fn from(span: Range<i64>) -> Self {
        Key::Span(span)
    }
}

/// Result of a dispatched lookup; the variant mirrors the key that produced
/// it. `Value` only arises from chained `dig` lookups.
#[derive(Clone, Debug, PartialEq)]
pub enum Selection {
    /// A single row
    Row(Row),
    /// A materialized column, positionally aligned with the row order
    Column(Vec<Value>),
    /// A sub-table with independently owned rows
    Table(Table),
    /// A single scalar, from digging into a row or column
    Value(Value),
}

impl Selection {
    /// Unwraps a row selection.
    pub fn into_row(self) -> Option<Row> {
        match self {
            Selection::Row(row) => Some(row),
            _ => None,
        }
    }

    /// Unwraps a column selection.
    pub fn into_column(self) -> Option<Vec<Value>> {
        match self {
            Selection::Column(column) => Some(column),
            _ => None,
        }
    }

    /// Unwraps a table selection.
    pub fn into_table(self) -> Option<Table> {
        match self {
            Selection::Table(table) => Some(table),
            _ => None,
        }
    }

    /// Unwraps a scalar selection.
    pub fn into_value(self) -> Option<Value> {
        match self {
            Selection::Value(value) => Some(value),
            _ => None,
        }
    }
}
