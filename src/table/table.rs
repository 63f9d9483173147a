use crate::table::key::Key;
use crate::table::key::Selection;
use crate::table::row::Row;
use crate::table::value::Value;
use crate::table::TableError;
use rand::seq::SliceRandom;
use std::cmp::Ordering;
use std::fmt::Display;
use std::ops::Range;

/// An ordered sequence of schema-uniform rows, addressable by row index and
/// by column name through one dispatcher.
///
/// The table owns its rows; cloning a table deep-copies them, so mutating a
/// copy never affects the original. Every row-producing operation comes in a
/// value form returning a new table and a `_mut` form mutating the receiver.
///
/// Non-empty tables answer `headers()` with the field order of row 0; a
/// rowless table answers with its explicit schema if it was built with one,
/// else with an empty list.
#[derive(Clone, Debug, Default)]
pub struct Table {
    /// Row storage, primary ordering
    rows: Vec<Row>,
    /// Explicit schema, consulted only while the table has no rows
    schema: Option<Vec<String>>,
}

impl Table {
    /// Creates an empty table without a schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty table carrying an explicit schema.
    pub fn with_schema<S: Into<String>>(headers: impl IntoIterator<Item = S>) -> Self {
        Table {
            rows: Vec::new(),
            schema: Some(headers.into_iter().map(Into::into).collect()),
        }
    }

    /// An empty table sharing this table's explicit schema.
    fn empty_like(&self) -> Self {
        Table {
            rows: Vec::new(),
            schema: self.schema.clone(),
        }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Removes all rows. An explicit schema survives.
    pub fn clear(&mut self) {
        self.rows.clear();
    }

    /// All rows, in order.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Iterates rows in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Row> {
        self.rows.iter()
    }

    /// The first row, if any.
    pub fn first(&self) -> Option<&Row> {
        self.rows.first()
    }

    /// The last row, if any.
    pub fn last(&self) -> Option<&Row> {
        self.rows.last()
    }

    /// A new table holding the last `count` rows.
    pub fn last_n(&self, count: usize) -> Table {
        let start = self.rows.len().saturating_sub(count);
        Table {
            rows: self.rows[start..].to_vec(),
            schema: self.schema.clone(),
        }
    }

    /// Appends a row. Rows are expected to share the table's field order;
    /// the constructors and the codec uphold that invariant.
    pub fn push(&mut self, row: Row) {
        self.rows.push(row);
    }

    /// Inserts a row before `index`.
    pub fn insert(&mut self, index: usize, row: Row) -> Result<(), TableError> {
        if index > self.rows.len() {
            return Err(TableError::RowIndexOutOfRange {
                index: index as i64,
                len: self.rows.len(),
            });
        }
        self.rows.insert(index, row);
        Ok(())
    }

    /// Ordered column names: row 0's field order, or the explicit schema
    /// while the table has no rows.
    pub fn headers(&self) -> Vec<String> {
        match self.rows.first() {
            Some(row) => row.fields().cloned().collect(),
            None => self.schema.clone().unwrap_or_default(),
        }
    }

    /// Materializes one column: the named field of every row, in row order,
    /// with `Null` standing in where a row lacks the field.
    pub fn col(&self, name: &str) -> Vec<Value> {
        self.rows
            .iter()
            .map(|row| row.get(name).cloned().unwrap_or_default())
            .collect()
    }

    /// Materializes every column in header order.
    pub fn cols(&self) -> Vec<(String, Vec<Value>)> {
        self.columns().collect()
    }

    /// Iterates (name, column) snapshots in header order. Restartable and
    /// non-mutating; columns are materialized per step.
    pub fn columns(&self) -> impl Iterator<Item = (String, Vec<Value>)> + '_ {
        self.headers().into_iter().map(move |name| {
            let column = self.col(&name);
            (name, column)
        })
    }

    /// Returns the row at `index`; negative indexes count from the end.
    pub fn row(&self, index: i64) -> Option<&Row> {
        Key::resolve_index(index, self.rows.len()).map(|index| &self.rows[index])
    }

    /// Returns the first row for which every (field, value) pair holds.
    pub fn row_matching(&self, predicate: &[(String, Value)]) -> Option<&Row> {
        self.rows.iter().find(|row| row.matches(predicate))
    }

    /// Row values without headers, in row-major order.
    pub fn values(&self) -> Vec<Vec<Value>> {
        self.rows
            .iter()
            .map(|row| row.values().cloned().collect())
            .collect()
    }

    /// Dispatches a lookup on the key's variant: index → row, name →
    /// column, span → sub-table, predicate → first matching row.
    ///
    /// Absent results (row out of range, no matching row) come back as
    /// `None`; a name that no row carries still yields a column of `Null`s.
    pub fn get(&self, key: impl Into<Key>) -> Option<Selection> {
        match key.into() {
            Key::Index(index) => {
                let index = Key::resolve_index(index, self.rows.len())?;
                Some(Selection::Row(self.rows[index].clone()))
            }
            Key::Name(name) => Some(Selection::Column(self.col(&name))),
            Key::Span(span) => {
                let range = Key::resolve_span(&span, self.rows.len());
                let mut result = self.empty_like();
                result.rows = self.rows[range].to_vec();
                Some(Selection::Table(result))
            }
            Key::Predicate(pairs) => self
                .row_matching(&pairs)
                .map(|row| Selection::Row(row.clone())),
        }
    }

    /// Dispatches a write on the key's variant: index + row replaces (or
    /// appends at `len`), name + column writes the column into every row,
    /// predicate + row merges into the first matching row. Any other
    /// key/selection pairing is an invalid key.
    pub fn set(&mut self, key: impl Into<Key>, value: Selection) -> Result<(), TableError> {
        match (key.into(), value) {
            (Key::Index(index), Selection::Row(row)) => self.set_row(index, row),
            (Key::Name(name), Selection::Column(values)) => self.set_col(name, values),
            (Key::Predicate(pairs), Selection::Row(row)) => {
                match self.rows.iter_mut().find(|candidate| candidate.matches(&pairs)) {
                    Some(target) => {
                        *target = target.merge(&row);
                        Ok(())
                    }
                    None => Err(TableError::NoMatchingRow(format!("{:?}", pairs))),
                }
            }
            (key, _) => Err(TableError::InvalidKey(format!("{:?}", key))),
        }
    }

    /// Replaces the row at `index`, or appends when `index` equals the row
    /// count.
    pub fn set_row(&mut self, index: i64, row: Row) -> Result<(), TableError> {
        let len = self.rows.len();
        if index == len as i64 {
            self.rows.push(row);
            return Ok(());
        }
        match Key::resolve_index(index, len) {
            Some(index) => {
                self.rows[index] = row;
                Ok(())
            }
            None => Err(TableError::RowIndexOutOfRange { index, len }),
        }
    }

    /// Writes a column: `values[i]` becomes the named field of row `i`,
    /// creating the field at the end of each row's field order when absent.
    /// The length is validated before any row is touched.
    pub fn set_col(&mut self, name: impl Into<String>, values: Vec<Value>) -> Result<(), TableError> {
        if values.len() != self.rows.len() {
            return Err(TableError::ColumnLengthMismatch {
                expected: self.rows.len(),
                actual: values.len(),
            });
        }
        let name = name.into();
        for (row, value) in self.rows.iter_mut().zip(values) {
            row.insert(name.as_str(), value);
        }
        Ok(())
    }

    /// Like `get` but with required-presence semantics: an absent row or
    /// column is an error instead of `None`.
    pub fn fetch(&self, key: impl Into<Key>) -> Result<Selection, TableError> {
        match key.into() {
            Key::Index(index) => {
                self.get(Key::Index(index))
                    .ok_or(TableError::RowIndexOutOfRange {
                        index,
                        len: self.rows.len(),
                    })
            }
            Key::Name(name) => {
                if self.headers().iter().any(|header| *header == name) {
                    Ok(Selection::Column(self.col(&name)))
                } else {
                    Err(TableError::ColumnNotFound(name))
                }
            }
            Key::Predicate(pairs) => self
                .row_matching(&pairs)
                .map(|row| Selection::Row(row.clone()))
                .ok_or_else(|| TableError::NoMatchingRow(format!("{:?}", pairs))),
            Key::Span(span) => {
                let range = Key::resolve_span(&span, self.rows.len());
                let mut result = self.empty_like();
                result.rows = self.rows[range].to_vec();
                Ok(Selection::Table(result))
            }
        }
    }

    /// `fetch` with a default instead of an error.
    pub fn fetch_or(&self, key: impl Into<Key>, default: Selection) -> Selection {
        self.fetch(key).unwrap_or(default)
    }

    /// `fetch` with a fallback computation instead of an error.
    pub fn fetch_or_else(
        &self,
        key: impl Into<Key>,
        fallback: impl FnOnce() -> Selection,
    ) -> Selection {
        self.fetch(key).unwrap_or_else(|_| fallback())
    }

    /// Chained polymorphic lookup. A leading name projects to the column
    /// and an index digs into it; a leading index or predicate selects the
    /// row and a name digs into it.
    pub fn dig(&self, keys: &[Key]) -> Option<Selection> {
        let (first, rest) = keys.split_first()?;
        let mut current = self.get(first.clone())?;
        for key in rest {
            current = match (current, key) {
                (Selection::Column(values), Key::Index(index)) => {
                    let index = Key::resolve_index(*index, values.len())?;
                    Selection::Value(values[index].clone())
                }
                (Selection::Row(row), Key::Name(name)) => Selection::Value(row.get(name)?.clone()),
                (Selection::Table(table), key) => table.get(key.clone())?,
                _ => return None,
            };
        }
        Some(current)
    }

    /// Deletes a row (by index) or a whole column (by name) in place and
    /// returns it. A missing row index or column name is `Ok(None)` and
    /// leaves the table untouched; span and predicate keys are invalid here.
    pub fn delete_at(&mut self, key: impl Into<Key>) -> Result<Option<Selection>, TableError> {
        match key.into() {
            Key::Index(index) => Ok(Key::resolve_index(index, self.rows.len())
                .map(|index| Selection::Row(self.rows.remove(index)))),
            Key::Name(name) => {
                if !self.headers().iter().any(|header| *header == name) {
                    return Ok(None);
                }
                let column = self.col(&name);
                for row in &mut self.rows {
                    row.remove(&name);
                }
                if let Some(schema) = &mut self.schema {
                    schema.retain(|header| *header != name);
                }
                Ok(Some(Selection::Column(column)))
            }
            key => Err(TableError::InvalidKey(format!("{:?}", key))),
        }
    }

    // --- whole-table algebra ---

    /// Position-aligned merge: row `i` of the result is row `i` of `self`
    /// overlaid with row `i` of `other` (other's fields win). Extra rows in
    /// `other` are ignored; a shorter `other` is a length mismatch. Neither
    /// operand is mutated.
    pub fn combine(&self, other: &Table) -> Result<Table, TableError> {
        if other.rows.len() < self.rows.len() {
            return Err(TableError::CombineLengthMismatch {
                expected: self.rows.len(),
                other: other.rows.len(),
            });
        }
        let rows = self
            .rows
            .iter()
            .zip(&other.rows)
            .map(|(left, right)| left.merge(right))
            .collect();
        Ok(Table {
            rows,
            schema: self.schema.clone(),
        })
    }

    /// A new table whose rows keep only `headers - columns`, order
    /// preserved. The receiver is untouched.
    pub fn remove_columns<S: AsRef<str>>(&self, columns: &[S]) -> Table {
        let keep: Vec<String> = self
            .headers()
            .into_iter()
            .filter(|header| !columns.iter().any(|name| name.as_ref() == header))
            .collect();
        let rows = self
            .rows
            .iter()
            .map(|row| row.project(keep.iter().map(String::as_str)))
            .collect();
        let schema = self.schema.as_ref().map(|schema| {
            schema
                .iter()
                .filter(|header| !columns.iter().any(|name| name.as_ref() == *header))
                .cloned()
                .collect()
        });
        Table { rows, schema }
    }

    /// Rows of `self` absent from every `other`, original order, by full
    /// value equality. Duplicates of surviving rows are preserved.
    pub fn difference(&self, others: &[&Table]) -> Table {
        let rows = self
            .rows
            .iter()
            .filter(|row| !others.iter().any(|table| table.rows.contains(row)))
            .cloned()
            .collect();
        Table {
            rows,
            schema: self.schema.clone(),
        }
    }

    /// Rows of `self` present in every `other`, first-occurrence order,
    /// duplicates collapsed.
    pub fn intersection(&self, others: &[&Table]) -> Table {
        let mut rows: Vec<Row> = Vec::new();
        for row in &self.rows {
            if others.iter().all(|table| table.rows.contains(row)) && !rows.contains(row) {
                rows.push(row.clone());
            }
        }
        Table {
            rows,
            schema: self.schema.clone(),
        }
    }

    /// Concatenation of `self` and `others` with duplicate rows removed,
    /// first-occurrence order preserved.
    pub fn union(&self, others: &[&Table]) -> Table {
        let mut rows: Vec<Row> = Vec::new();
        let all = self
            .rows
            .iter()
            .chain(others.iter().flat_map(|table| table.rows.iter()));
        for row in all {
            if !rows.contains(row) {
                rows.push(row.clone());
            }
        }
        Table {
            rows,
            schema: self.schema.clone(),
        }
    }

    // --- filtering and ordering, value and in-place forms ---

    /// A new table keeping rows for which the predicate holds.
    pub fn select(&self, predicate: impl FnMut(&Row) -> bool) -> Table {
        let mut result = self.clone();
        result.select_mut(predicate);
        result
    }

    /// Keeps rows for which the predicate holds; order preserved.
    pub fn select_mut(&mut self, mut predicate: impl FnMut(&Row) -> bool) -> &mut Self {
        self.rows.retain(|row| predicate(row));
        self
    }

    /// A new table keeping rows for which the predicate does not hold.
    pub fn reject(&self, predicate: impl FnMut(&Row) -> bool) -> Table {
        let mut result = self.clone();
        result.reject_mut(predicate);
        result
    }

    /// Drops rows for which the predicate holds; order preserved.
    pub fn reject_mut(&mut self, mut predicate: impl FnMut(&Row) -> bool) -> &mut Self {
        self.rows.retain(|row| !predicate(row));
        self
    }

    /// A new table sorted by the comparator (stable).
    pub fn sort(&self, compare: impl FnMut(&Row, &Row) -> Ordering) -> Table {
        let mut result = self.clone();
        result.sort_mut(compare);
        result
    }

    /// Sorts rows by the comparator in place (stable).
    pub fn sort_mut(&mut self, mut compare: impl FnMut(&Row, &Row) -> Ordering) -> &mut Self {
        self.rows.sort_by(|a, b| compare(a, b));
        self
    }

    /// A new table sorted by an extracted key value (stable).
    pub fn sort_by(&self, key: impl FnMut(&Row) -> Value) -> Table {
        let mut result = self.clone();
        result.sort_by_mut(key);
        result
    }

    /// Sorts rows by an extracted key value in place (stable).
    pub fn sort_by_mut(&mut self, mut key: impl FnMut(&Row) -> Value) -> &mut Self {
        self.rows.sort_by(|a, b| key(a).total_cmp(&key(b)));
        self
    }

    /// A reversed copy.
    pub fn reverse(&self) -> Table {
        let mut result = self.clone();
        result.reverse_mut();
        result
    }

    /// Reverses the row order in place.
    pub fn reverse_mut(&mut self) -> &mut Self {
        self.rows.reverse();
        self
    }

    /// A new table with the first `shift` rows (mod length) moved to the
    /// end; negative `shift` rotates from the end. Relative order of both
    /// segments is preserved.
    pub fn rotate(&self, shift: i64) -> Table {
        let mut result = self.clone();
        result.rotate_mut(shift);
        result
    }

    /// Rotates rows in place.
    pub fn rotate_mut(&mut self, shift: i64) -> &mut Self {
        if !self.rows.is_empty() {
            let shift = shift.rem_euclid(self.rows.len() as i64) as usize;
            self.rows.rotate_left(shift);
        }
        self
    }

    /// A new table with the rows in random order.
    pub fn shuffle(&self) -> Table {
        let mut result = self.clone();
        result.shuffle_mut();
        result
    }

    /// Shuffles the rows in place.
    pub fn shuffle_mut(&mut self) -> &mut Self {
        self.rows.shuffle(&mut rand::thread_rng());
        self
    }

    /// A new table without the first `count` rows.
    pub fn skip(&self, count: usize) -> Table {
        let mut result = self.clone();
        result.skip_mut(count);
        result
    }

    /// Removes the first `count` rows.
    pub fn skip_mut(&mut self, count: usize) -> &mut Self {
        let count = count.min(self.rows.len());
        self.rows.drain(..count);
        self
    }

    /// A new table with only the first `count` rows.
    pub fn take(&self, count: usize) -> Table {
        let mut result = self.clone();
        result.take_mut(count);
        result
    }

    /// Keeps only the first `count` rows.
    pub fn take_mut(&mut self, count: usize) -> &mut Self {
        self.rows.truncate(count);
        self
    }

    /// A new table without the leading rows for which the predicate holds.
    pub fn skip_while(&self, predicate: impl FnMut(&Row) -> bool) -> Table {
        let mut result = self.clone();
        result.skip_while_mut(predicate);
        result
    }

    /// Removes the leading rows for which the predicate holds.
    pub fn skip_while_mut(&mut self, mut predicate: impl FnMut(&Row) -> bool) -> &mut Self {
        let boundary = self
            .rows
            .iter()
            .position(|row| !predicate(row))
            .unwrap_or(self.rows.len());
        self.rows.drain(..boundary);
        self
    }

    /// A new table with only the leading rows for which the predicate holds.
    pub fn take_while(&self, predicate: impl FnMut(&Row) -> bool) -> Table {
        let mut result = self.clone();
        result.take_while_mut(predicate);
        result
    }

    /// Keeps only the leading rows for which the predicate holds.
    pub fn take_while_mut(&mut self, mut predicate: impl FnMut(&Row) -> bool) -> &mut Self {
        let boundary = self
            .rows
            .iter()
            .position(|row| !predicate(row))
            .unwrap_or(self.rows.len());
        self.rows.truncate(boundary);
        self
    }

    /// A new table without rows that hold `Null` in any field.
    pub fn compact(&self) -> Table {
        let mut result = self.clone();
        result.compact_mut();
        result
    }

    /// Removes rows that hold `Null` in any field.
    pub fn compact_mut(&mut self) -> &mut Self {
        self.rows.retain(|row| !row.has_null());
        self
    }

    /// A new table holding the rows in `span`, clamped to the table bounds;
    /// negative bounds count from the end.
    pub fn slice(&self, span: Range<i64>) -> Table {
        let range = Key::resolve_span(&span, self.rows.len());
        Table {
            rows: self.rows[range].to_vec(),
            schema: self.schema.clone(),
        }
    }

    /// Removes the rows in `span` from the receiver and returns them as a
    /// new table.
    pub fn slice_mut(&mut self, span: Range<i64>) -> Table {
        let range = Key::resolve_span(&span, self.rows.len());
        Table {
            rows: self.rows.drain(range).collect(),
            schema: self.schema.clone(),
        }
    }
}

/// Row-by-row equality plus equal effective headers. The latent schema of
/// a non-empty table is invisible, so a decoded table compares equal to an
/// identically-shaped constructed one.
impl PartialEq for Table {
    fn eq(&self, other: &Self) -> bool {
        self.rows == other.rows && self.headers() == other.headers()
    }
}

impl From<Vec<Row>> for Table {
    fn from(rows: Vec<Row>) -> Self {
        Table { rows, schema: None }
    }
}

impl FromIterator<Row> for Table {
    fn from_iter<T: IntoIterator<Item = Row>>(rows: T) -> Self {
        Table {
            rows: rows.into_iter().collect(),
            schema: None,
        }
    }
}

impl<'a> IntoIterator for &'a Table {
    type Item = &'a Row;
    type IntoIter = std::slice::Iter<'a, Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

impl Display for Table {
    /// Short diagnostics string; not a serialization format.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "<Table:{:p} size={} headers=[{}]>",
            self,
            self.rows.len(),
            self.headers().join(", ")
        )
    }
}
