use crate::table::value::Value;
use linked_hash_map::LinkedHashMap;

/// One record of a table: an ordered mapping from field name to value.
///
/// Insertion order is significant and serves as the column order of the
/// owning table. A row is exclusively owned by one table; cloning a table
/// deep-copies its rows.
#[derive(Clone, Debug, Default)]
pub struct Row {
    fields: LinkedHashMap<String, Value>,
}

impl Row {
    /// Creates an empty row.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if the row has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Returns the value of a field, if present.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Sets a field value. An existing field keeps its position in the
    /// field order; a new field is appended at the end.
    pub fn insert(&mut self, name: impl Into<String>, value: Value) -> Option<Value> {
        let name = name.into();
        if let Some(slot) = self.fields.get_mut(&name) {
            Some(std::mem::replace(slot, value))
        } else {
            self.fields.insert(name, value);
            None
        }
    }

    /// Removes a field and returns its value. The order of the remaining
    /// fields is unchanged.
    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.fields.remove(name)
    }

    /// Returns true if the row has a field with this name.
    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Iterates field names in order.
    pub fn fields(&self) -> impl Iterator<Item = &String> {
        self.fields.keys()
    }

    /// Iterates values in field order.
    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.fields.values()
    }

    /// Iterates (name, value) pairs in field order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.fields.iter()
    }

    /// Returns a new row holding this row's fields overlaid with `other`'s.
    /// Colliding names take `other`'s value in place; new names are appended
    /// after this row's field order.
    pub fn merge(&self, other: &Row) -> Row {
        let mut result = self.clone();
        for (name, value) in other.iter() {
            result.insert(name.as_str(), value.clone());
        }
        result
    }

    /// Returns a new row keeping only the named fields, in the given order.
    /// Names the row does not have are skipped.
    pub fn project<'a>(&self, keep: impl IntoIterator<Item = &'a str>) -> Row {
        let mut result = Row::new();
        for name in keep {
            if let Some(value) = self.fields.get(name) {
                result.insert(name, value.clone());
            }
        }
        result
    }

    /// Returns true if any field holds `Null`.
    pub fn has_null(&self) -> bool {
        self.fields.values().any(Value::is_null)
    }

    /// Returns true if every (name, value) pair is present in this row with
    /// an equal value.
    pub fn matches(&self, predicate: &[(String, Value)]) -> bool {
        predicate
            .iter()
            .all(|(name, value)| self.fields.get(name) == Some(value))
    }
}

/// Field-by-field equality, order included.
impl PartialEq for Row {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().zip(other.iter()).all(|(a, b)| a == b)
    }
}

impl<S: Into<String>> FromIterator<(S, Value)> for Row {
    fn from_iter<T: IntoIterator<Item = (S, Value)>>(pairs: T) -> Self {
        let mut row = Row::new();
        for (name, value) in pairs {
            row.insert(name, value);
        }
        row
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pairs: &[(&str, i64)]) -> Row {
        pairs
            .iter()
            .map(|(name, value)| (*name, Value::Integer(*value)))
            .collect()
    }

    #[test]
    fn insertion_order_is_field_order() {
        let row = row(&[("year", 2020), ("population", 2000000)]);
        let fields: Vec<&String> = row.fields().collect();
        assert_eq!(fields, ["year", "population"]);
    }

    #[test]
    fn update_keeps_position() {
        let mut row = row(&[("year", 2020), ("population", 2000000)]);
        let previous = row.insert("year", Value::Integer(2021));
        assert_eq!(previous, Some(Value::Integer(2020)));
        let fields: Vec<&String> = row.fields().collect();
        assert_eq!(fields, ["year", "population"]);
    }

    #[test]
    fn merge_overwrites_and_appends() {
        let left = row(&[("year", 2020), ("population", 2000000)]);
        let right = row(&[("population", 3), ("infected", 0)]);
        let merged = left.merge(&right);
        let fields: Vec<&String> = merged.fields().collect();
        assert_eq!(fields, ["year", "population", "infected"]);
        assert_eq!(merged.get("population"), Some(&Value::Integer(3)));
        // Receiver untouched
        assert_eq!(left.get("population"), Some(&Value::Integer(2000000)));
    }

    #[test]
    fn remove_preserves_remaining_order() {
        let mut row = row(&[("a", 1), ("b", 2), ("c", 3)]);
        assert_eq!(row.remove("b"), Some(Value::Integer(2)));
        assert_eq!(row.remove("b"), None);
        let fields: Vec<&String> = row.fields().collect();
        assert_eq!(fields, ["a", "c"]);
    }

    #[test]
    fn project_follows_requested_order() {
        let row = row(&[("a", 1), ("b", 2), ("c", 3)]);
        let projected = row.project(["c", "a", "missing"]);
        let fields: Vec<&String> = projected.fields().collect();
        assert_eq!(fields, ["c", "a"]);
    }

    #[test]
    fn matches_partial_predicate() {
        let row = row(&[("year", 2021), ("population", 20000)]);
        assert!(row.matches(&[("year".to_owned(), Value::Integer(2021))]));
        assert!(!row.matches(&[("year".to_owned(), Value::Integer(1999))]));
        assert!(!row.matches(&[("absent".to_owned(), Value::Null)]));
    }

    #[test]
    fn equality_is_order_sensitive() {
        let forward = row(&[("a", 1), ("b", 2)]);
        let backward = row(&[("b", 2), ("a", 1)]);
        assert_ne!(forward, backward);
        assert_eq!(forward, row(&[("a", 1), ("b", 2)]));
    }

    #[test]
    fn has_null_scans_every_field() {
        let mut row = row(&[("a", 1)]);
        assert!(!row.has_null());
        row.insert("b", Value::Null);
        assert!(row.has_null());
    }
}
