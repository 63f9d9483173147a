use std::cmp::Ordering;
use std::fmt::Display;

/// Scalar cell value held by a table.
///
/// A closed sum over the types the text codec can produce, so column
/// operations and comparisons have unambiguous semantics.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Value {
    /// Absent value
    #[default]
    Null,
    /// Boolean values (true/false)
    Boolean(bool),
    /// 64-bit signed integers
    Integer(i64),
    /// Double-precision floating point numbers
    Float(f64),
    /// Variable-length strings
    String(String),
}

impl Value {
    /// Infers a value from a text field: integer, else float, else string.
    /// An empty field becomes `Null`.
    pub fn infer(field: &str) -> Self {
        if field.is_empty() {
            Value::Null
        } else if let Ok(integer) = field.parse::<i64>() {
            Value::Integer(integer)
        } else if let Ok(float) = field.parse::<f64>() {
            Value::Float(float)
        } else {
            Value::String(field.to_owned())
        }
    }

    /// Returns true for `Null`.
    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns the boolean payload, if any.
    pub fn as_boolean(&self) -> Option<bool> {
        match self {
            Value::Boolean(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the integer payload, if any.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the numeric payload widened to f64, if any.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Integer(value) => Some(*value as f64),
            Value::Float(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the string payload, if any.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(value) => Some(value.as_str()),
            _ => None,
        }
    }

    /// Total ordering across all variants, for sorting rows by a key value.
    ///
    /// Variants rank Null < Boolean < numbers < String; integers and floats
    /// compare numerically against each other and floats order by
    /// `f64::total_cmp`.
    pub fn total_cmp(&self, other: &Value) -> Ordering {
        match (self, other) {
            (Value::Null, Value::Null) => Ordering::Equal,
            (Value::Boolean(left), Value::Boolean(right)) => left.cmp(right),
            (Value::Integer(left), Value::Integer(right)) => left.cmp(right),
            (Value::Integer(left), Value::Float(right)) => (*left as f64).total_cmp(right),
            (Value::Float(left), Value::Integer(right)) => left.total_cmp(&(*right as f64)),
            (Value::Float(left), Value::Float(right)) => left.total_cmp(right),
            (Value::String(left), Value::String(right)) => left.cmp(right),
            _ => self.rank().cmp(&other.rank()),
        }
    }

    /// Variant rank used when comparing values of different kinds.
    fn rank(&self) -> u8 {
        match self {
            Value::Null => 0,
            Value::Boolean(_) => 1,
            Value::Integer(_) | Value::Float(_) => 2,
            Value::String(_) => 3,
        }
    }
}

impl Display for Value {
    /// Renders the canonical text form used by the codec.
    /// `Null` is empty and whole floats keep one decimal place so that
    /// decoding with inference restores the float variant.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Boolean(value) => write!(f, "{}", value),
            Value::Integer(value) => write!(f, "{}", value),
            Value::Float(value) if value.fract() == 0.0 && value.is_finite() => {
                write!(f, "{:.1}", value)
            }
            Value::Float(value) => write!(f, "{}", value),
            Value::String(value) => write!(f, "{}", value),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn infer_numeric() {
        assert_eq!(Value::infer("2020"), Value::Integer(2020));
        assert_eq!(Value::infer("-5"), Value::Integer(-5));
        assert_eq!(Value::infer("2.5"), Value::Float(2.5));
        assert_eq!(Value::infer("1e3"), Value::Float(1000.0));
    }

    #[test]
    fn infer_text_and_null() {
        assert_eq!(Value::infer("harry"), Value::String("harry".to_owned()));
        assert_eq!(Value::infer("2020-01-01"), Value::String("2020-01-01".to_owned()));
        assert_eq!(Value::infer(""), Value::Null);
    }

    #[test]
    fn display_round_trips_through_infer() {
        for value in [Value::Integer(42), Value::Float(2.0), Value::Float(2.5)] {
            assert_eq!(Value::infer(&value.to_string()), value);
        }
    }

    #[test]
    fn display_forms() {
        assert_eq!(Value::Null.to_string(), "");
        assert_eq!(Value::Boolean(true).to_string(), "true");
        assert_eq!(Value::Float(2.0).to_string(), "2.0");
        assert_eq!(Value::String("x".to_owned()).to_string(), "x");
    }

    #[test]
    fn total_order() {
        assert_eq!(Value::Integer(2).total_cmp(&Value::Float(2.0)), Ordering::Equal);
        assert_eq!(Value::Integer(2).total_cmp(&Value::Integer(200)), Ordering::Less);
        assert_eq!(Value::Null.total_cmp(&Value::Integer(0)), Ordering::Less);
        assert_eq!(
            Value::String("a".to_owned()).total_cmp(&Value::Integer(9)),
            Ordering::Greater
        );
    }

    #[test]
    fn equality_is_variant_strict() {
        assert_ne!(Value::Integer(2), Value::Float(2.0));
        assert_ne!(Value::Null, Value::String(String::new()));
    }
}
