//! Comparison values
//!
//! [`Value`] is the domain every operator works in. Members are reduced to a
//! `Value` (or inspected directly, see [`Inspect`](crate::access::Inspect))
//! just before an operator runs, and every operand extracts to one.
//!
//! Numeric comparisons are loose across integer and float kinds, so
//! `Value::Int(1)` equals `Value::Float(1.0)`.

use std::borrow::Cow;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

// ============================================================================
// VALUE
// ============================================================================

/// A dynamically typed value used on both sides of a comparison.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// Absent or null value.
    #[default]
    Null,
    /// Boolean.
    Bool(bool),
    /// Signed integer.
    Int(i64),
    /// Unsigned integer that does not fit into `i64`.
    UInt(u64),
    /// Floating point number.
    Float(f64),
    /// UTF-8 string.
    Str(String),
    /// Ordered list, also used as the "range" operand of `in`.
    List(Vec<Value>),
    /// String-keyed map.
    Map(BTreeMap<String, Value>),
    /// Bounded interval, the other operand form of `in`.
    Interval(Box<Interval>),
}

impl Value {
    /// Returns a short name of the value kind, used in conversion errors.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) | Self::UInt(_) => "integer",
            Self::Float(_) => "float",
            Self::Str(_) => "string",
            Self::List(_) => "list",
            Self::Map(_) => "map",
            Self::Interval(_) => "interval",
        }
    }

    /// Returns true for [`Value::Null`].
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns the string slice of a [`Value::Str`].
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the value as `f64` if it is numeric.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(i) => Some(*i as f64),
            Self::UInt(u) => Some(*u as f64),
            Self::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Truthiness used by `flag` and `exists` operands.
    ///
    /// Null, `false`, zero and empty strings/containers are false.
    #[must_use]
    pub fn truthy(&self) -> bool {
        match self {
            Self::Null => false,
            Self::Bool(b) => *b,
            Self::Int(i) => *i != 0,
            Self::UInt(u) => *u != 0,
            Self::Float(f) => *f != 0.0,
            Self::Str(s) => !s.is_empty(),
            Self::List(l) => !l.is_empty(),
            Self::Map(m) => !m.is_empty(),
            Self::Interval(_) => true,
        }
    }

    /// Number of elements of a container, or characters of a string.
    #[must_use]
    pub fn len(&self) -> Option<usize> {
        match self {
            Self::Str(s) => Some(s.chars().count()),
            Self::List(l) => Some(l.len()),
            Self::Map(m) => Some(m.len()),
            _ => None,
        }
    }

    /// Equality with numeric kinds compared by value.
    #[must_use]
    pub fn loose_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::List(a), Self::List(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.loose_eq(y))
            }
            (Self::Map(a), Self::Map(b)) => {
                a.len() == b.len()
                    && a.iter()
                        .zip(b)
                        .all(|((ka, va), (kb, vb))| ka == kb && va.loose_eq(vb))
            }
            _ => match compare_numbers(self, other) {
                Some(ordering) => ordering == Ordering::Equal,
                None => self == other,
            },
        }
    }

    /// Partial ordering: numbers by value, strings and booleans natively,
    /// lists lexicographically. Values of unrelated kinds are unordered.
    #[must_use]
    pub fn compare(&self, other: &Self) -> Option<Ordering> {
        if let Some(ordering) = compare_numbers(self, other) {
            return Some(ordering);
        }
        match (self, other) {
            (Self::Null, Self::Null) => Some(Ordering::Equal),
            (Self::Bool(a), Self::Bool(b)) => Some(a.cmp(b)),
            (Self::Str(a), Self::Str(b)) => Some(a.cmp(b)),
            (Self::List(a), Self::List(b)) => {
                for (x, y) in a.iter().zip(b) {
                    match x.compare(y)? {
                        Ordering::Equal => {}
                        ordering => return Some(ordering),
                    }
                }
                Some(a.len().cmp(&b.len()))
            }
            _ => None,
        }
    }

    /// String form used by the lexicographic operators.
    #[must_use]
    pub fn lexical(&self) -> Cow<'_, str> {
        match self {
            Self::Str(s) => Cow::Borrowed(s),
            other => Cow::Owned(other.to_string()),
        }
    }
}

fn compare_numbers(a: &Value, b: &Value) -> Option<Ordering> {
    match (a, b) {
        (Value::Int(x), Value::Int(y)) => Some(x.cmp(y)),
        (Value::UInt(x), Value::UInt(y)) => Some(x.cmp(y)),
        (Value::Int(x), Value::UInt(y)) => Some(match u64::try_from(*x) {
            Ok(x) => x.cmp(y),
            Err(_) => Ordering::Less,
        }),
        (Value::UInt(_), Value::Int(_)) => compare_numbers(b, a).map(Ordering::reverse),
        (Value::Float(_), _) | (_, Value::Float(_)) => a.as_f64()?.partial_cmp(&b.as_f64()?),
        _ => None,
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::UInt(u) => write!(f, "{u}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Str(s) => f.write_str(s),
            Self::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Self::Map(map) => {
                f.write_str("{")?;
                for (i, (k, v)) in map.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{k}: {v}")?;
                }
                f.write_str("}")
            }
            Self::Interval(interval) => write!(f, "{interval}"),
        }
    }
}

// ============================================================================
// INTERVAL
// ============================================================================

/// An interval with independently open or closed bounds.
#[derive(Debug, Clone, PartialEq)]
pub struct Interval {
    /// Lower bound.
    pub from: Value,
    /// Upper bound.
    pub to: Value,
    /// Excludes `from` itself.
    pub from_open: bool,
    /// Excludes `to` itself.
    pub to_open: bool,
}

impl Interval {
    /// Creates a closed interval `[from, to]`.
    pub fn closed(from: impl Into<Value>, to: impl Into<Value>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            from_open: false,
            to_open: false,
        }
    }

    /// Excludes the lower bound.
    #[must_use = "builder methods must be chained or built"]
    pub fn open_from(mut self) -> Self {
        self.from_open = true;
        self
    }

    /// Excludes the upper bound.
    #[must_use = "builder methods must be chained or built"]
    pub fn open_to(mut self) -> Self {
        self.to_open = true;
        self
    }

    /// Excludes both bounds.
    #[must_use = "builder methods must be chained or built"]
    pub fn open(self) -> Self {
        self.open_from().open_to()
    }

    /// Returns true if `value` lies inside the interval.
    #[must_use]
    pub fn contains(&self, value: &Value) -> bool {
        let above = match value.compare(&self.from) {
            Some(Ordering::Greater) => true,
            Some(Ordering::Equal) => !self.from_open,
            _ => false,
        };
        let below = match value.compare(&self.to) {
            Some(Ordering::Less) => true,
            Some(Ordering::Equal) => !self.to_open,
            _ => false,
        };
        above && below
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let open = if self.from_open { '(' } else { '[' };
        let close = if self.to_open { ')' } else { ']' };
        write!(f, "{open}{}, {}{close}", self.from, self.to)
    }
}

// ============================================================================
// CONVERSIONS INTO VALUE
// ============================================================================

macro_rules! from_signed {
    ($($t:ty),*) => {$(
        impl From<$t> for Value {
            fn from(v: $t) -> Self {
                Self::Int(i64::from(v))
            }
        }
    )*};
}

macro_rules! from_wide_unsigned {
    ($($t:ty),*) => {$(
        impl From<$t> for Value {
            fn from(v: $t) -> Self {
                match i64::try_from(v) {
                    Ok(i) => Self::Int(i),
                    Err(_) => Self::UInt(v as u64),
                }
            }
        }
    )*};
}

from_signed!(i8, i16, i32, i64, u8, u16, u32);
from_wide_unsigned!(u64, usize);

impl From<isize> for Value {
    fn from(v: isize) -> Self {
        Self::Int(v as i64)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Self::Float(f64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<char> for Value {
    fn from(v: char) -> Self {
        Self::Str(v.to_string())
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Str(v.to_owned())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

impl From<&String> for Value {
    fn from(v: &String) -> Self {
        Self::Str(v.clone())
    }
}

impl From<Cow<'_, str>> for Value {
    fn from(v: Cow<'_, str>) -> Self {
        Self::Str(v.into_owned())
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Self::List(v.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>, const N: usize> From<[T; N]> for Value {
    fn from(v: [T; N]) -> Self {
        Self::List(v.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

impl<T: Into<Value>> From<BTreeMap<String, T>> for Value {
    fn from(v: BTreeMap<String, T>) -> Self {
        Self::Map(v.into_iter().map(|(k, v)| (k, v.into())).collect())
    }
}

impl From<Interval> for Value {
    fn from(v: Interval) -> Self {
        Self::Interval(Box::new(v))
    }
}

impl From<&serde_json::Value> for Value {
    fn from(v: &serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(*b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Self::Int(i)
                } else if let Some(u) = n.as_u64() {
                    Self::UInt(u)
                } else {
                    Self::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            serde_json::Value::String(s) => Self::Str(s.clone()),
            serde_json::Value::Array(items) => Self::List(items.iter().map(Self::from).collect()),
            serde_json::Value::Object(map) => Self::Map(
                map.iter()
                    .map(|(k, v)| (k.clone(), Self::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        Self::from(&v)
    }
}

// ============================================================================
// CONVERSIONS OUT OF VALUE
// ============================================================================

/// A [`Value`] could not be converted into the type a setter expects.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("expected {expected}, found {found}")]
pub struct ConversionError {
    /// Name of the expected type.
    pub expected: &'static str,
    /// Kind of the value that was supplied.
    pub found: &'static str,
}

impl ConversionError {
    fn new<T>(found: &Value) -> Self {
        Self {
            expected: std::any::type_name::<T>(),
            found: found.kind(),
        }
    }
}

impl From<std::convert::Infallible> for ConversionError {
    fn from(never: std::convert::Infallible) -> Self {
        match never {}
    }
}

macro_rules! try_into_integer {
    ($($t:ty),*) => {$(
        impl TryFrom<Value> for $t {
            type Error = ConversionError;

            fn try_from(value: Value) -> Result<Self, Self::Error> {
                let converted = match &value {
                    Value::Int(i) => <$t>::try_from(*i).ok(),
                    Value::UInt(u) => <$t>::try_from(*u).ok(),
                    _ => None,
                };
                converted.ok_or_else(|| ConversionError::new::<$t>(&value))
            }
        }
    )*};
}

try_into_integer!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl TryFrom<Value> for f64 {
    type Error = ConversionError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        value
            .as_f64()
            .ok_or_else(|| ConversionError::new::<f64>(&value))
    }
}

impl TryFrom<Value> for f32 {
    type Error = ConversionError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        value
            .as_f64()
            .map(|f| f as f32)
            .ok_or_else(|| ConversionError::new::<f32>(&value))
    }
}

impl TryFrom<Value> for bool {
    type Error = ConversionError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Bool(b) => Ok(b),
            other => Err(ConversionError::new::<bool>(&other)),
        }
    }
}

impl TryFrom<Value> for String {
    type Error = ConversionError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Str(s) => Ok(s),
            other => Err(ConversionError::new::<String>(&other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_compare_across_kinds() {
        assert!(Value::Int(1).loose_eq(&Value::Float(1.0)));
        assert!(Value::UInt(u64::MAX).loose_eq(&Value::from(u64::MAX)));
        assert_eq!(
            Value::Int(-1).compare(&Value::UInt(u64::MAX)),
            Some(Ordering::Less)
        );
        assert_eq!(
            Value::UInt(u64::MAX).compare(&Value::Int(3)),
            Some(Ordering::Greater)
        );
    }

    #[test]
    fn unrelated_kinds_are_unordered() {
        assert_eq!(Value::from("10").compare(&Value::Int(10)), None);
        assert!(!Value::from("10").loose_eq(&Value::Int(10)));
    }

    #[test]
    fn lists_compare_lexicographically() {
        let a = Value::from(vec![1, 2]);
        let b = Value::from(vec![1, 3]);
        assert_eq!(a.compare(&b), Some(Ordering::Less));
        assert_eq!(a.compare(&Value::from(vec![1])), Some(Ordering::Greater));
    }

    #[test]
    fn interval_bounds() {
        let closed = Interval::closed(1, 10);
        assert!(closed.contains(&Value::Int(1)));
        assert!(closed.contains(&Value::Int(10)));

        let open = Interval::closed(1, 10).open();
        assert!(!open.contains(&Value::Int(1)));
        assert!(open.contains(&Value::Float(9.5)));
        assert_eq!(open.to_string(), "(1, 10)");
    }

    #[test]
    fn display_of_list() {
        assert_eq!(Value::from([10, 20, 30]).to_string(), "[10, 20, 30]");
    }

    #[test]
    fn setter_conversions() {
        assert_eq!(u32::try_from(Value::Int(7)), Ok(7));
        assert!(u8::try_from(Value::Int(300)).is_err());
        let err = String::try_from(Value::Int(1)).unwrap_err();
        assert_eq!(err.found, "integer");
    }

    #[test]
    fn from_json_number_kinds() {
        assert_eq!(Value::from(serde_json::json!(5)), Value::Int(5));
        assert_eq!(Value::from(serde_json::json!(1.5)), Value::Float(1.5));
        assert_eq!(
            Value::from(serde_json::json!(u64::MAX)),
            Value::UInt(u64::MAX)
        );
    }
}
