//! Operand helpers for [`In`](super::In) and [`NotIn`](super::NotIn).

use crate::foundation::{Interval, Value};

/// Explicit set of allowed values.
///
/// ```rust,ignore
/// member("level").is_in(range([10, 20, 30]))
/// ```
pub fn range<T: Into<Value>>(values: impl IntoIterator<Item = T>) -> Value {
    Value::List(values.into_iter().map(Into::into).collect())
}

/// Closed interval `[from, to]`.
pub fn interval(from: impl Into<Value>, to: impl Into<Value>) -> Value {
    Value::from(Interval::closed(from, to))
}

/// Open interval `(from, to)`.
pub fn open_interval(from: impl Into<Value>, to: impl Into<Value>) -> Value {
    Value::from(Interval::closed(from, to).open())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn helpers_build_operands() {
        assert_eq!(range(["a", "b"]).to_string(), "[a, b]");
        assert_eq!(interval(1, 5).to_string(), "[1, 5]");
        assert_eq!(open_interval(1.5, 2).to_string(), "(1.5, 2)");
    }
}
