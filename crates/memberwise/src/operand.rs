//! Operands
//!
//! The right-hand side of a comparison. An operand is either a value owned
//! by the validator, a value borrowed from the caller for `'a`, a closure
//! evaluated at comparison time, another member of the validated object, or
//! the same member of a sample object.
//!
//! ```rust,ignore
//! use nebula_memberwise::prelude::*;
//!
//! let limit = 100;
//! let v = validator![
//!     member("field1").gt(val(10)),
//!     member("field2").lt(borrowed(&limit)),
//!     member("field3").eq(other_member("field1")),
//! ];
//! ```

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use crate::access::{Inspect, Resolution, with_member};
use crate::foundation::{Error, Interval, Value};
use crate::path::Path;
use crate::report::OperandDescription;

/// Right-hand side of a leaf check.
#[derive(Clone)]
pub enum Operand<'a> {
    /// Value owned by the validator.
    Value(Value),
    /// Object owned by the caller; read each time the leaf runs.
    Borrowed(&'a (dyn Inspect + Sync)),
    /// Closure evaluated once per comparison.
    Lazy(Arc<dyn Fn() -> Value + Send + Sync + 'a>),
    /// Another member of the validated object, addressed from its root.
    Member(Path),
    /// The member at the same path on a sample object.
    Sample {
        /// Sample object.
        object: &'a (dyn Inspect + Sync),
        /// Display name used in reports.
        name: Option<Cow<'static, str>>,
    },
}

impl fmt::Debug for Operand<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(value) => f.debug_tuple("Value").field(value).finish(),
            Self::Borrowed(object) => f.debug_tuple("Borrowed").field(&object.value()).finish(),
            Self::Lazy(_) => f.write_str("Lazy(..)"),
            Self::Member(path) => f.debug_tuple("Member").field(path).finish(),
            Self::Sample { name, .. } => f.debug_struct("Sample").field("name", name).finish(),
        }
    }
}

/// Outcome of extracting an operand.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Extracted {
    Value(Value),
    /// A member operand does not resolve.
    Missing,
}

impl Operand<'_> {
    /// Extracts the comparison value.
    ///
    /// `root` is the validated object, `leaf` the concrete path of the
    /// member being checked.
    pub(crate) fn extract(&self, root: &dyn Inspect, leaf: &Path) -> Result<Extracted, Error> {
        match self {
            Self::Value(value) => Ok(Extracted::Value(value.clone())),
            Self::Borrowed(object) => Ok(Extracted::Value(object.value())),
            Self::Lazy(f) => Ok(Extracted::Value(f())),
            Self::Member(path) => resolve_value(root, path),
            Self::Sample { object, .. } => resolve_value(*object, leaf),
        }
    }

    /// Report form of the operand, given the value it extracted to.
    pub(crate) fn describe(&self, rhs: &Value, leaf: &Path) -> OperandDescription {
        match self {
            Self::Member(path) => OperandDescription::Member(path.clone()),
            Self::Sample { name, .. } => OperandDescription::Sample {
                path: leaf.clone(),
                name: name.clone(),
            },
            _ => OperandDescription::Value(rhs.clone()),
        }
    }

    /// Returns true if extraction depends on the validated object.
    #[must_use]
    pub fn is_member(&self) -> bool {
        matches!(self, Self::Member(_))
    }
}

fn resolve_value(object: &dyn Inspect, path: &Path) -> Result<Extracted, Error> {
    with_member(object, path.keys(), |resolution| match resolution {
        Resolution::Found(member) => Ok(Extracted::Value(member.value())),
        Resolution::Missing { .. } => Ok(Extracted::Missing),
        Resolution::Unsupported { depth, type_name } => Err(Error::Unresolvable {
            path: path.prefix(depth + 1).to_string(),
            type_name,
            key_kind: path.keys()[depth].kind(),
        }),
    })
}

// ============================================================================
// CONSTRUCTORS
// ============================================================================

/// Operand moved into the validator.
pub fn val(value: impl Into<Value>) -> Operand<'static> {
    Operand::Value(value.into())
}

/// Operand copied from an object at construction time.
pub fn cval<T: Inspect + ?Sized>(object: &T) -> Operand<'static> {
    Operand::Value(object.value())
}

/// Operand borrowed from the caller, read each time the validator runs.
pub fn borrowed<T: Inspect + Sync>(object: &T) -> Operand<'_> {
    Operand::Borrowed(object)
}

/// Operand computed by `f` at comparison time.
pub fn lazy<'a, F>(f: F) -> Operand<'a>
where
    F: Fn() -> Value + Send + Sync + 'a,
{
    Operand::Lazy(Arc::new(f))
}

/// Another member of the validated object.
pub fn other_member(path: impl Into<Path>) -> Operand<'static> {
    Operand::Member(path.into())
}

/// The member at the same path on `object`.
pub fn sample<T: Inspect + Sync>(object: &T) -> Operand<'_> {
    Operand::Sample { object, name: None }
}

/// Like [`sample`], with a display name for reports.
pub fn sample_named<'a, T: Inspect + Sync>(
    object: &'a T,
    name: impl Into<Cow<'static, str>>,
) -> Operand<'a> {
    Operand::Sample {
        object,
        name: Some(name.into()),
    }
}

macro_rules! operand_from {
    ($($t:ty),* $(,)?) => {$(
        impl From<$t> for Operand<'_> {
            fn from(value: $t) -> Self {
                Self::Value(Value::from(value))
            }
        }
    )*};
}

operand_from!(
    i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64, bool, char, &str, String,
    Interval,
);

impl From<Value> for Operand<'_> {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

impl From<Path> for Operand<'_> {
    fn from(path: Path) -> Self {
        Self::Member(path)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::sync::atomic::{AtomicI64, Ordering};

    use super::*;
    use crate::path;

    fn object() -> BTreeMap<String, i64> {
        [("a".to_owned(), 1), ("b".to_owned(), 2)].into_iter().collect()
    }

    #[test]
    fn lazy_is_evaluated_per_extraction() {
        let counter = AtomicI64::new(0);
        let operand = lazy(|| Value::Int(counter.fetch_add(1, Ordering::SeqCst)));
        let root = object();
        assert_eq!(operand.extract(&root, &path!["a"]).unwrap(), Extracted::Value(Value::Int(0)));
        assert_eq!(operand.extract(&root, &path!["a"]).unwrap(), Extracted::Value(Value::Int(1)));
    }

    struct Limit(AtomicI64);

    impl Inspect for Limit {
        fn value(&self) -> Value {
            Value::Int(self.0.load(Ordering::SeqCst))
        }
    }

    #[test]
    fn borrowed_sees_updates() {
        let limit = Limit(AtomicI64::new(5));
        let operand = borrowed(&limit);
        let root = object();
        assert_eq!(operand.extract(&root, &path!["a"]).unwrap(), Extracted::Value(Value::Int(5)));
        limit.0.store(7, Ordering::SeqCst);
        assert_eq!(operand.extract(&root, &path!["a"]).unwrap(), Extracted::Value(Value::Int(7)));
    }

    #[test]
    fn other_member_resolves_from_root() {
        let operand = other_member(path!["b"]);
        assert_eq!(
            operand.extract(&object(), &path!["a"]).unwrap(),
            Extracted::Value(Value::Int(2))
        );
        let operand = other_member(path!["zzz"]);
        assert_eq!(operand.extract(&object(), &path!["a"]).unwrap(), Extracted::Missing);
    }

    #[test]
    fn sample_uses_leaf_path() {
        let reference: BTreeMap<String, i64> = [("a".to_owned(), 10)].into_iter().collect();
        let operand = sample_named(&reference, "reference");
        assert_eq!(
            operand.extract(&object(), &path!["a"]).unwrap(),
            Extracted::Value(Value::Int(10))
        );
        assert!(matches!(
            operand.describe(&Value::Int(10), &path!["a"]),
            OperandDescription::Sample { .. }
        ));
    }

    #[test]
    fn unsupported_member_operand_is_structural() {
        let operand = other_member(path!["a", 0]);
        assert!(matches!(
            operand.extract(&object(), &path!["b"]),
            Err(Error::Unresolvable { .. })
        ));
    }
}
