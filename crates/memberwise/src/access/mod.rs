//! Member access
//!
//! Every object a validator can look into implements [`Inspect`]. The trait
//! answers three questions for a single [`Key`]: how the key would be served
//! ([`AccessStrategy`]), whether the member is present, and the member
//! itself. The free functions in this module combine that with the
//! [property registry](property) so callers never need to know whether a
//! member is a map entry, a sequence element, a tuple slot or a registered
//! getter.
//!
//! Resolution priority for a key is: registered property, then the built-in
//! properties (`value`, `size`, `length`, `empty`), then the object's own
//! [`Inspect::lookup`].

mod json;
pub mod property;
mod std_impls;

pub use property::{Property, is_registered, property_names, set_property, snapshot};

use std::any::Any;
use std::fmt;
use std::ops::Deref;

use crate::foundation::Value;
use crate::path::Key;

// ============================================================================
// INSPECT TRAIT
// ============================================================================

/// How a key is served by an object.
///
/// Ordered by priority: a property always wins over keyed access, keyed
/// access over positional access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AccessStrategy {
    /// Registered or built-in property.
    Property,
    /// Checked keyed access (`get`-style, absence is observable).
    At,
    /// Positional access by index.
    Index,
}

/// A resolved member, borrowed from its parent or computed on the fly.
pub enum Member<'a> {
    /// Member stored inside the parent.
    Borrowed(&'a dyn Inspect),
    /// Member produced by a getter.
    Owned(Box<dyn Inspect>),
}

impl Deref for Member<'_> {
    type Target = dyn Inspect;

    fn deref(&self) -> &Self::Target {
        match self {
            Self::Borrowed(member) => *member,
            Self::Owned(member) => member.as_ref(),
        }
    }
}

impl fmt::Debug for Member<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Member").field(&self.value()).finish()
    }
}

/// Result of looking up one key.
#[derive(Debug)]
pub enum Lookup<'a> {
    /// The member exists.
    Found(Member<'a>),
    /// The key kind is valid for this object but no such member exists.
    Missing,
    /// The object cannot serve this kind of key at all.
    Unsupported,
}

impl<'a> Lookup<'a> {
    /// Wraps a borrowed member, `Missing` for `None`.
    pub fn borrowed(member: Option<&'a dyn Inspect>) -> Self {
        member.map_or(Self::Missing, |m| Self::Found(Member::Borrowed(m)))
    }

    /// Wraps a computed value.
    pub fn owned(value: impl Inspect) -> Self {
        Self::Found(Member::Owned(Box::new(value)))
    }
}

/// Upcast to [`Any`], implemented for every `'static` type.
pub trait AsAny: Any {
    /// The object as `&dyn Any`.
    fn as_any(&self) -> &(dyn Any + 'static);

    /// The object as `&mut dyn Any`.
    fn as_any_mut(&mut self) -> &mut (dyn Any + 'static);
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &(dyn Any + 'static) {
        self
    }

    fn as_any_mut(&mut self) -> &mut (dyn Any + 'static) {
        self
    }
}

/// Uniform member access over containers, tuples and structs.
///
/// Only [`value`](Inspect::value) is required; a leaf type that has no
/// members keeps the default [`lookup`](Inspect::lookup), which rejects
/// every key.
///
/// # Examples
///
/// ```rust,ignore
/// use nebula_memberwise::prelude::*;
///
/// struct Celsius(f64);
///
/// impl Inspect for Celsius {
///     fn value(&self) -> Value {
///         Value::Float(self.0)
///     }
/// }
/// ```
pub trait Inspect: AsAny {
    /// Looks up the member named by `key`.
    fn lookup(&self, key: &Key) -> Lookup<'_> {
        let _ = key;
        Lookup::Unsupported
    }

    /// How `key` is served, `None` if it is not served at all.
    fn access_strategy(&self, key: &Key) -> Option<AccessStrategy> {
        let _ = key;
        None
    }

    /// Cheap presence test, `None` when the object cannot tell without a
    /// full lookup.
    fn contains_key(&self, key: &Key) -> Option<bool> {
        let _ = key;
        None
    }

    /// The object reduced to a comparison value.
    fn value(&self) -> Value;

    /// Element count of a container or character count of a string.
    fn size(&self) -> Option<usize> {
        None
    }

    /// Keys of all elements, used to expand `All` and `Any` segments.
    fn element_keys(&self) -> Option<Vec<Key>> {
        None
    }

    /// Type name used in error messages.
    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

// ============================================================================
// RESOLVER
// ============================================================================

const BUILTIN_PROPERTIES: [&str; 4] = ["value", "size", "length", "empty"];

fn builtin_property(key: &Key) -> Option<&str> {
    match key {
        Key::Property(p) if p.args.is_empty() => BUILTIN_PROPERTIES
            .iter()
            .find(|name| **name == p.name)
            .copied(),
        _ => None,
    }
}

/// Reports how `key` would be served by `object`.
#[must_use]
pub fn resolve_strategy(object: &dyn Inspect, key: &Key) -> Option<AccessStrategy> {
    if property::lookup_entry(object, key).is_some() || builtin_property(key).is_some() {
        return Some(AccessStrategy::Property);
    }
    object.access_strategy(key)
}

/// Returns true if presence of `key` can be tested without a lookup.
///
/// Always true for property-backed keys.
#[must_use]
pub fn can_check_contains(object: &dyn Inspect, key: &Key) -> bool {
    resolve_strategy(object, key) == Some(AccessStrategy::Property)
        || object.contains_key(key).is_some()
}

/// Presence of `key` in `object`; property-backed keys always exist.
#[must_use]
pub fn contains(object: &dyn Inspect, key: &Key) -> Option<bool> {
    if resolve_strategy(object, key) == Some(AccessStrategy::Property) {
        return Some(true);
    }
    object.contains_key(key)
}

/// Looks up one key through the registry, the built-in properties and
/// finally the object itself.
pub fn lookup<'a>(object: &'a dyn Inspect, key: &Key) -> Lookup<'a> {
    if let Some(entry) = property::lookup_entry(object, key) {
        return entry.read(object, key);
    }
    match builtin_property(key) {
        Some("value") => Lookup::Found(Member::Borrowed(object)),
        Some("size" | "length") => object
            .size()
            .map_or(Lookup::Unsupported, |n| Lookup::owned(Value::from(n))),
        Some("empty") => object
            .size()
            .map_or(Lookup::Unsupported, |n| Lookup::owned(Value::Bool(n == 0))),
        _ => object.lookup(key),
    }
}

/// Outcome of walking a path.
#[derive(Debug, Clone, Copy)]
pub enum Resolution<'r> {
    /// The member at the end of the path.
    Found(&'r dyn Inspect),
    /// The segment at `depth` does not exist.
    Missing {
        /// Index of the first missing segment.
        depth: usize,
    },
    /// The segment at `depth` cannot be served by `type_name`.
    Unsupported {
        /// Index of the rejected segment.
        depth: usize,
        /// Type that rejected it.
        type_name: &'static str,
    },
}

impl fmt::Debug for dyn Inspect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.type_name(), self.value())
    }
}

/// Walks `keys` from `object` and hands the outcome to `f`.
///
/// Computed members live on this function's stack, so the resolved member
/// is only available inside the callback.
pub fn with_member<R>(
    object: &dyn Inspect,
    keys: &[Key],
    f: impl FnOnce(Resolution<'_>) -> R,
) -> R {
    walk(object, keys, 0, f)
}

fn walk<R, F>(object: &dyn Inspect, keys: &[Key], depth: usize, f: F) -> R
where
    F: FnOnce(Resolution<'_>) -> R,
{
    let Some((key, rest)) = keys.split_first() else {
        return f(Resolution::Found(object));
    };
    match lookup(object, key) {
        Lookup::Found(member) => walk(&*member, rest, depth + 1, f),
        Lookup::Missing => f(Resolution::Missing { depth }),
        Lookup::Unsupported => f(Resolution::Unsupported {
            depth,
            type_name: object.type_name(),
        }),
    }
}

/// Presence of the member at `keys`.
///
/// Intermediate segments are looked up; the last one uses
/// [`contains`] when the object can answer it directly.
pub fn member_exists(object: &dyn Inspect, keys: &[Key]) -> Resolution<'static> {
    let Some((last, parents)) = keys.split_last() else {
        return Resolution::Found(&());
    };
    with_member(object, parents, |parent| match parent {
        Resolution::Found(parent) => match contains(parent, last) {
            Some(true) => Resolution::Found(&()),
            Some(false) => Resolution::Missing {
                depth: parents.len(),
            },
            None => match lookup(parent, last) {
                Lookup::Found(_) => Resolution::Found(&()),
                Lookup::Missing => Resolution::Missing {
                    depth: parents.len(),
                },
                Lookup::Unsupported => Resolution::Unsupported {
                    depth: parents.len(),
                    type_name: parent.type_name(),
                },
            },
        },
        Resolution::Missing { depth } => Resolution::Missing { depth },
        Resolution::Unsupported { depth, type_name } => {
            Resolution::Unsupported { depth, type_name }
        }
    })
}

/// Resolves `keys` and reduces the member to a [`Value`].
///
/// Returns `None` if the member is missing or unsupported.
#[must_use]
pub fn value_at(object: &dyn Inspect, keys: &[Key]) -> Option<Value> {
    with_member(object, keys, |resolution| match resolution {
        Resolution::Found(member) => Some(member.value()),
        _ => None,
    })
}
