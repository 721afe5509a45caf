//! Member paths
//!
//! A [`Path`] is an ordered list of [`Key`]s leading from the validated
//! object to one of its members. Keys are string names, integer indices,
//! properties (optionally with arguments) or generated segments (`All`,
//! `Any`, [`Arg::Each`]) that expand into one concrete path per element
//! when the validator runs.
//!
//! Paths may carry a display name per segment; the formatter uses it in
//! place of the key's own rendering.
//!
//! ```rust,ignore
//! use nebula_memberwise::path;
//!
//! let p = path!["level1", "field1"];
//! assert_eq!(p.to_string(), "level1.field1");
//! ```

mod generate;

pub use generate::{Generated, generate_paths};

use std::borrow::Cow;
use std::fmt;

use smallvec::SmallVec;

use crate::foundation::Value;

// ============================================================================
// KEY
// ============================================================================

/// Aggregation of a generated segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Aggregation {
    /// Every generated element must pass.
    All,
    /// At least one generated element must pass.
    Any,
}

impl Aggregation {
    /// The other aggregation, used when a generated segment sits under NOT.
    #[must_use]
    pub const fn swap(self) -> Self {
        match self {
            Self::All => Self::Any,
            Self::Any => Self::All,
        }
    }
}

/// One argument of a property key.
#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
    /// A fixed argument.
    Value(Value),
    /// A generated argument iterating over `from..to`.
    Each {
        /// First index, inclusive.
        from: usize,
        /// Last index, exclusive.
        to: usize,
        /// How the generated checks fold.
        aggregation: Aggregation,
    },
}

impl Arg {
    /// Generated argument over `from..to`, every value must pass.
    #[must_use]
    pub const fn each(from: usize, to: usize) -> Self {
        Self::Each {
            from,
            to,
            aggregation: Aggregation::All,
        }
    }

    /// Generated argument over `from..to`, one passing value suffices.
    #[must_use]
    pub const fn any(from: usize, to: usize) -> Self {
        Self::Each {
            from,
            to,
            aggregation: Aggregation::Any,
        }
    }
}

impl From<Value> for Arg {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

impl fmt::Display for Arg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(v) => write!(f, "{v}"),
            Self::Each {
                from,
                to,
                aggregation: Aggregation::All,
            } => write!(f, "each of {from}..{to}"),
            Self::Each {
                from,
                to,
                aggregation: Aggregation::Any,
            } => write!(f, "any of {from}..{to}"),
        }
    }
}

/// A named property, optionally called with arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyKey {
    /// Property name.
    pub name: Cow<'static, str>,
    /// Call arguments, empty for plain properties.
    pub args: SmallVec<[Arg; 2]>,
}

impl PropertyKey {
    /// A plain property.
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name: name.into(),
            args: SmallVec::new(),
        }
    }

    /// A property called with arguments.
    pub fn with_args(
        name: impl Into<Cow<'static, str>>,
        args: impl IntoIterator<Item = Arg>,
    ) -> Self {
        Self {
            name: name.into(),
            args: args.into_iter().collect(),
        }
    }

    /// Fixed argument values, `None` while any argument is still generated.
    #[must_use]
    pub fn arg_values(&self) -> Option<Vec<Value>> {
        self.args
            .iter()
            .map(|arg| match arg {
                Arg::Value(v) => Some(v.clone()),
                Arg::Each { .. } => None,
            })
            .collect()
    }
}

/// One path segment.
#[derive(Debug, Clone, PartialEq)]
pub enum Key {
    /// String key or member name.
    Name(Cow<'static, str>),
    /// Integer index; positional index for tuples.
    Index(usize),
    /// Named property.
    Property(PropertyKey),
    /// Every element of the container.
    All,
    /// At least one element of the container.
    Any,
}

impl Key {
    /// Shorthand for a plain property key.
    pub fn property(name: impl Into<Cow<'static, str>>) -> Self {
        Self::Property(PropertyKey::new(name))
    }

    /// Returns true if this segment expands at evaluation time.
    #[must_use]
    pub fn is_generated(&self) -> bool {
        match self {
            Self::All | Self::Any => true,
            Self::Property(p) => p.args.iter().any(|a| matches!(a, Arg::Each { .. })),
            Self::Name(_) | Self::Index(_) => false,
        }
    }

    /// Short name of the key kind, used in error messages.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Name(_) => "name",
            Self::Index(_) => "index",
            Self::Property(_) => "property",
            Self::All | Self::Any => "wildcard",
        }
    }

    /// The name of a `Name` or `Property` key.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Name(n) => Some(n),
            Self::Property(p) => Some(&p.name),
            _ => None,
        }
    }

    /// Filter matching: wildcards match any key, generated property
    /// arguments match any argument of the same property.
    #[must_use]
    pub fn matches(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::All | Self::Any, _) | (_, Self::All | Self::Any) => true,
            (Self::Property(a), Self::Property(b)) => {
                a.name == b.name
                    && a.args.len() == b.args.len()
                    && a.args.iter().zip(&b.args).all(|(x, y)| match (x, y) {
                        (Arg::Each { .. }, _) | (_, Arg::Each { .. }) => true,
                        (Arg::Value(x), Arg::Value(y)) => x.loose_eq(y),
                    })
            }
            _ => self.same_member(other),
        }
    }

    /// Equality that reads a name and an argument-free property of the same
    /// name as one member: `balance` and `balance()` address the same thing.
    #[must_use]
    pub fn same_member(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Name(n), Self::Property(p)) | (Self::Property(p), Self::Name(n)) => {
                p.args.is_empty() && p.name == *n
            }
            _ => self == other,
        }
    }

    /// Swaps `All` and `Any` (including generated property arguments).
    #[must_use]
    pub fn swap_wildcard(&self) -> Self {
        match self {
            Self::All => Self::Any,
            Self::Any => Self::All,
            Self::Property(p) => Self::Property(PropertyKey {
                name: p.name.clone(),
                args: p
                    .args
                    .iter()
                    .map(|arg| match arg {
                        Arg::Each {
                            from,
                            to,
                            aggregation,
                        } => Arg::Each {
                            from: *from,
                            to: *to,
                            aggregation: aggregation.swap(),
                        },
                        value => value.clone(),
                    })
                    .collect(),
            }),
            other => other.clone(),
        }
    }
}

impl From<&'static str> for Key {
    fn from(name: &'static str) -> Self {
        Self::Name(Cow::Borrowed(name))
    }
}

impl From<String> for Key {
    fn from(name: String) -> Self {
        Self::Name(Cow::Owned(name))
    }
}

impl From<Cow<'static, str>> for Key {
    fn from(name: Cow<'static, str>) -> Self {
        Self::Name(name)
    }
}

impl From<usize> for Key {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

impl From<u32> for Key {
    fn from(index: u32) -> Self {
        Self::Index(index as usize)
    }
}

impl From<i32> for Key {
    /// Negative indices never resolve.
    fn from(index: i32) -> Self {
        Self::Index(usize::try_from(index).unwrap_or(usize::MAX))
    }
}

impl From<PropertyKey> for Key {
    fn from(property: PropertyKey) -> Self {
        Self::Property(property)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name(n) => f.write_str(n),
            Self::Index(i) => write!(f, "[{i}]"),
            Self::Property(p) => {
                write!(f, "{}(", p.name)?;
                for (i, arg) in p.args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{arg}")?;
                }
                f.write_str(")")
            }
            Self::All => f.write_str("[*]"),
            Self::Any => f.write_str("[?]"),
        }
    }
}

// ============================================================================
// PATH
// ============================================================================

type Names = SmallVec<[Option<Cow<'static, str>>; 4]>;

/// An ordered sequence of keys with optional per-segment display names.
///
/// The empty path denotes the validated object itself.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Path {
    keys: SmallVec<[Key; 4]>,
    names: Option<Names>,
}

impl Path {
    /// The empty path.
    #[must_use]
    pub fn root() -> Self {
        Self::default()
    }

    /// Builds a path from keys.
    pub fn from_keys<K: Into<Key>>(keys: impl IntoIterator<Item = K>) -> Self {
        Self {
            keys: keys.into_iter().map(Into::into).collect(),
            names: None,
        }
    }

    /// Appends a key.
    pub fn push(&mut self, key: impl Into<Key>) {
        self.keys.push(key.into());
        if let Some(names) = &mut self.names {
            names.push(None);
        }
    }

    /// Returns a copy with `key` appended.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_key(mut self, key: impl Into<Key>) -> Self {
        self.push(key);
        self
    }

    /// Sets the display name of the last segment.
    #[must_use = "builder methods must be chained or built"]
    pub fn named(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        if let Some(last) = self.keys.len().checked_sub(1) {
            let names = self.names_mut();
            names[last] = Some(name.into());
        }
        self
    }

    /// Sets display names for leading segments in order; missing or `None`
    /// entries leave a segment unnamed.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_names<N>(mut self, names: impl IntoIterator<Item = Option<N>>) -> Self
    where
        N: Into<Cow<'static, str>>,
    {
        let len = self.keys.len();
        let slots = self.names_mut();
        for (slot, name) in slots.iter_mut().zip(names).take(len) {
            *slot = name.map(Into::into);
        }
        self
    }

    fn names_mut(&mut self) -> &mut Names {
        let len = self.keys.len();
        self.names
            .get_or_insert_with(|| std::iter::repeat_n(None, len).collect())
    }

    /// The keys of this path.
    #[must_use]
    pub fn keys(&self) -> &[Key] {
        &self.keys
    }

    /// Number of segments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Returns true for the root path.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Returns true if any segment carries a display name list.
    #[must_use]
    pub fn has_names(&self) -> bool {
        self.names.is_some()
    }

    /// Display name of segment `index`, if set.
    #[must_use]
    pub fn name(&self, index: usize) -> Option<&str> {
        self.names
            .as_ref()
            .and_then(|names| names.get(index))
            .and_then(Option::as_deref)
    }

    /// Returns true if no segment is generated.
    #[must_use]
    pub fn is_concrete(&self) -> bool {
        !self.keys.iter().any(Key::is_generated)
    }

    /// Key prefix test under [`Key::same_member`].
    #[must_use]
    pub fn starts_with(&self, prefix: &Path) -> bool {
        prefix.len() <= self.len() && self.keys.iter().zip(&prefix.keys).all(|(a, b)| a.same_member(b))
    }

    /// Returns true if every concrete path that `self` can expand to lies
    /// below `prefix`. Only wildcards in `prefix` match generated segments.
    #[must_use]
    pub fn lies_below(&self, prefix: &Path) -> bool {
        prefix.len() <= self.len()
            && self.keys.iter().zip(&prefix.keys).all(|(key, p)| match p {
                Key::All | Key::Any => true,
                _ => !key.is_generated() && key.matches(p),
            })
    }

    /// Compares keys up to the shorter length; wildcards match anything.
    ///
    /// A filter path selects every member below it and every group above it.
    #[must_use]
    pub fn matches_prefix(&self, other: &Path) -> bool {
        self.keys
            .iter()
            .zip(&other.keys)
            .all(|(a, b)| a.matches(b))
    }

    /// First `len` segments, names included.
    #[must_use]
    pub fn prefix(&self, len: usize) -> Self {
        let len = len.min(self.len());
        Self {
            keys: self.keys[..len].iter().cloned().collect(),
            names: self
                .names
                .as_ref()
                .map(|names| names[..len].iter().cloned().collect()),
        }
    }

    /// Segments from `start` on, names included.
    #[must_use]
    pub fn suffix(&self, start: usize) -> Self {
        let start = start.min(self.len());
        Self {
            keys: self.keys[start..].iter().cloned().collect(),
            names: self
                .names
                .as_ref()
                .map(|names| names[start..].iter().cloned().collect()),
        }
    }

    /// Copy with `All` and `Any` swapped in every segment.
    #[must_use]
    pub fn swap_wildcards(&self) -> Self {
        Self {
            keys: self.keys.iter().map(Key::swap_wildcard).collect(),
            names: self.names.clone(),
        }
    }

    pub(crate) fn replace_key(&mut self, index: usize, key: Key) {
        if let Some(slot) = self.keys.get_mut(index) {
            *slot = key;
        }
    }
}

impl<K: Into<Key>> FromIterator<K> for Path {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        Self::from_keys(iter)
    }
}

impl From<Key> for Path {
    fn from(key: Key) -> Self {
        Self::from_keys([key])
    }
}

impl From<&'static str> for Path {
    fn from(name: &'static str) -> Self {
        Self::from_keys([name])
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, key) in self.keys.iter().enumerate() {
            match key {
                Key::Name(_) | Key::Property(_) if i > 0 => write!(f, ".{key}")?,
                _ => write!(f, "{key}")?,
            }
        }
        Ok(())
    }
}

/// Concatenates `super_member` and `member`.
///
/// If either side carries display names the result carries both name lists
/// concatenated, with unnamed segments left empty. The operation is
/// associative in keys and names.
#[must_use]
pub fn prepend_super_member(super_member: &Path, member: &Path) -> Path {
    let mut keys = super_member.keys.clone();
    keys.extend(member.keys.iter().cloned());

    let names = match (&super_member.names, &member.names) {
        (None, None) => None,
        (left, right) => {
            let mut names: Names = match left {
                Some(n) => n.clone(),
                None => std::iter::repeat_n(None, super_member.len()).collect(),
            };
            match right {
                Some(n) => names.extend(n.iter().cloned()),
                None => names.extend(std::iter::repeat_n(None, member.len())),
            }
            Some(names)
        }
    };

    Path { keys, names }
}

/// Builds a [`Path`] from keys.
///
/// ```rust,ignore
/// let p = path!["items", 0, "name"];
/// ```
#[macro_export]
macro_rules! path {
    () => {
        $crate::path::Path::root()
    };
    ($($key:expr),+ $(,)?) => {
        $crate::path::Path::from_keys([$($crate::path::Key::from($key)),+])
    };
}
