//! Validator trees
//!
//! A [`Validator`] is an immutable tree: leaves check one member with one
//! operator and operand, inner nodes combine children with AND, OR and NOT,
//! and scopes run a nested validator below a common member path. Composing
//! validators never mutates them; the tree is shared through an [`Arc`] so
//! cloning is cheap and a validator can be used from several threads.
//!
//! # Examples
//!
//! ```rust,ignore
//! use nebula_memberwise::prelude::*;
//!
//! let v = validator![
//!     member("name").length().gte(3),
//!     or([member("age").gte(18), member("guardian").exists()]),
//!     member("tags").all().ne(""),
//! ];
//!
//! assert!(v.check(&document)?);
//! ```

mod builder;
mod eval;

pub use builder::{MemberBuilder, member, value};

use std::fmt;
use std::sync::Arc;

use crate::access::Inspect;
use crate::adapters::{Adapter, DefaultAdapter};
use crate::foundation::{Error, Status};
use crate::operand::Operand;
use crate::operators::Op;
use crate::path::Path;

/// One node of a validator tree.
#[derive(Debug)]
pub(crate) enum Node<'a> {
    Leaf {
        path: Path,
        op: Op,
        operand: Operand<'a>,
    },
    And(Vec<Validator<'a>>),
    Or(Vec<Validator<'a>>),
    Not(Validator<'a>),
    /// Runs `inner` with `path` prepended to every member it names.
    Scope {
        path: Path,
        inner: Validator<'a>,
    },
}

/// A composed validator.
///
/// The lifetime `'a` bounds borrowed operands; validators built only from
/// owned operands are `Validator<'static>`.
#[derive(Clone)]
pub struct Validator<'a>(Arc<Node<'a>>);

impl<'a> Validator<'a> {
    fn from_node(node: Node<'a>) -> Self {
        Self(Arc::new(node))
    }

    /// Leaf checking the member at `path`.
    pub fn leaf(path: impl Into<Path>, op: Op, operand: impl Into<Operand<'a>>) -> Self {
        Self::from_node(Node::Leaf {
            path: path.into(),
            op,
            operand: operand.into(),
        })
    }

    /// AND of all `validators`; passes when there are none.
    pub fn and_all(validators: impl IntoIterator<Item = Validator<'a>>) -> Self {
        Self::from_node(Node::And(validators.into_iter().collect()))
    }

    /// OR of all `validators`; fails when there are none.
    pub fn or_any(validators: impl IntoIterator<Item = Validator<'a>>) -> Self {
        Self::from_node(Node::Or(validators.into_iter().collect()))
    }

    /// Runs `inner` on the member at `path`.
    pub fn scoped(path: impl Into<Path>, inner: Validator<'a>) -> Self {
        Self::from_node(Node::Scope {
            path: path.into(),
            inner,
        })
    }

    /// `self AND other`.
    #[must_use = "validators do nothing until applied"]
    pub fn and(self, other: Validator<'a>) -> Self {
        and([self, other])
    }

    /// `self OR other`.
    #[must_use = "validators do nothing until applied"]
    pub fn or(self, other: Validator<'a>) -> Self {
        or([self, other])
    }

    /// `NOT self`.
    #[allow(clippy::should_implement_trait)]
    #[must_use = "validators do nothing until applied"]
    pub fn not(self) -> Self {
        not(self)
    }

    pub(crate) fn node(&self) -> &Node<'a> {
        &self.0
    }

    /// Evaluates the validator through `adapter`.
    ///
    /// The adapter receives the outcome through
    /// [`Adapter::finish`]; a reporting adapter renders its message there.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Unresolvable`] when a path segment names a key kind
    /// an object cannot serve. A failed check is `Ok(Status::Fail)`.
    pub fn apply<A: Adapter>(&self, adapter: &mut A) -> Result<Status, Error> {
        let verdict = eval::evaluate(self, &*adapter)?;
        adapter.finish(verdict.status, verdict.requirement);
        Ok(verdict.status)
    }

    /// Evaluates against `object` with the default adapter.
    ///
    /// Ignored checks count as passed.
    ///
    /// # Errors
    ///
    /// Same as [`apply`](Self::apply).
    pub fn check(&self, object: &dyn Inspect) -> Result<bool, Error> {
        let mut adapter = DefaultAdapter::new(object);
        Ok(self.apply(&mut adapter)?.is_success())
    }
}

impl fmt::Debug for Validator<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.0, f)
    }
}

impl fmt::Display for Validator<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn list(f: &mut fmt::Formatter<'_>, name: &str, items: &[Validator<'_>]) -> fmt::Result {
            write!(f, "{name}(")?;
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{item}")?;
            }
            f.write_str(")")
        }

        match self.node() {
            Node::Leaf { path, op, operand } => {
                let member = if path.is_empty() { "value".to_owned() } else { path.to_string() };
                match operand {
                    Operand::Value(value) => write!(f, "{member} {op} {value}"),
                    Operand::Member(other) => write!(f, "{member} {op} {other}"),
                    _ => write!(f, "{member} {op} <operand>"),
                }
            }
            Node::And(items) => list(f, "AND", items),
            Node::Or(items) => list(f, "OR", items),
            Node::Not(inner) => write!(f, "NOT({inner})"),
            Node::Scope { path, inner } => write!(f, "{path}: {{{inner}}}"),
        }
    }
}

// ============================================================================
// COMBINATORS
// ============================================================================

/// AND of `validators`.
///
/// ```rust,ignore
/// let v = and([member("a").gt(1), member("b").lt(5)]);
/// ```
pub fn and<'a>(validators: impl IntoIterator<Item = Validator<'a>>) -> Validator<'a> {
    Validator::and_all(validators)
}

/// OR of `validators`.
pub fn or<'a>(validators: impl IntoIterator<Item = Validator<'a>>) -> Validator<'a> {
    Validator::or_any(validators)
}

/// Inverts `validator`. Reports use the negated operator phrases.
pub fn not(validator: Validator<'_>) -> Validator<'_> {
    Validator::from_node(Node::Not(validator))
}
