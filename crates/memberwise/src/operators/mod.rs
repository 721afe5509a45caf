//! Operators
//!
//! An [`Operator`] compares a resolved member against an operand value. It
//! is stateless, never mutates either side, and supplies its own forward and
//! negated descriptions so reports read naturally under NOT
//! ("must be equal to" / "must be not equal to").
//!
//! Built-in operators are unit structs or small configured structs; any of
//! them turns into a shared [`Op`] with `Op::new`. [`negate`] wraps an
//! operator so that its check and descriptions are inverted.

mod comparison;
mod lexicographic;
mod membership;
mod pattern;
mod range;

pub use comparison::{Eq, Gt, Gte, Lt, Lte, Ne};
pub use lexicographic::{
    Lexicographic, ilex_eq, ilex_gt, ilex_gte, ilex_lt, ilex_lte, ilex_ne, lex_eq, lex_gt,
    lex_gte, lex_lt, lex_lte, lex_ne,
};
pub use membership::{Contains, Exists, Flag, In, NotIn};
pub use pattern::Matches;
pub use range::{interval, open_interval, range};

use std::borrow::Cow;
use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

use crate::access::Inspect;
use crate::foundation::Value;

// ============================================================================
// OPERATOR TRAIT
// ============================================================================

/// A comparison between a member and an operand.
///
/// # Examples
///
/// ```rust,ignore
/// use nebula_memberwise::prelude::*;
///
/// #[derive(Debug)]
/// struct Even;
///
/// impl Operator for Even {
///     fn name(&self) -> Cow<'static, str> { "even".into() }
///     fn check(&self, lhs: &dyn Inspect, rhs: &Value) -> bool {
///         matches!(lhs.value(), Value::Int(i) if i % 2 == 0) == rhs.truthy()
///     }
///     fn description(&self) -> Cow<'static, str> { "must be even".into() }
///     fn negated_description(&self) -> Cow<'static, str> { "must be odd".into() }
///     fn shows_operand(&self, _: &Value) -> bool { false }
/// }
/// ```
pub trait Operator: fmt::Debug + Send + Sync {
    /// Short identifier, used as the error code.
    fn name(&self) -> Cow<'static, str>;

    /// Applies the operator.
    fn check(&self, lhs: &dyn Inspect, rhs: &Value) -> bool;

    /// Requirement phrase when the check must hold.
    fn description(&self) -> Cow<'static, str>;

    /// Requirement phrase when the check must not hold.
    fn negated_description(&self) -> Cow<'static, str>;

    /// Phrase for a particular operand and polarity.
    fn describe(&self, rhs: &Value, negated: bool) -> Cow<'static, str> {
        let _ = rhs;
        if negated {
            self.negated_description()
        } else {
            self.description()
        }
    }

    /// Whether the report prints the operand after the phrase.
    fn shows_operand(&self, rhs: &Value) -> bool {
        let _ = rhs;
        true
    }

    /// Operators that test member presence run even when the member is
    /// absent, through [`check_presence`](Operator::check_presence).
    fn checks_presence(&self) -> bool {
        false
    }

    /// Presence test; `rhs` tells whether the member should exist.
    fn check_presence(&self, present: bool, rhs: &Value) -> bool {
        present == rhs.truthy()
    }
}

// ============================================================================
// SHARED HANDLE
// ============================================================================

/// Shared, type-erased operator.
#[derive(Clone)]
pub struct Op(Arc<dyn Operator>);

impl Op {
    /// Wraps an operator.
    pub fn new(operator: impl Operator + 'static) -> Self {
        Self(Arc::new(operator))
    }
}

impl Deref for Op {
    type Target = dyn Operator;

    fn deref(&self) -> &Self::Target {
        &*self.0
    }
}

impl fmt::Debug for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.0, f)
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

// ============================================================================
// NEGATION
// ============================================================================

/// Inverts an operator: the check is negated and the descriptions swap.
#[derive(Debug, Clone)]
pub struct Negated<O>(O);

/// Negates `op`.
///
/// `negate(op).check(a, b) == !op.check(a, b)` for every pair, and the
/// negated operator reports with `op`'s negated description.
pub fn negate<O: Operator>(op: O) -> Negated<O> {
    Negated(op)
}

impl<O: Operator> Operator for Negated<O> {
    fn name(&self) -> Cow<'static, str> {
        Cow::Owned(format!("not_{}", self.0.name()))
    }

    fn check(&self, lhs: &dyn Inspect, rhs: &Value) -> bool {
        !self.0.check(lhs, rhs)
    }

    fn description(&self) -> Cow<'static, str> {
        self.0.negated_description()
    }

    fn negated_description(&self) -> Cow<'static, str> {
        self.0.description()
    }

    fn describe(&self, rhs: &Value, negated: bool) -> Cow<'static, str> {
        self.0.describe(rhs, !negated)
    }

    fn shows_operand(&self, rhs: &Value) -> bool {
        self.0.shows_operand(rhs)
    }

    fn checks_presence(&self) -> bool {
        self.0.checks_presence()
    }

    fn check_presence(&self, present: bool, rhs: &Value) -> bool {
        !self.0.check_presence(present, rhs)
    }
}

impl Operator for Op {
    fn name(&self) -> Cow<'static, str> {
        self.0.name()
    }

    fn check(&self, lhs: &dyn Inspect, rhs: &Value) -> bool {
        self.0.check(lhs, rhs)
    }

    fn description(&self) -> Cow<'static, str> {
        self.0.description()
    }

    fn negated_description(&self) -> Cow<'static, str> {
        self.0.negated_description()
    }

    fn describe(&self, rhs: &Value, negated: bool) -> Cow<'static, str> {
        self.0.describe(rhs, negated)
    }

    fn shows_operand(&self, rhs: &Value) -> bool {
        self.0.shows_operand(rhs)
    }

    fn checks_presence(&self) -> bool {
        self.0.checks_presence()
    }

    fn check_presence(&self, present: bool, rhs: &Value) -> bool {
        self.0.check_presence(present, rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negation_inverts_check_and_swaps_descriptions() {
        let op = negate(Gt);
        assert!(op.check(&5, &Value::Int(5)));
        assert!(!op.check(&6, &Value::Int(5)));
        assert_eq!(op.description(), "must be less than or equal to");
        assert_eq!(op.negated_description(), "must be greater than");
        assert_eq!(op.name(), "not_gt");
    }

    #[test]
    fn double_negation_restores_descriptions() {
        let op = negate(negate(Eq));
        assert_eq!(op.description(), Eq.description());
        assert!(op.check(&1, &Value::Int(1)));
    }

    #[test]
    fn negated_presence() {
        let op = negate(Exists);
        assert!(op.checks_presence());
        assert!(op.check_presence(false, &Value::Bool(true)));
        assert_eq!(op.describe(&Value::Bool(true), false), "must not exist");
    }

    #[test]
    fn op_handle_delegates() {
        let op = Op::new(In);
        assert_eq!(op.to_string(), "in");
        assert!(op.check(&3, &range([1, 2, 3])));
    }
}
