//! Membership, containment, presence and flag operators.

use std::borrow::Cow;

use super::Operator;
use crate::access::Inspect;
use crate::foundation::Value;

fn is_in(value: &Value, set: &Value) -> bool {
    match set {
        Value::List(items) => items.iter().any(|item| value.loose_eq(item)),
        Value::Interval(interval) => interval.contains(value),
        other => value.loose_eq(other),
    }
}

fn set_phrase(rhs: &Value, member: bool) -> &'static str {
    match (rhs, member) {
        (Value::Interval(_), true) => "must be in interval",
        (Value::Interval(_), false) => "must be not in interval",
        (_, true) => "must be in range",
        (_, false) => "must be not in range",
    }
}

/// Membership in a list (see [`range`](super::range)) or an
/// [`Interval`](crate::foundation::Interval).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct In;

impl Operator for In {
    fn name(&self) -> Cow<'static, str> {
        Cow::Borrowed("in")
    }

    fn check(&self, lhs: &dyn Inspect, rhs: &Value) -> bool {
        is_in(&lhs.value(), rhs)
    }

    fn description(&self) -> Cow<'static, str> {
        Cow::Borrowed("must be in range")
    }

    fn negated_description(&self) -> Cow<'static, str> {
        Cow::Borrowed("must be not in range")
    }

    fn describe(&self, rhs: &Value, negated: bool) -> Cow<'static, str> {
        Cow::Borrowed(set_phrase(rhs, !negated))
    }
}

/// Complement of [`In`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NotIn;

impl Operator for NotIn {
    fn name(&self) -> Cow<'static, str> {
        Cow::Borrowed("nin")
    }

    fn check(&self, lhs: &dyn Inspect, rhs: &Value) -> bool {
        !is_in(&lhs.value(), rhs)
    }

    fn description(&self) -> Cow<'static, str> {
        Cow::Borrowed("must be not in range")
    }

    fn negated_description(&self) -> Cow<'static, str> {
        Cow::Borrowed("must be in range")
    }

    fn describe(&self, rhs: &Value, negated: bool) -> Cow<'static, str> {
        Cow::Borrowed(set_phrase(rhs, negated))
    }
}

/// Substring, list element or map key containment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Contains;

impl Operator for Contains {
    fn name(&self) -> Cow<'static, str> {
        Cow::Borrowed("contains")
    }

    fn check(&self, lhs: &dyn Inspect, rhs: &Value) -> bool {
        match (lhs.value(), rhs) {
            (Value::Str(haystack), needle) => haystack.contains(&*needle.lexical()),
            (Value::List(items), needle) => items.iter().any(|item| item.loose_eq(needle)),
            (Value::Map(map), needle) => map.contains_key(&*needle.lexical()),
            _ => false,
        }
    }

    fn description(&self) -> Cow<'static, str> {
        Cow::Borrowed("must contain")
    }

    fn negated_description(&self) -> Cow<'static, str> {
        Cow::Borrowed("must not contain")
    }
}

/// Member presence. The operand says whether the member should exist.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Exists;

impl Operator for Exists {
    fn name(&self) -> Cow<'static, str> {
        Cow::Borrowed("exists")
    }

    fn check(&self, _lhs: &dyn Inspect, rhs: &Value) -> bool {
        rhs.truthy()
    }

    fn description(&self) -> Cow<'static, str> {
        Cow::Borrowed("must exist")
    }

    fn negated_description(&self) -> Cow<'static, str> {
        Cow::Borrowed("must not exist")
    }

    fn describe(&self, rhs: &Value, negated: bool) -> Cow<'static, str> {
        if rhs.truthy() != negated {
            self.description()
        } else {
            self.negated_description()
        }
    }

    fn shows_operand(&self, _rhs: &Value) -> bool {
        false
    }

    fn checks_presence(&self) -> bool {
        true
    }
}

/// Boolean flag. The operand says whether the flag should be set.
///
/// Phrases default to "must be set" / "must be unset" and can be replaced
/// per validator with [`Flag::described`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flag {
    set: Cow<'static, str>,
    unset: Cow<'static, str>,
}

impl Default for Flag {
    fn default() -> Self {
        Self {
            set: Cow::Borrowed("must be set"),
            unset: Cow::Borrowed("must be unset"),
        }
    }
}

impl Flag {
    /// Flag with the default phrases.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Flag with custom phrases, e.g. "must be enabled" / "must be disabled".
    pub fn described(set: impl Into<Cow<'static, str>>, unset: impl Into<Cow<'static, str>>) -> Self {
        Self {
            set: set.into(),
            unset: unset.into(),
        }
    }
}

impl Operator for Flag {
    fn name(&self) -> Cow<'static, str> {
        Cow::Borrowed("flag")
    }

    fn check(&self, lhs: &dyn Inspect, rhs: &Value) -> bool {
        lhs.value().truthy() == rhs.truthy()
    }

    fn description(&self) -> Cow<'static, str> {
        self.set.clone()
    }

    fn negated_description(&self) -> Cow<'static, str> {
        self.unset.clone()
    }

    fn describe(&self, rhs: &Value, negated: bool) -> Cow<'static, str> {
        if rhs.truthy() != negated {
            self.set.clone()
        } else {
            self.unset.clone()
        }
    }

    fn shows_operand(&self, _rhs: &Value) -> bool {
        false
    }
}
