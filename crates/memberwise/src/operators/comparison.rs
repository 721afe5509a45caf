//! Equality and ordering operators.

use std::borrow::Cow;
use std::cmp::Ordering;

use super::Operator;
use crate::access::Inspect;
use crate::foundation::Value;

macro_rules! comparison {
    (
        $(#[$meta:meta])*
        $name:ident, $code:literal, |$ordering:ident| $test:expr,
        $forward:literal, $negated:literal
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
        pub struct $name;

        impl Operator for $name {
            fn name(&self) -> Cow<'static, str> {
                Cow::Borrowed($code)
            }

            fn check(&self, lhs: &dyn Inspect, rhs: &Value) -> bool {
                let $ordering = lhs.value().compare(rhs);
                $test
            }

            fn description(&self) -> Cow<'static, str> {
                Cow::Borrowed($forward)
            }

            fn negated_description(&self) -> Cow<'static, str> {
                Cow::Borrowed($negated)
            }
        }
    };
}

/// Equality, numeric kinds compared by value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Eq;

impl Operator for Eq {
    fn name(&self) -> Cow<'static, str> {
        Cow::Borrowed("eq")
    }

    fn check(&self, lhs: &dyn Inspect, rhs: &Value) -> bool {
        lhs.value().loose_eq(rhs)
    }

    fn description(&self) -> Cow<'static, str> {
        Cow::Borrowed("must be equal to")
    }

    fn negated_description(&self) -> Cow<'static, str> {
        Cow::Borrowed("must be not equal to")
    }
}

/// Inequality.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Ne;

impl Operator for Ne {
    fn name(&self) -> Cow<'static, str> {
        Cow::Borrowed("ne")
    }

    fn check(&self, lhs: &dyn Inspect, rhs: &Value) -> bool {
        !lhs.value().loose_eq(rhs)
    }

    fn description(&self) -> Cow<'static, str> {
        Cow::Borrowed("must be not equal to")
    }

    fn negated_description(&self) -> Cow<'static, str> {
        Cow::Borrowed("must be equal to")
    }
}

comparison!(
    /// Strictly less than. Unordered pairs never pass.
    Lt, "lt", |ordering| ordering == Some(Ordering::Less),
    "must be less than", "must be greater than or equal to"
);

comparison!(
    /// Less than or equal.
    Lte, "lte", |ordering| matches!(ordering, Some(Ordering::Less | Ordering::Equal)),
    "must be less than or equal to", "must be greater than"
);

comparison!(
    /// Strictly greater than.
    Gt, "gt", |ordering| ordering == Some(Ordering::Greater),
    "must be greater than", "must be less than or equal to"
);

comparison!(
    /// Greater than or equal.
    Gte, "gte", |ordering| matches!(ordering, Some(Ordering::Greater | Ordering::Equal)),
    "must be greater than or equal to", "must be less than"
);
