//! String comparison operators.
//!
//! Both sides are compared as strings; non-string values use their display
//! form. The case-insensitive family folds both sides to lowercase first.

use std::borrow::Cow;
use std::cmp::Ordering;

use super::Operator;
use crate::access::Inspect;
use crate::foundation::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Relation {
    Eq,
    Ne,
    Lt,
    Lte,
    Gt,
    Gte,
}

impl Relation {
    fn holds(self, ordering: Ordering) -> bool {
        match self {
            Self::Eq => ordering == Ordering::Equal,
            Self::Ne => ordering != Ordering::Equal,
            Self::Lt => ordering == Ordering::Less,
            Self::Lte => ordering != Ordering::Greater,
            Self::Gt => ordering == Ordering::Greater,
            Self::Gte => ordering != Ordering::Less,
        }
    }

    const fn code(self) -> &'static str {
        match self {
            Self::Eq => "eq",
            Self::Ne => "ne",
            Self::Lt => "lt",
            Self::Lte => "lte",
            Self::Gt => "gt",
            Self::Gte => "gte",
        }
    }

    const fn phrase(self) -> &'static str {
        match self {
            Self::Eq => "equal to",
            Self::Ne => "not equal to",
            Self::Lt => "less than",
            Self::Lte => "less than or equal to",
            Self::Gt => "greater than",
            Self::Gte => "greater than or equal to",
        }
    }

    const fn inverse(self) -> Self {
        match self {
            Self::Eq => Self::Ne,
            Self::Ne => Self::Eq,
            Self::Lt => Self::Gte,
            Self::Lte => Self::Gt,
            Self::Gt => Self::Lte,
            Self::Gte => Self::Lt,
        }
    }
}

/// Lexicographic string comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lexicographic {
    relation: Relation,
    ignore_case: bool,
}

impl Lexicographic {
    fn phrase(&self, relation: Relation) -> Cow<'static, str> {
        let manner = if self.ignore_case {
            "case-insensitively"
        } else {
            "lexicographically"
        };
        Cow::Owned(format!("must be {manner} {}", relation.phrase()))
    }
}

impl Operator for Lexicographic {
    fn name(&self) -> Cow<'static, str> {
        let prefix = if self.ignore_case { "ilex_" } else { "lex_" };
        Cow::Owned(format!("{prefix}{}", self.relation.code()))
    }

    fn check(&self, lhs: &dyn Inspect, rhs: &Value) -> bool {
        let lhs = lhs.value();
        let (lhs, rhs) = (lhs.lexical(), rhs.lexical());
        let ordering = if self.ignore_case {
            lhs.to_lowercase().cmp(&rhs.to_lowercase())
        } else {
            lhs.cmp(&rhs)
        };
        self.relation.holds(ordering)
    }

    fn description(&self) -> Cow<'static, str> {
        self.phrase(self.relation)
    }

    fn negated_description(&self) -> Cow<'static, str> {
        self.phrase(self.relation.inverse())
    }
}

macro_rules! constructors {
    ($($fn_name:ident => $relation:ident, $ignore_case:literal;)*) => {$(
        #[doc = concat!("`", stringify!($fn_name), "` operator.")]
        #[must_use]
        pub const fn $fn_name() -> Lexicographic {
            Lexicographic {
                relation: Relation::$relation,
                ignore_case: $ignore_case,
            }
        }
    )*};
}

constructors! {
    lex_eq => Eq, false;
    lex_ne => Ne, false;
    lex_lt => Lt, false;
    lex_lte => Lte, false;
    lex_gt => Gt, false;
    lex_gte => Gte, false;
    ilex_eq => Eq, true;
    ilex_ne => Ne, true;
    ilex_lt => Lt, true;
    ilex_lte => Lte, true;
    ilex_gt => Gt, true;
    ilex_gte => Gte, true;
}
