//! Member builder
//!
//! `member("a").at("b").gt(1)` reads as "member b of a must be greater than
//! 1". The builder collects path segments and turns into a leaf
//! [`Validator`] once an operator is applied, or into a scope with
//! [`nest`](MemberBuilder::nest).

use std::borrow::Cow;

use super::Validator;
use crate::foundation::Value;
use crate::operand::Operand;
use crate::operators::{
    self, Contains, Exists, Flag, In, Lexicographic, Matches, NotIn, Op, Operator,
};
use crate::path::{Arg, Key, Path, PropertyKey};

/// Path under construction.
#[derive(Debug, Clone, Default)]
#[must_use = "a member does nothing until an operator is applied"]
pub struct MemberBuilder {
    path: Path,
}

/// Starts a member path at `key`.
///
/// ```rust,ignore
/// member("level1").at("field1").is_in(range([10, 20, 30]))
/// ```
pub fn member(key: impl Into<Key>) -> MemberBuilder {
    MemberBuilder {
        path: Path::from_keys([key.into()]),
    }
}

/// The validated object itself.
pub fn value() -> MemberBuilder {
    MemberBuilder::default()
}

macro_rules! sugar {
    ($($(#[$meta:meta])* $method:ident => $op:expr;)*) => {$(
        $(#[$meta])*
        pub fn $method<'a>(self, operand: impl Into<Operand<'a>>) -> Validator<'a> {
            self.check($op, operand)
        }
    )*};
}

impl MemberBuilder {
    /// Builder starting at `path`.
    pub fn from_path(path: impl Into<Path>) -> Self {
        Self { path: path.into() }
    }

    /// Appends a key.
    pub fn at(mut self, key: impl Into<Key>) -> Self {
        self.path.push(key);
        self
    }

    /// Appends a property without arguments.
    pub fn prop(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.path.push(Key::property(name));
        self
    }

    /// Appends a property called with fixed arguments.
    pub fn prop_with<V: Into<Value>>(
        mut self,
        name: impl Into<Cow<'static, str>>,
        args: impl IntoIterator<Item = V>,
    ) -> Self {
        let args = args.into_iter().map(|arg| Arg::Value(arg.into()));
        self.path.push(PropertyKey::with_args(name, args));
        self
    }

    /// Appends a property whose arguments may be generated.
    ///
    /// ```rust,ignore
    /// // every `channel(i)` for i in 0..4 must be positive
    /// member("mixer").prop_each("channel", [Arg::each(0, 4)]).gt(0)
    /// ```
    pub fn prop_each(
        mut self,
        name: impl Into<Cow<'static, str>>,
        args: impl IntoIterator<Item = Arg>,
    ) -> Self {
        self.path.push(PropertyKey::with_args(name, args));
        self
    }

    /// Element count.
    pub fn size(self) -> Self {
        self.prop("size")
    }

    /// Character or element count.
    pub fn length(self) -> Self {
        self.prop("length")
    }

    /// Whether the member is empty.
    pub fn empty(self) -> Self {
        self.prop("empty")
    }

    /// Every element of the member must pass.
    pub fn all(mut self) -> Self {
        self.path.push(Key::All);
        self
    }

    /// At least one element of the member must pass.
    pub fn any(mut self) -> Self {
        self.path.push(Key::Any);
        self
    }

    /// Display name of the last segment, used in reports.
    pub fn named(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.path = self.path.named(name);
        self
    }

    /// The path built so far.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Leaf applying `op` with `operand`.
    pub fn check<'a>(self, op: impl Operator + 'static, operand: impl Into<Operand<'a>>) -> Validator<'a> {
        Validator::leaf(self.path, Op::new(op), operand)
    }

    /// Leaf applying a shared operator handle.
    pub fn check_op<'a>(self, op: Op, operand: impl Into<Operand<'a>>) -> Validator<'a> {
        Validator::leaf(self.path, op, operand)
    }

    /// Runs `validator` below this member.
    pub fn nest(self, validator: Validator<'_>) -> Validator<'_> {
        Validator::scoped(self.path, validator)
    }

    sugar! {
        /// Must be equal to `operand`.
        eq => operators::Eq;
        /// Must be not equal to `operand`.
        ne => operators::Ne;
        /// Must be greater than `operand`.
        gt => operators::Gt;
        /// Must be greater than or equal to `operand`.
        gte => operators::Gte;
        /// Must be less than `operand`.
        lt => operators::Lt;
        /// Must be less than or equal to `operand`.
        lte => operators::Lte;
        /// Must be one of a list or inside an interval.
        is_in => In;
        /// Must be neither in the list nor inside the interval.
        not_in => NotIn;
        /// Must contain `operand`.
        contains => Contains;
        /// Must match the regular expression `operand`.
        matches => Matches;
        /// Must be lexicographically equal to `operand`.
        lex_eq => operators::lex_eq();
        /// Must be lexicographically not equal to `operand`.
        lex_ne => operators::lex_ne();
        /// Must be lexicographically less than `operand`.
        lex_lt => operators::lex_lt();
        /// Must be lexicographically less than or equal to `operand`.
        lex_lte => operators::lex_lte();
        /// Must be lexicographically greater than `operand`.
        lex_gt => operators::lex_gt();
        /// Must be lexicographically greater than or equal to `operand`.
        lex_gte => operators::lex_gte();
        /// Case-insensitive variant of [`lex_eq`](Self::lex_eq).
        ilex_eq => operators::ilex_eq();
        /// Case-insensitive variant of [`lex_ne`](Self::lex_ne).
        ilex_ne => operators::ilex_ne();
        /// Case-insensitive variant of [`lex_lt`](Self::lex_lt).
        ilex_lt => operators::ilex_lt();
        /// Case-insensitive variant of [`lex_lte`](Self::lex_lte).
        ilex_lte => operators::ilex_lte();
        /// Case-insensitive variant of [`lex_gt`](Self::lex_gt).
        ilex_gt => operators::ilex_gt();
        /// Case-insensitive variant of [`lex_gte`](Self::lex_gte).
        ilex_gte => operators::ilex_gte();
    }

    /// Lexicographic comparison with a configured operator.
    pub fn lex<'a>(self, op: Lexicographic, operand: impl Into<Operand<'a>>) -> Validator<'a> {
        self.check(op, operand)
    }

    /// Member must exist.
    pub fn exists(self) -> Validator<'static> {
        self.check(Exists, true)
    }

    /// Member must not exist.
    pub fn not_exists(self) -> Validator<'static> {
        self.check(Exists, false)
    }

    /// Flag must be `set` (true) or unset (false).
    pub fn flag(self, set: bool) -> Validator<'static> {
        self.check(Flag::new(), set)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validator::Node;

    #[test]
    fn builds_nested_paths() {
        let v = member("items").all().at("name").length().gt(3);
        let Node::Leaf { path, op, .. } = v.node() else {
            panic!("expected leaf");
        };
        assert_eq!(path.to_string(), "items[*].name.length()");
        assert_eq!(op.name(), "gt");
    }

    #[test]
    fn property_arguments() {
        let v = member("grid").prop_with("cell", [1, 2]).eq(0);
        let Node::Leaf { path, .. } = v.node() else {
            panic!("expected leaf");
        };
        assert_eq!(path.to_string(), "grid.cell(1, 2)");
    }

    #[test]
    fn value_targets_root() {
        let v = value().gt(1);
        let Node::Leaf { path, .. } = v.node() else {
            panic!("expected leaf");
        };
        assert!(path.is_empty());
    }

    #[test]
    fn nest_creates_scope() {
        let v = member("level1").nest(member("field1").gt(1));
        assert!(matches!(v.node(), Node::Scope { .. }));
    }
}
