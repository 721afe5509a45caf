//! Composition macros.
//!
//! - [`validator!`]: AND of sibling validators
//! - [`any_of!`]: OR of alternatives
//!
//! Registration macros ([`declare_properties!`](crate::declare_properties),
//! [`inspect_by_properties!`](crate::inspect_by_properties)) live next to
//! the property registry.

// ============================================================================
// VALIDATOR MACRO
// ============================================================================

/// AND of all listed validators.
///
/// Nested groups are written with [`nest`](crate::validator::MemberBuilder::nest):
///
/// ```rust,ignore
/// let v = validator![
///     member("field1").gt(10),
///     member("level1").nest(validator![
///         member("field1").is_in(range([10, 20, 30])),
///         member("field2").exists(),
///     ]),
/// ];
/// ```
///
/// `validator![]` passes every object.
#[macro_export]
macro_rules! validator {
    () => {
        $crate::validator::and(::std::vec::Vec::new())
    };
    ($($item:expr),+ $(,)?) => {
        $crate::validator::and([$($item),+])
    };
}

// ============================================================================
// ANY_OF MACRO
// ============================================================================

/// OR of all listed validators.
///
/// ```rust,ignore
/// let v = any_of![member("email").exists(), member("phone").exists()];
/// ```
#[macro_export]
macro_rules! any_of {
    ($($item:expr),+ $(,)?) => {
        $crate::validator::or([$($item),+])
    };
}
