//! Prelude module for convenient imports.
//!
//! `use nebula_memberwise::prelude::*;` brings in the member DSL, the
//! combinators, operand constructors, adapters and the traits needed to
//! make a type inspectable.
//!
//! The comparison operator types (`Eq`, `Ne`, `Gt`, ...) are not re-exported
//! here because `Eq` would shadow the standard trait; reach them through
//! [`operators`](crate::operators) or use the builder sugar (`.eq(..)`,
//! `.gt(..)`).
//!
//! # Examples
//!
//! ```rust,ignore
//! use nebula_memberwise::prelude::*;
//!
//! let v = validator![
//!     member("field1").gt(10),
//!     member("tags").any().eq("urgent"),
//! ];
//! ```

// ============================================================================
// FOUNDATION: Values, statuses, errors
// ============================================================================

pub use crate::foundation::{Error, Interval, Status, ValidationError, Value};

// ============================================================================
// ACCESS: Member resolution and property registry
// ============================================================================

pub use crate::access::{
    AccessStrategy, Inspect, Lookup, Member, Property, is_registered, set_property,
};

// ============================================================================
// PATHS
// ============================================================================

pub use crate::path::{Arg, Key, Path};

// ============================================================================
// VALIDATORS: DSL and combinators
// ============================================================================

pub use crate::validator::{MemberBuilder, Validator, and, member, not, or, value};

pub use crate::operand::{
    Operand, borrowed, cval, lazy, other_member, sample, sample_named, val,
};

pub use crate::operators::{
    Contains, Exists, Flag, In, Lexicographic, Matches, NotIn, Op, Operator, interval, negate,
    open_interval, range,
};

// ============================================================================
// ADAPTERS AND REPORTS
// ============================================================================

pub use crate::adapters::{
    Adapter, DefaultAdapter, PrevalidationAdapter, ReportingAdapter, exclude_paths,
    include_and_exclude_paths, include_paths, prevalidate, set_validated,
};

pub use crate::config::{AdapterConfig, MemberStyle, UnknownMember};
pub use crate::report::{EnglishFormatter, Formatter, Requirement};
pub use crate::{Outcome, validate, validate_report};

pub use crate::{any_of, declare_properties, inspect_by_properties, path, validator};
