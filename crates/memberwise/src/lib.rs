//! # nebula-memberwise
//!
//! Member-path validation for the Nebula workflow engine: compose validators
//! over nested objects (maps, sequences, tuples, JSON documents and structs
//! with registered properties) and evaluate them to a status or a readable
//! report.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use nebula_memberwise::prelude::*;
//! use serde_json::json;
//!
//! let v = validator![
//!     member("field1").gt(100),
//!     member("level1").at("field1").is_in(range([10, 20, 30, 40, 50])),
//! ];
//!
//! let outcome = validate_report(&json!({"field1": 90, "level1": {"field1": 10}}), &v)?;
//! assert_eq!(outcome.message(), Some("field1 must be greater than 100"));
//! ```
//!
//! ## Layout
//!
//! - [`access`]: the [`Inspect`](access::Inspect) protocol, implementations
//!   for std containers and JSON, and the property registry
//! - [`path`]: keys, paths and wildcard expansion
//! - [`operators`] and [`operand`]: the comparison and its right-hand side
//! - [`validator`]: the validator tree, its DSL and evaluation
//! - [`adapters`]: evaluation policies (default, reporting, prevalidation,
//!   path filtering)
//! - [`report`]: failure requirements and their English rendering
//! - [`config`]: adapter configuration

// ValidationError is the failure payload of every evaluation; boxing it
// would add indirection to every call for no practical benefit.
#![allow(clippy::result_large_err)]
// Registry entries and lazy operands are stored as boxed closures.
#![allow(clippy::type_complexity)]

mod macros;

pub mod access;
pub mod adapters;
pub mod config;
pub mod foundation;
pub mod operand;
pub mod operators;
pub mod path;
pub mod prelude;
pub mod report;
mod validate;
pub mod validator;

pub use validate::{Outcome, validate, validate_report};
