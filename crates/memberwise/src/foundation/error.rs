//! Error types
//!
//! Two layers:
//!
//! - [`ValidationError`]: a failed check, carrying the rendered report
//!   message together with a machine-readable code and the member path.
//! - [`Error`]: everything `apply()` and friends can return. Apart from
//!   [`Error::Validation`] these are structural problems (a path the object
//!   can never serve, a property nobody registered) and never a status.

use std::borrow::Cow;
use std::fmt;

use crate::foundation::value::ConversionError;

// ============================================================================
// VALIDATION ERROR
// ============================================================================

/// A structured validation failure.
///
/// All string fields use `Cow<'static, str>` so static codes stay
/// allocation-free.
///
/// # Examples
///
/// ```rust,ignore
/// use nebula_memberwise::foundation::ValidationError;
///
/// let error = ValidationError::new("gt", "field1 must be greater than 100")
///     .with_field("field1")
///     .with_param("operand", "100");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Error code, the operator name for a single failed leaf.
    pub code: Cow<'static, str>,

    /// Rendered, human-readable message.
    pub message: Cow<'static, str>,

    /// Dotted path of the failed member, if the failure is tied to one.
    pub field: Option<Cow<'static, str>>,

    /// Ordered key-value parameters.
    pub params: Vec<(Cow<'static, str>, Cow<'static, str>)>,

    /// One nested error per alternative when the failure is a disjunction.
    pub nested: Vec<ValidationError>,
}

impl ValidationError {
    /// Creates a new validation error with a code and message.
    pub fn new(code: impl Into<Cow<'static, str>>, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            field: None,
            params: Vec::new(),
            nested: Vec::new(),
        }
    }

    /// Sets the field path for this error.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_field(mut self, field: impl Into<Cow<'static, str>>) -> Self {
        self.field = Some(field.into());
        self
    }

    /// Adds a parameter to the error.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_param(
        mut self,
        key: impl Into<Cow<'static, str>>,
        value: impl Into<Cow<'static, str>>,
    ) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    /// Replaces nested errors.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_nested(mut self, errors: Vec<ValidationError>) -> Self {
        self.nested = errors;
        self
    }

    /// Looks up a parameter value by key.
    #[must_use]
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k.as_ref() == key)
            .map(|(_, v)| v.as_ref())
    }

    /// Returns true if this error has nested errors.
    #[must_use]
    pub fn has_nested(&self) -> bool {
        !self.nested.is_empty()
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(field) = &self.field {
            write!(f, "[{}] {}: {}", field, self.code, self.message)
        } else {
            write!(f, "{}: {}", self.code, self.message)
        }
    }
}

impl std::error::Error for ValidationError {}

// ============================================================================
// ENGINE ERROR
// ============================================================================

/// Errors returned by validator evaluation and member mutation.
#[derive(Debug, Clone, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The object did not satisfy the validator.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A path segment names a key kind the object type cannot serve at all.
    #[error("member `{path}` cannot be resolved on `{type_name}`: {key_kind} keys are not supported")]
    Unresolvable {
        /// Path up to and including the offending segment.
        path: String,
        /// Type that rejected the segment.
        type_name: &'static str,
        /// Kind of the rejected segment.
        key_kind: &'static str,
    },

    /// No property with this name is registered for the type.
    #[error("type `{type_name}` has no property `{property}`")]
    UnknownProperty {
        /// Target type.
        type_name: &'static str,
        /// Requested property.
        property: String,
    },

    /// The property exists but is read-only.
    #[error("property `{property}` of `{type_name}` has no setter")]
    NoSetter {
        /// Target type.
        type_name: &'static str,
        /// Requested property.
        property: String,
    },

    /// The candidate value does not convert into the property's type.
    #[error("cannot assign property `{property}`: {source}")]
    Conversion {
        /// Target property.
        property: String,
        /// Underlying conversion failure.
        #[source]
        source: ConversionError,
    },
}

impl Error {
    /// Returns the validation failure, if this is one.
    #[must_use]
    pub fn as_validation(&self) -> Option<&ValidationError> {
        match self {
            Self::Validation(e) => Some(e),
            _ => None,
        }
    }

    /// Returns true for a failed check, false for structural errors.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

/// Result alias used across the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_with_field() {
        let error = ValidationError::new("gt", "field1 must be greater than 100").with_field("field1");
        assert_eq!(
            error.to_string(),
            "[field1] gt: field1 must be greater than 100"
        );
    }

    #[test]
    fn params_lookup() {
        let error = ValidationError::new("in", "x must be in range [1, 2]")
            .with_param("operand", "[1, 2]");
        assert_eq!(error.param("operand"), Some("[1, 2]"));
        assert_eq!(error.param("missing"), None);
    }

    #[test]
    fn validation_is_transparent() {
        let error: Error = ValidationError::new("eq", "a must be equal to 1").into();
        assert!(error.is_validation());
        assert_eq!(error.to_string(), "eq: a must be equal to 1");
    }

    #[test]
    fn conversion_keeps_source() {
        let error = Error::Conversion {
            property: "age".into(),
            source: ConversionError {
                expected: "u32",
                found: "string",
            },
        };
        assert!(std::error::Error::source(&error).is_some());
        assert!(!error.is_validation());
    }
}
