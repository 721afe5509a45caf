//! One-call entry points.

use crate::access::Inspect;
use crate::adapters::ReportingAdapter;
use crate::foundation::{Error, Status, ValidationError};
use crate::validator::Validator;

/// Status of a run plus the error describing a failure.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    /// Overall status.
    pub status: Status,
    /// Set when `status` is [`Status::Fail`].
    pub error: Option<ValidationError>,
}

impl Outcome {
    pub(crate) fn new(status: Status, error: Option<ValidationError>) -> Self {
        Self { status, error }
    }

    /// Returns true unless the run failed.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Rendered failure message.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.error.as_ref().map(|error| &*error.message)
    }

    /// `Err(Error::Validation)` for a failed run.
    ///
    /// # Errors
    ///
    /// Returns the failure as [`Error::Validation`].
    pub fn into_result(self) -> Result<(), Error> {
        match (self.status, self.error) {
            (Status::Fail, Some(error)) => Err(Error::Validation(error)),
            (Status::Fail, None) => Err(Error::Validation(ValidationError::new(
                "validation_failed",
                "validation failed",
            ))),
            _ => Ok(()),
        }
    }
}

/// Validates `object`, failing with the rendered report.
///
/// ```rust,ignore
/// validate(&json!({"field1": 90}), &member("field1").gt(100))?;
/// // Err: field1 must be greater than 100
/// ```
///
/// # Errors
///
/// [`Error::Validation`] when the check fails, [`Error::Unresolvable`] for
/// structurally invalid paths.
pub fn validate(object: &dyn Inspect, validator: &Validator<'_>) -> Result<(), Error> {
    validate_report(object, validator)?.into_result()
}

/// Validates `object` and returns the status with the report.
///
/// # Errors
///
/// [`Error::Unresolvable`] for structurally invalid paths; a failed check
/// is an `Ok` outcome with [`Status::Fail`].
pub fn validate_report(object: &dyn Inspect, validator: &Validator<'_>) -> Result<Outcome, Error> {
    let mut adapter = ReportingAdapter::new(object);
    let status = validator.apply(&mut adapter)?;
    Ok(Outcome::new(status, adapter.take_error()))
}
