//! Reporting adapter.

use super::Adapter;
use crate::access::Inspect;
use crate::config::AdapterConfig;
use crate::foundation::{Status, ValidationError};
use crate::report::{self, EnglishFormatter, Formatter, Requirement};

/// Adapter that renders a message for a failed run.
///
/// The report is replaced on every `apply()`, so applying the same
/// validator twice yields the same message.
///
/// ```rust,ignore
/// let mut adapter = ReportingAdapter::new(&object);
/// validator.apply(&mut adapter)?;
/// if let Some(message) = adapter.message() {
///     eprintln!("{message}");
/// }
/// ```
#[derive(Debug)]
pub struct ReportingAdapter<'o, F = EnglishFormatter> {
    object: &'o dyn Inspect,
    config: AdapterConfig,
    formatter: F,
    requirement: Option<Requirement>,
    message: Option<String>,
    error: Option<ValidationError>,
}

impl<'o> ReportingAdapter<'o> {
    /// Adapter with the default policy and English reports.
    pub fn new(object: &'o dyn Inspect) -> Self {
        Self::with_settings(object, AdapterConfig::default())
    }

    /// Adapter with `config`; reports follow `config.report`.
    pub fn with_settings(object: &'o dyn Inspect, config: AdapterConfig) -> Self {
        let formatter = EnglishFormatter::new(config.report.clone());
        Self::with_formatter(object, config, formatter)
    }
}

impl<'o, F: Formatter> ReportingAdapter<'o, F> {
    /// Adapter rendering through `formatter`.
    pub fn with_formatter(object: &'o dyn Inspect, config: AdapterConfig, formatter: F) -> Self {
        Self {
            object,
            config,
            formatter,
            requirement: None,
            message: None,
            error: None,
        }
    }

    super::policy_builders!();

    /// Message of the last failed run.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Structured error of the last failed run.
    #[must_use]
    pub fn error(&self) -> Option<&ValidationError> {
        self.error.as_ref()
    }

    /// Requirement of the last failed run.
    #[must_use]
    pub fn requirement(&self) -> Option<&Requirement> {
        self.requirement.as_ref()
    }

    /// Takes the structured error, leaving the adapter empty.
    pub fn take_error(&mut self) -> Option<ValidationError> {
        self.message = None;
        self.requirement = None;
        self.error.take()
    }

    /// The formatter.
    pub fn formatter(&self) -> &F {
        &self.formatter
    }
}

impl<F: Formatter> Adapter for ReportingAdapter<'_, F> {
    fn object(&self) -> &dyn Inspect {
        self.object
    }

    fn config(&self) -> &AdapterConfig {
        &self.config
    }

    fn collects_report(&self) -> bool {
        true
    }

    fn finish(&mut self, status: Status, requirement: Option<Requirement>) {
        if status != Status::Fail {
            self.requirement = None;
            self.message = None;
            self.error = None;
            return;
        }
        let error = requirement.as_ref().map_or_else(
            || ValidationError::new("validation_failed", "validation failed"),
            |requirement| report::to_error(requirement, &self.formatter),
        );
        self.message = Some(error.message.to_string());
        self.error = Some(error);
        self.requirement = requirement;
    }
}
