//! Adapters
//!
//! An adapter binds one object and one evaluation policy to a validator run.
//! It owns no part of the validator: it is created right before
//! [`Validator::apply`](crate::validator::Validator::apply), receives the
//! outcome through [`Adapter::finish`] and is dropped afterwards.
//!
//! | Adapter | Outcome |
//! |---|---|
//! | [`DefaultAdapter`] | status only |
//! | [`ReportingAdapter`] | status plus rendered message and structured error |
//! | [`PrevalidationAdapter`] | checks a candidate value for one member |
//! | [`FilterAdapter`] | evaluates only leaves on selected paths |

mod filter;
mod prevalidation;
mod reporting;

pub use filter::{FilterAdapter, exclude_paths, include_and_exclude_paths, include_paths};
pub use prevalidation::{PrevalidationAdapter, prevalidate, set_validated};
pub use reporting::ReportingAdapter;

use crate::access::{self, Inspect, Resolution};
use crate::config::{AdapterConfig, UnknownMember};
use crate::foundation::Status;
use crate::path::Path;
use crate::report::Requirement;

// ============================================================================
// ADAPTER TRAIT
// ============================================================================

/// Evaluation context for one object.
///
/// Only [`object`](Adapter::object) and [`config`](Adapter::config) are
/// required. Wrapping adapters forward every method to the adapter they
/// wrap and override the ones they change.
pub trait Adapter {
    /// The validated object.
    fn object(&self) -> &dyn Inspect;

    /// Evaluation policy.
    fn config(&self) -> &AdapterConfig;

    /// Whether the leaf at the concrete `path` is evaluated at all.
    fn accepts(&self, path: &Path) -> bool {
        let _ = path;
        true
    }

    /// Whether any leaf below `prefix` can be accepted.
    ///
    /// `prefix` may still hold wildcards. A `false` here skips the whole
    /// subtree before its containers are resolved.
    fn accepts_prefix(&self, prefix: &Path) -> bool {
        let _ = prefix;
        true
    }

    /// Resolves `path` and hands the outcome to `f`.
    fn with_member<R>(&self, path: &Path, f: impl FnOnce(Resolution<'_>) -> R) -> R {
        access::with_member(self.object(), path.keys(), f)
    }

    /// Presence of the member at `path`.
    fn member_exists(&self, path: &Path) -> Resolution<'static> {
        access::member_exists(self.object(), path.keys())
    }

    /// Whether the evaluator should build failure requirements.
    fn collects_report(&self) -> bool {
        false
    }

    /// Receives the outcome of one `apply()`.
    fn finish(&mut self, status: Status, requirement: Option<Requirement>) {
        let _ = (status, requirement);
    }
}

/// Policy builders shared by the concrete adapters.
macro_rules! policy_builders {
    () => {
        /// Replaces the whole configuration.
        #[must_use = "builder methods must be chained or built"]
        pub fn with_config(mut self, config: $crate::config::AdapterConfig) -> Self {
            self.config = config;
            self
        }

        /// Sets the unknown-member policy.
        #[must_use = "builder methods must be chained or built"]
        pub fn with_unknown_member(mut self, policy: $crate::config::UnknownMember) -> Self {
            self.config.unknown_member = policy;
            self
        }

        /// Enables or disables the presence pre-check.
        #[must_use = "builder methods must be chained or built"]
        pub fn with_check_member_exists(mut self, enabled: bool) -> Self {
            self.config.check_member_exists = enabled;
            self
        }

        /// Skips leaves whose member is absent.
        #[must_use = "builder methods must be chained or built"]
        pub fn ignore_unknown_members(mut self) -> Self {
            self.config = self.config.ignore_unknown_members();
            self
        }
    };
}

pub(crate) use policy_builders;

// ============================================================================
// DEFAULT ADAPTER
// ============================================================================

/// Status-only adapter.
///
/// ```rust,ignore
/// let mut adapter = DefaultAdapter::new(&object).ignore_unknown_members();
/// let status = validator.apply(&mut adapter)?;
/// ```
#[derive(Debug, Clone)]
pub struct DefaultAdapter<'o> {
    object: &'o dyn Inspect,
    config: AdapterConfig,
}

impl<'o> DefaultAdapter<'o> {
    /// Adapter with the default policy: absent members fail.
    pub fn new(object: &'o dyn Inspect) -> Self {
        Self {
            object,
            config: AdapterConfig::default(),
        }
    }

    policy_builders!();

    /// Current unknown-member policy.
    #[must_use]
    pub fn unknown_member(&self) -> UnknownMember {
        self.config.unknown_member
    }
}

impl Adapter for DefaultAdapter<'_> {
    fn object(&self) -> &dyn Inspect {
        self.object
    }

    fn config(&self) -> &AdapterConfig {
        &self.config
    }
}
