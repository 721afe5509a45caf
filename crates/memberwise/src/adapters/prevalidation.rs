//! Prevalidation
//!
//! Checks a candidate value for one member before it is written: the
//! validator runs as if the member already held the candidate, only leaves
//! on that member are evaluated, and the object is never touched.
//! [`set_validated`] builds on it to assign a registered property only when
//! the check passes.

use tracing::debug;

use super::{Adapter, ReportingAdapter};
use crate::access::{self, Inspect, Resolution, property};
use crate::config::AdapterConfig;
use crate::foundation::{Error, Status, Value};
use crate::path::{Key, Path};
use crate::report::Requirement;
use crate::validate::Outcome;
use crate::validator::Validator;

/// Adapter substituting `candidate` for the member at `member`.
#[derive(Debug)]
pub struct PrevalidationAdapter<A> {
    inner: A,
    member: Path,
    candidate: Value,
}

impl<A: Adapter> PrevalidationAdapter<A> {
    /// Wraps `inner` so that `member` reads as `candidate`.
    pub fn new(inner: A, member: impl Into<Path>, candidate: impl Into<Value>) -> Self {
        Self {
            inner,
            member: member.into(),
            candidate: candidate.into(),
        }
    }

    /// The wrapped adapter.
    pub fn inner(&self) -> &A {
        &self.inner
    }

    /// Unwraps the adapter.
    pub fn into_inner(self) -> A {
        self.inner
    }

    /// Keys below the prevalidated member, `None` if `path` is elsewhere.
    fn below<'p>(&self, path: &'p Path) -> Option<&'p [Key]> {
        path.starts_with(&self.member)
            .then(|| &path.keys()[self.member.len()..])
    }
}

impl<A: Adapter> Adapter for PrevalidationAdapter<A> {
    fn object(&self) -> &dyn Inspect {
        self.inner.object()
    }

    fn config(&self) -> &AdapterConfig {
        self.inner.config()
    }

    fn accepts(&self, path: &Path) -> bool {
        self.below(path).is_some() && self.inner.accepts(path)
    }

    fn accepts_prefix(&self, prefix: &Path) -> bool {
        let related = prefix
            .keys()
            .iter()
            .zip(self.member.keys())
            .all(|(key, member)| key.is_generated() || key.same_member(member));
        related && self.inner.accepts_prefix(prefix)
    }

    fn with_member<R>(&self, path: &Path, f: impl FnOnce(Resolution<'_>) -> R) -> R {
        match self.below(path) {
            Some(rest) => access::with_member(&self.candidate, rest, f),
            None => self.inner.with_member(path, f),
        }
    }

    fn member_exists(&self, path: &Path) -> Resolution<'static> {
        match self.below(path) {
            Some(rest) => access::member_exists(&self.candidate, rest),
            None => self.inner.member_exists(path),
        }
    }

    fn collects_report(&self) -> bool {
        self.inner.collects_report()
    }

    fn finish(&mut self, status: Status, requirement: Option<Requirement>) {
        self.inner.finish(status, requirement);
    }
}

/// Checks whether `member` of `object` may take `candidate`.
///
/// # Errors
///
/// Returns [`Error::Unresolvable`] for structurally invalid paths; a failed
/// check is reported through the returned [`Outcome`].
pub fn prevalidate(
    object: &dyn Inspect,
    member: impl Into<Path>,
    candidate: impl Into<Value>,
    validator: &Validator<'_>,
) -> Result<Outcome, Error> {
    let member = member.into();
    let mut adapter = PrevalidationAdapter::new(ReportingAdapter::new(object), member.clone(), candidate);
    let status = validator.apply(&mut adapter)?;
    debug!(member = %member, status = %status, "Prevalidated candidate");
    let mut reporting = adapter.into_inner();
    Ok(Outcome::new(status, reporting.take_error()))
}

/// Assigns `candidate` to the registered property `name` of `object` if
/// `validator` accepts it.
///
/// The candidate is checked first and converted to the property type before
/// the setter runs, so on any error `object` is left unchanged.
///
/// Only top-level registered properties can be written: `name` is a single
/// property name, never a member path. Validator leaves may address it as
/// `member("balance")` or `value().prop("balance")`. Use [`prevalidate`]
/// to check a candidate for a nested member.
///
/// ```rust,ignore
/// set_validated(&mut account, "balance", 150, &member("balance").gte(0))?;
/// ```
///
/// # Errors
///
/// [`Error::Validation`] if the check fails, [`Error::UnknownProperty`] or
/// [`Error::NoSetter`] if the property cannot be written,
/// [`Error::Conversion`] if the candidate has the wrong type.
pub fn set_validated<T: Inspect>(
    object: &mut T,
    name: &str,
    candidate: impl Into<Value>,
    validator: &Validator<'_>,
) -> Result<(), Error> {
    let entry = property::entry_of::<T>(name)?;
    if !entry.is_settable() {
        return Err(Error::NoSetter {
            type_name: std::any::type_name::<T>(),
            property: name.to_owned(),
        });
    }

    let candidate = candidate.into();
    let member = Path::from_keys([Key::from(name.to_owned())]);
    let outcome = prevalidate(&*object, member, candidate.clone(), validator)?;
    if let Err(error) = outcome.into_result() {
        debug!(property = name, error = %error, "Rejected candidate value");
        return Err(error);
    }

    property::write_entry(&entry, object, candidate)?;
    debug!(property = name, "Assigned validated value");
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::adapters::DefaultAdapter;
    use crate::operand::other_member;
    use crate::validator::{and, member};

    fn object() -> BTreeMap<String, i64> {
        [("low".to_owned(), 1), ("high".to_owned(), 10)].into_iter().collect()
    }

    #[test]
    fn candidate_replaces_member() {
        let object = object();
        let v = member("low").lt(other_member("high"));
        let mut adapter = PrevalidationAdapter::new(DefaultAdapter::new(&object), "low", 20);
        assert_eq!(v.apply(&mut adapter).unwrap(), Status::Fail);
        let mut adapter = PrevalidationAdapter::new(DefaultAdapter::new(&object), "low", 5);
        assert_eq!(v.apply(&mut adapter).unwrap(), Status::Ok);
    }

    #[test]
    fn other_members_are_not_checked() {
        let object = object();
        let v = and([member("low").gt(0), member("high").gt(100)]);
        let outcome = prevalidate(&object, "low", 3, &v).unwrap();
        assert_eq!(outcome.status, Status::Ok);
    }

    #[test]
    fn failed_prevalidation_has_message() {
        let object = object();
        let outcome = prevalidate(&object, "low", -3, &member("low").gt(0)).unwrap();
        assert_eq!(outcome.status, Status::Fail);
        assert_eq!(outcome.message(), Some("low must be greater than 0"));
    }

    #[test]
    fn wildcards_elsewhere_are_not_expanded() {
        let object = object();
        let v = and([
            member("low").gt(0),
            member("items").all().gt(0),
            member("high").all().gt(0),
        ]);
        let outcome = prevalidate(&object, "low", 3, &v).unwrap();
        assert_eq!(outcome.status, Status::Ok);
        assert_eq!(outcome.message(), None);

        let outcome = prevalidate(&object, "low", -3, &v).unwrap();
        assert_eq!(outcome.message(), Some("low must be greater than 0"));
    }

    #[test]
    fn property_key_addresses_the_member() {
        let object = object();
        let v = crate::validator::value().prop("low").gt(0);
        assert_eq!(prevalidate(&object, "low", -3, &v).unwrap().status, Status::Fail);
        assert_eq!(prevalidate(&object, "low", 3, &v).unwrap().status, Status::Ok);
    }

    #[test]
    fn nested_candidate() {
        let object = object();
        let candidate = Value::from(vec![1, 2, 3]);
        let v = member("low").all().gt(0);
        assert_eq!(prevalidate(&object, "low", candidate, &v).unwrap().status, Status::Ok);
    }
}
