//! Path filtering.
//!
//! A [`FilterAdapter`] wraps another adapter and evaluates only the leaves
//! whose member path is selected; the rest are ignored. Filter paths are
//! compared with the leaf path up to the shorter of the two lengths, so
//! `items` selects `items[0].name` and `items[*].name` selects `items`.

use super::Adapter;
use crate::access::{Inspect, Resolution};
use crate::config::AdapterConfig;
use crate::foundation::Status;
use crate::path::Path;
use crate::report::Requirement;

/// Adapter evaluating a subset of leaves.
#[derive(Debug, Clone)]
pub struct FilterAdapter<A> {
    inner: A,
    include: Vec<Path>,
    exclude: Vec<Path>,
}

impl<A: Adapter> FilterAdapter<A> {
    /// Wraps `inner`. An empty include list selects everything.
    pub fn new(inner: A, include: Vec<Path>, exclude: Vec<Path>) -> Self {
        Self {
            inner,
            include,
            exclude,
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

    fn selects(&self, path: &Path) -> bool {
        let included = self.include.is_empty() || self.include.iter().any(|p| path.matches_prefix(p));
        included && !self.exclude.iter().any(|p| path.matches_prefix(p))
    }

    fn selects_below(&self, prefix: &Path) -> bool {
        let included = self.include.is_empty() || self.include.iter().any(|p| prefix.matches_prefix(p));
        included && !self.exclude.iter().any(|p| prefix.lies_below(p))
    }
}

impl<A: Adapter> Adapter for FilterAdapter<A> {
    fn object(&self) -> &dyn Inspect {
        self.inner.object()
    }

    fn config(&self) -> &AdapterConfig {
        self.inner.config()
    }

    fn accepts(&self, path: &Path) -> bool {
        self.selects(path) && self.inner.accepts(path)
    }

    fn accepts_prefix(&self, prefix: &Path) -> bool {
        self.selects_below(prefix) && self.inner.accepts_prefix(prefix)
    }

    fn with_member<R>(&self, path: &Path, f: impl FnOnce(Resolution<'_>) -> R) -> R {
        self.inner.with_member(path, f)
    }

    fn member_exists(&self, path: &Path) -> Resolution<'static> {
        self.inner.member_exists(path)
    }

    fn collects_report(&self) -> bool {
        self.inner.collects_report()
    }

    fn finish(&mut self, status: Status, requirement: Option<Requirement>) {
        self.inner.finish(status, requirement);
    }
}

fn paths<P: Into<Path>>(paths: impl IntoIterator<Item = P>) -> Vec<Path> {
    paths.into_iter().map(Into::into).collect()
}

/// Evaluates only leaves on `include` paths.
///
/// ```rust,ignore
/// let mut adapter = include_paths(ReportingAdapter::new(&form), [path!["email"]]);
/// validator.apply(&mut adapter)?;
/// ```
pub fn include_paths<A: Adapter, P: Into<Path>>(adapter: A, include: impl IntoIterator<Item = P>) -> FilterAdapter<A> {
    FilterAdapter::new(adapter, paths(include), Vec::new())
}

/// Skips leaves on `exclude` paths.
pub fn exclude_paths<A: Adapter, P: Into<Path>>(adapter: A, exclude: impl IntoIterator<Item = P>) -> FilterAdapter<A> {
    FilterAdapter::new(adapter, Vec::new(), paths(exclude))
}

/// Evaluates leaves on `include` paths that are not on `exclude` paths.
pub fn include_and_exclude_paths<A, P, Q>(
    adapter: A,
    include: impl IntoIterator<Item = P>,
    exclude: impl IntoIterator<Item = Q>,
) -> FilterAdapter<A>
where
    A: Adapter,
    P: Into<Path>,
    Q: Into<Path>,
{
    FilterAdapter::new(adapter, paths(include), paths(exclude))
}
