//! Tree evaluation.
//!
//! Negation is pushed down to the leaves: every node returns its status as
//! seen from the root, so a NOT flips the polarity of its subtree and
//! aggregations under an odd number of NOTs fold with the dual rule
//! (AND as OR, ALL as ANY and back). Failure requirements are built in the
//! same pass, already phrased for the polarity they were evaluated under.

use tracing::trace;

use super::{Node, Validator};
use crate::access::Resolution;
use crate::adapters::Adapter;
use crate::config::UnknownMember;
use crate::foundation::{Error, Status, Value};
use crate::operand::{Extracted, Operand};
use crate::operators::{Op, Operator};
use crate::path::{Aggregation, Generated, Key, Path, generate_paths, prepend_super_member};
use crate::report::{ReportEntry, Requirement};

/// Status of a node plus what would have made it pass.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Verdict {
    pub(crate) status: Status,
    pub(crate) requirement: Option<Requirement>,
}

impl Verdict {
    const fn ok() -> Self {
        Self {
            status: Status::Ok,
            requirement: None,
        }
    }

    const fn ignore() -> Self {
        Self {
            status: Status::Ignore,
            requirement: None,
        }
    }

    const fn fail(requirement: Option<Requirement>) -> Self {
        Self {
            status: Status::Fail,
            requirement,
        }
    }
}

/// Concrete member prefix and its report form.
#[derive(Debug, Clone, Default)]
struct Scope {
    concrete: Path,
    display: Path,
}

struct Evaluator<'e, A: Adapter> {
    adapter: &'e A,
    report: bool,
}

pub(crate) fn evaluate<A: Adapter>(validator: &Validator<'_>, adapter: &A) -> Result<Verdict, Error> {
    let evaluator = Evaluator {
        adapter,
        report: adapter.collects_report(),
    };
    evaluator.node(validator, &Scope::default(), false)
}

fn unresolvable(path: &Path, depth: usize, type_name: &'static str) -> Error {
    Error::Unresolvable {
        path: path.prefix(depth + 1).to_string(),
        type_name,
        key_kind: path.keys().get(depth).map_or("name", Key::kind),
    }
}

fn must_exist(path: &Path) -> Requirement {
    Requirement::Leaf(ReportEntry {
        path: path.clone(),
        operator: "exists".into(),
        description: "must exist".into(),
        operand: None,
    })
}

fn must_not_be_empty(path: &Path) -> Requirement {
    Requirement::Leaf(ReportEntry {
        path: path.clone(),
        operator: "empty".into(),
        description: "must not be empty".into(),
        operand: None,
    })
}

impl<A: Adapter> Evaluator<'_, A> {
    fn node(&self, validator: &Validator<'_>, scope: &Scope, negated: bool) -> Result<Verdict, Error> {
        match validator.node() {
            Node::Leaf { path, op, operand } => self.expand(scope, path, negated, &mut |this: &Self, scope: Scope| {
                this.leaf(&scope, op, operand, negated)
            }),
            Node::And(items) => {
                let aggregation = if negated { Aggregation::Any } else { Aggregation::All };
                self.fold(aggregation, items.iter().map(|item| self.node(item, scope, negated)))
            }
            Node::Or(items) => {
                let aggregation = if negated { Aggregation::All } else { Aggregation::Any };
                self.fold(aggregation, items.iter().map(|item| self.node(item, scope, negated)))
            }
            Node::Not(inner) => self.node(inner, scope, !negated),
            Node::Scope { path, inner } => self.expand(scope, path, negated, &mut |this: &Self, scope: Scope| {
                this.node(inner, &scope, negated)
            }),
        }
    }

    /// AND-style fold for `All`, OR-style for `Any`. Ignored children are
    /// skipped; if nothing but ignored children remain the fold is ignored.
    fn fold(
        &self,
        aggregation: Aggregation,
        verdicts: impl Iterator<Item = Result<Verdict, Error>>,
    ) -> Result<Verdict, Error> {
        let mut seen = false;
        let mut decided = false;
        let mut failures = Vec::new();
        for verdict in verdicts {
            let verdict = verdict?;
            seen = true;
            match (aggregation, verdict.status) {
                (_, Status::Ignore) => {}
                (Aggregation::All, Status::Fail) | (Aggregation::Any, Status::Ok) => return Ok(verdict),
                (Aggregation::All, Status::Ok) => decided = true,
                (Aggregation::Any, Status::Fail) => {
                    decided = true;
                    failures.extend(verdict.requirement);
                }
            }
        }
        Ok(match aggregation {
            _ if seen && !decided => Verdict::ignore(),
            Aggregation::All => Verdict::ok(),
            Aggregation::Any => Verdict::fail(Requirement::either(failures)),
        })
    }

    /// Prepends the scope to `path`, expands generated segments and runs
    /// `body` once per concrete path. Subtrees the adapter rejects are
    /// ignored without resolving their containers.
    fn expand<F>(&self, scope: &Scope, path: &Path, negated: bool, body: &mut F) -> Result<Verdict, Error>
    where
        F: FnMut(&Self, Scope) -> Result<Verdict, Error>,
    {
        let concrete = prepend_super_member(&scope.concrete, path);
        if !self.adapter.accepts_prefix(&concrete) {
            trace!(path = %concrete, "Subtree filtered out");
            return Ok(Verdict::ignore());
        }
        if concrete.is_concrete() {
            let display = prepend_super_member(&scope.display, path);
            return body(self, Scope { concrete, display });
        }
        let generated = generate_paths(&concrete, |container| self.element_keys(container))?;
        self.generated(&generated, scope, negated, body)
    }

    fn generated<F>(&self, generated: &Generated, scope: &Scope, negated: bool, body: &mut F) -> Result<Verdict, Error>
    where
        F: FnMut(&Self, Scope) -> Result<Verdict, Error>,
    {
        let display = |template: &Path| prepend_super_member(&scope.display, &template.suffix(scope.concrete.len()));
        match generated {
            Generated::Concrete { path, display: template } => body(
                self,
                Scope {
                    concrete: path.clone(),
                    display: display(template),
                },
            ),
            Generated::Missing { path, display: template } => {
                if !self.adapter.accepts_prefix(path) {
                    return Ok(Verdict::ignore());
                }
                let display = display(template);
                if self.adapter.config().check_member_exists {
                    Ok(self.unknown(&display))
                } else {
                    Ok(Verdict::fail(self.report.then(|| must_exist(&display))))
                }
            }
            Generated::Each {
                aggregation,
                container,
                children,
            } => {
                let aggregation = if negated { aggregation.swap() } else { *aggregation };
                if children.is_empty() {
                    return Ok(match aggregation {
                        Aggregation::All => Verdict::ok(),
                        Aggregation::Any => Verdict::fail(self.report.then(|| must_not_be_empty(&display(container)))),
                    });
                }
                self.fold(
                    aggregation,
                    children.iter().map(|child| self.generated(child, scope, negated, body)),
                )
            }
        }
    }

    /// Keys of the container at `container`; `None` if it is absent or the
    /// adapter skips everything below it.
    fn element_keys(&self, container: &Path) -> Result<Option<Vec<Key>>, Error> {
        if !self.adapter.accepts_prefix(container) {
            return Ok(None);
        }
        self.adapter.with_member(container, |resolution| match resolution {
            Resolution::Found(member) => member.element_keys().map(Some).ok_or_else(|| Error::Unresolvable {
                path: container.clone().with_key(Key::All).to_string(),
                type_name: member.type_name(),
                key_kind: Key::All.kind(),
            }),
            Resolution::Missing { .. } => Ok(None),
            Resolution::Unsupported { depth, type_name } => Err(unresolvable(container, depth, type_name)),
        })
    }

    /// Absent member under the adapter's policy.
    fn unknown(&self, display: &Path) -> Verdict {
        match self.adapter.config().unknown_member {
            UnknownMember::Abort => Verdict::fail(self.report.then(|| must_exist(display))),
            UnknownMember::Ignore => Verdict::ignore(),
        }
    }

    fn leaf(&self, scope: &Scope, op: &Op, operand: &Operand<'_>, negated: bool) -> Result<Verdict, Error> {
        let Scope { concrete: path, display } = scope;
        if !self.adapter.accepts(path) {
            trace!(path = %path, operator = %op, "Member filtered out");
            return Ok(Verdict::ignore());
        }

        let verdict = if op.checks_presence() {
            let present = match self.adapter.member_exists(path) {
                Resolution::Found(_) => true,
                Resolution::Missing { .. } => false,
                Resolution::Unsupported { depth, type_name } => return Err(unresolvable(path, depth, type_name)),
            };
            self.compare(op, operand, display, negated, path, |rhs| op.check_presence(present, rhs))?
        } else {
            let absent = self.adapter.config().check_member_exists
                && match self.adapter.member_exists(path) {
                    Resolution::Found(_) => false,
                    Resolution::Missing { .. } => true,
                    Resolution::Unsupported { depth, type_name } => {
                        return Err(unresolvable(path, depth, type_name));
                    }
                };
            if absent {
                self.unknown(display)
            } else {
                self.adapter.with_member(path, |resolution| match resolution {
                    Resolution::Found(lhs) => self.compare(op, operand, display, negated, path, |rhs| op.check(lhs, rhs)),
                    Resolution::Missing { .. } => Ok(Verdict::fail(self.report.then(|| must_exist(display)))),
                    Resolution::Unsupported { depth, type_name } => Err(unresolvable(path, depth, type_name)),
                })?
            }
        };

        trace!(path = %path, operator = %op, status = ?verdict.status, "Member checked");
        Ok(verdict)
    }

    /// Extracts the operand and applies `check` to it.
    fn compare(
        &self,
        op: &Op,
        operand: &Operand<'_>,
        display: &Path,
        negated: bool,
        path: &Path,
        check: impl FnOnce(&Value) -> bool,
    ) -> Result<Verdict, Error> {
        let rhs = match operand.extract(self.adapter.object(), path)? {
            Extracted::Value(rhs) => rhs,
            Extracted::Missing => {
                let missing = match operand {
                    Operand::Member(other) => other,
                    _ => display,
                };
                return Ok(self.unknown(missing));
            }
        };
        let status = Status::from_bool(check(&rhs));
        let status = if negated { status.invert() } else { status };
        let requirement = (self.report && status == Status::Fail).then(|| {
            Requirement::Leaf(ReportEntry {
                path: display.clone(),
                operator: op.name(),
                description: op.describe(&rhs, negated),
                operand: op.shows_operand(&rhs).then(|| operand.describe(&rhs, display)),
            })
        });
        Ok(Verdict { status, requirement })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::adapters::DefaultAdapter;
    use crate::validator::{and, member, not, or};

    fn object() -> BTreeMap<String, Value> {
        let mut map = BTreeMap::new();
        map.insert("a".to_owned(), Value::Int(1));
        map.insert("list".to_owned(), Value::from(vec![1, 2, 3]));
        map.insert("empty".to_owned(), Value::List(Vec::new()));
        map
    }

    fn status(validator: &Validator<'_>) -> Status {
        let object = object();
        evaluate(validator, &DefaultAdapter::new(&object)).unwrap().status
    }

    #[test]
    fn empty_aggregates() {
        assert_eq!(status(&and([])), Status::Ok);
        assert_eq!(status(&or([])), Status::Fail);
        assert_eq!(status(&not(and([]))), Status::Fail);
        assert_eq!(status(&not(or([]))), Status::Ok);
    }

    #[test]
    fn wildcards_over_empty_containers() {
        assert_eq!(status(&member("empty").all().gt(0)), Status::Ok);
        assert_eq!(status(&member("empty").any().gt(0)), Status::Fail);
        assert_eq!(status(&not(member("empty").all().gt(0))), Status::Fail);
    }

    #[test]
    fn wildcards_fold_per_element() {
        assert_eq!(status(&member("list").all().gt(0)), Status::Ok);
        assert_eq!(status(&member("list").all().gt(1)), Status::Fail);
        assert_eq!(status(&member("list").any().gt(2)), Status::Ok);
        assert_eq!(status(&not(member("list").any().gt(2))), Status::Fail);
    }

    #[test]
    fn ignored_children_are_absent() {
        let object = object();
        let adapter = DefaultAdapter::new(&object).ignore_unknown_members();
        let check = |v: &Validator<'_>| evaluate(v, &adapter).unwrap().status;
        assert_eq!(check(&member("nope").gt(1)), Status::Ignore);
        assert_eq!(check(&and([member("nope").gt(1)])), Status::Ignore);
        assert_eq!(check(&or([member("nope").gt(1), member("a").eq(1)])), Status::Ok);
        assert_eq!(check(&not(member("nope").gt(1))), Status::Ignore);
    }

    #[test]
    fn wildcard_on_scalar_is_structural() {
        let object = object();
        let result = evaluate(&member("a").all().gt(0), &DefaultAdapter::new(&object));
        assert!(matches!(result, Err(Error::Unresolvable { key_kind: "wildcard", .. })));
    }
}
