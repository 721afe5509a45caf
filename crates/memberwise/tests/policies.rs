//! Unknown-member policies, path filters and shared validators.

use nebula_memberwise::prelude::*;
use pretty_assertions::assert_eq;
use serde_json::{Value as Json, json};

fn document() -> Json {
    json!({
        "a": 1,
        "b": 2,
        "items": [{"name": "x", "qty": 2}, {"name": "y", "qty": 0}],
    })
}

fn apply(validator: &Validator<'_>, config: AdapterConfig) -> (Status, Option<String>) {
    let document = document();
    let mut adapter = ReportingAdapter::with_settings(&document, config);
    let status = validator.apply(&mut adapter).unwrap();
    (status, adapter.message().map(ToOwned::to_owned))
}

// ============================================================================
// UNKNOWN MEMBERS
// ============================================================================

#[test]
fn absent_member_fails_by_default() {
    let v = member("missing").gt(1);
    assert_eq!(
        apply(&v, AdapterConfig::new()),
        (Status::Fail, Some("missing must exist".to_owned()))
    );
    let pre_checked = AdapterConfig::new().with_check_member_exists(true);
    assert_eq!(
        apply(&v, pre_checked),
        (Status::Fail, Some("missing must exist".to_owned()))
    );
}

#[test]
fn absent_member_is_skipped_when_ignored() {
    let config = AdapterConfig::new().ignore_unknown_members();
    assert_eq!(apply(&member("missing").gt(1), config.clone()), (Status::Ignore, None));

    let v = validator![member("missing").gt(1), member("a").gt(0)];
    assert_eq!(apply(&v, config.clone()), (Status::Ok, None));

    let v = validator![member("missing").gt(1), member("a").gt(5)];
    assert_eq!(
        apply(&v, config),
        (Status::Fail, Some("a must be greater than 5".to_owned()))
    );
}

#[test]
fn ignored_member_stays_ignored_under_not() {
    let config = AdapterConfig::new().ignore_unknown_members();
    assert_eq!(apply(&not(member("missing").gt(1)), config), (Status::Ignore, None));
}

#[test]
fn missing_operand_member_follows_policy() {
    let v = member("a").lt(other_member("nope"));
    assert_eq!(
        apply(&v, AdapterConfig::new()),
        (Status::Fail, Some("nope must exist".to_owned()))
    );
    assert_eq!(
        apply(&v, AdapterConfig::new().with_unknown_member(UnknownMember::Ignore)),
        (Status::Ignore, None)
    );
}

#[test]
fn policy_loads_from_json() {
    let config = AdapterConfig::from_json(r#"{"unknown_member": "ignore", "check_member_exists": true}"#).unwrap();
    assert_eq!(apply(&member("missing").gt(1), config), (Status::Ignore, None));
}

#[test]
fn structural_errors_are_not_failures() {
    let document = document();

    let error = member("a").all().gt(0).check(&document).unwrap_err();
    assert!(matches!(error, Error::Unresolvable { key_kind: "wildcard", .. }));

    let error = member("a").at("deeper").gt(0).check(&document).unwrap_err();
    let Error::Unresolvable { path, key_kind, .. } = error else {
        panic!("expected an unresolvable path");
    };
    assert_eq!(path, "a.deeper");
    assert_eq!(key_kind, "name");
}

// ============================================================================
// PATH FILTERS
// ============================================================================

fn checks() -> Validator<'static> {
    validator![
        member("a").gt(5),
        member("b").eq(3),
        member("items").all().at("qty").gt(0),
    ]
}

#[test]
fn included_path_matches_its_leaf_alone() {
    let document = document();
    let leaves = [
        (path!["a"], member("a").gt(5)),
        (path!["b"], member("b").eq(3)),
        (path!["items"], member("items").all().at("qty").gt(0)),
    ];
    for (path, leaf) in leaves {
        let mut filtered = include_paths(ReportingAdapter::new(&document), [path]);
        let filtered_status = checks().apply(&mut filtered).unwrap();

        let mut alone = ReportingAdapter::new(&document);
        let alone_status = leaf.apply(&mut alone).unwrap();

        assert_eq!(filtered_status, alone_status);
        assert_eq!(filtered.inner().message(), alone.message());
    }
}

#[test]
fn wildcard_filter_selects_elements() {
    let document = document();
    let mut adapter = include_paths(
        ReportingAdapter::new(&document),
        [Path::from("items").with_key(Key::All).with_key(Key::from("qty"))],
    );
    assert_eq!(checks().apply(&mut adapter).unwrap(), Status::Fail);
    assert_eq!(
        adapter.inner().message(),
        Some("qty of each element of items must be greater than 0")
    );
}

#[test]
fn filtered_out_wildcards_are_never_expanded() {
    let document = document();
    let v = validator![
        member("a").gt(0),
        member("missing").all().gt(0),
        member("b").all().gt(0),
    ];

    let mut filtered = include_paths(ReportingAdapter::new(&document), [path!["a"]]);
    let mut alone = ReportingAdapter::new(&document);
    assert_eq!(v.apply(&mut filtered).unwrap(), Status::Ok);
    assert_eq!(member("a").gt(0).apply(&mut alone).unwrap(), Status::Ok);
    assert_eq!(filtered.inner().message(), alone.message());

    let mut adapter = exclude_paths(DefaultAdapter::new(&document), [path!["missing"], path!["b"]]);
    assert_eq!(v.apply(&mut adapter).unwrap(), Status::Ok);
}

#[test]
fn element_filter_skips_other_elements() {
    let document = json!({"rows": [{"cells": [1, 2]}, {"cells": 7}]});
    let v = member("rows").all().at("cells").all().gt(0);
    assert!(v.check(&document).is_err());

    let mut adapter = include_paths(DefaultAdapter::new(&document), [path!["rows", 0]]);
    assert_eq!(v.apply(&mut adapter).unwrap(), Status::Ok);
}

#[test]
fn excluded_paths_are_skipped() {
    let document = document();
    let mut adapter = exclude_paths(DefaultAdapter::new(&document), [path!["a"], path!["b"], path!["items"]]);
    assert_eq!(checks().apply(&mut adapter).unwrap(), Status::Ignore);

    let mut adapter = include_and_exclude_paths(
        DefaultAdapter::new(&document),
        [path!["items"]],
        [Path::from("items").with_key(Key::Index(1))],
    );
    assert_eq!(checks().apply(&mut adapter).unwrap(), Status::Ok);
}

// ============================================================================
// SHARING
// ============================================================================

#[test]
fn one_validator_many_threads() {
    let v = validator![member("qty").gte(0), member("name").length().gt(0)];
    let objects: Vec<Json> = (0..8)
        .map(|i| json!({"qty": i - 2, "name": "n"}))
        .collect();

    let results: Vec<bool> = std::thread::scope(|scope| {
        let handles: Vec<_> = objects
            .iter()
            .map(|object| {
                let v = &v;
                scope.spawn(move || v.check(object).unwrap())
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(results, [false, false, true, true, true, true, true, true]);
}
