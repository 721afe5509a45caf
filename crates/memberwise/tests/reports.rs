//! Rendered failure reports.

use nebula_memberwise::operators;
use nebula_memberwise::prelude::*;
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{Value as Json, json};

fn document() -> Json {
    json!({
        "name": "Ada",
        "age": 17,
        "tags": ["a", "b"],
        "queue": [],
        "enabled": false,
        "level1": {"field1": 5},
    })
}

fn message(validator: &Validator<'_>) -> Option<String> {
    validate_report(&document(), validator)
        .unwrap()
        .message()
        .map(ToOwned::to_owned)
}

// ============================================================================
// BASIC CASES
// ============================================================================

#[test]
fn greater_than_fails_then_passes() {
    let v = member("field1").gt(100);

    let error = validate(&json!({"field1": 90}), &v).unwrap_err();
    let failure = error.as_validation().unwrap();
    assert_eq!(failure.message, "field1 must be greater than 100");
    assert_eq!(failure.code, "gt");
    assert_eq!(failure.field.as_deref(), Some("field1"));

    assert!(validate(&json!({"field1": 200}), &v).is_ok());
}

#[test]
fn nested_member_names_path_and_set() {
    let object = json!({"level1": {"field1": 5}});
    let chained = member("level1").at("field1").is_in(range([10, 20, 30, 40, 50]));
    let nested = member("level1").nest(validator![
        member("field1").is_in(range([10, 20, 30, 40, 50])),
    ]);

    let chained = validate_report(&object, &chained).unwrap();
    assert_eq!(chained.status, Status::Fail);
    insta::assert_snapshot!(
        chained.message().unwrap(),
        @"field1 of level1 must be in range [10, 20, 30, 40, 50]"
    );

    let nested = validate_report(&object, &nested).unwrap();
    assert_eq!(nested.status, Status::Fail);
    assert_eq!(nested.message(), chained.message());
}

// ============================================================================
// OPERATOR PHRASES
// ============================================================================

#[rstest]
#[case::gte(member("age").gte(18), "age must be greater than or equal to 18")]
#[case::negated_lt(not(member("age").lt(18)), "age must be greater than or equal to 18")]
#[case::eq(member("name").eq("Bob"), "name must be equal to Bob")]
#[case::negated_eq(not(member("name").eq("Ada")), "name must be not equal to Ada")]
#[case::contains(member("tags").contains("c"), "tags must contain c")]
#[case::exists(member("missing").exists(), "missing must exist")]
#[case::not_exists(member("name").not_exists(), "name must not exist")]
#[case::negated_exists(not(member("name").exists()), "name must not exist")]
#[case::flag(member("enabled").flag(true), "enabled must be set")]
#[case::matches(member("name").matches("^B"), "name must match pattern ^B")]
#[case::interval(member("age").is_in(interval(18, 65)), "age must be in interval [18, 65]")]
#[case::not_in(member("age").not_in(range([16, 17])), "age must be not in range [16, 17]")]
#[case::ilex(member("name").ilex_eq("bob"), "name must be case-insensitively equal to bob")]
#[case::lex(member("name").lex_gt("B"), "name must be lexicographically greater than B")]
#[case::size(member("tags").size().gt(5), "size of tags must be greater than 5")]
#[case::display_name(
    member("level1").at("field1").named("Field One").lt(0),
    "Field One of level1 must be less than 0"
)]
#[case::other_member(
    member("age").lt(other_member(path!["level1", "field1"])),
    "age must be less than field1 of level1"
)]
#[case::each_element(member("tags").all().eq("a"), "each element of tags must be equal to a")]
#[case::empty_any(member("queue").any().eq(1), "queue must not be empty")]
#[case::element_index(member("tags").at(1).eq("a"), "element #1 of tags must be equal to a")]
fn renders_failure(#[case] validator: Validator<'static>, #[case] expected: &str) {
    assert_eq!(message(&validator).as_deref(), Some(expected));
}

#[test]
fn custom_flag_phrases() {
    let v = member("enabled").check(Flag::described("must be enabled", "must be disabled"), true);
    assert_eq!(message(&v).as_deref(), Some("enabled must be enabled"));
    let v = not(v);
    assert_eq!(message(&v), None);
}

#[test]
fn operator_types_stay_reachable() {
    let v = member("age").check(operators::Gt, 20);
    assert_eq!(message(&v).as_deref(), Some("age must be greater than 20"));
}

// ============================================================================
// AGGREGATION
// ============================================================================

#[test]
fn and_reports_first_failure() {
    let v = validator![member("age").gte(18), member("name").eq("Bob")];
    assert_eq!(message(&v).as_deref(), Some("age must be greater than or equal to 18"));
}

#[test]
fn or_lists_every_alternative() {
    let v = or([member("age").gte(18), member("name").eq("Bob")]);
    insta::assert_snapshot!(
        message(&v).unwrap(),
        @"age must be greater than or equal to 18 OR name must be equal to Bob"
    );
}

#[test]
fn negated_and_follows_de_morgan() {
    let v = not(and([member("age").lt(18), member("name").eq("Ada")]));
    insta::assert_snapshot!(
        message(&v).unwrap(),
        @"age must be greater than or equal to 18 OR name must be not equal to Ada"
    );
}

#[test]
fn negated_all_becomes_any() {
    let v = not(member("tags").all().ne("z"));
    insta::assert_snapshot!(
        message(&v).unwrap(),
        @"each element of tags must be equal to z"
    );
}

#[test]
fn sample_operand_is_named() {
    let reference = json!({"age": 21});
    let v = member("age").gte(sample_named(&reference, "reference"));
    assert_eq!(
        message(&v).as_deref(),
        Some("age must be greater than or equal to age of reference")
    );
}

#[test]
fn dotted_member_style_and_quotes() {
    let config = AdapterConfig::new()
        .with_member_style(MemberStyle::Dotted)
        .with_quoted_strings(true);
    let document = document();
    let mut adapter = ReportingAdapter::with_settings(&document, config);
    let v = member("level1").at("field1").eq("x");
    assert_eq!(v.apply(&mut adapter).unwrap(), Status::Fail);
    assert_eq!(adapter.message(), Some("level1.field1 must be equal to \"x\""));
}

#[test]
fn messages_are_idempotent() {
    let document = document();
    let v = or([member("age").gte(18), member("tags").all().eq("a")]);
    let mut adapter = ReportingAdapter::new(&document);
    let first = v.apply(&mut adapter).unwrap();
    let first_message = adapter.message().map(ToOwned::to_owned);
    let second = v.apply(&mut adapter).unwrap();
    assert_eq!(first, second);
    assert_eq!(first_message.as_deref(), adapter.message());
}

#[test]
fn structured_error_lists_alternatives() {
    let v = or([member("age").gte(18), member("name").eq("Bob")]);
    let error = validate(&document(), &v).unwrap_err();
    let failure = error.as_validation().unwrap();
    assert_eq!(failure.code, "any_of");
    let codes: Vec<&str> = failure.nested.iter().map(|e| &*e.code).collect();
    assert_eq!(codes, ["gte", "eq"]);
    assert_eq!(failure.nested[0].param("operand"), Some("18"));
}
