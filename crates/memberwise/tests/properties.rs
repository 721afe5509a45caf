//! Structs validated through registered properties.

use nebula_memberwise::access::property_names;
use nebula_memberwise::prelude::*;
use pretty_assertions::assert_eq;

#[derive(Debug, Clone, PartialEq)]
struct Limits {
    min: i64,
    max: i64,
    label: String,
    samples: Vec<i64>,
}

inspect_by_properties!(Limits);

fn register() {
    declare_properties!(Limits => {
        min: i64,
        max: i64,
        label: String,
        samples,
    });
    Property::<Limits>::getter("span", |l| l.max - l.min).register();
    Property::<Limits>::getter_with_args("sample", |l, args| {
        let index = usize::try_from(args.first()?.clone()).ok()?;
        l.samples.get(index).copied()
    })
    .register();
}

fn limits() -> Limits {
    Limits {
        min: 5,
        max: 10,
        label: "cpu".to_owned(),
        samples: vec![6, 7, 12],
    }
}

fn bounds() -> Validator<'static> {
    validator![
        member("min").gte(0),
        member("max").gt(other_member("min")),
        member("label").length().lte(8),
    ]
}

// ============================================================================
// READING
// ============================================================================

#[test]
fn registered_members_are_validated() {
    register();
    let object = limits();
    assert!(bounds().check(&object).unwrap());
    assert!(member("span").eq(5).check(&object).unwrap());
    assert!(value().prop_with("sample", [1]).eq(7).check(&object).unwrap());
}

#[test]
fn wildcards_over_registered_containers() {
    register();
    let object = limits();
    let outcome = validate_report(&object, &member("samples").all().lte(10)).unwrap();
    assert_eq!(outcome.status, Status::Fail);
    assert_eq!(outcome.message(), Some("each element of samples must be less than or equal to 10"));
    assert!(member("samples").any().gt(10).check(&object).unwrap());
}

#[test]
fn property_names_are_sorted() {
    register();
    assert_eq!(
        property_names::<Limits>(),
        ["label", "max", "min", "sample", "samples", "span"]
    );
    assert!(is_registered::<Limits>("span"));
    assert!(!is_registered::<Limits>("nope"));
}

#[test]
fn snapshot_is_the_comparison_value() {
    register();
    let object = limits();
    let Value::Map(map) = object.value() else {
        panic!("expected a map");
    };
    assert_eq!(map.get("label"), Some(&Value::from("cpu")));
    assert_eq!(map.get("span"), Some(&Value::Int(5)));
    assert!(!map.contains_key("sample"));
}

// ============================================================================
// VALIDATED ASSIGNMENT
// ============================================================================

#[test]
fn set_validated_assigns_on_success() {
    register();
    let mut object = limits();
    set_validated(&mut object, "max", 20, &bounds()).unwrap();
    assert_eq!(object.max, 20);
}

#[test]
fn set_validated_leaves_object_on_failure() {
    register();
    let mut object = limits();
    let error = set_validated(&mut object, "max", 3, &bounds()).unwrap_err();
    assert_eq!(
        error.as_validation().map(|e| &*e.message),
        Some("max must be greater than min")
    );
    assert_eq!(object, limits());
}

#[test]
fn set_validated_ignores_other_members() {
    register();
    let mut object = limits();
    object.label = "far too long a label".to_owned();
    set_validated(&mut object, "min", 1, &bounds()).unwrap();
    assert_eq!(object.min, 1);
}

#[test]
fn set_validated_checks_property_keys() {
    register();
    let mut object = limits();
    let non_negative = value().prop("min").gte(0);

    let error = set_validated(&mut object, "min", -5, &non_negative).unwrap_err();
    assert!(error.as_validation().is_some());
    assert_eq!(object, limits());

    set_validated(&mut object, "min", 2, &non_negative).unwrap();
    assert_eq!(object.min, 2);
}

#[test]
fn set_validated_conversion_error_leaves_object() {
    register();
    let mut object = limits();
    let error = set_validated(&mut object, "max", "many", &validator![]).unwrap_err();
    assert!(matches!(error, Error::Conversion { .. }));
    assert_eq!(object, limits());
}

#[test]
fn set_validated_requires_setter() {
    register();
    let mut object = limits();
    let error = set_validated(&mut object, "span", 1, &validator![]).unwrap_err();
    assert!(matches!(error, Error::NoSetter { .. }));
    let error = set_validated(&mut object, "nope", 1, &validator![]).unwrap_err();
    assert!(matches!(error, Error::UnknownProperty { .. }));
}

#[test]
fn set_property_converts_first() {
    register();
    let mut object = limits();
    set_property(&mut object, "label", "gpu").unwrap();
    assert_eq!(object.label, "gpu");
    assert!(set_property(&mut object, "min", 1.5).is_err());
    assert_eq!(object.min, 5);
}
