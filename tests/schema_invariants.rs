//! Struct Invariant Tests
//!
//! Tests for struct validation invariants:
//! - Exhaustive structs reject undeclared fields
//! - Every declared field is checked
//! - Defaults are applied in place, exactly once
//! - Nested failures are chained through every struct boundary
//! - Validation is deterministic and idempotent

use std::sync::Arc;
use std::thread;

use serde_json::json;
use structcheck::builtin::{is_null, is_string};
use structcheck::{
    all_of, any_of, array_of, class_of, not, optional, optional_or, validate, validate_interface,
    Interface, Predicate, Struct, StructError, StructErrorCode, TypeTag, Validator,
    ValidatorConfig,
};

// =============================================================================
// Helper Functions
// =============================================================================

fn name_struct(exhaustive: bool) -> Struct {
    Struct::of("Test", Interface::new().field("name", "is_string"), exhaustive)
}

fn price_struct() -> Struct {
    Struct::new(
        "Price",
        Interface::new()
            .field("value", "is_float")
            .field("currency", "is_string"),
    )
}

fn event_struct() -> Struct {
    Struct::new(
        "Event",
        Interface::new()
            .field("id", all_of(["is_string", "is_numeric"]))
            .field("type", "is_string")
            .field("date", any_of([class_of(TypeTag::DateTime), is_null()]))
            .field("priceFrom", "is_float")
            .field("tickets", array_of(not("is_null")))
            .field("tagMap", array_of(array_of("is_string"))),
    )
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter("trace")
        .try_init();
}

// =============================================================================
// Exhaustiveness Tests
// =============================================================================

/// Declared fields only: passes.
#[test]
fn test_declared_fields_pass() {
    let mut record = json!({ "name": "toasty" });
    assert!(validate(&mut record, &name_struct(true)).is_ok());
}

/// Undeclared field in an exhaustive struct fails.
#[test]
fn test_undeclared_field_fails() {
    let mut record = json!({ "name": "toasty", "age": 10 });
    let err = validate(&mut record, &name_struct(true)).unwrap_err();

    assert_eq!(err.code(), StructErrorCode::StructValidationFailed);
    assert_eq!(
        err.root_cause(),
        &StructError::UnexpectedProperty(vec!["age".to_string()])
    );
    assert_eq!(
        err.to_string(),
        "Struct 'Test' failed validation: Unexpected property 'age'"
    );
}

/// Every undeclared field is reported.
#[test]
fn test_all_undeclared_fields_reported() {
    let mut record = json!({ "name": "toasty", "age": 10, "email": "t@example.com" });
    let err = validate(&mut record, &name_struct(true)).unwrap_err();
    assert_eq!(
        err.root_cause(),
        &StructError::UnexpectedProperty(vec!["age".to_string(), "email".to_string()])
    );
}

/// Non-exhaustive struct tolerates extra fields.
#[test]
fn test_non_exhaustive_allows_extra_fields() {
    let mut record = json!({ "name": "toasty", "age": 10 });
    assert!(validate(&mut record, &name_struct(false)).is_ok());
}

/// Raw interface passed directly behaves as a non-exhaustive struct.
#[test]
fn test_raw_interface_is_non_exhaustive() {
    let mut record = json!({ "name": "toasty", "age": 10 });
    assert!(validate_interface(&mut record, Interface::new().field("name", "is_string")).is_ok());

    let mut record = json!({ "name": 10 });
    let err = validate_interface(&mut record, Interface::new().field("name", "is_string"))
        .unwrap_err();
    assert_eq!(err.struct_name(), Some("Struct"));
}

// =============================================================================
// Field Rule Tests
// =============================================================================

/// Missing field handed to a plain predicate is an invalid value.
#[test]
fn test_missing_field_is_invalid_value() {
    let mut record = json!({});
    let err = validate(&mut record, &name_struct(true)).unwrap_err();
    assert_eq!(err.root_cause(), &StructError::invalid_value("name"));
}

/// Wrong type fails.
#[test]
fn test_wrong_type_fails() {
    let mut record = json!({ "name": 10 });
    let err = validate(&mut record, &name_struct(true)).unwrap_err();
    assert_eq!(err.root_cause().field(), Some("name"));
}

/// A rule that is not a predicate, struct or interface fails at validation.
#[test]
fn test_invalid_rule_detected_at_validation() {
    let schema = Struct::new("Test", Interface::new().field("name", "invalid validator"));
    let mut record = json!({ "name": "toasty" });
    let err = validate(&mut record, &schema).unwrap_err();
    assert_eq!(err.root_cause().code(), StructErrorCode::InvalidRule);
}

/// Only the second of two fields is invalid: the record must fail.
#[test]
fn test_every_field_is_checked() {
    let schema = Struct::new(
        "Pair",
        Interface::new()
            .field("first", "is_string")
            .field("second", "is_string"),
    );

    let mut record = json!({ "first": "fine", "second": 2 });
    let err = validate(&mut record, &schema).unwrap_err();
    assert_eq!(err.root_cause(), &StructError::invalid_value("second"));

    let mut record = json!({ "first": "fine" });
    assert!(validate(&mut record, &schema).is_err());
}

/// Full event record passes.
#[test]
fn test_event_record_passes() {
    let mut record = json!({
        "id": "123",
        "type": "theatre",
        "date": "2020-02-02T19:30:00+00:00",
        "priceFrom": 20.5,
        "tickets": ["General", 10],
        "tagMap": [["family", "kids"], ["gig", "club"]]
    });
    assert!(validate(&mut record, &event_struct()).is_ok());
}

/// Event records each broken in a single field fail on that field.
#[test]
fn test_event_record_failures() {
    let base = json!({
        "id": "123",
        "type": "theatre",
        "date": null,
        "priceFrom": 20.5,
        "tickets": [],
        "tagMap": []
    });

    let cases = [
        ("tagMap", json!(["family", "kids"])),
        ("date", json!("02-02-2020")),
        ("id", json!("abc")),
        ("type", json!(null)),
        ("tickets", json!(["General", null])),
    ];

    for (field, bad) in cases {
        let mut record = base.clone();
        record[field] = bad;
        let err = validate(&mut record, &event_struct()).unwrap_err();
        assert_eq!(err.root_cause().field(), Some(field), "case {}", field);
    }
}

// =============================================================================
// Default Value Tests
// =============================================================================

/// Default is written into the record.
#[test]
fn test_default_applied() {
    let schema = Struct::new(
        "Aussie",
        Interface::new()
            .field("name", "is_string")
            .field("worries", optional_or("is_string", "no")),
    );

    let mut record = json!({ "name": "Brenton" });
    validate(&mut record, &schema).unwrap();
    assert_eq!(record["worries"], json!("no"));
}

/// Default-only struct fills an empty record.
#[test]
fn test_default_fills_empty_record() {
    let schema = Struct::new("Mood", Interface::new().field("worries", optional_or("is_string", "no")));
    let mut record = json!({});
    validate(&mut record, &schema).unwrap();
    assert_eq!(record, json!({ "worries": "no" }));
}

/// Present value is never overwritten by the default.
#[test]
fn test_present_value_kept() {
    let schema = Struct::new("Mood", Interface::new().field("worries", optional_or("is_string", "no")));
    let mut record = json!({ "worries": "some" });
    validate(&mut record, &schema).unwrap();
    assert_eq!(record, json!({ "worries": "some" }));
}

/// Optional field without a default stays absent.
#[test]
fn test_optional_without_default_stays_absent() {
    let schema = Struct::new("Opt", Interface::new().field("nick", optional(is_string())));
    let mut record = json!({});
    validate(&mut record, &schema).unwrap();
    assert!(record.get("nick").is_none());
}

/// Defaults inside array elements reach the record.
#[test]
fn test_defaults_inside_arrays() {
    let paragraph = Struct::new(
        "Paragraph",
        Interface::new()
            .field("header", "is_string")
            .field("line", not("is_null"))
            .field("style", optional_or("is_string", "plain")),
    );
    let directory = Struct::new(
        "Directory",
        Interface::new().field("content", array_of(paragraph)),
    );

    let mut record = json!({ "content": [{ "header": "Greeting", "line": "Hello" }] });
    validate(&mut record, &directory).unwrap();
    assert_eq!(record["content"][0]["style"], json!("plain"));
}

// =============================================================================
// Nesting Tests
// =============================================================================

/// Valid nested struct passes.
#[test]
fn test_nested_struct_passes() {
    let schema = Struct::new("Event", Interface::new().field("price", price_struct()));
    let mut record = json!({ "price": { "value": 20.5, "currency": "GBP" } });
    assert!(validate(&mut record, &schema).is_ok());
}

/// Invalid nested struct yields a two-level chain.
#[test]
fn test_nested_struct_chain() {
    let schema = Struct::new("Event", Interface::new().field("price", price_struct()));
    let mut record = json!({ "price": { "value": "bad" } });
    let err = validate(&mut record, &schema).unwrap_err();

    assert_eq!(err.chain(), vec!["Event", "Price"]);
    let message = err.to_string();
    assert!(message.contains("Event"));
    assert!(message.contains("Price"));
    assert_eq!(err.root_cause(), &StructError::invalid_value("value"));
}

/// Three levels deep, every struct name appears in order.
#[test]
fn test_three_level_chain() {
    let inner = Struct::new("Inner", Interface::new().field("leaf", "is_int"));
    let middle = Struct::new("Middle", Interface::new().field("inner", inner));
    let outer = Struct::new("Outer", Interface::new().field("middle", middle));

    let mut record = json!({ "middle": { "inner": { "leaf": "x" } } });
    let err = validate(&mut record, &outer).unwrap_err();

    assert_eq!(err.chain(), vec!["Outer", "Middle", "Inner"]);
    assert_eq!(
        err.to_string(),
        "Struct 'Outer' failed validation: Invalid value for property 'middle': \
         Struct 'Middle' failed validation: Invalid value for property 'inner': \
         Struct 'Inner' failed validation: Invalid value for property 'leaf'"
    );
}

/// Absent nested struct field never defaults.
#[test]
fn test_nested_struct_missing() {
    let schema = Struct::new("Event", Interface::new().field("price", price_struct()));
    let mut record = json!({});
    let err = validate(&mut record, &schema).unwrap_err();
    assert_eq!(err.root_cause().code(), StructErrorCode::MissingProperty);
    assert_eq!(
        err.to_string(),
        "Struct 'Event' failed validation: Missing value for property: 'price'"
    );
}

/// Raw interface used as a field rule is a non-exhaustive nested struct.
#[test]
fn test_raw_interface_field_rule() {
    let schema = Struct::new(
        "Event",
        Interface::new().field("price", Interface::new().field("value", "is_float")),
    );
    let mut record = json!({ "price": { "value": 20.5, "currency": "GBP" } });
    assert!(validate(&mut record, &schema).is_ok());
}

// =============================================================================
// Custom Predicate Tests
// =============================================================================

/// Custom predicate returning false is an invalid value.
#[test]
fn test_custom_predicate_false() {
    let body = Predicate::from_fn(|v| ["hello", "hi", "hey"].iter().any(|g| v == *g));
    let schema = Struct::new(
        "Message",
        Interface::new()
            .field("subject", "is_string")
            .field("body", body),
    );

    let mut record = json!({ "subject": "Greetings", "body": "hi" });
    assert!(validate(&mut record, &schema).is_ok());

    let mut record = json!({ "subject": "Greetings", "body": "yo" });
    let err = validate(&mut record, &schema).unwrap_err();
    assert_eq!(err.root_cause(), &StructError::invalid_value("body"));
}

/// Custom domain error is the cause of the top-level failure.
#[test]
fn test_custom_predicate_error() {
    let body = Predicate::try_from_fn(|v| {
        if v == "hello" {
            Ok(true)
        } else {
            Err("Greeting body must be one of: hello, hi, hey".to_string())
        }
    });
    let schema = Struct::new("Message", Interface::new().field("body", body));

    let mut record = json!({ "body": "yo" });
    let err = validate(&mut record, &schema).unwrap_err();
    assert_eq!(err.struct_name(), Some("Message"));
    assert_eq!(
        err.root_cause(),
        &StructError::rejected("Greeting body must be one of: hello, hi, hey")
    );
}

// =============================================================================
// Determinism Tests
// =============================================================================

/// Same record validates the same way every time.
#[test]
fn test_validation_is_deterministic() {
    let schema = event_struct();
    let record = json!({
        "id": "abc",
        "type": "sport",
        "date": null,
        "priceFrom": 20.5,
        "tickets": [],
        "tagMap": []
    });

    let first = validate(&mut record.clone(), &schema).unwrap_err();
    for _ in 0..100 {
        let again = validate(&mut record.clone(), &schema).unwrap_err();
        assert_eq!(first, again);
    }
}

/// Validating an already valid record twice changes nothing.
#[test]
fn test_validation_is_idempotent() {
    let schema = Struct::new(
        "Aussie",
        Interface::new()
            .field("name", "is_string")
            .field("worries", optional_or("is_string", "no")),
    );

    let mut record = json!({ "name": "Brenton", "worries": "plenty" });
    validate(&mut record, &schema).unwrap();
    let after_first = record.clone();
    validate(&mut record, &schema).unwrap();
    assert_eq!(record, after_first);
}

/// One struct can validate records on many threads.
#[test]
fn test_struct_shared_across_threads() {
    let schema = Arc::new(event_struct());

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let schema = Arc::clone(&schema);
            thread::spawn(move || {
                let mut record = json!({
                    "id": i.to_string(),
                    "type": "theatre",
                    "date": null,
                    "priceFrom": 20.5,
                    "tickets": [i],
                    "tagMap": []
                });
                validate(&mut record, &schema).is_ok()
            })
        })
        .collect();

    for handle in handles {
        assert!(handle.join().unwrap());
    }
}

// =============================================================================
// Observability Tests
// =============================================================================

/// Logging at every level does not change outcomes.
#[test]
fn test_logging_does_not_affect_results() {
    init_tracing();

    let schema = Struct::new(
        "Aussie",
        Interface::new()
            .field("name", "is_string")
            .field("worries", optional_or("is_string", "no")),
    );

    let quiet = Validator::new(ValidatorConfig::quiet());
    let loud = Validator::new(ValidatorConfig::loud());

    let mut a = json!({ "name": "Brenton" });
    let mut b = a.clone();
    quiet.validate(&mut a, &schema).unwrap();
    loud.validate(&mut b, &schema).unwrap();
    assert_eq!(a, b);

    let mut bad = json!({ "name": 1 });
    let quiet_err = quiet.validate(&mut bad.clone(), &schema).unwrap_err();
    let loud_err = loud.validate(&mut bad, &schema).unwrap_err();
    assert_eq!(quiet_err, loud_err);
}
