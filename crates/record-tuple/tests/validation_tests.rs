//! Tests for Record/Tuple member validation

use pretty_assertions::assert_eq;
use record_tuple::*;

fn registry() -> Registry {
    Registry::native().unwrap()
}

fn noop_fn() -> Object {
    Object::function("noop", |_, _| Ok(Value::Undefined))
}

#[test]
fn test_primitives_pass_through_unchanged() {
    let registry = registry();
    let sym = Symbol::new(Some("s"));
    let primitives = [
        Value::Undefined,
        Value::Null,
        Value::Bool(false),
        Value::Number(-0.5),
        Value::bigint(1 << 80),
        Value::from(""),
        Value::Symbol(sym),
    ];
    for value in primitives {
        let out = registry.validate_property(value.clone()).unwrap();
        assert_eq!(out, value);
    }
}

#[test]
fn test_nan_passes_through() {
    let registry = registry();
    let out = registry.validate_property(Value::Number(f64::NAN)).unwrap();
    assert!(out.as_number().unwrap().is_nan());
}

#[test]
fn test_plain_object_is_rejected() {
    let registry = registry();
    let err = registry.validate_property(Value::new_object()).unwrap_err();
    assert!(matches!(
        err,
        RecordTupleError::NotRecordSafe { type_name: "object" }
    ));
}

#[test]
fn test_function_is_rejected() {
    let registry = registry();
    let err = registry.validate_property(Value::from(noop_fn())).unwrap_err();
    assert!(matches!(err, RecordTupleError::FunctionForbidden));
}

#[test]
fn test_tagged_objects_are_accepted() {
    let registry = registry();
    let record = Object::new();
    let tuple = Object::new();
    registry.mark_record(&record).unwrap();
    registry.mark_tuple(&tuple, 4).unwrap();

    let out = registry.validate_property(Value::from(&record)).unwrap();
    assert_eq!(out, Value::from(&record));
    let out = registry.validate_property(Value::from(&tuple)).unwrap();
    assert_eq!(out, Value::from(&tuple));
}

#[test]
fn test_box_is_accepted() {
    let registry = registry();
    let boxed = registry.box_value(Value::new_object()).unwrap();
    let out = registry.validate_property(Value::from(&boxed)).unwrap();
    assert_eq!(out, Value::from(boxed));
}

#[test]
fn test_boxing_a_function_makes_it_embeddable() {
    let registry = registry();
    let func = Value::from(noop_fn());
    let boxed = registry.box_value(func.clone()).unwrap();

    assert!(registry.validate_property(Value::from(&boxed)).is_ok());
    assert!(registry.validate_property(func).is_err());
}

#[test]
fn test_tagged_function_is_still_forbidden() {
    let registry = registry();
    let func = noop_fn();
    registry.mark_record(&func).unwrap();

    assert!(registry.is_record(&Value::from(&func)));
    assert_eq!(registry.classify(&Value::from(&func)), Classified::Function);
    assert!(matches!(
        registry.validate_property(Value::from(func)),
        Err(RecordTupleError::FunctionForbidden)
    ));
}

#[test]
fn test_validation_is_shallow() {
    let registry = registry();
    // A Record holding a plain object was never validated, but the Record
    // itself is still accepted: nested members are checked at their own
    // construction.
    let record = Object::from_entries([("inner", Value::new_object())]);
    registry.mark_record(&record).unwrap();
    assert!(registry.validate_property(Value::from(record)).is_ok());
}

#[test]
fn test_classify() {
    let registry = registry();
    let record = Object::new();
    let tuple = Object::new();
    registry.mark_record(&record).unwrap();
    registry.mark_tuple(&tuple, 2).unwrap();
    let boxed = registry.box_value(Value::new_object()).unwrap();

    assert_eq!(registry.classify(&Value::Null), Classified::Primitive);
    assert_eq!(registry.classify(&Value::from(record)), Classified::Record);
    assert_eq!(
        registry.classify(&Value::from(tuple)),
        Classified::Tuple { length: 2 }
    );
    assert_eq!(registry.classify(&Value::from(boxed)), Classified::Box);
    assert_eq!(registry.classify(&Value::new_object()), Classified::Object);
    assert_eq!(registry.classify(&Value::from(noop_fn())), Classified::Function);
}

#[test]
fn test_record_safety_of_classes() {
    assert!(Classified::Primitive.is_record_safe());
    assert!(Classified::Record.is_record_safe());
    assert!(Classified::Tuple { length: 0 }.is_record_safe());
    assert!(Classified::Box.is_record_safe());
    assert!(!Classified::Function.is_record_safe());
    assert!(!Classified::Object.is_record_safe());
}
