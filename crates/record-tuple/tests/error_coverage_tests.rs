// Coverage tests for error module
use record_tuple::error::type_name;
use record_tuple::*;

// ═══════════════════════════════════════════════════════════════════════
// type_name Coverage
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_type_name_primitives() {
    assert_eq!(type_name(&Value::Undefined), "undefined");
    assert_eq!(type_name(&Value::Null), "null");
    assert_eq!(type_name(&Value::Bool(true)), "boolean");
    assert_eq!(type_name(&Value::Number(1.0)), "number");
    assert_eq!(type_name(&Value::bigint(1)), "bigint");
    assert_eq!(type_name(&Value::from("s")), "string");
    assert_eq!(type_name(&Value::Symbol(Symbol::new(None))), "symbol");
}

#[test]
fn test_type_name_objects() {
    assert_eq!(type_name(&Value::new_object()), "object");
    let f = Object::function("f", |_, _| Ok(Value::Undefined));
    assert_eq!(type_name(&Value::from(f)), "function");
}

// ═══════════════════════════════════════════════════════════════════════
// Display Coverage
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_validation_messages() {
    let err = RecordTupleError::NotRecordSafe { type_name: "object" };
    assert_eq!(
        err.to_string(),
        "TypeError: cannot use an object as a value in a record (got object)"
    );
    assert_eq!(
        RecordTupleError::FunctionForbidden.to_string(),
        "TypeError: cannot use a function as a value in a record"
    );
}

#[test]
fn test_box_messages() {
    assert_eq!(
        RecordTupleError::InvalidBoxArgument.to_string(),
        "unboxBox: invalid argument"
    );
    assert_eq!(
        RecordTupleError::BoxConflict(BoxConflict::ValueAlreadyBoxed).to_string(),
        "cannot register box: value already has a canonical box"
    );
}

#[test]
fn test_tag_message() {
    let err = RecordTupleError::AlreadyTagged {
        existing: Tag::Tuple { length: 2 },
        requested: Tag::Record,
    };
    assert_eq!(
        err.to_string(),
        "object is already tagged as Tuple(length 2), cannot re-tag as Record"
    );
}

#[test]
fn test_property_definition_message() {
    let err = RecordTupleError::PropertyDefinition {
        key: PropertyKey::from("a"),
        reason: "object is not extensible",
    };
    assert_eq!(err.to_string(), "cannot define property a: object is not extensible");
}
