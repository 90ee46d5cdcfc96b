//! Tests for Record/Tuple tagging

use pretty_assertions::assert_eq;
use record_tuple::*;

fn registry() -> Registry {
    Registry::native().unwrap()
}

// ═══════════════════════════════════════════════════════════════════════
// Records
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_mark_record() {
    let registry = registry();
    let obj = Object::new();
    registry.mark_record(&obj).unwrap();

    let value = Value::from(&obj);
    assert!(registry.is_record(&value));
    assert!(!registry.is_tuple(&value));
    assert_eq!(registry.get_tuple_length(&value), None);
    assert_eq!(registry.tag_of(&value), Some(Tag::Record));
}

#[test]
fn test_mark_record_is_idempotent() {
    let registry = registry();
    let obj = Object::new();
    registry.mark_record(&obj).unwrap();
    registry.mark_record(&obj).unwrap();
    assert_eq!(registry.stats().records, 1);
}

#[test]
fn test_mark_record_leaves_properties_alone() {
    let registry = registry();
    let obj = Object::from_entries([("a", Value::from(1))]);
    registry.mark_record(&obj).unwrap();

    assert!(!obj.is_frozen());
    assert_eq!(obj.own_keys(), vec![PropertyKey::from("a")]);
    assert!(obj.set("a", Value::from(2)).unwrap());
}

#[test]
fn test_record_cannot_become_tuple() {
    let registry = registry();
    let obj = Object::new();
    registry.mark_record(&obj).unwrap();

    let err = registry.mark_tuple(&obj, 3).unwrap_err();
    assert!(matches!(
        err,
        RecordTupleError::AlreadyTagged {
            existing: Tag::Record,
            requested: Tag::Tuple { length: 3 },
        }
    ));
    assert!(registry.is_record(&Value::from(&obj)));
    assert!(!registry.is_tuple(&Value::from(&obj)));
}

// ═══════════════════════════════════════════════════════════════════════
// Tuples
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_mark_tuple() {
    let registry = registry();
    let obj = Object::new();
    registry.mark_tuple(&obj, 3).unwrap();

    let value = Value::from(&obj);
    assert!(registry.is_tuple(&value));
    assert!(!registry.is_record(&value));
    assert_eq!(registry.get_tuple_length(&value), Some(3));
}

#[test]
fn test_empty_tuple_has_length_zero() {
    let registry = registry();
    let obj = Object::new();
    registry.mark_tuple(&obj, 0).unwrap();
    assert_eq!(registry.get_tuple_length(&Value::from(obj)), Some(0));
}

#[test]
fn test_tuple_length_is_permanent() {
    let registry = registry();
    let obj = Object::new();
    registry.mark_tuple(&obj, 2).unwrap();
    registry.mark_tuple(&obj, 2).unwrap();

    assert!(registry.mark_tuple(&obj, 5).is_err());
    assert!(registry.mark_record(&obj).is_err());
    assert_eq!(registry.get_tuple_length(&Value::from(&obj)), Some(2));
}

// ═══════════════════════════════════════════════════════════════════════
// Total Predicates
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_predicates_are_total_over_primitives() {
    let registry = registry();
    let primitives = [
        Value::Undefined,
        Value::Null,
        Value::Bool(true),
        Value::Number(f64::NAN),
        Value::bigint(-1),
        Value::from("record"),
        Value::Symbol(Symbol::new(None)),
    ];
    for value in &primitives {
        assert!(!registry.is_record(value));
        assert!(!registry.is_tuple(value));
        assert_eq!(registry.get_tuple_length(value), None);
        assert_eq!(registry.tag_of(value), None);
    }
}

#[test]
fn test_untagged_objects() {
    let registry = registry();
    let plain = Value::new_object();
    let func = Value::from(Object::function("f", |_, _| Ok(Value::Undefined)));
    for value in [&plain, &func] {
        assert!(!registry.is_record(value));
        assert!(!registry.is_tuple(value));
        assert!(!registry.is_record_or_tuple(value));
    }
}

#[test]
fn test_tags_are_per_registry() {
    let first = registry();
    let second = registry();
    let obj = Object::new();
    first.mark_record(&obj).unwrap();

    assert!(first.is_record(&Value::from(&obj)));
    assert!(!second.is_record(&Value::from(&obj)));
}

// ═══════════════════════════════════════════════════════════════════════
// Reclamation
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_tags_do_not_keep_objects_alive() {
    let registry = Registry::new(RuntimeConfig::new().with_auto_reclaim(false)).unwrap();
    let obj = Object::new();
    let weak = obj.downgrade();
    registry.mark_record(&obj).unwrap();

    drop(obj);
    assert!(weak.upgrade().is_none());
    assert_eq!(registry.stats().pending, 1);

    assert_eq!(registry.reclaim(), 1);
    assert_eq!(registry.stats(), RegistryStats::default());
}

#[test]
fn test_live_tags_survive_reclaim() {
    let registry = registry();
    let kept = Object::new();
    registry.mark_tuple(&kept, 1).unwrap();
    {
        let temp = Object::new();
        registry.mark_record(&temp).unwrap();
    }
    registry.reclaim();
    assert_eq!(registry.get_tuple_length(&Value::from(&kept)), Some(1));
    assert_eq!(registry.stats().records, 0);
}
