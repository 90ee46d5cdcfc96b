//! Value trait implementations: constructors, predicates, extractors, From traits, PartialEq

use std::sync::Arc;

use super::*;

// ═══════════════════════════════════════════════════════════════════
// Convenience Constructors
// ═══════════════════════════════════════════════════════════════════

impl Value {
    /// Create a string value
    pub fn string(s: impl AsRef<str>) -> Self {
        Value::String(Arc::from(s.as_ref()))
    }

    /// Create a bigint value
    pub fn bigint(n: i128) -> Self {
        Value::BigInt(n)
    }

    /// Create a fresh empty plain object value
    pub fn new_object() -> Self {
        Value::Object(Object::new())
    }

    // ═══════════════════════════════════════════════════════════════════
    // Type Predicates
    // ═══════════════════════════════════════════════════════════════════
    /// Check if value is `undefined`
    pub fn is_undefined(&self) -> bool {
        matches!(self, Value::Undefined)
    }

    /// Check if value is a primitive (anything without identity)
    pub fn is_primitive(&self) -> bool {
        !matches!(self, Value::Object(_))
    }

    /// Check if value is a non-callable object
    pub fn is_object(&self) -> bool {
        matches!(self, Value::Object(o) if !o.is_callable())
    }

    /// Check if value is callable
    pub fn is_function(&self) -> bool {
        matches!(self, Value::Object(o) if o.is_callable())
    }

    /// Check if value is a non-callable object with a callable `Symbol.iterator`
    pub fn is_iterable_object(&self) -> bool {
        matches!(self, Value::Object(o) if !o.is_callable() && o.is_iterable())
    }

    // ═══════════════════════════════════════════════════════════════════
    // Extractors (return Option for safe access)
    // ═══════════════════════════════════════════════════════════════════
    /// Extract number value
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Extract string slice
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Extract object handle (functions included)
    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Value::Object(o) => Some(o),
            _ => None,
        }
    }

    /// Object identity, or `None` for primitives
    pub fn identity(&self) -> Option<ObjectId> {
        self.as_object().map(Object::id)
    }
}

// ═══════════════════════════════════════════════════════════════════
// PartialEq Implementation
// ═══════════════════════════════════════════════════════════════════

/// Strict equality: primitives by value (so `NaN != NaN`), objects and
/// symbols by identity.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Undefined, Value::Undefined) => true,
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::BigInt(a), Value::BigInt(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Symbol(a), Value::Symbol(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════
// From Implementations
// ═══════════════════════════════════════════════════════════════════

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(n as f64)
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Number(n as f64)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(Arc::from(s))
    }
}

impl From<Symbol> for Value {
    fn from(s: Symbol) -> Self {
        Value::Symbol(s)
    }
}

impl From<Object> for Value {
    fn from(o: Object) -> Self {
        Value::Object(o)
    }
}

impl From<&Object> for Value {
    fn from(o: &Object) -> Self {
        Value::Object(o.clone())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Value::Undefined, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primitive_equality() {
        assert_eq!(Value::from(1), Value::Number(1.0));
        assert_ne!(Value::Number(f64::NAN), Value::Number(f64::NAN));
        assert_ne!(Value::Undefined, Value::Null);
        assert_eq!(Value::from("a"), Value::string("a"));
    }

    #[test]
    fn test_objects_compare_by_identity() {
        let a = Object::new();
        let b = Object::new();
        assert_eq!(Value::from(&a), Value::from(a.clone()));
        assert_ne!(Value::from(a), Value::from(b));
    }

    #[test]
    fn test_object_and_function_predicates() {
        let plain = Value::new_object();
        let func = Value::from(Object::function("f", |_, _| Ok(Value::Undefined)));

        assert!(plain.is_object());
        assert!(!plain.is_function());
        assert!(func.is_function());
        assert!(!func.is_object());
        assert!(Value::Null.is_primitive());
        assert!(!Value::Null.is_object());
    }

    #[test]
    fn test_iterable_object() {
        let iterable = Object::new();
        iterable
            .set(
                Symbol::iterator(),
                Value::from(Object::function("iter", |_, _| Ok(Value::Undefined))),
            )
            .unwrap();
        assert!(Value::from(iterable).is_iterable_object());

        let not_callable = Object::from_entries([(Symbol::iterator(), Value::from(1))]);
        assert!(!Value::from(not_callable).is_iterable_object());
        assert!(!Value::new_object().is_iterable_object());
    }

    #[test]
    fn test_option_conversion() {
        assert!(Value::from(None::<bool>).is_undefined());
        assert_eq!(Value::from(Some(true)), Value::Bool(true));
    }
}
