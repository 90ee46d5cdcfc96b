//! Member validation for Record/Tuple construction

use log::trace;

use super::{Registry, Tag};
use crate::error::{type_name, RecordTupleError, Result};
use crate::value::Value;

/// What a value is, from the point of view of embedding it in a Record or
/// Tuple.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classified {
    /// Anything without identity
    Primitive,
    /// A tagged Record
    Record,
    /// A tagged Tuple
    Tuple {
        /// Recorded length
        length: usize,
    },
    /// A registered box
    Box,
    /// A callable object
    Function,
    /// Any other object
    Object,
}

impl Classified {
    /// Check if values of this class may be embedded
    pub fn is_record_safe(self) -> bool {
        match self {
            Classified::Primitive
            | Classified::Record
            | Classified::Tuple { .. }
            | Classified::Box => true,
            Classified::Function | Classified::Object => false,
        }
    }
}

impl Registry {
    /// Classify a value. Callables are always `Function`, whatever tables
    /// they appear in.
    pub fn classify(&self, value: &Value) -> Classified {
        let Value::Object(object) = value else {
            return Classified::Primitive;
        };
        if object.is_callable() {
            return Classified::Function;
        }
        match self.tags.get(object.id()) {
            Some(Tag::Record) => Classified::Record,
            Some(Tag::Tuple { length }) => Classified::Tuple { length },
            None if self.boxes.contains_box(object.id()) => Classified::Box,
            None => Classified::Object,
        }
    }

    /// Check a single candidate member and hand it back unchanged if it may
    /// be embedded in a Record or Tuple.
    ///
    /// The check is shallow: nested Records and Tuples were validated when
    /// they were built.
    ///
    /// # Example
    ///
    /// ```
    /// use record_tuple::{Object, Registry, RecordTupleError, Value};
    ///
    /// let registry = Registry::native().unwrap();
    ///
    /// assert_eq!(registry.validate_property(Value::from(1)).unwrap(), Value::from(1));
    /// assert!(matches!(
    ///     registry.validate_property(Value::new_object()),
    ///     Err(RecordTupleError::NotRecordSafe { .. })
    /// ));
    /// ```
    pub fn validate_property(&self, value: Value) -> Result<Value> {
        let class = self.classify(&value);
        trace!("validating {:?} as {:?}", value, class);
        match class {
            Classified::Primitive
            | Classified::Record
            | Classified::Tuple { .. }
            | Classified::Box => Ok(value),
            Classified::Function => Err(RecordTupleError::FunctionForbidden),
            Classified::Object => Err(RecordTupleError::NotRecordSafe {
                type_name: type_name(&value),
            }),
        }
    }
}
