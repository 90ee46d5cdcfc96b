//! Error types for Record/Tuple construction and lookup

use thiserror::Error;

use crate::features::Capability;
use crate::registry::Tag;
use crate::value::{PropertyKey, Value};

/// Main error type for Record/Tuple operations
#[derive(Error, Debug)]
pub enum RecordTupleError {
    /// The host lacks one of the weak-reference primitives the registry needs
    #[error(
        "WeakMap, WeakRef, and FinalizationRegistry are required for record-tuple (missing: {})",
        list_capabilities(.missing)
    )]
    UnsupportedEnvironment {
        /// Capabilities that were reported absent
        missing: Vec<Capability>,
    },

    /// A plain object was offered as a Record/Tuple member
    #[error("TypeError: cannot use an object as a value in a record (got {type_name})")]
    NotRecordSafe {
        /// Kind of the rejected value
        type_name: &'static str,
    },

    /// A callable was offered as a Record/Tuple member
    #[error("TypeError: cannot use a function as a value in a record")]
    FunctionForbidden,

    /// `unbox_box` was called on something that is not a registered box
    #[error("unboxBox: invalid argument")]
    InvalidBoxArgument,

    /// An object was tagged a second time with a different classification
    #[error("object is already tagged as {existing}, cannot re-tag as {requested}")]
    AlreadyTagged {
        /// Tag currently held by the object
        existing: Tag,
        /// Tag that was requested
        requested: Tag,
    },

    /// A box registration would break the one-to-one association
    #[error("cannot register box: {0}")]
    BoxConflict(BoxConflict),

    /// The target object refused a property definition
    #[error("cannot define property {key}: {reason}")]
    PropertyDefinition {
        /// Key being defined
        key: PropertyKey,
        /// Why the target refused it
        reason: &'static str,
    },

    /// A non-callable object was called
    #[error("TypeError: {0} is not a function")]
    NotCallable(&'static str),

    /// A native callable reported a failure
    #[error("uncaught exception: {0}")]
    Thrown(String),

    /// Runtime configuration could not be parsed
    #[error("invalid runtime configuration: {0}")]
    Config(#[from] serde_json::Error),
}

/// Ways `mark_box` can violate the box/value bijection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoxConflict {
    /// The box object already wraps a different value
    BoxAlreadyRegistered,
    /// The value already has a different canonical box
    ValueAlreadyBoxed,
    /// Primitives have no identity and cannot be boxed
    PrimitiveValue,
    /// An object cannot box itself
    SelfReference,
}

impl std::fmt::Display for BoxConflict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let msg = match self {
            BoxConflict::BoxAlreadyRegistered => "box already wraps another value",
            BoxConflict::ValueAlreadyBoxed => "value already has a canonical box",
            BoxConflict::PrimitiveValue => "primitive values have no identity to preserve",
            BoxConflict::SelfReference => "an object cannot box itself",
        };
        f.write_str(msg)
    }
}

fn list_capabilities(missing: &[Capability]) -> String {
    missing
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Get the runtime kind name of a value, as used in error messages
pub fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Undefined => "undefined",
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::BigInt(_) => "bigint",
        Value::String(_) => "string",
        Value::Symbol(_) => "symbol",
        Value::Object(o) if o.is_callable() => "function",
        Value::Object(_) => "object",
    }
}

/// Result type alias for Record/Tuple operations
pub type Result<T> = std::result::Result<T, RecordTupleError>;
