//! Property keys and property slots

use std::fmt;
use std::sync::Arc;

use super::{Object, Symbol, Value};

/// A property key: either a string or a symbol.
#[derive(Clone, PartialEq, Eq, Hash)]
pub enum PropertyKey {
    /// String-keyed property
    String(Arc<str>),

    /// Symbol-keyed property
    Symbol(Symbol),
}

impl PropertyKey {
    /// Interpret the key as an array index (`"0"`, `"1"`, ... up to 2^32 - 2).
    ///
    /// Only canonical spellings count, so `"01"` and `"+1"` are plain strings.
    pub fn as_array_index(&self) -> Option<u32> {
        let PropertyKey::String(s) = self else {
            return None;
        };
        if s.is_empty() || (s.len() > 1 && s.starts_with('0')) {
            return None;
        }
        if !s.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        s.parse::<u32>().ok().filter(|&n| n != u32::MAX)
    }

    /// Check if this is a symbol key
    pub fn is_symbol(&self) -> bool {
        matches!(self, PropertyKey::Symbol(_))
    }

    /// Extract string key
    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropertyKey::String(s) => Some(s),
            PropertyKey::Symbol(_) => None,
        }
    }
}

/// Order keys the way own-key enumeration reports them: array indices
/// ascending, then remaining strings in insertion order, then symbols in
/// insertion order.
pub(crate) fn own_key_order<'a>(keys: impl Iterator<Item = &'a PropertyKey>) -> Vec<PropertyKey> {
    let mut indices = Vec::new();
    let mut strings = Vec::new();
    let mut symbols = Vec::new();
    for key in keys {
        match (key.as_array_index(), key) {
            (Some(index), _) => indices.push((index, key.clone())),
            (None, PropertyKey::String(_)) => strings.push(key.clone()),
            (None, PropertyKey::Symbol(_)) => symbols.push(key.clone()),
        }
    }
    indices.sort_by_key(|(index, _)| *index);
    indices
        .into_iter()
        .map(|(_, key)| key)
        .chain(strings)
        .chain(symbols)
        .collect()
}

impl From<&str> for PropertyKey {
    fn from(s: &str) -> Self {
        PropertyKey::String(Arc::from(s))
    }
}

impl From<String> for PropertyKey {
    fn from(s: String) -> Self {
        PropertyKey::String(Arc::from(s))
    }
}

impl From<Symbol> for PropertyKey {
    fn from(s: Symbol) -> Self {
        PropertyKey::Symbol(s)
    }
}

impl From<usize> for PropertyKey {
    fn from(index: usize) -> Self {
        PropertyKey::String(Arc::from(index.to_string()))
    }
}

impl fmt::Debug for PropertyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyKey::String(s) => write!(f, "{:?}", s.as_ref()),
            PropertyKey::Symbol(s) => write!(f, "{:?}", s),
        }
    }
}

impl fmt::Display for PropertyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyKey::String(s) => f.write_str(s),
            PropertyKey::Symbol(s) => write!(f, "[{:?}]", s),
        }
    }
}

/// An own property slot of an object.
#[derive(Debug, Clone)]
pub enum Property {
    /// A slot holding a value directly
    Data {
        /// Stored value
        value: Value,
        /// Whether assignment may replace the value
        writable: bool,
        /// Whether the key shows up in `Object::keys`
        enumerable: bool,
        /// Whether the slot may be redefined
        configurable: bool,
    },

    /// A slot backed by getter/setter functions, with no storage of its own
    Accessor {
        /// Called on reads
        get: Option<Object>,
        /// Called on assignment
        set: Option<Object>,
        /// Whether the key shows up in `Object::keys`
        enumerable: bool,
        /// Whether the slot may be redefined
        configurable: bool,
    },
}

impl Property {
    /// A data property as created by plain assignment (all flags set)
    pub fn data(value: Value) -> Self {
        Property::Data {
            value,
            writable: true,
            enumerable: true,
            configurable: true,
        }
    }

    /// Check if the property shows up in enumeration
    pub fn is_enumerable(&self) -> bool {
        match self {
            Property::Data { enumerable, .. } | Property::Accessor { enumerable, .. } => {
                *enumerable
            }
        }
    }

    /// Check if the property may be redefined or deleted
    pub fn is_configurable(&self) -> bool {
        match self {
            Property::Data { configurable, .. } | Property::Accessor { configurable, .. } => {
                *configurable
            }
        }
    }

    /// Check if the property is a writable data slot
    pub fn is_writable(&self) -> bool {
        matches!(self, Property::Data { writable: true, .. })
    }

    /// Check if the property is an accessor
    pub fn is_accessor(&self) -> bool {
        matches!(self, Property::Accessor { .. })
    }

    /// The stored value of a data property
    pub fn value(&self) -> Option<&Value> {
        match self {
            Property::Data { value, .. } => Some(value),
            Property::Accessor { .. } => None,
        }
    }
}
