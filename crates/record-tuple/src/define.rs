//! Batch installation of data and accessor properties

use indexmap::IndexMap;

use crate::error::Result;
use crate::value::property::own_key_order;
use crate::value::{Object, Property, PropertyKey, Value};

/// One property to install: either a plain value or a getter/setter pair.
#[derive(Debug, Clone, Default)]
pub struct PropertySpec {
    /// Value for a data property
    pub value: Option<Value>,

    /// Getter for an accessor property
    pub get: Option<Object>,

    /// Setter for an accessor property
    pub set: Option<Object>,
}

impl PropertySpec {
    /// A data property holding `value`
    pub fn value(value: impl Into<Value>) -> Self {
        Self {
            value: Some(value.into()),
            ..Default::default()
        }
    }

    /// An accessor property with only a getter
    pub fn getter(get: Object) -> Self {
        Self {
            get: Some(get),
            ..Default::default()
        }
    }

    /// An accessor property with a getter and a setter
    pub fn accessor(get: Object, set: Object) -> Self {
        Self {
            get: Some(get),
            set: Some(set),
            ..Default::default()
        }
    }

    /// Add a setter (builder pattern)
    pub fn with_setter(mut self, set: Object) -> Self {
        self.set = Some(set);
        self
    }

    /// Check if this spec describes an accessor
    pub fn is_accessor(&self) -> bool {
        self.get.is_some() || self.set.is_some()
    }

    /// The slot this spec installs. Data slots are writable and
    /// configurable, accessors configurable; neither is enumerable.
    fn to_property(&self) -> Property {
        if self.is_accessor() {
            Property::Accessor {
                get: self.get.clone(),
                set: self.set.clone(),
                enumerable: false,
                configurable: true,
            }
        } else {
            Property::Data {
                value: self.value.clone().unwrap_or(Value::Undefined),
                writable: true,
                enumerable: false,
                configurable: true,
            }
        }
    }
}

/// An ordered set of property specs, keyed by string or symbol.
#[derive(Debug, Clone, Default)]
pub struct PropertySpecs {
    entries: IndexMap<PropertyKey, PropertySpec>,
}

impl PropertySpecs {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a spec (builder pattern). A repeated key replaces the earlier spec.
    pub fn with(mut self, key: impl Into<PropertyKey>, spec: PropertySpec) -> Self {
        self.insert(key, spec);
        self
    }

    /// Add a spec
    pub fn insert(&mut self, key: impl Into<PropertyKey>, spec: PropertySpec) {
        self.entries.insert(key.into(), spec);
    }

    /// Look up a spec by key
    pub fn get(&self, key: &PropertyKey) -> Option<&PropertySpec> {
        self.entries.get(key)
    }

    /// Keys in own-key enumeration order
    pub fn keys(&self) -> Vec<PropertyKey> {
        own_key_order(self.entries.keys())
    }

    /// Number of specs
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if there are no specs
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<PropertyKey>> FromIterator<(K, PropertySpec)> for PropertySpecs {
    fn from_iter<I: IntoIterator<Item = (K, PropertySpec)>>(iter: I) -> Self {
        let mut specs = PropertySpecs::new();
        for (key, spec) in iter {
            specs.insert(key, spec);
        }
        specs
    }
}

/// Install every spec on `target`, in own-key order.
///
/// Stops at the first definition the target refuses (a frozen target or an
/// existing non-configurable property); earlier definitions stay applied.
///
/// # Example
///
/// ```
/// use record_tuple::{define, Object, PropertySpec, PropertySpecs, Value};
///
/// let target = Object::new();
/// define(&target, &PropertySpecs::new().with("a", PropertySpec::value(1))).unwrap();
///
/// assert_eq!(target.get("a").unwrap(), Value::from(1));
/// assert!(target.keys().is_empty());
/// ```
pub fn define(target: &Object, specs: &PropertySpecs) -> Result<()> {
    for key in specs.keys() {
        if let Some(spec) = specs.get(&key) {
            target.define_own_property(key, spec.to_property())?;
        }
    }
    Ok(())
}
