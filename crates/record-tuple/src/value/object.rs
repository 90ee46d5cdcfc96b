//! Identity-carrying host objects

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use indexmap::IndexMap;
use parking_lot::{Mutex, RwLock};

use super::property::own_key_order;
use super::{NativeFn, Property, PropertyKey, Symbol, Value};
use crate::error::{RecordTupleError, Result};

static NEXT_OBJECT_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique object identity. Ids are never reused, so a side table
/// keyed by `ObjectId` can never confuse a dropped object with a new one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(u64);

impl ObjectId {
    fn next() -> Self {
        ObjectId(NEXT_OBJECT_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Cleanup callback run when an object is dropped.
pub type Finalizer = Box<dyn FnOnce(ObjectId) + Send>;

struct ObjectCell {
    id: ObjectId,
    properties: RwLock<IndexMap<PropertyKey, Property>>,
    extensible: AtomicBool,
    call: Option<NativeFn>,
    finalizers: Mutex<Vec<Finalizer>>,
}

impl Drop for ObjectCell {
    fn drop(&mut self) {
        let id = self.id;
        for finalizer in self.finalizers.get_mut().drain(..) {
            finalizer(id);
        }
    }
}

/// A shared handle to a host object.
///
/// Cloning the handle shares the object; equality is identity.
#[derive(Clone)]
pub struct Object(Arc<ObjectCell>);

/// A non-owning handle to an object.
#[derive(Clone)]
pub struct WeakObject {
    id: ObjectId,
    cell: Weak<ObjectCell>,
}

impl WeakObject {
    /// Identity of the referenced object (valid even after it is dropped)
    pub fn id(&self) -> ObjectId {
        self.id
    }

    /// Recover a strong handle if the object is still alive
    pub fn upgrade(&self) -> Option<Object> {
        self.cell.upgrade().map(Object)
    }

    /// Check if the object is still alive
    pub fn is_alive(&self) -> bool {
        self.cell.strong_count() > 0
    }
}

impl fmt::Debug for WeakObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WeakObject({})", self.id)
    }
}

impl Default for Object {
    fn default() -> Self {
        Self::new()
    }
}

impl Object {
    /// Create a new, empty, extensible plain object
    pub fn new() -> Self {
        Self::with_call(None)
    }

    pub(super) fn with_call(call: Option<NativeFn>) -> Self {
        Object(Arc::new(ObjectCell {
            id: ObjectId::next(),
            properties: RwLock::new(IndexMap::new()),
            extensible: AtomicBool::new(true),
            call,
            finalizers: Mutex::new(Vec::new()),
        }))
    }

    /// Build a plain object from key/value pairs. Later duplicates overwrite
    /// earlier ones; every property is a plain enumerable data property.
    pub fn from_entries<K, I>(entries: I) -> Self
    where
        K: Into<PropertyKey>,
        I: IntoIterator<Item = (K, Value)>,
    {
        let object = Object::new();
        {
            let mut properties = object.0.properties.write();
            for (key, value) in entries {
                properties.insert(key.into(), Property::data(value));
            }
        }
        object
    }

    /// Identity of this object
    pub fn id(&self) -> ObjectId {
        self.0.id
    }

    /// Check if two handles refer to the same object
    pub fn ptr_eq(&self, other: &Object) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// Create a non-owning handle
    pub fn downgrade(&self) -> WeakObject {
        WeakObject {
            id: self.0.id,
            cell: Arc::downgrade(&self.0),
        }
    }

    /// Register a callback that runs once this object is dropped
    pub fn on_drop(&self, finalizer: impl FnOnce(ObjectId) + Send + 'static) {
        self.0.finalizers.lock().push(Box::new(finalizer));
    }

    // ═══════════════════════════════════════════════════════════════════
    // Calls
    // ═══════════════════════════════════════════════════════════════════

    /// Check if the object has a call behaviour
    pub fn is_callable(&self) -> bool {
        self.0.call.is_some()
    }

    /// Name of the function, if callable
    pub fn function_name(&self) -> Option<&str> {
        self.0.call.as_ref().map(|c| c.name.as_ref())
    }

    /// Call the object with an explicit receiver
    pub fn call(&self, this: &Value, args: &[Value]) -> Result<Value> {
        match &self.0.call {
            Some(native) => native.call(this, args),
            None => Err(RecordTupleError::NotCallable("object")),
        }
    }

    // ═══════════════════════════════════════════════════════════════════
    // Property Access
    // ═══════════════════════════════════════════════════════════════════

    /// Look up an own property slot
    pub fn get_own_property(&self, key: &PropertyKey) -> Option<Property> {
        self.0.properties.read().get(key).cloned()
    }

    /// Check if an own property exists
    pub fn has_own_property(&self, key: &PropertyKey) -> bool {
        self.0.properties.read().contains_key(key)
    }

    /// Read a property, running its getter if it is an accessor.
    /// Missing properties read as `undefined`.
    pub fn get(&self, key: impl Into<PropertyKey>) -> Result<Value> {
        let key = key.into();
        let getter = match self.get_own_property(&key) {
            None => return Ok(Value::Undefined),
            Some(Property::Data { value, .. }) => return Ok(value),
            Some(Property::Accessor { get, .. }) => get,
        };
        match getter {
            Some(getter) => getter.call(&Value::Object(self.clone()), &[]),
            None => Ok(Value::Undefined),
        }
    }

    /// Assign a property.
    ///
    /// Returns `Ok(false)` without changing anything when the assignment is
    /// refused: a non-writable data slot, an accessor with no setter, or a
    /// new key on a non-extensible object.
    pub fn set(&self, key: impl Into<PropertyKey>, value: Value) -> Result<bool> {
        let key = key.into();
        let mut properties = self.0.properties.write();
        let setter = match properties.get_mut(&key) {
            Some(Property::Data {
                value: slot,
                writable,
                ..
            }) => {
                if !*writable {
                    return Ok(false);
                }
                *slot = value;
                return Ok(true);
            }
            Some(Property::Accessor { set, .. }) => set.clone(),
            None => {
                if !self.is_extensible() {
                    return Ok(false);
                }
                properties.insert(key, Property::data(value));
                return Ok(true);
            }
        };
        // Setters may touch this object again; release the lock first.
        drop(properties);
        match setter {
            Some(setter) => {
                setter.call(&Value::Object(self.clone()), &[value])?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Define (or redefine) an own property slot.
    ///
    /// Fails if the existing slot is non-configurable, or the key is new and
    /// the object is not extensible.
    pub fn define_own_property(
        &self,
        key: impl Into<PropertyKey>,
        property: Property,
    ) -> Result<()> {
        let key = key.into();
        let mut properties = self.0.properties.write();
        match properties.get(&key) {
            Some(existing) if !existing.is_configurable() => {
                Err(RecordTupleError::PropertyDefinition {
                    key,
                    reason: "property is not configurable",
                })
            }
            None if !self.is_extensible() => Err(RecordTupleError::PropertyDefinition {
                key,
                reason: "object is not extensible",
            }),
            _ => {
                properties.insert(key, property);
                Ok(())
            }
        }
    }

    /// All own keys, in own-key enumeration order
    pub fn own_keys(&self) -> Vec<PropertyKey> {
        own_key_order(self.0.properties.read().keys())
    }

    /// Enumerable own string keys, in own-key enumeration order
    pub fn keys(&self) -> Vec<PropertyKey> {
        let properties = self.0.properties.read();
        own_key_order(
            properties
                .iter()
                .filter(|(key, property)| !key.is_symbol() && property.is_enumerable())
                .map(|(key, _)| key),
        )
    }

    /// Number of own properties
    pub fn property_count(&self) -> usize {
        self.0.properties.read().len()
    }

    /// Check if the object exposes a callable `Symbol.iterator`
    pub fn is_iterable(&self) -> bool {
        matches!(
            self.get(Symbol::iterator()),
            Ok(Value::Object(ref iter)) if iter.is_callable()
        )
    }

    // ═══════════════════════════════════════════════════════════════════
    // Integrity Levels
    // ═══════════════════════════════════════════════════════════════════

    /// Check if new properties may be added
    pub fn is_extensible(&self) -> bool {
        self.0.extensible.load(Ordering::Acquire)
    }

    /// Forbid adding new properties
    pub fn prevent_extensions(&self) {
        self.0.extensible.store(false, Ordering::Release);
    }

    /// Freeze the object: no new properties, every slot non-configurable,
    /// and every data slot read-only. Accessors keep their functions.
    pub fn freeze(&self) {
        let mut properties = self.0.properties.write();
        self.prevent_extensions();
        for property in properties.values_mut() {
            match property {
                Property::Data {
                    writable,
                    configurable,
                    ..
                } => {
                    *writable = false;
                    *configurable = false;
                }
                Property::Accessor { configurable, .. } => *configurable = false,
            }
        }
    }

    /// Check if the object is frozen
    pub fn is_frozen(&self) -> bool {
        let properties = self.0.properties.read();
        !self.is_extensible()
            && properties
                .values()
                .all(|p| !p.is_configurable() && !p.is_writable())
    }
}

impl PartialEq for Object {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for Object {}

impl Hash for Object {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id().hash(state);
    }
}
