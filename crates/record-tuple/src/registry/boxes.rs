//! Box registry: one-to-one association between box objects and the
//! values whose identity they preserve

use std::collections::HashMap;

use log::debug;
use parking_lot::RwLock;

use super::Registry;
use crate::error::{BoxConflict, RecordTupleError, Result};
use crate::value::{Object, ObjectId, Value, WeakObject};

struct BoxEntry {
    /// The box itself; weak so the table never keeps a box alive
    handle: WeakObject,

    /// The boxed value; strong, a live box keeps its value alive
    value: Value,
}

/// Both directions of the association live behind one lock and the value
/// direction only stores box ids, so the two sides cannot disagree.
#[derive(Default)]
struct Bimap {
    by_box: HashMap<ObjectId, BoxEntry>,
    by_value: HashMap<ObjectId, ObjectId>,
}

impl Bimap {
    fn live_box_for(&self, value_id: ObjectId) -> Option<Object> {
        let box_id = self.by_value.get(&value_id)?;
        self.by_box.get(box_id)?.handle.upgrade()
    }

    fn remove_box(&mut self, box_id: ObjectId) -> Option<Value> {
        let entry = self.by_box.remove(&box_id)?;
        if let Some(value_id) = entry.value.identity() {
            if self.by_value.get(&value_id) == Some(&box_id) {
                self.by_value.remove(&value_id);
            }
        }
        Some(entry.value)
    }

    fn check_insert(&mut self, boxed: &Object, value_id: ObjectId) -> Result<bool> {
        if let Some(entry) = self.by_box.get(&boxed.id()) {
            return if entry.value.identity() == Some(value_id) {
                Ok(false)
            } else {
                Err(RecordTupleError::BoxConflict(BoxConflict::BoxAlreadyRegistered))
            };
        }
        if let Some(&previous) = self.by_value.get(&value_id) {
            let alive = self
                .by_box
                .get(&previous)
                .is_some_and(|entry| entry.handle.is_alive());
            if alive {
                return Err(RecordTupleError::BoxConflict(BoxConflict::ValueAlreadyBoxed));
            }
            // Box was dropped but not reclaimed yet; its slot is free.
            self.remove_box(previous);
        }
        Ok(true)
    }

    fn insert(&mut self, boxed: &Object, value: Value, value_id: ObjectId) {
        self.by_value.insert(value_id, boxed.id());
        self.by_box.insert(
            boxed.id(),
            BoxEntry {
                handle: boxed.downgrade(),
                value,
            },
        );
    }
}

#[derive(Default)]
pub(crate) struct BoxTable {
    inner: RwLock<Bimap>,
}

impl std::fmt::Debug for BoxTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "BoxTable({} entries)", self.len())
    }
}

fn boxable_identity(boxed: &Object, value: &Value) -> Result<ObjectId> {
    let value_id = value
        .identity()
        .ok_or(RecordTupleError::BoxConflict(BoxConflict::PrimitiveValue))?;
    if value_id == boxed.id() {
        return Err(RecordTupleError::BoxConflict(BoxConflict::SelfReference));
    }
    Ok(value_id)
}

impl BoxTable {
    /// Register `boxed -> value`. `Ok(true)` if newly registered,
    /// `Ok(false)` if this exact pair already existed.
    fn register(&self, boxed: &Object, value: Value) -> Result<bool> {
        let value_id = boxable_identity(boxed, &value)?;
        let mut map = self.inner.write();
        let fresh = map.check_insert(boxed, value_id)?;
        if fresh {
            map.insert(boxed, value, value_id);
        }
        Ok(fresh)
    }

    /// Return the live box for `value`, or register the one `make` builds.
    fn get_or_register(
        &self,
        value: Value,
        make: impl FnOnce() -> Object,
    ) -> Result<(Object, bool)> {
        let value_id = value
            .identity()
            .ok_or(RecordTupleError::BoxConflict(BoxConflict::PrimitiveValue))?;
        let mut map = self.inner.write();
        if let Some(existing) = map.live_box_for(value_id) {
            return Ok((existing, false));
        }
        let boxed = make();
        map.check_insert(&boxed, value_id)?;
        map.insert(&boxed, value, value_id);
        Ok((boxed, true))
    }

    fn value_of(&self, box_id: ObjectId) -> Option<Value> {
        self.inner.read().by_box.get(&box_id).map(|e| e.value.clone())
    }

    fn box_of(&self, value_id: ObjectId) -> Option<Object> {
        self.inner.read().live_box_for(value_id)
    }

    pub(crate) fn contains_box(&self, id: ObjectId) -> bool {
        self.inner.read().by_box.contains_key(&id)
    }

    fn release(&self, box_id: ObjectId) -> Option<Value> {
        self.inner.write().remove_box(box_id)
    }

    /// Remove the entries of dropped boxes, handing back their values so the
    /// caller can release them outside the lock.
    pub(crate) fn remove_boxes(&self, ids: &[ObjectId]) -> Vec<Value> {
        let mut map = self.inner.write();
        ids.iter().filter_map(|id| map.remove_box(*id)).collect()
    }

    pub(crate) fn len(&self) -> usize {
        self.inner.read().by_box.len()
    }
}

impl Registry {
    /// Associate `boxed` with `value`.
    ///
    /// The association is permanent for the box's lifetime. Re-registering
    /// the exact same pair is a no-op; reusing a box for another value, or
    /// boxing a value that already has a live box, fails with
    /// `BoxConflict` and leaves the existing association intact.
    ///
    /// The table holds the value strongly while the box lives. If the value
    /// itself reaches its box (say it stores a Tuple containing the box),
    /// the entry is the only link closing that cycle and neither object is
    /// ever dropped; `reclaim` cannot see through it. Break such cycles with
    /// [`Registry::release_box`].
    pub fn mark_box(&self, boxed: &Object, value: Value) -> Result<()> {
        self.maybe_reclaim();
        if self.boxes.register(boxed, value)? {
            self.reclaim.watch(boxed);
            debug!("registered box {}", boxed.id());
        }
        Ok(())
    }

    /// Return the canonical box for `value`, creating a fresh frozen one if
    /// the value has none.
    ///
    /// Same lifetime caveat as [`Registry::mark_box`]: a value that stores
    /// its own box is kept alive by the table until [`Registry::release_box`].
    ///
    /// # Example
    ///
    /// ```
    /// use record_tuple::{Object, Registry, Value};
    ///
    /// let registry = Registry::native().unwrap();
    /// let target = Value::new_object();
    ///
    /// let boxed = registry.box_value(target.clone()).unwrap();
    /// assert!(registry.is_box(&Value::from(&boxed)));
    /// assert_eq!(registry.box_value(target.clone()).unwrap(), boxed);
    /// assert_eq!(registry.unbox_box(&Value::from(&boxed)).unwrap(), target);
    /// ```
    pub fn box_value(&self, value: Value) -> Result<Object> {
        self.maybe_reclaim();
        let (boxed, fresh) = self.boxes.get_or_register(value, || {
            let boxed = Object::new();
            boxed.freeze();
            boxed
        })?;
        if fresh {
            self.reclaim.watch(&boxed);
            debug!("created box {}", boxed.id());
        }
        Ok(boxed)
    }

    /// Drop the association of `boxed`, handing back the value it wrapped.
    ///
    /// Afterwards `boxed` is no longer a box and the value has no canonical
    /// box. This is the manual way out of a value -> box -> value cycle.
    pub fn release_box(&self, boxed: &Object) -> Result<Value> {
        let value = self
            .boxes
            .release(boxed.id())
            .ok_or(RecordTupleError::InvalidBoxArgument)?;
        debug!("released box {}", boxed.id());
        Ok(value)
    }

    /// Check if `candidate` is a registered box
    pub fn is_box(&self, candidate: &Value) -> bool {
        candidate
            .identity()
            .is_some_and(|id| self.boxes.contains_box(id))
    }

    /// Recover the value a box was registered with
    pub fn unbox_box(&self, candidate: &Value) -> Result<Value> {
        candidate
            .identity()
            .and_then(|id| self.boxes.value_of(id))
            .ok_or(RecordTupleError::InvalidBoxArgument)
    }

    /// The canonical box for `value`, if one is alive
    pub fn find_box(&self, value: &Value) -> Option<Object> {
        value.identity().and_then(|id| self.boxes.box_of(id))
    }
}
