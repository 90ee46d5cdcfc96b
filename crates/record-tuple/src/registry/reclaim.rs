//! Finalizer-driven reclamation of side-table entries

use std::sync::Arc;

use parking_lot::Mutex;

use crate::value::{Object, ObjectId};

/// Ids of watched objects that have been dropped but whose table entries
/// are still present.
///
/// Finalizers only push onto this queue and never touch the tables: an
/// object can be dropped while a table lock is held (for instance when a
/// box entry releases the last handle to its value).
#[derive(Debug, Default)]
pub(crate) struct ReclaimQueue {
    pending: Arc<Mutex<Vec<ObjectId>>>,
}

impl ReclaimQueue {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Arrange for `object`'s id to be queued when it is dropped.
    /// The finalizer is inert once the queue itself is gone.
    pub(crate) fn watch(&self, object: &Object) {
        let pending = Arc::downgrade(&self.pending);
        object.on_drop(move |id| {
            if let Some(pending) = pending.upgrade() {
                pending.lock().push(id);
            }
        });
    }

    /// Take every queued id
    pub(crate) fn drain(&self) -> Vec<ObjectId> {
        std::mem::take(&mut *self.pending.lock())
    }

    pub(crate) fn len(&self) -> usize {
        self.pending.lock().len()
    }
}
