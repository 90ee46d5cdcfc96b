//! Side tables classifying objects as Records, Tuples and boxes
//!
//! A [`Registry`] owns every table. Nothing is stored on the objects
//! themselves apart from a drop-time finalizer that queues the object's id
//! for reclamation.

mod boxes;
mod reclaim;
mod tags;
mod validate;

pub use tags::Tag;
pub use validate::Classified;

use log::debug;

use crate::config::RuntimeConfig;
use crate::error::Result;
use crate::features::assert_features;

use boxes::BoxTable;
use reclaim::ReclaimQueue;
use tags::TagTable;

/// Snapshot of table sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RegistryStats {
    /// Tagged Records
    pub records: usize,
    /// Tagged Tuples
    pub tuples: usize,
    /// Registered boxes
    pub boxes: usize,
    /// Dropped objects awaiting reclamation
    pub pending: usize,
}

/// Owner of the tag table, the box bimap and the reclamation queue.
///
/// The registry is `Send + Sync`; every registration is a compare-and-set,
/// so concurrent constructors racing on one object see a single winner.
///
/// # Example
///
/// ```
/// use record_tuple::{Object, Registry, Value};
///
/// let registry = Registry::native().unwrap();
/// let tuple = Object::from_entries([(0usize, Value::from(1)), (1usize, Value::from(2))]);
/// tuple.freeze();
/// registry.mark_tuple(&tuple, 2).unwrap();
///
/// let value = Value::from(&tuple);
/// assert!(registry.is_tuple(&value));
/// assert!(!registry.is_record(&value));
/// assert_eq!(registry.get_tuple_length(&value), Some(2));
/// ```
#[derive(Debug)]
pub struct Registry {
    config: RuntimeConfig,
    tags: TagTable,
    boxes: BoxTable,
    reclaim: ReclaimQueue,
}

impl Registry {
    /// Create a registry after checking the host's capabilities.
    ///
    /// Fails with `UnsupportedEnvironment` if any weak-reference primitive
    /// is missing; no table is created in that case.
    pub fn new(config: RuntimeConfig) -> Result<Self> {
        assert_features(&config.capabilities)?;
        debug!("creating registry (auto_reclaim: {})", config.auto_reclaim);
        Ok(Self {
            config,
            tags: TagTable::default(),
            boxes: BoxTable::default(),
            reclaim: ReclaimQueue::new(),
        })
    }

    /// Create a registry for the native host with default settings
    pub fn native() -> Result<Self> {
        Self::new(RuntimeConfig::default())
    }

    /// The configuration this registry was created with
    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    /// Remove the table entries of every object dropped since the last
    /// reclamation. Returns the number of entries removed.
    pub fn reclaim(&self) -> usize {
        let dropped = self.reclaim.drain();
        if dropped.is_empty() {
            return 0;
        }
        let tags = dropped.iter().filter(|id| self.tags.remove(**id)).count();
        let released = self.boxes.remove_boxes(&dropped);
        let removed = tags + released.len();
        // Boxed values are released here, outside the table lock.
        drop(released);
        debug!("reclaimed {} entries for {} dropped objects", removed, dropped.len());
        removed
    }

    fn maybe_reclaim(&self) {
        if self.config.auto_reclaim {
            self.reclaim();
        }
    }

    /// Current table sizes
    pub fn stats(&self) -> RegistryStats {
        let (records, tuples) = self.tags.counts();
        RegistryStats {
            records,
            tuples,
            boxes: self.boxes.len(),
            pending: self.reclaim.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{Object, Value};

    #[test]
    fn test_registry_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Registry>();
    }

    #[test]
    fn test_reclaim_removes_dropped_tags() {
        let registry = Registry::new(RuntimeConfig::new().with_auto_reclaim(false)).unwrap();
        let record = Object::new();
        registry.mark_record(&record).unwrap();
        assert_eq!(registry.stats().records, 1);

        drop(record);
        assert_eq!(registry.stats().pending, 1);
        assert_eq!(registry.reclaim(), 1);
        assert_eq!(registry.stats(), RegistryStats::default());
    }

    #[test]
    fn test_auto_reclaim_runs_on_registration() {
        let registry = Registry::native().unwrap();
        let dropped = Object::new();
        registry.mark_tuple(&dropped, 0).unwrap();
        drop(dropped);

        let kept = Object::new();
        registry.mark_record(&kept).unwrap();
        let stats = registry.stats();
        assert_eq!((stats.records, stats.tuples, stats.pending), (1, 0, 0));
        assert!(registry.is_record(&Value::from(kept)));
    }
}
