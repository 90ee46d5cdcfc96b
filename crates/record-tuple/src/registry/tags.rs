//! Out-of-band Record/Tuple classification

use std::fmt;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use log::debug;

use super::Registry;
use crate::error::{RecordTupleError, Result};
use crate::value::{Object, ObjectId, Value};

/// Classification of a tagged object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    /// Immutable key/value composite
    Record,

    /// Immutable ordered composite with a fixed length
    Tuple {
        /// Number of elements
        length: usize,
    },
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tag::Record => write!(f, "Record"),
            Tag::Tuple { length } => write!(f, "Tuple(length {})", length),
        }
    }
}

/// Side table from object identity to tag. Holds no handle to the object.
#[derive(Debug, Default)]
pub(crate) struct TagTable {
    entries: DashMap<ObjectId, Tag>,
}

impl TagTable {
    /// Insert a tag. `Ok(true)` on first insertion, `Ok(false)` if the exact
    /// same tag was already present.
    fn insert(&self, id: ObjectId, tag: Tag) -> Result<bool> {
        match self.entries.entry(id) {
            Entry::Occupied(existing) if *existing.get() == tag => Ok(false),
            Entry::Occupied(existing) => Err(RecordTupleError::AlreadyTagged {
                existing: *existing.get(),
                requested: tag,
            }),
            Entry::Vacant(slot) => {
                slot.insert(tag);
                Ok(true)
            }
        }
    }

    pub(crate) fn get(&self, id: ObjectId) -> Option<Tag> {
        self.entries.get(&id).map(|tag| *tag)
    }

    pub(crate) fn remove(&self, id: ObjectId) -> bool {
        self.entries.remove(&id).is_some()
    }

    /// `(records, tuples)`
    pub(crate) fn counts(&self) -> (usize, usize) {
        self.entries
            .iter()
            .fold((0, 0), |(records, tuples), entry| match *entry.value() {
                Tag::Record => (records + 1, tuples),
                Tag::Tuple { .. } => (records, tuples + 1),
            })
    }
}

impl Registry {
    fn tag(&self, object: &Object, tag: Tag) -> Result<()> {
        self.maybe_reclaim();
        if self.tags.insert(object.id(), tag)? {
            self.reclaim.watch(object);
            debug!("tagged {} as {}", object.id(), tag);
        }
        Ok(())
    }

    /// Classify `object` as a Record.
    ///
    /// Idempotent. The object's own properties are left untouched; freezing
    /// is the constructor's job. Fails only if the object is already a Tuple.
    pub fn mark_record(&self, object: &Object) -> Result<()> {
        self.tag(object, Tag::Record)
    }

    /// Classify `object` as a Tuple of `length` elements.
    ///
    /// Repeating the same call is a no-op; any other re-tag fails.
    pub fn mark_tuple(&self, object: &Object, length: usize) -> Result<()> {
        self.tag(object, Tag::Tuple { length })
    }

    /// The tag of a value, if it is a tagged object
    pub fn tag_of(&self, value: &Value) -> Option<Tag> {
        value.identity().and_then(|id| self.tags.get(id))
    }

    /// Check if value is a tagged Record. Total over all values.
    pub fn is_record(&self, value: &Value) -> bool {
        matches!(self.tag_of(value), Some(Tag::Record))
    }

    /// Check if value is a tagged Tuple. Total over all values.
    pub fn is_tuple(&self, value: &Value) -> bool {
        matches!(self.tag_of(value), Some(Tag::Tuple { .. }))
    }

    /// Recorded length of a tagged Tuple, `None` for anything else
    pub fn get_tuple_length(&self, value: &Value) -> Option<usize> {
        match self.tag_of(value) {
            Some(Tag::Tuple { length }) => Some(length),
            _ => None,
        }
    }

    /// Check if value is either a Record or a Tuple
    pub fn is_record_or_tuple(&self, value: &Value) -> bool {
        self.tag_of(value).is_some()
    }
}
