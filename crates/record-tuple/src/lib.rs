//! # record-tuple
//!
//! Runtime primitives for immutable Record and Tuple value types on top of
//! a reference-semantics object model.
//!
//! Records and Tuples are ordinary objects that a constructor layer has
//! validated, frozen and then *tagged*. Tags live in side tables owned by a
//! [`Registry`], never on the objects themselves, and the tables never keep
//! the objects alive.
//!
//! ## Architecture
//!
//! - **Host object model** ([`value`]): values, identity-carrying objects,
//!   properties, callables, freezing, drop-time finalizers
//! - **Feature check** ([`features`]): refuses hosts without weak primitives
//! - **Registry** ([`registry`]): Record/Tuple tags, member validation, and
//!   the box bimap that lets arbitrary objects travel inside a Record
//! - **Property installer** ([`define()`]): attaches uniform behaviour to an
//!   instance before it is frozen
//!
//! Deep structural equality and interning of equal instances belong to the
//! constructor layer built on top of this crate.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod define;
pub mod error;
pub mod features;
pub mod registry;
pub mod value;

// Re-export main types
pub use config::{HostCapabilities, RuntimeConfig};
pub use define::{define, PropertySpec, PropertySpecs};
pub use error::{BoxConflict, RecordTupleError, Result};
pub use features::{assert_features, Capability};
pub use registry::{Classified, Registry, RegistryStats, Tag};
pub use value::{
    Finalizer, NativeFn, NativeFnPtr, Object, ObjectId, Property, PropertyKey, Symbol, Value,
    WeakObject,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
