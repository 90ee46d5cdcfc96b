//! Host value representation
//!
//! The registry works over a small reference-semantics object model:
//! primitives are compared by value, objects by identity.

mod callable;
mod display;
mod impls;
mod object;
pub(crate) mod property;
mod symbol;

pub use callable::{NativeFn, NativeFnPtr};
pub use object::{Finalizer, Object, ObjectId, WeakObject};
pub use property::{Property, PropertyKey};
pub use symbol::Symbol;

use std::sync::Arc;

/// Runtime value representation.
///
/// Everything except `Object` is a primitive: it has no identity and is
/// always safe to embed in a Record or Tuple.
#[derive(Clone)]
pub enum Value {
    // ═══════════════════════════════════════════════════════════════════
    // Primitives
    // ═══════════════════════════════════════════════════════════════════
    /// The `undefined` value
    Undefined,

    /// The `null` value
    Null,

    /// Boolean: `true` or `false`
    Bool(bool),

    /// IEEE-754 double
    Number(f64),

    /// Arbitrary-size integer (bounded to 128 bits here)
    BigInt(i128),

    /// Immutable string
    String(Arc<str>),

    /// Unique symbol
    Symbol(Symbol),

    // ═══════════════════════════════════════════════════════════════════
    // References
    // ═══════════════════════════════════════════════════════════════════
    /// Object or function, compared by identity
    Object(Object),
}
