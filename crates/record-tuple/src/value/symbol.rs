//! Unique symbols usable as property keys

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, OnceLock};

static NEXT_SYMBOL_ID: AtomicU64 = AtomicU64::new(1);

/// A unique, identity-compared symbol.
///
/// Two symbols are equal only if one is a clone of the other, regardless
/// of their descriptions.
#[derive(Clone)]
pub struct Symbol(Arc<SymbolInner>);

struct SymbolInner {
    id: u64,
    description: Option<Arc<str>>,
}

impl Symbol {
    /// Create a fresh symbol with an optional description
    pub fn new(description: Option<&str>) -> Self {
        Self(Arc::new(SymbolInner {
            id: NEXT_SYMBOL_ID.fetch_add(1, Ordering::Relaxed),
            description: description.map(Arc::from),
        }))
    }

    /// The well-known `Symbol.iterator`
    pub fn iterator() -> Self {
        static ITERATOR: OnceLock<Symbol> = OnceLock::new();
        ITERATOR
            .get_or_init(|| Symbol::new(Some("Symbol.iterator")))
            .clone()
    }

    /// The description given at creation, if any
    pub fn description(&self) -> Option<&str> {
        self.0.description.as_deref()
    }
}

impl PartialEq for Symbol {
    fn eq(&self, other: &Self) -> bool {
        self.0.id == other.0.id
    }
}

impl Eq for Symbol {}

impl Hash for Symbol {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.id.hash(state);
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({})", self.description().unwrap_or(""))
    }
}
