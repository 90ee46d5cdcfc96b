//! Host capability check

use std::fmt;

use log::{debug, error};

use crate::config::HostCapabilities;
use crate::error::{RecordTupleError, Result};

/// A weak-reference primitive the registry depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Identity-keyed table that does not keep keys alive
    WeakMap,
    /// Non-owning single-object handle
    WeakRef,
    /// Drop-time cleanup callbacks
    FinalizationRegistry,
}

impl Capability {
    /// Every capability, in the order they are reported
    pub const ALL: [Capability; 3] = [
        Capability::WeakMap,
        Capability::WeakRef,
        Capability::FinalizationRegistry,
    ];
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Capability::WeakMap => "WeakMap",
            Capability::WeakRef => "WeakRef",
            Capability::FinalizationRegistry => "FinalizationRegistry",
        })
    }
}

/// Fail with `UnsupportedEnvironment` unless every capability is present.
///
/// Every side table depends on these primitives, so the failure is fatal
/// for whoever tried to build a registry.
pub fn assert_features(capabilities: &HostCapabilities) -> Result<()> {
    let missing = capabilities.missing();
    if missing.is_empty() {
        debug!("host provides all weak-reference primitives");
        return Ok(());
    }
    error!("host is missing required primitives: {:?}", missing);
    Err(RecordTupleError::UnsupportedEnvironment { missing })
}
