//! Runtime configuration

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::features::Capability;

/// Weak-reference primitives the host provides.
///
/// An embedding host that cannot offer one of these (for instance a host
/// whose objects cannot run cleanup on drop) reports it here, and registry
/// creation refuses to proceed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HostCapabilities {
    /// Identity-keyed side tables that do not keep their keys alive
    pub weak_map: bool,

    /// Non-owning single-object handles
    pub weak_ref: bool,

    /// Cleanup callbacks run when an object is dropped
    pub finalization_registry: bool,
}

impl Default for HostCapabilities {
    fn default() -> Self {
        Self::detect()
    }
}

impl HostCapabilities {
    /// Capabilities of the native object model in this crate: all present
    pub fn detect() -> Self {
        Self {
            weak_map: true,
            weak_ref: true,
            finalization_registry: true,
        }
    }

    /// A host with none of the primitives
    pub fn none() -> Self {
        Self {
            weak_map: false,
            weak_ref: false,
            finalization_registry: false,
        }
    }

    /// Check if a single capability is present
    pub fn has(&self, capability: Capability) -> bool {
        match capability {
            Capability::WeakMap => self.weak_map,
            Capability::WeakRef => self.weak_ref,
            Capability::FinalizationRegistry => self.finalization_registry,
        }
    }

    /// Copy of these capabilities with one removed
    pub fn without(mut self, capability: Capability) -> Self {
        match capability {
            Capability::WeakMap => self.weak_map = false,
            Capability::WeakRef => self.weak_ref = false,
            Capability::FinalizationRegistry => self.finalization_registry = false,
        }
        self
    }

    /// Capabilities that are absent, in declaration order
    pub fn missing(&self) -> Vec<Capability> {
        Capability::ALL
            .into_iter()
            .filter(|c| !self.has(*c))
            .collect()
    }
}

/// Configuration for a [`Registry`](crate::Registry).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RuntimeConfig {
    /// What the host provides; checked once when the registry is created
    pub capabilities: HostCapabilities,

    /// Drain the reclamation queue before every registration.
    /// When off, entries of dropped objects linger until `Registry::reclaim`.
    pub auto_reclaim: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            capabilities: HostCapabilities::detect(),
            auto_reclaim: true,
        }
    }
}

impl RuntimeConfig {
    /// Create a new config with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a config for a host with the given capabilities.
    pub fn with_capabilities(capabilities: HostCapabilities) -> Self {
        Self {
            capabilities,
            ..Default::default()
        }
    }

    /// Set whether registrations drain the reclamation queue.
    pub fn with_auto_reclaim(mut self, auto_reclaim: bool) -> Self {
        self.auto_reclaim = auto_reclaim;
        self
    }

    /// Parse a config from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
