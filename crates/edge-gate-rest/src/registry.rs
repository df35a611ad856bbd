// crates/edge-gate-rest/src/registry.rs
// ============================================================================
// Module: Process Port Registry
// Description: Port-to-identity registry for local service processes.
// Purpose: Resolve requester identities from ephemeral source ports.
// Dependencies: edge-gate-core
// ============================================================================

//! ## Overview
//! The registry maps source ports of locally launched service processes to
//! their requester identities. Entries are registered when a process starts
//! and removed when it exits. Lookups fail closed: an unknown or unreadable
//! port yields no identity and the payload-declared fallback applies.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::sync::RwLock;

use edge_gate_core::RequesterIdentity;
use edge_gate_core::SenderResolver;

// ============================================================================
// SECTION: Registry
// ============================================================================

/// Thread-safe port-to-identity registry.
#[derive(Debug, Default)]
pub struct ProcessPortRegistry {
    /// Registered port assignments.
    entries: RwLock<BTreeMap<u16, RequesterIdentity>>,
}

impl ProcessPortRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an identity for a port, replacing any previous owner.
    pub fn register(&self, port: u16, identity: RequesterIdentity) {
        if let Ok(mut entries) = self.entries.write() {
            entries.insert(port, identity);
        }
    }

    /// Removes the registration for a port, if any.
    pub fn unregister(&self, port: u16) {
        if let Ok(mut entries) = self.entries.write() {
            entries.remove(&port);
        }
    }
}

impl SenderResolver for ProcessPortRegistry {
    fn name_by_port(&self, port: u16) -> Option<RequesterIdentity> {
        // A poisoned lock resolves nothing rather than panicking.
        self.entries.read().ok()?.get(&port).cloned()
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    #![allow(
        clippy::panic,
        clippy::unwrap_used,
        clippy::expect_used,
        reason = "Test-only assertions and helpers are permitted."
    )]

    use edge_gate_core::RequesterIdentity;
    use edge_gate_core::SenderResolver;

    use super::ProcessPortRegistry;

    #[test]
    fn registered_port_resolves() {
        let registry = ProcessPortRegistry::new();
        registry.register(4000, RequesterIdentity::new("camera-agent"));
        let identity = registry.name_by_port(4000).expect("identity");
        assert_eq!(identity.as_str(), "camera-agent");
    }

    #[test]
    fn unknown_port_resolves_nothing() {
        let registry = ProcessPortRegistry::new();
        assert!(registry.name_by_port(4000).is_none());
    }

    #[test]
    fn register_replaces_previous_owner() {
        let registry = ProcessPortRegistry::new();
        registry.register(4000, RequesterIdentity::new("first"));
        registry.register(4000, RequesterIdentity::new("second"));
        let identity = registry.name_by_port(4000).expect("identity");
        assert_eq!(identity.as_str(), "second");
    }

    #[test]
    fn unregister_removes_entry() {
        let registry = ProcessPortRegistry::new();
        registry.register(4000, RequesterIdentity::new("camera-agent"));
        registry.unregister(4000);
        assert!(registry.name_by_port(4000).is_none());
    }
}
