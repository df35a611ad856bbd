// crates/edge-gate-rest/src/netinfo.rs
// ============================================================================
// Module: Configured Interface Table
// Description: Local address table sourced from node configuration.
// Purpose: Back the access-control check with operator-declared addresses.
// Dependencies: edge-gate-core, edge-gate-config
// ============================================================================

//! ## Overview
//! The interface table answers "which addresses are mine" from configuration
//! rather than live enumeration, so the access-control boundary is explicit
//! and auditable. An empty table fails closed: the gateway treats it as an
//! enumeration fault and answers unavailable for non-loopback peers.

// ============================================================================
// SECTION: Imports
// ============================================================================

use edge_gate_config::NetworkConfig;
use edge_gate_core::InterfaceError;
use edge_gate_core::NetworkInterfaces;

// ============================================================================
// SECTION: Interface Table
// ============================================================================

/// Local address table declared in node configuration.
#[derive(Debug, Clone)]
pub struct ConfiguredInterfaceTable {
    /// Addresses this node answers for.
    addresses: Vec<String>,
}

impl ConfiguredInterfaceTable {
    /// Creates a table from an explicit address list.
    #[must_use]
    pub const fn new(addresses: Vec<String>) -> Self {
        Self {
            addresses,
        }
    }

    /// Creates a table from the network section of node configuration.
    #[must_use]
    pub fn from_config(config: &NetworkConfig) -> Self {
        Self::new(config.local_addresses.clone())
    }
}

impl NetworkInterfaces for ConfiguredInterfaceTable {
    fn local_addresses(&self) -> Result<Vec<String>, InterfaceError> {
        if self.addresses.is_empty() {
            return Err(InterfaceError::Unavailable(
                "no local addresses configured".to_string(),
            ));
        }
        Ok(self.addresses.clone())
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
