// crates/edge-gate-core/src/runtime/engine.rs
// ============================================================================
// Module: Edge Gate Local Engine
// Description: In-process placement engine for standalone nodes.
// Purpose: Answer placement requests when no external engine is attached.
// Dependencies: crate::{core, interfaces}
// ============================================================================

//! ## Overview
//! [`LocalNodeEngine`] is the default placement engine for a node running
//! without a fleet: every admitted service is placed on the local node. The
//! remote-target-info stays empty, which by the boundary contract means "no
//! remote placement" and directs the caller to execute locally.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::PlacementDecision;
use crate::core::RemoteTargetInfo;
use crate::core::ServiceDescriptor;
use crate::interfaces::PlacementEngine;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Message returned for local placements.
pub const LOCAL_PLACEMENT_MESSAGE: &str = "OK";

// ============================================================================
// SECTION: Local Node Engine
// ============================================================================

/// Placement engine that always selects the local node.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalNodeEngine;

impl LocalNodeEngine {
    /// Creates a new local node engine.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl PlacementEngine for LocalNodeEngine {
    fn request_service(&self, descriptor: ServiceDescriptor) -> PlacementDecision {
        PlacementDecision {
            message: LOCAL_PLACEMENT_MESSAGE.to_string(),
            service_name: descriptor.service_name.as_str().to_string(),
            remote_target: RemoteTargetInfo::default(),
        }
    }
}
