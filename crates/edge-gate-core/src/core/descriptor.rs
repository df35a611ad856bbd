// crates/edge-gate-core/src/core/descriptor.rs
// ============================================================================
// Module: Edge Gate Descriptors
// Description: Validated service descriptors and placement decisions.
// Purpose: Capture the typed request admitted into the placement engine.
// Dependencies: crate::core::identifiers, serde
// ============================================================================

//! ## Overview
//! A [`ServiceDescriptor`] is the strongly typed form of a decrypted request
//! payload. It is built field-by-field by the validator and passed by value
//! to the placement engine, which answers with a [`PlacementDecision`].
//! Descriptors are immutable once constructed and never outlive the request
//! that created them.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::core::identifiers::RequesterIdentity;
use crate::core::identifiers::ServiceName;

// ============================================================================
// SECTION: Execution Units
// ============================================================================

/// One executable step of a requested service.
///
/// # Invariants
/// - `execution_type` is a present string tag (for example `native` or
///   `container`); the core does not interpret it.
/// - Every command token is a string; an empty token list is structurally
///   valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionUnit {
    /// Execution type tag.
    pub execution_type: String,
    /// Ordered command tokens.
    pub exec_cmd: Vec<String>,
}

// ============================================================================
// SECTION: Service Descriptor
// ============================================================================

/// Fully validated service execution request.
///
/// # Invariants
/// - `service_name` is mandatory and non-ambiguous.
/// - `requester` is resolved exactly once per request, before validation of
///   the name field completes.
/// - `execution_units` preserves payload order and may be empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceDescriptor {
    /// Requested service name.
    pub service_name: ServiceName,
    /// Whether the requesting node may select itself as the target.
    pub self_selection: bool,
    /// Resolved requester identity.
    pub requester: RequesterIdentity,
    /// Ordered execution units for the service.
    pub execution_units: Vec<ExecutionUnit>,
}

// ============================================================================
// SECTION: Placement Decision
// ============================================================================

/// Remote target metadata attached to a placement decision.
///
/// # Invariants
/// - Both fields are empty strings when the engine could not produce a
///   placement.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteTargetInfo {
    /// Execution type selected for the target.
    pub execution_type: String,
    /// Target identifier (device address or name).
    pub target: String,
}

impl RemoteTargetInfo {
    /// Returns true when no placement was made.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.execution_type.is_empty() && self.target.is_empty()
    }
}

/// Answer produced by the placement engine.
///
/// # Invariants
/// - Always present; absence of a placement is signaled via an empty
///   [`RemoteTargetInfo`], not a distinct error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacementDecision {
    /// Human-readable outcome message.
    pub message: String,
    /// Resolved service name.
    pub service_name: String,
    /// Remote target metadata.
    pub remote_target: RemoteTargetInfo,
}
