// crates/edge-gate-core/src/core/mod.rs
// ============================================================================
// Module: Edge Gate Core Types
// Description: Canonical request, descriptor, and decision structures.
// Purpose: Provide stable, serializable types for the admission protocol.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Core types define the validated service descriptor, the placement decision
//! returned by the orchestration engine, and the peer address model used by
//! the access-control check. These types are the canonical source of truth
//! for any derived API surfaces.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod descriptor;
pub mod identifiers;
pub mod peer;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use descriptor::ExecutionUnit;
pub use descriptor::PlacementDecision;
pub use descriptor::RemoteTargetInfo;
pub use descriptor::ServiceDescriptor;
pub use identifiers::RequesterIdentity;
pub use identifiers::ServiceName;
pub use peer::LOOPBACK_MARKER;
pub use peer::PeerAddress;
pub use peer::PeerHost;
