// crates/edge-gate-core/src/lib.rs
// ============================================================================
// Module: Edge Gate Core Library
// Description: Public API surface for the Edge Gate core.
// Purpose: Expose core types, boundary interfaces, and runtime helpers.
// Dependencies: crate::{core, interfaces, runtime}
// ============================================================================

//! ## Overview
//! Edge Gate core provides the secure request-admission protocol for the
//! orchestration boundary: peer identity resolution, strict descriptor
//! validation, and the gateway state machine. It is transport-agnostic and
//! integrates through explicit interfaces rather than embedding into an HTTP
//! framework.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod core;
pub mod interfaces;
pub mod runtime;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use core::*;

pub use interfaces::CipherError;
pub use interfaces::EnvelopeCipher;
pub use interfaces::InterfaceError;
pub use interfaces::JsonMap;
pub use interfaces::NetworkInterfaces;
pub use interfaces::PlacementEngine;
pub use interfaces::SenderResolver;
pub use interfaces::SystemRecord;
pub use interfaces::SystemStore;
pub use interfaces::SystemStoreError;
pub use runtime::GatewayResponse;
pub use runtime::INVALID_PARAMETER;
pub use runtime::InMemorySystemStore;
pub use runtime::LOCAL_PLACEMENT_MESSAGE;
pub use runtime::LocalNodeEngine;
pub use runtime::RequestGateway;
pub use runtime::ResolvedRequester;
pub use runtime::SharedEnvelopeCipher;
pub use runtime::SharedNetworkInterfaces;
pub use runtime::SharedPlacementEngine;
pub use runtime::SharedSenderResolver;
pub use runtime::ValidationError;
pub use runtime::validate;
