// crates/edge-gate-core/src/runtime/mod.rs
// ============================================================================
// Module: Edge Gate Runtime
// Description: Validator, gateway state machine, and default implementations.
// Purpose: Drive request admission over the boundary interfaces.
// Dependencies: crate::{core, interfaces}
// ============================================================================

//! ## Overview
//! The runtime turns decrypted payloads into validated descriptors and runs
//! the single-pass gateway state machine: readiness, access check, decrypt,
//! resolve-and-validate, dispatch, respond. Default in-process
//! implementations are provided for the placement engine and system store so
//! a node can run standalone.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod engine;
pub mod gateway;
pub mod memstore;
pub mod validator;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use engine::LOCAL_PLACEMENT_MESSAGE;
pub use engine::LocalNodeEngine;
pub use gateway::GatewayResponse;
pub use gateway::RequestGateway;
pub use gateway::SharedEnvelopeCipher;
pub use gateway::SharedNetworkInterfaces;
pub use gateway::SharedPlacementEngine;
pub use gateway::SharedSenderResolver;
pub use memstore::InMemorySystemStore;
pub use validator::INVALID_PARAMETER;
pub use validator::ResolvedRequester;
pub use validator::ValidationError;
pub use validator::validate;
