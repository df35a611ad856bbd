// crates/edge-gate-rest/src/lib.rs
// ============================================================================
// Module: Edge Gate REST
// Description: HTTP admission endpoint and supporting backends.
// Purpose: Expose the request gateway over HTTP with audit logging.
// Dependencies: edge-gate-core, edge-gate-config, axum, aes-gcm, tokio
// ============================================================================

//! ## Overview
//! Edge Gate REST binds the admission gateway to an HTTP endpoint. It carries
//! the concrete backends the core leaves abstract: the AES-256-GCM envelope
//! cipher, the configured local-address table, the process port registry, and
//! the audit sinks. All inbound bytes are untrusted until the gateway accepts
//! them.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod audit;
pub mod cipher;
pub mod netinfo;
pub mod registry;
pub mod server;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use audit::GateAuditEvent;
pub use audit::GateAuditSink;
pub use audit::NoopAuditSink;
pub use audit::StderrAuditSink;
pub use cipher::AesGcmEnvelopeCipher;
pub use cipher::CipherSetupError;
pub use netinfo::ConfiguredInterfaceTable;
pub use registry::ProcessPortRegistry;
pub use server::RestServer;
pub use server::RestServerError;
pub use server::SERVICES_ROUTE;
