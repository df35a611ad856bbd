// crates/edge-gate-core/src/runtime/gateway.rs
// ============================================================================
// Module: Edge Gate Request Gateway
// Description: Single-pass admission state machine for inbound requests.
// Purpose: Orchestrate readiness, access control, crypto, and dispatch.
// Dependencies: crate::{core, interfaces, runtime::validator}, serde_json
// ============================================================================

//! ## Overview
//! The gateway runs a linear five-stage machine per request: readiness,
//! access check, decrypt, resolve-and-validate, dispatch, respond. Every
//! request receives exactly one response. Validation failures are
//! business-level: the error payload is still encrypted and returned with
//! transport success. All wiring is read-only after construction, so a
//! gateway value is safe to share across concurrent requests.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;

use serde_json::Value;

use crate::core::PeerAddress;
use crate::core::PeerHost;
use crate::core::PlacementDecision;
use crate::interfaces::EnvelopeCipher;
use crate::interfaces::JsonMap;
use crate::interfaces::NetworkInterfaces;
use crate::interfaces::PlacementEngine;
use crate::interfaces::SenderResolver;
use crate::runtime::validator::ResolvedRequester;
use crate::runtime::validator::ValidationError;
use crate::runtime::validator::validate;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Response field carrying the outcome message.
pub const MESSAGE_FIELD: &str = "Message";
/// Response field carrying the resolved service name.
pub const RESPONSE_SERVICE_NAME_FIELD: &str = "ServiceName";
/// Response field carrying the remote target metadata.
pub const REMOTE_TARGET_INFO_FIELD: &str = "RemoteTargetInfo";
/// Remote target field carrying the execution type.
pub const TARGET_EXECUTION_TYPE_FIELD: &str = "ExecutionType";
/// Remote target field carrying the target identifier.
pub const TARGET_FIELD: &str = "Target";

// ============================================================================
// SECTION: Shared Boundary Aliases
// ============================================================================

/// Shared placement engine handle.
pub type SharedPlacementEngine = Arc<dyn PlacementEngine + Send + Sync>;
/// Shared sender resolver handle.
pub type SharedSenderResolver = Arc<dyn SenderResolver + Send + Sync>;
/// Shared network interface accessor handle.
pub type SharedNetworkInterfaces = Arc<dyn NetworkInterfaces + Send + Sync>;
/// Shared envelope cipher handle.
pub type SharedEnvelopeCipher = Arc<dyn EnvelopeCipher + Send + Sync>;

// ============================================================================
// SECTION: Gateway Response
// ============================================================================

/// Transport-agnostic outcome of one admission attempt.
///
/// # Invariants
/// - Variants are stable and exhaustive for the response status taxonomy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayResponse {
    /// Request was admitted; the encrypted response body is returned with
    /// transport success (the body may itself encode a validation error).
    Accepted {
        /// Encrypted response envelope.
        body: Vec<u8>,
    },
    /// Infrastructure or configuration fault; the caller should retry later.
    Unavailable,
    /// Access-control rejection; intentionally free of detail.
    Rejected,
}

// ============================================================================
// SECTION: Request Gateway
// ============================================================================

/// Immutable, fully wired request gateway.
///
/// # Invariants
/// - Wiring is set once during single-threaded startup and never mutated
///   during request handling.
/// - Engine and cipher are optional at wiring time; absence makes every
///   request answer [`GatewayResponse::Unavailable`].
pub struct RequestGateway {
    /// Placement engine, attached once at wiring time.
    engine: Option<SharedPlacementEngine>,
    /// Envelope cipher, configured once at wiring time.
    cipher: Option<SharedEnvelopeCipher>,
    /// Port-to-identity resolver.
    resolver: SharedSenderResolver,
    /// Local network interface accessor.
    interfaces: SharedNetworkInterfaces,
}

impl RequestGateway {
    /// Creates a gateway with no engine or cipher attached.
    #[must_use]
    pub fn new(resolver: SharedSenderResolver, interfaces: SharedNetworkInterfaces) -> Self {
        Self {
            engine: None,
            cipher: None,
            resolver,
            interfaces,
        }
    }

    /// Returns a copy with the placement engine attached.
    #[must_use]
    pub fn with_engine(mut self, engine: SharedPlacementEngine) -> Self {
        self.engine = Some(engine);
        self
    }

    /// Returns a copy with the envelope cipher configured.
    #[must_use]
    pub fn with_cipher(mut self, cipher: SharedEnvelopeCipher) -> Self {
        self.cipher = Some(cipher);
        self
    }

    /// Returns true when both the engine and the cipher are wired.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.engine.is_some() && self.cipher.is_some()
    }

    /// Handles one inbound request and always produces a response.
    ///
    /// The five stages run strictly in order with no backtracking: readiness,
    /// access check, decrypt, resolve-and-validate, dispatch, respond. The
    /// body is never decrypted for a peer that fails the access check.
    #[must_use]
    pub fn handle(&self, peer: &PeerAddress, body: &[u8]) -> GatewayResponse {
        let (Some(engine), Some(cipher)) = (self.engine.as_ref(), self.cipher.as_ref()) else {
            return GatewayResponse::Unavailable;
        };

        if let PeerHost::Address(host) = peer.host() {
            let addresses = match self.interfaces.local_addresses() {
                Ok(addresses) => addresses,
                Err(_) => return GatewayResponse::Unavailable,
            };
            if !addresses.iter().any(|address| address == host) {
                return GatewayResponse::Rejected;
            }
        }

        let payload = match cipher.decrypt(body) {
            Ok(payload) => payload,
            Err(_) => return GatewayResponse::Unavailable,
        };

        let requester = peer
            .port()
            .and_then(|port| self.resolver.name_by_port(port))
            .map_or(ResolvedRequester::Unresolved, ResolvedRequester::Port);

        let reply = match validate(&payload, &requester) {
            Ok(descriptor) => decision_reply(&engine.request_service(descriptor)),
            Err(error) => error_reply(&error),
        };

        match cipher.encrypt(&reply) {
            Ok(body) => GatewayResponse::Accepted {
                body,
            },
            Err(_) => GatewayResponse::Unavailable,
        }
    }
}

// ============================================================================
// SECTION: Response Assembly
// ============================================================================

/// Assembles the response map for a placement decision.
fn decision_reply(decision: &PlacementDecision) -> JsonMap {
    let mut target = JsonMap::new();
    target.insert(
        TARGET_EXECUTION_TYPE_FIELD.to_string(),
        Value::String(decision.remote_target.execution_type.clone()),
    );
    target.insert(TARGET_FIELD.to_string(), Value::String(decision.remote_target.target.clone()));
    reply_map(&decision.message, &decision.service_name, Value::Object(target))
}

/// Assembles the response map for a validation failure.
fn error_reply(error: &ValidationError) -> JsonMap {
    reply_map(&error.message, &error.service_name, Value::Null)
}

/// Builds the common response map shape.
fn reply_map(message: &str, service_name: &str, target: Value) -> JsonMap {
    let mut reply = JsonMap::new();
    reply.insert(MESSAGE_FIELD.to_string(), Value::String(message.to_string()));
    reply.insert(RESPONSE_SERVICE_NAME_FIELD.to_string(), Value::String(service_name.to_string()));
    reply.insert(REMOTE_TARGET_INFO_FIELD.to_string(), target);
    reply
}
