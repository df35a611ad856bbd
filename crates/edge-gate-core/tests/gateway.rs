// crates/edge-gate-core/tests/gateway.rs
// ============================================================================
// Module: Request Gateway Unit Tests
// Description: State machine tests for the admission gateway.
// Purpose: Validate readiness, access control, crypto, and dispatch stages.
// ============================================================================

//! ## Overview
//! Unit tests for the gateway state machine using in-memory fakes for every
//! boundary:
//! - Readiness gating before any other work
//! - Loopback acceptance regardless of the interface list
//! - Rejection without any decrypt attempt for unknown peers
//! - Interface enumeration failure mapping to unavailable
//! - Business-level validation errors returned inside a successful envelope
//! - Placement decision pass-through including empty remote targets

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "Test-only assertions and helpers are permitted."
)]

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;

use edge_gate_core::CipherError;
use edge_gate_core::EnvelopeCipher;
use edge_gate_core::GatewayResponse;
use edge_gate_core::InterfaceError;
use edge_gate_core::JsonMap;
use edge_gate_core::NetworkInterfaces;
use edge_gate_core::PeerAddress;
use edge_gate_core::PlacementDecision;
use edge_gate_core::PlacementEngine;
use edge_gate_core::RemoteTargetInfo;
use edge_gate_core::RequestGateway;
use edge_gate_core::RequesterIdentity;
use edge_gate_core::SenderResolver;
use edge_gate_core::ServiceDescriptor;
use edge_gate_core::runtime::INVALID_PARAMETER;
use serde_json::Value;
use serde_json::json;

// ============================================================================
// SECTION: Fakes
// ============================================================================

/// Cipher that passes JSON through unencrypted and counts decrypt calls.
struct PlainCipher {
    decrypts: AtomicUsize,
}

impl PlainCipher {
    fn new() -> Self {
        Self {
            decrypts: AtomicUsize::new(0),
        }
    }

    fn decrypt_count(&self) -> usize {
        self.decrypts.load(Ordering::SeqCst)
    }
}

impl EnvelopeCipher for PlainCipher {
    fn decrypt(&self, data: &[u8]) -> Result<JsonMap, CipherError> {
        self.decrypts.fetch_add(1, Ordering::SeqCst);
        let value: Value = serde_json::from_slice(data)
            .map_err(|err| CipherError::Decrypt(err.to_string()))?;
        value
            .as_object()
            .cloned()
            .ok_or_else(|| CipherError::Decrypt("payload is not a map".to_string()))
    }

    fn encrypt(&self, value: &JsonMap) -> Result<Vec<u8>, CipherError> {
        serde_json::to_vec(value).map_err(|err| CipherError::Encrypt(err.to_string()))
    }
}

/// Cipher whose encrypt path always fails.
struct EncryptFailCipher {
    inner: PlainCipher,
}

impl EnvelopeCipher for EncryptFailCipher {
    fn decrypt(&self, data: &[u8]) -> Result<JsonMap, CipherError> {
        self.inner.decrypt(data)
    }

    fn encrypt(&self, _value: &JsonMap) -> Result<Vec<u8>, CipherError> {
        Err(CipherError::Encrypt("sealed shut".to_string()))
    }
}

/// Engine returning a fixed decision and recording descriptors.
struct FixedEngine {
    decision: PlacementDecision,
    calls: Mutex<Vec<ServiceDescriptor>>,
}

impl FixedEngine {
    fn new(decision: PlacementDecision) -> Self {
        Self {
            decision,
            calls: Mutex::new(Vec::new()),
        }
    }

    fn calls(&self) -> Vec<ServiceDescriptor> {
        self.calls.lock().expect("engine lock").clone()
    }
}

impl PlacementEngine for FixedEngine {
    fn request_service(&self, descriptor: ServiceDescriptor) -> PlacementDecision {
        self.calls.lock().expect("engine lock").push(descriptor);
        self.decision.clone()
    }
}

/// Resolver backed by a fixed port table.
struct TableResolver {
    entries: Vec<(u16, &'static str)>,
}

impl SenderResolver for TableResolver {
    fn name_by_port(&self, port: u16) -> Option<RequesterIdentity> {
        self.entries
            .iter()
            .find(|(candidate, _)| *candidate == port)
            .map(|(_, name)| RequesterIdentity::new(*name))
    }
}

/// Interface accessor with a fixed outcome.
enum StaticInterfaces {
    Known(Vec<&'static str>),
    Broken,
}

impl NetworkInterfaces for StaticInterfaces {
    fn local_addresses(&self) -> Result<Vec<String>, InterfaceError> {
        match self {
            Self::Known(addresses) => {
                Ok(addresses.iter().map(|address| (*address).to_string()).collect())
            }
            Self::Broken => Err(InterfaceError::Unavailable("no interfaces".to_string())),
        }
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

fn default_decision() -> PlacementDecision {
    PlacementDecision {
        message: "OK".to_string(),
        service_name: "echo".to_string(),
        remote_target: RemoteTargetInfo {
            execution_type: "native".to_string(),
            target: "192.168.0.20".to_string(),
        },
    }
}

fn well_formed_body() -> Vec<u8> {
    serde_json::to_vec(&json!({
        "ServiceName": "echo",
        "ServiceRequester": "appX",
        "ServiceInfo": [
            {"ExecutionType": "native", "ExecCmd": ["echo", "hi"]},
        ],
    }))
    .expect("serialize body")
}

struct Harness {
    gateway: RequestGateway,
    cipher: Arc<PlainCipher>,
    engine: Arc<FixedEngine>,
}

fn harness(decision: PlacementDecision, interfaces: StaticInterfaces) -> Harness {
    let cipher = Arc::new(PlainCipher::new());
    let engine = Arc::new(FixedEngine::new(decision));
    let resolver = Arc::new(TableResolver {
        entries: vec![(4000, "port-app")],
    });
    let gateway = RequestGateway::new(resolver, Arc::new(interfaces))
        .with_engine(engine.clone())
        .with_cipher(cipher.clone());
    Harness {
        gateway,
        cipher,
        engine,
    }
}

fn decode(body: &[u8]) -> JsonMap {
    let value: Value = serde_json::from_slice(body).expect("response json");
    value.as_object().cloned().expect("response map")
}

// ============================================================================
// SECTION: Readiness
// ============================================================================

#[test]
fn gateway_without_engine_is_unavailable() {
    let resolver = Arc::new(TableResolver {
        entries: Vec::new(),
    });
    let gateway = RequestGateway::new(resolver, Arc::new(StaticInterfaces::Known(Vec::new())))
        .with_cipher(Arc::new(PlainCipher::new()));
    assert!(!gateway.is_ready());
    let peer = PeerAddress::parse("[::1]:4000");
    assert_eq!(gateway.handle(&peer, &well_formed_body()), GatewayResponse::Unavailable);
}

#[test]
fn gateway_without_cipher_is_unavailable() {
    let resolver = Arc::new(TableResolver {
        entries: Vec::new(),
    });
    let gateway = RequestGateway::new(resolver, Arc::new(StaticInterfaces::Known(Vec::new())))
        .with_engine(Arc::new(FixedEngine::new(default_decision())));
    assert!(!gateway.is_ready());
    let peer = PeerAddress::parse("[::1]:4000");
    assert_eq!(gateway.handle(&peer, &well_formed_body()), GatewayResponse::Unavailable);
}

// ============================================================================
// SECTION: Access Control
// ============================================================================

#[test]
fn loopback_peer_passes_regardless_of_interface_list() {
    let harness = harness(default_decision(), StaticInterfaces::Broken);
    let peer = PeerAddress::parse("[::1]:4000");
    let response = harness.gateway.handle(&peer, &well_formed_body());
    assert!(matches!(response, GatewayResponse::Accepted { .. }));
}

#[test]
fn known_local_address_passes_the_access_check() {
    let harness = harness(default_decision(), StaticInterfaces::Known(vec!["192.168.0.10"]));
    let peer = PeerAddress::parse("192.168.0.10:5000");
    let response = harness.gateway.handle(&peer, &well_formed_body());
    assert!(matches!(response, GatewayResponse::Accepted { .. }));
}

#[test]
fn unknown_peer_is_rejected_without_decrypting() {
    let harness = harness(default_decision(), StaticInterfaces::Known(vec!["192.168.0.10"]));
    let peer = PeerAddress::parse("10.9.8.7:5000");
    let response = harness.gateway.handle(&peer, &well_formed_body());
    assert_eq!(response, GatewayResponse::Rejected);
    assert_eq!(harness.cipher.decrypt_count(), 0);
    assert!(harness.engine.calls().is_empty());
}

#[test]
fn interface_failure_is_unavailable_without_decrypting() {
    let harness = harness(default_decision(), StaticInterfaces::Broken);
    let peer = PeerAddress::parse("10.9.8.7:5000");
    let response = harness.gateway.handle(&peer, &well_formed_body());
    assert_eq!(response, GatewayResponse::Unavailable);
    assert_eq!(harness.cipher.decrypt_count(), 0);
}

// ============================================================================
// SECTION: Decrypt and Validate
// ============================================================================

#[test]
fn undecryptable_body_is_unavailable() {
    let harness = harness(default_decision(), StaticInterfaces::Known(Vec::new()));
    let peer = PeerAddress::parse("[::1]:4000");
    let response = harness.gateway.handle(&peer, b"not json at all");
    assert_eq!(response, GatewayResponse::Unavailable);
    assert!(harness.engine.calls().is_empty());
}

#[test]
fn validation_failure_is_returned_inside_a_success_envelope() {
    let harness = harness(default_decision(), StaticInterfaces::Known(Vec::new()));
    let peer = PeerAddress::parse("[::1]:4000");
    let body = serde_json::to_vec(&json!({
        "ServiceName": "echo",
        "ServiceRequester": "appX",
        "ServiceInfo": "oops",
    }))
    .expect("serialize body");
    let GatewayResponse::Accepted {
        body,
    } = harness.gateway.handle(&peer, &body) else {
        panic!("expected accepted response");
    };
    let reply = decode(&body);
    assert_eq!(reply.get("Message"), Some(&json!(INVALID_PARAMETER)));
    assert_eq!(reply.get("ServiceName"), Some(&json!("echo")));
    assert_eq!(reply.get("RemoteTargetInfo"), Some(&Value::Null));
    assert!(harness.engine.calls().is_empty());
}

#[test]
fn port_resolution_feeds_the_requester_into_the_descriptor() {
    let harness = harness(default_decision(), StaticInterfaces::Known(Vec::new()));
    let peer = PeerAddress::parse("[::1]:4000");
    let response = harness.gateway.handle(&peer, &well_formed_body());
    assert!(matches!(response, GatewayResponse::Accepted { .. }));
    let calls = harness.engine.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].requester.as_str(), "port-app");
}

#[test]
fn unresolvable_port_falls_back_to_the_payload_requester() {
    let harness = harness(default_decision(), StaticInterfaces::Known(Vec::new()));
    let peer = PeerAddress::parse("[::1]:9999");
    let response = harness.gateway.handle(&peer, &well_formed_body());
    assert!(matches!(response, GatewayResponse::Accepted { .. }));
    let calls = harness.engine.calls();
    assert_eq!(calls[0].requester.as_str(), "appX");
}

// ============================================================================
// SECTION: Dispatch and Respond
// ============================================================================

#[test]
fn placement_decision_fields_reach_the_response_map() {
    let harness = harness(default_decision(), StaticInterfaces::Known(Vec::new()));
    let peer = PeerAddress::parse("[::1]:4000");
    let GatewayResponse::Accepted {
        body,
    } = harness.gateway.handle(&peer, &well_formed_body()) else {
        panic!("expected accepted response");
    };
    let reply = decode(&body);
    assert_eq!(reply.get("Message"), Some(&json!("OK")));
    assert_eq!(reply.get("ServiceName"), Some(&json!("echo")));
    assert_eq!(
        reply.get("RemoteTargetInfo"),
        Some(&json!({"ExecutionType": "native", "Target": "192.168.0.20"}))
    );
}

#[test]
fn empty_remote_target_yields_empty_target_fields() {
    let decision = PlacementDecision {
        message: "no candidates".to_string(),
        service_name: "echo".to_string(),
        remote_target: RemoteTargetInfo::default(),
    };
    let harness = harness(decision, StaticInterfaces::Known(Vec::new()));
    let peer = PeerAddress::parse("[::1]:4000");
    let GatewayResponse::Accepted {
        body,
    } = harness.gateway.handle(&peer, &well_formed_body()) else {
        panic!("expected accepted response");
    };
    let reply = decode(&body);
    assert_eq!(reply.get("Message"), Some(&json!("no candidates")));
    assert_eq!(
        reply.get("RemoteTargetInfo"),
        Some(&json!({"ExecutionType": "", "Target": ""}))
    );
}

#[test]
fn encrypt_failure_after_dispatch_is_unavailable() {
    let cipher = Arc::new(EncryptFailCipher {
        inner: PlainCipher::new(),
    });
    let engine = Arc::new(FixedEngine::new(default_decision()));
    let resolver = Arc::new(TableResolver {
        entries: Vec::new(),
    });
    let gateway =
        RequestGateway::new(resolver, Arc::new(StaticInterfaces::Known(Vec::new())))
            .with_engine(engine)
            .with_cipher(cipher);
    let peer = PeerAddress::parse("[::1]:4000");
    assert_eq!(gateway.handle(&peer, &well_formed_body()), GatewayResponse::Unavailable);
}
