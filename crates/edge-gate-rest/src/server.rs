// crates/edge-gate-rest/src/server.rs
// ============================================================================
// Module: Admission REST Server
// Description: HTTP transport binding for the request gateway.
// Purpose: Serve the admission endpoint with audit logging and body caps.
// Dependencies: edge-gate-core, edge-gate-config, axum, tokio
// ============================================================================

//! ## Overview
//! The REST server exposes a single admission endpoint. Each request flows
//! through the body-size cap, peer-address derivation, and the gateway state
//! machine, then maps to exactly one HTTP status. Security posture: every
//! inbound byte is untrusted until the gateway accepts it, and access
//! rejections intentionally carry an empty body.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::extract::ConnectInfo;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::post;
use bytes::Bytes;
use edge_gate_config::EdgeGateConfig;
use edge_gate_core::GatewayResponse;
use edge_gate_core::PeerAddress;
use edge_gate_core::RequestGateway;
use edge_gate_core::SharedPlacementEngine;
use edge_gate_core::SharedSenderResolver;
use thiserror::Error;

use crate::audit::GateAuditEvent;
use crate::audit::GateAuditSink;
use crate::audit::NoopAuditSink;
use crate::audit::StderrAuditSink;
use crate::cipher::AesGcmEnvelopeCipher;
use crate::netinfo::ConfiguredInterfaceTable;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Route serving the admission endpoint.
pub const SERVICES_ROUTE: &str = "/api/v1/orchestration/services";

// ============================================================================
// SECTION: Errors
// ============================================================================

/// REST server errors.
#[derive(Debug, Error)]
pub enum RestServerError {
    /// Configuration errors.
    #[error("config error: {0}")]
    Config(String),
    /// Initialization errors.
    #[error("init error: {0}")]
    Init(String),
    /// Transport errors.
    #[error("transport error: {0}")]
    Transport(String),
}

// ============================================================================
// SECTION: Server
// ============================================================================

/// Admission REST server instance.
pub struct RestServer {
    /// Node configuration.
    config: EdgeGateConfig,
    /// Wired request gateway.
    gateway: Arc<RequestGateway>,
    /// Audit sink for admission outcomes.
    audit: Arc<dyn GateAuditSink>,
}

impl RestServer {
    /// Builds a new REST server from configuration.
    ///
    /// The cipher is attached only when a key path is configured; without it
    /// the gateway stays wired but answers unavailable, so a node missing its
    /// key serves nothing rather than serving plaintext.
    ///
    /// # Errors
    ///
    /// Returns [`RestServerError::Init`] when a configured key file cannot be
    /// loaded.
    pub fn from_config(
        config: EdgeGateConfig,
        engine: SharedPlacementEngine,
        resolver: SharedSenderResolver,
    ) -> Result<Self, RestServerError> {
        let interfaces = Arc::new(ConfiguredInterfaceTable::from_config(&config.network));
        let mut gateway = RequestGateway::new(resolver, interfaces).with_engine(engine);
        if let Some(key_path) = &config.cipher.key_path {
            let cipher = AesGcmEnvelopeCipher::from_key_file(key_path)
                .map_err(|err| RestServerError::Init(err.to_string()))?;
            gateway = gateway.with_cipher(Arc::new(cipher));
        }
        let audit: Arc<dyn GateAuditSink> = if config.audit.enabled {
            Arc::new(StderrAuditSink)
        } else {
            Arc::new(NoopAuditSink)
        };
        Ok(Self {
            config,
            gateway: Arc::new(gateway),
            audit,
        })
    }

    /// Returns true when the gateway can admit requests.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.gateway.is_ready()
    }

    /// Runs the server until the process terminates.
    ///
    /// # Errors
    ///
    /// Returns [`RestServerError`] when the bind address is invalid or the
    /// transport fails.
    pub async fn serve(self) -> Result<(), RestServerError> {
        let addr: SocketAddr = self
            .config
            .server
            .bind
            .parse()
            .map_err(|_| RestServerError::Config("invalid bind address".to_string()))?;
        let state = Arc::new(ServerState {
            gateway: self.gateway,
            audit: self.audit,
            max_body_bytes: self.config.server.max_body_bytes,
        });
        let app = Router::new().route(SERVICES_ROUTE, post(handle_admission)).with_state(state);
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|_| RestServerError::Transport("http bind failed".to_string()))?;
        axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
            .await
            .map_err(|_| RestServerError::Transport("http server failed".to_string()))
    }
}

/// Shared server state for the admission handler.
struct ServerState {
    /// Wired request gateway.
    gateway: Arc<RequestGateway>,
    /// Audit sink for admission outcomes.
    audit: Arc<dyn GateAuditSink>,
    /// Maximum allowed request body size.
    max_body_bytes: usize,
}

// ============================================================================
// SECTION: Handler
// ============================================================================

/// Handles one admission request.
async fn handle_admission(
    State(state): State<Arc<ServerState>>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    body: Bytes,
) -> impl IntoResponse {
    let peer_label = peer.to_string();
    if body.len() > state.max_body_bytes {
        state.audit.record(&GateAuditEvent::new(peer_label, "oversized", body.len(), 0));
        return (StatusCode::PAYLOAD_TOO_LARGE, Vec::new());
    }
    let address = PeerAddress::parse(&peer_label);
    let response = dispatch_gateway(&state.gateway, &address, &body);
    let outcome = outcome_label(&response);
    let (status, reply) = match response {
        GatewayResponse::Accepted {
            body,
        } => (StatusCode::OK, body),
        GatewayResponse::Unavailable => (StatusCode::SERVICE_UNAVAILABLE, Vec::new()),
        GatewayResponse::Rejected => (StatusCode::NOT_ACCEPTABLE, Vec::new()),
    };
    state.audit.record(&GateAuditEvent::new(peer_label, outcome, body.len(), reply.len()));
    (status, reply)
}

/// Runs the gateway without starving the async runtime.
fn dispatch_gateway(
    gateway: &RequestGateway,
    peer: &PeerAddress,
    body: &[u8],
) -> GatewayResponse {
    match tokio::runtime::Handle::try_current() {
        Ok(handle) if handle.runtime_flavor() == tokio::runtime::RuntimeFlavor::MultiThread => {
            tokio::task::block_in_place(|| gateway.handle(peer, body))
        }
        _ => gateway.handle(peer, body),
    }
}

/// Returns the audit label for a gateway response.
const fn outcome_label(response: &GatewayResponse) -> &'static str {
    match response {
        GatewayResponse::Accepted {
            ..
        } => "accepted",
        GatewayResponse::Unavailable => "unavailable",
        GatewayResponse::Rejected => "rejected",
    }
}
