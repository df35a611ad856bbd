// crates/edge-gate-core/src/core/peer.rs
// ============================================================================
// Module: Edge Gate Peer Addresses
// Description: Structured peer address model for the access-control check.
// Purpose: Parse transport remote-address strings into host and port parts.
// Dependencies: std
// ============================================================================

//! ## Overview
//! A [`PeerAddress`] is derived exactly once per request from the
//! transport-level remote address string. The IPv6 loopback notation is
//! special-cased as an explicit containment check against a known marker; it
//! is deliberately not generalized to hostname matching so the access gate
//! stays as narrow as the behavior it enforces.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Loopback notation recognized in transport remote-address strings.
pub const LOOPBACK_MARKER: &str = "::1";

// ============================================================================
// SECTION: Peer Host
// ============================================================================

/// Host component of a peer address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PeerHost {
    /// Peer connected over the loopback interface.
    Loopback,
    /// Dotted or numeric peer address.
    Address(String),
}

impl fmt::Display for PeerHost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Loopback => f.write_str(LOOPBACK_MARKER),
            Self::Address(host) => f.write_str(host),
        }
    }
}

// ============================================================================
// SECTION: Peer Address
// ============================================================================

/// Network origin of a request, split into host and port candidate.
///
/// # Invariants
/// - Derived once per request; never mutated afterward.
/// - `port` is a raw candidate; it only becomes usable after an integer
///   parse succeeds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeerAddress {
    /// Host component.
    host: PeerHost,
    /// Source port candidate as received from the transport.
    port: Option<String>,
}

impl PeerAddress {
    /// Parses a transport remote-address string.
    ///
    /// Addresses containing the loopback marker map to [`PeerHost::Loopback`]
    /// with the trailing colon-delimited segment as the port candidate. All
    /// other addresses split on the first colon into host and port.
    #[must_use]
    pub fn parse(remote: &str) -> Self {
        if remote.contains(LOOPBACK_MARKER) {
            // A bare marker carries no port; otherwise the trailing
            // colon-delimited segment is the port candidate.
            let port = if remote == LOOPBACK_MARKER {
                None
            } else {
                remote
                    .rsplit(':')
                    .next()
                    .filter(|segment| !segment.is_empty() && !segment.contains(']'))
                    .map(str::to_string)
            };
            return Self {
                host: PeerHost::Loopback,
                port,
            };
        }
        let mut parts = remote.splitn(2, ':');
        let host = parts.next().unwrap_or_default().to_string();
        let port = parts.next().filter(|segment| !segment.is_empty()).map(str::to_string);
        Self {
            host: PeerHost::Address(host),
            port,
        }
    }

    /// Builds a peer address from already-split parts.
    #[must_use]
    pub fn from_parts(host: PeerHost, port: Option<String>) -> Self {
        Self {
            host,
            port,
        }
    }

    /// Returns the host component.
    #[must_use]
    pub fn host(&self) -> &PeerHost {
        &self.host
    }

    /// Returns true when the peer connected over loopback.
    #[must_use]
    pub fn is_loopback(&self) -> bool {
        matches!(self.host, PeerHost::Loopback)
    }

    /// Returns the source port when the candidate parses as an integer.
    #[must_use]
    pub fn port(&self) -> Option<u16> {
        self.port.as_deref().and_then(|candidate| candidate.parse::<u16>().ok())
    }

    /// Returns the raw port candidate.
    #[must_use]
    pub fn port_candidate(&self) -> Option<&str> {
        self.port.as_deref()
    }
}

impl fmt::Display for PeerAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.port {
            Some(port) => write!(f, "{}:{port}", self.host),
            None => self.host.fmt(f),
        }
    }
}
