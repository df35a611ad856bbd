// crates/edge-gate-core/tests/peer_address.rs
// ============================================================================
// Module: Peer Address Unit Tests
// Description: Parsing tests for transport remote-address strings.
// Purpose: Validate loopback special-casing and host/port splitting.
// ============================================================================

//! ## Overview
//! Unit tests for [`PeerAddress::parse`]: loopback marker containment,
//! bracketed and unbracketed IPv6 loopback forms, dotted IPv4 splitting, and
//! port candidate parsing.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "Test-only assertions and helpers are permitted."
)]

use edge_gate_core::PeerAddress;
use edge_gate_core::PeerHost;

#[test]
fn bracketed_ipv6_loopback_parses_host_and_port() {
    let peer = PeerAddress::parse("[::1]:56001");
    assert!(peer.is_loopback());
    assert_eq!(peer.port(), Some(56001));
}

#[test]
fn unbracketed_ipv6_loopback_takes_trailing_segment_as_port() {
    let peer = PeerAddress::parse("::1:40000");
    assert!(peer.is_loopback());
    assert_eq!(peer.port(), Some(40000));
}

#[test]
fn bare_loopback_marker_has_no_port() {
    let peer = PeerAddress::parse("::1");
    assert!(peer.is_loopback());
    assert_eq!(peer.port(), None);
    assert_eq!(peer.port_candidate(), None);
}

#[test]
fn dotted_address_splits_into_host_and_port() {
    let peer = PeerAddress::parse("192.168.0.10:31337");
    assert!(!peer.is_loopback());
    assert_eq!(peer.host(), &PeerHost::Address("192.168.0.10".to_string()));
    assert_eq!(peer.port(), Some(31337));
}

#[test]
fn ipv4_loopback_is_not_the_loopback_marker() {
    // Only the ::1 notation is special-cased; 127.0.0.1 goes through the
    // interface-list comparison like any other address.
    let peer = PeerAddress::parse("127.0.0.1:9000");
    assert!(!peer.is_loopback());
    assert_eq!(peer.host(), &PeerHost::Address("127.0.0.1".to_string()));
}

#[test]
fn portless_address_yields_no_port_candidate() {
    let peer = PeerAddress::parse("10.0.0.7");
    assert!(!peer.is_loopback());
    assert_eq!(peer.port_candidate(), None);
    assert_eq!(peer.port(), None);
}

#[test]
fn non_numeric_port_candidate_does_not_parse() {
    let peer = PeerAddress::parse("10.0.0.7:http");
    assert_eq!(peer.port_candidate(), Some("http"));
    assert_eq!(peer.port(), None);
}

#[test]
fn display_round_trips_host_and_port() {
    let peer = PeerAddress::parse("192.168.0.10:31337");
    assert_eq!(peer.to_string(), "192.168.0.10:31337");
}
