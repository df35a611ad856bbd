// crates/edge-gate-config/tests/field_validation.rs
// ============================================================================
// Module: Config Field Validation Tests
// Description: Per-field validation tests for the config model.
// Purpose: Validate limits on bind, addresses, body size, and paths.
// ============================================================================

//! ## Overview
//! Tests for per-field validation: bind address parsing, local address list
//! shape and limits, body size bounds, and store path requirements.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "Test-only assertions and helpers are permitted."
)]

use std::path::PathBuf;

use edge_gate_config::ConfigError;
use edge_gate_config::EdgeGateConfig;
use edge_gate_config::StoreType;

fn base_config() -> EdgeGateConfig {
    EdgeGateConfig::default()
}

#[test]
fn default_config_is_valid() {
    assert!(base_config().validate().is_ok());
}

#[test]
fn non_socket_bind_is_rejected() {
    let mut config = base_config();
    config.server.bind = "not-an-address".to_string();
    assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
}

#[test]
fn zero_body_limit_is_rejected() {
    let mut config = base_config();
    config.server.max_body_bytes = 0;
    assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
}

#[test]
fn oversized_body_limit_is_rejected() {
    let mut config = base_config();
    config.server.max_body_bytes = 64 * 1024 * 1024;
    assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
}

#[test]
fn non_ip_local_address_is_rejected() {
    let mut config = base_config();
    config.network.local_addresses = vec!["edge-node-1.local".to_string()];
    assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
}

#[test]
fn too_many_local_addresses_are_rejected() {
    let mut config = base_config();
    config.network.local_addresses =
        (0..100).map(|octet| format!("10.0.0.{octet}")).collect();
    assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
}

#[test]
fn sqlite_store_without_path_is_rejected() {
    let mut config = base_config();
    config.store.store_type = StoreType::Sqlite;
    config.store.path = None;
    assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
}

#[test]
fn overlong_key_path_component_is_rejected() {
    let mut config = base_config();
    config.cipher.key_path = Some(PathBuf::from(format!("/etc/{}", "k".repeat(300))));
    assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
}

#[test]
fn empty_key_path_is_rejected() {
    let mut config = base_config();
    config.cipher.key_path = Some(PathBuf::new());
    assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
}
