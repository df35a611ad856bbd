// crates/edge-gate-cli/src/serve_policy.rs
// ============================================================================
// Module: Serve Policy
// Description: Network exposure policy checks for the node launcher.
// Purpose: Enforce safe-by-default bind behavior with explicit opt-in.
// Dependencies: edge-gate-config, std
// ============================================================================

//! ## Overview
//! Provides safety checks for binding the admission server to non-loopback
//! addresses. The policy is fail-closed: non-loopback binds require explicit
//! opt-in through a CLI flag or environment variable.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::env;
use std::net::SocketAddr;

use edge_gate_config::EdgeGateConfig;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Environment variable enabling non-loopback server binds.
pub const ALLOW_NON_LOOPBACK_ENV: &str = "EDGE_GATE_ALLOW_NON_LOOPBACK";

// ============================================================================
// SECTION: Types
// ============================================================================

/// Bind outcome metadata for launch warnings.
#[derive(Debug, Clone)]
pub struct BindOutcome {
    /// Bound socket address.
    pub bind_addr: SocketAddr,
    /// True when the server is bound to a non-loopback address.
    pub network_exposed: bool,
}

/// Serve policy failures for bind safety.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServePolicyError {
    /// Environment variable was set to an invalid value.
    #[error("{ALLOW_NON_LOOPBACK_ENV} has invalid value: {value}")]
    InvalidEnv {
        /// Raw environment value.
        value: String,
    },
    /// Bind string failed to parse.
    #[error("bind address failed to parse: {bind}: {error}")]
    InvalidBind {
        /// Raw bind value.
        bind: String,
        /// Parse error message.
        error: String,
    },
    /// Non-loopback binding requires explicit opt-in.
    #[error(
        "bind {bind} is not loopback; pass --allow-non-loopback or set {ALLOW_NON_LOOPBACK_ENV}"
    )]
    NonLoopbackOptInRequired {
        /// Bind address.
        bind: String,
    },
}

// ============================================================================
// SECTION: Policy
// ============================================================================

/// Resolves the non-loopback opt-in flag from CLI and environment.
///
/// # Errors
///
/// Returns [`ServePolicyError::InvalidEnv`] when the environment value is
/// invalid.
pub fn resolve_allow_non_loopback(flag: bool) -> Result<bool, ServePolicyError> {
    if flag {
        return Ok(true);
    }
    let Some(value) = env::var_os(ALLOW_NON_LOOPBACK_ENV) else {
        return Ok(false);
    };
    let value = value.to_string_lossy().to_string();
    parse_allow_non_loopback_value(&value)
}

/// Enforces loopback-only binds unless explicitly opted out.
///
/// # Errors
///
/// Returns [`ServePolicyError`] when the bind address is invalid or exposes
/// the node without opt-in.
pub fn enforce_local_only(
    config: &EdgeGateConfig,
    allow_non_loopback: bool,
) -> Result<BindOutcome, ServePolicyError> {
    let bind = config.server.bind.as_str();
    let addr: SocketAddr =
        bind.parse().map_err(|err: std::net::AddrParseError| ServePolicyError::InvalidBind {
            bind: bind.to_string(),
            error: err.to_string(),
        })?;
    let network_exposed = !addr.ip().is_loopback();
    if network_exposed && !allow_non_loopback {
        return Err(ServePolicyError::NonLoopbackOptInRequired {
            bind: bind.to_string(),
        });
    }
    Ok(BindOutcome {
        bind_addr: addr,
        network_exposed,
    })
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Parses a bool-ish string (true/false/1/0/yes/no/on/off).
fn parse_boolish(value: &str) -> Option<bool> {
    let normalized = value.trim().to_ascii_lowercase();
    match normalized.as_str() {
        "1" | "true" | "yes" | "y" | "on" => Some(true),
        "0" | "false" | "no" | "n" | "off" => Some(false),
        _ => None,
    }
}

/// Parses an env value for allow-non-loopback.
fn parse_allow_non_loopback_value(value: &str) -> Result<bool, ServePolicyError> {
    parse_boolish(value).map_or_else(
        || {
            Err(ServePolicyError::InvalidEnv {
                value: value.to_string(),
            })
        },
        Ok,
    )
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    #![allow(
        clippy::expect_used,
        reason = "Test helpers use expect/expect_err for concise failure messages."
    )]

    use edge_gate_config::EdgeGateConfig;

    use super::ServePolicyError;
    use super::enforce_local_only;
    use super::parse_allow_non_loopback_value;

    fn config_with_bind(bind: &str) -> EdgeGateConfig {
        let mut config = EdgeGateConfig::default();
        config.server.bind = bind.to_string();
        config
    }

    #[test]
    fn loopback_bind_needs_no_opt_in() {
        let config = config_with_bind("127.0.0.1:56001");
        let outcome = enforce_local_only(&config, false).expect("loopback bind");
        assert!(!outcome.network_exposed);
    }

    #[test]
    fn non_loopback_requires_opt_in() {
        let config = config_with_bind("0.0.0.0:56001");
        let err = enforce_local_only(&config, false).expect_err("expected opt-in error");
        assert!(matches!(err, ServePolicyError::NonLoopbackOptInRequired { .. }));
    }

    #[test]
    fn non_loopback_with_opt_in_is_exposed() {
        let config = config_with_bind("0.0.0.0:56001");
        let outcome = enforce_local_only(&config, true).expect("opted-in bind");
        assert!(outcome.network_exposed);
    }

    #[test]
    fn invalid_bind_is_rejected() {
        let config = config_with_bind("not-an-address");
        let err = enforce_local_only(&config, false).expect_err("expected parse error");
        assert!(matches!(err, ServePolicyError::InvalidBind { .. }));
    }

    #[test]
    fn boolish_env_values_parse() {
        assert!(parse_allow_non_loopback_value("1").expect("truthy"));
        assert!(parse_allow_non_loopback_value("Yes").expect("truthy"));
        assert!(!parse_allow_non_loopback_value("off").expect("falsy"));
        assert!(parse_allow_non_loopback_value("maybe").is_err());
    }
}
