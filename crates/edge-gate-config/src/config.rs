// crates/edge-gate-config/src/config.rs
// ============================================================================
// Module: Edge Gate Configuration
// Description: Configuration loading and validation for an Edge Gate node.
// Purpose: Provide strict, fail-closed config parsing with hard limits.
// Dependencies: edge-gate-store-sqlite, serde, toml
// ============================================================================

//! ## Overview
//! Configuration is loaded from a TOML file with strict size and path limits.
//! Missing or invalid configuration fails closed to preserve the admission
//! boundary: a node with a broken config answers nothing rather than
//! answering wrongly.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::env;
use std::fs;
use std::net::IpAddr;
use std::net::SocketAddr;
use std::path::Path;
use std::path::PathBuf;

use edge_gate_store_sqlite::SqliteStoreMode;
use edge_gate_store_sqlite::SqliteSyncMode;
use serde::Deserialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default configuration filename when no path is specified.
const DEFAULT_CONFIG_NAME: &str = "edge-gate.toml";
/// Environment variable used to override the config path.
pub const CONFIG_ENV_VAR: &str = "EDGE_GATE_CONFIG";
/// Maximum configuration file size in bytes.
pub(crate) const MAX_CONFIG_FILE_SIZE: u64 = 1024 * 1024;
/// Maximum length of a single path component.
pub(crate) const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
pub(crate) const MAX_TOTAL_PATH_LENGTH: usize = 4096;
/// Maximum number of configured local addresses.
pub(crate) const MAX_LOCAL_ADDRESSES: usize = 64;
/// Default bind address for the admission endpoint.
pub const DEFAULT_BIND: &str = "127.0.0.1:56001";
/// Default maximum request body size in bytes.
pub const DEFAULT_MAX_BODY_BYTES: usize = 1024 * 1024;
/// Maximum allowed request body size in bytes.
pub(crate) const MAX_MAX_BODY_BYTES: usize = 8 * 1024 * 1024;
/// Default busy timeout for the sqlite store (ms).
const DEFAULT_STORE_BUSY_TIMEOUT_MS: u64 = 5_000;

// ============================================================================
// SECTION: Configuration Types
// ============================================================================

/// Edge Gate node configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EdgeGateConfig {
    /// Admission server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Envelope cipher configuration.
    #[serde(default)]
    pub cipher: CipherConfig,
    /// Local network address configuration.
    #[serde(default)]
    pub network: NetworkConfig,
    /// System-metadata store configuration.
    #[serde(default)]
    pub store: StoreConfig,
    /// Audit logging configuration.
    #[serde(default)]
    pub audit: AuditConfig,
}

/// Admission server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Socket address the admission endpoint binds to.
    #[serde(default = "default_bind")]
    pub bind: String,
    /// Maximum accepted request body size in bytes.
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

/// Envelope cipher configuration.
///
/// # Invariants
/// - `key_path`, when set, points to a base64-encoded 32-byte key file
///   readable only by the node. Absence leaves the gateway in the not-ready
///   state.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CipherConfig {
    /// Path to the symmetric key file.
    #[serde(default)]
    pub key_path: Option<PathBuf>,
}

/// Local network address configuration for the access-control check.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NetworkConfig {
    /// Addresses this node answers for, in string form.
    #[serde(default)]
    pub local_addresses: Vec<String>,
}

/// Store backend selection.
///
/// # Invariants
/// - Variants are stable for serialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreType {
    /// In-memory store (ephemeral).
    #[default]
    Memory,
    /// SQLite-backed store (durable).
    Sqlite,
}

/// System-metadata store configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    /// Store backend type.
    #[serde(default, rename = "type")]
    pub store_type: StoreType,
    /// Database file path (required for sqlite).
    #[serde(default)]
    pub path: Option<PathBuf>,
    /// Busy timeout in milliseconds.
    #[serde(default = "default_store_busy_timeout_ms")]
    pub busy_timeout_ms: u64,
    /// `SQLite` journal mode.
    #[serde(default)]
    pub journal_mode: SqliteStoreMode,
    /// `SQLite` sync mode.
    #[serde(default)]
    pub sync_mode: SqliteSyncMode,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            store_type: StoreType::Memory,
            path: None,
            busy_timeout_ms: default_store_busy_timeout_ms(),
            journal_mode: SqliteStoreMode::default(),
            sync_mode: SqliteSyncMode::default(),
        }
    }
}

/// Audit logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AuditConfig {
    /// Whether admission outcomes are written to the audit sink.
    #[serde(default = "default_audit_enabled")]
    pub enabled: bool,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            enabled: default_audit_enabled(),
        }
    }
}

// ============================================================================
// SECTION: Defaults
// ============================================================================

/// Default bind address.
fn default_bind() -> String {
    DEFAULT_BIND.to_string()
}

/// Default request body cap.
const fn default_max_body_bytes() -> usize {
    DEFAULT_MAX_BODY_BYTES
}

/// Default store busy timeout.
const fn default_store_busy_timeout_ms() -> u64 {
    DEFAULT_STORE_BUSY_TIMEOUT_MS
}

/// Audit logging defaults on.
const fn default_audit_enabled() -> bool {
    true
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read.
    #[error("config io error: {0}")]
    Io(String),
    /// Config file exceeds the size limit.
    #[error("config file too large: {actual} > {limit} bytes")]
    TooLarge {
        /// Actual file size in bytes.
        actual: u64,
        /// Maximum allowed size in bytes.
        limit: u64,
    },
    /// Config file failed to parse.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Config content failed validation.
    #[error("config invalid: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Loading
// ============================================================================

/// Loads and validates configuration.
///
/// Path precedence: explicit argument, then [`CONFIG_ENV_VAR`], then
/// [`DEFAULT_CONFIG_NAME`] in the working directory.
///
/// # Errors
///
/// Returns [`ConfigError`] when the file cannot be read, exceeds the size
/// limit, fails to parse, or fails validation.
pub fn load_config(path: Option<&Path>) -> Result<EdgeGateConfig, ConfigError> {
    let path = resolve_config_path(path);
    let metadata = fs::metadata(&path).map_err(|err| ConfigError::Io(err.to_string()))?;
    if metadata.len() > MAX_CONFIG_FILE_SIZE {
        return Err(ConfigError::TooLarge {
            actual: metadata.len(),
            limit: MAX_CONFIG_FILE_SIZE,
        });
    }
    let raw = fs::read_to_string(&path).map_err(|err| ConfigError::Io(err.to_string()))?;
    let config: EdgeGateConfig =
        toml::from_str(&raw).map_err(|err| ConfigError::Parse(err.to_string()))?;
    config.validate()?;
    Ok(config)
}

/// Resolves the effective config path from argument, environment, default.
fn resolve_config_path(path: Option<&Path>) -> PathBuf {
    if let Some(path) = path {
        return path.to_path_buf();
    }
    if let Some(path) = env::var_os(CONFIG_ENV_VAR) {
        return PathBuf::from(path);
    }
    PathBuf::from(DEFAULT_CONFIG_NAME)
}

// ============================================================================
// SECTION: Validation
// ============================================================================

impl EdgeGateConfig {
    /// Validates the configuration, failing closed on any violation.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] describing the first violation found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.server.validate()?;
        self.cipher.validate()?;
        self.network.validate()?;
        self.store.validate()?;
        Ok(())
    }
}

impl ServerConfig {
    /// Validates bind address and body limits.
    fn validate(&self) -> Result<(), ConfigError> {
        self.bind
            .parse::<SocketAddr>()
            .map_err(|_| ConfigError::Invalid(format!("server.bind is not a socket address: {}", self.bind)))?;
        if self.max_body_bytes == 0 || self.max_body_bytes > MAX_MAX_BODY_BYTES {
            return Err(ConfigError::Invalid(format!(
                "server.max_body_bytes must be in 1..={MAX_MAX_BODY_BYTES}"
            )));
        }
        Ok(())
    }
}

impl CipherConfig {
    /// Validates the key path shape when present.
    fn validate(&self) -> Result<(), ConfigError> {
        if let Some(path) = &self.key_path {
            validate_path_shape(path, "cipher.key_path")?;
        }
        Ok(())
    }
}

impl NetworkConfig {
    /// Validates the configured address list.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.local_addresses.len() > MAX_LOCAL_ADDRESSES {
            return Err(ConfigError::Invalid(format!(
                "network.local_addresses exceeds {MAX_LOCAL_ADDRESSES} entries"
            )));
        }
        for address in &self.local_addresses {
            address.parse::<IpAddr>().map_err(|_| {
                ConfigError::Invalid(format!(
                    "network.local_addresses entry is not an ip address: {address}"
                ))
            })?;
        }
        Ok(())
    }
}

impl StoreConfig {
    /// Validates backend selection and path shape.
    fn validate(&self) -> Result<(), ConfigError> {
        match self.store_type {
            StoreType::Memory => Ok(()),
            StoreType::Sqlite => {
                let Some(path) = &self.path else {
                    return Err(ConfigError::Invalid(
                        "store.type = sqlite requires store.path".to_string(),
                    ));
                };
                validate_path_shape(path, "store.path")
            }
        }
    }
}

/// Validates component and total length limits for a configured path.
fn validate_path_shape(path: &Path, field: &str) -> Result<(), ConfigError> {
    let raw = path.as_os_str();
    if raw.is_empty() {
        return Err(ConfigError::Invalid(format!("{field} is empty")));
    }
    if raw.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid(format!(
            "{field} exceeds {MAX_TOTAL_PATH_LENGTH} bytes"
        )));
    }
    for component in path.components() {
        if component.as_os_str().len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid(format!(
                "{field} has a component longer than {MAX_PATH_COMPONENT_LENGTH} bytes"
            )));
        }
    }
    Ok(())
}
