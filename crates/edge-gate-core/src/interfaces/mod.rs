// crates/edge-gate-core/src/interfaces/mod.rs
// ============================================================================
// Module: Edge Gate Interfaces
// Description: Backend-agnostic interfaces for placement, crypto, and storage.
// Purpose: Define the contract surfaces used by the Edge Gate runtime.
// Dependencies: crate::core
// ============================================================================

//! ## Overview
//! Interfaces define how Edge Gate integrates with its external collaborators
//! without embedding backend-specific details: the placement engine, the
//! port-to-identity resolver, local network interface enumeration, the
//! envelope cipher, and the system-metadata store. Implementations must be
//! deterministic per request and fail closed on missing or invalid data.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::core::PlacementDecision;
use crate::core::RequesterIdentity;
use crate::core::ServiceDescriptor;

// ============================================================================
// SECTION: Shared Aliases
// ============================================================================

/// Structured map exchanged through the envelope cipher.
pub type JsonMap = serde_json::Map<String, serde_json::Value>;

// ============================================================================
// SECTION: Placement Engine
// ============================================================================

/// Orchestration engine deciding where a requested service executes.
///
/// The call is synchronous and has no error channel at this boundary; the
/// absence of a placement is signaled via an empty remote-target-info.
pub trait PlacementEngine {
    /// Requests a placement for a validated descriptor.
    fn request_service(&self, descriptor: ServiceDescriptor) -> PlacementDecision;
}

// ============================================================================
// SECTION: Sender Resolver
// ============================================================================

/// Port-to-identity resolver for locally launched service processes.
///
/// Resolution is attempted exactly once per request; a miss is permanent for
/// that request and the payload-declared fallback applies.
pub trait SenderResolver {
    /// Returns the requester identity listening on `port`, if known.
    fn name_by_port(&self, port: u16) -> Option<RequesterIdentity>;
}

// ============================================================================
// SECTION: Network Interfaces
// ============================================================================

/// Network interface enumeration errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error)]
pub enum InterfaceError {
    /// Local addresses could not be enumerated.
    #[error("interface enumeration error: {0}")]
    Unavailable(String),
}

/// Local network interface accessor used by the access-control check.
pub trait NetworkInterfaces {
    /// Lists this node's own network addresses in string form.
    ///
    /// # Errors
    ///
    /// Returns [`InterfaceError`] when no addresses can be enumerated.
    fn local_addresses(&self) -> Result<Vec<String>, InterfaceError>;
}

// ============================================================================
// SECTION: Envelope Cipher
// ============================================================================

/// Envelope cipher errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling and never carry key
///   material or plaintext.
#[derive(Debug, Error)]
pub enum CipherError {
    /// Decryption or payload decoding failed.
    #[error("envelope decrypt error: {0}")]
    Decrypt(String),
    /// Encryption or payload encoding failed.
    #[error("envelope encrypt error: {0}")]
    Encrypt(String),
}

/// Symmetric envelope codec for request and response payloads.
///
/// The key is configured once at startup; the core never sees key material,
/// only these two operations.
pub trait EnvelopeCipher {
    /// Decrypts opaque bytes into a structured map.
    ///
    /// # Errors
    ///
    /// Returns [`CipherError::Decrypt`] when the envelope cannot be opened or
    /// does not contain a structured map.
    fn decrypt(&self, data: &[u8]) -> Result<JsonMap, CipherError>;

    /// Encrypts a structured map into opaque bytes.
    ///
    /// # Errors
    ///
    /// Returns [`CipherError::Encrypt`] when the payload cannot be sealed.
    fn encrypt(&self, value: &JsonMap) -> Result<Vec<u8>, CipherError>;
}

// ============================================================================
// SECTION: System Store
// ============================================================================

/// Named system-metadata record.
///
/// # Invariants
/// - `name` is the unique record key within the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemRecord {
    /// Record name.
    pub name: String,
    /// Structured record value.
    pub value: JsonMap,
}

/// System store errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error)]
pub enum SystemStoreError {
    /// Store I/O error.
    #[error("system store io error: {0}")]
    Io(String),
    /// Store data is invalid.
    #[error("system store invalid data: {0}")]
    Invalid(String),
    /// Store reported an error.
    #[error("system store error: {0}")]
    Store(String),
}

/// Generic persistence abstraction over named system-metadata records.
///
/// Each call completes atomically with respect to the named record; no
/// ordering or transactional guarantees exist across records.
pub trait SystemStore {
    /// Loads a record by name.
    ///
    /// # Errors
    ///
    /// Returns [`SystemStoreError`] when loading fails.
    fn get(&self, name: &str) -> Result<Option<SystemRecord>, SystemStoreError>;

    /// Saves a record, replacing any previous value under the same name.
    ///
    /// # Errors
    ///
    /// Returns [`SystemStoreError`] when saving fails.
    fn set(&self, record: &SystemRecord) -> Result<(), SystemStoreError>;

    /// Deletes a record by name.
    ///
    /// # Errors
    ///
    /// Returns [`SystemStoreError`] when deletion fails.
    fn delete(&self, name: &str) -> Result<(), SystemStoreError>;

    /// Reports store readiness for liveness/readiness probes.
    ///
    /// # Errors
    ///
    /// Returns [`SystemStoreError`] when the store is unavailable.
    fn readiness(&self) -> Result<(), SystemStoreError> {
        Ok(())
    }
}
