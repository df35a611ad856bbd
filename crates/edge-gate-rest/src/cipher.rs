// crates/edge-gate-rest/src/cipher.rs
// ============================================================================
// Module: AES-GCM Envelope Cipher
// Description: Symmetric envelope codec for admission payloads.
// Purpose: Seal and open request envelopes with AES-256-GCM.
// Dependencies: edge-gate-core, aes-gcm, base64, rand, serde_json, sha2
// ============================================================================

//! ## Overview
//! The envelope cipher seals structured maps with AES-256-GCM under a single
//! pre-shared node key. The wire format is `nonce || ciphertext` with a fresh
//! 96-bit nonce per envelope. Decryption failures carry no detail about the
//! key or plaintext; envelope contents are untrusted until they parse as a
//! JSON object.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::path::Path;

use aes_gcm::Aes256Gcm;
use aes_gcm::Nonce;
use aes_gcm::aead::Aead;
use aes_gcm::aead::KeyInit;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use edge_gate_core::CipherError;
use edge_gate_core::EnvelopeCipher;
use edge_gate_core::JsonMap;
use rand::RngCore;
use rand::rngs::OsRng;
use sha2::Digest;
use sha2::Sha256;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Symmetric key length in bytes (AES-256).
pub const KEY_LEN: usize = 32;
/// Nonce length in bytes (96-bit GCM nonce).
pub const NONCE_LEN: usize = 12;
/// Maximum key file size in bytes; base64 of 32 bytes plus whitespace.
const MAX_KEY_FILE_BYTES: u64 = 256;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Cipher setup errors.
///
/// # Invariants
/// - Variants never carry key material.
#[derive(Debug, Error)]
pub enum CipherSetupError {
    /// Key file could not be read.
    #[error("cipher key io error: {0}")]
    Io(String),
    /// Key material is malformed.
    #[error("cipher key invalid: {0}")]
    InvalidKey(String),
}

// ============================================================================
// SECTION: Cipher
// ============================================================================

/// AES-256-GCM envelope cipher keyed once at startup.
pub struct AesGcmEnvelopeCipher {
    /// Initialized AEAD instance.
    cipher: Aes256Gcm,
    /// Hex SHA-256 fingerprint of the key, safe for audit logs.
    fingerprint: String,
}

impl AesGcmEnvelopeCipher {
    /// Creates a cipher from raw key bytes.
    ///
    /// # Errors
    ///
    /// Returns [`CipherSetupError::InvalidKey`] when the key is not exactly
    /// [`KEY_LEN`] bytes.
    pub fn from_key_bytes(key: &[u8]) -> Result<Self, CipherSetupError> {
        if key.len() != KEY_LEN {
            return Err(CipherSetupError::InvalidKey(format!(
                "key must be {KEY_LEN} bytes, got {}",
                key.len()
            )));
        }
        let cipher = Aes256Gcm::new_from_slice(key)
            .map_err(|_| CipherSetupError::InvalidKey("key rejected by cipher".to_string()))?;
        Ok(Self {
            cipher,
            fingerprint: hex_sha256(key),
        })
    }

    /// Creates a cipher from a base64-encoded key file.
    ///
    /// # Errors
    ///
    /// Returns [`CipherSetupError`] when the file cannot be read or does not
    /// decode to a [`KEY_LEN`]-byte key.
    pub fn from_key_file(path: &Path) -> Result<Self, CipherSetupError> {
        let metadata = fs::metadata(path).map_err(|err| CipherSetupError::Io(err.to_string()))?;
        if metadata.len() > MAX_KEY_FILE_BYTES {
            return Err(CipherSetupError::InvalidKey("key file too large".to_string()));
        }
        let encoded =
            fs::read_to_string(path).map_err(|err| CipherSetupError::Io(err.to_string()))?;
        let key = STANDARD
            .decode(encoded.trim())
            .map_err(|_| CipherSetupError::InvalidKey("key file is not valid base64".to_string()))?;
        Self::from_key_bytes(&key)
    }

    /// Returns the hex SHA-256 fingerprint of the key.
    #[must_use]
    pub fn key_fingerprint(&self) -> &str {
        &self.fingerprint
    }
}

impl EnvelopeCipher for AesGcmEnvelopeCipher {
    fn decrypt(&self, data: &[u8]) -> Result<JsonMap, CipherError> {
        if data.len() <= NONCE_LEN {
            return Err(CipherError::Decrypt("envelope too short".to_string()));
        }
        let (nonce_bytes, ciphertext) = data.split_at(NONCE_LEN);
        let plaintext = self
            .cipher
            .decrypt(Nonce::from_slice(nonce_bytes), ciphertext)
            .map_err(|_| CipherError::Decrypt("envelope authentication failed".to_string()))?;
        let value: serde_json::Value = serde_json::from_slice(&plaintext)
            .map_err(|_| CipherError::Decrypt("envelope payload is not json".to_string()))?;
        match value {
            serde_json::Value::Object(map) => Ok(map),
            _ => Err(CipherError::Decrypt("envelope payload is not an object".to_string())),
        }
    }

    fn encrypt(&self, value: &JsonMap) -> Result<Vec<u8>, CipherError> {
        let plaintext =
            serde_json::to_vec(value).map_err(|err| CipherError::Encrypt(err.to_string()))?;
        let mut nonce_bytes = [0u8; NONCE_LEN];
        OsRng.fill_bytes(&mut nonce_bytes);
        let ciphertext = self
            .cipher
            .encrypt(Nonce::from_slice(&nonce_bytes), plaintext.as_slice())
            .map_err(|_| CipherError::Encrypt("envelope seal failed".to_string()))?;
        let mut envelope = Vec::with_capacity(NONCE_LEN + ciphertext.len());
        envelope.extend_from_slice(&nonce_bytes);
        envelope.extend_from_slice(&ciphertext);
        Ok(envelope)
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Returns the lowercase hex SHA-256 digest of `bytes`.
fn hex_sha256(bytes: &[u8]) -> String {
    let digest = Sha256::digest(bytes);
    digest.iter().map(|byte| format!("{byte:02x}")).collect()
}

// ============================================================================
// SECTION: Tests
// ============================================================================
