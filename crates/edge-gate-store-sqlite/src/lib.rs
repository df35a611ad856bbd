// crates/edge-gate-store-sqlite/src/lib.rs
// ============================================================================
// Module: Edge Gate SQLite Store Library
// Description: Durable system-metadata store backed by SQLite.
// Purpose: Provide the persistent SystemStore backend for Edge Gate nodes.
// Dependencies: edge-gate-core, rusqlite, serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! `edge-gate-store-sqlite` implements the system-metadata store on `SQLite`
//! with WAL journaling. Records survive node restarts and are validated on
//! read. Database contents are untrusted; corrupt rows fail closed.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod store;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use store::MAX_RECORD_BYTES;
pub use store::SqliteStoreConfig;
pub use store::SqliteStoreError;
pub use store::SqliteStoreMode;
pub use store::SqliteSyncMode;
pub use store::SqliteSystemStore;
