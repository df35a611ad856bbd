// crates/edge-gate-core/src/runtime/memstore.rs
// ============================================================================
// Module: Edge Gate In-Memory Store
// Description: In-memory SystemStore for tests and ephemeral nodes.
// Purpose: Provide a dependency-free store implementation.
// Dependencies: crate::interfaces, std
// ============================================================================

//! ## Overview
//! [`InMemorySystemStore`] keeps named records in a mutex-protected map. It
//! backs the `memory` store type in configuration and serves as the fake of
//! choice in tests. Lock poisoning is treated as a store fault rather than a
//! panic.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::sync::Mutex;

use crate::interfaces::SystemRecord;
use crate::interfaces::SystemStore;
use crate::interfaces::SystemStoreError;

// ============================================================================
// SECTION: In-Memory System Store
// ============================================================================

/// In-memory system-metadata store.
#[derive(Debug, Default)]
pub struct InMemorySystemStore {
    /// Records keyed by name.
    records: Mutex<BTreeMap<String, SystemRecord>>,
}

impl InMemorySystemStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl SystemStore for InMemorySystemStore {
    fn get(&self, name: &str) -> Result<Option<SystemRecord>, SystemStoreError> {
        let records = self
            .records
            .lock()
            .map_err(|_| SystemStoreError::Store("store lock poisoned".to_string()))?;
        Ok(records.get(name).cloned())
    }

    fn set(&self, record: &SystemRecord) -> Result<(), SystemStoreError> {
        if record.name.is_empty() {
            return Err(SystemStoreError::Invalid("record name is empty".to_string()));
        }
        let mut records = self
            .records
            .lock()
            .map_err(|_| SystemStoreError::Store("store lock poisoned".to_string()))?;
        records.insert(record.name.clone(), record.clone());
        Ok(())
    }

    fn delete(&self, name: &str) -> Result<(), SystemStoreError> {
        let mut records = self
            .records
            .lock()
            .map_err(|_| SystemStoreError::Store("store lock poisoned".to_string()))?;
        records.remove(name);
        Ok(())
    }
}
