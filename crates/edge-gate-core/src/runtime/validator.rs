// crates/edge-gate-core/src/runtime/validator.rs
// ============================================================================
// Module: Edge Gate Descriptor Validator
// Description: Schema-driven decode of decrypted payloads into descriptors.
// Purpose: Enforce field presence and types with fail-fast semantics.
// Dependencies: crate::{core, interfaces}, serde_json
// ============================================================================

//! ## Overview
//! The validator parses an untyped structured map into a
//! [`ServiceDescriptor`], checking fields in a fixed order and stopping at
//! the first violation. A failure carries the fixed `INVALID_PARAMETER`
//! message plus whatever service name had already been determined, so clients
//! get back the name they submitted whenever it parsed, even if a later field
//! is malformed.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde_json::Value;
use thiserror::Error;

use crate::core::ExecutionUnit;
use crate::core::RequesterIdentity;
use crate::core::ServiceDescriptor;
use crate::core::ServiceName;
use crate::interfaces::JsonMap;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Fixed message reported for every descriptor validation failure.
pub const INVALID_PARAMETER: &str = "INVALID_PARAMETER";

/// Payload field carrying the self-selection flag.
pub const SELF_SELECTION_FIELD: &str = "SelfSelection";
/// Payload field carrying the declared requester identity.
pub const SERVICE_REQUESTER_FIELD: &str = "ServiceRequester";
/// Payload field carrying the requested service name.
pub const SERVICE_NAME_FIELD: &str = "ServiceName";
/// Payload field carrying the execution unit sequence.
pub const SERVICE_INFO_FIELD: &str = "ServiceInfo";
/// Execution unit field carrying the execution type tag.
pub const EXECUTION_TYPE_FIELD: &str = "ExecutionType";
/// Execution unit field carrying the command token sequence.
pub const EXEC_CMD_FIELD: &str = "ExecCmd";

// ============================================================================
// SECTION: Resolved Requester
// ============================================================================

/// Outcome of port-based requester resolution supplied by the gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedRequester {
    /// Identity resolved from the peer's source port.
    Port(RequesterIdentity),
    /// Port resolution failed; the payload must declare the requester.
    Unresolved,
}

// ============================================================================
// SECTION: Validation Error
// ============================================================================

/// Descriptor validation failure.
///
/// # Invariants
/// - `message` is always [`INVALID_PARAMETER`].
/// - `service_name` is empty when the failure occurred before the name field
///   was read, and the parsed name otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message} (service_name: {service_name})")]
pub struct ValidationError {
    /// Fixed validation failure message.
    pub message: String,
    /// Service name determined before the failure, possibly empty.
    pub service_name: String,
}

impl ValidationError {
    /// Builds an invalid-parameter failure carrying the known service name.
    #[must_use]
    pub fn invalid(service_name: impl Into<String>) -> Self {
        Self {
            message: INVALID_PARAMETER.to_string(),
            service_name: service_name.into(),
        }
    }
}

// ============================================================================
// SECTION: Validation
// ============================================================================

/// Validates a decrypted payload into a service descriptor.
///
/// Fields are checked in a fixed order: self-selection, requester identity,
/// service name, then each execution unit in payload order. Validation stops
/// at the first violation.
///
/// # Errors
///
/// Returns [`ValidationError`] carrying [`INVALID_PARAMETER`] and the
/// partially determined service name.
pub fn validate(
    payload: &JsonMap,
    requester: &ResolvedRequester,
) -> Result<ServiceDescriptor, ValidationError> {
    let self_selection = parse_self_selection(payload);

    let requester = match requester {
        ResolvedRequester::Port(identity) => identity.clone(),
        ResolvedRequester::Unresolved => {
            match payload.get(SERVICE_REQUESTER_FIELD).and_then(Value::as_str) {
                Some(name) => RequesterIdentity::new(name),
                None => return Err(ValidationError::invalid("")),
            }
        }
    };

    let Some(name) = payload.get(SERVICE_NAME_FIELD).and_then(Value::as_str) else {
        return Err(ValidationError::invalid(""));
    };

    let Some(entries) = payload.get(SERVICE_INFO_FIELD).and_then(Value::as_array) else {
        return Err(ValidationError::invalid(name));
    };

    let mut execution_units = Vec::with_capacity(entries.len());
    for entry in entries {
        let Some(unit) = entry.as_object() else {
            return Err(ValidationError::invalid(name));
        };
        let Some(execution_type) = unit.get(EXECUTION_TYPE_FIELD).and_then(Value::as_str) else {
            return Err(ValidationError::invalid(name));
        };
        let Some(tokens) = unit.get(EXEC_CMD_FIELD).and_then(Value::as_array) else {
            return Err(ValidationError::invalid(name));
        };
        let mut exec_cmd = Vec::with_capacity(tokens.len());
        for token in tokens {
            let Some(token) = token.as_str() else {
                return Err(ValidationError::invalid(name));
            };
            exec_cmd.push(token.to_string());
        }
        execution_units.push(ExecutionUnit {
            execution_type: execution_type.to_string(),
            exec_cmd,
        });
    }

    Ok(ServiceDescriptor {
        service_name: ServiceName::new(name),
        self_selection,
        requester,
        execution_units,
    })
}

/// Parses the self-selection flag; absence or a non-string defaults to true.
fn parse_self_selection(payload: &JsonMap) -> bool {
    payload
        .get(SELF_SELECTION_FIELD)
        .and_then(Value::as_str)
        .map_or(true, |flag| flag == "true")
}
