// crates/edge-gate-config/src/lib.rs
// ============================================================================
// Module: Edge Gate Config Library
// Description: Canonical config model and validation.
// Purpose: Single source of truth for edge-gate.toml semantics.
// Dependencies: edge-gate-store-sqlite, serde, toml
// ============================================================================

//! ## Overview
//! `edge-gate-config` defines the canonical configuration model for an Edge
//! Gate node. It provides strict, fail-closed validation with hard limits on
//! file size, path shapes, and address lists. Config inputs are untrusted.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::*;
