// crates/edge-gate-cli/src/main.rs
// ============================================================================
// Module: Edge Gate CLI Entry Point
// Description: Node launcher for the Edge Gate admission server.
// Purpose: Load configuration, wire backends, and run the REST endpoint.
// Dependencies: clap, edge-gate-config, edge-gate-core, edge-gate-rest, tokio
// ============================================================================

//! ## Overview
//! The Edge Gate CLI launches one admission node: it loads and validates the
//! node configuration, enforces the local-only bind policy, opens the system
//! store, records the node's platform metadata, and serves the admission
//! endpoint until the process terminates.

// ============================================================================
// SECTION: Modules
// ============================================================================

mod serve_policy;

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Args;
use clap::Parser;
use clap::Subcommand;
use edge_gate_config::EdgeGateConfig;
use edge_gate_config::StoreType;
use edge_gate_config::load_config;
use edge_gate_core::InMemorySystemStore;
use edge_gate_core::JsonMap;
use edge_gate_core::LocalNodeEngine;
use edge_gate_core::SystemRecord;
use edge_gate_core::SystemStore;
use edge_gate_rest::ProcessPortRegistry;
use edge_gate_rest::RestServer;
use edge_gate_store_sqlite::SqliteStoreConfig;
use edge_gate_store_sqlite::SqliteSystemStore;
use thiserror::Error;

use crate::serve_policy::BindOutcome;
use crate::serve_policy::enforce_local_only;
use crate::serve_policy::resolve_allow_non_loopback;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Name of the startup record describing this node.
const NODE_RECORD_NAME: &str = "node";

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(name = "edge-gate", version, about = "Edge Gate admission node")]
struct Cli {
    /// Selected subcommand.
    #[command(subcommand)]
    command: Commands,
}

/// Supported subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Runs the admission server.
    Serve(ServeCommand),
}

/// Arguments for the serve subcommand.
#[derive(Args, Debug)]
struct ServeCommand {
    /// Path to the node configuration file.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Allow binding to non-loopback addresses.
    #[arg(long)]
    allow_non_loopback: bool,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// CLI failure with a user-facing message.
#[derive(Debug, Error)]
#[error("{0}")]
struct CliError(String);

impl CliError {
    /// Creates a CLI error from any displayable source.
    fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Result alias for CLI operations.
type CliResult<T> = Result<T, CliError>;

// ============================================================================
// SECTION: Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(code) => code,
        Err(err) => emit_error(&err.to_string()),
    }
}

/// Executes the CLI command dispatcher.
async fn run() -> CliResult<ExitCode> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Serve(command) => command_serve(command).await,
    }
}

// ============================================================================
// SECTION: Serve Command
// ============================================================================

/// Loads configuration and runs the admission server.
async fn command_serve(command: ServeCommand) -> CliResult<ExitCode> {
    let config = load_config(command.config.as_deref())
        .map_err(|err| CliError::new(format!("config load failed: {err}")))?;
    let allow_non_loopback = resolve_allow_non_loopback(command.allow_non_loopback)
        .map_err(|err| CliError::new(err.to_string()))?;
    let bind_outcome = enforce_local_only(&config, allow_non_loopback)
        .map_err(|err| CliError::new(err.to_string()))?;
    if bind_outcome.network_exposed {
        warn_network_exposure(&bind_outcome)?;
    }

    let store = open_store(&config)?;
    record_node_metadata(store.as_ref())?;

    let server = RestServer::from_config(
        config,
        Arc::new(LocalNodeEngine::default()),
        Arc::new(ProcessPortRegistry::new()),
    )
    .map_err(|err| CliError::new(format!("server init failed: {err}")))?;
    if !server.is_ready() {
        write_stderr_line(
            "warning: no cipher key configured; requests will be answered unavailable",
        )
        .map_err(|err| CliError::new(format!("stderr write failed: {err}")))?;
    }
    server
        .serve()
        .await
        .map_err(|err| CliError::new(format!("server failed: {err}")))?;
    Ok(ExitCode::SUCCESS)
}

/// Opens the configured system store and probes it once.
fn open_store(config: &EdgeGateConfig) -> CliResult<Box<dyn SystemStore>> {
    let store: Box<dyn SystemStore> = match config.store.store_type {
        StoreType::Memory => Box::new(InMemorySystemStore::new()),
        StoreType::Sqlite => {
            let path = config
                .store
                .path
                .clone()
                .ok_or_else(|| CliError::new("store.path is required for sqlite"))?;
            let sqlite = SqliteSystemStore::new(SqliteStoreConfig {
                path,
                busy_timeout_ms: config.store.busy_timeout_ms,
                journal_mode: config.store.journal_mode,
                sync_mode: config.store.sync_mode,
            })
            .map_err(|err| CliError::new(format!("store open failed: {err}")))?;
            Box::new(sqlite)
        }
    };
    store.readiness().map_err(|err| CliError::new(format!("store not ready: {err}")))?;
    Ok(store)
}

/// Writes the node's platform metadata into the system store.
fn record_node_metadata(store: &dyn SystemStore) -> CliResult<()> {
    let mut value = JsonMap::new();
    value.insert(
        "platform".to_string(),
        serde_json::Value::String(std::env::consts::OS.to_string()),
    );
    value.insert(
        "arch".to_string(),
        serde_json::Value::String(std::env::consts::ARCH.to_string()),
    );
    value.insert(
        "version".to_string(),
        serde_json::Value::String(env!("CARGO_PKG_VERSION").to_string()),
    );
    let record = SystemRecord {
        name: NODE_RECORD_NAME.to_string(),
        value,
    };
    store.set(&record).map_err(|err| CliError::new(format!("store write failed: {err}")))
}

// ============================================================================
// SECTION: Output Helpers
// ============================================================================

/// Warns when the server is bound beyond loopback.
fn warn_network_exposure(outcome: &BindOutcome) -> CliResult<()> {
    write_stderr_line(&format!(
        "warning: admission endpoint exposed on non-loopback address {}",
        outcome.bind_addr
    ))
    .map_err(|err| CliError::new(format!("stderr write failed: {err}")))
}

/// Writes a single line to stderr.
fn write_stderr_line(message: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}")
}

/// Emits an error message to stderr and returns a failure exit code.
fn emit_error(message: &str) -> ExitCode {
    let _ = write_stderr_line(message);
    ExitCode::FAILURE
}
