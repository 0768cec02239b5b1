//! # Property Ledger Runtime
//!
//! Command-line host for the ledger engine. Each invocation:
//!
//! 1. takes the exclusive lock next to the ledger file
//! 2. opens the file-backed store
//! 3. initializes the asset key index if absent
//! 4. decodes and executes one command
//! 5. releases the lock

pub mod config;
pub mod lock;
pub mod wire;

use pty_ledger::prelude::*;
use thiserror::Error;
use tracing::{info, instrument};

pub use config::{load_config, RuntimeConfig};
pub use lock::{LedgerLock, LockError};
pub use wire::decode_command;

/// Errors of one runtime invocation.
#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Lock(#[from] LockError),

    #[error("failed to open ledger file: {0}")]
    Open(#[source] StoreError),

    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

/// Run one invocation against the configured ledger file.
///
/// # Errors
///
/// Lock or store failures, and any `LedgerError` from decoding or executing
/// the command.
#[instrument(skip(config, args), fields(data_file = %config.data_file.display()))]
pub fn invoke(
    config: &RuntimeConfig,
    function: &str,
    args: &[String],
) -> Result<Receipt, RuntimeError> {
    let command = decode_command(function, args)?;

    let _lock = LedgerLock::acquire(&config.lock_file())?;
    let store = FileBackedKVStore::open(&config.data_file).map_err(RuntimeError::Open)?;
    let mut ledger = LedgerService::new(store, config.ledger.clone());

    if ledger.init()?.created {
        info!("Fresh ledger initialized");
    }
    Ok(ledger.execute(command)?)
}
