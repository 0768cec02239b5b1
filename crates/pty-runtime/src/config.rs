//! # Runtime Configuration
//!
//! Defaults come from `Default`; environment variables override them.
//!
//! | Variable | Field |
//! |----------|-------|
//! | `PTY_DATA_FILE` | `data_file` |
//! | `PTY_INITIAL_BALANCE` | `ledger.initial_cash_balance` |

use std::path::PathBuf;

use pty_ledger::LedgerConfig;
use tracing::{info, warn};

/// Default location of the ledger file.
pub const DEFAULT_DATA_FILE: &str = "./data/ledger.json";

pub const ENV_DATA_FILE: &str = "PTY_DATA_FILE";
pub const ENV_INITIAL_BALANCE: &str = "PTY_INITIAL_BALANCE";

/// Runtime shell configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct RuntimeConfig {
    /// Ledger file backing the store.
    pub data_file: PathBuf,
    /// Engine parameters.
    pub ledger: LedgerConfig,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            ledger: LedgerConfig::default(),
        }
    }
}

impl RuntimeConfig {
    /// Path of the advisory lock file guarding `data_file`.
    #[must_use]
    pub fn lock_file(&self) -> PathBuf {
        let mut name = self.data_file.clone().into_os_string();
        name.push(".lock");
        PathBuf::from(name)
    }
}

/// Load configuration from the process environment.
pub fn load_config() -> RuntimeConfig {
    load_config_from(|name| std::env::var(name).ok())
}

/// Load configuration, reading variables through `lookup`.
///
/// Unparseable values are logged and ignored.
pub fn load_config_from<F>(lookup: F) -> RuntimeConfig
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = RuntimeConfig::default();

    if let Some(path) = lookup(ENV_DATA_FILE) {
        if path.trim().is_empty() {
            warn!("{ENV_DATA_FILE} is empty, using {}", config.data_file.display());
        } else {
            config.data_file = PathBuf::from(path);
            info!("Ledger file from environment: {}", config.data_file.display());
        }
    }

    if let Some(raw) = lookup(ENV_INITIAL_BALANCE) {
        match raw.parse::<f64>() {
            Ok(balance) if balance.is_finite() && balance >= 0.0 => {
                config.ledger.initial_cash_balance = balance;
            }
            _ => warn!("{ENV_INITIAL_BALANCE} must be a non-negative number, got {raw:?}"),
        }
    }

    config
}
