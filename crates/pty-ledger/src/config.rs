//! # Ledger Configuration
//!
//! Engine parameters with sane defaults. Hosts override fields directly;
//! the runtime shell reads environment overrides on top of `Default`.

/// Cash balance granted to every newly created account.
pub const DEFAULT_INITIAL_CASH_BALANCE: f64 = 10_000_000.0;

/// Suffix appended to account ids to build their display prefix.
pub const DEFAULT_ACCOUNT_PREFIX_SUFFIX: &str = "000A";

/// Ledger engine configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerConfig {
    /// Opening cash balance for `createAccount` / `createAccounts`.
    pub initial_cash_balance: f64,
    /// Suffix of the account display prefix.
    pub account_prefix_suffix: String,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            initial_cash_balance: DEFAULT_INITIAL_CASH_BALANCE,
            account_prefix_suffix: DEFAULT_ACCOUNT_PREFIX_SUFFIX.to_string(),
        }
    }
}

impl LedgerConfig {
    /// Builder method to set the opening balance.
    #[must_use]
    pub fn with_initial_cash_balance(mut self, balance: f64) -> Self {
        self.initial_cash_balance = balance;
        self
    }
}
