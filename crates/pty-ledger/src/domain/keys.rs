//! # Storage Key Layout
//!
//! | Record | Key |
//! |--------|-----|
//! | Account | `acct:` + account id |
//! | Property token | `pty:` + derived identifier |
//! | Global asset key index | `PtyKeys` |

/// Prefix of every property token key.
pub const ASSET_PREFIX: &str = "pty:";

/// Prefix of every account key.
pub const ACCOUNT_PREFIX: &str = "acct:";

/// Singleton key of the global asset key index.
pub const ASSET_INDEX_KEY: &str = "PtyKeys";

#[must_use]
pub fn asset_key(asset_id: &str) -> String {
    format!("{ASSET_PREFIX}{asset_id}")
}

#[must_use]
pub fn account_key(account_id: &str) -> String {
    format!("{ACCOUNT_PREFIX}{account_id}")
}
