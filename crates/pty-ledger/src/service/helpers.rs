//! # Ledger Service - Record Helpers
//!
//! Typed load/store of records over the byte-oriented store.

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use super::*;
use crate::domain::entities::{Account, AssetKeyIndex, PropertyToken};
use crate::domain::invariants::{
    check_account_invariants, check_token_invariants, InvariantCheckResult,
};
use crate::domain::keys::{account_key, asset_key, ASSET_INDEX_KEY};

impl<S, H> LedgerService<S, H>
where
    S: KeyValueStore,
    H: IdentifierDeriver,
{
    /// Decode the record under `key`, `None` if the key was never written.
    pub(crate) fn read_record<T: DeserializeOwned>(&self, key: &str) -> LedgerResult<Option<T>> {
        let Some(bytes) = self.store.get(key)? else {
            return Ok(None);
        };
        serde_json::from_slice(&bytes)
            .map(Some)
            .map_err(|e| LedgerError::CorruptRecord {
                key: key.to_string(),
                reason: e.to_string(),
            })
    }

    /// Encode and write one record.
    pub(crate) fn write_record<T: Serialize>(&mut self, key: &str, record: &T) -> LedgerResult<()> {
        let bytes = serde_json::to_vec(record).map_err(|e| LedgerError::CorruptRecord {
            key: key.to_string(),
            reason: e.to_string(),
        })?;
        self.store.put(key, &bytes)?;
        debug!(key, bytes = bytes.len(), "Record stored");
        Ok(())
    }

    /// Load an account by id.
    pub(crate) fn load_account(&self, id: &str) -> LedgerResult<Account> {
        let key = account_key(id);
        let account = self
            .read_record::<Account>(&key)?
            .ok_or_else(|| LedgerError::AccountNotFound { id: id.to_string() })?;
        debug!(key = %key, cash = account.cash_balance, "Account loaded");
        Ok(account)
    }

    /// Load a property token by identifier.
    pub(crate) fn load_token(&self, asset_id: &str) -> LedgerResult<PropertyToken> {
        let key = asset_key(asset_id);
        let token = self
            .read_record::<PropertyToken>(&key)?
            .ok_or_else(|| LedgerError::AssetNotFound {
                id: asset_id.to_string(),
            })?;
        debug!(key = %key, quantity = token.quantity, "Property token loaded");
        Ok(token)
    }

    /// Load the global key index. A missing index reads as empty.
    pub(crate) fn load_index(&self) -> LedgerResult<AssetKeyIndex> {
        Ok(self
            .read_record::<AssetKeyIndex>(ASSET_INDEX_KEY)?
            .unwrap_or_default())
    }

    /// Write an account back after checking its invariants.
    pub(crate) fn store_account(&mut self, account: &Account) -> LedgerResult<()> {
        if let InvariantCheckResult::Invalid(violations) = check_account_invariants(account) {
            return Err(LedgerError::invalid_record(describe(&account.id, &violations)));
        }
        self.write_record(&account_key(&account.id), account)
    }

    /// Write a property token back after checking its invariants.
    pub(crate) fn store_token(&mut self, token: &PropertyToken) -> LedgerResult<()> {
        if let InvariantCheckResult::Invalid(violations) = check_token_invariants(token) {
            return Err(LedgerError::invalid_record(describe(&token.id, &violations)));
        }
        self.write_record(&asset_key(&token.id), token)
    }

    pub(crate) fn store_index(&mut self, index: &AssetKeyIndex) -> LedgerResult<()> {
        self.write_record(ASSET_INDEX_KEY, index)
    }
}

fn describe<V: std::fmt::Display>(record: &str, violations: &[V]) -> String {
    let details: Vec<String> = violations.iter().map(ToString::to_string).collect();
    format!("{record}: {}", details.join("; "))
}

/// Reject ids that would address the bare key prefix.
pub(crate) fn require_id(field: &str, value: &str) -> LedgerResult<()> {
    if value.is_empty() {
        return Err(LedgerError::invalid_request(format!("{field} must not be empty")));
    }
    Ok(())
}

/// Reject zero quantities.
pub(crate) fn require_quantity(quantity: u64) -> LedgerResult<()> {
    if quantity == 0 {
        return Err(LedgerError::invalid_request("quantity must be greater than zero"));
    }
    Ok(())
}

/// Reject negative, NaN or infinite amounts.
pub(crate) fn require_amount(field: &str, value: f64) -> LedgerResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(LedgerError::invalid_request(format!(
            "{field} must be a finite non-negative number, got {value}"
        )));
    }
    Ok(())
}
