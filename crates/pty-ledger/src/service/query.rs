//! # Query API Implementation
//!
//! Read-only accessors. Never write to the store.

use super::*;
use tracing::debug;
use crate::domain::entities::{Account, PropertyToken};

impl<S, H> LedgerQueryApi for LedgerService<S, H>
where
    S: KeyValueStore,
    H: IdentifierDeriver,
{
    fn get_account(&self, id: &str) -> LedgerResult<Account> {
        self.load_account(id)
    }

    fn get_asset(&self, asset_id: &str) -> LedgerResult<PropertyToken> {
        self.load_token(asset_id)
    }

    #[instrument(skip(self))]
    fn list_assets(&self) -> LedgerResult<Vec<PropertyToken>> {
        let index = self.load_index()?;
        let mut assets = Vec::with_capacity(index.len());
        for key in index.iter() {
            let token = self
                .read_record::<PropertyToken>(key)?
                .ok_or_else(|| LedgerError::CorruptRecord {
                    key: key.to_string(),
                    reason: "indexed property token has no record".to_string(),
                })?;
            assets.push(token);
        }
        debug!(count = assets.len(), "Property tokens listed");
        Ok(assets)
    }

    fn fetch_raw(&self, key: &str) -> LedgerResult<Option<Vec<u8>>> {
        Ok(self.store.get(key)?)
    }
}
