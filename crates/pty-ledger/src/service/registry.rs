//! # Asset Registry API Implementation
//!
//! Index initialization and property token issuance.

use super::*;
use crate::commands::IssueRequest;
use crate::domain::entities::{AssetStatus, Owner, PropertyToken};
use crate::domain::keys::{asset_key, ASSET_INDEX_KEY};
use crate::domain::services::identifier_source;
use crate::events::{AssetIssued, IndexInitialized};

impl<S, H> AssetRegistryApi for LedgerService<S, H>
where
    S: KeyValueStore,
    H: IdentifierDeriver,
{
    #[instrument(skip(self))]
    fn init(&mut self) -> LedgerResult<IndexInitialized> {
        if self.store.exists(ASSET_INDEX_KEY)? {
            return Ok(IndexInitialized { created: false });
        }
        self.store_index(&Default::default())?;
        info!("Asset key index initialized");
        Ok(IndexInitialized { created: true })
    }

    #[instrument(skip(self, request), fields(issuer = %request.issuer, quantity = request.quantity))]
    fn issue_property_token(&mut self, request: IssueRequest) -> LedgerResult<AssetIssued> {
        let IssueRequest {
            name,
            street,
            city,
            postcode,
            state,
            buy_value,
            market_value,
            quantity,
            issuer,
            issue_date,
            links,
        } = request;

        if [&street, &city, &postcode, &state].iter().all(|f| f.is_empty()) {
            return Err(LedgerError::invalid_record("property address is empty"));
        }
        if quantity == 0 {
            return Err(LedgerError::invalid_record("issued quantity must be greater than zero"));
        }

        let asset_id = self
            .deriver
            .derive(&identifier_source(&street, &city, &postcode, &state));
        if asset_id.is_empty() {
            return Err(LedgerError::invalid_record("derived identifier is empty"));
        }

        // An issuer record that cannot be decoded counts as missing.
        let issuer_account = match self.load_account(&issuer) {
            Err(LedgerError::CorruptRecord { reason, .. }) => {
                warn!(%issuer, %reason, "Issuer account undecodable");
                return Err(LedgerError::AccountNotFound { id: issuer });
            }
            other => other?,
        };

        let key = asset_key(&asset_id);
        if self.store.exists(&key)? {
            warn!(asset = %asset_id, "Property token already issued");
            return Err(LedgerError::AssetExists { id: asset_id });
        }

        let token = PropertyToken {
            id: asset_id.clone(),
            name,
            street,
            city,
            postcode,
            state,
            buy_value,
            market_value,
            quantity,
            owners: vec![Owner {
                investor_id: issuer.clone(),
                quantity,
            }],
            for_sale: Vec::new(),
            renters: Vec::new(),
            links: links.unwrap_or_default(),
            rent: 0.0,
            issuer: issuer.clone(),
            issue_date,
            status: AssetStatus::Pending,
        };

        let mut index = self.load_index()?;
        let appended = index.insert(key);

        self.store_token(&token)?;
        self.store_account(&issuer_account)?;
        if appended {
            self.store_index(&index)?;
        }

        info!(asset = %asset_id, %issuer, quantity, "Property token issued");
        Ok(AssetIssued {
            asset: asset_id,
            issuer,
            quantity,
        })
    }
}
