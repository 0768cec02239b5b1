//! # Driving Ports (API - Inbound)
//!
//! The operations the ledger exposes, grouped by component. Every mutating
//! operation loads the records it needs, validates, mutates in memory, then
//! writes each touched record back with one `put` per record in a fixed
//! order. Nothing is rolled back if a later `put` fails.

use crate::commands::{
    IssueRequest, ListingRequest, RentPaymentRequest, RentRateRequest, RenterRequest,
    TransferRequest, ValuationRequest,
};
use crate::domain::entities::{Account, PropertyToken};
use crate::errors::LedgerResult;
use crate::events::{
    AccountCreated, AssetIssued, IndexInitialized, ListingUpdated, MarketValueUpdated,
    RentDistributed, RentRateSet, RenterChanged, TransferSettled,
};

/// Account creation.
pub trait AccountLedgerApi {
    /// Create one account with the configured opening balance.
    ///
    /// Fails with `AccountExists` if any record is stored under the key.
    fn create_account(&mut self, id: &str) -> LedgerResult<AccountCreated>;

    /// Create `company1..company{count}`, overwriting existing records.
    fn create_accounts(&mut self, count: u32) -> LedgerResult<Vec<AccountCreated>>;
}

/// Issuance and the global asset key index.
pub trait AssetRegistryApi {
    /// Write an empty key index if none exists.
    fn init(&mut self) -> LedgerResult<IndexInitialized>;

    /// Issue a new property token to its issuer.
    ///
    /// Writes: asset, issuer account, key index.
    fn issue_property_token(&mut self, request: IssueRequest) -> LedgerResult<AssetIssued>;
}

/// Listing and settlement.
pub trait MarketplaceApi {
    /// Move units from the seller's ownership into their listing.
    ///
    /// Writes: seller account, asset.
    fn set_for_sale(&mut self, request: &ListingRequest) -> LedgerResult<ListingUpdated>;

    /// Settle units from the seller's listing into the buyer's ownership.
    ///
    /// Writes: buyer account, seller account, asset.
    fn transfer_paper(&mut self, request: &TransferRequest) -> LedgerResult<TransferSettled>;
}

/// Market value and rent rate.
pub trait ValuationApi {
    /// Set the market value and approve the asset.
    fn update_market_value(&mut self, request: &ValuationRequest)
        -> LedgerResult<MarketValueUpdated>;

    /// Set the rent rate. Only checks that the named account exists.
    fn set_rent(&mut self, request: &RentRateRequest) -> LedgerResult<RentRateSet>;
}

/// Rent collection and the renter roster.
pub trait RentApi {
    /// Debit the payer one period of rent and credit every owner pro rata.
    ///
    /// Writes: payer account, then each owner account. The asset is not written.
    fn process_rent(&mut self, request: &RentPaymentRequest) -> LedgerResult<RentDistributed>;

    /// Add or remove a renter.
    ///
    /// Writes: renter account, asset.
    fn set_renters(&mut self, request: &RenterRequest) -> LedgerResult<RenterChanged>;
}

/// Read-only accessors.
pub trait LedgerQueryApi {
    fn get_account(&self, id: &str) -> LedgerResult<Account>;

    fn get_asset(&self, asset_id: &str) -> LedgerResult<PropertyToken>;

    /// All assets in index order.
    fn list_assets(&self) -> LedgerResult<Vec<PropertyToken>>;

    /// Raw bytes under any key.
    fn fetch_raw(&self, key: &str) -> LedgerResult<Option<Vec<u8>>>;
}
