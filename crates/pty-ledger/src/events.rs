//! # Ledger Events
//!
//! Facts emitted by committed transactions. Every event is produced only
//! after all writes of its transaction succeeded.

use serde::Serialize;

use crate::domain::entities::{AccountId, AssetId};

/// Event emitted by a committed ledger transaction.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum LedgerEvent {
    IndexInitialized(IndexInitialized),
    AccountCreated(AccountCreated),
    AssetIssued(AssetIssued),
    ListingUpdated(ListingUpdated),
    TransferSettled(TransferSettled),
    MarketValueUpdated(MarketValueUpdated),
    RentRateSet(RentRateSet),
    RentDistributed(RentDistributed),
    RenterAdded(RenterChanged),
    RenterRemoved(RenterChanged),
}

/// `init` outcome. `created` is false when the index already existed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct IndexInitialized {
    pub created: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AccountCreated {
    pub account: AccountId,
    pub cash_balance: f64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AssetIssued {
    pub asset: AssetId,
    pub issuer: AccountId,
    pub quantity: u64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ListingUpdated {
    pub asset: AssetId,
    pub seller: AccountId,
    /// Units moved from ownership to the listing by this call.
    pub quantity: u64,
    /// Listing total after this call.
    pub listed: u64,
    pub unit_price: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TransferSettled {
    pub asset: AssetId,
    pub seller: AccountId,
    pub buyer: AccountId,
    pub quantity: u64,
    /// Cash moved from buyer to seller; zero for self-transfers.
    pub amount: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MarketValueUpdated {
    pub asset: AssetId,
    pub market_value: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RentRateSet {
    pub asset: AssetId,
    pub rate: f64,
    pub set_by: AccountId,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RentPayout {
    pub owner: AccountId,
    pub amount: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RentDistributed {
    pub asset: AssetId,
    pub payer: AccountId,
    /// Amount actually debited from the payer (rent per period).
    pub debited: f64,
    pub per_unit: f64,
    pub payouts: Vec<RentPayout>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RenterChanged {
    pub asset: AssetId,
    pub renter: AccountId,
}

macro_rules! impl_from_event {
    ($($ty:ident => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for LedgerEvent {
                fn from(event: $ty) -> Self {
                    LedgerEvent::$variant(event)
                }
            }
        )*
    };
}

impl_from_event! {
    IndexInitialized => IndexInitialized,
    AccountCreated => AccountCreated,
    AssetIssued => AssetIssued,
    ListingUpdated => ListingUpdated,
    TransferSettled => TransferSettled,
    MarketValueUpdated => MarketValueUpdated,
    RentRateSet => RentRateSet,
    RentDistributed => RentDistributed,
}
