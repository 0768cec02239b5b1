//! # Domain Entities
//!
//! Records persisted in the ledger: property tokens, accounts and the global
//! asset key index.
//!
//! ## Type Decisions
//!
//! - Quantities are `u64`. Every operation validates before subtracting, so a
//!   persisted quantity is never negative.
//! - Money is `f64`, matching the arithmetic of ledgers already in the field.
//!   Switching to fixed-point would change rounding of rent distribution.
//!
//! ## Serialization
//!
//! JSON field names are the historic wire names (`cusip`, `invid`,
//! `cashBalance`, ...). List fields accept `null` as an empty list, since
//! older writers emit `null` for empty slices.

use serde::{Deserialize, Deserializer, Serialize};

/// Account identifier.
pub type AccountId = String;

/// Derived asset identifier (fixed-width hex string).
pub type AssetId = String;

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

// =============================================================================
// PROPERTY TOKEN
// =============================================================================

/// Approval status of a property token.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssetStatus {
    /// Issued, no valuation yet.
    #[default]
    Pending,
    /// A market value has been recorded.
    Approved,
}

/// A retained ownership position.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Owner {
    #[serde(rename = "invid")]
    pub investor_id: AccountId,
    pub quantity: u64,
}

/// Units a seller has moved out of ownership and offered at a unit price.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SellListing {
    #[serde(rename = "invid")]
    pub investor_id: AccountId,
    pub quantity: u64,
    #[serde(rename = "sellval")]
    pub unit_price: f64,
}

/// Renter membership entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Renter {
    #[serde(rename = "rentid")]
    pub renter_id: AccountId,
}

/// External link attached to a property (data-only).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlLink {
    pub url: String,
    #[serde(rename = "urlType")]
    pub url_type: String,
}

/// A tokenized property.
///
/// ## Invariant
///
/// `Σ owners.quantity + Σ for_sale.quantity == quantity` after every
/// completed transaction (see `domain::invariants`).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PropertyToken {
    #[serde(rename = "cusip", default)]
    pub id: AssetId,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "adrStreet", default)]
    pub street: String,
    #[serde(rename = "adrCity", default)]
    pub city: String,
    #[serde(rename = "adrPostcode", default)]
    pub postcode: String,
    #[serde(rename = "adrState", default)]
    pub state: String,
    #[serde(rename = "buyval", default)]
    pub buy_value: f64,
    #[serde(rename = "mktval", default)]
    pub market_value: f64,
    /// Originally issued quantity.
    #[serde(default)]
    pub quantity: u64,
    #[serde(rename = "owner", default, deserialize_with = "null_as_empty")]
    pub owners: Vec<Owner>,
    #[serde(rename = "forsale", default, deserialize_with = "null_as_empty")]
    pub for_sale: Vec<SellListing>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub renters: Vec<Renter>,
    #[serde(rename = "urlLink", default, deserialize_with = "null_as_empty")]
    pub links: Vec<UrlLink>,
    /// Rent rate per period. Zero means unset.
    #[serde(default)]
    pub rent: f64,
    #[serde(default)]
    pub issuer: AccountId,
    #[serde(rename = "issueDate", default)]
    pub issue_date: String,
    #[serde(default)]
    pub status: AssetStatus,
}

impl PropertyToken {
    /// Retained (not listed) units held by `investor`.
    #[must_use]
    pub fn owned_by(&self, investor: &str) -> u64 {
        self.owners
            .iter()
            .find(|o| o.investor_id == investor)
            .map_or(0, |o| o.quantity)
    }

    /// Listing entry of `investor`, if any.
    #[must_use]
    pub fn listing_of(&self, investor: &str) -> Option<&SellListing> {
        self.for_sale.iter().find(|l| l.investor_id == investor)
    }

    /// Add units to `investor`'s ownership, appending an entry if absent.
    pub fn credit_ownership(&mut self, investor: &str, quantity: u64) {
        match self.owners.iter_mut().find(|o| o.investor_id == investor) {
            Some(owner) => owner.quantity += quantity,
            None => self.owners.push(Owner {
                investor_id: investor.to_string(),
                quantity,
            }),
        }
    }

    /// Remove units from `investor`'s ownership. The entry is kept at zero.
    ///
    /// Returns `false` (and changes nothing) if fewer than `quantity` are held.
    pub fn debit_ownership(&mut self, investor: &str, quantity: u64) -> bool {
        match self.owners.iter_mut().find(|o| o.investor_id == investor) {
            Some(owner) if owner.quantity >= quantity => {
                owner.quantity -= quantity;
                true
            }
            _ => false,
        }
    }

    /// Grow `investor`'s listing and overwrite its price (last writer wins).
    pub fn add_to_listing(&mut self, investor: &str, quantity: u64, unit_price: f64) {
        match self.for_sale.iter_mut().find(|l| l.investor_id == investor) {
            Some(listing) => {
                listing.quantity += quantity;
                listing.unit_price = unit_price;
            }
            None => self.for_sale.push(SellListing {
                investor_id: investor.to_string(),
                quantity,
                unit_price,
            }),
        }
    }

    /// Shrink `investor`'s listing. The entry is kept at zero.
    ///
    /// Returns `false` (and changes nothing) if the listing is absent or short.
    pub fn take_from_listing(&mut self, investor: &str, quantity: u64) -> bool {
        match self.for_sale.iter_mut().find(|l| l.investor_id == investor) {
            Some(listing) if listing.quantity >= quantity => {
                listing.quantity -= quantity;
                true
            }
            _ => false,
        }
    }

    /// Sum of all ownership entries.
    #[must_use]
    pub fn total_owned(&self) -> u64 {
        self.owners.iter().map(|o| o.quantity).sum()
    }

    /// Sum of all listing entries.
    #[must_use]
    pub fn total_listed(&self) -> u64 {
        self.for_sale.iter().map(|l| l.quantity).sum()
    }

    #[must_use]
    pub fn has_renter(&self, renter: &str) -> bool {
        self.renters.iter().any(|r| r.renter_id == renter)
    }

    /// Returns `false` if already a renter.
    pub fn add_renter(&mut self, renter: &str) -> bool {
        if self.has_renter(renter) {
            return false;
        }
        self.renters.push(Renter {
            renter_id: renter.to_string(),
        });
        true
    }

    /// Returns `false` if not a renter.
    pub fn remove_renter(&mut self, renter: &str) -> bool {
        let before = self.renters.len();
        self.renters.retain(|r| r.renter_id != renter);
        self.renters.len() != before
    }
}

// =============================================================================
// ACCOUNT
// =============================================================================

/// A cash account.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub id: AccountId,
    /// Display artifact derived at creation.
    #[serde(default)]
    pub prefix: String,
    #[serde(rename = "cashBalance", default)]
    pub cash_balance: f64,
    /// Inventory cross-reference. No transaction maintains it.
    #[serde(rename = "assetIds", default, deserialize_with = "null_as_empty")]
    pub asset_ids: Vec<AssetId>,
    /// Asset currently rented, empty if none.
    #[serde(rename = "rentingpty", default)]
    pub renting: AssetId,
}

impl Account {
    pub fn new(id: impl Into<AccountId>, prefix: impl Into<String>, cash_balance: f64) -> Self {
        Self {
            id: id.into(),
            prefix: prefix.into(),
            cash_balance,
            asset_ids: Vec::new(),
            renting: String::new(),
        }
    }

    #[must_use]
    pub fn can_afford(&self, amount: f64) -> bool {
        self.cash_balance >= amount
    }
}

// =============================================================================
// GLOBAL ASSET KEY INDEX
// =============================================================================

/// Ordered, append-only set of every asset storage key ever issued.
///
/// Membership is a linear scan; insertion order is the enumeration order of
/// `listAssets`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetKeyIndex(Vec<String>);

impl AssetKeyIndex {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.0.iter().any(|k| k == key)
    }

    /// Append `key` unless already present. Returns `true` if appended.
    pub fn insert(&mut self, key: impl Into<String>) -> bool {
        let key = key.into();
        if self.contains(&key) {
            return false;
        }
        self.0.push(key);
        true
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
