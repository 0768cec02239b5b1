//! # Domain Services
//!
//! Stateless calculations shared by the ledger operations.

use super::entities::{Owner, PropertyToken};
use crate::errors::{LedgerError, LedgerResult};

// =============================================================================
// IDENTIFIERS
// =============================================================================

/// Input string for identifier derivation.
///
/// Concatenation of street, city, postcode and state, uppercased so that
/// casing differences in an address never yield a second token.
#[must_use]
pub fn identifier_source(street: &str, city: &str, postcode: &str, state: &str) -> String {
    let mut source = String::with_capacity(street.len() + city.len() + postcode.len() + state.len());
    source.push_str(street);
    source.push_str(city);
    source.push_str(postcode);
    source.push_str(state);
    source.to_uppercase()
}

/// Display prefix of an individually created account.
#[must_use]
pub fn account_prefix(account_id: &str, suffix: &str) -> String {
    format!("{account_id}{suffix}")
}

/// Id of the `n`-th account of a batch (1-based).
#[must_use]
pub fn batch_account_id(n: u32) -> String {
    format!("company{n}")
}

/// Display prefix of the `n`-th account of a batch.
///
/// Single-digit numbers are padded with a trailing `0`.
#[must_use]
pub fn batch_account_prefix(n: u32, suffix: &str) -> String {
    if n < 10 {
        format!("{n}0{suffix}")
    } else {
        format!("{n}{suffix}")
    }
}

// =============================================================================
// SETTLEMENT
// =============================================================================

/// Cash owed by a buyer for `quantity` units at `unit_price`.
#[must_use]
pub fn settlement_amount(quantity: u64, unit_price: f64) -> f64 {
    quantity as f64 * unit_price
}

// =============================================================================
// RENT
// =============================================================================

/// Rent charged to each renter for one period: `rent / renters`.
///
/// # Errors
///
/// `NoRenters` when the asset has no renters; the rate would be undefined.
pub fn rent_per_period(token: &PropertyToken) -> LedgerResult<f64> {
    if token.renters.is_empty() {
        return Err(LedgerError::NoRenters {
            asset: token.id.clone(),
        });
    }
    Ok(token.rent / token.renters.len() as f64)
}

/// Share of one period's rent owed to a single unit.
///
/// # Errors
///
/// `InvalidRecord` when the issued quantity is zero.
pub fn rent_per_unit(token: &PropertyToken, per_period: f64) -> LedgerResult<f64> {
    if token.quantity == 0 {
        return Err(LedgerError::invalid_record(format!(
            "property token {} has zero issued quantity",
            token.id
        )));
    }
    Ok(per_period / token.quantity as f64)
}

/// Ownership with every listing folded back into its seller's entry.
///
/// Listed units still earn rent. Listings whose seller has no ownership
/// entry are not represented.
#[must_use]
pub fn net_holdings(token: &PropertyToken) -> Vec<Owner> {
    let mut holdings = token.owners.clone();
    for listing in &token.for_sale {
        if let Some(owner) = holdings
            .iter_mut()
            .find(|o| o.investor_id == listing.investor_id)
        {
            owner.quantity += listing.quantity;
        }
    }
    holdings
}
