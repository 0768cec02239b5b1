//! # Rent API Implementation
//!
//! Rent collection and distribution, and the renter roster.
//!
//! ## Distribution
//!
//! The payer is charged one period (`rent / renters`), whatever payment they
//! state. Listed units still earn rent: listings are folded back into their
//! seller's holding before computing payouts. The fold is never written; the
//! asset record is left exactly as it was.
//!
//! Every owner account is resolved before the payer is charged.

use super::helpers::{require_amount, require_id};
use super::*;
use tracing::debug;
use crate::commands::{RentPaymentRequest, RenterRequest};
use crate::domain::services::{net_holdings, rent_per_period, rent_per_unit};
use crate::events::{RentDistributed, RentPayout, RenterChanged};

impl<S, H> RentApi for LedgerService<S, H>
where
    S: KeyValueStore,
    H: IdentifierDeriver,
{
    #[instrument(skip(self, request), fields(asset = %request.asset_id, payer = %request.payer))]
    fn process_rent(&mut self, request: &RentPaymentRequest) -> LedgerResult<RentDistributed> {
        require_id("cusip", &request.asset_id)?;
        require_amount("payment", request.stated_payment)?;

        let mut payer = self.load_account(&request.payer)?;
        if !payer.can_afford(request.stated_payment) {
            return Err(LedgerError::InsufficientFunds {
                account: payer.id,
                required: request.stated_payment,
                available: payer.cash_balance,
            });
        }

        let token = self.load_token(&request.asset_id)?;
        let per_period = rent_per_period(&token)?;
        if !payer.can_afford(per_period) {
            return Err(LedgerError::InsufficientFunds {
                account: payer.id,
                required: per_period,
                available: payer.cash_balance,
            });
        }
        if per_period != request.stated_payment {
            debug!(
                stated = request.stated_payment,
                charged = per_period,
                "Stated payment differs from rent per period"
            );
        }

        let holdings = net_holdings(&token);
        let per_unit = rent_per_unit(&token, per_period)?;
        for holding in &holdings {
            self.load_account(&holding.investor_id)?;
        }

        payer.cash_balance -= per_period;
        self.store_account(&payer)?;

        let mut payouts = Vec::with_capacity(holdings.len());
        for holding in holdings {
            // Fresh load: a payer who also owns units keeps the debit above.
            let mut owner = self.load_account(&holding.investor_id)?;
            let amount = per_unit * holding.quantity as f64;
            owner.cash_balance += amount;
            self.store_account(&owner)?;
            payouts.push(RentPayout {
                owner: owner.id,
                amount,
            });
        }

        info!(
            charged = per_period,
            per_unit,
            owners = payouts.len(),
            "Rent distributed"
        );
        Ok(RentDistributed {
            asset: token.id,
            payer: payer.id,
            debited: per_period,
            per_unit,
            payouts,
        })
    }

    #[instrument(
        skip(self, request),
        fields(asset = %request.asset_id, renter = %request.renter, action = %request.action)
    )]
    fn set_renters(&mut self, request: &RenterRequest) -> LedgerResult<RenterChanged> {
        let action: RenterAction = request.action.parse()?;
        require_id("cusip", &request.asset_id)?;
        require_id("invid", &request.renter)?;

        let mut token = self.load_token(&request.asset_id)?;
        let mut renter = self.load_account(&request.renter)?;

        match action {
            RenterAction::Add => {
                // One rented asset per account.
                if !renter.renting.is_empty() && renter.renting != token.id {
                    warn!(current = %renter.renting, "Renter already bound to another asset");
                    return Err(LedgerError::AlreadyRenting {
                        renter: renter.id,
                        current: renter.renting,
                    });
                }
                if !token.add_renter(&request.renter) {
                    debug!("Already a renter");
                }
                renter.renting = token.id.clone();
            }
            RenterAction::Remove => {
                if !token.remove_renter(&request.renter) {
                    return Err(LedgerError::RenterNotFound {
                        asset: token.id,
                        renter: renter.id,
                    });
                }
                if renter.renting == token.id {
                    renter.renting.clear();
                }
            }
        }

        self.store_account(&renter)?;
        self.store_token(&token)?;

        info!(renters = token.renters.len(), "Renter roster updated");
        Ok(RenterChanged {
            asset: token.id,
            renter: renter.id,
        })
    }
}
