//! # Marketplace API Implementation
//!
//! Listing (ownership → listing) and settlement (listing → ownership + cash).
//! Every check runs before the first `put`.

use super::helpers::{require_amount, require_id, require_quantity};
use super::*;
use crate::commands::{ListingRequest, TransferRequest};
use crate::domain::services::settlement_amount;
use crate::events::{ListingUpdated, TransferSettled};

impl<S, H> MarketplaceApi for LedgerService<S, H>
where
    S: KeyValueStore,
    H: IdentifierDeriver,
{
    #[instrument(skip(self, request), fields(asset = %request.asset_id, seller = %request.seller))]
    fn set_for_sale(&mut self, request: &ListingRequest) -> LedgerResult<ListingUpdated> {
        require_id("cusip", &request.asset_id)?;
        require_quantity(request.quantity)?;
        require_amount("sellval", request.unit_price)?;

        let mut token = self.load_token(&request.asset_id)?;
        let seller = self.load_account(&request.seller)?;

        let available = token.owned_by(&request.seller);
        if !token.debit_ownership(&request.seller, request.quantity) {
            return Err(LedgerError::InsufficientQuantity {
                asset: request.asset_id.clone(),
                holder: request.seller.clone(),
                requested: request.quantity,
                available,
            });
        }
        token.add_to_listing(&request.seller, request.quantity, request.unit_price);
        let listed = token
            .listing_of(&request.seller)
            .map_or(request.quantity, |l| l.quantity);

        self.store_account(&seller)?;
        self.store_token(&token)?;

        info!(
            quantity = request.quantity,
            listed,
            unit_price = request.unit_price,
            "Units listed for sale"
        );
        Ok(ListingUpdated {
            asset: token.id,
            seller: seller.id,
            quantity: request.quantity,
            listed,
            unit_price: request.unit_price,
        })
    }

    #[instrument(
        skip(self, request),
        fields(asset = %request.asset_id, seller = %request.seller, buyer = %request.buyer)
    )]
    fn transfer_paper(&mut self, request: &TransferRequest) -> LedgerResult<TransferSettled> {
        require_id("cusip", &request.asset_id)?;
        require_quantity(request.quantity)?;

        let mut token = self.load_token(&request.asset_id)?;
        let mut seller = self.load_account(&request.seller)?;
        let mut buyer = self.load_account(&request.buyer)?;

        let (listed, unit_price) = token
            .listing_of(&request.seller)
            .map_or((0, 0.0), |l| (l.quantity, l.unit_price));
        if listed < request.quantity {
            return Err(LedgerError::InsufficientQuantity {
                asset: request.asset_id.clone(),
                holder: request.seller.clone(),
                requested: request.quantity,
                available: listed,
            });
        }

        let amount = settlement_amount(request.quantity, unit_price);
        if !buyer.can_afford(amount) {
            return Err(LedgerError::InsufficientFunds {
                account: buyer.id.clone(),
                required: amount,
                available: buyer.cash_balance,
            });
        }

        let self_transfer = request.seller == request.buyer;
        if !self_transfer {
            buyer.cash_balance -= amount;
            seller.cash_balance += amount;
        }

        if !token.take_from_listing(&request.seller, request.quantity) {
            return Err(LedgerError::InsufficientQuantity {
                asset: request.asset_id.clone(),
                holder: request.seller.clone(),
                requested: request.quantity,
                available: listed,
            });
        }
        token.credit_ownership(&request.buyer, request.quantity);

        self.store_account(&buyer)?;
        if self_transfer {
            // Seller and buyer are one record; keep the three-write order.
            self.store_account(&buyer)?;
        } else {
            self.store_account(&seller)?;
        }
        self.store_token(&token)?;

        let settled = if self_transfer { 0.0 } else { amount };
        info!(quantity = request.quantity, amount = settled, "Transfer settled");
        Ok(TransferSettled {
            asset: token.id,
            seller: request.seller.clone(),
            buyer: request.buyer.clone(),
            quantity: request.quantity,
            amount: settled,
        })
    }
}
