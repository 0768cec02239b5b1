//! # Valuation API Implementation

use super::helpers::{require_amount, require_id};
use super::*;
use crate::commands::{RentRateRequest, ValuationRequest};
use crate::domain::entities::AssetStatus;
use crate::events::{MarketValueUpdated, RentRateSet};

impl<S, H> ValuationApi for LedgerService<S, H>
where
    S: KeyValueStore,
    H: IdentifierDeriver,
{
    #[instrument(skip(self, request), fields(asset = %request.asset_id))]
    fn update_market_value(
        &mut self,
        request: &ValuationRequest,
    ) -> LedgerResult<MarketValueUpdated> {
        require_id("cusip", &request.asset_id)?;

        let mut token = self.load_token(&request.asset_id)?;
        token.market_value = request.market_value;
        token.status = AssetStatus::Approved;
        self.store_token(&token)?;

        info!(market_value = request.market_value, "Market value updated");
        Ok(MarketValueUpdated {
            asset: token.id,
            market_value: token.market_value,
        })
    }

    #[instrument(skip(self, request), fields(asset = %request.asset_id, set_by = %request.issuer))]
    fn set_rent(&mut self, request: &RentRateRequest) -> LedgerResult<RentRateSet> {
        require_id("cusip", &request.asset_id)?;
        require_amount("rent rate", request.rate)?;

        let mut token = self.load_token(&request.asset_id)?;
        // Existence only; the caller is not matched against the issuer.
        self.load_account(&request.issuer)?;
        if token.issuer != request.issuer {
            warn!(
                recorded_issuer = %token.issuer,
                "Rent rate set by an account other than the issuer"
            );
        }

        token.rent = request.rate;
        self.store_token(&token)?;

        info!(rate = request.rate, "Rent rate set");
        Ok(RentRateSet {
            asset: token.id,
            rate: token.rent,
            set_by: request.issuer.clone(),
        })
    }
}
