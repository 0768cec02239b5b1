//! # Ledger Service
//!
//! The transaction engine. Implements every inbound port against an
//! injected `KeyValueStore` and `IdentifierDeriver`.
//!
//! ## Execution Model
//!
//! One command runs to completion (load → validate → mutate → persist)
//! before the next. Records are checked out of the store, mutated in memory
//! and checked back in whole. Every record a command touches is loaded and
//! every request check runs before the first write, so a rejected command
//! leaves the store untouched. The invariant check on each stored record
//! and the store itself can still fail mid-sequence; earlier writes of that
//! command stay committed.

mod accounts;
mod helpers;
mod marketplace;
mod query;
mod registry;
mod rent;
mod valuation;

use tracing::{info, instrument, warn};

use crate::adapters::Sha256IdentifierDeriver;
use crate::commands::{Command, Receipt, RenterAction};
use crate::config::LedgerConfig;
use crate::errors::{LedgerError, LedgerResult};
use crate::events::LedgerEvent;
use crate::ports::inbound::{
    AccountLedgerApi, AssetRegistryApi, LedgerQueryApi, MarketplaceApi, RentApi, ValuationApi,
};
use crate::ports::outbound::{IdentifierDeriver, KeyValueStore};

/// The property ledger engine.
pub struct LedgerService<S, H = Sha256IdentifierDeriver>
where
    S: KeyValueStore,
    H: IdentifierDeriver,
{
    /// Backing store; the engine never caches records between commands.
    pub(crate) store: S,
    /// Asset identifier derivation.
    pub(crate) deriver: H,
    pub(crate) config: LedgerConfig,
}

impl<S: KeyValueStore> LedgerService<S, Sha256IdentifierDeriver> {
    /// Create a service with the default identifier deriver.
    pub fn new(store: S, config: LedgerConfig) -> Self {
        Self::with_deriver(store, Sha256IdentifierDeriver, config)
    }
}

impl<S, H> LedgerService<S, H>
where
    S: KeyValueStore,
    H: IdentifierDeriver,
{
    pub fn with_deriver(store: S, deriver: H, config: LedgerConfig) -> Self {
        Self {
            store,
            deriver,
            config,
        }
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Execute one command.
    ///
    /// # Errors
    ///
    /// Any `LedgerError`. On a `Persistence` error, writes issued before the
    /// failing one remain committed.
    #[instrument(skip(self, command), fields(function = command.name()))]
    pub fn execute(&mut self, command: Command) -> LedgerResult<Receipt> {
        let result = self.dispatch(command);
        match &result {
            Ok(receipt) => info!(events = receipt.events.len(), "Command completed"),
            Err(e) => warn!(error = %e, kind = ?e.kind(), "Command failed"),
        }
        result
    }

    fn dispatch(&mut self, command: Command) -> LedgerResult<Receipt> {
        let events: Vec<LedgerEvent> = match command {
            Command::Init => vec![self.init()?.into()],
            Command::CreateAccount { id } => vec![self.create_account(&id)?.into()],
            Command::CreateAccounts { count } => self
                .create_accounts(count)?
                .into_iter()
                .map(LedgerEvent::from)
                .collect(),
            Command::IssuePropertyToken(request) => {
                vec![self.issue_property_token(request)?.into()]
            }
            Command::SetForSale(request) => vec![self.set_for_sale(&request)?.into()],
            Command::TransferPaper(request) => vec![self.transfer_paper(&request)?.into()],
            Command::UpdateMktVal(request) => vec![self.update_market_value(&request)?.into()],
            Command::SetRent(request) => vec![self.set_rent(&request)?.into()],
            Command::ProcessRent(request) => vec![self.process_rent(&request)?.into()],
            Command::SetRenters(request) => {
                let action: RenterAction = request.action.parse()?;
                let changed = self.set_renters(&request)?;
                vec![match action {
                    RenterAction::Add => LedgerEvent::RenterAdded(changed),
                    RenterAction::Remove => LedgerEvent::RenterRemoved(changed),
                }]
            }
            Command::GetAccount { id } => {
                return Ok(Receipt::with_output(to_output(&self.get_account(&id)?)?));
            }
            Command::GetAsset { asset_id } => {
                return Ok(Receipt::with_output(to_output(&self.get_asset(&asset_id)?)?));
            }
            Command::ListAssets => {
                return Ok(Receipt::with_output(to_output(&self.list_assets()?)?));
            }
            Command::FetchRaw { key } => {
                let output = match self.fetch_raw(&key)? {
                    Some(bytes) => serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                        serde_json::Value::String(String::from_utf8_lossy(&bytes).into_owned())
                    }),
                    None => serde_json::Value::Null,
                };
                return Ok(Receipt::with_output(output));
            }
        };
        Ok(Receipt::with_events(events))
    }
}

fn to_output<T: serde::Serialize>(value: &T) -> LedgerResult<serde_json::Value> {
    serde_json::to_value(value).map_err(|e| LedgerError::CorruptRecord {
        key: String::from("<output>"),
        reason: e.to_string(),
    })
}
