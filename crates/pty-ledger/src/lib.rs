//! # Property Ledger Engine
//!
//! Transaction engine for fractional ownership of real-estate tokens over a
//! plain key-value store. Properties are issued as fungible units, listed for
//! sale, transferred against cash, valued, and rented out with rent paid
//! pro rata to every unit holder.
//!
//! ## Components
//!
//! | Component | Port | Operations |
//! |-----------|------|------------|
//! | Account Ledger | `AccountLedgerApi` | `createAccount`, `createAccounts` |
//! | Asset Registry | `AssetRegistryApi` | `init`, `issuePropertyToken` |
//! | Marketplace | `MarketplaceApi` | `setForSale`, `transferPaper` |
//! | Valuation | `ValuationApi` | `updateMktVal`, `setRent` |
//! | Rent Engine | `RentApi` | `processRent`, `setRenters` |
//! | Queries | `LedgerQueryApi` | `getAccount`, `getAsset`, `listAssets`, `fetchRaw` |
//!
//! ## Domain Invariants
//!
//! | Invariant | Description |
//! |-----------|-------------|
//! | Conservation | Σ owners + Σ listings == issued quantity, per asset |
//! | Non-negative cash | No account balance below zero after a committed command |
//! | Unique holders | One ownership and one listing entry per investor |
//! | Deterministic identity | Same address (case-insensitive) → same identifier |
//!
//! Multi-record commands are NOT atomic: a store failure on write N leaves
//! writes 1..N-1 committed.
//!
//! ## Crate Structure (Hexagonal Architecture)
//!
//! - `domain/` - records, key layout, calculations, invariants
//! - `ports/` - inbound API traits, outbound store/identifier traits
//! - `adapters/` - in-memory and file-backed stores, SHA-256 identifiers
//! - `service/` - `LedgerService`, one file per inbound port
//!
//! ## Usage
//!
//! ```
//! use pty_ledger::prelude::*;
//!
//! let mut ledger = LedgerService::new(InMemoryKVStore::new(), LedgerConfig::default());
//! ledger.execute(Command::Init).unwrap();
//! ledger
//!     .execute(Command::CreateAccount { id: "alice".into() })
//!     .unwrap();
//! let alice = ledger.get_account("alice").unwrap();
//! assert_eq!(alice.cash_balance, 10_000_000.0);
//! ```

pub mod adapters;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod events;
pub mod ports;
pub mod service;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use adapters::{FileBackedKVStore, InMemoryKVStore, Sha256IdentifierDeriver};
pub use commands::{Command, Receipt};
pub use config::LedgerConfig;
pub use domain::entities::{Account, AssetKeyIndex, AssetStatus, PropertyToken};
pub use errors::{ErrorKind, LedgerError, LedgerResult, StoreError};
pub use events::LedgerEvent;
pub use service::LedgerService;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::adapters::{FileBackedKVStore, InMemoryKVStore, Sha256IdentifierDeriver};
    pub use crate::commands::*;
    pub use crate::config::LedgerConfig;
    pub use crate::domain::entities::*;
    pub use crate::errors::{ErrorKind, LedgerError, LedgerResult, StoreError};
    pub use crate::events::*;
    pub use crate::ports::inbound::*;
    pub use crate::ports::outbound::{IdentifierDeriver, KeyValueStore};
    pub use crate::service::LedgerService;
}

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
