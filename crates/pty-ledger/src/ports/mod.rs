//! # Ports Layer (Middle Hexagon)
//!
//! - **Driving Port (Inbound)**: `AccountLedgerApi`, `AssetRegistryApi`, `MarketplaceApi`,
//!   `ValuationApi`, `RentApi`, `LedgerQueryApi`
//! - **Driven Ports (Outbound)**: `KeyValueStore`, `IdentifierDeriver`
//! - No concrete implementations in this module

pub mod inbound;
pub mod outbound;

pub use inbound::*;
pub use outbound::*;
