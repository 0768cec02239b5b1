//! # Domain Layer (Inner Hexagon)
//!
//! Pure business logic for the property ledger.
//! NO I/O, NO store access.
//!
//! - `entities` - persisted records
//! - `keys` - storage key layout
//! - `services` - stateless calculations (identifier input, rent, settlement)
//! - `invariants` - checks run before any record is written back

pub mod entities;
pub mod invariants;
pub mod keys;
pub mod services;

pub use entities::*;
pub use invariants::*;
pub use keys::*;
pub use services::*;
