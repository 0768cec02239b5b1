//! # Adapters Layer (Outer Hexagon)
//!
//! Concrete implementations of the outbound ports.

pub mod identifier;
pub mod storage;

pub use identifier::Sha256IdentifierDeriver;
pub use storage::{FileBackedKVStore, InMemoryKVStore};
