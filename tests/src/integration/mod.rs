//! Cross-crate integration tests.

pub mod flows;
pub mod properties;
pub mod runtime;
