//! # Identifier Derivation
//!
//! SHA-256 of the source string, truncated to 16 bytes and hex-encoded.
//! Output is always 32 lowercase hex characters.

use sha2::{Digest, Sha256};

use crate::ports::outbound::IdentifierDeriver;

/// Byte length kept from the digest.
pub const IDENTIFIER_BYTES: usize = 16;

/// Default `IdentifierDeriver`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sha256IdentifierDeriver;

impl IdentifierDeriver for Sha256IdentifierDeriver {
    fn derive(&self, source: &str) -> String {
        let digest = Sha256::digest(source.as_bytes());
        hex::encode(&digest[..IDENTIFIER_BYTES])
    }
}
