//! Test doubles and fixtures shared by unit and workspace tests.

use std::collections::HashSet;

use crate::adapters::InMemoryKVStore;
use crate::commands::{IssueRequest, ListingRequest, TransferRequest};
use crate::config::LedgerConfig;
use crate::errors::StoreError;
use crate::ports::outbound::KeyValueStore;
use crate::service::LedgerService;

/// In-memory store that refuses selected writes.
///
/// Fails the `fail_on_put`-th `put` (1-based, counted from construction)
/// and every `put` to a key in `fail_keys`. Refused writes change nothing.
#[derive(Debug, Default, Clone)]
pub struct FailingStore {
    inner: InMemoryKVStore,
    attempts: usize,
    fail_on_put: Option<usize>,
    fail_keys: HashSet<String>,
}

impl FailingStore {
    pub fn new(inner: InMemoryKVStore) -> Self {
        Self {
            inner,
            ..Default::default()
        }
    }

    /// Fail the `n`-th put attempted from now on (1-based).
    pub fn fail_on_put(mut self, n: usize) -> Self {
        self.fail_on_put = Some(self.attempts + n);
        self
    }

    pub fn fail_key(mut self, key: impl Into<String>) -> Self {
        self.fail_keys.insert(key.into());
        self
    }

    pub fn inner(&self) -> &InMemoryKVStore {
        &self.inner
    }

    pub fn into_inner(self) -> InMemoryKVStore {
        self.inner
    }
}

impl KeyValueStore for FailingStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        self.inner.get(key)
    }

    fn put(&mut self, key: &str, value: &[u8]) -> Result<(), StoreError> {
        self.attempts += 1;
        if self.fail_on_put == Some(self.attempts) || self.fail_keys.contains(key) {
            return Err(StoreError::Unavailable {
                message: format!("injected failure on put #{} ({key})", self.attempts),
            });
        }
        self.inner.put(key, value)
    }

    fn exists(&self, key: &str) -> Result<bool, StoreError> {
        self.inner.exists(key)
    }
}

/// Fresh in-memory service with default config.
pub fn make_test_service() -> LedgerService<InMemoryKVStore> {
    LedgerService::new(InMemoryKVStore::new(), LedgerConfig::default())
}

/// Issuance payload with a unique address derived from `street`.
pub fn issue_request(street: &str, issuer: &str, quantity: u64) -> IssueRequest {
    IssueRequest {
        name: format!("{street} property"),
        street: street.to_string(),
        city: "Springfield".to_string(),
        postcode: "62701".to_string(),
        state: "IL".to_string(),
        buy_value: 250_000.0,
        market_value: 0.0,
        quantity,
        issuer: issuer.to_string(),
        issue_date: "1456161763790".to_string(),
        links: None,
    }
}

pub fn listing(asset_id: &str, seller: &str, quantity: u64, unit_price: f64) -> ListingRequest {
    ListingRequest {
        asset_id: asset_id.to_string(),
        seller: seller.to_string(),
        quantity,
        unit_price,
    }
}

pub fn transfer(asset_id: &str, seller: &str, buyer: &str, quantity: u64) -> TransferRequest {
    TransferRequest {
        asset_id: asset_id.to_string(),
        seller: seller.to_string(),
        buyer: buyer.to_string(),
        quantity,
    }
}
