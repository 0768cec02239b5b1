//! # Error Types
//!
//! All error types surfaced by the ledger engine and its storage port.
//!
//! Every failure is reported synchronously. A `Persistence` failure in the
//! middle of a multi-record transaction leaves the earlier writes committed;
//! callers must treat any error as "final state unknown beyond already
//! committed writes".

use thiserror::Error;

// =============================================================================
// STORE ERRORS
// =============================================================================

/// Errors raised by a `KeyValueStore` adapter.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// I/O error during read/write.
    #[error("store I/O error: {message}")]
    Io { message: String },

    /// Persisted data could not be interpreted by the adapter.
    #[error("store corruption: {message}")]
    Corruption { message: String },

    /// Value rejected by the adapter (e.g. non UTF-8 bytes for a text store).
    #[error("store rejected value for key {key}: {reason}")]
    Rejected { key: String, reason: String },

    /// Write refused because the store is unavailable.
    #[error("store unavailable: {message}")]
    Unavailable { message: String },
}

// =============================================================================
// LEDGER ERRORS
// =============================================================================

/// Coarse classification of a [`LedgerError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Wrong argument count, malformed payload, invalid field values.
    InvalidRequest,
    /// Missing account, asset or renter.
    NotFound,
    /// Duplicate asset identifier or account id, or a renter bound elsewhere.
    Conflict,
    /// Seller does not hold enough units.
    InsufficientQuantity,
    /// Account cash cannot cover the amount.
    InsufficientFunds,
    /// Store read/write failure or undecodable record.
    Persistence,
}

/// Errors returned by ledger operations.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Malformed or out-of-range request.
    #[error("invalid request: {reason}")]
    InvalidRequest { reason: String },

    /// Record content violates a structural rule (empty identifier, zero quantity).
    #[error("invalid record: {reason}")]
    InvalidRecord { reason: String },

    /// Account does not exist.
    #[error("account not found: {id}")]
    AccountNotFound { id: String },

    /// Asset does not exist.
    #[error("property token not found: {id}")]
    AssetNotFound { id: String },

    /// Account is not listed as a renter of the asset.
    #[error("{renter} is not a renter of {asset}")]
    RenterNotFound { asset: String, renter: String },

    /// Renter already rents a different asset.
    #[error("{renter} already rents {current}")]
    AlreadyRenting { renter: String, current: String },

    /// Account already exists.
    #[error("account already exists: {id}")]
    AccountExists { id: String },

    /// Asset already issued under this identifier.
    #[error("property token already exists: {id}")]
    AssetExists { id: String },

    /// Holder owns or lists fewer units than requested.
    #[error("{holder} holds {available} units of {asset}, requested {requested}")]
    InsufficientQuantity {
        asset: String,
        holder: String,
        requested: u64,
        available: u64,
    },

    /// Account cash balance below the required amount.
    #[error("{account} has cash {available}, requires {required}")]
    InsufficientFunds {
        account: String,
        required: f64,
        available: f64,
    },

    /// Rent per period is undefined for an asset without renters.
    #[error("property token {asset} has no renters")]
    NoRenters { asset: String },

    /// Record present but could not be decoded.
    #[error("corrupt record at {key}: {reason}")]
    CorruptRecord { key: String, reason: String },

    /// Underlying store failure.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl LedgerError {
    /// Build an `InvalidRequest` error.
    pub fn invalid_request(reason: impl Into<String>) -> Self {
        Self::InvalidRequest {
            reason: reason.into(),
        }
    }

    /// Build an `InvalidRecord` error.
    pub fn invalid_record(reason: impl Into<String>) -> Self {
        Self::InvalidRecord {
            reason: reason.into(),
        }
    }

    /// Classify this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidRequest { .. } | Self::InvalidRecord { .. } | Self::NoRenters { .. } => {
                ErrorKind::InvalidRequest
            }
            Self::AccountNotFound { .. }
            | Self::AssetNotFound { .. }
            | Self::RenterNotFound { .. } => ErrorKind::NotFound,
            Self::AccountExists { .. }
            | Self::AssetExists { .. }
            | Self::AlreadyRenting { .. } => ErrorKind::Conflict,
            Self::InsufficientQuantity { .. } => ErrorKind::InsufficientQuantity,
            Self::InsufficientFunds { .. } => ErrorKind::InsufficientFunds,
            Self::CorruptRecord { .. } | Self::Store(_) => ErrorKind::Persistence,
        }
    }
}

/// Result alias for ledger operations.
pub type LedgerResult<T> = Result<T, LedgerError>;
