//! # Domain Invariants
//!
//! Record-level invariants checked before a mutated record is written back.
//!
//! - Quantity conservation: owners + listings == issued quantity
//! - Unique holders: owner ids and seller ids are unique per list
//! - Non-negative cash: no account balance below zero
//!
//! The store offers no help here; these checks are the only enforcement.

use super::entities::{Account, PropertyToken};

// =============================================================================
// INVARIANT CHECKS
// =============================================================================

/// Σ owners + Σ listings equals the issued quantity.
#[must_use]
pub fn check_quantity_conservation(token: &PropertyToken) -> bool {
    token.total_owned() + token.total_listed() == token.quantity
}

/// No investor appears twice in the owner list, nor twice in the listing list.
#[must_use]
pub fn check_unique_holders(token: &PropertyToken) -> bool {
    let owners_unique = token
        .owners
        .iter()
        .enumerate()
        .all(|(i, o)| !token.owners[..i].iter().any(|p| p.investor_id == o.investor_id));
    let sellers_unique = token
        .for_sale
        .iter()
        .enumerate()
        .all(|(i, l)| !token.for_sale[..i].iter().any(|p| p.investor_id == l.investor_id));
    owners_unique && sellers_unique
}

/// Cash balance is a finite, non-negative number.
#[must_use]
pub fn check_non_negative_cash(account: &Account) -> bool {
    account.cash_balance.is_finite() && account.cash_balance >= 0.0
}

/// Check every token invariant at once.
#[must_use]
pub fn check_token_invariants(token: &PropertyToken) -> InvariantCheckResult {
    let mut violations = Vec::new();

    if !check_quantity_conservation(token) {
        violations.push(InvariantViolation::QuantityNotConserved {
            owned: token.total_owned(),
            listed: token.total_listed(),
            issued: token.quantity,
        });
    }

    if !check_unique_holders(token) {
        violations.push(InvariantViolation::DuplicateHolder);
    }

    InvariantCheckResult::from(violations)
}

/// Check every account invariant at once.
#[must_use]
pub fn check_account_invariants(account: &Account) -> InvariantCheckResult {
    let mut violations = Vec::new();

    if !check_non_negative_cash(account) {
        violations.push(InvariantViolation::NegativeCash {
            balance: account.cash_balance,
        });
    }

    InvariantCheckResult::from(violations)
}

// =============================================================================
// INVARIANT TYPES
// =============================================================================

/// Result of checking invariants.
#[derive(Clone, Debug, PartialEq)]
pub enum InvariantCheckResult {
    /// All invariants hold.
    Valid,
    /// One or more invariants violated.
    Invalid(Vec<InvariantViolation>),
}

impl InvariantCheckResult {
    #[must_use]
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }
}

impl From<Vec<InvariantViolation>> for InvariantCheckResult {
    fn from(violations: Vec<InvariantViolation>) -> Self {
        if violations.is_empty() {
            Self::Valid
        } else {
            Self::Invalid(violations)
        }
    }
}

/// Specific invariant violation.
#[derive(Clone, Debug, PartialEq)]
pub enum InvariantViolation {
    QuantityNotConserved { owned: u64, listed: u64, issued: u64 },
    DuplicateHolder,
    NegativeCash { balance: f64 },
}

impl std::fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::QuantityNotConserved {
                owned,
                listed,
                issued,
            } => write!(
                f,
                "quantity not conserved: owned {owned} + listed {listed} != issued {issued}"
            ),
            Self::DuplicateHolder => write!(f, "holder appears more than once"),
            Self::NegativeCash { balance } => write!(f, "negative cash balance {balance}"),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
