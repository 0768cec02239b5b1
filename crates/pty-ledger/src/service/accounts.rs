//! # Account Ledger API Implementation

use super::helpers::require_id;
use super::*;
use crate::domain::entities::Account;
use crate::domain::keys::account_key;
use crate::domain::services::{account_prefix, batch_account_id, batch_account_prefix};
use crate::events::AccountCreated;

impl<S, H> AccountLedgerApi for LedgerService<S, H>
where
    S: KeyValueStore,
    H: IdentifierDeriver,
{
    #[instrument(skip(self))]
    fn create_account(&mut self, id: &str) -> LedgerResult<AccountCreated> {
        require_id("account id", id)?;

        if self.store.exists(&account_key(id))? {
            warn!(account = id, "Account already exists");
            return Err(LedgerError::AccountExists { id: id.to_string() });
        }

        let account = Account::new(
            id,
            account_prefix(id, &self.config.account_prefix_suffix),
            self.config.initial_cash_balance,
        );
        self.store_account(&account)?;

        info!(account = id, cash = account.cash_balance, "Account created");
        Ok(AccountCreated {
            account: account.id,
            cash_balance: account.cash_balance,
        })
    }

    #[instrument(skip(self))]
    fn create_accounts(&mut self, count: u32) -> LedgerResult<Vec<AccountCreated>> {
        let mut created = Vec::new();

        // No collision check: batch creation overwrites.
        for n in 1..=count {
            let account = Account::new(
                batch_account_id(n),
                batch_account_prefix(n, &self.config.account_prefix_suffix),
                self.config.initial_cash_balance,
            );
            self.store_account(&account)?;
            created.push(AccountCreated {
                account: account.id,
                cash_balance: account.cash_balance,
            });
        }

        info!(count, "Batch accounts created");
        Ok(created)
    }
}
