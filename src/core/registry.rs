//! Single-owner account registry
//!
//! This module provides the `Registry` struct, an in-memory map of account
//! numbers to accounts. Mutation requires `&mut self`, so the borrow checker
//! guarantees exclusive access and no locking is needed.
//!
//! The Registry is responsible for:
//! - Registering accounts under unique numbers
//! - Routing deposits, withdrawals and transfers to the right accounts
//! - Providing sorted account listings

use crate::core::traits::AccountRegistry;
use crate::types::{Account, AccountNumber, LedgerError};
use rust_decimal::Decimal;
use std::collections::hash_map::Entry;
use std::collections::HashMap;

/// Owns every registered account
#[derive(Debug, Default)]
pub struct Registry {
    accounts: HashMap<AccountNumber, Account>,
}

impl Registry {
    /// Create a new Registry with no accounts
    ///
    /// # Returns
    ///
    /// An empty registry ready for [`AccountRegistry::insert`]
    pub fn new() -> Self {
        Registry {
            accounts: HashMap::new(),
        }
    }

    fn account_mut(&mut self, number: AccountNumber) -> Result<&mut Account, LedgerError> {
        self.accounts
            .get_mut(&number)
            .ok_or_else(|| LedgerError::account_not_found(number))
    }
}

impl AccountRegistry for Registry {
    fn insert(&mut self, account: Account) -> Result<(), LedgerError> {
        match self.accounts.entry(account.number) {
            Entry::Occupied(_) => Err(LedgerError::duplicate_account(account.number)),
            Entry::Vacant(slot) => {
                slot.insert(account);
                Ok(())
            }
        }
    }

    fn get(&self, number: AccountNumber) -> Result<Account, LedgerError> {
        self.accounts
            .get(&number)
            .cloned()
            .ok_or_else(|| LedgerError::account_not_found(number))
    }

    fn deposit(&mut self, number: AccountNumber, amount: Decimal) -> Result<Account, LedgerError> {
        let account = self.account_mut(number)?;
        account.deposit(amount)?;
        Ok(account.clone())
    }

    fn withdraw(&mut self, number: AccountNumber, amount: Decimal) -> Result<Account, LedgerError> {
        let account = self.account_mut(number)?;
        account.withdraw(amount)?;
        Ok(account.clone())
    }

    /// Move funds between two accounts
    ///
    /// The source is taken out of the map for the duration of the transfer
    /// so both accounts can be borrowed mutably, then put back whatever the
    /// outcome.
    fn transfer(
        &mut self,
        from: AccountNumber,
        to: AccountNumber,
        amount: Decimal,
    ) -> Result<Account, LedgerError> {
        if from == to {
            return Err(LedgerError::same_account(from));
        }

        let mut source = self
            .accounts
            .remove(&from)
            .ok_or_else(|| LedgerError::account_not_found(from))?;

        let result = match self.accounts.get_mut(&to) {
            Some(destination) => source.transfer(amount, destination),
            None => Err(LedgerError::account_not_found(to)),
        };

        let snapshot = source.clone();
        self.accounts.insert(from, source);
        result.map(|()| snapshot)
    }

    fn len(&self) -> usize {
        self.accounts.len()
    }

    fn accounts(&self) -> Result<Vec<Account>, LedgerError> {
        let mut accounts: Vec<Account> = self.accounts.values().cloned().collect();
        accounts.sort_by_key(|account| account.number);
        Ok(accounts)
    }
}
