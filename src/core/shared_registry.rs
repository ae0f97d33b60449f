//! Thread-safe account registry for the HTTP server
//!
//! This module provides the `SharedRegistry` struct, which stores accounts in
//! a `DashMap` so request handlers running on different worker threads can
//! reach them through a shared reference.
//!
//! # Design
//!
//! Each account sits behind its own `Mutex`. The map itself only hands out
//! `Arc` handles, and its shard guards are released before any account lock
//! is taken. Single-account operations lock one account; a transfer locks
//! both accounts, always in ascending account-number order, and holds both
//! locks while it validates and applies the change. Two transfers touching
//! the same pair therefore serialize instead of deadlocking, and no reader
//! can observe funds that left the source but have not reached the
//! destination.

use crate::core::traits::AccountRegistry;
use crate::types::{Account, AccountNumber, LedgerError};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use rust_decimal::Decimal;
use std::sync::{Arc, Mutex, MutexGuard};

type AccountHandle = Arc<Mutex<Account>>;

/// Thread-safe account store
///
/// All methods take `&self` and are safe to call from many threads at once.
#[derive(Debug, Default)]
pub struct SharedRegistry {
    accounts: DashMap<AccountNumber, AccountHandle>,
}

impl SharedRegistry {
    /// Create a new empty SharedRegistry
    pub fn new() -> Self {
        Self {
            accounts: DashMap::new(),
        }
    }

    /// Register a new account
    ///
    /// # Errors
    ///
    /// Returns `DuplicateAccount` if the number is already registered.
    pub fn insert(&self, account: Account) -> Result<(), LedgerError> {
        match self.accounts.entry(account.number) {
            Entry::Occupied(_) => Err(LedgerError::duplicate_account(account.number)),
            Entry::Vacant(slot) => {
                slot.insert(Arc::new(Mutex::new(account)));
                Ok(())
            }
        }
    }

    /// Snapshot of a single account
    pub fn get(&self, number: AccountNumber) -> Result<Account, LedgerError> {
        let handle = self.handle(number)?;
        let account = Self::lock(&handle, number)?;
        Ok(account.clone())
    }

    /// Current balance of a single account
    ///
    /// # Arguments
    ///
    /// * `number` - Account to look up
    ///
    /// # Returns
    ///
    /// The balance read under the account lock
    pub fn balance(&self, number: AccountNumber) -> Result<Decimal, LedgerError> {
        let handle = self.handle(number)?;
        let account = Self::lock(&handle, number)?;
        Ok(account.balance())
    }

    /// Statement text of a single account
    pub fn statement(&self, number: AccountNumber) -> Result<String, LedgerError> {
        let handle = self.handle(number)?;
        let account = Self::lock(&handle, number)?;
        Ok(account.statement())
    }

    /// Credit an account and return its updated snapshot
    pub fn deposit(&self, number: AccountNumber, amount: Decimal) -> Result<Account, LedgerError> {
        self.update(number, |account| account.deposit(amount))
    }

    /// Debit an account and return its updated snapshot
    pub fn withdraw(&self, number: AccountNumber, amount: Decimal) -> Result<Account, LedgerError> {
        self.update(number, |account| account.withdraw(amount))
    }

    /// Move funds between two accounts under one lock scope
    ///
    /// Returns the snapshot of the source account after the transfer.
    ///
    /// # Errors
    ///
    /// - `SameAccount` if `from == to`
    /// - `AccountNotFound` if either number is unknown
    /// - any error from [`Account::transfer`], in which case neither balance changes
    pub fn transfer(
        &self,
        from: AccountNumber,
        to: AccountNumber,
        amount: Decimal,
    ) -> Result<Account, LedgerError> {
        if from == to {
            return Err(LedgerError::same_account(from));
        }

        let source_handle = self.handle(from)?;
        let destination_handle = self.handle(to)?;

        // Lock order: ascending account number.
        let (mut source, mut destination) = if from < to {
            let source = Self::lock(&source_handle, from)?;
            let destination = Self::lock(&destination_handle, to)?;
            (source, destination)
        } else {
            let destination = Self::lock(&destination_handle, to)?;
            let source = Self::lock(&source_handle, from)?;
            (source, destination)
        };

        source.transfer(amount, &mut destination)?;
        Ok(source.clone())
    }

    /// Number of registered accounts
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    /// Whether no account is registered
    ///
    /// # Returns
    ///
    /// `true` until the first successful [`SharedRegistry::insert`]
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Snapshot of all accounts sorted by number
    ///
    /// Each account is read under its own lock; the listing as a whole is
    /// not a consistent cut if transfers run concurrently.
    pub fn accounts(&self) -> Result<Vec<Account>, LedgerError> {
        let handles: Vec<(AccountNumber, AccountHandle)> = self
            .accounts
            .iter()
            .map(|entry| (*entry.key(), Arc::clone(entry.value())))
            .collect();

        let mut accounts = handles
            .iter()
            .map(|(number, handle)| Self::lock(handle, *number).map(|account| account.clone()))
            .collect::<Result<Vec<Account>, LedgerError>>()?;
        accounts.sort_by_key(|account| account.number);
        Ok(accounts)
    }

    fn handle(&self, number: AccountNumber) -> Result<AccountHandle, LedgerError> {
        self.accounts
            .get(&number)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or_else(|| LedgerError::account_not_found(number))
    }

    fn lock(
        handle: &AccountHandle,
        number: AccountNumber,
    ) -> Result<MutexGuard<'_, Account>, LedgerError> {
        handle
            .lock()
            .map_err(|_| LedgerError::lock_poisoned(number))
    }

    fn update<F>(&self, number: AccountNumber, f: F) -> Result<Account, LedgerError>
    where
        F: FnOnce(&mut Account) -> Result<(), LedgerError>,
    {
        let handle = self.handle(number)?;
        let mut account = Self::lock(&handle, number)?;
        f(&mut *account)?;
        Ok(account.clone())
    }
}

impl AccountRegistry for SharedRegistry {
    fn insert(&mut self, account: Account) -> Result<(), LedgerError> {
        SharedRegistry::insert(self, account)
    }

    fn get(&self, number: AccountNumber) -> Result<Account, LedgerError> {
        SharedRegistry::get(self, number)
    }

    fn balance(&self, number: AccountNumber) -> Result<Decimal, LedgerError> {
        SharedRegistry::balance(self, number)
    }

    fn statement(&self, number: AccountNumber) -> Result<String, LedgerError> {
        SharedRegistry::statement(self, number)
    }

    fn deposit(&mut self, number: AccountNumber, amount: Decimal) -> Result<Account, LedgerError> {
        SharedRegistry::deposit(self, number, amount)
    }

    fn withdraw(&mut self, number: AccountNumber, amount: Decimal) -> Result<Account, LedgerError> {
        SharedRegistry::withdraw(self, number, amount)
    }

    fn transfer(
        &mut self,
        from: AccountNumber,
        to: AccountNumber,
        amount: Decimal,
    ) -> Result<Account, LedgerError> {
        SharedRegistry::transfer(self, from, to, amount)
    }

    fn len(&self) -> usize {
        SharedRegistry::len(self)
    }

    fn accounts(&self) -> Result<Vec<Account>, LedgerError> {
        SharedRegistry::accounts(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Customer;
    use std::thread;

    fn registry_with(balances: &[(AccountNumber, i64)]) -> SharedRegistry {
        let registry = SharedRegistry::new();
        for (number, balance) in balances {
            registry
                .insert(
                    Account::with_balance(
                        *number,
                        Customer::new(format!("Customer {number}"), "Somewhere", "555"),
                        Decimal::from(*balance),
                    )
                    .unwrap(),
                )
                .unwrap();
        }
        registry
    }

    #[test]
    fn test_insert_and_statement() {
        let registry = SharedRegistry::new();
        registry
            .insert(Account::new(
                1001,
                Customer::new("John", "Los Angeles, California", "(213) 555 0147"),
            ))
            .unwrap();

        assert_eq!(registry.statement(1001).unwrap(), "1001 - John - 0");
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_insert_rejects_duplicate_number() {
        let registry = registry_with(&[(1, 10)]);

        let result = registry.insert(Account::new(1, Customer::new("Other", "x", "y")));

        assert_eq!(result, Err(LedgerError::duplicate_account(1)));
        assert_eq!(registry.get(1).unwrap().balance(), Decimal::from(10));
    }

    #[test]
    fn test_deposit_and_withdraw() {
        let registry = registry_with(&[(1, 0)]);

        registry.deposit(1, Decimal::from(50)).unwrap();
        let account = registry.withdraw(1, Decimal::from(20)).unwrap();

        assert_eq!(account.balance(), Decimal::from(30));
        assert_eq!(registry.get(1).unwrap().balance(), Decimal::from(30));
    }

    #[test]
    fn test_unknown_account() {
        let registry = SharedRegistry::new();

        assert_eq!(registry.statement(7), Err(LedgerError::account_not_found(7)));
        assert_eq!(
            registry.deposit(7, Decimal::ONE),
            Err(LedgerError::account_not_found(7))
        );
    }

    #[test]
    fn test_transfer_in_both_lock_orders() {
        let registry = registry_with(&[(1, 100), (2, 100)]);

        let low_to_high = registry.transfer(1, 2, Decimal::from(30)).unwrap();
        let high_to_low = registry.transfer(2, 1, Decimal::from(50)).unwrap();

        assert_eq!(low_to_high.balance(), Decimal::from(70));
        assert_eq!(high_to_low.balance(), Decimal::from(80));
        assert_eq!(registry.get(1).unwrap().balance(), Decimal::from(120));
        assert_eq!(registry.get(2).unwrap().balance(), Decimal::from(80));
    }

    #[test]
    fn test_failed_transfer_leaves_balances_unchanged() {
        let registry = registry_with(&[(1, 10), (2, 0)]);

        assert!(matches!(
            registry.transfer(1, 2, Decimal::from(11)),
            Err(LedgerError::InsufficientFunds { .. })
        ));
        assert_eq!(
            registry.transfer(1, 1, Decimal::ONE),
            Err(LedgerError::same_account(1))
        );
        assert_eq!(
            registry.transfer(1, 3, Decimal::ONE),
            Err(LedgerError::account_not_found(3))
        );

        assert_eq!(registry.get(1).unwrap().balance(), Decimal::from(10));
        assert_eq!(registry.get(2).unwrap().balance(), Decimal::ZERO);
    }

    #[test]
    fn test_concurrent_transfers_preserve_total() {
        let registry = Arc::new(registry_with(&[(1, 1000), (2, 1000), (3, 1000)]));

        let workers: Vec<_> = (0..6u64)
            .map(|worker| {
                let registry = Arc::clone(&registry);
                thread::spawn(move || {
                    let from = worker % 3 + 1;
                    let to = (worker + 1) % 3 + 1;
                    for _ in 0..200 {
                        // Insufficient funds is an acceptable outcome here.
                        let _ = registry.transfer(from, to, Decimal::from(7));
                    }
                })
            })
            .collect();

        for worker in workers {
            worker.join().unwrap();
        }

        let accounts = registry.accounts().unwrap();
        let total: Decimal = accounts.iter().map(Account::balance).sum();
        assert_eq!(total, Decimal::from(3000));
        assert!(accounts.iter().all(|account| account.balance() >= Decimal::ZERO));
    }

    #[test]
    fn test_trait_object_matches_inherent_behavior() {
        let mut registry = SharedRegistry::new();
        let store: &mut dyn AccountRegistry = &mut registry;

        store
            .insert(Account::new(9, Customer::new("Goku", "Mount Paozu", "111")))
            .unwrap();
        store.deposit(9, Decimal::from(5)).unwrap();

        assert_eq!(store.statement(9).unwrap(), "9 - Goku - 5");
        assert_eq!(store.balance(9).unwrap(), Decimal::from(5));
        assert_eq!(store.balance(10), Err(LedgerError::account_not_found(10)));
        assert!(!store.is_empty());
    }
}
