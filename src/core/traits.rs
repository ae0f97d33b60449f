//! Core trait for account registries
//!
//! This module defines the trait abstraction that lets the single-owner and
//! the concurrent registry be seeded and queried interchangeably.

use crate::types::{Account, AccountNumber, LedgerError};
use rust_decimal::Decimal;

/// Trait for storing accounts and applying balance operations by number
///
/// Implementations can be single-owner (using HashMap) or shared across
/// threads (using DashMap). Mutating operations return a snapshot of the
/// affected account taken right after the change.
pub trait AccountRegistry {
    /// Register a new account
    ///
    /// Fails with `DuplicateAccount` if the number is already taken.
    fn insert(&mut self, account: Account) -> Result<(), LedgerError>;

    /// Snapshot of a single account
    fn get(&self, number: AccountNumber) -> Result<Account, LedgerError>;

    /// Current balance of a single account
    ///
    /// # Arguments
    ///
    /// * `number` - Account to look up
    ///
    /// # Returns
    ///
    /// The balance, or `AccountNotFound` if the number is not registered
    fn balance(&self, number: AccountNumber) -> Result<Decimal, LedgerError> {
        self.get(number).map(|account| account.balance())
    }

    /// Statement text of a single account
    fn statement(&self, number: AccountNumber) -> Result<String, LedgerError> {
        self.get(number).map(|account| account.statement())
    }

    /// Credit an account
    fn deposit(&mut self, number: AccountNumber, amount: Decimal) -> Result<Account, LedgerError>;

    /// Debit an account
    fn withdraw(&mut self, number: AccountNumber, amount: Decimal)
        -> Result<Account, LedgerError>;

    /// Move funds between two accounts, returning the source snapshot
    fn transfer(
        &mut self,
        from: AccountNumber,
        to: AccountNumber,
        amount: Decimal,
    ) -> Result<Account, LedgerError>;

    /// Number of registered accounts
    fn len(&self) -> usize;

    /// Whether no account is registered
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All accounts sorted by number
    fn accounts(&self) -> Result<Vec<Account>, LedgerError>;
}
