//! Error types for the bank ledger
//!
//! This module defines every error that can occur while mutating accounts,
//! looking them up in a registry, or seeding a registry at start-up.
//!
//! # Error Categories
//!
//! - **Amount Errors**: Non-positive amounts, insufficient funds, overflow
//! - **Registry Errors**: Unknown or duplicate account numbers, self transfers
//! - **Start-up Errors**: Seed file I/O and CSV problems

use super::account::AccountNumber;
use rust_decimal::Decimal;
use thiserror::Error;

/// Main error type for the bank ledger
///
/// All ledger errors are local and recoverable: an operation that fails
/// leaves every balance it touched unchanged, and the caller decides what
/// to do next.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LedgerError {
    /// Amount is zero or negative
    ///
    /// Deposits, withdrawals and transfers only accept strictly positive
    /// amounts. Seeded balances may be zero but never negative.
    #[error("Invalid amount {amount} for account {account}: amount must be positive")]
    InvalidAmount {
        /// Account the amount was applied to
        account: AccountNumber,
        /// The rejected amount
        amount: Decimal,
    },

    /// Withdrawal or transfer exceeds the current balance
    #[error("Insufficient funds for account {account}: balance {balance}, requested {requested}")]
    InsufficientFunds {
        /// Account being debited
        account: AccountNumber,
        /// Balance at the time of the request
        balance: Decimal,
        /// Requested amount
        requested: Decimal,
    },

    /// No account is registered under the number
    #[error("Account {account} not found")]
    AccountNotFound {
        /// The unknown account number
        account: AccountNumber,
    },

    /// An account with the same number is already registered
    ///
    /// Account numbers are assigned once and never reassigned.
    #[error("Account {account} already exists")]
    DuplicateAccount {
        /// The duplicated account number
        account: AccountNumber,
    },

    /// Source and destination of a transfer are the same account
    #[error("Cannot transfer from account {account} to itself")]
    SameAccount {
        /// The account number used on both sides
        account: AccountNumber,
    },

    /// The new balance cannot be represented exactly
    ///
    /// Covers both exceeding the `Decimal` range and results that would need
    /// more than 28 significant digits and would otherwise be rounded.
    #[error("Arithmetic overflow in {operation} for account {account}")]
    ArithmeticOverflow {
        /// Operation that would overflow
        operation: String,
        /// Account whose balance would change
        account: AccountNumber,
    },

    /// A thread panicked while holding the account lock
    #[error("Lock for account {account} is poisoned")]
    LockPoisoned {
        /// Account whose lock is poisoned
        account: AccountNumber,
    },

    /// The seed file contains an unusable record
    #[error("Seed error{}: {message}", line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    SeedError {
        /// Line number where the error occurred (if available)
        line: Option<u64>,
        /// Description of the problem
        message: String,
    },

    /// I/O error while reading the seed file or binding the listener
    #[error("I/O error: {message}")]
    IoError {
        /// Description of the I/O error
        message: String,
    },
}

impl From<std::io::Error> for LedgerError {
    fn from(error: std::io::Error) -> Self {
        LedgerError::IoError {
            message: error.to_string(),
        }
    }
}

impl From<csv::Error> for LedgerError {
    fn from(error: csv::Error) -> Self {
        let line = error.position().map(|pos| pos.line());

        LedgerError::SeedError {
            line,
            message: error.to_string(),
        }
    }
}

// Helper functions for creating common errors

impl LedgerError {
    /// Create an InvalidAmount error
    pub fn invalid_amount(account: AccountNumber, amount: Decimal) -> Self {
        LedgerError::InvalidAmount { account, amount }
    }

    /// Create an InsufficientFunds error
    pub fn insufficient_funds(
        account: AccountNumber,
        balance: Decimal,
        requested: Decimal,
    ) -> Self {
        LedgerError::InsufficientFunds {
            account,
            balance,
            requested,
        }
    }

    /// Create an AccountNotFound error
    pub fn account_not_found(account: AccountNumber) -> Self {
        LedgerError::AccountNotFound { account }
    }

    /// Create a DuplicateAccount error
    pub fn duplicate_account(account: AccountNumber) -> Self {
        LedgerError::DuplicateAccount { account }
    }

    /// Create a SameAccount error
    pub fn same_account(account: AccountNumber) -> Self {
        LedgerError::SameAccount { account }
    }

    /// Create an ArithmeticOverflow error
    pub fn arithmetic_overflow(operation: &str, account: AccountNumber) -> Self {
        LedgerError::ArithmeticOverflow {
            operation: operation.to_string(),
            account,
        }
    }

    /// Create a LockPoisoned error
    pub fn lock_poisoned(account: AccountNumber) -> Self {
        LedgerError::LockPoisoned { account }
    }

    /// Create a SeedError error
    pub fn seed_error(line: Option<u64>, message: impl Into<String>) -> Self {
        LedgerError::SeedError {
            line,
            message: message.into(),
        }
    }
}
