//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `account`: Customer and Account types with balance operations
//! - `error`: Error types for the bank ledger

pub mod account;
pub mod error;

pub use account::{Account, AccountNumber, Customer};
pub use error::LedgerError;
