//! Bank Ledger Library
//! # Overview
//!
//! This library provides customer accounts with deposit, withdrawal, transfer
//! and statement operations, an in-memory account registry, and an HTTP
//! service that serves statements and balance operations from that registry.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (Customer, Account, LedgerError)
//! - [`core`] - Account registries:
//!   - [`core::registry`] - Single-owner registry
//!   - [`core::shared_registry`] - Thread-safe registry with per-account locks
//! - [`api`] - axum router, handlers and HTTP error mapping
//! - [`io`] - Seeding a registry from CSV
//! - [`cli`] - CLI arguments parsing
//! - [`telemetry`] - Tracing initialization
//!
//! # Operations
//!
//! - **Deposit**: Credit a strictly positive amount
//! - **Withdraw**: Debit a strictly positive amount no larger than the balance
//! - **Transfer**: Withdraw from one account and deposit into another, all or nothing
//! - **Statement**: `"<number> - <name> - <balance>"`

// Module declarations
pub mod api;
pub mod cli;
pub mod core;
pub mod io;
pub mod telemetry;
pub mod types;

pub use core::{AccountRegistry, Registry, SharedRegistry};
pub use types::{Account, AccountNumber, Customer, LedgerError};
