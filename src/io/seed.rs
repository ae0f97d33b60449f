//! Registry seeding from CSV
//!
//! The process bootstrap fills the registry before the server starts
//! accepting requests, either from a seed file or with the built-in demo
//! account.
//!
//! # Seed Format
//!
//! ```text
//! number,name,address,phone,balance
//! 1001,John,"Los Angeles, California",(213) 555 0147,0
//! 1002,Bulma,Capsule Corp,(999) 999 9991,1100.50
//! ```
//!
//! The `balance` column is optional and defaults to zero. Fields are trimmed.

use crate::core::AccountRegistry;
use crate::types::{Account, AccountNumber, Customer, LedgerError};
use csv::{ReaderBuilder, StringRecord, Trim};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

/// CSV record structure for deserialization
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct SeedRecord {
    pub number: AccountNumber,
    pub name: String,
    pub address: String,
    pub phone: String,
    pub balance: Option<String>,
}

/// Convert a SeedRecord to an Account
///
/// # Errors
///
/// Returns a `SeedError` if the balance is not a decimal or is negative.
pub fn convert_seed_record(record: SeedRecord) -> Result<Account, LedgerError> {
    let balance = match record.balance {
        Some(balance) if !balance.trim().is_empty() => Decimal::from_str(balance.trim())
            .map_err(|_| {
                LedgerError::seed_error(
                    None,
                    format!("invalid balance '{}' for account {}", balance, record.number),
                )
            })?,
        _ => Decimal::ZERO,
    };

    let customer = Customer::new(record.name, record.address, record.phone);
    Account::with_balance(record.number, customer, balance).map_err(|_| {
        LedgerError::seed_error(
            None,
            format!(
                "negative opening balance {} for account {}",
                balance, record.number
            ),
        )
    })
}

/// Load every account from a seed file into `registry`
///
/// Loading stops at the first bad record; accounts inserted before it stay
/// registered.
///
/// # Returns
///
/// The number of accounts inserted.
pub fn load_seed_file<R>(path: &Path, registry: &mut R) -> Result<usize, LedgerError>
where
    R: AccountRegistry + ?Sized,
{
    let file = File::open(path).map_err(|e| LedgerError::IoError {
        message: format!("Failed to open seed file '{}': {}", path.display(), e),
    })?;
    load_seed(file, registry)
}

/// Load every account from CSV data into `registry`
///
/// # Arguments
///
/// * `input` - CSV with a `number,name,address,phone,balance` header row
/// * `registry` - Store that receives the accounts
///
/// # Errors
///
/// Returns a `SeedError` carrying the line where the offending record
/// starts.
pub fn load_seed<D, R>(input: D, registry: &mut R) -> Result<usize, LedgerError>
where
    D: Read,
    R: AccountRegistry + ?Sized,
{
    let mut reader = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .from_reader(input);

    let headers = reader.headers()?.clone();
    let mut raw = StringRecord::new();
    let mut inserted = 0;
    while reader.read_record(&mut raw)? {
        // Quoted fields may span lines; report the line the record starts on.
        let line = raw.position().map_or(0, |pos| pos.line());
        let record: SeedRecord = raw
            .deserialize(Some(&headers))
            .map_err(|e| at_line(e.into(), line))?;

        let account = convert_seed_record(record).map_err(|e| at_line(e, line))?;
        let number = account.number;
        registry.insert(account).map_err(|e| at_line(e, line))?;

        tracing::debug!(account = number, line, "seeded account");
        inserted += 1;
    }

    Ok(inserted)
}

/// The demo account registered when no seed file is given
pub fn demo_account() -> Account {
    Account::new(
        1001,
        Customer::new("John", "Los Angeles, California", "(213) 555 0147"),
    )
}

/// Register the demo account
///
/// # Errors
///
/// Returns `DuplicateAccount` if account 1001 is already registered.
pub fn seed_demo<R>(registry: &mut R) -> Result<(), LedgerError>
where
    R: AccountRegistry + ?Sized,
{
    registry.insert(demo_account())
}

fn at_line(error: LedgerError, line: u64) -> LedgerError {
    match error {
        LedgerError::SeedError { message, .. } => LedgerError::seed_error(Some(line), message),
        other => LedgerError::seed_error(Some(line), other.to_string()),
    }
}
