//! Request handlers
//!
//! Every route reads its inputs from the query string. Successful responses
//! carry the affected account's statement as a plain-text body. A query
//! string that cannot be decoded at all (bad percent-encoding, a repeated
//! parameter) is reported as `invalid_parameter` like any malformed value.

use crate::api::error::ApiError;
use crate::core::SharedRegistry;
use crate::types::AccountNumber;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::str::FromStr;
use std::sync::Arc;

/// Raw query parameters shared by all account routes
///
/// Values stay strings so a missing parameter and a malformed one can be
/// reported separately.
#[derive(Debug, Default, Deserialize)]
pub struct AccountQuery {
    pub number: Option<String>,
    pub amount: Option<String>,
    pub dest: Option<String>,
}

/// `GET /health`
///
/// # Returns
///
/// `200 OK` while the server is accepting requests
pub async fn health() -> StatusCode {
    StatusCode::OK
}

/// `GET /statement?number=<n>`
///
/// # Returns
///
/// `200 OK` with the plain-text statement, or an [`ApiError`] JSON body
pub async fn statement(
    State(registry): State<Arc<SharedRegistry>>,
    query: Result<Query<AccountQuery>, QueryRejection>,
) -> Result<String, ApiError> {
    let Query(query) = query?;
    let number = parse_account_number("number", query.number.as_deref())?;

    let statement = registry.statement(number)?;
    tracing::debug!(account = number, "statement served");
    Ok(statement)
}

/// `POST /deposit?number=<n>&amount=<a>`
///
/// # Returns
///
/// The statement of the credited account
pub async fn deposit(
    State(registry): State<Arc<SharedRegistry>>,
    query: Result<Query<AccountQuery>, QueryRejection>,
) -> Result<String, ApiError> {
    let Query(query) = query?;
    let number = parse_account_number("number", query.number.as_deref())?;
    let amount = parse_amount(query.amount.as_deref())?;

    let account = registry.deposit(number, amount)?;
    tracing::info!(account = number, %amount, balance = %account.balance(), "deposit applied");
    Ok(account.statement())
}

/// `POST /withdraw?number=<n>&amount=<a>`
pub async fn withdraw(
    State(registry): State<Arc<SharedRegistry>>,
    query: Result<Query<AccountQuery>, QueryRejection>,
) -> Result<String, ApiError> {
    let Query(query) = query?;
    let number = parse_account_number("number", query.number.as_deref())?;
    let amount = parse_amount(query.amount.as_deref())?;

    let account = registry.withdraw(number, amount)?;
    tracing::info!(account = number, %amount, balance = %account.balance(), "withdrawal applied");
    Ok(account.statement())
}

/// `POST /transfer?number=<source>&amount=<a>&dest=<destination>`
///
/// # Returns
///
/// The statement of the source account after the transfer
pub async fn transfer(
    State(registry): State<Arc<SharedRegistry>>,
    query: Result<Query<AccountQuery>, QueryRejection>,
) -> Result<String, ApiError> {
    let Query(query) = query?;
    let number = parse_account_number("number", query.number.as_deref())?;
    let amount = parse_amount(query.amount.as_deref())?;
    let destination = parse_account_number("dest", query.dest.as_deref())?;

    let source = registry.transfer(number, destination, amount)?;
    tracing::info!(
        account = number,
        destination,
        %amount,
        balance = %source.balance(),
        "transfer applied"
    );
    Ok(source.statement())
}

fn required<'a>(name: &'static str, value: Option<&'a str>) -> Result<&'a str, ApiError> {
    match value.map(str::trim) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(ApiError::MissingParameter { name }),
    }
}

fn parse_account_number(
    name: &'static str,
    value: Option<&str>,
) -> Result<AccountNumber, ApiError> {
    let raw = required(name, value)?;
    raw.parse::<AccountNumber>()
        .map_err(|_| ApiError::InvalidParameter {
            name,
            value: raw.to_string(),
        })
}

fn parse_amount(value: Option<&str>) -> Result<Decimal, ApiError> {
    let raw = required("amount", value)?;
    Decimal::from_str(raw).map_err(|_| ApiError::InvalidParameter {
        name: "amount",
        value: raw.to_string(),
    })
}
