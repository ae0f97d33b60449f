//! HTTP API
//!
//! Exposes the account registry over HTTP:
//!
//! - `GET /statement?number=<n>` - statement text of an account
//! - `POST /deposit?number=<n>&amount=<a>` - credit an account
//! - `POST /withdraw?number=<n>&amount=<a>` - debit an account
//! - `POST /transfer?number=<n>&amount=<a>&dest=<d>` - move funds between accounts
//! - `GET /health` - liveness check
//!
//! The registry is passed in by the caller; the router holds no other state.

pub mod error;
pub mod routes;

pub use error::ApiError;

use crate::core::SharedRegistry;
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;

/// Build the application router around `registry`
///
/// # Arguments
///
/// * `registry` - Account store shared by every handler
pub fn router(registry: Arc<SharedRegistry>) -> Router {
    Router::new()
        .route("/health", get(routes::health))
        .route("/statement", get(routes::statement))
        .route("/deposit", post(routes::deposit))
        .route("/withdraw", post(routes::withdraw))
        .route("/transfer", post(routes::transfer))
        .with_state(registry)
}
