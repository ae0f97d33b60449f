//! HTTP error mapping
//!
//! | Condition                     | Status | `error` code          |
//! |-------------------------------|--------|-----------------------|
//! | query parameter missing       | 400    | `missing_parameter`   |
//! | query parameter malformed     | 400    | `invalid_parameter`   |
//! | query string not decodable    | 400    | `invalid_parameter`   |
//! | unknown account               | 404    | `not_found`           |
//! | non-positive amount           | 400    | `invalid_amount`      |
//! | transfer to the same account  | 400    | `same_account`        |
//! | insufficient funds            | 422    | `insufficient_funds`  |
//! | balance overflow              | 422    | `arithmetic_overflow` |
//! | anything else                 | 500    | `internal_error`      |

use crate::types::LedgerError;
use axum::extract::rejection::QueryRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

/// Failure of a single request
///
/// Every variant renders as a JSON body `{"error": <code>, "message": <text>}`
/// with the status given by [`ApiError::status`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// A required query parameter is absent or blank
    #[error("missing query parameter '{name}'")]
    MissingParameter { name: &'static str },

    /// A query parameter is present but does not parse
    #[error("query parameter '{name}' has invalid value '{value}'")]
    InvalidParameter { name: &'static str, value: String },

    /// The query string as a whole could not be decoded
    #[error("invalid query string: {message}")]
    MalformedQuery { message: String },

    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::MalformedQuery {
            message: rejection.body_text(),
        }
    }
}

impl ApiError {
    /// HTTP status code for this error
    ///
    /// # Returns
    ///
    /// `400` for request problems, `404` for unknown accounts, `422` for
    /// operations the balance cannot honor, `500` otherwise
    pub fn status(&self) -> StatusCode {
        self.classify().0
    }

    /// Machine-readable code placed in the `error` field of the body
    ///
    /// # Returns
    ///
    /// One of the codes listed in the module table, e.g. `"not_found"`
    pub fn code(&self) -> &'static str {
        self.classify().1
    }

    fn classify(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::MissingParameter { .. } => (StatusCode::BAD_REQUEST, "missing_parameter"),
            ApiError::InvalidParameter { .. } | ApiError::MalformedQuery { .. } => {
                (StatusCode::BAD_REQUEST, "invalid_parameter")
            }
            ApiError::Ledger(error) => match error {
                LedgerError::AccountNotFound { .. } => (StatusCode::NOT_FOUND, "not_found"),
                LedgerError::InvalidAmount { .. } => (StatusCode::BAD_REQUEST, "invalid_amount"),
                LedgerError::SameAccount { .. } => (StatusCode::BAD_REQUEST, "same_account"),
                LedgerError::InsufficientFunds { .. } => {
                    (StatusCode::UNPROCESSABLE_ENTITY, "insufficient_funds")
                }
                LedgerError::ArithmeticOverflow { .. } => {
                    (StatusCode::UNPROCESSABLE_ENTITY, "arithmetic_overflow")
                }
                LedgerError::DuplicateAccount { .. }
                | LedgerError::LockPoisoned { .. }
                | LedgerError::SeedError { .. }
                | LedgerError::IoError { .. } => {
                    (StatusCode::INTERNAL_SERVER_ERROR, "internal_error")
                }
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.classify();
        if status.is_server_error() {
            tracing::error!(error = %self, code, "request failed");
        } else {
            tracing::warn!(error = %self, code, "request rejected");
        }

        json_error(status, code, self.to_string())
    }
}

/// Build a JSON error response
///
/// # Arguments
///
/// * `status` - HTTP status of the response
/// * `code` - Value of the `error` field
/// * `message` - Value of the `message` field
pub fn json_error(status: StatusCode, code: &'static str, message: impl Into<String>) -> Response {
    (
        status,
        Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
