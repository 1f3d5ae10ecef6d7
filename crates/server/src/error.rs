//! Application error handling

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use carecms_core::outcome::{Outcome, OutcomeCode};
use thiserror::Error;

/// Application error type.
///
/// Every variant is converted into a displayed outcome body at the handler
/// boundary; nothing here crashes the process. Empty result sets are not
/// errors and never pass through this type.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("invalid identifier: {0}")]
    InvalidIdentifier(String),

    #[error("missing parameter: {0}")]
    MissingParameter(&'static str),

    #[error("forbidden: {0}")]
    Forbidden(String),

    #[error("document store query failed: {0}")]
    Store(String),

    #[error("document store unreachable: {0}")]
    Connection(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, outcome) = match self {
            AppError::InvalidIdentifier(msg) => (
                StatusCode::BAD_REQUEST,
                Outcome::error(OutcomeCode::InvalidIdentifier, msg),
            ),
            AppError::MissingParameter(name) => (
                StatusCode::BAD_REQUEST,
                Outcome::error(
                    OutcomeCode::MissingParameter,
                    format!("Query parameter '{name}' is required"),
                ),
            ),
            AppError::Forbidden(msg) => (
                StatusCode::FORBIDDEN,
                Outcome::error(OutcomeCode::Forbidden, msg),
            ),
            AppError::Store(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Outcome::error(OutcomeCode::StoreFailure, msg),
            ),
            AppError::Connection(msg) => (
                StatusCode::SERVICE_UNAVAILABLE,
                Outcome::error(OutcomeCode::StoreFailure, msg),
            ),
        };

        (status, Json(outcome)).into_response()
    }
}

impl From<deadpool_postgres::PoolError> for AppError {
    fn from(err: deadpool_postgres::PoolError) -> Self {
        AppError::Connection(format!("Database pool error: {}", err))
    }
}

impl From<tokio_postgres::Error> for AppError {
    fn from(err: tokio_postgres::Error) -> Self {
        AppError::Store(format!("Database error: {}", err))
    }
}
